use super::engine::{FrameRenderer, Particle, Surface};

/// Renderer with no display attached: reports each run through tracing
#[derive(Debug, Default)]
pub struct TracingRenderer {
    frames: u64,
    drawn: u64,
    surface: Option<Surface>,
}

impl TracingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Frames rendered in the current run
    #[cfg(test)]
    pub fn frames(&self) -> u64 {
        self.frames
    }
}

impl FrameRenderer for TracingRenderer {
    fn begin_frame(&mut self, surface: Surface) {
        self.surface = Some(surface);
    }

    fn draw(&mut self, _particle: &Particle) {
        self.drawn += 1;
    }

    fn end_frame(&mut self, live: usize) {
        self.frames += 1;
        tracing::trace!(frame = self.frames, live, "Confetti frame");

        if live == 0 {
            tracing::info!(
                frames = self.frames,
                particle_frames = self.drawn,
                width = self.surface.map(|s| s.width),
                height = self.surface.map(|s| s.height),
                "Confetti finished"
            );
            self.frames = 0;
            self.drawn = 0;
        }
    }
}
