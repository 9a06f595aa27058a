//! Particle simulation

use rand::seq::SliceRandom;
use rand::Rng;

/// Particles added per launch
pub const BATCH_SIZE: usize = 100;

/// Colors a particle may be drawn in
pub const PALETTE: [&str; 6] = [
    "#667eea", "#764ba2", "#f093fb", "#f5576c", "#4facfe", "#00f2fe",
];

/// Particles spawn just above the visible area
const SPAWN_Y: f32 = -10.0;

/// Drawing surface dimensions
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Surface {
    pub width: f32,
    pub height: f32,
}

impl Surface {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Both dimensions finite and non-negative
    pub fn is_valid(&self) -> bool {
        [self.width, self.height]
            .iter()
            .all(|d| d.is_finite() && *d >= 0.0)
    }

    /// Invalid dimensions collapse to zero
    fn clamped(self) -> Self {
        let clamp = |d: f32| if d.is_finite() && d > 0.0 { d } else { 0.0 };
        Self::new(clamp(self.width), clamp(self.height))
    }
}

/// One piece of confetti
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub x: f32,
    pub y: f32,
    /// Horizontal drift per frame
    pub speed_x: f32,
    /// Downward speed per frame, always positive
    pub speed_y: f32,
    pub size: f32,
    /// Degrees
    pub rotation: f32,
    /// Degrees per frame
    pub rotation_speed: f32,
    pub color: &'static str,
}

impl Particle {
    fn advance(&mut self) {
        self.x += self.speed_x;
        self.y += self.speed_y;
        self.rotation += self.rotation_speed;
    }

    pub fn has_fallen_past(&self, height: f32) -> bool {
        self.y > height
    }
}

/// Receives each particle at its new pose once per frame
pub trait FrameRenderer {
    fn begin_frame(&mut self, surface: Surface);
    fn draw(&mut self, particle: &Particle);
    /// `live` is the number of particles left after culling
    fn end_frame(&mut self, live: usize);
}

/// Live particle set plus the surface it falls through
pub struct ConfettiEngine<R> {
    particles: Vec<Particle>,
    surface: Surface,
    rng: R,
}

impl<R: Rng> ConfettiEngine<R> {
    pub fn new(surface: Surface, rng: R) -> Self {
        Self {
            particles: Vec::new(),
            surface: surface.clamped(),
            rng,
        }
    }

    /// Add a batch on top of whatever is still falling
    pub fn launch(&mut self) {
        self.particles.reserve(BATCH_SIZE);
        for _ in 0..BATCH_SIZE {
            let particle = self.spawn_particle();
            self.particles.push(particle);
        }
    }

    fn spawn_particle(&mut self) -> Particle {
        let x = if self.surface.width > 0.0 {
            self.rng.gen_range(0.0..self.surface.width)
        } else {
            0.0
        };
        let color = PALETTE.choose(&mut self.rng).copied().unwrap_or(PALETTE[0]);

        Particle {
            x,
            y: SPAWN_Y,
            speed_x: self.rng.gen_range(-1.0..1.0),
            speed_y: self.rng.gen_range(2.0..5.0),
            size: self.rng.gen_range(4.0..12.0),
            rotation: self.rng.gen_range(0.0..360.0),
            rotation_speed: self.rng.gen_range(-5.0..5.0),
            color,
        }
    }

    /// Advance one frame; returns the number of particles still live
    pub fn step<F: FrameRenderer + ?Sized>(&mut self, renderer: &mut F) -> usize {
        renderer.begin_frame(self.surface);
        for particle in &mut self.particles {
            particle.advance();
            renderer.draw(particle);
        }

        let height = self.surface.height;
        self.particles.retain(|p| !p.has_fallen_past(height));

        let live = self.particles.len();
        renderer.end_frame(live);
        live
    }

    /// Takes effect from the next frame on. Invalid sizes are ignored.
    pub fn resize(&mut self, surface: Surface) {
        if !surface.is_valid() {
            tracing::warn!(?surface, "Ignoring invalid confetti surface");
            return;
        }
        self.surface = surface;
    }

    pub fn is_live(&self) -> bool {
        !self.particles.is_empty()
    }

    pub fn live_count(&self) -> usize {
        self.particles.len()
    }

    #[cfg(test)]
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }
}
