//! Frame loop task

use super::engine::{ConfettiEngine, FrameRenderer, Surface};
use rand::Rng;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};

/// Commands accepted by the animation task
#[derive(Debug, Clone, PartialEq)]
pub enum AnimationCommand {
    Launch,
    Resize(Surface),
}

/// Cloneable sender side of the animation task
#[derive(Debug, Clone)]
pub struct ConfettiHandle {
    tx: mpsc::UnboundedSender<AnimationCommand>,
}

impl ConfettiHandle {
    /// Handle plus the receiving end, for wiring up a task or inspecting
    /// commands directly
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<AnimationCommand>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    pub fn launch(&self) {
        self.send(AnimationCommand::Launch);
    }

    #[allow(dead_code)] // No bundled surface reports its size yet
    pub fn resize(&self, surface: Surface) {
        self.send(AnimationCommand::Resize(surface));
    }

    fn send(&self, command: AnimationCommand) {
        if self.tx.send(command).is_err() {
            tracing::warn!("Confetti task is gone, dropping command");
        }
    }
}

/// Run the engine until every handle is dropped and the last particle has
/// fallen. The interval only ticks while particles are live.
pub fn spawn_animation<R, F>(
    engine: ConfettiEngine<R>,
    renderer: F,
    commands: mpsc::UnboundedReceiver<AnimationCommand>,
    frame: Duration,
) -> JoinHandle<()>
where
    R: Rng + Send + 'static,
    F: FrameRenderer + Send + 'static,
{
    tokio::spawn(run(engine, renderer, commands, frame))
}

async fn run<R: Rng, F: FrameRenderer>(
    mut engine: ConfettiEngine<R>,
    mut renderer: F,
    mut commands: mpsc::UnboundedReceiver<AnimationCommand>,
    frame: Duration,
) {
    let mut ticker = interval(frame);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        if engine.is_live() {
            tokio::select! {
                command = commands.recv() => match command {
                    Some(command) => apply(&mut engine, command),
                    None => break,
                },
                _ = ticker.tick() => {
                    engine.step(&mut renderer);
                }
            }
        } else {
            // Idle: nothing to draw until the next command
            match commands.recv().await {
                Some(command) => {
                    apply(&mut engine, command);
                    if engine.is_live() {
                        ticker.reset();
                    }
                }
                None => break,
            }
        }
    }

    while engine.is_live() {
        ticker.tick().await;
        engine.step(&mut renderer);
    }
    tracing::debug!("Confetti task stopped");
}

fn apply<R: Rng>(engine: &mut ConfettiEngine<R>, command: AnimationCommand) {
    match command {
        AnimationCommand::Launch => {
            engine.launch();
            tracing::debug!(live = engine.live_count(), "Confetti launched");
        }
        AnimationCommand::Resize(surface) => engine.resize(surface),
    }
}
