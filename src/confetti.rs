//! Celebration animation
//!
//! A falling-particle effect that runs on its own frame schedule. The game
//! runtime only ever talks to it through a [`ConfettiHandle`].

mod animation;
mod engine;
mod renderer;

pub use animation::{spawn_animation, ConfettiHandle};
pub use engine::{ConfettiEngine, Surface};
pub use renderer::TracingRenderer;

#[cfg(test)]
pub use animation::AnimationCommand;
