//! Trait abstractions for runtime I/O
//!
//! The UI surface is external to the core; anything that can render the
//! commands below can host a game.

use crate::state_machine::UiCommand;

/// Presentation layer driven by the runtime
pub trait UiSurface: Send {
    /// Apply one update command
    fn apply(&mut self, command: UiCommand);
}

impl<U: UiSurface + ?Sized> UiSurface for Box<U> {
    fn apply(&mut self, command: UiCommand) {
        (**self).apply(command);
    }
}
