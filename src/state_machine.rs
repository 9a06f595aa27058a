//! Core game session state machine
//!
//! Implements the Elm Architecture pattern with pure state transitions.

pub mod effect;
pub mod event;
pub mod state;
pub(crate) mod transition;

#[cfg(test)]
mod proptests;

pub use effect::{CallKind, Effect, OracleCall, StatsPreview, UiCommand, View};
pub use event::{Event, Intent};
pub use state::{GameState, Session};
pub use transition::{transition, TransitionError, TransitionResult};
