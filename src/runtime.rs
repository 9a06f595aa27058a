//! Runtime for executing game sessions
//!
//! Owns the state machine, runs its effects against the oracle, the UI
//! surface and the confetti task.

mod executor;
pub mod traits;

#[cfg(test)]
pub mod testing;

pub use executor::GameRuntime;
pub use traits::*;

use crate::confetti::ConfettiHandle;
use crate::oracle::OracleClient;
use crate::state_machine::Intent;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Intents buffered between the UI surface and the runtime
const INTENT_BUFFER: usize = 32;

/// Handle to interact with a running game
#[derive(Clone)]
pub struct GameHandle {
    intent_tx: mpsc::Sender<Intent>,
}

impl GameHandle {
    /// Forward a player intent. Returns false once the runtime has stopped.
    pub async fn send(&self, intent: Intent) -> bool {
        self.intent_tx.send(intent).await.is_ok()
    }

    /// Handle with no runtime behind it; the receiver sees every intent
    #[cfg(test)]
    pub fn detached() -> (Self, mpsc::Receiver<Intent>) {
        let (intent_tx, intent_rx) = mpsc::channel(INTENT_BUFFER);
        (Self { intent_tx }, intent_rx)
    }
}

/// Spawn a runtime for one player. Dropping every handle stops it.
pub fn spawn_game<O, U>(oracle: O, ui: U, confetti: ConfettiHandle) -> (GameHandle, JoinHandle<()>)
where
    O: OracleClient + 'static,
    U: UiSurface + 'static,
{
    let (intent_tx, intent_rx) = mpsc::channel(INTENT_BUFFER);
    let runtime = GameRuntime::new(oracle, ui, confetti);
    let task = tokio::spawn(runtime.run(intent_rx));
    (GameHandle { intent_tx }, task)
}
