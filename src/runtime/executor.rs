//! Game runtime executor

use super::traits::UiSurface;
use crate::confetti::ConfettiHandle;
use crate::oracle::{OracleClient, OracleError};
use crate::state_machine::{
    transition, CallKind, Effect, Event, GameState, Intent, OracleCall, TransitionResult, UiCommand,
};
use std::sync::Arc;
use tokio::sync::mpsc;

/// Oracle reply routed back into the state machine
#[derive(Debug)]
pub struct Reply {
    /// Session generation the call was issued under
    generation: u64,
    call: CallKind,
    event: Event,
}

/// Runtime for one player's game. Works with any oracle and UI surface.
pub struct GameRuntime<O, U>
where
    O: OracleClient + 'static,
    U: UiSurface,
{
    state: GameState,
    oracle: Arc<O>,
    ui: U,
    confetti: ConfettiHandle,
    /// Bumped whenever a session is discarded; older replies are stale
    generation: u64,
    /// Blocking call awaiting its reply, if any
    in_flight: Option<CallKind>,
    reply_tx: mpsc::UnboundedSender<Reply>,
    reply_rx: mpsc::UnboundedReceiver<Reply>,
}

impl<O, U> GameRuntime<O, U>
where
    O: OracleClient + 'static,
    U: UiSurface,
{
    pub fn new(oracle: O, ui: U, confetti: ConfettiHandle) -> Self {
        let (reply_tx, reply_rx) = mpsc::unbounded_channel();
        Self {
            state: GameState::Idle,
            oracle: Arc::new(oracle),
            ui,
            confetti,
            generation: 0,
            in_flight: None,
            reply_tx,
            reply_rx,
        }
    }

    #[cfg(test)]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    #[cfg(test)]
    pub fn ui(&self) -> &U {
        &self.ui
    }

    #[cfg(test)]
    pub fn in_flight(&self) -> Option<CallKind> {
        self.in_flight
    }

    pub async fn run(mut self, mut intents: mpsc::Receiver<Intent>) {
        tracing::info!("Starting game runtime");

        // Landing view shows totals before the first game
        self.spawn_call(OracleCall::Stats);

        loop {
            tokio::select! {
                intent = intents.recv() => match intent {
                    Some(intent) => self.handle_intent(intent),
                    None => break,
                },
                Some(reply) = self.reply_rx.recv() => self.handle_reply(reply),
            }
        }

        tracing::info!(state = self.state.name(), "Game runtime stopped");
    }

    /// Feed a player intent through the state machine
    pub fn handle_intent(&mut self, intent: Intent) {
        let is_reset = matches!(intent, Intent::Reset);

        if let Some(pending) = self.in_flight {
            if !is_reset {
                tracing::warn!(
                    pending = pending.name(),
                    intent = intent.name(),
                    "Oracle call in flight, ignoring intent"
                );
                return;
            }
        }

        if is_reset {
            // Replies for the discarded session are dropped when they arrive
            self.in_flight = None;
            self.generation += 1;
        }

        self.process(Event::from(intent));
    }

    /// Feed an oracle reply through the state machine
    pub fn handle_reply(&mut self, reply: Reply) {
        if reply.generation != self.generation {
            tracing::debug!(
                call = reply.call.name(),
                generation = reply.generation,
                current = self.generation,
                "Discarding stale oracle reply"
            );
            return;
        }

        if reply.call.is_blocking() {
            self.in_flight = None;
        }

        if let Event::OracleFailed { call, error } = &reply.event {
            if call.is_blocking() {
                tracing::error!(call = call.name(), kind = ?error.kind, error = %error, "Oracle call failed");
            } else {
                tracing::warn!(call = call.name(), kind = ?error.kind, error = %error, "Background oracle call failed");
            }
        }

        self.process(reply.event);
    }

    /// Wait for the next oracle reply and apply it
    #[cfg(test)]
    pub async fn process_next_reply(&mut self) {
        if let Some(reply) = self.reply_rx.recv().await {
            self.handle_reply(reply);
        }
    }

    fn process(&mut self, event: Event) {
        let event_name = event.name();
        match transition(&self.state, event) {
            Ok(result) => self.apply(result),
            Err(e) if e.is_user_facing() => {
                self.ui.apply(UiCommand::ShowError {
                    message: e.to_string(),
                });
            }
            Err(e) => {
                tracing::warn!(state = self.state.name(), event = event_name, error = %e, "Ignoring event");
            }
        }
    }

    fn apply(&mut self, result: TransitionResult) {
        let old_state = std::mem::replace(&mut self.state, result.new_state);

        if old_state.name() != self.state.name() {
            tracing::debug!(from = old_state.name(), to = self.state.name(), "State changed");
        }

        // Session over: anything still in flight for it is stale
        if old_state.session().is_some() && self.state.session().is_none() {
            self.generation += 1;
        }

        for effect in result.effects {
            self.execute_effect(effect);
        }
    }

    fn execute_effect(&mut self, effect: Effect) {
        match effect {
            Effect::Ui(command) => self.ui.apply(command),
            Effect::Call(call) => self.spawn_call(call),
            Effect::LaunchConfetti => self.confetti.launch(),
        }
    }

    fn spawn_call(&mut self, call: OracleCall) {
        let kind = call.kind();
        if kind.is_blocking() {
            self.in_flight = Some(kind);
        }

        let oracle = Arc::clone(&self.oracle);
        let reply_tx = self.reply_tx.clone();
        let generation = self.generation;

        tokio::spawn(async move {
            let event = perform(oracle.as_ref(), call).await;
            // Receiver only goes away with the runtime itself
            let _ = reply_tx.send(Reply {
                generation,
                call: kind,
                event,
            });
        });
    }
}

/// Run one oracle call and translate its outcome into an event
async fn perform<O: OracleClient + ?Sized>(oracle: &O, call: OracleCall) -> Event {
    let kind = call.kind();
    let failed = |error: OracleError| Event::OracleFailed { call: kind, error };

    match call {
        OracleCall::StartGame => match oracle.start_game().await {
            Ok(reply) => Event::GameStarted { reply },
            Err(e) => failed(e),
        },
        OracleCall::Answer {
            session_id,
            question_id,
            answer,
        } => match oracle.answer(&session_id, question_id, answer).await {
            Ok(reply) => Event::Answered { reply },
            Err(e) => failed(e),
        },
        OracleCall::ConfirmGuess {
            session_id,
            character_id,
            correct,
        } => match oracle.confirm_guess(&session_id, character_id, correct).await {
            Ok(reply) => Event::GuessConfirmed {
                accepted: correct,
                reply,
            },
            Err(e) => failed(e),
        },
        OracleCall::AddCharacter { character } => match oracle.add_character(&character).await {
            Ok(()) => Event::CharacterAdded {
                name: character.name,
            },
            Err(e) => failed(e),
        },
        OracleCall::ListQuestions => match oracle.list_questions().await {
            Ok(questions) => Event::QuestionsListed { questions },
            Err(e) => failed(e),
        },
        OracleCall::Stats => match oracle.stats().await {
            Ok(stats) => Event::StatsLoaded { stats },
            Err(e) => failed(e),
        },
    }
}
