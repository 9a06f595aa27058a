//! Pure state transition function
//!
//! Given the same state and event, `transition` always produces the same
//! new state and effects. All I/O happens in the runtime.

use super::effect::{OracleCall, UiCommand, View, LEARNING_FORM_SIZE};
use super::state::{GameState, Session};
use super::{Effect, Event};
use crate::oracle::AnswerReply;
use thiserror::Error;

/// Result of a state transition
#[derive(Debug)]
pub struct TransitionResult {
    pub new_state: GameState,
    pub effects: Vec<Effect>,
}

impl TransitionResult {
    pub fn new(state: GameState) -> Self {
        Self {
            new_state: state,
            effects: vec![],
        }
    }

    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }

    pub fn with_effects(mut self, effects: impl IntoIterator<Item = Effect>) -> Self {
        self.effects.extend(effects);
        self
    }
}

/// Errors that can occur during transition
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TransitionError {
    #[error("Please give the character a name")]
    MissingName,
    #[error("Invalid transition: {0}")]
    InvalidTransition(String),
}

impl TransitionError {
    /// Whether the player should see this error, as opposed to a log line
    pub fn is_user_facing(&self) -> bool {
        matches!(self, TransitionError::MissingName)
    }
}

/// Pure transition function
pub fn transition(state: &GameState, event: Event) -> Result<TransitionResult, TransitionError> {
    match (state, event) {
        // ============================================================
        // Reset is accepted everywhere
        // ============================================================
        (_, Event::Reset) => Ok(TransitionResult::new(GameState::Idle)
            .with_effect(Effect::Ui(UiCommand::CloseAllModals))
            .with_effect(Effect::Ui(UiCommand::SwitchView(View::Landing)))
            .with_effect(Effect::Call(OracleCall::Stats))),

        // ============================================================
        // Starting a game
        // ============================================================
        (GameState::Idle, Event::Start) => {
            Ok(TransitionResult::new(GameState::Idle)
                .with_effect(Effect::Call(OracleCall::StartGame)))
        }

        (GameState::Idle, Event::GameStarted { reply }) => {
            let session = Session::new(reply.session_id, reply.question);
            let display =
                Effect::display_question(&session, reply.progress, reply.candidates_remaining);
            Ok(TransitionResult::new(GameState::Playing { session })
                .with_effect(Effect::Ui(UiCommand::SwitchView(View::Play)))
                .with_effect(display))
        }

        // ============================================================
        // Answering
        // ============================================================
        (GameState::Playing { session }, Event::Answer { answer }) => {
            Ok(TransitionResult::new(state.clone()).with_effect(Effect::Call(OracleCall::Answer {
                session_id: session.id.clone(),
                question_id: session.question.id,
                answer,
            })))
        }

        (GameState::Playing { session }, Event::Answered { reply }) => match reply {
            AnswerReply::Question {
                question,
                question_count,
                progress,
                candidates_remaining,
            } => {
                let session = session.ask(question, question_count);
                let display = Effect::display_question(&session, progress, candidates_remaining);
                Ok(TransitionResult::new(GameState::Playing { session }).with_effect(display))
            }
            AnswerReply::Guess {
                character,
                question_count,
            } => Ok(TransitionResult::new(GameState::Guessing {
                session: session.finish(question_count),
                candidate: character.clone(),
            })
            .with_effect(Effect::Ui(UiCommand::ShowGuess { character }))),
            AnswerReply::GiveUp { .. } => Ok(TransitionResult::new(GameState::Learning {
                session: session.finish(None),
            })
            .with_effects(enter_learning())),
        },

        // ============================================================
        // Confirming a guess
        // ============================================================
        (GameState::Guessing { session, candidate }, Event::Confirm { accepted: true }) => {
            Ok(TransitionResult::new(state.clone()).with_effect(Effect::Call(
                OracleCall::ConfirmGuess {
                    session_id: session.id.clone(),
                    character_id: candidate.id,
                    correct: true,
                },
            )))
        }

        // The confirmation is bookkeeping only; its outcome never gates learning
        (GameState::Guessing { session, candidate }, Event::Confirm { accepted: false }) => {
            Ok(TransitionResult::new(GameState::Learning {
                session: session.clone(),
            })
            .with_effect(Effect::Call(OracleCall::ConfirmGuess {
                session_id: session.id.clone(),
                character_id: candidate.id,
                correct: false,
            }))
            .with_effects(enter_learning()))
        }

        (GameState::Guessing { session, .. }, Event::GuessConfirmed { accepted: true, reply }) => {
            let questions_used = reply.questions_used.unwrap_or(session.question_count);
            Ok(TransitionResult::new(GameState::Idle)
                .with_effect(Effect::Ui(UiCommand::CloseAllModals))
                .with_effect(Effect::show_result(true, questions_used))
                .with_effect(Effect::LaunchConfetti))
        }

        (_, Event::GuessConfirmed { accepted: false, .. }) => {
            Ok(TransitionResult::new(state.clone()))
        }

        // ============================================================
        // Learning
        // ============================================================
        (GameState::Learning { .. }, Event::SubmitCharacter { character })
            if character.name.trim().is_empty() =>
        {
            Err(TransitionError::MissingName)
        }

        (GameState::Learning { .. }, Event::SubmitCharacter { character }) => {
            Ok(TransitionResult::new(state.clone())
                .with_effect(Effect::Call(OracleCall::AddCharacter { character })))
        }

        (GameState::Learning { session }, Event::CharacterAdded { name }) => {
            Ok(TransitionResult::new(GameState::Idle)
                .with_effect(Effect::Ui(UiCommand::CloseAllModals))
                .with_effect(Effect::Ui(UiCommand::ShowLearned {
                    name,
                    questions_used: session.question_count,
                })))
        }

        (GameState::Learning { session }, Event::SkipLearning) => {
            Ok(TransitionResult::new(GameState::Idle)
                .with_effect(Effect::Ui(UiCommand::CloseAllModals))
                .with_effect(Effect::show_result(false, session.question_count)))
        }

        (GameState::Learning { .. }, Event::QuestionsListed { mut questions }) => {
            questions.truncate(LEARNING_FORM_SIZE);
            Ok(TransitionResult::new(state.clone())
                .with_effect(Effect::Ui(UiCommand::ShowLearningForm { questions })))
        }

        // Form arrived after the player moved on
        (_, Event::QuestionsListed { .. }) => Ok(TransitionResult::new(state.clone())),

        // ============================================================
        // Background replies
        // ============================================================
        (_, Event::StatsLoaded { stats }) => Ok(TransitionResult::new(state.clone())
            .with_effect(Effect::Ui(UiCommand::UpdateStatsPreview((&stats).into())))),

        (_, Event::OracleFailed { call, .. }) if !call.is_blocking() => {
            Ok(TransitionResult::new(state.clone()))
        }

        (_, Event::OracleFailed { error, .. }) => {
            Ok(TransitionResult::new(state.clone())
                .with_effect(Effect::show_error(error.user_message())))
        }

        // ============================================================
        // Invalid Transitions
        // ============================================================
        (state, event) => Err(TransitionError::InvalidTransition(format!(
            "No transition from {} with event {}",
            state.name(),
            event.name()
        ))),
    }
}

/// Effects for entering the learning step: clear any modal, fetch the form
fn enter_learning() -> [Effect; 2] {
    [
        Effect::Ui(UiCommand::CloseAllModals),
        Effect::Call(OracleCall::ListQuestions),
    ]
}
