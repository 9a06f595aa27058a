//! Mock implementations for testing
//!
//! These mocks enable runtime testing without real I/O.

use super::traits::UiSurface;
use crate::oracle::{
    Answer, AnswerReply, CharacterId, ConfirmReply, LearningQuestion, NewCharacter, OracleClient,
    OracleError, QuestionId, SessionId, StartReply, Stats,
};
use crate::state_machine::{OracleCall, UiCommand};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

type Queue<T> = Mutex<VecDeque<Result<T, OracleError>>>;

// ============================================================================
// Mock Oracle
// ============================================================================

/// Mock oracle that returns queued replies per operation
#[derive(Default)]
pub struct MockOracle {
    start: Queue<StartReply>,
    answers: Queue<AnswerReply>,
    confirms: Queue<ConfirmReply>,
    adds: Queue<()>,
    questions: Queue<Vec<LearningQuestion>>,
    stats: Queue<Stats>,
    /// Record of all calls made, in order
    calls: Mutex<Vec<OracleCall>>,
}

impl MockOracle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn queue_start(&self, reply: Result<StartReply, OracleError>) {
        self.start.lock().unwrap().push_back(reply);
    }

    pub fn queue_answer(&self, reply: Result<AnswerReply, OracleError>) {
        self.answers.lock().unwrap().push_back(reply);
    }

    pub fn queue_confirm(&self, reply: Result<ConfirmReply, OracleError>) {
        self.confirms.lock().unwrap().push_back(reply);
    }

    pub fn queue_add(&self, reply: Result<(), OracleError>) {
        self.adds.lock().unwrap().push_back(reply);
    }

    pub fn queue_questions(&self, reply: Result<Vec<LearningQuestion>, OracleError>) {
        self.questions.lock().unwrap().push_back(reply);
    }

    pub fn queue_stats(&self, reply: Result<Stats, OracleError>) {
        self.stats.lock().unwrap().push_back(reply);
    }

    /// Get recorded calls
    pub fn recorded_calls(&self) -> Vec<OracleCall> {
        self.calls.lock().unwrap().clone()
    }

    fn next<T>(&self, queue: &Queue<T>, call: OracleCall) -> Result<T, OracleError> {
        self.calls.lock().unwrap().push(call);
        queue
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(OracleError::transport("No mock response queued")))
    }
}

#[async_trait]
impl OracleClient for MockOracle {
    async fn start_game(&self) -> Result<StartReply, OracleError> {
        self.next(&self.start, OracleCall::StartGame)
    }

    async fn answer(
        &self,
        session_id: &SessionId,
        question_id: QuestionId,
        answer: Answer,
    ) -> Result<AnswerReply, OracleError> {
        let call = OracleCall::Answer {
            session_id: session_id.clone(),
            question_id,
            answer,
        };
        self.next(&self.answers, call)
    }

    async fn confirm_guess(
        &self,
        session_id: &SessionId,
        character_id: CharacterId,
        correct: bool,
    ) -> Result<ConfirmReply, OracleError> {
        let call = OracleCall::ConfirmGuess {
            session_id: session_id.clone(),
            character_id,
            correct,
        };
        self.next(&self.confirms, call)
    }

    async fn add_character(&self, character: &NewCharacter) -> Result<(), OracleError> {
        let call = OracleCall::AddCharacter {
            character: character.clone(),
        };
        self.next(&self.adds, call)
    }

    async fn list_questions(&self) -> Result<Vec<LearningQuestion>, OracleError> {
        self.next(&self.questions, OracleCall::ListQuestions)
    }

    async fn stats(&self) -> Result<Stats, OracleError> {
        self.next(&self.stats, OracleCall::Stats)
    }
}

// ============================================================================
// Recording UI surface
// ============================================================================

/// UI surface that keeps every command it receives
#[derive(Debug, Default)]
pub struct RecordingUi {
    pub commands: Vec<UiCommand>,
}

impl RecordingUi {
    pub fn contains(&self, command: &UiCommand) -> bool {
        self.commands.contains(command)
    }

    pub fn errors(&self) -> Vec<String> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                UiCommand::ShowError { message } => Some(message.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn last_question(&self) -> Option<&str> {
        self.commands.iter().rev().find_map(|c| match c {
            UiCommand::DisplayQuestion { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    pub fn learning_form(&self) -> Option<&[LearningQuestion]> {
        self.commands.iter().rev().find_map(|c| match c {
            UiCommand::ShowLearningForm { questions } => Some(questions.as_slice()),
            _ => None,
        })
    }
}

impl UiSurface for RecordingUi {
    fn apply(&mut self, command: UiCommand) {
        self.commands.push(command);
    }
}

/// Recording surface that stays readable after a spawned runtime owns it
#[derive(Debug, Clone, Default)]
pub struct SharedUi(Arc<Mutex<RecordingUi>>);

impl SharedUi {
    pub fn any(&self, matches: impl Fn(&UiCommand) -> bool) -> bool {
        self.0.lock().unwrap().commands.iter().any(matches)
    }
}

impl UiSurface for SharedUi {
    fn apply(&mut self, command: UiCommand) {
        self.0.lock().unwrap().apply(command);
    }
}
