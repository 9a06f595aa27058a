//! Effects produced by state transitions

use super::state::Session;
use crate::oracle::{
    Answer, Character, CharacterId, LearningQuestion, NewCharacter, QuestionId, SessionId, Stats,
};

/// Questions shown on the learning form
pub const LEARNING_FORM_SIZE: usize = 10;

/// Effects to be executed after a state transition
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Update the UI surface
    Ui(UiCommand),

    /// Issue an oracle request; its reply comes back as an event
    Call(OracleCall),

    /// Start a confetti batch
    LaunchConfetti,
}

impl Effect {
    pub fn show_error(message: impl Into<String>) -> Self {
        Effect::Ui(UiCommand::ShowError {
            message: message.into(),
        })
    }

    pub fn display_question(
        session: &Session,
        progress: f64,
        candidates_remaining: Option<u32>,
    ) -> Self {
        Effect::Ui(UiCommand::DisplayQuestion {
            text: session.question.text.clone(),
            progress,
            questions_so_far: session.question_count,
            candidates_remaining,
        })
    }

    pub fn show_result(success: bool, questions_used: u32) -> Self {
        Effect::Ui(UiCommand::ShowResult {
            success,
            questions_used,
        })
    }
}

/// Top-level views of the UI surface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Landing,
    Play,
}

/// Update commands understood by a UI surface
#[derive(Debug, Clone, PartialEq)]
pub enum UiCommand {
    SwitchView(View),
    DisplayQuestion {
        text: String,
        /// Percent, 0..=100
        progress: f64,
        questions_so_far: u32,
        candidates_remaining: Option<u32>,
    },
    ShowGuess {
        character: Character,
    },
    ShowResult {
        success: bool,
        questions_used: u32,
    },
    /// The oracle accepted a taught character
    ShowLearned {
        name: String,
        questions_used: u32,
    },
    ShowLearningForm {
        questions: Vec<LearningQuestion>,
    },
    CloseAllModals,
    UpdateStatsPreview(StatsPreview),
    ShowError {
        message: String,
    },
}

/// Totals shown on the landing view
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StatsPreview {
    pub total_characters: u64,
    pub total_games: u64,
    /// Percent of games the oracle won
    pub success_rate: f64,
}

impl From<&Stats> for StatsPreview {
    fn from(stats: &Stats) -> Self {
        Self {
            total_characters: stats.database.total_characters,
            total_games: stats.total_games,
            success_rate: stats.success_rate,
        }
    }
}

/// Oracle request issued by a transition
#[derive(Debug, Clone, PartialEq)]
pub enum OracleCall {
    StartGame,
    Answer {
        session_id: SessionId,
        question_id: QuestionId,
        answer: Answer,
    },
    ConfirmGuess {
        session_id: SessionId,
        character_id: CharacterId,
        correct: bool,
    },
    AddCharacter {
        character: NewCharacter,
    },
    ListQuestions,
    Stats,
}

impl OracleCall {
    pub fn kind(&self) -> CallKind {
        match self {
            OracleCall::StartGame => CallKind::StartGame,
            OracleCall::Answer { .. } => CallKind::Answer,
            OracleCall::ConfirmGuess { correct, .. } => CallKind::ConfirmGuess { correct: *correct },
            OracleCall::AddCharacter { .. } => CallKind::AddCharacter,
            OracleCall::ListQuestions => CallKind::ListQuestions,
            OracleCall::Stats => CallKind::Stats,
        }
    }
}

/// Which oracle operation a reply belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallKind {
    StartGame,
    Answer,
    ConfirmGuess { correct: bool },
    AddCharacter,
    ListQuestions,
    Stats,
}

impl CallKind {
    pub fn name(self) -> &'static str {
        match self {
            CallKind::StartGame => "start_game",
            CallKind::Answer => "answer",
            CallKind::ConfirmGuess { .. } => "confirm_guess",
            CallKind::AddCharacter => "add_character",
            CallKind::ListQuestions => "list_questions",
            CallKind::Stats => "stats",
        }
    }

    /// Blocking calls gate the next player intent; background ones never do,
    /// and their failures are only logged.
    pub fn is_blocking(self) -> bool {
        match self {
            CallKind::StartGame | CallKind::Answer | CallKind::AddCharacter => true,
            CallKind::ConfirmGuess { correct } => correct,
            CallKind::ListQuestions | CallKind::Stats => false,
        }
    }
}
