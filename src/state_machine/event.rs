//! Events that drive the game state machine

use super::effect::CallKind;
use crate::oracle::{
    Answer, AnswerReply, ConfirmReply, LearningQuestion, NewCharacter, OracleError, StartReply,
    Stats,
};

/// Player intents originated by the UI surface
#[derive(Debug, Clone, PartialEq)]
pub enum Intent {
    Start,
    Answer(Answer),
    Confirm(bool),
    SubmitCharacter(NewCharacter),
    SkipLearning,
    Reset,
}

impl Intent {
    pub fn name(&self) -> &'static str {
        match self {
            Intent::Start => "start",
            Intent::Answer(_) => "answer",
            Intent::Confirm(_) => "confirm",
            Intent::SubmitCharacter(_) => "submit_character",
            Intent::SkipLearning => "skip_learning",
            Intent::Reset => "reset",
        }
    }
}

/// Events that trigger state transitions
#[derive(Debug, Clone)]
pub enum Event {
    // Player events
    Start,
    Answer { answer: Answer },
    Confirm { accepted: bool },
    SubmitCharacter { character: NewCharacter },
    SkipLearning,
    Reset,

    // Oracle events
    GameStarted { reply: StartReply },
    Answered { reply: AnswerReply },
    GuessConfirmed { accepted: bool, reply: ConfirmReply },
    CharacterAdded { name: String },
    QuestionsListed { questions: Vec<LearningQuestion> },
    StatsLoaded { stats: Stats },
    OracleFailed { call: CallKind, error: OracleError },
}

impl Event {
    pub fn name(&self) -> &'static str {
        match self {
            Event::Start => "start",
            Event::Answer { .. } => "answer",
            Event::Confirm { .. } => "confirm",
            Event::SubmitCharacter { .. } => "submit_character",
            Event::SkipLearning => "skip_learning",
            Event::Reset => "reset",
            Event::GameStarted { .. } => "game_started",
            Event::Answered { .. } => "answered",
            Event::GuessConfirmed { .. } => "guess_confirmed",
            Event::CharacterAdded { .. } => "character_added",
            Event::QuestionsListed { .. } => "questions_listed",
            Event::StatsLoaded { .. } => "stats_loaded",
            Event::OracleFailed { .. } => "oracle_failed",
        }
    }
}

impl From<Intent> for Event {
    fn from(intent: Intent) -> Self {
        match intent {
            Intent::Start => Event::Start,
            Intent::Answer(answer) => Event::Answer { answer },
            Intent::Confirm(accepted) => Event::Confirm { accepted },
            Intent::SubmitCharacter(character) => Event::SubmitCharacter { character },
            Intent::SkipLearning => Event::SkipLearning,
            Intent::Reset => Event::Reset,
        }
    }
}
