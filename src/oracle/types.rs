//! Wire types exchanged with the oracle

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

/// Oracle-assigned question identifier
pub type QuestionId = i64;

/// Oracle-assigned character identifier
pub type CharacterId = i64;

/// Opaque session token issued by the oracle on game start
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(String);

impl SessionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ============================================================================
// Degree of agreement
// ============================================================================

/// Five-point answer scale, sent to the oracle as its integer code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "i8", try_from = "i8")]
pub enum Answer {
    StrongNo,
    WeakNo,
    Unknown,
    WeakYes,
    StrongYes,
}

/// Integer outside the -2..=2 answer scale
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("answer code {0} is outside -2..=2")]
pub struct InvalidAnswerCode(pub i8);

impl Answer {
    /// All degrees, strongest "no" first
    pub const ALL: [Answer; 5] = [
        Answer::StrongNo,
        Answer::WeakNo,
        Answer::Unknown,
        Answer::WeakYes,
        Answer::StrongYes,
    ];

    pub fn code(self) -> i8 {
        match self {
            Answer::StrongNo => -2,
            Answer::WeakNo => -1,
            Answer::Unknown => 0,
            Answer::WeakYes => 1,
            Answer::StrongYes => 2,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Answer::StrongNo => "no",
            Answer::WeakNo => "probably not",
            Answer::Unknown => "don't know",
            Answer::WeakYes => "probably",
            Answer::StrongYes => "yes",
        }
    }
}

impl From<Answer> for i8 {
    fn from(answer: Answer) -> Self {
        answer.code()
    }
}

impl TryFrom<i8> for Answer {
    type Error = InvalidAnswerCode;

    fn try_from(code: i8) -> Result<Self, Self::Error> {
        match code {
            -2 => Ok(Answer::StrongNo),
            -1 => Ok(Answer::WeakNo),
            0 => Ok(Answer::Unknown),
            1 => Ok(Answer::WeakYes),
            2 => Ok(Answer::StrongYes),
            other => Err(InvalidAnswerCode(other)),
        }
    }
}

// ============================================================================
// Knowledge base entities
// ============================================================================

/// A question as asked during play
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: QuestionId,
    pub text: String,
}

/// A character the oracle can guess
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Character {
    pub id: CharacterId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
}

/// Question offered on the learning form, keyed by the attribute it asks about
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LearningQuestion {
    pub text: String,
    pub attribute_key: String,
}

/// Character taught by the user after the oracle failed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCharacter {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub attributes: BTreeMap<String, Answer>,
}

impl NewCharacter {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            attributes: BTreeMap::new(),
        }
    }

    pub fn with_attribute(mut self, key: impl Into<String>, answer: Answer) -> Self {
        self.attributes.insert(key.into(), answer);
        self
    }
}

// ============================================================================
// Replies
// ============================================================================

/// Reply to start-game
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct StartReply {
    pub session_id: SessionId,
    pub question: Question,
    #[serde(default)]
    pub progress: f64,
    #[serde(default)]
    pub candidates_remaining: Option<u32>,
}

/// Reply to answer-question, discriminated by its `type` tag
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AnswerReply {
    Question {
        question: Question,
        #[serde(default)]
        question_count: Option<u32>,
        #[serde(default)]
        progress: f64,
        #[serde(default)]
        candidates_remaining: Option<u32>,
    },
    Guess {
        character: Character,
        #[serde(default)]
        question_count: Option<u32>,
    },
    GiveUp {
        #[serde(default)]
        message: Option<String>,
    },
}

/// Reply to confirm-guess
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ConfirmReply {
    #[serde(default)]
    pub questions_used: Option<u32>,
}

/// Summary statistics shown on the landing view
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Stats {
    #[serde(default)]
    pub total_games: u64,
    #[serde(default)]
    pub successful_games: u64,
    #[serde(default)]
    pub success_rate: f64,
    #[serde(default)]
    pub database: DatabaseStats,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct DatabaseStats {
    #[serde(default)]
    pub total_characters: u64,
    #[serde(default)]
    pub total_questions: u64,
}
