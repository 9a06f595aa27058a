//! Game session state types

use crate::oracle::{Character, Question, SessionId};

/// One play-through, identified by the oracle's session token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub id: SessionId,
    /// Question currently on screen (the last one asked once play is over)
    pub question: Question,
    /// Questions asked so far, including the one on screen
    pub question_count: u32,
}

impl Session {
    /// A fresh session showing its first question
    pub fn new(id: SessionId, question: Question) -> Self {
        Self {
            id,
            question,
            question_count: 1,
        }
    }

    /// Count once the question on screen is answered and the next one shown.
    ///
    /// `reported` is the oracle's tally of answered questions. It is used
    /// when present, but the count always moves forward by at least one.
    pub fn next_count(&self, reported: Option<u32>) -> u32 {
        let next = self.question_count + 1;
        reported.map_or(next, |answered| answered.saturating_add(1).max(next))
    }

    /// Questions answered when play ends on the question on screen
    pub fn answered_count(&self, reported: Option<u32>) -> u32 {
        reported.map_or(self.question_count, |answered| {
            answered.max(self.question_count)
        })
    }

    /// Session after an answer, showing `question` next
    pub fn ask(&self, question: Question, reported: Option<u32>) -> Self {
        Self {
            id: self.id.clone(),
            question,
            question_count: self.next_count(reported),
        }
    }

    /// Session after the final answer, when no further question follows
    pub fn finish(&self, reported: Option<u32>) -> Self {
        Self {
            question_count: self.answered_count(reported),
            ..self.clone()
        }
    }
}

/// Game state
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum GameState {
    /// No session; landing view
    #[default]
    Idle,

    /// Waiting for the player to answer `session.question`
    Playing { session: Session },

    /// The oracle proposed `candidate`; waiting for the player's verdict
    Guessing {
        session: Session,
        candidate: Character,
    },

    /// The oracle failed; waiting for the player to teach it a character
    Learning { session: Session },
}

impl GameState {
    pub fn name(&self) -> &'static str {
        match self {
            GameState::Idle => "idle",
            GameState::Playing { .. } => "playing",
            GameState::Guessing { .. } => "guessing",
            GameState::Learning { .. } => "learning",
        }
    }

    pub fn session(&self) -> Option<&Session> {
        match self {
            GameState::Idle => None,
            GameState::Playing { session }
            | GameState::Guessing { session, .. }
            | GameState::Learning { session } => Some(session),
        }
    }

    /// Questions asked in the live session, 0 when idle
    #[allow(dead_code)] // API completeness
    pub fn question_count(&self) -> u32 {
        self.session().map_or(0, |s| s.question_count)
    }

    #[allow(dead_code)] // API completeness
    pub fn candidate(&self) -> Option<&Character> {
        match self {
            GameState::Guessing { candidate, .. } => Some(candidate),
            _ => None,
        }
    }
}
