//! Oracle error types

use thiserror::Error;

/// Oracle failure with classification
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct OracleError {
    pub kind: OracleErrorKind,
    pub message: String,
}

impl OracleError {
    pub fn new(kind: OracleErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// The oracle answered with a structured error message
    pub fn rejected(message: impl Into<String>) -> Self {
        Self::new(OracleErrorKind::Rejected, message)
    }

    /// The exchange itself failed: unreachable, timed out, or unreadable
    pub fn transport(message: impl Into<String>) -> Self {
        Self::new(OracleErrorKind::Transport, message)
    }

    /// Text suitable for showing to the player
    pub fn user_message(&self) -> String {
        match self.kind {
            OracleErrorKind::Rejected => format!("Error: {}", self.message),
            OracleErrorKind::Transport => {
                "Could not reach the game server, please try again".to_string()
            }
        }
    }
}

/// Distinguishes "the oracle said no" from "the oracle was unreachable"
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OracleErrorKind {
    Rejected,
    Transport,
}
