//! Remote oracle abstraction
//!
//! The oracle owns the knowledge base and all inference. The client side
//! only forwards requests and classifies failures.

mod error;
mod http;
mod types;

pub use error::{OracleError, OracleErrorKind};
pub use http::HttpOracle;
pub use types::*;

use async_trait::async_trait;
use std::time::Instant;

/// Request/response interface to the question-answering service
#[async_trait]
pub trait OracleClient: Send + Sync {
    /// Open a session and fetch its first question
    async fn start_game(&self) -> Result<StartReply, OracleError>;

    /// Submit one answer and learn what happens next
    async fn answer(
        &self,
        session_id: &SessionId,
        question_id: QuestionId,
        answer: Answer,
    ) -> Result<AnswerReply, OracleError>;

    /// Record whether the proposed character was right
    async fn confirm_guess(
        &self,
        session_id: &SessionId,
        character_id: CharacterId,
        correct: bool,
    ) -> Result<ConfirmReply, OracleError>;

    /// Teach the oracle a new character
    async fn add_character(&self, character: &NewCharacter) -> Result<(), OracleError>;

    /// Questions for the learning form, most useful first
    async fn list_questions(&self) -> Result<Vec<LearningQuestion>, OracleError>;

    /// Summary statistics
    async fn stats(&self) -> Result<Stats, OracleError>;
}

#[async_trait]
impl<O: OracleClient + ?Sized> OracleClient for std::sync::Arc<O> {
    async fn start_game(&self) -> Result<StartReply, OracleError> {
        (**self).start_game().await
    }

    async fn answer(
        &self,
        session_id: &SessionId,
        question_id: QuestionId,
        answer: Answer,
    ) -> Result<AnswerReply, OracleError> {
        (**self).answer(session_id, question_id, answer).await
    }

    async fn confirm_guess(
        &self,
        session_id: &SessionId,
        character_id: CharacterId,
        correct: bool,
    ) -> Result<ConfirmReply, OracleError> {
        (**self).confirm_guess(session_id, character_id, correct).await
    }

    async fn add_character(&self, character: &NewCharacter) -> Result<(), OracleError> {
        (**self).add_character(character).await
    }

    async fn list_questions(&self) -> Result<Vec<LearningQuestion>, OracleError> {
        (**self).list_questions().await
    }

    async fn stats(&self) -> Result<Stats, OracleError> {
        (**self).stats().await
    }
}

/// Logging wrapper for oracle clients
pub struct LoggingOracle<O> {
    inner: O,
}

impl<O: OracleClient> LoggingOracle<O> {
    pub fn new(inner: O) -> Self {
        Self { inner }
    }

    fn record<T>(operation: &'static str, started: Instant, result: &Result<T, OracleError>) {
        let duration_ms = started.elapsed().as_millis();
        match result {
            Ok(_) => {
                tracing::info!(operation, duration_ms = %duration_ms, "Oracle call completed");
            }
            Err(e) if e.kind == OracleErrorKind::Rejected => {
                tracing::warn!(
                    operation,
                    duration_ms = %duration_ms,
                    error = %e.message,
                    "Oracle rejected request"
                );
            }
            Err(e) => {
                tracing::error!(
                    operation,
                    duration_ms = %duration_ms,
                    error = %e.message,
                    "Oracle call failed"
                );
            }
        }
    }
}

#[async_trait]
impl<O: OracleClient> OracleClient for LoggingOracle<O> {
    async fn start_game(&self) -> Result<StartReply, OracleError> {
        let started = Instant::now();
        let result = self.inner.start_game().await;
        Self::record("start_game", started, &result);
        if let Ok(reply) = &result {
            tracing::debug!(session_id = %reply.session_id, "Session opened");
        }
        result
    }

    async fn answer(
        &self,
        session_id: &SessionId,
        question_id: QuestionId,
        answer: Answer,
    ) -> Result<AnswerReply, OracleError> {
        tracing::debug!(
            session_id = session_id.as_str(),
            question_id,
            answer = answer.label(),
            "Submitting answer"
        );
        let started = Instant::now();
        let result = self.inner.answer(session_id, question_id, answer).await;
        Self::record("answer", started, &result);
        result
    }

    async fn confirm_guess(
        &self,
        session_id: &SessionId,
        character_id: CharacterId,
        correct: bool,
    ) -> Result<ConfirmReply, OracleError> {
        let started = Instant::now();
        let result = self
            .inner
            .confirm_guess(session_id, character_id, correct)
            .await;
        Self::record("confirm_guess", started, &result);
        result
    }

    async fn add_character(&self, character: &NewCharacter) -> Result<(), OracleError> {
        let started = Instant::now();
        let result = self.inner.add_character(character).await;
        Self::record("add_character", started, &result);
        result
    }

    async fn list_questions(&self) -> Result<Vec<LearningQuestion>, OracleError> {
        let started = Instant::now();
        let result = self.inner.list_questions().await;
        Self::record("list_questions", started, &result);
        result
    }

    async fn stats(&self) -> Result<Stats, OracleError> {
        let started = Instant::now();
        let result = self.inner.stats().await;
        Self::record("stats", started, &result);
        result
    }
}
