//! JSON-over-HTTP oracle client

use super::types::*;
use super::{OracleClient, OracleError};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Oracle reached over HTTP
pub struct HttpOracle {
    client: Client,
    base_url: String,
}

impl HttpOracle {
    pub fn new(base_url: &str) -> Result<Self, OracleError> {
        let client = Client::builder()
            .build()
            .map_err(|e| OracleError::transport(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, OracleError> {
        let response = self
            .client
            .get(self.url(path))
            .send()
            .await
            .map_err(classify_send_error)?;
        read_reply(response).await
    }

    async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, OracleError>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        let response = self
            .client
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .map_err(classify_send_error)?;
        read_reply(response).await
    }
}

fn classify_send_error(e: reqwest::Error) -> OracleError {
    if e.is_timeout() {
        OracleError::transport(format!("Request timeout: {e}"))
    } else if e.is_connect() {
        OracleError::transport(format!("Connection failed: {e}"))
    } else {
        OracleError::transport(format!("Request failed: {e}"))
    }
}

async fn read_reply<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, OracleError> {
    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| OracleError::transport(format!("Failed to read response: {e}")))?;
    decode_reply(status, &body)
}

/// An `error` field wins over the status code; the oracle reports most
/// failures that way, sometimes with a 200.
fn decode_reply<T: DeserializeOwned>(status: StatusCode, body: &str) -> Result<T, OracleError> {
    let value: Value = serde_json::from_str(body).map_err(|e| {
        OracleError::transport(format!("Malformed response (HTTP {status}): {e}"))
    })?;

    if let Some(message) = value.get("error").and_then(Value::as_str) {
        return Err(OracleError::rejected(message));
    }

    if !status.is_success() {
        return Err(OracleError::transport(format!("HTTP {status}: {body}")));
    }

    serde_json::from_value(value)
        .map_err(|e| OracleError::transport(format!("Unexpected response shape: {e}")))
}

// Request bodies

#[derive(Debug, Serialize)]
struct AnswerRequest<'a> {
    session_id: &'a SessionId,
    question_id: QuestionId,
    answer: Answer,
}

#[derive(Debug, Serialize)]
struct ConfirmRequest<'a> {
    session_id: &'a SessionId,
    character_id: CharacterId,
    correct: bool,
}

#[derive(Debug, Serialize)]
struct EmptyRequest {}

#[derive(Debug, Deserialize)]
struct AddCharacterReply {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct QuestionsReply {
    questions: Vec<LearningQuestion>,
}

#[async_trait]
impl OracleClient for HttpOracle {
    async fn start_game(&self) -> Result<StartReply, OracleError> {
        self.post("/api/game/start", &EmptyRequest {}).await
    }

    async fn answer(
        &self,
        session_id: &SessionId,
        question_id: QuestionId,
        answer: Answer,
    ) -> Result<AnswerReply, OracleError> {
        let request = AnswerRequest {
            session_id,
            question_id,
            answer,
        };
        self.post("/api/game/answer", &request).await
    }

    async fn confirm_guess(
        &self,
        session_id: &SessionId,
        character_id: CharacterId,
        correct: bool,
    ) -> Result<ConfirmReply, OracleError> {
        let request = ConfirmRequest {
            session_id,
            character_id,
            correct,
        };
        self.post("/api/game/confirm", &request).await
    }

    async fn add_character(&self, character: &NewCharacter) -> Result<(), OracleError> {
        let reply: AddCharacterReply = self.post("/api/character/add", character).await?;
        if reply.success {
            Ok(())
        } else {
            Err(OracleError::rejected(reply.message.unwrap_or_else(|| {
                "The character was not added".to_string()
            })))
        }
    }

    async fn list_questions(&self) -> Result<Vec<LearningQuestion>, OracleError> {
        let reply: QuestionsReply = self.get("/api/questions").await?;
        Ok(reply.questions)
    }

    async fn stats(&self) -> Result<Stats, OracleError> {
        self.get("/api/stats").await
    }
}
