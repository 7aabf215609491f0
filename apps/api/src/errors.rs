use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::llm_client::LlmError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
///
/// `Validation`, `Parse` and `Service` are the user-facing failure kinds: their
/// messages are returned verbatim. None of them is retried.
#[derive(Debug, Error)]
pub enum AppError {
    /// Required user input missing or malformed, detected before any outbound call.
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    /// The model answered, but not with the JSON the operation required.
    #[error("Parse error: {0}")]
    Parse(String),

    /// Network, timeout or provider failure talking to the LLM or fetching a page.
    #[error("Service error: {0}")]
    Service(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<LlmError> for AppError {
    fn from(err: LlmError) -> Self {
        AppError::Service(format!("LLM request failed: {err}"))
    }
}

impl AppError {
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            AppError::Validation(_) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            AppError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            AppError::Parse(_) => (StatusCode::BAD_GATEWAY, "PARSE_ERROR"),
            AppError::Service(_) => (StatusCode::BAD_GATEWAY, "SERVICE_ERROR"),
            AppError::Database(_) => (StatusCode::INTERNAL_SERVER_ERROR, "DATABASE_ERROR"),
            AppError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();
        let message = match &self {
            AppError::Validation(msg) | AppError::NotFound(msg) => msg.clone(),
            AppError::Parse(msg) => {
                tracing::warn!("Model output rejected: {msg}");
                msg.clone()
            }
            AppError::Service(msg) => {
                tracing::error!("Upstream service error: {msg}");
                msg.clone()
            }
            AppError::Database(e) => {
                tracing::error!("Database error: {e}");
                "A database error occurred".to_string()
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                "An internal server error occurred".to_string()
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
