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
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error(
        "Total tokens ({total}) exceed API limit ({limit}). \
        Original resume: {original_chars} chars, truncated: {truncated_chars} chars. \
        Please shorten the resume to under 300,000 characters or use a text-based format."
    )]
    TokenBudgetExceeded {
        total: usize,
        limit: usize,
        original_chars: usize,
        truncated_chars: usize,
    },

    #[error("Completion API error: {status} - {body}")]
    Transport { status: u16, body: String },

    #[error("Malformed completion response: {0}")]
    MalformedResponse(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Payload too large: {0}")]
    PayloadTooLarge(String),

    #[error("LLM error: {0}")]
    Llm(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<LlmError> for AppError {
    fn from(err: LlmError) -> Self {
        match err {
            LlmError::Api { status, message } => AppError::Transport {
                status,
                body: message,
            },
            LlmError::Http(e) => AppError::Llm(e.to_string()),
            LlmError::Parse(e) => AppError::MalformedResponse(e.to_string()),
            LlmError::EmptyContent => {
                AppError::MalformedResponse("completion returned no content".to_string())
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Configuration(msg) => {
                tracing::error!("Configuration error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "CONFIGURATION_ERROR",
                    "The service is not configured to reach the completion API".to_string(),
                )
            }
            AppError::TokenBudgetExceeded { .. } => (
                StatusCode::PAYLOAD_TOO_LARGE,
                "TOKEN_BUDGET_EXCEEDED",
                self.to_string(),
            ),
            AppError::Transport { status, body } => {
                tracing::error!("Completion API returned {status}: {body}");
                (
                    StatusCode::BAD_GATEWAY,
                    "UPSTREAM_ERROR",
                    format!("The completion API rejected the request (status {status})"),
                )
            }
            AppError::MalformedResponse(msg) => {
                tracing::error!("Malformed completion response: {msg}");
                (
                    StatusCode::BAD_GATEWAY,
                    "MALFORMED_RESPONSE",
                    "The completion API returned an unusable response".to_string(),
                )
            }
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::PayloadTooLarge(msg) => {
                (StatusCode::PAYLOAD_TOO_LARGE, "PAYLOAD_TOO_LARGE", msg.clone())
            }
            AppError::Llm(msg) => {
                tracing::error!("LLM error: {msg}");
                (
                    StatusCode::BAD_GATEWAY,
                    "LLM_ERROR",
                    "An AI processing error occurred".to_string(),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
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
