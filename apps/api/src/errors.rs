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
/// Every variant renders as `{"success": false, "error": "..."}`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Unauthorized VAPI request")]
    Unauthorized,

    #[error("LLM did not return questions")]
    NoQuestions,

    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),

    #[error("{0:#}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::NoQuestions => StatusCode::BAD_GATEWAY,
            AppError::Llm(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match &self {
            AppError::Unauthorized => tracing::warn!("Rejected request with missing or bad VAPI secret"),
            AppError::NoQuestions => {}
            AppError::Llm(e) => tracing::error!("LLM error: {e}"),
            AppError::Internal(e) => tracing::error!("Internal error: {e:?}"),
        }

        let body = Json(json!({
            "success": false,
            "error": self.to_string(),
        }));

        (self.status(), body).into_response()
    }
}
