//! Axum route handlers for the voice-assistant interview endpoint.

use axum::{extract::State, http::HeaderMap, Json};
use bytes::Bytes;
use serde::Serialize;
use tracing::info;

use crate::auth::{check_shared_secret, resolve_identity};
use crate::errors::AppError;
use crate::interview::generator::generate_interview;
use crate::interview::request::InterviewRequest;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct GenerateResponse {
    pub success: bool,
}

#[derive(Debug, Serialize)]
pub struct AcknowledgeResponse {
    pub success: bool,
    pub data: &'static str,
}

/// POST /api/vapi-assistant
///
/// Generates interview questions for the described job and stores the interview.
/// The body is read raw so a missing or malformed payload degrades to an empty
/// request instead of a 4xx.
pub async fn handle_generate(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<GenerateResponse>, AppError> {
    check_shared_secret(state.config.vapi_secret.as_deref(), &headers)?;

    let request = InterviewRequest::from_body(&body);
    let identity = resolve_identity(state.token_verifier.as_ref(), &headers).await;
    let user_id = identity.user_id(request.userid.clone());

    let generated =
        generate_interview(state.llm.as_ref(), state.store.as_ref(), request, user_id).await?;

    info!(
        "Stored interview {} with {} questions for user {:?}",
        generated.document_id,
        generated.record.questions.len(),
        generated.record.user_id
    );

    Ok(Json(GenerateResponse { success: true }))
}

/// GET /api/vapi-assistant
pub async fn handle_acknowledge() -> Json<AcknowledgeResponse> {
    Json(AcknowledgeResponse {
        success: true,
        data: "Thank you!",
    })
}
