//! Interview generation — orchestrates the question pipeline.
//!
//! Flow: build prompt → model call → normalize reply text → parse questions →
//!       assemble record → add to the `interviews` collection.
//!
//! Each external call is attempted once. An empty question list aborts the
//! pipeline before anything is written.

use anyhow::Context;
use tracing::{info, warn};

use crate::errors::AppError;
use crate::interview::covers::random_interview_cover;
use crate::interview::parser::parse_questions;
use crate::interview::prompts::build_questions_prompt;
use crate::interview::request::InterviewRequest;
use crate::llm_client::TextGenerator;
use crate::models::interview::{iso_timestamp_now, InterviewRecord, INTERVIEWS_COLLECTION};
use crate::store::DocumentStore;

/// A persisted interview and the id the store assigned it.
#[derive(Debug, Clone)]
pub struct GeneratedInterview {
    pub document_id: String,
    pub record: InterviewRecord,
}

/// Runs the generation pipeline for one request.
///
/// `user_id` is already resolved: the verified token subject when there is
/// one, otherwise whatever the body supplied.
pub async fn generate_interview(
    llm: &dyn TextGenerator,
    store: &dyn DocumentStore,
    request: InterviewRequest,
    user_id: Option<String>,
) -> Result<GeneratedInterview, AppError> {
    let prompt = build_questions_prompt(&request);

    info!(
        "Generating interview questions: role={:?}, level={:?}, amount={:?}",
        request.role, request.level, request.amount
    );
    let reply = llm.generate(&prompt).await?;

    let raw = reply.text();
    let parsed = parse_questions(raw);

    if parsed.is_empty() {
        warn!(
            "LLM reply ({} shape) contained no usable questions: {raw:?}",
            reply.shape()
        );
        return Err(AppError::NoQuestions);
    }

    info!(
        "Parsed {} questions via {:?} path",
        parsed.questions.len(),
        parsed.path
    );

    let record = InterviewRecord {
        role: request.role,
        interview_type: request.interview_type,
        level: request.level,
        techstack: request.techstack,
        questions: parsed.questions,
        user_id,
        finalized: true,
        cover_image: random_interview_cover(),
        created_at: iso_timestamp_now(),
    };

    let document = serde_json::to_value(&record).context("Failed to serialize interview record")?;
    let document_id = store.add(INTERVIEWS_COLLECTION, document).await?;

    Ok(GeneratedInterview {
        document_id,
        record,
    })
}
