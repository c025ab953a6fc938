use chrono::{SecondsFormat, Utc};
use serde::Serialize;

/// Collection every generated interview is added to.
pub const INTERVIEWS_COLLECTION: &str = "interviews";

/// One generated interview, persisted as a single JSON document.
/// Written once and never updated by this service.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InterviewRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    /// Behavioural vs technical weighting, free text.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub interview_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,
    pub techstack: Vec<String>,
    pub questions: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    pub finalized: bool,
    pub cover_image: String,
    /// ISO-8601, UTC, millisecond precision.
    pub created_at: String,
}

/// Current time in the `2024-05-01T12:00:00.000Z` form.
pub fn iso_timestamp_now() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}
