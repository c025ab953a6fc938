//! Lenient decoding of the question-generation request body.
//!
//! The caller is a voice agent whose tool payloads are loosely typed, so
//! nothing here fails: a missing or malformed body is an empty request, and
//! fields of the wrong JSON type count as missing.

use serde_json::{Map, Value};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct InterviewRequest {
    pub interview_type: Option<String>,
    pub role: Option<String>,
    pub level: Option<String>,
    pub techstack: Vec<String>,
    pub amount: Option<String>,
    pub userid: Option<String>,
}

impl InterviewRequest {
    pub fn from_body(body: &[u8]) -> Self {
        match serde_json::from_slice::<Value>(body) {
            Ok(Value::Object(fields)) => Self::from_fields(&fields),
            _ => Self::default(),
        }
    }

    fn from_fields(fields: &Map<String, Value>) -> Self {
        Self {
            interview_type: scalar_text(fields.get("type")),
            role: scalar_text(fields.get("role")),
            level: scalar_text(fields.get("level")),
            techstack: normalize_techstack(fields.get("techstack")),
            amount: scalar_text(fields.get("amount")),
            userid: scalar_text(fields.get("userid")),
        }
    }
}

/// Strings pass through; numbers and booleans become their JSON text.
fn scalar_text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// `"Go, Rust"` and `["Go", " Rust"]` both become `["Go", "Rust"]`.
pub fn normalize_techstack(value: Option<&Value>) -> Vec<String> {
    match value {
        Some(Value::String(s)) if s.trim().is_empty() => Vec::new(),
        Some(Value::String(s)) => s.split(',').map(|part| part.trim().to_string()).collect(),
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|item| scalar_text(Some(item)))
            .map(|item| item.trim().to_string())
            .collect(),
        _ => Vec::new(),
    }
}
