//! Question parser — turns the model's free-text reply into a list of questions.
//!
//! Two passes:
//! 1. Strict: the reply is JSON, either `["..."]` or `{"questions": ["..."]}`.
//!    Elements are trimmed and empties dropped. Duplicates are kept.
//! 2. Fallback (strict pass did not apply): heuristic splitting on newlines and
//!    quoted-string boundaries, numbering stripped, duplicates removed keeping
//!    the first occurrence.

use std::collections::HashSet;
use std::sync::OnceLock;

use regex::Regex;
use serde_json::Value;

use crate::llm_client::strip_json_fences;

/// Which pass produced the questions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParsePath {
    Strict,
    Fallback,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedQuestions {
    pub questions: Vec<String>,
    pub path: ParsePath,
}

impl ParsedQuestions {
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}

/// The `", "` between two quoted strings on one line.
fn quoted_separator() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r#""\s*,\s*""#).expect("valid separator regex"))
}

/// `1. `, `2) `, `- `, `• ` at the start of a piece.
fn numbering_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^(?:\d+\s*[.)]|[-•])\s*").expect("valid numbering regex"))
}

pub fn parse_questions(raw: &str) -> ParsedQuestions {
    let text = strip_json_fences(raw);

    match parse_strict(text) {
        Some(questions) => ParsedQuestions {
            questions,
            path: ParsePath::Strict,
        },
        None => ParsedQuestions {
            questions: parse_fallback(text),
            path: ParsePath::Fallback,
        },
    }
}

/// `None` when the text is not JSON or not one of the accepted shapes.
fn parse_strict(text: &str) -> Option<Vec<String>> {
    let items = match serde_json::from_str::<Value>(text).ok()? {
        Value::Array(items) => items,
        Value::Object(mut fields) => match fields.remove("questions") {
            Some(Value::Array(items)) => items,
            _ => return None,
        },
        _ => return None,
    };

    Some(
        items
            .into_iter()
            .filter_map(|item| match item {
                Value::Null => None,
                Value::String(s) => Some(s.trim().to_string()),
                other => Some(other.to_string()),
            })
            .filter(|q| !q.is_empty())
            .collect(),
    )
}

fn parse_fallback(text: &str) -> Vec<String> {
    let body = text.trim().trim_start_matches('[').trim_end_matches(']');
    // Each quoted string keeps both of its quotes on its own line.
    let body = quoted_separator().replace_all(body, "\"\n\"");

    let mut seen = HashSet::new();
    let mut questions = Vec::new();

    for piece in body.lines() {
        let question = clean_piece(piece);
        if question.is_empty() {
            continue;
        }
        if seen.insert(question.clone()) {
            questions.push(question);
        }
    }

    questions
}

fn clean_piece(piece: &str) -> String {
    let piece = unquote(trim_punctuation(piece));
    let piece = numbering_pattern().replace(piece.trim(), "");
    let piece = unquote(trim_punctuation(&piece)).trim();

    // A stray quote left over from splitting is not a question.
    if piece.chars().all(|c| matches!(c, '"' | '\'')) {
        return String::new();
    }
    piece.to_string()
}

fn trim_punctuation(piece: &str) -> &str {
    piece.trim_matches(|c: char| c.is_whitespace() || matches!(c, ',' | '[' | ']'))
}

/// Drops one pair of quotes, only when the same quote opens and closes the piece.
fn unquote(piece: &str) -> &str {
    for quote in ['"', '\''] {
        if let Some(inner) = piece
            .strip_prefix(quote)
            .and_then(|rest| rest.strip_suffix(quote))
        {
            return inner;
        }
    }
    piece
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strict_array_keeps_duplicates() {
        let parsed = parse_questions(r#"["Q1","Q2","Q2","Q3"]"#);
        assert_eq!(parsed.path, ParsePath::Strict);
        assert_eq!(parsed.questions, vec!["Q1", "Q2", "Q2", "Q3"]);
    }

    #[test]
    fn test_strict_object_with_questions_field() {
        let parsed = parse_questions(r#"{"questions": ["  What is a trait?  ", "", "Explain lifetimes"]}"#);
        assert_eq!(parsed.path, ParsePath::Strict);
        assert_eq!(parsed.questions, vec!["What is a trait?", "Explain lifetimes"]);
    }

    #[test]
    fn test_strict_coerces_non_string_elements() {
        let parsed = parse_questions(r#"["Q1", 42, null, true]"#);
        assert_eq!(parsed.questions, vec!["Q1", "42", "true"]);
    }

    #[test]
    fn test_strict_accepts_fenced_json() {
        let parsed = parse_questions("```json\n[\"Q1\", \"Q2\"]\n```");
        assert_eq!(parsed.path, ParsePath::Strict);
        assert_eq!(parsed.questions, vec!["Q1", "Q2"]);
    }

    #[test]
    fn test_strict_empty_array_does_not_fall_back() {
        let parsed = parse_questions("[]");
        assert_eq!(parsed.path, ParsePath::Strict);
        assert!(parsed.is_empty());
    }

    #[test]
    fn test_numbered_lines_use_fallback() {
        let parsed = parse_questions("1. What is X\n2. What is Y\n");
        assert_eq!(parsed.path, ParsePath::Fallback);
        assert_eq!(parsed.questions, vec!["What is X", "What is Y"]);
    }

    #[test]
    fn test_fallback_paren_numbering_and_bullets() {
        let parsed = parse_questions("1) Tell me about yourself\n- Why this company?\r\n3 . Where do you see yourself");
        assert_eq!(
            parsed.questions,
            vec![
                "Tell me about yourself",
                "Why this company?",
                "Where do you see yourself"
            ]
        );
    }

    #[test]
    fn test_fallback_splits_quoted_list_and_dedups() {
        let parsed = parse_questions(r#"["What is Go?", "What is Rust?", "What is Go?""#);
        assert_eq!(parsed.path, ParsePath::Fallback);
        assert_eq!(parsed.questions, vec!["What is Go?", "What is Rust?"]);
    }

    #[test]
    fn test_fallback_handles_trailing_comma_array() {
        let parsed = parse_questions("[\n  \"First question\",\n  \"Second question\",\n]");
        assert_eq!(parsed.path, ParsePath::Fallback);
        assert_eq!(parsed.questions, vec!["First question", "Second question"]);
    }

    #[test]
    fn test_fallback_keeps_quoted_terms_inside_questions() {
        let parsed = parse_questions("Explain 'ownership'\nWhat is 'borrowing'");
        assert_eq!(parsed.path, ParsePath::Fallback);
        assert_eq!(
            parsed.questions,
            vec!["Explain 'ownership'", "What is 'borrowing'"]
        );
    }

    #[test]
    fn test_fallback_unquotes_only_matching_pairs() {
        let parsed = parse_questions("1. \"Why use 'Arc'?\"\n2. 'Define \"Send\"'\n3. Say \"hi\"");
        assert_eq!(
            parsed.questions,
            vec!["Why use 'Arc'?", "Define \"Send\"", "Say \"hi\""]
        );
    }

    #[test]
    fn test_fallback_quoted_lines_keep_their_own_quotes() {
        let parsed = parse_questions("\"Q1 about 'traits'\"\n\"Q2\"");
        assert_eq!(parsed.questions, vec!["Q1 about 'traits'", "Q2"]);
    }

    #[test]
    fn test_fallback_drops_stray_quote_pieces() {
        let parsed = parse_questions("\"\nWhat is X\n'");
        assert_eq!(parsed.questions, vec!["What is X"]);
    }

    /// Valid JSON of an unexpected shape is not a strict match, so it goes
    /// through the line heuristic as plain text. The braces survive.
    #[test]
    fn test_object_without_questions_field_is_split_as_text() {
        let parsed = parse_questions(r#"{"items": ["Q1","Q2"]}"#);
        assert_eq!(parsed.path, ParsePath::Fallback);
        assert_eq!(parsed.questions, vec![r#"{"items": ["Q1""#, r#""Q2"]}"#]);
    }

    #[test]
    fn test_blank_output_yields_nothing() {
        assert!(parse_questions("").is_empty());
        assert!(parse_questions("  \n\n ").is_empty());
        assert!(parse_questions("[\"\", \"  \"]").is_empty());
        assert!(parse_questions(r#"{"questions": []}"#).is_empty());
    }
}
