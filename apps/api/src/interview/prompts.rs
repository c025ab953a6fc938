// Prompt constants for interview question generation.
// Reuses cross-cutting fragments from llm_client::prompts.

use std::sync::OnceLock;

use regex::{Captures, Regex};

use crate::interview::request::InterviewRequest;
use crate::llm_client::prompts::{JSON_ARRAY_INSTRUCTION, VOICE_SAFE_INSTRUCTION};

/// Question generation prompt. Every `{placeholder}` is replaced before sending.
pub const QUESTIONS_PROMPT_TEMPLATE: &str = r#"Prepare questions for a job interview.
The job role is {role}.
The job experience level is {level}.
The tech stack used in the job is: {techstack}.
The focus between behavioural and technical questions should lean towards: {type}.
The amount of questions required is: {amount}.
{json_array_instruction}
{voice_safe_instruction}
Return the questions formatted like this:
["Question 1", "Question 2", "Question 3"]

Thank you! <3
"#;

fn placeholder_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\{(\w+)\}").expect("valid placeholder regex"))
}

/// Fills the template from the request in a single pass, so request values
/// are never scanned for placeholders. Missing values interpolate as empty text.
pub fn build_questions_prompt(request: &InterviewRequest) -> String {
    let techstack = request.techstack.join(", ");

    placeholder_pattern()
        .replace_all(QUESTIONS_PROMPT_TEMPLATE, |caps: &Captures| {
            let value = match &caps[1] {
                "role" => request.role.as_deref(),
                "level" => request.level.as_deref(),
                "techstack" => Some(techstack.as_str()),
                "type" => request.interview_type.as_deref(),
                "amount" => request.amount.as_deref(),
                "json_array_instruction" => Some(JSON_ARRAY_INSTRUCTION),
                "voice_safe_instruction" => Some(VOICE_SAFE_INSTRUCTION),
                _ => return caps[0].to_string(),
            };
            value.unwrap_or_default().to_string()
        })
        .into_owned()
}
