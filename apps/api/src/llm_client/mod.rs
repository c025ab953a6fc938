//! LLM Client — the single point of entry for all text-generation calls.
//!
//! ARCHITECTURAL RULE: No other module may call the model provider directly.
//! Handlers depend on the `TextGenerator` trait; `LlmClient` is the HTTP-backed
//! implementation wired up in `main`.
//!
//! Every call is attempted exactly once. Failures surface to the caller.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

pub mod prompts;

/// Responses-style endpoint used when `LLM_API_URL` is not set.
pub const DEFAULT_API_URL: &str = "https://api.openai.com/v1/responses";
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
const MAX_OUTPUT_TOKENS: u32 = 2048;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

// ────────────────────────────────────────────────────────────────────────────
// Reply shapes
// ────────────────────────────────────────────────────────────────────────────

/// The provider reply, resolved once at the adapter boundary.
///
/// Providers and gateways disagree on where the generated text lives, so the
/// raw JSON is sorted into one of the known shapes here and handlers only
/// ever ask for `text()`.
#[derive(Debug, Clone, PartialEq)]
pub enum ModelReply {
    /// `{"text": "..."}`
    Text(String),
    /// `{"output": [{"content": [{"text": "..."}]}]}`
    Output(String),
    /// Anything else, serialized wholesale.
    Unrecognized(String),
}

impl ModelReply {
    pub fn from_value(value: Value) -> Self {
        if let Some(text) = value.get("text").and_then(Value::as_str) {
            return ModelReply::Text(text.to_string());
        }

        if let Some(text) = value
            .pointer("/output/0/content/0/text")
            .and_then(Value::as_str)
        {
            return ModelReply::Output(text.to_string());
        }

        ModelReply::Unrecognized(value.to_string())
    }

    pub fn text(&self) -> &str {
        match self {
            ModelReply::Text(text) | ModelReply::Output(text) | ModelReply::Unrecognized(text) => {
                text
            }
        }
    }

    pub fn shape(&self) -> &'static str {
        match self {
            ModelReply::Text(_) => "text",
            ModelReply::Output(_) => "output",
            ModelReply::Unrecognized(_) => "unrecognized",
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Trait definition
// ────────────────────────────────────────────────────────────────────────────

/// A text-generation backend. Carried in `AppState` as `Arc<dyn TextGenerator>`.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<ModelReply, LlmError>;
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    input: &'a str,
    max_output_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct ProviderError {
    error: ProviderErrorBody,
}

#[derive(Debug, Deserialize)]
struct ProviderErrorBody {
    message: String,
}

/// HTTP client for a Responses-style text generation API.
#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    api_url: String,
    api_key: String,
    model: String,
}

impl LlmClient {
    /// No request timeout is set; a slow provider holds the request open.
    pub fn new(api_url: String, api_key: String, model: String) -> Self {
        Self {
            client: Client::new(),
            api_url,
            api_key,
            model,
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl TextGenerator for LlmClient {
    async fn generate(&self, prompt: &str) -> Result<ModelReply, LlmError> {
        let request_body = GenerateRequest {
            model: &self.model,
            input: prompt,
            max_output_tokens: MAX_OUTPUT_TOKENS,
        };

        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ProviderError>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(LlmError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body = response.text().await?;
        let value: Value = serde_json::from_str(&body)?;
        let reply = ModelReply::from_value(value);

        debug!(
            "LLM call succeeded: model={}, shape={}, chars={}",
            self.model,
            reply.shape(),
            reply.text().len()
        );

        Ok(reply)
    }
}

/// Strips ```json ... ``` or ``` ... ``` code fences from LLM output.
pub fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    if let Some(stripped) = text.strip_prefix("```json") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else if let Some(stripped) = text.strip_prefix("```") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else {
        text
    }
}
