use anyhow::{Context, Result};

use crate::llm_client::{DEFAULT_API_URL, DEFAULT_MODEL};

/// Application configuration loaded from environment variables.
/// Loaded once at startup; handlers only ever see this immutable copy.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub llm_api_url: String,
    pub llm_api_key: String,
    pub llm_model: String,
    /// Shared secret the voice agent must send in `x-vapi-secret`. Unset disables the check.
    pub vapi_secret: Option<String>,
    /// Firebase project whose ID tokens are accepted. Unset disables verification.
    pub firebase_project_id: Option<String>,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            llm_api_url: optional_env("LLM_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            llm_api_key: require_env("LLM_API_KEY")?,
            llm_model: optional_env("LLM_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            vapi_secret: optional_env("VAPI_SECRET"),
            firebase_project_id: optional_env("FIREBASE_PROJECT_ID"),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn optional_env(key: &str) -> Option<String> {
    non_blank(std::env::var(key).ok())
}

/// Blank values count as unset, so `VAPI_SECRET=` in a .env file disables the check.
fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
