use std::sync::Arc;

use crate::auth::TokenVerifier;
use crate::config::Config;
use crate::llm_client::TextGenerator;
use crate::store::DocumentStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Text generation backend. Default: `LlmClient`.
    pub llm: Arc<dyn TextGenerator>,
    /// ID-token verifier. `DisabledVerifier` when no Firebase project is configured.
    pub token_verifier: Arc<dyn TokenVerifier>,
    pub store: Arc<dyn DocumentStore>,
}
