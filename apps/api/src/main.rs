mod auth;
mod config;
mod db;
mod errors;
mod interview;
mod llm_client;
mod models;
mod routes;
mod state;
mod store;

#[cfg(test)]
mod testing;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::auth::firebase::FirebaseTokenVerifier;
use crate::auth::{DisabledVerifier, TokenVerifier};
use crate::config::Config;
use crate::db::create_pool;
use crate::llm_client::LlmClient;
use crate::routes::build_router;
use crate::state::AppState;
use crate::store::PgDocumentStore;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails fast on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Interview API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize PostgreSQL document store
    let db = create_pool(&config.database_url).await?;
    let store = Arc::new(PgDocumentStore::new(db));

    // Initialize LLM client
    let llm = LlmClient::new(
        config.llm_api_url.clone(),
        config.llm_api_key.clone(),
        config.llm_model.clone(),
    );
    info!("LLM client initialized (model: {})", llm.model());

    let token_verifier: Arc<dyn TokenVerifier> = match &config.firebase_project_id {
        Some(project_id) => {
            info!("Firebase ID-token verification enabled for project {project_id}");
            Arc::new(FirebaseTokenVerifier::new(project_id.clone()))
        }
        None => {
            warn!("FIREBASE_PROJECT_ID not set; bearer tokens will be ignored");
            Arc::new(DisabledVerifier)
        }
    };

    if config.vapi_secret.is_none() {
        warn!("VAPI_SECRET not set; accepting unauthenticated assistant requests");
    }

    // Build app state
    let state = AppState {
        config: config.clone(),
        llm: Arc::new(llm),
        token_verifier,
        store,
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
