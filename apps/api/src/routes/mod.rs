pub mod health;

use axum::{routing::get, Router};

use crate::interview::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route(
            "/api/vapi-assistant",
            get(handlers::handle_acknowledge).post(handlers::handle_generate),
        )
        .with_state(state)
}
