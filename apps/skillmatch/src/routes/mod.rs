pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::orchestrator::handlers as orchestrate;
use crate::skills::handlers as skills;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let upload_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/health", get(health::health_handler))
        // Orchestration
        .route("/api/v1/orchestrate", post(orchestrate::handle_orchestrate))
        .route(
            "/api/v1/orchestrate/upload",
            post(orchestrate::handle_upload).layer(DefaultBodyLimit::max(upload_limit)),
        )
        // Direct skill operations
        .route("/api/v1/skills/compare", post(skills::handle_compare))
        .route("/api/v1/skills/suggest", post(skills::handle_suggest))
        .with_state(state)
}
