pub mod dtos;
pub mod handlers;

use axum::{
    Router,
    routing::{get, post},
};

use crate::{app_state::AppState, health};

/// Core application routes. Cross-cutting layers (tracing, CORS, rate
/// limiting, swagger) are attached by the binary.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/extract", post(handlers::extract_content))
        .route("/healthz", get(health::health_check))
        .with_state(state)
}
