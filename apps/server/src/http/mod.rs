//! HTTP server module

mod api;
mod quiz;

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::cors::CorsLayer;

use crate::AppState;

pub use api::HealthResponse;
pub use quiz::GenerateQuizRequest;

/// Create the HTTP router with all routes configured
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/health", get(api::health))
        .route("/api/quiz/generate", post(quiz::generate))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
