pub mod health;
pub mod landing;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::extraction::handlers;
use crate::state::AppState;

/// Uploads above this are rejected by the framework before the handler runs.
const MAX_UPLOAD_BYTES: usize = 25 * 1024 * 1024;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(landing::landing_handler))
        .route("/health", get(health::health_handler))
        .route("/resume-to-json/", post(handlers::handle_resume_to_json))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .with_state(state)
}
