use anyhow::Context;
use axum::{extract::State, response::Html};

use crate::errors::AppError;
use crate::state::AppState;

/// GET /
/// Serves the landing page, read fresh on every request so edits take
/// effect immediately.
pub async fn landing_handler(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let html = tokio::fs::read_to_string(&state.config.index_path)
        .await
        .with_context(|| format!("Failed to read landing page {}", state.config.index_path))?;
    Ok(Html(html))
}
