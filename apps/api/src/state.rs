use std::sync::Arc;

use crate::config::Config;
use crate::llm_client::DocumentModel;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Present only when ANTHROPIC_API_KEY was configured at startup;
    /// the upload handler returns a 500 when it is absent.
    pub llm: Option<Arc<dyn DocumentModel>>,
    pub config: Config,
}
