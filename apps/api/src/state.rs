use std::sync::Arc;

use crate::config::Config;
use crate::llm_client::TextGenerator;
use crate::render::DocumentRenderer;

/// Shared application state injected into all route handlers via Axum extractors.
/// Immutable after startup; requests share nothing mutable.
#[derive(Clone)]
pub struct AppState {
    /// Upstream text model. Default: OllamaClient.
    pub generator: Arc<dyn TextGenerator>,
    pub renderer: DocumentRenderer,
    pub config: Config,
}
