use std::sync::Arc;

use crate::analysis::tasks::AnalysisTasks;
use crate::config::Config;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Pluggable task backend. Default: GeminiTasks.
    pub tasks: Arc<dyn AnalysisTasks>,
    pub config: Config,
}
