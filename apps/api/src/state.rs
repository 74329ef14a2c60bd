use std::sync::Arc;

use crate::config::Config;
use crate::interview::orchestrator::InterviewOrchestrator;
use crate::interview::sessions::SessionStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub orchestrator: InterviewOrchestrator,
    /// Server-managed mock interviews. Caller-driven ones never touch this.
    pub sessions: Arc<SessionStore>,
    pub config: Config,
}
