use std::sync::Arc;

use crate::capabilities::AdvisoryFinalizer;
use crate::config::Config;
use crate::orchestrator::SkillGapOrchestrator;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Runs are independent; the orchestrator holds only the model client and registry.
    pub orchestrator: Arc<SkillGapOrchestrator>,
    /// Backs the standalone suggestions endpoint.
    pub advisor: Arc<AdvisoryFinalizer>,
}
