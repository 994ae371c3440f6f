use crate::config::Config;
use crate::evaluation::orchestrator::Orchestrator;

/// Shared application state injected into all route handlers via Axum extractors.
/// Holds no per-request data; every batch builds its own tasks and semaphore.
#[derive(Clone)]
pub struct AppState {
    /// Evaluation pipeline with its injected oracle.
    pub orchestrator: Orchestrator,
    pub config: Config,
}
