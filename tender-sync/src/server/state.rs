//! Shared state for the trigger server.

use std::sync::Arc;
use tokio::sync::Mutex;

use crate::orchestrator::SyncOrchestrator;

/// State handed to every request handler.
///
/// The orchestrator sits behind a mutex; a pass holds the lock for its whole
/// duration, so at most one pass runs per process.
#[derive(Clone)]
pub struct AppState {
    pub orchestrator: Arc<Mutex<SyncOrchestrator>>,
}

impl AppState {
    pub fn new(orchestrator: SyncOrchestrator) -> Self {
        Self {
            orchestrator: Arc::new(Mutex::new(orchestrator)),
        }
    }
}
