use std::sync::Arc;

use tokio::sync::RwLock;

use crate::models::StatusCheck;
use crate::services::providers::MovieProvider;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Upstream movie metadata source
    pub provider: Arc<dyn MovieProvider>,
    /// Recorded client health pings, kept per process
    pub status_checks: Arc<RwLock<Vec<StatusCheck>>>,
}

impl AppState {
    /// Creates application state around the given provider
    pub fn new(provider: Arc<dyn MovieProvider>) -> Self {
        Self {
            provider,
            status_checks: Arc::new(RwLock::new(Vec::new())),
        }
    }
}
