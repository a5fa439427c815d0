//! Shared application state for all routes.

use crate::gateway::Gateway;
use std::sync::Arc;

/// Handle injected into every handler. The gateway is opened once at startup and
/// shared by all requests; concurrency is left to the backend (pool or store lock).
#[derive(Clone)]
pub struct AppState {
    pub gateway: Arc<dyn Gateway>,
}

impl AppState {
    pub fn new(gateway: Arc<dyn Gateway>) -> Self {
        Self { gateway }
    }
}
