//! Application state for dependency injection.

use std::sync::Arc;

use crate::config::LeadServiceConfig;
use crate::service::LeadService;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub lead_service: Arc<dyn LeadService>,
    pub config: LeadServiceConfig,
}

impl AppState {
    /// Create new app state.
    pub fn new(lead_service: Arc<dyn LeadService>, config: LeadServiceConfig) -> Self {
        Self {
            lead_service,
            config,
        }
    }
}
