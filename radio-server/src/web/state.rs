//! Application state for the web layer.

use std::sync::Arc;

use crate::service::RadioService;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Caching aggregation service over the station directory
    pub radio: Arc<RadioService>,
}

impl AppState {
    /// Create a new app state around an already shared service.
    pub fn new(radio: Arc<RadioService>) -> Self {
        Self { radio }
    }
}
