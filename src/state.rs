//! Shared application state for request handlers.

use std::sync::Arc;

use crate::config::Settings;

/// Shared application state, cloneable across handlers via an Arc-wrapped
/// settings record.
///
/// Settings are constructed once at process entry and injected here; every
/// clone of the state sees the identical instance.
#[derive(Clone)]
pub struct AppState {
    pub settings: Arc<Settings>,
}

impl AppState {
    /// Creates a new application state from the given settings.
    pub fn new(settings: Settings) -> Self {
        Self {
            settings: Arc::new(settings),
        }
    }
}
