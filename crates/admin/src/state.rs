//! Application state shared across handlers.

use std::sync::Arc;

use crate::config::DashboardConfig;
use crate::store::OrderStore;

/// Application state shared across all handlers.
///
/// The store is injected once at process startup and only ever reached
/// through this handle - never through process-wide state - so tests run the
/// full router against an in-memory store.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: DashboardConfig,
    store: Arc<dyn OrderStore>,
}

impl AppState {
    #[must_use]
    pub fn new(config: DashboardConfig, store: Arc<dyn OrderStore>) -> Self {
        Self {
            inner: Arc::new(AppStateInner { config, store }),
        }
    }

    #[must_use]
    pub fn config(&self) -> &DashboardConfig {
        &self.inner.config
    }

    #[must_use]
    pub fn store(&self) -> &dyn OrderStore {
        self.inner.store.as_ref()
    }
}
