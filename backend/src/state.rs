//! Application state management
//!
//! This module provides the shared application state that is passed
//! to all request handlers via Axum's state extraction.
//!
//! # Design Principles
//!
//! 1. **Pre-compute expensive resources**: catalog and clients are built once
//! 2. **Cheap cloning**: All fields are behind `Arc`
//! 3. **Explicit collaborators**: store, clock and AI are trait objects so
//!    tests can swap them

use crate::ai::FoodAi;
use crate::config::AppConfig;
use crate::store::KeyValueStore;
use metrics_exporter_prometheus::PrometheusHandle;
use nutrition_tracker_shared::{Clock, RecipeCatalog};
use std::sync::Arc;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Session document store
    pub store: Arc<dyn KeyValueStore>,
    /// Food identification and recipe generation
    pub ai: Arc<dyn FoodAi>,
    /// Source of "now" for logging, summaries and streaks
    pub clock: Arc<dyn Clock>,
    /// Curated recipes
    pub catalog: Arc<RecipeCatalog>,
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Prometheus renderer; `None` when no recorder is installed
    pub metrics: Option<PrometheusHandle>,
}

impl AppState {
    pub fn new(
        store: Arc<dyn KeyValueStore>,
        ai: Arc<dyn FoodAi>,
        clock: Arc<dyn Clock>,
        catalog: RecipeCatalog,
        config: AppConfig,
    ) -> Self {
        Self {
            store,
            ai,
            clock,
            catalog: Arc::new(catalog),
            config: Arc::new(config),
            metrics: None,
        }
    }

    /// Attach the Prometheus handle served on `/metrics`
    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics = Some(handle);
        self
    }

    #[inline]
    pub fn store(&self) -> &dyn KeyValueStore {
        self.store.as_ref()
    }

    #[inline]
    pub fn ai(&self) -> &dyn FoodAi {
        self.ai.as_ref()
    }

    #[inline]
    pub fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }

    #[inline]
    pub fn catalog(&self) -> &RecipeCatalog {
        &self.catalog
    }

    #[inline]
    pub fn config(&self) -> &AppConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::DisabledAi;
    use crate::store::MemoryStore;
    use nutrition_tracker_shared::SystemClock;

    #[test]
    fn test_state_clone_shares_catalog() {
        let state = AppState::new(
            Arc::new(MemoryStore::new()),
            Arc::new(DisabledAi),
            Arc::new(SystemClock::utc()),
            RecipeCatalog::builtin().unwrap(),
            AppConfig::default(),
        );

        let cloned = state.clone();
        assert!(Arc::ptr_eq(&state.catalog, &cloned.catalog));
        assert_eq!(cloned.store().backend_name(), "memory");
        assert!(cloned.metrics.is_none());
    }
}
