//! Application state for the arqueo engine API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::calculation::NonCashPolicy;
use crate::config::EngineConfig;
use crate::store::ArqueoStore;

/// Shared application state.
///
/// Contains resources that are shared across all request handlers: the
/// engine configuration and the persistence store.
#[derive(Clone)]
pub struct AppState {
    config: Arc<EngineConfig>,
    store: Arc<ArqueoStore>,
}

impl AppState {
    /// Creates a new application state.
    pub fn new(config: EngineConfig, store: ArqueoStore) -> Self {
        Self {
            config: Arc::new(config),
            store: Arc::new(store),
        }
    }

    /// Returns a reference to the engine configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Returns a reference to the persistence store.
    pub fn store(&self) -> &ArqueoStore {
        &self.store
    }

    /// The configured non-cash aggregation policy.
    pub fn noncash_policy(&self) -> NonCashPolicy {
        self.config.noncash_policy
    }
}
