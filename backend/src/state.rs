//! Application state management
//!
//! This module provides the shared application state that is passed
//! to all request handlers via Axum's state extraction.

use crate::client::{ClientError, FitnessApi, HttpFitnessApi};
use crate::config::AppConfig;
use std::sync::Arc;

/// Shared application state
///
/// All fields are `Arc`s, so cloning per request is O(1).
#[derive(Clone)]
pub struct AppState {
    /// External fitness API client
    pub api: Arc<dyn FitnessApi>,
    /// Application configuration
    pub config: Arc<AppConfig>,
}

impl AppState {
    /// Create state backed by the HTTP fitness API client
    pub fn new(config: AppConfig) -> Result<Self, ClientError> {
        let api = HttpFitnessApi::new(&config.api)?;
        Ok(Self::with_api(Arc::new(api), config))
    }

    /// Create state around any [`FitnessApi`] implementation
    pub fn with_api(api: Arc<dyn FitnessApi>, config: AppConfig) -> Self {
        Self {
            api,
            config: Arc::new(config),
        }
    }

    /// Get the fitness API client
    #[inline]
    pub fn api(&self) -> &dyn FitnessApi {
        self.api.as_ref()
    }

    /// Get a reference to the configuration
    #[inline]
    pub fn config(&self) -> &AppConfig {
        &self.config
    }
}
