//! Application state and dependency injection.
//!
//! This module defines the shared application state that is passed
//! to all route handlers via Axum's state extraction.

use leaderboard_application::LeaderboardService;
use leaderboard_common::AppConfig;
use leaderboard_infrastructure::service_from_config;
use std::sync::Arc;

/// Application state shared across all requests
#[derive(Clone)]
pub struct AppState {
    /// Loaded configuration
    pub config: Arc<AppConfig>,

    /// The scoring and leaderboard service
    pub service: Arc<LeaderboardService>,
}

impl AppState {
    /// Create state from an already-built service
    pub fn new(config: AppConfig, service: LeaderboardService) -> Self {
        Self {
            config: Arc::new(config),
            service: Arc::new(service),
        }
    }

    /// Wire the file-backed adapters selected by the configuration
    pub fn from_config(config: AppConfig) -> Self {
        let service = service_from_config(&config);
        Self::new(config, service)
    }

    /// Largest accepted request body
    pub fn max_upload_bytes(&self) -> usize {
        self.config.server.max_upload_bytes
    }
}
