//! Infrastructure layer for the competition leaderboard
//!
//! This crate provides the concrete adapters behind the application ports:
//! - Ground-truth providers reading a local file or an embedded secret
//! - A flat-file CSV leaderboard store
//! - Assembly of the service from configuration
//!
//! ## Usage
//!
//! ```rust,no_run
//! use leaderboard_common::AppConfig;
//! use leaderboard_infrastructure::{provider_from_config, CsvLeaderboardStore};
//!
//! let config = AppConfig::default();
//! let ground_truth = provider_from_config(&config);
//! let store = CsvLeaderboardStore::new(&config.leaderboard.path);
//! ```

pub mod ground_truth;
pub mod storage;
pub mod wiring;

pub use ground_truth::{provider_from_config, FileGroundTruthProvider, SecretGroundTruthProvider};
pub use storage::CsvLeaderboardStore;
pub use wiring::service_from_config;
