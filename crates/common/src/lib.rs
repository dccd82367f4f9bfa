//! Common utilities and shared functionality for the competition leaderboard.
//!
//! This crate provides foundational utilities used across all services including:
//! - Configuration management
//! - Structured logging setup
//! - Leaderboard timestamp formatting
//! - CSV parsing
//! - Base64 encoding of the ground-truth secret

pub mod config;
pub mod datetime;
pub mod secret;
pub mod serialization;
pub mod telemetry;

// Re-export commonly used types
pub use config::{
    AppConfig, CompetitionConfig, GroundTruthConfig, GroundTruthSource, LeaderboardConfig,
    ServerConfig, TelemetryConfig,
};
pub use datetime::{format_timestamp, now_local_timestamp, TIMESTAMP_FORMAT};
pub use secret::{decode_secret, encode_secret, secrets_toml_entry, SecretError, DEFAULT_SECRET_KEY};
pub use serialization::{parse_csv_table, parse_number};
pub use telemetry::{init_cli_tracing, init_tracing};

/// Common error type used throughout the crate
pub type Result<T> = std::result::Result<T, anyhow::Error>;
