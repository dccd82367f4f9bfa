//! Configuration management for the application.
//!
//! Settings are layered from optional TOML files and environment variables.
//! The `[secrets]` table holds values that must not live in the repository,
//! most importantly the base64-encoded ground truth.
//!
//! ## Example Configuration
//!
//! ```toml
//! [competition]
//! title = "Churn Prediction Challenge"
//! metric = "f1"
//!
//! [ground_truth]
//! source = "secret"
//! secret_key = "ground_truth_data"
//!
//! [leaderboard]
//! path = "data/leaderboard.csv"
//! ```

use anyhow::{Context, Result};
use leaderboard_domain::{F1Average, MetricKind, DEFAULT_PREDICTION_COLUMN, DEFAULT_TARGET_COLUMN};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::secret::DEFAULT_SECRET_KEY;

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub competition: CompetitionConfig,
    #[serde(default)]
    pub ground_truth: GroundTruthConfig,
    #[serde(default)]
    pub leaderboard: LeaderboardConfig,
    #[serde(default)]
    pub telemetry: TelemetryConfig,
    /// Named secret values, e.g. `ground_truth_data`
    #[serde(default)]
    pub secrets: HashMap<String, String>,
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to (e.g., "0.0.0.0")
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to listen on
    #[serde(default = "default_port")]
    pub port: u16,

    /// Request timeout in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_seconds: u64,

    /// Largest accepted upload in bytes
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,

    /// CORS allowed origins
    #[serde(default = "default_cors_origins")]
    pub cors_allowed_origins: Vec<String>,

    /// Serve the OpenAPI UI
    #[serde(default = "default_true")]
    pub enable_swagger: bool,
}

/// What is being scored and how
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompetitionConfig {
    /// Page heading
    #[serde(default = "default_title")]
    pub title: String,

    #[serde(default)]
    pub metric: MetricKind,

    /// Averaging used when `metric = "f1"`
    #[serde(default)]
    pub f1_average: F1Average,

    /// Label counted as positive for binary F1
    #[serde(default = "default_positive_label")]
    pub positive_label: String,

    #[serde(default = "default_target_column")]
    pub target_column: String,

    #[serde(default = "default_prediction_column")]
    pub prediction_column: String,

    /// Align rows by this column instead of by position
    #[serde(default)]
    pub id_column: Option<String>,
}

/// Where the ground truth comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroundTruthSource {
    /// A CSV file on local disk
    #[default]
    File,
    /// A base64-encoded CSV in the `[secrets]` table
    Secret,
}

/// Ground truth configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroundTruthConfig {
    #[serde(default)]
    pub source: GroundTruthSource,

    /// Used when `source = "file"`
    #[serde(default = "default_ground_truth_path")]
    pub path: PathBuf,

    /// Used when `source = "secret"`
    #[serde(default = "default_secret_key")]
    pub secret_key: String,
}

/// Leaderboard storage configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaderboardConfig {
    /// Flat CSV file holding every entry
    #[serde(default = "default_leaderboard_path")]
    pub path: PathBuf,
}

/// Telemetry configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelemetryConfig {
    /// Service name for tracing
    #[serde(default = "default_service_name")]
    pub service_name: String,

    /// Enable JSON logging format
    #[serde(default)]
    pub json_logging: bool,

    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

// Default value functions
fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_request_timeout() -> u64 {
    30
}

fn default_max_upload_bytes() -> usize {
    10 * 1024 * 1024 // 10 MB
}

fn default_cors_origins() -> Vec<String> {
    vec!["*".to_string()]
}

fn default_true() -> bool {
    true
}

fn default_title() -> String {
    "Data Analysis Competition Leaderboard".to_string()
}

fn default_positive_label() -> String {
    "1".to_string()
}

fn default_target_column() -> String {
    DEFAULT_TARGET_COLUMN.to_string()
}

fn default_prediction_column() -> String {
    DEFAULT_PREDICTION_COLUMN.to_string()
}

fn default_ground_truth_path() -> PathBuf {
    PathBuf::from("true.csv")
}

fn default_secret_key() -> String {
    DEFAULT_SECRET_KEY.to_string()
}

fn default_leaderboard_path() -> PathBuf {
    PathBuf::from("leaderboard.csv")
}

fn default_service_name() -> String {
    "competition-leaderboard".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            request_timeout_seconds: default_request_timeout(),
            max_upload_bytes: default_max_upload_bytes(),
            cors_allowed_origins: default_cors_origins(),
            enable_swagger: true,
        }
    }
}

impl Default for CompetitionConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            metric: MetricKind::default(),
            f1_average: F1Average::default(),
            positive_label: default_positive_label(),
            target_column: default_target_column(),
            prediction_column: default_prediction_column(),
            id_column: None,
        }
    }
}

impl Default for GroundTruthConfig {
    fn default() -> Self {
        Self {
            source: GroundTruthSource::default(),
            path: default_ground_truth_path(),
            secret_key: default_secret_key(),
        }
    }
}

impl Default for LeaderboardConfig {
    fn default() -> Self {
        Self {
            path: default_leaderboard_path(),
        }
    }
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            service_name: default_service_name(),
            json_logging: false,
            log_level: default_log_level(),
        }
    }
}

impl AppConfig {
    /// Load configuration from the `config/` directory and the environment.
    ///
    /// Sources, later ones overriding earlier ones:
    /// 1. Default values
    /// 2. config/default.toml (if exists)
    /// 3. config/{environment}.toml (if exists, where environment is from APP_ENV)
    /// 4. config/secrets.toml (if exists)
    /// 5. Environment variables (prefixed with APP_)
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Like [`AppConfig::load`], with an extra explicit file layered on top of
    /// the `config/` directory.
    pub fn load_from(extra_file: Option<&Path>) -> Result<Self> {
        let env = std::env::var("APP_ENV").unwrap_or_else(|_| "development".to_string());

        let mut builder = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{}", env)).required(false))
            .add_source(config::File::with_name("config/secrets").required(false));

        if let Some(path) = extra_file {
            builder = builder.add_source(config::File::from(path).required(true));
        }

        // Example: APP_COMPETITION__METRIC=rmse, APP_SECRETS__GROUND_TRUTH_DATA=...
        let config = builder
            .add_source(
                config::Environment::with_prefix("APP")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()
            .context("Failed to build configuration")?;

        let app_config: AppConfig = config
            .try_deserialize()
            .context("Failed to deserialize configuration")?;

        app_config.validate()?;

        Ok(app_config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.server.port == 0 {
            anyhow::bail!("Server port must be greater than 0");
        }

        if self.server.max_upload_bytes == 0 {
            anyhow::bail!("Maximum upload size must be greater than 0");
        }

        if self.server.request_timeout_seconds == 0 {
            anyhow::bail!("Request timeout must be greater than 0");
        }

        if self.competition.target_column.trim().is_empty() {
            anyhow::bail!("Target column name is required");
        }

        if self.competition.prediction_column.trim().is_empty() {
            anyhow::bail!("Prediction column name is required");
        }

        if self.competition.positive_label.trim().is_empty() {
            anyhow::bail!("Positive label is required");
        }

        if matches!(&self.competition.id_column, Some(c) if c.trim().is_empty()) {
            anyhow::bail!("Identifier column name must not be empty when set");
        }

        match self.ground_truth.source {
            GroundTruthSource::File if self.ground_truth.path.as_os_str().is_empty() => {
                anyhow::bail!("Ground truth path is required when source is 'file'");
            }
            GroundTruthSource::Secret if self.ground_truth.secret_key.trim().is_empty() => {
                anyhow::bail!("Ground truth secret key is required when source is 'secret'");
            }
            _ => {}
        }

        if self.leaderboard.path.as_os_str().is_empty() {
            anyhow::bail!("Leaderboard path is required");
        }

        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&self.telemetry.log_level.as_str()) {
            anyhow::bail!(
                "Invalid log level '{}'. Must be one of: {}",
                self.telemetry.log_level,
                valid_log_levels.join(", ")
            );
        }

        Ok(())
    }

    /// Look up a secret value
    pub fn secret(&self, key: &str) -> Option<&str> {
        self.secrets.get(key).map(String::as_str)
    }

    /// Get the request timeout as a Duration
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.server.request_timeout_seconds)
    }

    /// Get server address
    pub fn server_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Create a development configuration with sensible defaults
    pub fn development() -> Self {
        let mut config = Self::default();
        config.server.host = "127.0.0.1".to_string();
        config.telemetry.log_level = "debug".to_string();
        config
    }
}
