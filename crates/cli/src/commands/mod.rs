//! CLI commands

pub mod config;
pub mod leaderboard;
pub mod score;
pub mod secret;
pub mod submit;

use crate::output::{OutputFormat, Report};
use anyhow::{Context, Result};
use leaderboard_application::LeaderboardService;
use leaderboard_common::AppConfig;
use leaderboard_infrastructure::service_from_config;
use std::path::{Path, PathBuf};

/// Context passed to all commands
pub struct CommandContext {
    pub config: AppConfig,
    pub format: OutputFormat,
}

impl CommandContext {
    /// Load configuration, layering `config_file` over the `config/` directory
    pub fn load(config_file: Option<&Path>, format: OutputFormat) -> Result<Self> {
        let config = AppConfig::load_from(config_file).context("Failed to load configuration")?;
        Ok(Self::new(config, format))
    }

    pub fn new(config: AppConfig, format: OutputFormat) -> Self {
        Self { config, format }
    }

    /// The leaderboard service over the configured files
    pub fn service(&self) -> LeaderboardService {
        service_from_config(&self.config)
    }

    /// Print a report in the selected output format
    pub fn print<R: Report>(&self, report: &R) -> Result<()> {
        println!("{}", report.render(self.format)?);
        Ok(())
    }
}

/// Read a file given on the command line
pub(crate) fn read_input(path: &PathBuf) -> Result<Vec<u8>> {
    std::fs::read(path).with_context(|| format!("Failed to read {}", path.display()))
}
