//! Configuration commands

use anyhow::Result;
use leaderboard_common::{AppConfig, GroundTruthSource};
use serde::Serialize;

use crate::commands::CommandContext;
use crate::output::{Report, TableFormatter};

const REDACTED: &str = "***";

/// Effective configuration with secret values hidden
#[derive(Debug, Serialize)]
pub struct ConfigReport {
    #[serde(flatten)]
    pub config: AppConfig,
}

impl ConfigReport {
    pub fn new(config: &AppConfig) -> Self {
        let mut config = config.clone();
        for value in config.secrets.values_mut() {
            *value = REDACTED.to_string();
        }
        Self { config }
    }
}

impl Report for ConfigReport {
    fn to_table(&self) -> String {
        let c = &self.config;
        let ground_truth = match c.ground_truth.source {
            GroundTruthSource::File => format!("file {}", c.ground_truth.path.display()),
            GroundTruthSource::Secret => {
                let state = if c.secret(&c.ground_truth.secret_key).is_some() {
                    "set"
                } else {
                    "not set"
                };
                format!("secret {} ({})", c.ground_truth.secret_key, state)
            }
        };

        TableFormatter::key_value(&[
            ("Title", c.competition.title.clone()),
            ("Metric", c.competition.metric.display_name().to_string()),
            ("Target column", c.competition.target_column.clone()),
            ("Prediction column", c.competition.prediction_column.clone()),
            (
                "Row alignment",
                c.competition
                    .id_column
                    .as_deref()
                    .map(|col| format!("by '{}'", col))
                    .unwrap_or_else(|| "positional".to_string()),
            ),
            ("Ground truth", ground_truth),
            ("Leaderboard", c.leaderboard.path.display().to_string()),
            ("Server", c.server_address()),
            ("Log level", c.telemetry.log_level.clone()),
        ])
    }
}

/// Show the effective configuration
pub fn show(ctx: &CommandContext) -> Result<()> {
    ctx.print(&ConfigReport::new(&ctx.config))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::OutputFormat;

    #[test]
    fn test_secrets_are_redacted() {
        let mut config = AppConfig::default();
        config.ground_truth.source = GroundTruthSource::Secret;
        config
            .secrets
            .insert("ground_truth_data".to_string(), "dGFyZ2V0CjEK".to_string());

        let report = ConfigReport::new(&config);
        let json = report.render(OutputFormat::Json).unwrap();
        assert!(!json.contains("dGFyZ2V0CjEK"));
        assert!(json.contains(REDACTED));
        assert!(report.to_table().contains("secret ground_truth_data (set)"));
    }
}
