//! Offline scoring
//!
//! Scores a prediction file against a local ground-truth file with the
//! configured competition settings. Nothing is written to the leaderboard.

use anyhow::Result;
use leaderboard_application::{parse_ground_truth, parse_submission, ScoringEngine, ScoringEngineConfig};
use leaderboard_domain::{format_score, AppResult, LabeledTable, MetricKind};
use serde::Serialize;
use std::path::PathBuf;

use crate::commands::{read_input, CommandContext};
use crate::output::{Report, TableFormatter};

/// Result of an offline scoring run
#[derive(Debug, Serialize)]
pub struct ScoreReport {
    pub metric: MetricKind,
    pub score: f64,
    pub formatted_score: String,
    pub rows: usize,
}

impl Report for ScoreReport {
    fn to_table(&self) -> String {
        TableFormatter::key_value(&[
            ("Metric", self.metric.display_name().to_string()),
            ("Score", self.formatted_score.clone()),
            ("Rows", self.rows.to_string()),
        ])
    }
}

/// Score two CSV documents with the competition settings, optionally
/// overriding the metric
pub fn score_bytes(
    mut settings: ScoringEngineConfig,
    metric: Option<MetricKind>,
    ground_truth: &[u8],
    submission: &[u8],
) -> AppResult<ScoreReport> {
    if let Some(metric) = metric {
        settings.metric = metric;
    }
    let truth = parse_ground_truth(ground_truth, &settings.target_column)?;
    let submission = parse_submission(submission, &settings.prediction_column)?;

    let engine = ScoringEngine::new(settings);
    let score = engine.score(&truth, &submission)?;

    Ok(ScoreReport {
        metric: engine.metric_kind(),
        score,
        formatted_score: format_score(score),
        rows: truth.len(),
    })
}

/// Score a submission file offline
pub fn score(
    ctx: &CommandContext,
    ground_truth: PathBuf,
    submission: PathBuf,
    metric: Option<MetricKind>,
) -> Result<()> {
    let truth_bytes = read_input(&ground_truth)?;
    let submission_bytes = read_input(&submission)?;

    let report = score_bytes(
        ScoringEngineConfig::from(&ctx.config.competition),
        metric,
        &truth_bytes,
        &submission_bytes,
    )?;

    ctx.print(&report)
}
