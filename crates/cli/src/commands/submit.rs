//! Local submission
//!
//! Runs the full pipeline (validate, score, append, rank) against the
//! configured ground truth and leaderboard file.

use anyhow::Result;
use leaderboard_application::SubmissionRequest;
use leaderboard_domain::{MetricKind, SubmissionReceipt};
use serde::Serialize;
use std::path::PathBuf;

use crate::commands::{read_input, CommandContext};
use crate::output::{colors, Report, TableFormatter};

/// Outcome of a recorded submission
#[derive(Debug, Serialize)]
pub struct SubmitReport {
    pub team_name: String,
    pub metric: MetricKind,
    pub score: f64,
    pub formatted_score: String,
    pub timestamp: String,
    pub rank: usize,
    pub total_entries: usize,
    pub message: String,
}

impl From<&SubmissionReceipt> for SubmitReport {
    fn from(receipt: &SubmissionReceipt) -> Self {
        Self {
            team_name: receipt.entry.team_name.clone(),
            metric: receipt.metric,
            score: receipt.entry.score,
            formatted_score: receipt.entry.formatted_score(),
            timestamp: receipt.entry.timestamp.clone(),
            rank: receipt.rank,
            total_entries: receipt.total_entries,
            message: receipt.message(),
        }
    }
}

impl Report for SubmitReport {
    fn to_table(&self) -> String {
        format!(
            "{}\n{}",
            colors::success(&self.message),
            TableFormatter::key_value(&[
                ("Team", self.team_name.clone()),
                ("Rank", format!("{} of {}", self.rank, self.total_entries)),
                ("Submitted", self.timestamp.clone()),
            ])
        )
    }
}

/// Submit a prediction file under a team name
pub async fn submit(ctx: &CommandContext, team: String, file: PathBuf) -> Result<()> {
    let data = read_input(&file)?;
    let receipt = ctx.service().submit(SubmissionRequest::new(team, data)).await?;

    ctx.print(&SubmitReport::from(&receipt))
}
