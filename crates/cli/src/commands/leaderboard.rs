//! Leaderboard commands

use anyhow::Result;
use leaderboard_application::ScoreDistribution;
use leaderboard_domain::{Leaderboard, MetricKind, RankedEntry};
use serde::Serialize;

use crate::commands::CommandContext;
use crate::output::{colors, Report, TableFormatter};

/// Ranked leaderboard, optionally truncated
#[derive(Debug, Serialize)]
pub struct LeaderboardReport {
    pub metric: MetricKind,
    pub total_entries: usize,
    pub entries: Vec<RankedEntry>,
}

impl LeaderboardReport {
    pub fn new(board: Leaderboard, limit: Option<usize>) -> Self {
        let total_entries = board.entries.len();
        let mut entries = board.entries;
        if let Some(limit) = limit {
            entries.truncate(limit);
        }
        Self {
            metric: board.metric,
            total_entries,
            entries,
        }
    }
}

impl Report for LeaderboardReport {
    fn to_table(&self) -> String {
        if self.entries.is_empty() {
            return colors::warning("No submissions yet.").to_string();
        }

        let rows: Vec<Vec<String>> = self
            .entries
            .iter()
            .map(|e| {
                vec![
                    e.rank.to_string(),
                    e.team_name.clone(),
                    e.formatted_score(),
                    e.timestamp.clone(),
                ]
            })
            .collect();

        let mut out = TableFormatter::simple(
            &["Rank", "Team", self.metric.display_name(), "Submitted"],
            rows,
            &[0, 2],
        );
        if self.entries.len() < self.total_entries {
            out.push('\n');
            out.push_str(
                &colors::dim(&format!(
                    "Showing {} of {} entries",
                    self.entries.len(),
                    self.total_entries
                ))
                .to_string(),
            );
        }
        out
    }
}

/// Summary of the score density estimate
#[derive(Debug, Serialize)]
pub struct DistributionReport {
    pub metric: MetricKind,
    #[serde(flatten)]
    pub distribution: ScoreDistribution,
}

impl Report for DistributionReport {
    fn to_table(&self) -> String {
        let d = &self.distribution;
        if d.is_empty() {
            return colors::warning("Not enough distinct scores for a distribution.").to_string();
        }

        let first = d.points.first().map(|p| p.score).unwrap_or_default();
        let last = d.points.last().map(|p| p.score).unwrap_or_default();
        let mode = d
            .points
            .iter()
            .max_by(|a, b| a.density.total_cmp(&b.density))
            .map(|p| p.score)
            .unwrap_or_default();

        TableFormatter::key_value(&[
            ("Metric", self.metric.display_name().to_string()),
            ("Scores", d.sample_size.to_string()),
            (
                "Bandwidth",
                d.bandwidth.map(|b| format!("{:.4}", b)).unwrap_or_default(),
            ),
            ("Range", format!("{:.4} to {:.4}", first, last)),
            ("Mode", format!("{:.4}", mode)),
            ("Peak density", format!("{:.4}", d.peak())),
        ])
    }
}

/// Show the ranked leaderboard
pub async fn show(ctx: &CommandContext, limit: Option<usize>) -> Result<()> {
    let board = ctx.service().leaderboard().await?;
    ctx.print(&LeaderboardReport::new(board, limit))
}

/// Show the score distribution
pub async fn distribution(ctx: &CommandContext) -> Result<()> {
    let service = ctx.service();
    let report = DistributionReport {
        metric: service.metric(),
        distribution: service.distribution().await?,
    };
    ctx.print(&report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use leaderboard_application::rank_entries;
    use leaderboard_testing::create_test_entry;

    fn board() -> Leaderboard {
        let entries = vec![
            create_test_entry("A", 0.5),
            create_test_entry("B", 0.9),
            create_test_entry("C", 0.7),
        ];
        Leaderboard {
            metric: MetricKind::F1,
            entries: rank_entries(&entries, MetricKind::F1.direction()),
        }
    }

    #[test]
    fn test_limit_keeps_top_entries() {
        let report = LeaderboardReport::new(board(), Some(2));
        assert_eq!(report.total_entries, 3);
        let teams: Vec<&str> = report.entries.iter().map(|e| e.team_name.as_str()).collect();
        assert_eq!(teams, vec!["B", "C"]);
        assert!(report.to_table().contains("Showing 2 of 3 entries"));
    }

    #[test]
    fn test_empty_board() {
        let report = LeaderboardReport::new(
            Leaderboard {
                metric: MetricKind::Rmse,
                entries: Vec::new(),
            },
            None,
        );
        assert!(report.to_table().contains("No submissions yet."));
    }

    #[test]
    fn test_distribution_summary() {
        let report = DistributionReport {
            metric: MetricKind::F1,
            distribution: ScoreDistribution::estimate(&board().scores()),
        };
        let table = report.to_table();
        assert!(table.contains("Bandwidth"));
        assert!(table.contains("Scores"));
    }
}
