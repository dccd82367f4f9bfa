//! Leaderboard records.

use crate::metric::MetricKind;
use serde::{Deserialize, Serialize};

/// Column order of the persisted leaderboard file
pub const LEADERBOARD_COLUMNS: [&str; 3] = ["team_name", "score", "timestamp"];

/// One scored, timestamped submission.
///
/// Entries are immutable once appended. The same team may appear any number
/// of times.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    /// Name the contestant submitted under
    pub team_name: String,
    /// Metric value, stored unrounded
    pub score: f64,
    /// Local time formatted as `YYYY-MM-DD HH:MM:SS`
    pub timestamp: String,
}

impl LeaderboardEntry {
    /// Create an entry
    pub fn new(team_name: impl Into<String>, score: f64, timestamp: impl Into<String>) -> Self {
        Self {
            team_name: team_name.into(),
            score,
            timestamp: timestamp.into(),
        }
    }

    /// Score as displayed on the board
    pub fn formatted_score(&self) -> String {
        format_score(self.score)
    }
}

/// Render a score with four decimal places
pub fn format_score(score: f64) -> String {
    format!("{:.4}", score)
}

/// An entry with its position on the board
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedEntry {
    /// 1-based position
    pub rank: usize,
    /// Name the contestant submitted under
    pub team_name: String,
    /// Metric value
    pub score: f64,
    /// When the entry was recorded
    pub timestamp: String,
}

impl RankedEntry {
    /// Score as displayed on the board
    pub fn formatted_score(&self) -> String {
        format_score(self.score)
    }
}

/// The rendered board
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Leaderboard {
    /// Metric the scores were computed with
    pub metric: MetricKind,
    /// Entries in rank order
    pub entries: Vec<RankedEntry>,
}

impl Leaderboard {
    /// Whether nothing has been submitted yet
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Scores in rank order
    pub fn scores(&self) -> Vec<f64> {
        self.entries.iter().map(|e| e.score).collect()
    }
}

/// The result returned to a contestant after a successful submission
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmissionReceipt {
    /// The entry that was appended
    pub entry: LeaderboardEntry,
    /// Metric the score was computed with
    pub metric: MetricKind,
    /// Position on the board right after this submission
    pub rank: usize,
    /// Number of entries on the board, this one included
    pub total_entries: usize,
}

impl SubmissionReceipt {
    /// Human-readable confirmation, e.g. `Submitted! F1 Score: 0.8000`
    pub fn message(&self) -> String {
        format!(
            "Submitted! {}: {}",
            self.metric.display_name(),
            self.entry.formatted_score()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_score_uses_four_decimals() {
        assert_eq!(format_score(0.8), "0.8000");
        assert_eq!(format_score(0.577_350_269), "0.5774");
    }

    #[test]
    fn test_receipt_message() {
        let receipt = SubmissionReceipt {
            entry: LeaderboardEntry::new("team-a", 0.8, "2024-01-01 10:00:00"),
            metric: MetricKind::F1,
            rank: 1,
            total_entries: 1,
        };
        assert_eq!(receipt.message(), "Submitted! F1 Score: 0.8000");
    }
}
