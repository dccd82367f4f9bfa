//! Leaderboard Service
//!
//! Scores uploads, records them, and serves the ranked board and its score
//! distribution.

use super::{Clock, GroundTruthProvider, LeaderboardStore};
use crate::distribution::ScoreDistribution;
use crate::ranking::{rank_entries, rank_of};
use crate::scoring::ScoringEngine;
use crate::validation::{parse_submission, SubmissionRequest};
use leaderboard_domain::{
    AppError, AppResult, Leaderboard, LeaderboardEntry, MetricKind, SubmissionReceipt,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// Result of probing the service's dependencies
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadinessReport {
    pub ground_truth: bool,
    pub leaderboard: bool,
}

impl ReadinessReport {
    /// Whether every dependency is usable
    pub fn is_ready(&self) -> bool {
        self.ground_truth && self.leaderboard
    }
}

/// Leaderboard service implementation
pub struct LeaderboardService {
    engine: ScoringEngine,
    ground_truth: Arc<dyn GroundTruthProvider>,
    store: Arc<dyn LeaderboardStore>,
    clock: Arc<dyn Clock>,
    prediction_column: String,
}

impl LeaderboardService {
    pub fn new(
        engine: ScoringEngine,
        ground_truth: Arc<dyn GroundTruthProvider>,
        store: Arc<dyn LeaderboardStore>,
        clock: Arc<dyn Clock>,
        prediction_column: impl Into<String>,
    ) -> Self {
        Self {
            engine,
            ground_truth,
            store,
            clock,
            prediction_column: prediction_column.into(),
        }
    }

    /// The metric submissions are scored with
    pub fn metric(&self) -> MetricKind {
        self.engine.metric_kind()
    }

    /// Score a submission and record it on the leaderboard.
    ///
    /// Nothing is written unless every step up to and including scoring
    /// succeeds.
    #[instrument(skip(self, request), fields(team_name = %request.team_name, bytes = request.file.len()))]
    pub async fn submit(&self, request: SubmissionRequest) -> AppResult<SubmissionReceipt> {
        request.validate_request()?;

        let submission = parse_submission(&request.file, &self.prediction_column)?;
        let truth = self.ground_truth.load().await.map_err(|e| {
            warn!(error = %e, source = %self.ground_truth.describe(), "ground truth unavailable");
            e
        })?;

        let score = self.engine.score(&truth, &submission)?;
        let entry = LeaderboardEntry::new(request.team_name, score, self.clock.timestamp());
        self.store.append(&entry).await?;

        let entries = self.store.load().await?;
        let index = entries.iter().rposition(|e| e == &entry).ok_or_else(|| {
            AppError::Internal("appended entry is missing from the leaderboard".to_string())
        })?;
        let rank = rank_of(&entries, index, self.metric().direction())
            .ok_or_else(|| AppError::Internal("failed to rank appended entry".to_string()))?;

        info!(score, rank, total = entries.len(), "submission recorded");

        Ok(SubmissionReceipt {
            entry,
            metric: self.metric(),
            rank,
            total_entries: entries.len(),
        })
    }

    /// The full board, best first
    #[instrument(skip(self))]
    pub async fn leaderboard(&self) -> AppResult<Leaderboard> {
        let entries = self.store.load().await?;
        debug!(entries = entries.len(), "leaderboard loaded");
        Ok(Leaderboard {
            metric: self.metric(),
            entries: rank_entries(&entries, self.metric().direction()),
        })
    }

    /// Density estimate of every score on the board
    #[instrument(skip(self))]
    pub async fn distribution(&self) -> AppResult<ScoreDistribution> {
        let entries = self.store.load().await?;
        let scores: Vec<f64> = entries.iter().map(|e| e.score).collect();
        Ok(ScoreDistribution::estimate(&scores))
    }

    /// Check that the ground truth and the leaderboard can both be read
    #[instrument(skip(self))]
    pub async fn readiness(&self) -> ReadinessReport {
        let ground_truth = match self.ground_truth.load().await {
            Ok(_) => true,
            Err(e) => {
                warn!(error = %e, "ground truth not ready");
                false
            }
        };
        let leaderboard = match self.store.load().await {
            Ok(_) => true,
            Err(e) => {
                warn!(error = %e, "leaderboard not ready");
                false
            }
        };
        ReadinessReport {
            ground_truth,
            leaderboard,
        }
    }
}

impl std::fmt::Debug for LeaderboardService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LeaderboardService")
            .field("engine", &self.engine)
            .field("ground_truth", &self.ground_truth.describe())
            .field("prediction_column", &self.prediction_column)
            .finish()
    }
}
