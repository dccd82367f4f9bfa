//! Service assembly from configuration.

use crate::{ground_truth::provider_from_config, storage::CsvLeaderboardStore};
use leaderboard_application::{GroundTruthProvider, LeaderboardService, ScoringEngine, ScoringEngineConfig, SystemClock};
use leaderboard_common::AppConfig;
use std::sync::Arc;
use tracing::info;

/// Build a [`LeaderboardService`] over the configured ground truth and the
/// CSV leaderboard file, stamping entries with the local wall clock.
pub fn service_from_config(config: &AppConfig) -> LeaderboardService {
    let ground_truth = provider_from_config(config);
    let store = Arc::new(CsvLeaderboardStore::new(&config.leaderboard.path));
    let engine = ScoringEngine::new(ScoringEngineConfig::from(&config.competition));

    info!(
        metric = %config.competition.metric,
        ground_truth = %ground_truth.describe(),
        leaderboard = %config.leaderboard.path.display(),
        "leaderboard service configured"
    );

    LeaderboardService::new(
        engine,
        ground_truth,
        store,
        Arc::new(SystemClock),
        config.competition.prediction_column.clone(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use leaderboard_common::{encode_secret, GroundTruthSource};
    use leaderboard_domain::{MetricKind, LEADERBOARD_COLUMNS};

    #[tokio::test]
    async fn test_service_from_config_uses_secret_and_file_store() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = AppConfig::default();
        config.competition.metric = MetricKind::Rmse;
        config.ground_truth.source = GroundTruthSource::Secret;
        config.secrets.insert(
            config.ground_truth.secret_key.clone(),
            encode_secret(b"target\n1.0\n2.0\n"),
        );
        config.leaderboard.path = dir.path().join("leaderboard.csv");

        let service = service_from_config(&config);
        assert_eq!(service.metric(), MetricKind::Rmse);
        assert!(service.readiness().await.is_ready());

        let request = leaderboard_application::SubmissionRequest::new("Alpha", &b"prediction\n1.0\n2.0\n"[..]);
        let receipt = service.submit(request).await.unwrap();
        assert_eq!(receipt.entry.score, 0.0);

        let written = std::fs::read_to_string(&config.leaderboard.path).unwrap();
        assert!(written.starts_with(&LEADERBOARD_COLUMNS.join(",")));
    }
}
