//! Scoring Engine - aligns a submission with the ground truth and scores it
//!
//! Rows are paired either by position or by an identifier column. Alignment
//! failures are reported before the metric ever runs.

use crate::scoring::metrics::{F1Metric, Metric, RmseMetric};
use leaderboard_common::CompetitionConfig;
use leaderboard_domain::{
    AppResult, F1Average, GroundTruth, LabeledTable, MetricKind, SchemaError, ScoringError,
    Submission, TableKind,
};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tracing::{debug, instrument};

/// How submission rows are paired with ground-truth rows
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RowAlignment {
    /// Row `i` of the submission answers row `i` of the ground truth
    #[default]
    Positional,
    /// Rows are paired by equal values of this column
    ByKey(String),
}

/// Scoring engine configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringEngineConfig {
    pub metric: MetricKind,
    pub f1_average: F1Average,
    pub positive_label: String,
    pub alignment: RowAlignment,
    /// Used in RMSE error messages
    pub target_column: String,
    /// Used in RMSE error messages
    pub prediction_column: String,
}

impl Default for ScoringEngineConfig {
    fn default() -> Self {
        Self::from(&CompetitionConfig::default())
    }
}

impl From<&CompetitionConfig> for ScoringEngineConfig {
    fn from(config: &CompetitionConfig) -> Self {
        Self {
            metric: config.metric,
            f1_average: config.f1_average,
            positive_label: config.positive_label.clone(),
            alignment: match &config.id_column {
                Some(column) => RowAlignment::ByKey(column.trim().to_string()),
                None => RowAlignment::Positional,
            },
            target_column: config.target_column.clone(),
            prediction_column: config.prediction_column.clone(),
        }
    }
}

/// Scores submissions against the ground truth with one fixed metric
#[derive(Clone)]
pub struct ScoringEngine {
    metric: Arc<dyn Metric>,
    alignment: RowAlignment,
}

impl ScoringEngine {
    /// Create a new scoring engine
    pub fn new(config: ScoringEngineConfig) -> Self {
        let metric: Arc<dyn Metric> = match config.metric {
            MetricKind::F1 => Arc::new(F1Metric::new(config.f1_average, &config.positive_label)),
            MetricKind::Rmse => Arc::new(RmseMetric::new(
                config.target_column,
                config.prediction_column,
            )),
        };
        Self {
            metric,
            alignment: config.alignment,
        }
    }

    /// Use a custom metric implementation
    pub fn with_metric(metric: Arc<dyn Metric>, alignment: RowAlignment) -> Self {
        Self { metric, alignment }
    }

    /// The metric this engine computes
    pub fn metric_kind(&self) -> MetricKind {
        self.metric.kind()
    }

    pub fn alignment(&self) -> &RowAlignment {
        &self.alignment
    }

    /// Score a submission.
    ///
    /// The result is a pure function of the two tables: the same inputs always
    /// give the same score.
    #[instrument(skip_all, fields(metric = self.metric.name(), rows = truth.len()))]
    pub fn score(&self, truth: &GroundTruth, submission: &Submission) -> AppResult<f64> {
        let (expected, predicted) = match &self.alignment {
            RowAlignment::Positional => Self::align_positional(truth, submission)?,
            RowAlignment::ByKey(column) => Self::align_by_key(truth, submission, column)?,
        };

        let score = self.metric.score(&expected, &predicted)?;
        debug!(score, "submission scored");
        Ok(score)
    }

    fn align_positional<'a>(
        truth: &'a GroundTruth,
        submission: &'a Submission,
    ) -> AppResult<(Vec<&'a str>, Vec<&'a str>)> {
        if truth.len() != submission.len() {
            return Err(ScoringError::SizeMismatch {
                expected: truth.len(),
                actual: submission.len(),
            }
            .into());
        }
        if truth.is_empty() {
            return Err(ScoringError::EmptyInput.into());
        }
        Ok((truth.labels(), submission.labels()))
    }

    fn align_by_key<'a>(
        truth: &'a GroundTruth,
        submission: &'a Submission,
        id_column: &str,
    ) -> AppResult<(Vec<&'a str>, Vec<&'a str>)> {
        let truth_keys = truth.keys(id_column)?;
        let submission_keys = submission.keys(id_column)?;
        check_unique(&truth_keys, TableKind::GroundTruth, id_column)?;
        check_unique(&submission_keys, TableKind::Submission, id_column)?;

        if truth_keys.len() != submission_keys.len() {
            return Err(ScoringError::SizeMismatch {
                expected: truth_keys.len(),
                actual: submission_keys.len(),
            }
            .into());
        }
        if truth_keys.is_empty() {
            return Err(ScoringError::EmptyInput.into());
        }

        let by_key: HashMap<&str, usize> = submission_keys
            .iter()
            .enumerate()
            .map(|(i, k)| (k.trim(), i))
            .collect();
        let truth_labels = truth.labels();
        let submission_labels = submission.labels();

        let mut predicted = Vec::with_capacity(truth_keys.len());
        for key in &truth_keys {
            let index = by_key.get(key.trim()).ok_or_else(|| {
                ScoringError::KeyMismatch(format!("'{}' is missing from the submission", key.trim()))
            })?;
            predicted.push(submission_labels[*index]);
        }

        Ok((truth_labels, predicted))
    }
}

fn check_unique(keys: &[&str], table: TableKind, column: &str) -> Result<(), SchemaError> {
    let mut seen = HashSet::with_capacity(keys.len());
    for key in keys {
        if !seen.insert(key.trim()) {
            return Err(SchemaError::DuplicateKey {
                table,
                column: column.to_string(),
                key: key.trim().to_string(),
            });
        }
    }
    Ok(())
}

impl std::fmt::Debug for ScoringEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScoringEngine")
            .field("metric", &self.metric.name())
            .field("alignment", &self.alignment)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use leaderboard_common::parse_csv_table;
    use leaderboard_domain::AppError;

    fn truth(csv: &str) -> GroundTruth {
        GroundTruth::from_table(parse_csv_table(csv.as_bytes()).unwrap(), "target").unwrap()
    }

    fn submission(csv: &str) -> Submission {
        Submission::from_table(parse_csv_table(csv.as_bytes()).unwrap(), "prediction").unwrap()
    }

    fn keyed_engine() -> ScoringEngine {
        ScoringEngine::new(ScoringEngineConfig {
            alignment: RowAlignment::ByKey("id".to_string()),
            ..ScoringEngineConfig::default()
        })
    }

    #[test]
    fn test_positional_f1() {
        let engine = ScoringEngine::new(ScoringEngineConfig::default());
        let score = engine
            .score(
                &truth("target\n1\n0\n1\n1\n"),
                &submission("prediction\n1\n0\n0\n1\n"),
            )
            .unwrap();
        assert!((score - 0.8).abs() < 1e-12);
    }

    #[test]
    fn test_positional_size_mismatch() {
        let engine = ScoringEngine::new(ScoringEngineConfig::default());
        let err = engine
            .score(&truth("target\n1\n0\n1\n"), &submission("prediction\n1\n0\n"))
            .unwrap_err();
        assert!(matches!(
            err,
            AppError::Value(ScoringError::SizeMismatch { expected: 3, actual: 2 })
        ));
    }

    #[test]
    fn test_empty_tables() {
        let engine = ScoringEngine::new(ScoringEngineConfig::default());
        let err = engine
            .score(&truth("target\n"), &submission("prediction\n"))
            .unwrap_err();
        assert!(matches!(err, AppError::Value(ScoringError::EmptyInput)));
    }

    #[test]
    fn test_keyed_alignment_ignores_row_order() {
        let score = keyed_engine()
            .score(
                &truth("id,target\na,1\nb,0\nc,1\nd,1\n"),
                &submission("id,prediction\nd,1\nc,0\nb,0\na,1\n"),
            )
            .unwrap();
        assert!((score - 0.8).abs() < 1e-12);
    }

    #[test]
    fn test_keyed_alignment_errors() {
        let engine = keyed_engine();

        let err = engine
            .score(&truth("id,target\na,1\n"), &submission("prediction\n1\n"))
            .unwrap_err();
        assert!(matches!(
            err,
            AppError::Schema(SchemaError::MissingColumn { table: TableKind::Submission, .. })
        ));

        let err = engine
            .score(
                &truth("id,target\na,1\nb,0\n"),
                &submission("id,prediction\na,1\na,0\n"),
            )
            .unwrap_err();
        assert!(matches!(err, AppError::Schema(SchemaError::DuplicateKey { .. })));

        let err = engine
            .score(
                &truth("id,target\na,1\nb,0\n"),
                &submission("id,prediction\na,1\nz,0\n"),
            )
            .unwrap_err();
        assert!(matches!(err, AppError::Value(ScoringError::KeyMismatch(_))));
    }

    #[test]
    fn test_engine_from_competition_config() {
        let mut competition = CompetitionConfig::default();
        competition.metric = MetricKind::Rmse;
        competition.id_column = Some(" id ".to_string());
        let engine = ScoringEngine::new(ScoringEngineConfig::from(&competition));
        assert_eq!(engine.metric_kind(), MetricKind::Rmse);
        assert_eq!(engine.alignment(), &RowAlignment::ByKey("id".to_string()));
    }
}
