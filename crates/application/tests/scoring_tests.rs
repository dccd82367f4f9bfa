//! Tests for scoring logic
//!
//! Tests metric values on the reference scenarios and the properties every
//! score must have.

use leaderboard_application::scoring::metrics::{F1Metric, Metric, RmseMetric};
use leaderboard_application::{parse_ground_truth, parse_submission, ScoringEngine, ScoringEngineConfig};
use leaderboard_domain::{AppError, F1Average, MetricKind, ScoringError};
use leaderboard_testing::fixtures::*;
use leaderboard_testing::{prediction_csv, truth_csv};
use proptest::prelude::*;

fn score(config: ScoringEngineConfig, truth: &[u8], submission: &[u8]) -> Result<f64, AppError> {
    let truth = parse_ground_truth(truth, "target")?;
    let submission = parse_submission(submission, "prediction")?;
    ScoringEngine::new(config).score(&truth, &submission)
}

fn rmse_config() -> ScoringEngineConfig {
    ScoringEngineConfig {
        metric: MetricKind::Rmse,
        ..ScoringEngineConfig::default()
    }
}

#[test]
fn test_binary_f1_scenario() {
    // Act
    let value = score(ScoringEngineConfig::default(), BINARY_TRUTH_CSV, BINARY_SUBMISSION_CSV).unwrap();

    // Assert
    assert!((value - BINARY_F1).abs() < 1e-12);
}

#[test]
fn test_rmse_scenario() {
    // Act
    let value = score(rmse_config(), REGRESSION_TRUTH_CSV, REGRESSION_SUBMISSION_CSV).unwrap();

    // Assert
    assert!((value - regression_rmse()).abs() < 1e-12);
    assert_eq!(format!("{:.4}", value), "0.5774");
}

#[test]
fn test_perfect_predictions() {
    let truth = truth_csv(&["1", "0", "1"]);
    let f1 = score(ScoringEngineConfig::default(), &truth, &prediction_csv(&["1", "0", "1"])).unwrap();
    assert_eq!(f1, 1.0);

    let truth = truth_csv(&["0.5", "2.25"]);
    let rmse = score(rmse_config(), &truth, &prediction_csv(&["0.5", "2.25"])).unwrap();
    assert_eq!(rmse, 0.0);
}

#[test]
fn test_numerically_equal_labels_match() {
    let truth = truth_csv(&["1", "0", "1"]);
    let value = score(
        ScoringEngineConfig::default(),
        &truth,
        &prediction_csv(&["1.0", "0.0", " 1"]),
    )
    .unwrap();
    assert_eq!(value, 1.0);
}

#[test]
fn test_size_mismatch_message() {
    let err = score(ScoringEngineConfig::default(), BINARY_TRUTH_CSV, SHORT_SUBMISSION_CSV).unwrap_err();
    assert!(matches!(
        err,
        AppError::Value(ScoringError::SizeMismatch { expected: 4, actual: 2 })
    ));
    assert!(err.to_string().contains("inconsistent numbers of samples: [4, 2]"));
}

#[test]
fn test_wrong_column_is_schema_error() {
    let err = score(ScoringEngineConfig::default(), BINARY_TRUTH_CSV, WRONG_COLUMN_CSV).unwrap_err();
    assert_eq!(err.error_code(), "SCHEMA_ERROR");
    assert_eq!(err.http_status(), 422);
}

#[test]
fn test_rmse_non_numeric_prediction() {
    let err = score(
        rmse_config(),
        REGRESSION_TRUTH_CSV,
        &prediction_csv(&["1.0", "two", "3.0"]),
    )
    .unwrap_err();
    assert_eq!(err.error_code(), "PARSE_ERROR");
}

proptest! {
    #[test]
    fn test_f1_is_bounded_and_deterministic((truth, predicted) in binary_label_pairs()) {
        let truth: Vec<String> = truth.iter().map(u8::to_string).collect();
        let predicted: Vec<String> = predicted.iter().map(u8::to_string).collect();
        let expected: Vec<&str> = truth.iter().map(String::as_str).collect();
        let actual: Vec<&str> = predicted.iter().map(String::as_str).collect();

        let metric = F1Metric::new(F1Average::Binary, "1");
        let first = metric.score(&expected, &actual).unwrap();
        let second = metric.score(&expected, &actual).unwrap();

        prop_assert!((0.0..=1.0).contains(&first));
        prop_assert_eq!(first, second);
    }

    #[test]
    fn test_f1_of_identical_columns((truth, _) in binary_label_pairs()) {
        let labels: Vec<String> = truth.iter().map(u8::to_string).collect();
        let refs: Vec<&str> = labels.iter().map(String::as_str).collect();
        let value = F1Metric::new(F1Average::Binary, "1").score(&refs, &refs).unwrap();
        let expected = if truth.contains(&1) { 1.0 } else { 0.0 };
        prop_assert_eq!(value, expected);
    }

    #[test]
    fn test_rmse_is_non_negative_and_symmetric((a, b) in numeric_pairs()) {
        let a: Vec<String> = a.iter().map(f64::to_string).collect();
        let b: Vec<String> = b.iter().map(f64::to_string).collect();
        let a: Vec<&str> = a.iter().map(String::as_str).collect();
        let b: Vec<&str> = b.iter().map(String::as_str).collect();

        let metric = RmseMetric::default();
        let forward = metric.score(&a, &b).unwrap();
        let backward = metric.score(&b, &a).unwrap();

        prop_assert!(forward >= 0.0);
        prop_assert!((forward - backward).abs() <= 1e-9 * forward.max(1.0));
        prop_assert_eq!(metric.score(&a, &a).unwrap(), 0.0);
    }

    #[test]
    fn test_positional_f1_depends_on_row_order(labels in proptest::collection::vec(0u8..2, 2..40)) {
        let one = labels.iter().position(|l| *l == 1);
        let zero = labels.iter().position(|l| *l == 0);
        prop_assume!(one.is_some() && zero.is_some());

        let truth: Vec<String> = labels.iter().map(u8::to_string).collect();
        let truth: Vec<&str> = truth.iter().map(String::as_str).collect();
        let mut swapped = truth.clone();
        swapped.swap(one.unwrap(), zero.unwrap());

        let truth_file = truth_csv(&truth);
        let in_order = score(ScoringEngineConfig::default(), &truth_file, &prediction_csv(&truth)).unwrap();
        let permuted = score(ScoringEngineConfig::default(), &truth_file, &prediction_csv(&swapped)).unwrap();

        prop_assert_eq!(in_order, 1.0);
        prop_assert!(permuted < 1.0);
    }

    #[test]
    fn test_positional_rmse_depends_on_row_order(values in proptest::collection::vec(-100i32..100, 2..40)) {
        prop_assume!(values[0] != values[1]);

        let truth: Vec<String> = values.iter().map(i32::to_string).collect();
        let truth: Vec<&str> = truth.iter().map(String::as_str).collect();
        let mut swapped = truth.clone();
        swapped.swap(0, 1);

        let truth_file = truth_csv(&truth);
        let in_order = score(rmse_config(), &truth_file, &prediction_csv(&truth)).unwrap();
        let permuted = score(rmse_config(), &truth_file, &prediction_csv(&swapped)).unwrap();

        prop_assert_eq!(in_order, 0.0);
        prop_assert!(permuted > 0.0);
    }
}
