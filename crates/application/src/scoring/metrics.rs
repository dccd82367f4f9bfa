//! Metric implementations.
//!
//! A metric compares the ground-truth column against the prediction column,
//! row by row, after the scoring engine has aligned them.

use leaderboard_common::parse_number;
use leaderboard_domain::{AppResult, F1Average, MetricKind, ScoringError};
use std::collections::BTreeSet;
use tracing::debug;

/// A scalar comparison of aligned label columns.
pub trait Metric: Send + Sync {
    /// Which competition metric this is
    fn kind(&self) -> MetricKind;

    /// Score aligned columns of equal, non-zero length.
    fn score(&self, expected: &[&str], predicted: &[&str]) -> AppResult<f64>;

    /// Get the metric name.
    fn name(&self) -> &'static str;
}

/// Canonical form of a class label.
///
/// `"1"`, `"1.0"` and `" 1 "` are the same class; non-numeric labels are
/// compared after trimming.
pub fn normalize_label(raw: &str) -> String {
    let trimmed = raw.trim();
    match trimmed.parse::<f64>() {
        Ok(v) if v.is_finite() && v.fract() == 0.0 && v.abs() < 1e15 => format!("{}", v as i64),
        Ok(v) if v.is_finite() => format!("{}", v),
        _ => trimmed.to_string(),
    }
}

fn f1_from_counts(tp: usize, fp: usize, fn_: usize) -> f64 {
    let denominator = 2 * tp + fp + fn_;
    if denominator == 0 {
        0.0
    } else {
        (2 * tp) as f64 / denominator as f64
    }
}

/// F1 score of exact label matches.
pub struct F1Metric {
    average: F1Average,
    positive_label: String,
}

impl F1Metric {
    /// Create an F1 metric counting `positive_label` as the positive class.
    pub fn new(average: F1Average, positive_label: &str) -> Self {
        Self {
            average,
            positive_label: normalize_label(positive_label),
        }
    }

    fn class_f1(expected: &[String], predicted: &[String], class: &str) -> f64 {
        let mut tp = 0;
        let mut fp = 0;
        let mut fn_ = 0;
        for (e, p) in expected.iter().zip(predicted) {
            match (e == class, p == class) {
                (true, true) => tp += 1,
                (false, true) => fp += 1,
                (true, false) => fn_ += 1,
                (false, false) => {}
            }
        }
        f1_from_counts(tp, fp, fn_)
    }
}

impl Metric for F1Metric {
    fn kind(&self) -> MetricKind {
        MetricKind::F1
    }

    fn score(&self, expected: &[&str], predicted: &[&str]) -> AppResult<f64> {
        let expected: Vec<String> = expected.iter().map(|l| normalize_label(l)).collect();
        let predicted: Vec<String> = predicted.iter().map(|l| normalize_label(l)).collect();

        let labels: BTreeSet<&str> = expected
            .iter()
            .chain(predicted.iter())
            .map(String::as_str)
            .collect();

        let score = match self.average {
            F1Average::Binary => {
                if labels.len() > 2 {
                    return Err(ScoringError::MulticlassBinary(labels.len()).into());
                }
                if labels.len() == 2 && !labels.contains(self.positive_label.as_str()) {
                    return Err(ScoringError::UnknownPositiveLabel(self.positive_label.clone()).into());
                }
                Self::class_f1(&expected, &predicted, &self.positive_label)
            }
            F1Average::Macro => {
                let total: f64 = labels
                    .iter()
                    .map(|class| Self::class_f1(&expected, &predicted, class))
                    .sum();
                total / labels.len() as f64
            }
        };

        debug!(score, classes = labels.len(), average = ?self.average, "F1 computed");
        Ok(score)
    }

    fn name(&self) -> &'static str {
        "f1"
    }
}

/// Root-mean-squared error of numeric values.
pub struct RmseMetric {
    target_column: String,
    prediction_column: String,
}

impl RmseMetric {
    /// Column names are used only in error messages.
    pub fn new(target_column: impl Into<String>, prediction_column: impl Into<String>) -> Self {
        Self {
            target_column: target_column.into(),
            prediction_column: prediction_column.into(),
        }
    }

    fn numbers(column: &str, values: &[&str]) -> AppResult<Vec<f64>> {
        values
            .iter()
            .enumerate()
            .map(|(i, v)| {
                let n = parse_number(column, i + 1, v)?;
                if n.is_finite() {
                    Ok(n)
                } else {
                    Err(leaderboard_domain::ParseError::InvalidNumber {
                        column: column.to_string(),
                        row: i + 1,
                        value: v.to_string(),
                    }
                    .into())
                }
            })
            .collect()
    }
}

impl Default for RmseMetric {
    fn default() -> Self {
        Self::new(
            leaderboard_domain::DEFAULT_TARGET_COLUMN,
            leaderboard_domain::DEFAULT_PREDICTION_COLUMN,
        )
    }
}

impl Metric for RmseMetric {
    fn kind(&self) -> MetricKind {
        MetricKind::Rmse
    }

    fn score(&self, expected: &[&str], predicted: &[&str]) -> AppResult<f64> {
        if expected.len() != predicted.len() {
            return Err(ScoringError::SizeMismatch {
                expected: expected.len(),
                actual: predicted.len(),
            }
            .into());
        }
        if expected.is_empty() {
            return Err(ScoringError::EmptyInput.into());
        }

        let expected = Self::numbers(&self.target_column, expected)?;
        let predicted = Self::numbers(&self.prediction_column, predicted)?;

        let sum_sq: f64 = expected
            .iter()
            .zip(&predicted)
            .map(|(e, p)| (e - p).powi(2))
            .sum();
        let score = (sum_sq / expected.len() as f64).sqrt();

        debug!(score, rows = expected.len(), "RMSE computed");
        Ok(score)
    }

    fn name(&self) -> &'static str {
        "rmse"
    }
}
