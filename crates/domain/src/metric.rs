//! Competition metrics and the direction in which they improve.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::str::FromStr;

/// The metric a competition is scored with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricKind {
    /// F1 score of exact label matches
    #[default]
    F1,
    /// Root-mean-squared error of numeric values
    Rmse,
}

impl MetricKind {
    /// Whether a larger score ranks higher
    pub fn direction(&self) -> ScoreDirection {
        match self {
            Self::F1 => ScoreDirection::HigherIsBetter,
            Self::Rmse => ScoreDirection::LowerIsBetter,
        }
    }

    /// Column heading used on the leaderboard
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::F1 => "F1 Score",
            Self::Rmse => "RMSE",
        }
    }

    /// Identifier used in configuration
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::F1 => "f1",
            Self::Rmse => "rmse",
        }
    }
}

impl std::fmt::Display for MetricKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MetricKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "f1" | "f1_score" => Ok(Self::F1),
            "rmse" => Ok(Self::Rmse),
            other => Err(format!("unknown metric '{}': expected 'f1' or 'rmse'", other)),
        }
    }
}

/// How per-class F1 scores are combined
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum F1Average {
    /// F1 of the positive label only; more than two labels is an error
    #[default]
    Binary,
    /// Unweighted mean of per-label F1 over every observed label
    Macro,
}

/// Sort direction of a metric
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreDirection {
    /// Larger is better (F1)
    HigherIsBetter,
    /// Smaller is better (RMSE)
    LowerIsBetter,
}

impl ScoreDirection {
    /// Order two scores so that the better one comes first.
    ///
    /// NaN sorts after every number in both directions.
    pub fn compare(&self, a: f64, b: f64) -> Ordering {
        match (a.is_nan(), b.is_nan()) {
            (true, true) => Ordering::Equal,
            (true, false) => Ordering::Greater,
            (false, true) => Ordering::Less,
            (false, false) => match self {
                Self::HigherIsBetter => b.partial_cmp(&a).unwrap_or(Ordering::Equal),
                Self::LowerIsBetter => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
            },
        }
    }
}
