//! Scoring Module
//!
//! Compares a parsed submission against the ground truth:
//!
//! - `metrics`: the metric implementations (F1, RMSE)
//! - `engine`: row alignment and dispatch to the configured metric

pub mod engine;
pub mod metrics;

pub use engine::{RowAlignment, ScoringEngine, ScoringEngineConfig};
pub use metrics::{normalize_label, F1Metric, Metric, RmseMetric};
