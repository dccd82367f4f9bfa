//! Application layer for the competition leaderboard
//!
//! This crate orchestrates domain logic and coordinates between layers.
//!
//! ## Modules
//!
//! - `scoring` - Row alignment and the F1/RMSE metrics
//! - `ranking` - Ordering entries into a ranked board
//! - `distribution` - Kernel density estimate of the submitted scores
//! - `validation` - Request validation and upload parsing
//! - `services` - The leaderboard service and the ports it depends on

pub mod distribution;
pub mod ranking;
pub mod scoring;
pub mod services;
pub mod validation;

// Re-export commonly used types
pub use distribution::{DensityPoint, ScoreDistribution};
pub use ranking::{rank_entries, rank_of};
pub use scoring::{Metric, RowAlignment, ScoringEngine, ScoringEngineConfig};
pub use services::{
    Clock, GroundTruthProvider, LeaderboardService, LeaderboardStore, ReadinessReport, SystemClock,
};
pub use validation::{parse_ground_truth, parse_submission, SubmissionRequest, ValidatorExt};
