//! Competition Leaderboard Domain Types
//!
//! This crate provides the core domain model for the competition leaderboard:
//! parsed CSV tables, the ground truth and submission views over them,
//! leaderboard records, the metric a competition is scored with, and the
//! error hierarchy shared by every layer.
//!
//! ## Architecture
//!
//! - **table**: Parsed CSV tables and the labelled-table trait
//! - **ground_truth**: Hidden reference labels
//! - **submission**: Contestant prediction files
//! - **metric**: Metric kinds and their sort direction
//! - **leaderboard**: Entries, ranked entries and submission receipts
//! - **errors**: Error kinds with error codes and HTTP status codes
//!
//! ## Usage
//!
//! ```rust
//! use leaderboard_domain::{CsvTable, GroundTruth, LabeledTable, MetricKind};
//!
//! let table = CsvTable::new(
//!     vec!["target".to_string()],
//!     vec![vec!["1".to_string()], vec!["0".to_string()]],
//! );
//! let truth = GroundTruth::from_table(table, "target").unwrap();
//! assert_eq!(truth.labels(), vec!["1", "0"]);
//! assert_eq!(MetricKind::F1.display_name(), "F1 Score");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod errors;
pub mod ground_truth;
pub mod leaderboard;
pub mod metric;
pub mod submission;
pub mod table;

// Re-export commonly used types
pub use errors::{
    AppError, AppResult, DataUnavailableError, ParseError, SchemaError, ScoringError,
    StorageError, TableKind, ValidationError,
};
pub use ground_truth::{GroundTruth, DEFAULT_TARGET_COLUMN};
pub use leaderboard::{
    format_score, Leaderboard, LeaderboardEntry, RankedEntry, SubmissionReceipt,
    LEADERBOARD_COLUMNS,
};
pub use metric::{F1Average, MetricKind, ScoreDirection};
pub use submission::{Submission, DEFAULT_PREDICTION_COLUMN};
pub use table::{CsvTable, LabeledTable};
