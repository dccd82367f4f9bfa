//! Testing utilities for the competition leaderboard
//!
//! This crate provides:
//! - CSV fixtures for the scoring scenarios used across the test suites
//! - A builder for ad-hoc CSV uploads
//! - In-memory mocks of the service ports
//! - Property-based strategies for label columns
//!
//! # Examples
//!
//! ```
//! use leaderboard_testing::{builders::CsvBuilder, fixtures::*};
//!
//! let upload = CsvBuilder::new(["id", "prediction"])
//!     .row(["1", "0"])
//!     .row(["2", "1"])
//!     .build();
//! assert_eq!(upload, b"id,prediction\n1,0\n2,1\n".to_vec());
//! assert!(BINARY_TRUTH_CSV.starts_with(b"target"));
//! ```

pub mod builders;
pub mod fixtures;
pub mod mocks;

// Re-export commonly used types
pub use builders::*;
pub use fixtures::*;
pub use mocks::*;

// Re-export testing dependencies for convenience
pub use proptest;
