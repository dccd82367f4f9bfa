//! Test fixtures for the scoring scenarios.
//!
//! Binary F1 scenario: truth `[1,0,1,1]`, predictions `[1,0,0,1]` give
//! TP=2, FP=0, FN=1, so F1 = 0.8. RMSE scenario: truth `[1,2,3]`,
//! predictions `[1,2,4]` give sqrt(1/3) ≈ 0.5774.

use leaderboard_domain::LeaderboardEntry;
use proptest::prelude::*;

pub const BINARY_TRUTH_CSV: &[u8] = b"target\n1\n0\n1\n1\n";
pub const BINARY_SUBMISSION_CSV: &[u8] = b"prediction\n1\n0\n0\n1\n";
pub const BINARY_F1: f64 = 0.8;

pub const REGRESSION_TRUTH_CSV: &[u8] = b"target\n1.0\n2.0\n3.0\n";
pub const REGRESSION_SUBMISSION_CSV: &[u8] = b"prediction\n1.0\n2.0\n4.0\n";

/// Expected RMSE of the regression scenario
pub fn regression_rmse() -> f64 {
    (1.0f64 / 3.0).sqrt()
}

/// Truth with an identifier column, for keyed alignment
pub const KEYED_TRUTH_CSV: &[u8] = b"id,target\na,1\nb,0\nc,1\nd,1\n";
/// Same predictions as the binary scenario, rows shuffled
pub const KEYED_SUBMISSION_CSV: &[u8] = b"id,prediction\nd,1\nb,0\na,1\nc,0\n";

/// A submission with the wrong column name
pub const WRONG_COLUMN_CSV: &[u8] = b"pred\n1\n0\n0\n1\n";
/// A submission one row short of the binary truth
pub const SHORT_SUBMISSION_CSV: &[u8] = b"prediction\n1\n0\n";

/// Fixed timestamp used by [`crate::mocks::FixedClock`]
pub const FIXED_TIMESTAMP: &str = "2024-05-01 12:00:00";

/// Create a leaderboard entry with the fixed timestamp
pub fn create_test_entry(team_name: &str, score: f64) -> LeaderboardEntry {
    LeaderboardEntry::new(team_name, score, FIXED_TIMESTAMP)
}

/// Binary label columns of equal length, at least one row
pub fn binary_label_pairs() -> impl Strategy<Value = (Vec<u8>, Vec<u8>)> {
    (1usize..40).prop_flat_map(|n| {
        (
            proptest::collection::vec(0u8..2, n),
            proptest::collection::vec(0u8..2, n),
        )
    })
}

/// Numeric columns of equal length, at least one row
pub fn numeric_pairs() -> impl Strategy<Value = (Vec<f64>, Vec<f64>)> {
    (1usize..40).prop_flat_map(|n| {
        (
            proptest::collection::vec(-1e3f64..1e3, n),
            proptest::collection::vec(-1e3f64..1e3, n),
        )
    })
}
