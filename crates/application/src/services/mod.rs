//! Application Services
//!
//! Use-case orchestration for the leaderboard, plus the ports the service
//! needs from the outside world: a ground-truth source, durable entry
//! storage and a clock.

mod leaderboard;

pub use leaderboard::*;

use async_trait::async_trait;
use leaderboard_common::now_local_timestamp;
use leaderboard_domain::{AppResult, GroundTruth, LeaderboardEntry};

/// Source of the hidden reference labels
#[async_trait]
pub trait GroundTruthProvider: Send + Sync {
    /// Load and validate the ground truth. Called once per submission.
    async fn load(&self) -> AppResult<GroundTruth>;

    /// Where the ground truth comes from, for logs and readiness output
    fn describe(&self) -> String;
}

/// Append-only store of leaderboard entries
#[async_trait]
pub trait LeaderboardStore: Send + Sync {
    /// Durably append one entry. Concurrent appends must not interleave.
    async fn append(&self, entry: &LeaderboardEntry) -> AppResult<()>;

    /// All entries in insertion order
    async fn load(&self) -> AppResult<Vec<LeaderboardEntry>>;
}

/// Source of submission timestamps
pub trait Clock: Send + Sync {
    /// Current time formatted as `YYYY-MM-DD HH:MM:SS`
    fn timestamp(&self) -> String;
}

/// Wall clock in the server's local time zone
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn timestamp(&self) -> String {
        now_local_timestamp()
    }
}
