//! Mock implementations of the service ports.
//!
//! Provides in-memory mocks for testing without touching the filesystem.

use async_trait::async_trait;
use leaderboard_application::{
    parse_ground_truth, Clock, GroundTruthProvider, LeaderboardService, LeaderboardStore,
    ScoringEngine, ScoringEngineConfig,
};
use leaderboard_domain::{
    AppResult, DataUnavailableError, GroundTruth, LeaderboardEntry, StorageError,
    DEFAULT_PREDICTION_COLUMN, DEFAULT_TARGET_COLUMN,
};
use parking_lot::RwLock;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::fixtures::FIXED_TIMESTAMP;

/// Leaderboard store kept in memory
#[derive(Default)]
pub struct InMemoryLeaderboardStore {
    entries: RwLock<Vec<LeaderboardEntry>>,
    fail_writes: AtomicBool,
}

impl InMemoryLeaderboardStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with these entries already stored
    pub fn with_entries(entries: Vec<LeaderboardEntry>) -> Self {
        Self {
            entries: RwLock::new(entries),
            fail_writes: AtomicBool::new(false),
        }
    }

    /// Make every subsequent append fail
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    pub fn entries(&self) -> Vec<LeaderboardEntry> {
        self.entries.read().clone()
    }

    pub fn entry_count(&self) -> usize {
        self.entries.read().len()
    }
}

#[async_trait]
impl LeaderboardStore for InMemoryLeaderboardStore {
    async fn append(&self, entry: &LeaderboardEntry) -> AppResult<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StorageError::Io {
                path: "memory".into(),
                message: "writes disabled".to_string(),
            }
            .into());
        }
        self.entries.write().push(entry.clone());
        Ok(())
    }

    async fn load(&self) -> AppResult<Vec<LeaderboardEntry>> {
        Ok(self.entries.read().clone())
    }
}

/// Ground truth parsed from fixed bytes on every load
pub struct StaticGroundTruthProvider {
    data: Vec<u8>,
    target_column: String,
}

impl StaticGroundTruthProvider {
    pub fn new(data: impl Into<Vec<u8>>) -> Self {
        Self {
            data: data.into(),
            target_column: DEFAULT_TARGET_COLUMN.to_string(),
        }
    }

    pub fn with_target_column(mut self, column: impl Into<String>) -> Self {
        self.target_column = column.into();
        self
    }
}

#[async_trait]
impl GroundTruthProvider for StaticGroundTruthProvider {
    async fn load(&self) -> AppResult<GroundTruth> {
        parse_ground_truth(&self.data, &self.target_column)
    }

    fn describe(&self) -> String {
        "static".to_string()
    }
}

/// Ground truth that is never available
#[derive(Debug, Default)]
pub struct MissingGroundTruthProvider;

#[async_trait]
impl GroundTruthProvider for MissingGroundTruthProvider {
    async fn load(&self) -> AppResult<GroundTruth> {
        Err(DataUnavailableError::FileNotFound("true.csv".into()).into())
    }

    fn describe(&self) -> String {
        "missing".to_string()
    }
}

/// Clock that always reports the same time
#[derive(Debug, Clone)]
pub struct FixedClock(pub String);

impl Default for FixedClock {
    fn default() -> Self {
        Self(FIXED_TIMESTAMP.to_string())
    }
}

impl Clock for FixedClock {
    fn timestamp(&self) -> String {
        self.0.clone()
    }
}

/// Build a service over the given ground truth and store with a fixed clock.
pub fn create_test_service(
    config: ScoringEngineConfig,
    ground_truth: Arc<dyn GroundTruthProvider>,
    store: Arc<dyn LeaderboardStore>,
) -> LeaderboardService {
    LeaderboardService::new(
        ScoringEngine::new(config),
        ground_truth,
        store,
        Arc::new(FixedClock::default()),
        DEFAULT_PREDICTION_COLUMN,
    )
}
