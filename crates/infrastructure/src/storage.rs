//! Storage module - flat-file CSV leaderboard
//!
//! The leaderboard is one CSV file with the columns `team_name,score,timestamp`.
//! It is created with a header on first append and only ever appended to.
//! Appends within a process are serialized so concurrent submissions never
//! interleave their bytes or lose a row.

use async_trait::async_trait;
use leaderboard_application::LeaderboardStore;
use leaderboard_domain::{AppResult, LeaderboardEntry, StorageError, LEADERBOARD_COLUMNS};
use std::io::{ErrorKind, SeekFrom};
use std::path::{Path, PathBuf};
use tokio::io::{AsyncReadExt, AsyncSeekExt, AsyncWriteExt};
use tokio::sync::Mutex;
use tracing::{debug, info, instrument, warn};

/// How the existing file ends, checked before each append
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FileTail {
    /// Missing or zero-length: the header must be written
    Empty,
    /// Last byte is a newline
    Terminated,
    /// Last row has no trailing newline
    Unterminated,
}

/// Leaderboard persisted as an append-only CSV file
#[derive(Debug)]
pub struct CsvLeaderboardStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl CsvLeaderboardStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, e: impl std::fmt::Display) -> StorageError {
        StorageError::Io {
            path: self.path.clone(),
            message: e.to_string(),
        }
    }

    async fn tail(&self) -> Result<FileTail, StorageError> {
        let mut file = match tokio::fs::File::open(&self.path).await {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(FileTail::Empty),
            Err(e) => return Err(self.io_error(e)),
        };
        let len = file.metadata().await.map_err(|e| self.io_error(e))?.len();
        if len == 0 {
            return Ok(FileTail::Empty);
        }

        file.seek(SeekFrom::End(-1))
            .await
            .map_err(|e| self.io_error(e))?;
        let mut last = [0u8; 1];
        file.read_exact(&mut last)
            .await
            .map_err(|e| self.io_error(e))?;

        Ok(if last[0] == b'\n' {
            FileTail::Terminated
        } else {
            FileTail::Unterminated
        })
    }

    fn encode(entry: &LeaderboardEntry, with_header: bool) -> Result<Vec<u8>, String> {
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(Vec::new());
        if with_header {
            writer
                .write_record(LEADERBOARD_COLUMNS)
                .map_err(|e| e.to_string())?;
        }
        let score = entry.score.to_string();
        writer
            .write_record([
                entry.team_name.as_str(),
                score.as_str(),
                entry.timestamp.as_str(),
            ])
            .map_err(|e| e.to_string())?;
        writer.into_inner().map_err(|e| e.to_string())
    }

    fn decode(&self, data: &[u8]) -> Result<Vec<LeaderboardEntry>, StorageError> {
        if data.iter().all(u8::is_ascii_whitespace) {
            return Ok(Vec::new());
        }

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_reader(data);

        let headers = reader.headers().map_err(|e| StorageError::Corrupt {
            row: 0,
            message: e.to_string(),
        })?;
        let position = |name: &str| {
            headers
                .iter()
                .position(|h| h.trim_start_matches('\u{feff}').trim() == name)
                .ok_or_else(|| StorageError::Corrupt {
                    row: 0,
                    message: format!("missing '{}' column", name),
                })
        };
        let team_idx = position(LEADERBOARD_COLUMNS[0])?;
        let score_idx = position(LEADERBOARD_COLUMNS[1])?;
        let timestamp_idx = position(LEADERBOARD_COLUMNS[2])?;

        let mut entries = Vec::new();
        for (i, record) in reader.records().enumerate() {
            let row = i + 1;
            let record = record.map_err(|e| StorageError::Corrupt {
                row,
                message: e.to_string(),
            })?;
            let cell = |idx: usize| {
                record.get(idx).ok_or_else(|| StorageError::Corrupt {
                    row,
                    message: "too few columns".to_string(),
                })
            };
            let raw_score = cell(score_idx)?;
            let score = raw_score
                .trim()
                .parse::<f64>()
                .map_err(|_| StorageError::Corrupt {
                    row,
                    message: format!("'{}' is not a score", raw_score),
                })?;
            entries.push(LeaderboardEntry::new(
                cell(team_idx)?,
                score,
                cell(timestamp_idx)?,
            ));
        }

        Ok(entries)
    }
}

#[async_trait]
impl LeaderboardStore for CsvLeaderboardStore {
    #[instrument(skip(self, entry), fields(path = %self.path.display(), team_name = %entry.team_name))]
    async fn append(&self, entry: &LeaderboardEntry) -> AppResult<()> {
        let _guard = self.write_lock.lock().await;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| self.io_error(e))?;
        }

        let tail = self.tail().await?;
        let with_header = tail == FileTail::Empty;
        let mut bytes = Self::encode(entry, with_header).map_err(|e| self.io_error(e))?;
        // A hand-edited file may end mid-line; keep the new row on its own line
        if tail == FileTail::Unterminated {
            warn!("leaderboard file does not end with a newline");
            bytes.insert(0, b'\n');
        }

        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await
            .map_err(|e| self.io_error(e))?;
        file.write_all(&bytes).await.map_err(|e| self.io_error(e))?;
        file.sync_data().await.map_err(|e| self.io_error(e))?;

        if with_header {
            info!("leaderboard file created");
        }
        debug!(score = entry.score, "entry appended");
        Ok(())
    }

    #[instrument(skip(self), fields(path = %self.path.display()))]
    async fn load(&self) -> AppResult<Vec<LeaderboardEntry>> {
        let data = match tokio::fs::read(&self.path).await {
            Ok(data) => data,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(self.io_error(e).into()),
        };
        let entries = self.decode(&data)?;
        debug!(entries = entries.len(), "leaderboard loaded");
        Ok(entries)
    }
}
