//! Ground-truth providers.
//!
//! The ground truth is re-read on every submission, so replacing the file or
//! the secret takes effect without a restart.

use async_trait::async_trait;
use leaderboard_application::{parse_ground_truth, GroundTruthProvider};
use leaderboard_common::{secret::decode_secret_bytes, AppConfig, GroundTruthSource};
use leaderboard_domain::{AppResult, DataUnavailableError, GroundTruth};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, instrument};

/// Reads the ground truth from a CSV file on local disk
#[derive(Debug, Clone)]
pub struct FileGroundTruthProvider {
    path: PathBuf,
    target_column: String,
}

impl FileGroundTruthProvider {
    pub fn new(path: impl AsRef<Path>, target_column: impl Into<String>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            target_column: target_column.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl GroundTruthProvider for FileGroundTruthProvider {
    #[instrument(skip(self), fields(path = %self.path.display()))]
    async fn load(&self) -> AppResult<GroundTruth> {
        let data = tokio::fs::read(&self.path).await.map_err(|e| match e.kind() {
            ErrorKind::NotFound => DataUnavailableError::FileNotFound(self.path.clone()),
            _ => DataUnavailableError::Unreadable {
                path: self.path.clone(),
                message: e.to_string(),
            },
        })?;
        debug!(bytes = data.len(), "ground truth read");
        parse_ground_truth(&data, &self.target_column)
    }

    fn describe(&self) -> String {
        format!("file {}", self.path.display())
    }
}

/// Decodes the ground truth from a base64 value in the secrets table
#[derive(Clone)]
pub struct SecretGroundTruthProvider {
    key: String,
    value: Option<String>,
    target_column: String,
}

impl SecretGroundTruthProvider {
    /// `value` is `None` when the key is absent from the secrets table.
    pub fn new(key: impl Into<String>, value: Option<String>, target_column: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value,
            target_column: target_column.into(),
        }
    }
}

#[async_trait]
impl GroundTruthProvider for SecretGroundTruthProvider {
    #[instrument(skip(self), fields(key = %self.key))]
    async fn load(&self) -> AppResult<GroundTruth> {
        let encoded = self
            .value
            .as_deref()
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| DataUnavailableError::SecretMissing(self.key.clone()))?;

        let data = decode_secret_bytes(encoded).map_err(|e| DataUnavailableError::SecretUndecodable {
            key: self.key.clone(),
            message: e.to_string(),
        })?;
        debug!(bytes = data.len(), "ground truth decoded");
        parse_ground_truth(&data, &self.target_column)
    }

    fn describe(&self) -> String {
        format!("secret {}", self.key)
    }
}

impl std::fmt::Debug for SecretGroundTruthProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SecretGroundTruthProvider")
            .field("key", &self.key)
            .field("configured", &self.value.is_some())
            .finish()
    }
}

/// Build the provider selected by `[ground_truth] source`.
pub fn provider_from_config(config: &AppConfig) -> Arc<dyn GroundTruthProvider> {
    let target_column = config.competition.target_column.clone();
    match config.ground_truth.source {
        GroundTruthSource::File => Arc::new(FileGroundTruthProvider::new(
            &config.ground_truth.path,
            target_column,
        )),
        GroundTruthSource::Secret => {
            let key = config.ground_truth.secret_key.clone();
            let value = config.secret(&key).map(str::to_string);
            Arc::new(SecretGroundTruthProvider::new(key, value, target_column))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use leaderboard_common::encode_secret;
    use leaderboard_domain::{AppError, LabeledTable};

    #[tokio::test]
    async fn test_file_provider() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("true.csv");
        std::fs::write(&path, "id,target\n1,1\n2,0\n").unwrap();

        let truth = FileGroundTruthProvider::new(&path, "target").load().await.unwrap();
        assert_eq!(truth.labels(), vec!["1", "0"]);
    }

    #[tokio::test]
    async fn test_missing_file_is_data_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let provider = FileGroundTruthProvider::new(dir.path().join("true.csv"), "target");

        let err = provider.load().await.unwrap_err();
        assert!(matches!(
            err,
            AppError::DataUnavailable(DataUnavailableError::FileNotFound(_))
        ));
        assert_eq!(err.http_status(), 503);
    }

    #[tokio::test]
    async fn test_ground_truth_without_target_column() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("true.csv");
        std::fs::write(&path, "label\n1\n").unwrap();

        let err = FileGroundTruthProvider::new(&path, "target").load().await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "Schema error: ground truth file requires a 'target' column"
        );
    }

    #[tokio::test]
    async fn test_secret_provider() {
        let encoded = encode_secret(b"target\n1\n0\n1\n");
        let provider = SecretGroundTruthProvider::new("ground_truth_data", Some(encoded), "target");

        let truth = provider.load().await.unwrap();
        assert_eq!(truth.labels(), vec!["1", "0", "1"]);
    }

    #[tokio::test]
    async fn test_secret_provider_errors() {
        let missing = SecretGroundTruthProvider::new("ground_truth_data", None, "target");
        assert!(matches!(
            missing.load().await.unwrap_err(),
            AppError::DataUnavailable(DataUnavailableError::SecretMissing(_))
        ));

        let garbage =
            SecretGroundTruthProvider::new("ground_truth_data", Some("%%%".to_string()), "target");
        assert!(matches!(
            garbage.load().await.unwrap_err(),
            AppError::DataUnavailable(DataUnavailableError::SecretUndecodable { .. })
        ));
    }

    #[tokio::test]
    async fn test_provider_from_config() {
        let mut config = AppConfig::default();
        config.ground_truth.source = GroundTruthSource::Secret;
        config
            .secrets
            .insert("ground_truth_data".to_string(), encode_secret(b"target\n0\n"));

        let provider = provider_from_config(&config);
        assert_eq!(provider.describe(), "secret ground_truth_data");
        assert_eq!(provider.load().await.unwrap().labels(), vec!["0"]);

        config.ground_truth.source = GroundTruthSource::File;
        assert_eq!(provider_from_config(&config).describe(), "file true.csv");
    }
}
