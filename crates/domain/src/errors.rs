//! Error types for the competition leaderboard domain.
//!
//! Every failure a submission can run into is one of a small set of kinds:
//! the ground truth is unavailable, a file lacks a required column, a file is
//! not valid CSV, the two tables cannot be compared, the request itself is
//! invalid, or the leaderboard file cannot be read or written. Each kind maps
//! to a stable error code and HTTP status for API responses.

use std::path::PathBuf;

/// Which input file an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableKind {
    /// The hidden reference file
    GroundTruth,
    /// A contestant's uploaded predictions
    Submission,
    /// The persisted leaderboard
    Leaderboard,
}

impl std::fmt::Display for TableKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::GroundTruth => write!(f, "ground truth"),
            Self::Submission => write!(f, "submission"),
            Self::Leaderboard => write!(f, "leaderboard"),
        }
    }
}

/// Top-level application error type
///
/// All errors are caught at the boundary of the action that triggered them
/// and surfaced as a message. None of them are fatal to the process.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Ground truth missing or unreadable
    #[error("Ground truth unavailable: {0}")]
    DataUnavailable(#[from] DataUnavailableError),

    /// Required column absent
    #[error("Schema error: {0}")]
    Schema(#[from] SchemaError),

    /// Malformed CSV
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    /// Tables cannot be scored against each other
    #[error("Value error: {0}")]
    Value(#[from] ScoringError),

    /// Invalid request fields
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Leaderboard persistence failures
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Internal errors
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Get the machine-readable error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::DataUnavailable(_) => "DATA_UNAVAILABLE",
            Self::Schema(_) => "SCHEMA_ERROR",
            Self::Parse(_) => "PARSE_ERROR",
            Self::Value(_) => "VALUE_ERROR",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Storage(_) => "STORAGE_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Get the HTTP status code for this error
    pub fn http_status(&self) -> u16 {
        match self {
            Self::DataUnavailable(_) => 503,
            Self::Schema(_) | Self::Value(_) => 422,
            Self::Parse(_) | Self::Validation(_) => 400,
            Self::Storage(_) | Self::Internal(_) => 500,
        }
    }

    /// Whether the contestant can fix this by changing their upload
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            Self::Schema(_) | Self::Parse(_) | Self::Value(_) | Self::Validation(_)
        )
    }
}

/// Ground truth could not be obtained
#[derive(Debug, thiserror::Error)]
pub enum DataUnavailableError {
    /// The configured file does not exist
    #[error("ground truth file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// The file exists but could not be read
    #[error("failed to read {}: {message}", .path.display())]
    Unreadable { path: PathBuf, message: String },

    /// The configured secret key has no value
    #[error("secret '{0}' is not configured")]
    SecretMissing(String),

    /// The secret value is not valid base64 or not UTF-8
    #[error("secret '{key}' could not be decoded: {message}")]
    SecretUndecodable { key: String, message: String },
}

/// A required column is missing or its keys are unusable
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    /// Required column absent
    #[error("{table} file requires a '{column}' column")]
    MissingColumn { table: TableKind, column: String },

    /// Identifier column has a repeated value
    #[error("{table} file has duplicate '{column}' value '{key}'")]
    DuplicateKey {
        table: TableKind,
        column: String,
        key: String,
    },

    /// Header row is missing entirely
    #[error("{0} file has no header row")]
    EmptyHeader(TableKind),
}

/// CSV content could not be parsed
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// The CSV reader rejected the input
    #[error("malformed CSV: {0}")]
    Csv(String),

    /// A cell that must be numeric is not
    #[error("column '{column}' row {row}: '{value}' is not a number")]
    InvalidNumber {
        column: String,
        row: usize,
        value: String,
    },
}

/// Submission and ground truth cannot be compared
#[derive(Debug, thiserror::Error)]
pub enum ScoringError {
    /// Row counts differ
    #[error("found input variables with inconsistent numbers of samples: [{expected}, {actual}]")]
    SizeMismatch { expected: usize, actual: usize },

    /// Key sets differ under keyed alignment
    #[error("submission keys do not match ground truth keys: {0}")]
    KeyMismatch(String),

    /// Nothing to score
    #[error("cannot score an empty table")]
    EmptyInput,

    /// Binary averaging was requested on more than two labels
    #[error("target is multiclass ({0} labels) but binary F1 was requested")]
    MulticlassBinary(usize),

    /// Two labels are present and neither is the positive label
    #[error("positive label '{0}' is not one of the labels present")]
    UnknownPositiveLabel(String),
}

/// Request validation errors
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    /// Field validation failed
    #[error("{field}: {message}")]
    FieldValidation { field: String, message: String },

    /// A required upload is missing
    #[error("missing upload: {0}")]
    MissingFile(String),
}

/// Leaderboard file errors
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// Underlying I/O failure
    #[error("I/O error on {}: {message}", .path.display())]
    Io { path: PathBuf, message: String },

    /// A stored row cannot be decoded
    #[error("corrupt leaderboard row {row}: {message}")]
    Corrupt { row: usize, message: String },
}

/// Application-wide result type
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        let err = AppError::from(SchemaError::MissingColumn {
            table: TableKind::Submission,
            column: "prediction".to_string(),
        });
        assert_eq!(err.error_code(), "SCHEMA_ERROR");
        assert_eq!(err.http_status(), 422);
        assert_eq!(
            err.to_string(),
            "Schema error: submission file requires a 'prediction' column"
        );

        let err = AppError::from(DataUnavailableError::SecretMissing("ground_truth_data".into()));
        assert_eq!(err.error_code(), "DATA_UNAVAILABLE");
        assert_eq!(err.http_status(), 503);
    }

    #[test]
    fn test_user_errors() {
        assert!(AppError::from(ScoringError::EmptyInput).is_user_error());
        assert!(AppError::from(ParseError::Csv("bad".into())).is_user_error());
        assert!(!AppError::from(DataUnavailableError::FileNotFound("true.csv".into())).is_user_error());
        assert!(!AppError::Internal("boom".into()).is_user_error());
    }

    #[test]
    fn test_size_mismatch_message() {
        let err = ScoringError::SizeMismatch { expected: 4, actual: 3 };
        assert!(err.to_string().contains("[4, 3]"));
    }
}
