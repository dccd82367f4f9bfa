//! Submission validation rules

use super::ValidatorExt;
use leaderboard_common::parse_csv_table;
use leaderboard_domain::{AppResult, GroundTruth, LabeledTable, Submission, ValidationError};
use serde::{Deserialize, Serialize};
use tracing::debug;
use validator::Validate;

/// A contestant's upload: a team name and the raw CSV bytes
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SubmissionRequest {
    #[validate(length(
        min = 1,
        max = 100,
        message = "team name must be between 1 and 100 characters"
    ))]
    pub team_name: String,

    #[serde(skip)]
    pub file: Vec<u8>,
}

impl SubmissionRequest {
    pub const MAX_TEAM_NAME_LENGTH: usize = 100;

    /// Create a request; surrounding whitespace is stripped from the team name.
    pub fn new(team_name: impl AsRef<str>, file: impl Into<Vec<u8>>) -> Self {
        Self {
            team_name: team_name.as_ref().trim().to_string(),
            file: file.into(),
        }
    }

    /// Check the request fields before any parsing happens
    pub fn validate_request(&self) -> Result<(), ValidationError> {
        self.check()
    }
}

/// Parse an uploaded submission and check it has the prediction column.
pub fn parse_submission(data: &[u8], prediction_column: &str) -> AppResult<Submission> {
    let table = parse_csv_table(data)?;
    let submission = Submission::from_table(table, prediction_column)?;
    debug!(rows = submission.table().len(), "submission parsed");
    Ok(submission)
}

/// Parse ground-truth CSV and check it has the target column.
pub fn parse_ground_truth(data: &[u8], target_column: &str) -> AppResult<GroundTruth> {
    let table = parse_csv_table(data)?;
    Ok(GroundTruth::from_table(table, target_column)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use leaderboard_domain::{AppError, SchemaError, TableKind};

    #[test]
    fn test_team_name_is_trimmed() {
        let request = SubmissionRequest::new("  Alpha  ", b"prediction\n1\n".to_vec());
        assert_eq!(request.team_name, "Alpha");
        assert!(request.validate_request().is_ok());
    }

    #[test]
    fn test_blank_team_name_is_rejected() {
        let request = SubmissionRequest::new("   ", Vec::new());
        let err = request.validate_request().unwrap_err();
        assert!(matches!(
            err,
            ValidationError::FieldValidation { ref field, .. } if field == "team_name"
        ));
    }

    #[test]
    fn test_long_team_name_is_rejected() {
        let ok = SubmissionRequest::new("é".repeat(100), Vec::new());
        assert!(ok.validate_request().is_ok());
        let too_long = SubmissionRequest::new("x".repeat(101), Vec::new());
        assert!(too_long.validate_request().is_err());
    }

    #[test]
    fn test_parse_submission() {
        let submission = parse_submission(b"id,prediction\n1,0\n2,1\n", "prediction").unwrap();
        assert_eq!(submission.labels(), vec!["0", "1"]);
    }

    #[test]
    fn test_parse_submission_missing_column() {
        let err = parse_submission(b"id,pred\n1,0\n", "prediction").unwrap_err();
        assert!(matches!(
            err,
            AppError::Schema(SchemaError::MissingColumn { table: TableKind::Submission, .. })
        ));
        assert_eq!(
            err.to_string(),
            "Schema error: submission file requires a 'prediction' column"
        );
    }

    #[test]
    fn test_parse_ground_truth_errors() {
        assert!(matches!(
            parse_ground_truth(b"label\n1\n", "target"),
            Err(AppError::Schema(_))
        ));
        assert!(matches!(parse_ground_truth(b"", "target"), Err(AppError::Parse(_))));
    }
}
