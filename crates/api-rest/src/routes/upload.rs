//! Multipart upload extraction shared by the page and the JSON API.

use crate::error::{ApiError, ApiResult};
use axum::extract::Multipart;
use leaderboard_application::SubmissionRequest;
use leaderboard_domain::ValidationError;
use tracing::debug;

/// Form field holding the team name
pub const TEAM_NAME_FIELD: &str = "team_name";
/// Form field holding the CSV upload
pub const FILE_FIELD: &str = "file";

/// Read `team_name` and `file` from a multipart body.
///
/// A file part with an empty file name and no content (what a browser sends
/// when nothing was chosen) counts as missing. The team name is checked
/// before the file so the first problem reported matches the form order.
pub async fn read_submission(mut multipart: Multipart, limit: usize) -> ApiResult<SubmissionRequest> {
    let mut team_name = String::new();
    let mut file: Option<Vec<u8>> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::from_multipart(e, limit))?
    {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some(TEAM_NAME_FIELD) => {
                team_name = field
                    .text()
                    .await
                    .map_err(|e| ApiError::from_multipart(e, limit))?;
            }
            Some(FILE_FIELD) => {
                let chosen = field.file_name().map(|n| !n.is_empty()).unwrap_or(true);
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::from_multipart(e, limit))?;
                if bytes.len() > limit {
                    return Err(ApiError::PayloadTooLarge(limit));
                }
                if chosen || !bytes.is_empty() {
                    file = Some(bytes.to_vec());
                }
            }
            other => debug!(field = ?other, "ignoring unknown form field"),
        }
    }

    let Some(file) = file else {
        SubmissionRequest::new(&team_name, Vec::new()).validate_request()?;
        return Err(ValidationError::MissingFile(FILE_FIELD.to_string()).into());
    };

    Ok(SubmissionRequest::new(team_name, file))
}
