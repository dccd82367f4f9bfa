//! Submission endpoints.

use crate::{
    error::{ApiError, ApiResult, ErrorResponse},
    responses::{ApiResponse, Created},
    routes::upload::read_submission,
    state::AppState,
};
use axum::{
    extract::{Multipart, State},
    routing::post,
    Router,
};
use leaderboard_domain::SubmissionReceipt;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Multipart form accepted by the submission endpoint
#[derive(Debug, ToSchema)]
pub struct SubmissionForm {
    /// Team name, 1 to 100 characters after trimming
    pub team_name: String,
    /// Prediction CSV with a `prediction` column
    #[schema(value_type = String, format = Binary)]
    pub file: Vec<u8>,
}

/// Scored submission
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SubmissionResponse {
    pub team_name: String,
    pub score: f64,
    /// Score with four decimals, as shown on the board
    pub formatted_score: String,
    pub metric: String,
    pub timestamp: String,
    /// Position on the board right after this submission
    pub rank: usize,
    pub total_entries: usize,
}

impl From<&SubmissionReceipt> for SubmissionResponse {
    fn from(receipt: &SubmissionReceipt) -> Self {
        Self {
            team_name: receipt.entry.team_name.clone(),
            score: receipt.entry.score,
            formatted_score: receipt.entry.formatted_score(),
            metric: receipt.metric.as_str().to_string(),
            timestamp: receipt.entry.timestamp.clone(),
            rank: receipt.rank,
            total_entries: receipt.total_entries,
        }
    }
}

/// Submission routes
pub fn routes() -> Router<AppState> {
    Router::new().route("/submissions", post(create_submission))
}

/// Create submission
///
/// Score an uploaded prediction file and add it to the leaderboard.
#[utoipa::path(
    post,
    path = "/submissions",
    tag = "submissions",
    request_body(content = SubmissionForm, content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "Submission scored and recorded", body = SubmissionResponse),
        (status = 400, description = "Invalid form or unparseable CSV", body = ErrorResponse),
        (status = 413, description = "Upload too large", body = ErrorResponse),
        (status = 422, description = "Missing column or mismatched rows", body = ErrorResponse),
        (status = 503, description = "Ground truth unavailable", body = ErrorResponse),
    )
)]
pub async fn create_submission(
    State(state): State<AppState>,
    multipart: Multipart,
) -> ApiResult<Created<SubmissionResponse>> {
    let request = read_submission(multipart, state.max_upload_bytes()).await?;
    let receipt = state.service.submit(request).await.map_err(ApiError::from)?;

    Ok(Created(ApiResponse::success_with_message(
        SubmissionResponse::from(&receipt),
        receipt.message(),
    )))
}
