//! Leaderboard endpoints.

use crate::{
    error::{ApiResult, ErrorResponse},
    responses::ApiResponse,
    state::AppState,
};
use axum::{
    extract::{Query, State},
    routing::get,
    Router,
};
use leaderboard_application::ScoreDistribution;
use leaderboard_domain::{Leaderboard, RankedEntry};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

/// Leaderboard row
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LeaderboardRow {
    pub rank: usize,
    pub team_name: String,
    pub score: f64,
    pub formatted_score: String,
    pub timestamp: String,
}

impl From<&RankedEntry> for LeaderboardRow {
    fn from(entry: &RankedEntry) -> Self {
        Self {
            rank: entry.rank,
            team_name: entry.team_name.clone(),
            score: entry.score,
            formatted_score: entry.formatted_score(),
            timestamp: entry.timestamp.clone(),
        }
    }
}

/// Ranked leaderboard
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LeaderboardResponse {
    /// `f1` or `rmse`
    pub metric: String,
    /// `higher_is_better` or `lower_is_better`
    pub order: String,
    /// Entries on the board before `limit` was applied
    pub total_entries: usize,
    pub entries: Vec<LeaderboardRow>,
}

impl LeaderboardResponse {
    fn from_board(board: &Leaderboard, limit: Option<usize>) -> Self {
        let take = limit.unwrap_or(board.entries.len());
        Self {
            metric: board.metric.as_str().to_string(),
            order: match board.metric.direction() {
                leaderboard_domain::ScoreDirection::HigherIsBetter => "higher_is_better",
                leaderboard_domain::ScoreDirection::LowerIsBetter => "lower_is_better",
            }
            .to_string(),
            total_entries: board.entries.len(),
            entries: board.entries.iter().take(take).map(LeaderboardRow::from).collect(),
        }
    }
}

/// One sample of the density curve
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DensityPointResponse {
    pub score: f64,
    pub density: f64,
}

/// Kernel density estimate of all scores
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DistributionResponse {
    pub sample_size: usize,
    /// Absent when there are fewer than two distinct scores
    pub bandwidth: Option<f64>,
    pub points: Vec<DensityPointResponse>,
}

impl From<ScoreDistribution> for DistributionResponse {
    fn from(distribution: ScoreDistribution) -> Self {
        Self {
            sample_size: distribution.sample_size,
            bandwidth: distribution.bandwidth,
            points: distribution
                .points
                .into_iter()
                .map(|p| DensityPointResponse {
                    score: p.score,
                    density: p.density,
                })
                .collect(),
        }
    }
}

/// Leaderboard query parameters
#[derive(Debug, Deserialize, IntoParams)]
pub struct LeaderboardQuery {
    /// Only return the top N entries
    pub limit: Option<usize>,
}

/// Leaderboard routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/leaderboard", get(get_leaderboard))
        .route("/leaderboard/distribution", get(get_distribution))
}

/// Get leaderboard
///
/// All submissions, best first. Ties keep submission order.
#[utoipa::path(
    get,
    path = "/leaderboard",
    tag = "leaderboard",
    params(LeaderboardQuery),
    responses(
        (status = 200, description = "Ranked leaderboard", body = LeaderboardResponse),
        (status = 500, description = "Leaderboard file unreadable", body = ErrorResponse),
    )
)]
pub async fn get_leaderboard(
    State(state): State<AppState>,
    Query(query): Query<LeaderboardQuery>,
) -> ApiResult<ApiResponse<LeaderboardResponse>> {
    let board = state.service.leaderboard().await?;
    Ok(ApiResponse::success(LeaderboardResponse::from_board(
        &board,
        query.limit,
    )))
}

/// Get score distribution
///
/// Gaussian kernel density estimate of every submitted score.
#[utoipa::path(
    get,
    path = "/leaderboard/distribution",
    tag = "leaderboard",
    responses(
        (status = 200, description = "Density curve", body = DistributionResponse),
        (status = 500, description = "Leaderboard file unreadable", body = ErrorResponse),
    )
)]
pub async fn get_distribution(
    State(state): State<AppState>,
) -> ApiResult<ApiResponse<DistributionResponse>> {
    let distribution = state.service.distribution().await?;
    Ok(ApiResponse::success(DistributionResponse::from(distribution)))
}
