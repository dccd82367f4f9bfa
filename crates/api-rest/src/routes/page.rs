//! Browser page: submission form, leaderboard table and distribution chart.

use crate::{
    error::ApiError,
    routes::upload::read_submission,
    state::AppState,
    views::{render_page, Banner, PageModel},
};
use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Router,
};
use tracing::warn;

/// Page routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(index))
        .route("/submit", post(submit))
}

/// Render the page
pub async fn index(State(state): State<AppState>) -> Response {
    render(&state, StatusCode::OK, None, "").await
}

/// Handle the HTML form and re-render the page with the outcome
pub async fn submit(State(state): State<AppState>, multipart: Multipart) -> Response {
    let request = match read_submission(multipart, state.max_upload_bytes()).await {
        Ok(request) => request,
        Err(e) => return render(&state, e.status_code(), Some(Banner::Error(e.to_string())), "").await,
    };
    let team_name = request.team_name.clone();

    match state.service.submit(request).await {
        Ok(receipt) => {
            render(&state, StatusCode::OK, Some(Banner::Success(receipt.message())), &team_name).await
        }
        Err(e) => {
            let e = ApiError::from(e);
            render(&state, e.status_code(), Some(Banner::Error(e.to_string())), &team_name).await
        }
    }
}

async fn render(
    state: &AppState,
    status: StatusCode,
    banner: Option<Banner>,
    team_name: &str,
) -> Response {
    let leaderboard = match state.service.leaderboard().await {
        Ok(board) => board,
        Err(e) => {
            warn!(error = %e, "leaderboard unavailable for page render");
            return ApiError::from(e).into_response();
        }
    };
    let distribution = leaderboard_application::ScoreDistribution::estimate(&leaderboard.scores());

    let html = render_page(&PageModel {
        title: &state.config.competition.title,
        leaderboard: &leaderboard,
        distribution: &distribution,
        banner,
        team_name,
    });

    (status, Html(html)).into_response()
}
