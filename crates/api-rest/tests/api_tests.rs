//! HTTP tests for the page and the JSON API.
//!
//! Requests go through the full router and middleware stack with
//! `tower::ServiceExt::oneshot`; the service underneath uses in-memory mocks.

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use leaderboard_api_rest::{create_app, AppState};
use leaderboard_application::{GroundTruthProvider, ScoringEngineConfig};
use leaderboard_common::AppConfig;
use leaderboard_domain::MetricKind;
use leaderboard_testing::{builders::prediction_csv, fixtures::*, mocks::*};
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

const BOUNDARY: &str = "leaderboard-test-boundary";

struct TestApp {
    router: Router,
    store: Arc<InMemoryLeaderboardStore>,
}

fn test_app_with(
    config: AppConfig,
    ground_truth: Arc<dyn GroundTruthProvider>,
    store: Arc<InMemoryLeaderboardStore>,
) -> TestApp {
    let engine_config = ScoringEngineConfig::from(&config.competition);
    let service = create_test_service(engine_config, ground_truth, store.clone());
    TestApp {
        router: create_app(AppState::new(config, service)),
        store,
    }
}

fn test_app() -> TestApp {
    test_app_with(
        AppConfig::default(),
        Arc::new(StaticGroundTruthProvider::new(BINARY_TRUTH_CSV)),
        Arc::new(InMemoryLeaderboardStore::new()),
    )
}

fn multipart_body(team_name: Option<&str>, file: Option<(&str, &[u8])>) -> Vec<u8> {
    let mut body = Vec::new();
    if let Some(team_name) = team_name {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"team_name\"\r\n\r\n{team_name}\r\n"
            )
            .as_bytes(),
        );
    }
    if let Some((file_name, content)) = file {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{file_name}\"\r\nContent-Type: text/csv\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(content);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

fn upload_request(uri: &str, body: Vec<u8>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap()
}

fn get_request(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

async fn body_bytes(response: axum::response::Response) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}

async fn body_json(response: axum::response::Response) -> Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

async fn body_text(response: axum::response::Response) -> String {
    String::from_utf8(body_bytes(response).await).unwrap()
}

#[tokio::test]
async fn test_health_endpoint() {
    let app = test_app();

    let response = app.router.oneshot(get_request("/health")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["data"]["status"], "healthy");
}

#[tokio::test]
async fn test_ready_reports_missing_ground_truth() {
    let app = test_app_with(
        AppConfig::default(),
        Arc::new(MissingGroundTruthProvider),
        Arc::new(InMemoryLeaderboardStore::new()),
    );

    let response = app.router.oneshot(get_request("/ready")).await.unwrap();

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    let body = body_json(response).await;
    assert_eq!(body["data"]["ready"], false);
    assert_eq!(body["data"]["checks"]["ground_truth"], false);
    assert_eq!(body["data"]["checks"]["leaderboard"], true);
}

#[tokio::test]
async fn test_request_id_is_generated_and_echoed() {
    let app = test_app();

    let response = app
        .router
        .clone()
        .oneshot(get_request("/health"))
        .await
        .unwrap();
    let generated = response.headers().get("x-request-id").unwrap();
    assert!(!generated.is_empty());

    let request = Request::builder()
        .uri("/health")
        .header("x-request-id", "abc-123")
        .body(Body::empty())
        .unwrap();
    let response = app.router.oneshot(request).await.unwrap();
    assert_eq!(response.headers().get("x-request-id").unwrap(), "abc-123");
}

#[tokio::test]
async fn test_submit_scores_and_records() {
    let app = test_app();
    let body = multipart_body(Some("Alpha"), Some(("predictions.csv", BINARY_SUBMISSION_CSV)));

    let response = app
        .router
        .oneshot(upload_request("/api/v1/submissions", body))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Submitted! F1 Score: 0.8000");
    assert_eq!(body["data"]["team_name"], "Alpha");
    assert_eq!(body["data"]["formatted_score"], "0.8000");
    assert_eq!(body["data"]["metric"], "f1");
    assert_eq!(body["data"]["rank"], 1);
    assert_eq!(body["data"]["total_entries"], 1);
    assert_eq!(body["data"]["timestamp"], FIXED_TIMESTAMP);

    let entries = app.store.entries();
    assert_eq!(entries.len(), 1);
    assert!((entries[0].score - BINARY_F1).abs() < 1e-12);
}

#[tokio::test]
async fn test_submit_with_wrong_column_is_rejected() {
    let app = test_app();
    let body = multipart_body(Some("Alpha"), Some(("predictions.csv", WRONG_COLUMN_CSV)));

    let response = app
        .router
        .oneshot(upload_request("/api/v1/submissions", body))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = body_json(response).await;
    assert_eq!(body["error"], "SCHEMA_ERROR");
    assert!(body["message"].as_str().unwrap().contains("'prediction'"));
    assert_eq!(app.store.entry_count(), 0);
}

#[tokio::test]
async fn test_submit_with_short_file_is_rejected() {
    let app = test_app();
    let body = multipart_body(Some("Alpha"), Some(("predictions.csv", SHORT_SUBMISSION_CSV)));

    let response = app
        .router
        .oneshot(upload_request("/api/v1/submissions", body))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = body_json(response).await;
    assert_eq!(body["error"], "VALUE_ERROR");
    assert!(body["message"].as_str().unwrap().contains("[4, 2]"));
    assert_eq!(app.store.entry_count(), 0);
}

#[tokio::test]
async fn test_submit_without_file_is_rejected() {
    let app = test_app();

    let response = app
        .router
        .clone()
        .oneshot(upload_request(
            "/api/v1/submissions",
            multipart_body(Some("Alpha"), None),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error"], "VALIDATION_ERROR");

    // A browser sends an empty, unnamed file part when nothing was chosen
    let response = app
        .router
        .oneshot(upload_request(
            "/api/v1/submissions",
            multipart_body(Some("Alpha"), Some(("", b""))),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(app.store.entry_count(), 0);
}

#[tokio::test]
async fn test_submit_with_blank_team_name_is_rejected() {
    let app = test_app();
    let body = multipart_body(Some("   "), Some(("predictions.csv", BINARY_SUBMISSION_CSV)));

    let response = app
        .router
        .oneshot(upload_request("/api/v1/submissions", body))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"], "VALIDATION_ERROR");
    assert!(body["message"].as_str().unwrap().contains("team_name"));
}

#[tokio::test]
async fn test_submit_over_size_limit_is_rejected() {
    let mut config = AppConfig::default();
    config.server.max_upload_bytes = 16;
    let app = test_app_with(
        config,
        Arc::new(StaticGroundTruthProvider::new(BINARY_TRUTH_CSV)),
        Arc::new(InMemoryLeaderboardStore::new()),
    );
    let body = multipart_body(Some("Alpha"), Some(("predictions.csv", BINARY_SUBMISSION_CSV)));

    let response = app
        .router
        .oneshot(upload_request("/api/v1/submissions", body))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(body_json(response).await["error"], "PAYLOAD_TOO_LARGE");
    assert_eq!(app.store.entry_count(), 0);
}

#[tokio::test]
async fn test_submit_without_ground_truth_is_unavailable() {
    let app = test_app_with(
        AppConfig::default(),
        Arc::new(MissingGroundTruthProvider),
        Arc::new(InMemoryLeaderboardStore::new()),
    );
    let body = multipart_body(Some("Alpha"), Some(("predictions.csv", BINARY_SUBMISSION_CSV)));

    let response = app
        .router
        .oneshot(upload_request("/api/v1/submissions", body))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body_json(response).await["error"], "DATA_UNAVAILABLE");
}

#[tokio::test]
async fn test_leaderboard_is_ranked() {
    let store = Arc::new(InMemoryLeaderboardStore::with_entries(vec![
        create_test_entry("A", 0.5),
        create_test_entry("B", 0.9),
        create_test_entry("C", 0.7),
    ]));
    let app = test_app_with(
        AppConfig::default(),
        Arc::new(StaticGroundTruthProvider::new(BINARY_TRUTH_CSV)),
        store,
    );

    let response = app
        .router
        .clone()
        .oneshot(get_request("/api/v1/leaderboard"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["data"]["metric"], "f1");
    assert_eq!(body["data"]["order"], "higher_is_better");
    assert_eq!(body["data"]["total_entries"], 3);
    let teams: Vec<&str> = body["data"]["entries"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["team_name"].as_str().unwrap())
        .collect();
    assert_eq!(teams, vec!["B", "C", "A"]);

    let response = app
        .router
        .oneshot(get_request("/api/v1/leaderboard?limit=1"))
        .await
        .unwrap();
    let body = body_json(response).await;
    assert_eq!(body["data"]["total_entries"], 3);
    assert_eq!(body["data"]["entries"].as_array().unwrap().len(), 1);
    assert_eq!(body["data"]["entries"][0]["rank"], 1);
}

#[tokio::test]
async fn test_rmse_leaderboard_is_ascending() {
    let mut config = AppConfig::default();
    config.competition.metric = MetricKind::Rmse;
    let store = Arc::new(InMemoryLeaderboardStore::with_entries(vec![
        create_test_entry("A", 2.0),
        create_test_entry("B", 0.5),
    ]));
    let app = test_app_with(
        config,
        Arc::new(StaticGroundTruthProvider::new(REGRESSION_TRUTH_CSV)),
        store,
    );

    let response = app
        .router
        .oneshot(get_request("/api/v1/leaderboard"))
        .await
        .unwrap();
    let body = body_json(response).await;
    assert_eq!(body["data"]["order"], "lower_is_better");
    assert_eq!(body["data"]["entries"][0]["team_name"], "B");
}

#[tokio::test]
async fn test_distribution_endpoint() {
    let store = Arc::new(InMemoryLeaderboardStore::with_entries(vec![
        create_test_entry("A", 0.5),
        create_test_entry("B", 0.9),
        create_test_entry("C", 0.7),
    ]));
    let app = test_app_with(
        AppConfig::default(),
        Arc::new(StaticGroundTruthProvider::new(BINARY_TRUTH_CSV)),
        store,
    );

    let response = app
        .router
        .oneshot(get_request("/api/v1/leaderboard/distribution"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["data"]["sample_size"], 3);
    assert!(body["data"]["bandwidth"].as_f64().unwrap() > 0.0);
    assert_eq!(body["data"]["points"].as_array().unwrap().len(), 200);
}

#[tokio::test]
async fn test_empty_distribution() {
    let app = test_app();

    let response = app
        .router
        .oneshot(get_request("/api/v1/leaderboard/distribution"))
        .await
        .unwrap();

    let body = body_json(response).await;
    assert_eq!(body["data"]["sample_size"], 0);
    assert!(body["data"]["bandwidth"].is_null());
    assert!(body["data"]["points"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_page_renders_empty_board() {
    let app = test_app();

    let response = app.router.oneshot(get_request("/")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response
        .headers()
        .get(header::CONTENT_TYPE)
        .unwrap()
        .to_str()
        .unwrap()
        .starts_with("text/html"));
    let html = body_text(response).await;
    assert!(html.contains("<form method=\"post\" action=\"/submit\""));
    assert!(html.contains("No submissions yet."));
    assert!(!html.contains("<svg"));
}

#[tokio::test]
async fn test_page_submission_shows_banner_and_board() {
    let app = test_app();
    let body = multipart_body(Some("Alpha"), Some(("predictions.csv", BINARY_SUBMISSION_CSV)));

    let response = app
        .router
        .clone()
        .oneshot(upload_request("/submit", body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("Submitted! F1 Score: 0.8000"));
    assert!(html.contains("<td>Alpha</td>"));
    assert!(html.contains("value=\"Alpha\""));

    let perfect = prediction_csv(&["1", "0", "1", "1"]);
    let body = multipart_body(Some("Beta"), Some(("predictions.csv", &perfect)));
    let response = app
        .router
        .oneshot(upload_request("/submit", body))
        .await
        .unwrap();
    let html = body_text(response).await;
    assert!(html.contains("<svg"));
    assert_eq!(app.store.entry_count(), 2);
}

#[tokio::test]
async fn test_page_submission_error_is_shown() {
    let app = test_app();
    let body = multipart_body(Some("Alpha"), Some(("predictions.csv", WRONG_COLUMN_CSV)));

    let response = app
        .router
        .oneshot(upload_request("/submit", body))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let html = body_text(response).await;
    assert!(html.contains("banner error"));
    assert!(html.contains("&#39;prediction&#39;"));
    assert_eq!(app.store.entry_count(), 0);
}
