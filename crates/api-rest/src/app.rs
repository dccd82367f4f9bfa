//! Application builder.
//!
//! This module assembles all routes, middleware, and state into an Axum
//! router.

use crate::{
    middleware::{logging_middleware, request_id_middleware},
    routes,
    state::AppState,
};
use axum::{extract::DefaultBodyLimit, http::HeaderValue, middleware, Router};
use leaderboard_common::ServerConfig;
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer,
    cors::{AllowOrigin, Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::warn;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Multipart framing overhead allowed on top of the file itself
const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

/// Create the main application router
pub fn create_app(state: AppState) -> Router {
    let server = state.config.server.clone();
    let cors = build_cors_layer(&server);

    let mut app = Router::new()
        // Browser page
        .merge(routes::page::routes())
        // Health check routes
        .merge(routes::health::routes())
        // API v1 routes
        .nest("/api/v1", routes::v1::routes())
        .layer(DefaultBodyLimit::max(
            server.max_upload_bytes.saturating_add(MULTIPART_OVERHEAD_BYTES),
        ))
        .with_state(state);

    if server.enable_swagger {
        app = app.merge(swagger_ui());
    }

    app.layer(
        ServiceBuilder::new()
            // Tracing
            .layer(TraceLayer::new_for_http())
            // Compression
            .layer(CompressionLayer::new())
            // CORS
            .layer(cors)
            // Timeout
            .layer(TimeoutLayer::new(std::time::Duration::from_secs(
                server.request_timeout_seconds,
            )))
            // Custom middleware
            .layer(middleware::from_fn(request_id_middleware))
            .layer(middleware::from_fn(logging_middleware)),
    )
}

/// Build CORS layer from configuration
fn build_cors_layer(config: &ServerConfig) -> CorsLayer {
    let cors = CorsLayer::new().allow_methods(Any).allow_headers(Any);

    if config.cors_allowed_origins.iter().any(|o| o == "*") {
        return cors.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = config
        .cors_allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %origin, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    cors.allow_origin(AllowOrigin::list(origins))
}

/// OpenAPI document for the JSON API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Competition Leaderboard API",
        version = "1.0.0",
        description = "Score prediction files against a hidden ground truth and browse the leaderboard",
        license(name = "MIT"),
    ),
    paths(
        routes::health::health,
        routes::health::ready,
        routes::v1::submissions::create_submission,
        routes::v1::leaderboard::get_leaderboard,
        routes::v1::leaderboard::get_distribution,
    ),
    components(schemas(
        crate::error::ErrorResponse,
        routes::health::HealthResponse,
        routes::health::ReadinessResponse,
        routes::health::ReadinessChecks,
        routes::v1::submissions::SubmissionForm,
        routes::v1::submissions::SubmissionResponse,
        routes::v1::leaderboard::LeaderboardResponse,
        routes::v1::leaderboard::LeaderboardRow,
        routes::v1::leaderboard::DistributionResponse,
        routes::v1::leaderboard::DensityPointResponse,
    )),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "submissions", description = "Prediction submissions"),
        (name = "leaderboard", description = "Leaderboard queries"),
    )
)]
pub struct ApiDoc;

/// Create Swagger UI routes
fn swagger_ui() -> SwaggerUi {
    SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi())
}
