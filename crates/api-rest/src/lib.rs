//! Competition Leaderboard REST API
//!
//! This crate provides the Axum HTTP surface of the leaderboard: a browser
//! page with the submission form, ranked table and score-distribution chart,
//! and a JSON API over the same service.
//!
//! ## Architecture
//!
//! - **app**: Router assembly and middleware stack
//! - **routes**: HTTP route handlers (page, health, API v1)
//! - **views**: HTML and SVG rendering
//! - **middleware**: Request ID and request logging
//! - **responses**: Standardized response types
//! - **error**: HTTP error handling and conversion
//!
//! ## Usage
//!
//! ```rust,no_run
//! use leaderboard_api_rest::{create_app, AppState};
//! use leaderboard_common::AppConfig;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = AppConfig::load()?;
//!     let app = create_app(AppState::from_config(config));
//!
//!     let listener = tokio::net::TcpListener::bind("0.0.0.0:8080").await?;
//!     axum::serve(listener, app).await?;
//!     Ok(())
//! }
//! ```

#![warn(clippy::all)]

pub mod app;
pub mod error;
pub mod middleware;
pub mod responses;
pub mod routes;
pub mod state;
pub mod views;

// Re-export commonly used types
pub use app::create_app;
pub use error::{ApiError, ApiResult};
pub use state::AppState;
