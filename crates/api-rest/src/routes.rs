//! HTTP route handlers.
//!
//! This module organizes the browser page, health checks and the versioned
//! JSON API.

pub mod health;
pub mod page;
pub mod upload;
pub mod v1;

// Re-export for convenience
pub use health::routes as health_routes;
pub use page::routes as page_routes;
pub use v1::routes as v1_routes;
