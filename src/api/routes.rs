//! Router configuration for the keep-alive endpoint.

use axum::{Router, middleware};

use crate::api::handlers::liveness::liveness_routes;
use crate::api::middleware::logging_middleware;

/// Creates the keep-alive router with request logging.
///
/// # Routes
/// - `GET /` - returns `message` as plain text
pub fn create_router(message: &str) -> Router {
    liveness_routes(message).layer(middleware::from_fn(logging_middleware))
}
