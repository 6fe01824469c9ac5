//! Logging middleware for request/response tracing.

use axum::{extract::Request, middleware::Next, response::Response};
use std::time::Instant;
use tracing::{Level, info, span};

/// Middleware that logs method, path, status and duration of each request.
pub async fn logging_middleware(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();

    let span = span!(Level::INFO, "http_request", method = %method, uri = %uri);
    let _enter = span.enter();

    let start = Instant::now();
    let response = next.run(request).await;

    info!(
        method = %method,
        path = %uri.path(),
        status = %response.status().as_u16(),
        duration_ms = %start.elapsed().as_millis(),
        "Request served"
    );

    response
}
