//! Keep-alive endpoint.

use std::sync::Arc;

use axum::{Router, extract::State, routing::get};

/// Static body returned by `GET /`
#[derive(Debug, Clone)]
pub struct LivenessMessage(pub Arc<str>);

/// Creates the liveness route
///
/// # Routes
/// - `GET /` - static confirmation that the process is up
pub fn liveness_routes(message: impl Into<Arc<str>>) -> Router {
    Router::new()
        .route("/", get(liveness))
        .with_state(LivenessMessage(message.into()))
}

async fn liveness(State(LivenessMessage(message)): State<LivenessMessage>) -> String {
    message.to_string()
}
