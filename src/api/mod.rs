//! HTTP layer of the keep-alive endpoint.

pub mod handlers;
pub mod middleware;
pub mod routes;
