//! Middleware components for request processing.

mod logging;

pub use logging::logging_middleware;
