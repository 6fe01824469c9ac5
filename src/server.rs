//! Keep-alive HTTP server lifecycle and process shutdown signal.

use tokio::net::TcpListener;
use tokio::signal;

use crate::api::routes::create_router;
use crate::config::ServerConfig;

/// Serves the liveness route on its own task.
///
/// It shares nothing with the monitor; failing to bind only loses the
/// endpoint, never the monitor.
pub struct KeepAliveServer {
    config: ServerConfig,
}

impl KeepAliveServer {
    pub fn new(config: ServerConfig) -> Self {
        Self { config }
    }

    /// Runs until the task is dropped. Bind and serve errors are logged.
    pub async fn run(self) {
        let address = self.config.address();
        let listener = match TcpListener::bind(&address).await {
            Ok(listener) => listener,
            Err(e) => {
                tracing::error!(error = %e, address = %address, "Failed to bind keep-alive endpoint");
                return;
            }
        };

        tracing::info!(address = %address, "Keep-alive endpoint listening");

        if let Err(e) = axum::serve(listener, create_router(&self.config.message)).await {
            tracing::error!(error = %e, "Keep-alive endpoint stopped");
        }
    }
}

/// Waits for a shutdown signal (Ctrl+C or SIGTERM).
pub async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, shutting down");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, shutting down");
        }
    }
}
