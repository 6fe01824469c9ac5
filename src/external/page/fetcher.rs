//! Page retrieval over HTTP.

use std::time::Duration;

use async_trait::async_trait;

use crate::error::{AppError, AppResult};
use crate::external::client::HTTP_CLIENT;

/// Retrieves the raw document behind a source URL
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// One attempt, no retries. Any network error, non-2xx status or
    /// timeout is reported as `AppError::Fetch`.
    async fn fetch(&self, url: &str) -> AppResult<String>;
}

/// `PageFetcher` using the shared HTTP client with a per-request timeout
#[derive(Debug, Clone)]
pub struct HttpPageFetcher {
    client: reqwest::Client,
    timeout: Duration,
}

impl HttpPageFetcher {
    pub fn new(timeout: Duration) -> Self {
        Self::with_client(HTTP_CLIENT.clone(), timeout)
    }

    pub fn with_client(client: reqwest::Client, timeout: Duration) -> Self {
        Self { client, timeout }
    }

    async fn get(&self, url: &str) -> reqwest::Result<String> {
        self.client
            .get(url)
            .timeout(self.timeout)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await
    }
}

#[async_trait]
impl PageFetcher for HttpPageFetcher {
    async fn fetch(&self, url: &str) -> AppResult<String> {
        tracing::debug!(url = %url, timeout = ?self.timeout, "Fetching page");

        self.get(url).await.map_err(|e| AppError::Fetch {
            url: url.to_string(),
            source: e.into(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{Router, http::StatusCode, routing::get};

    /// Serves a small router on an ephemeral local port
    async fn serve(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{addr}")
    }

    fn fetcher(timeout: Duration) -> HttpPageFetcher {
        HttpPageFetcher::with_client(reqwest::Client::new(), timeout)
    }

    #[tokio::test]
    async fn test_fetch_returns_body() {
        let base = serve(Router::new().route("/page", get(|| async { "<h1>hello</h1>" }))).await;

        let body = fetcher(Duration::from_secs(5))
            .fetch(&format!("{base}/page"))
            .await
            .unwrap();
        assert_eq!(body, "<h1>hello</h1>");
    }

    #[tokio::test]
    async fn test_non_success_status_is_fetch_error() {
        let base = serve(Router::new().route(
            "/gone",
            get(|| async { (StatusCode::NOT_FOUND, "missing") }),
        ))
        .await;
        let url = format!("{base}/gone");

        match fetcher(Duration::from_secs(5)).fetch(&url).await {
            Err(AppError::Fetch { url: failed, .. }) => assert_eq!(failed, url),
            other => panic!("Expected Fetch error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_slow_response_times_out() {
        let base = serve(Router::new().route(
            "/slow",
            get(|| async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                "late"
            }),
        ))
        .await;

        let result = fetcher(Duration::from_millis(100))
            .fetch(&format!("{base}/slow"))
            .await;
        assert!(matches!(result, Err(AppError::Fetch { .. })));
    }

    #[tokio::test]
    async fn test_unreachable_host_is_fetch_error() {
        // Bind and drop to get a port with nothing listening
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let result = fetcher(Duration::from_secs(2))
            .fetch(&format!("http://{addr}/"))
            .await;
        assert!(matches!(result, Err(AppError::Fetch { .. })));
    }
}
