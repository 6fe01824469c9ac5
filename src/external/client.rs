use std::sync::LazyLock;
use std::time::Duration;

use super::user_agent::random_user_agent;

/// Process-wide HTTP client shared by the page fetcher, the Telegram client
/// and the webhook provider.
///
/// No client-wide request timeout is set: page fetches, long polls and
/// webhook calls each set their own per request.
pub static HTTP_CLIENT: LazyLock<reqwest::Client> = LazyLock::new(|| {
    reqwest::Client::builder()
        .connect_timeout(Duration::from_secs(10))
        // Connection pooling
        .pool_max_idle_per_host(10)
        .pool_idle_timeout(Duration::from_secs(90))
        // Compression
        .gzip(true)
        .deflate(true)
        .brotli(true)
        .cookie_store(true)
        .user_agent(random_user_agent())
        .build()
        .expect("Failed to build HTTP client")
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_initialization() {
        let _ = &*HTTP_CLIENT;
    }
}
