//! Webhook notification provider.
//!
//! Posts `{title, body, format, metadata}` as JSON using the global HTTP_CLIENT.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Method;
use serde_json::json;

use super::provider::{NotificationMessage, NotificationProvider};
use crate::config::WebhookConfig;
use crate::error::{AppError, AppResult};
use crate::external::client::HTTP_CLIENT;

pub struct WebhookProvider {
    config: WebhookConfig,
    method: Method,
    client: reqwest::Client,
}

impl WebhookProvider {
    /// Fails with `Validation` when the configured HTTP method is invalid
    pub fn new(config: WebhookConfig) -> AppResult<Self> {
        Self::with_client(HTTP_CLIENT.clone(), config)
    }

    pub fn with_client(client: reqwest::Client, config: WebhookConfig) -> AppResult<Self> {
        let method = config
            .method
            .to_uppercase()
            .parse()
            .map_err(|_| AppError::validation("notifier.webhook.method", format!("Invalid HTTP method: {}", config.method)))?;

        Ok(Self {
            config,
            method,
            client,
        })
    }

    fn failure(&self, message: String, source: Option<anyhow::Error>) -> AppError {
        AppError::ExternalApi {
            service: self.name().to_string(),
            message,
            source,
        }
    }
}

#[async_trait]
impl NotificationProvider for WebhookProvider {
    async fn send(&self, message: &NotificationMessage) -> AppResult<()> {
        let mut request = self
            .client
            .request(self.method.clone(), &self.config.url)
            .timeout(Duration::from_secs(self.config.timeout_seconds))
            .json(&json!({
                "title": message.title,
                "body": message.body,
                "format": message.format,
                "metadata": message.metadata,
            }));

        for (key, value) in &self.config.headers {
            request = request.header(key, value);
        }

        let response = request
            .send()
            .await
            .map_err(|e| self.failure("request failed".to_string(), Some(e.into())))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(self.failure(format!("endpoint returned {}: {}", status, body), None));
        }

        Ok(())
    }

    fn name(&self) -> &'static str {
        "webhook"
    }
}
