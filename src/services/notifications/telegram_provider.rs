//! Delivers notifications to a Telegram chat.

use async_trait::async_trait;

use super::provider::{MessageFormat, NotificationMessage, NotificationProvider};
use crate::error::{AppError, AppResult};
use crate::external::telegram::{ParseMode, TelegramClient};

pub struct TelegramProvider {
    client: TelegramClient,
    chat_id: String,
}

impl TelegramProvider {
    pub fn new(client: TelegramClient, chat_id: impl Into<String>) -> Self {
        Self {
            client,
            chat_id: chat_id.into(),
        }
    }
}

#[async_trait]
impl NotificationProvider for TelegramProvider {
    /// Markdown the Bot API refuses to parse (page text with `_`, `*` or
    /// backticks) is resent as plain text.
    async fn send(&self, message: &NotificationMessage) -> AppResult<()> {
        if message.format == MessageFormat::Plain {
            return self.client.send_message(&self.chat_id, &message.body, None).await;
        }

        match self
            .client
            .send_message(&self.chat_id, &message.body, Some(ParseMode::Markdown))
            .await
        {
            Err(e) if is_markup_rejection(&e) => {
                tracing::warn!(error = %e, "Markdown rejected, resending as plain text");
                self.client
                    .send_message(&self.chat_id, message.plain_text(), None)
                    .await
            }
            result => result,
        }
    }

    fn name(&self) -> &'static str {
        "telegram"
    }
}

fn is_markup_rejection(error: &AppError) -> bool {
    matches!(error, AppError::ExternalApi { message, .. } if message.contains("can't parse entities"))
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::{Json, Router, routing::post};
    use serde_json::{Value, json};

    use super::*;

    type Captured = Arc<Mutex<Vec<Value>>>;

    /// Fake Bot API refusing any Markdown body that contains an underscore
    async fn fake_api() -> (String, Captured) {
        let captured: Captured = Arc::default();
        let sink = captured.clone();
        let router = Router::new().route(
            "/botT/sendMessage",
            post(move |Json(payload): Json<Value>| {
                let sink = sink.clone();
                async move {
                    sink.lock().unwrap().push(payload.clone());
                    let markdown = payload.get("parse_mode").is_some();
                    let text = payload["text"].as_str().unwrap_or_default();
                    if markdown && text.contains('_') {
                        Json(json!({
                            "ok": false,
                            "description": "Bad Request: can't parse entities: Can't find end of the entity"
                        }))
                    } else {
                        Json(json!({"ok": true, "result": {"message_id": 1}}))
                    }
                }
            }),
        );

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        (format!("http://{addr}"), captured)
    }

    fn provider(base: &str) -> TelegramProvider {
        TelegramProvider::new(
            TelegramClient::with_client(reqwest::Client::new(), base, "T"),
            "-100",
        )
    }

    #[tokio::test]
    async fn test_update_with_underscore_name_is_still_delivered() {
        let (base, captured) = fake_api().await;
        let message =
            NotificationMessage::update_found("site_a", "12.05.2024", "https://a.example/x_y");

        provider(&base).send(&message).await.unwrap();

        let payloads = captured.lock().unwrap();
        assert_eq!(payloads.len(), 2);
        assert_eq!(payloads[0]["parse_mode"], "Markdown");
        assert!(payloads[1].get("parse_mode").is_none());
        let text = payloads[1]["text"].as_str().unwrap();
        assert!(text.contains("site_a"));
        assert!(text.contains("12.05.2024"));
        assert!(text.contains("https://a.example/x_y"));
    }

    #[tokio::test]
    async fn test_accepted_markdown_is_sent_once() {
        let (base, captured) = fake_api().await;
        let message = NotificationMessage::update_found("Site A", "12.05.2024", "https://a.example");

        provider(&base).send(&message).await.unwrap();

        let payloads = captured.lock().unwrap();
        assert_eq!(payloads.len(), 1);
        assert_eq!(payloads[0]["text"], message.body);
    }

    #[tokio::test]
    async fn test_plain_message_skips_parse_mode() {
        let (base, captured) = fake_api().await;
        let message = NotificationMessage::fetch_failed("site_a", "timed out", "https://a.example");

        provider(&base).send(&message).await.unwrap();

        let payloads = captured.lock().unwrap();
        assert_eq!(payloads.len(), 1);
        assert!(payloads[0].get("parse_mode").is_none());
    }
}
