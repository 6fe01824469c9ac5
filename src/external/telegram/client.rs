//! Bot API client over the shared HTTP client.

use std::time::Duration;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::json;

use super::types::{ApiResponse, BotCommand, ParseMode, Update};
use crate::error::{AppError, AppResult};
use crate::external::client::HTTP_CLIENT;

const SERVICE: &str = "telegram";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Telegram Bot API client bound to one bot token
#[derive(Clone)]
pub struct TelegramClient {
    client: reqwest::Client,
    endpoint: String,
}

impl TelegramClient {
    pub fn new(api_base: &str, token: &str) -> Self {
        Self::with_client(HTTP_CLIENT.clone(), api_base, token)
    }

    pub fn with_client(client: reqwest::Client, api_base: &str, token: &str) -> Self {
        Self {
            client,
            endpoint: format!("{}/bot{}", api_base.trim_end_matches('/'), token),
        }
    }

    /// Long-polls for updates with `update_id >= offset`
    pub async fn get_updates(&self, offset: Option<i64>, timeout: Duration) -> AppResult<Vec<Update>> {
        let mut payload = json!({
            "timeout": timeout.as_secs(),
            "allowed_updates": ["message"],
        });
        if let Some(offset) = offset {
            payload["offset"] = json!(offset);
        }
        // Leave headroom above the server-side poll timeout
        self.call("getUpdates", &payload, timeout + REQUEST_TIMEOUT).await
    }

    pub async fn send_message(
        &self,
        chat_id: &str,
        text: &str,
        parse_mode: Option<ParseMode>,
    ) -> AppResult<()> {
        let mut payload = json!({
            "chat_id": chat_id,
            "text": text,
            "disable_web_page_preview": true,
        });
        if let Some(mode) = parse_mode {
            payload["parse_mode"] = json!(mode.as_str());
        }

        self.call::<_, serde_json::Value>("sendMessage", &payload, REQUEST_TIMEOUT)
            .await
            .map(|_| ())
    }

    pub async fn set_my_commands(&self, commands: &[BotCommand]) -> AppResult<()> {
        self.call::<_, bool>("setMyCommands", &json!({ "commands": commands }), REQUEST_TIMEOUT)
            .await
            .map(|_| ())
    }

    async fn call<P, R>(&self, method: &str, payload: &P, timeout: Duration) -> AppResult<R>
    where
        P: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let response = self
            .client
            .post(format!("{}/{}", self.endpoint, method))
            .timeout(timeout)
            .json(payload)
            .send()
            .await
            .map_err(|e| api_error(method, "request failed", Some(e.into())))?;

        // Bot API errors carry a JSON body with `ok: false`, whatever the status
        let status = response.status();
        let body: ApiResponse<R> = response
            .json()
            .await
            .map_err(|e| api_error(method, format!("unreadable response ({status})"), Some(e.into())))?;

        match body {
            ApiResponse {
                ok: true,
                result: Some(result),
                ..
            } => Ok(result),
            ApiResponse { description, .. } => Err(api_error(
                method,
                description.unwrap_or_else(|| format!("request rejected ({status})")),
                None,
            )),
        }
    }
}

fn api_error(method: &str, message: impl Into<String>, source: Option<anyhow::Error>) -> AppError {
    AppError::ExternalApi {
        service: SERVICE.to_string(),
        message: format!("{}: {}", method, message.into()),
        source,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{Json, Router, routing::post};
    use serde_json::Value;
    use std::sync::{Arc, Mutex};

    type Captured = Arc<Mutex<Vec<Value>>>;

    /// Fake Bot API answering every method with `reply` and recording payloads
    async fn fake_api(reply: Value) -> (String, Captured) {
        let captured: Captured = Arc::default();
        let sink = captured.clone();
        let router = Router::new().route(
            "/botTOKEN/{method}",
            post(move |Json(payload): Json<Value>| {
                let sink = sink.clone();
                let reply = reply.clone();
                async move {
                    sink.lock().unwrap().push(payload);
                    Json(reply)
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

    fn client(base: &str) -> TelegramClient {
        TelegramClient::with_client(reqwest::Client::new(), base, "TOKEN")
    }

    #[tokio::test]
    async fn test_send_message_payload() {
        let (base, captured) = fake_api(json!({"ok": true, "result": {"message_id": 1}})).await;

        client(&base)
            .send_message("-100", "*hi*", Some(ParseMode::Markdown))
            .await
            .unwrap();
        client(&base).send_message("-100", "plain", None).await.unwrap();

        let payloads = captured.lock().unwrap();
        assert_eq!(payloads[0]["chat_id"], "-100");
        assert_eq!(payloads[0]["parse_mode"], "Markdown");
        assert!(payloads[1].get("parse_mode").is_none());
    }

    #[tokio::test]
    async fn test_get_updates_parses_result() {
        let (base, captured) = fake_api(json!({
            "ok": true,
            "result": [{
                "update_id": 10,
                "message": {"message_id": 1, "chat": {"id": 5}, "from": {"id": 9}, "text": "/start"}
            }]
        }))
        .await;

        let updates = client(&base)
            .get_updates(Some(10), Duration::from_secs(0))
            .await
            .unwrap();
        assert_eq!(updates.len(), 1);
        assert_eq!(updates[0].update_id, 10);
        assert_eq!(captured.lock().unwrap()[0]["offset"], 10);
    }

    #[tokio::test]
    async fn test_rejected_call_is_external_api_error() {
        let (base, _) = fake_api(json!({"ok": false, "description": "Bad Request: chat not found"})).await;

        match client(&base).send_message("1", "x", None).await {
            Err(AppError::ExternalApi { service, message, .. }) => {
                assert_eq!(service, "telegram");
                assert!(message.contains("chat not found"), "{message}");
            }
            other => panic!("Expected ExternalApi error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_set_my_commands_sends_list() {
        let (base, captured) = fake_api(json!({"ok": true, "result": true})).await;

        client(&base)
            .set_my_commands(&[BotCommand::new("check", "Check all sources now")])
            .await
            .unwrap();

        assert_eq!(
            captured.lock().unwrap()[0]["commands"][0]["command"],
            "check"
        );
    }
}
