//! Core notification provider trait and message type.

use std::collections::HashMap;

use async_trait::async_trait;
use serde::Serialize;

use crate::error::AppResult;

/// How the body text should be rendered by the receiving channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum MessageFormat {
    #[default]
    Plain,
    Markdown,
}

/// Message to be sent via notification provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NotificationMessage {
    /// Short subject, used by channels that support one
    pub title: Option<String>,
    pub body: String,
    pub format: MessageFormat,
    /// Structured details for machine consumers (webhook)
    pub metadata: HashMap<String, String>,
    /// Markup-free rendition of a Markdown body
    #[serde(skip)]
    pub plain_body: Option<String>,
}

impl NotificationMessage {
    pub fn plain(body: impl Into<String>) -> Self {
        Self {
            title: None,
            body: body.into(),
            format: MessageFormat::Plain,
            metadata: HashMap::new(),
            plain_body: None,
        }
    }

    /// Body without any markup, for channels that rejected the formatted one
    pub fn plain_text(&self) -> &str {
        self.plain_body.as_deref().unwrap_or(&self.body)
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_metadata(mut self, key: &str, value: impl Into<String>) -> Self {
        self.metadata.insert(key.to_string(), value.into());
        self
    }

    /// A source's marker changed (or was seen for the first time)
    pub fn update_found(display_name: &str, marker: &str, url: &str) -> Self {
        Self {
            format: MessageFormat::Markdown,
            plain_body: Some(format!("🔔 Update: {display_name}\n{marker}\n{url}")),
            ..Self::plain(format!(
                "🔔 Update: *{display_name}*\n`{marker}`\n[Open page]({url})"
            ))
        }
        .with_title(format!("Update: {display_name}"))
        .with_metadata("event", "update_found")
        .with_metadata("name", display_name)
        .with_metadata("marker", marker)
        .with_metadata("url", url)
    }

    /// A source's page could not be fetched
    pub fn fetch_failed(name: &str, cause: &str, url: &str) -> Self {
        Self::plain(format!("❌ [{name}] Error:\n{cause}\n{url}"))
            .with_title(format!("Fetch failed: {name}"))
            .with_metadata("event", "fetch_failed")
            .with_metadata("name", name)
            .with_metadata("error", cause)
            .with_metadata("url", url)
    }

    /// A page was fetched but carries no update marker
    pub fn marker_missing(display_name: &str, url: &str) -> Self {
        Self::plain(format!("⚠️ [{display_name}] Update date not found:\n{url}"))
            .with_title(format!("Marker not found: {display_name}"))
            .with_metadata("event", "marker_missing")
            .with_metadata("name", display_name)
            .with_metadata("url", url)
    }
}

/// Trait for notification channels (chat, webhook, ...)
///
/// Uses `async_trait` to support async methods with dynamic dispatch.
#[async_trait]
pub trait NotificationProvider: Send + Sync {
    /// Delivers one message. Failures are reported to the caller, which
    /// decides whether they matter.
    async fn send(&self, message: &NotificationMessage) -> AppResult<()>;

    /// Provider name for logging
    fn name(&self) -> &'static str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_found_text() {
        let message = NotificationMessage::update_found("Site A", "2024-01-02", "https://a.example");
        assert_eq!(
            message.body,
            "🔔 Update: *Site A*\n`2024-01-02`\n[Open page](https://a.example)"
        );
        assert_eq!(message.format, MessageFormat::Markdown);
        assert_eq!(message.metadata["marker"], "2024-01-02");
        assert_eq!(message.plain_text(), "🔔 Update: Site A\n2024-01-02\nhttps://a.example");
    }

    #[test]
    fn test_plain_message_has_no_separate_plain_text() {
        let message = NotificationMessage::marker_missing("site_a", "https://a.example");
        assert_eq!(message.plain_text(), message.body);
    }

    #[test]
    fn test_fetch_failed_text() {
        let message = NotificationMessage::fetch_failed("SiteA", "timed out", "https://a.example");
        assert_eq!(message.body, "❌ [SiteA] Error:\ntimed out\nhttps://a.example");
        assert_eq!(message.format, MessageFormat::Plain);
    }

    #[test]
    fn test_marker_missing_text() {
        let message = NotificationMessage::marker_missing("Site A", "https://a.example");
        assert_eq!(message.body, "⚠️ [Site A] Update date not found:\nhttps://a.example");
        assert_eq!(message.metadata["event"], "marker_missing");
    }
}
