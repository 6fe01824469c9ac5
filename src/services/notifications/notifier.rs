//! Notification sink used by the check cycle.

use std::sync::Arc;

use super::provider::{NotificationMessage, NotificationProvider};
use super::telegram_provider::TelegramProvider;
use super::webhook_provider::WebhookProvider;
use crate::config::{NotifierChannel, Settings};
use crate::error::AppResult;
use crate::external::telegram::TelegramClient;

/// Logs every message and forwards it to the configured provider, if any.
///
/// Delivery failures are logged and swallowed; callers never depend on a
/// message actually arriving.
#[derive(Clone, Default)]
pub struct Notifier {
    provider: Option<Arc<dyn NotificationProvider>>,
}

impl Notifier {
    pub fn new(provider: Arc<dyn NotificationProvider>) -> Self {
        Self {
            provider: Some(provider),
        }
    }

    /// Log-only notifier
    pub fn disabled() -> Self {
        Self::default()
    }

    /// Builds the notifier for `notifier.channel`.
    ///
    /// A Telegram channel without token or chat id degrades to log-only.
    pub fn from_settings(settings: &Settings) -> AppResult<Self> {
        match settings.notifier.channel {
            NotifierChannel::Telegram => {
                let telegram = &settings.telegram;
                if !telegram.has_token() || telegram.chat_id.is_empty() {
                    tracing::warn!("Telegram token or chat id not configured, notifications are logged only");
                    return Ok(Self::disabled());
                }
                let client = TelegramClient::new(&telegram.api_base, &telegram.bot_token);
                Ok(Self::new(Arc::new(TelegramProvider::new(client, &telegram.chat_id))))
            }
            NotifierChannel::Webhook => Ok(Self::new(Arc::new(WebhookProvider::new(
                settings.notifier.webhook.clone(),
            )?))),
            NotifierChannel::Log => Ok(Self::disabled()),
        }
    }

    /// Name of the delivery channel, `log` when nothing is wired up
    pub fn channel(&self) -> &'static str {
        self.provider.as_ref().map_or("log", |p| p.name())
    }

    pub async fn notify(&self, message: &NotificationMessage) {
        tracing::info!(channel = self.channel(), "{}", message.body);

        let Some(provider) = &self.provider else {
            return;
        };

        if let Err(e) = provider.send(message).await {
            tracing::warn!(
                provider = provider.name(),
                error = %e,
                "Failed to deliver notification"
            );
        }
    }
}


#[cfg(test)]
mod tests {
    use super::testing::RecordingProvider;
    use super::*;

    #[tokio::test]
    async fn test_disabled_notifier_is_a_no_op() {
        let notifier = Notifier::disabled();
        assert_eq!(notifier.channel(), "log");
        notifier.notify(&NotificationMessage::plain("hello")).await;
    }

    #[tokio::test]
    async fn test_forwards_to_provider() {
        let provider = Arc::new(RecordingProvider::default());
        let notifier = Notifier::new(provider.clone());

        notifier.notify(&NotificationMessage::plain("hello")).await;

        assert_eq!(provider.bodies(), vec!["hello".to_string()]);
        assert_eq!(notifier.channel(), "recording");
    }

    #[tokio::test]
    async fn test_delivery_failure_is_swallowed() {
        let provider = Arc::new(RecordingProvider::failing());
        let notifier = Notifier::new(provider.clone());

        notifier.notify(&NotificationMessage::plain("a")).await;
        notifier.notify(&NotificationMessage::plain("b")).await;

        assert_eq!(provider.bodies().len(), 2);
    }

    #[test]
    fn test_channel_selection_from_settings() {
        let mut settings = Settings::default();
        assert_eq!(Notifier::from_settings(&settings).unwrap().channel(), "log");

        settings.telegram.bot_token = "123:abc".to_string();
        settings.telegram.chat_id = "-100".to_string();
        assert_eq!(Notifier::from_settings(&settings).unwrap().channel(), "telegram");

        settings.notifier.channel = NotifierChannel::Log;
        assert_eq!(Notifier::from_settings(&settings).unwrap().channel(), "log");

        settings.notifier.channel = NotifierChannel::Webhook;
        settings.notifier.webhook.url = "https://hooks.example.com/x".to_string();
        assert_eq!(Notifier::from_settings(&settings).unwrap().channel(), "webhook");
    }
}
