//! Notification system with pluggable providers.
//!
//! `Notifier` is what the check cycle talks to; `NotificationProvider`
//! implementations deliver to a concrete channel.

mod notifier;
mod provider;
mod telegram_provider;
mod webhook_provider;

pub use notifier::Notifier;
pub use provider::{MessageFormat, NotificationMessage, NotificationProvider};
pub use telegram_provider::TelegramProvider;
pub use webhook_provider::WebhookProvider;

#[cfg(test)]
pub(crate) use notifier::testing;
