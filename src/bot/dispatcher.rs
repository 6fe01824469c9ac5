//! Long-poll loop feeding chat commands to the handler.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use super::command::Command;
use super::handler::{CommandHandler, ReplySink};
use crate::error::AppResult;
use crate::external::telegram::types::Update;
use crate::external::telegram::{BotCommand, TelegramClient};

const RETRY_DELAY: Duration = Duration::from_secs(5);

/// Replies into the chat a command came from
struct ChatReply {
    client: TelegramClient,
    chat_id: String,
}

#[async_trait]
impl ReplySink for ChatReply {
    async fn reply(&self, text: &str) {
        if let Err(e) = self.client.send_message(&self.chat_id, text, None).await {
            tracing::warn!(chat_id = %self.chat_id, error = %e, "Failed to send reply");
        }
    }
}

pub struct BotDispatcher {
    client: TelegramClient,
    handler: Arc<CommandHandler>,
    poll_timeout: Duration,
}

impl BotDispatcher {
    pub fn new(client: TelegramClient, handler: Arc<CommandHandler>, poll_timeout: Duration) -> Self {
        Self {
            client,
            handler,
            poll_timeout,
        }
    }

    /// Command list shown in the chat client's menu
    pub fn commands() -> Vec<BotCommand> {
        vec![
            BotCommand::new("start", "Start and help"),
            BotCommand::new("check", "Check all sources for updates"),
            BotCommand::new("setinterval", "Change the check interval (owner only)"),
        ]
    }

    /// Registers the command list, then polls until the task is dropped.
    /// Transport errors are logged and polling resumes after a pause.
    pub async fn run(&self) {
        if let Err(e) = self.client.set_my_commands(&Self::commands()).await {
            tracing::warn!(error = %e, "Failed to register bot commands");
        }
        tracing::info!("Bot dispatcher started");

        let mut offset = None;
        loop {
            match self.poll_once(offset).await {
                Ok(next) => offset = next,
                Err(e) => {
                    tracing::warn!(error = %e, "Polling for updates failed");
                    tokio::time::sleep(RETRY_DELAY).await;
                }
            }
        }
    }

    /// Fetches one batch of updates, dispatches them and returns the offset
    /// for the next poll.
    pub async fn poll_once(&self, offset: Option<i64>) -> AppResult<Option<i64>> {
        let updates = self.client.get_updates(offset, self.poll_timeout).await?;

        let mut next = offset;
        for update in updates {
            // Acknowledge every update, including ones we ignore
            next = Some(next.map_or(update.update_id + 1, |n: i64| n.max(update.update_id + 1)));
            self.dispatch(update);
        }
        Ok(next)
    }

    /// Spawns the handler for a command message; anything else is ignored
    fn dispatch(&self, update: Update) {
        let Some(message) = update.message else {
            return;
        };
        let Some(command) = message.text.as_deref().and_then(Command::parse) else {
            return;
        };

        let handler = self.handler.clone();
        let reply = ChatReply {
            client: self.client.clone(),
            chat_id: message.chat.id.to_string(),
        };
        let caller_id = message.from.map(|user| user.id);

        tokio::spawn(async move {
            handler.handle(command, caller_id, &reply).await;
        });
    }
}
