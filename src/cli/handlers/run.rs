//! Run command handler
//!
//! Starts the keep-alive endpoint, the chat bot and the scheduler loop and
//! keeps them running until a shutdown signal arrives.

use std::sync::Arc;
use std::time::Duration;

use crate::bot::{BotDispatcher, CommandHandler};
use crate::config::{Environment, settings::Settings};
use crate::error::AppResult;
use crate::external::telegram::TelegramClient;
use crate::jobs::SchedulerLoop;
use crate::server::{KeepAliveServer, shutdown_signal};
use crate::state::AppState;

/// Handler for the run command
pub struct RunCommandHandler {
    config: Settings,
}

impl RunCommandHandler {
    pub fn new(config: Settings) -> Self {
        Self { config }
    }

    pub async fn execute(self) -> AppResult<()> {
        tracing::info!(
            app_name = %self.config.application.name,
            app_version = %self.config.application.version,
            environment = %Environment::from_env().as_str(),
            "Application starting"
        );
        tracing::info!(
            sources_file = %self.config.monitor.sources_file,
            state_file = %self.config.monitor.state_file,
            interval_file = %self.config.monitor.interval_file,
            fetch_timeout = self.config.monitor.fetch_timeout,
            "Monitor configuration loaded"
        );

        let state = AppState::new(self.config)?;
        tracing::info!(channel = state.services.notifier.channel(), "Notifier configured");

        let mut background = Vec::new();

        let server = &state.settings.server;
        if server.enabled {
            background.push(tokio::spawn(KeepAliveServer::new(server.clone()).run()));
        } else {
            tracing::info!("Keep-alive endpoint disabled");
        }

        match Self::dispatcher(&state) {
            Some(dispatcher) => background.push(tokio::spawn(async move { dispatcher.run().await })),
            None => tracing::warn!("No bot token configured, chat commands are disabled"),
        }

        let scheduler = SchedulerLoop::new(
            state.services.check.clone(),
            Arc::new(state.repositories.interval.clone()),
        );

        tokio::select! {
            _ = scheduler.run() => {}
            _ = shutdown_signal() => {}
        }

        for task in background {
            task.abort();
        }
        tracing::info!("Shutdown complete");
        Ok(())
    }

    fn dispatcher(state: &AppState) -> Option<BotDispatcher> {
        let telegram = &state.settings.telegram;
        if !telegram.has_token() {
            return None;
        }
        if telegram.owner_id.is_empty() {
            tracing::warn!("No owner id configured, /setinterval is refused for everyone");
        }

        let handler = CommandHandler::new(
            state.services.check.clone(),
            state.repositories.interval.clone(),
            telegram.owner_id.clone(),
        );
        Some(BotDispatcher::new(
            TelegramClient::new(&telegram.api_base, &telegram.bot_token),
            Arc::new(handler),
            Duration::from_secs(telegram.poll_timeout),
        ))
    }
}
