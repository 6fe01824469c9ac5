//! Command execution and reply texts.

use std::sync::Arc;

use async_trait::async_trait;

use super::command::Command;
use crate::error::{AppError, AppResult};
use crate::repositories::{IntervalRepository, validate_minutes};
use crate::services::CheckService;

const HELP_TEXT: &str = "✅ Bot is running.\n\
Commands:\n\
/check - check all sources for updates\n\
/setinterval <min> - change the check interval (owner only)";
const CHECK_STARTED: &str = "🔍 Checking all sources...";
const NOT_ALLOWED: &str = "🚫 You are not allowed to change the interval.";
const USAGE_SETINTERVAL: &str = "⚠️ Usage: /setinterval <minutes>";

/// Where replies to the invoking chat go
#[async_trait]
pub trait ReplySink: Send + Sync {
    async fn reply(&self, text: &str);
}

/// Executes parsed commands on behalf of a chat user
pub struct CommandHandler {
    checks: Arc<CheckService>,
    interval: IntervalRepository,
    owner_id: String,
}

impl CommandHandler {
    pub fn new(checks: Arc<CheckService>, interval: IntervalRepository, owner_id: impl Into<String>) -> Self {
        Self {
            checks,
            interval,
            owner_id: owner_id.into(),
        }
    }

    pub async fn handle(&self, command: Command, caller_id: Option<i64>, reply: &dyn ReplySink) {
        tracing::info!(command = command.name(), caller = ?caller_id, "Handling command");

        match command {
            Command::Start => reply.reply(HELP_TEXT).await,
            Command::Check => self.check(reply).await,
            Command::SetInterval(argument) => {
                let text = match self.set_interval(caller_id, argument.as_deref()).await {
                    Ok(minutes) => format!("✅ Check interval set to {minutes} minutes."),
                    Err(AppError::Unauthorized { .. }) => NOT_ALLOWED.to_string(),
                    Err(AppError::Validation { .. }) => USAGE_SETINTERVAL.to_string(),
                    Err(e) => {
                        tracing::error!(error = %e, "Failed to store interval");
                        format!("❌ Could not save the interval: {e}")
                    }
                };
                reply.reply(&text).await;
            }
        }
    }

    async fn check(&self, reply: &dyn ReplySink) {
        reply.reply(CHECK_STARTED).await;

        let text = match self.checks.run_summary().await {
            Ok(summary) => summary.to_string(),
            Err(e) => {
                tracing::error!(error = %e, "Manual check failed");
                format!("❌ Check failed: {e}")
            }
        };
        reply.reply(&text).await;
    }

    /// Owner check first, then argument validation; nothing is written on
    /// either failure.
    async fn set_interval(&self, caller_id: Option<i64>, argument: Option<&str>) -> AppResult<u32> {
        self.authorize(caller_id)?;
        let minutes = parse_minutes(argument)?;
        self.interval.write_minutes(minutes).await?;
        Ok(minutes)
    }

    fn authorize(&self, caller_id: Option<i64>) -> AppResult<()> {
        let allowed = !self.owner_id.is_empty()
            && caller_id.is_some_and(|id| id.to_string() == self.owner_id);

        if allowed {
            Ok(())
        } else {
            tracing::warn!(caller = ?caller_id, "Rejected interval change from non-owner");
            Err(AppError::Unauthorized {
                message: "only the owner may change the interval".to_string(),
            })
        }
    }
}

fn parse_minutes(argument: Option<&str>) -> AppResult<u32> {
    let raw = argument.ok_or_else(|| AppError::validation("minutes", "missing argument"))?;
    let minutes = raw
        .parse::<u32>()
        .map_err(|_| AppError::validation("minutes", format!("'{raw}' is not a whole number")))?;
    validate_minutes(minutes)?;
    Ok(minutes)
}
