//! Command executor for dispatching CLI commands
//!
//! This module provides the main entry point for executing CLI commands
//! after parsing and configuration loading.

use super::handlers::{
    CheckCommandHandler, RunCommandHandler, SetIntervalCommandHandler, ValidateCommandHandler,
};
use super::parser::{Cli, Commands};
use crate::config::settings::Settings;
use crate::error::AppResult;

/// Execute a CLI command with the given settings
///
/// No subcommand means `run`.
pub async fn execute_command(cli: &Cli, settings: Settings) -> AppResult<()> {
    match cli.command.clone().unwrap_or(Commands::Run) {
        Commands::Run => RunCommandHandler::new(settings).execute().await,
        Commands::Check { no_notify } => CheckCommandHandler::new(settings)
            .execute(no_notify)
            .await
            .map(|_| ()),
        Commands::SetInterval { minutes } => {
            SetIntervalCommandHandler::new(settings).execute(minutes).await
        }
        Commands::Validate => ValidateCommandHandler::new(settings).execute().await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use tempfile::TempDir;

    fn settings_in(dir: &TempDir) -> Settings {
        let mut settings = Settings::default();
        let path = |name: &str| dir.path().join(name).to_string_lossy().into_owned();
        settings.monitor.sources_file = path("sources.json");
        settings.monitor.state_file = path("last_check.json");
        settings.monitor.interval_file = path("interval.txt");
        settings
    }

    #[tokio::test]
    async fn test_execute_set_interval() {
        let dir = TempDir::new().unwrap();
        let cli = Cli::try_parse_from(["pagewatch", "set-interval", "25"]).unwrap();

        execute_command(&cli, settings_in(&dir)).await.unwrap();

        assert_eq!(
            tokio::fs::read_to_string(dir.path().join("interval.txt")).await.unwrap(),
            "25"
        );
    }

    #[tokio::test]
    async fn test_execute_validate() {
        let dir = TempDir::new().unwrap();
        tokio::fs::write(dir.path().join("sources.json"), "[]").await.unwrap();
        let cli = Cli::try_parse_from(["pagewatch", "validate"]).unwrap();

        assert!(execute_command(&cli, settings_in(&dir)).await.is_ok());
    }

    #[tokio::test]
    async fn test_execute_check_propagates_cycle_error() {
        let dir = TempDir::new().unwrap();
        let cli = Cli::try_parse_from(["pagewatch", "check", "--no-notify"]).unwrap();

        assert!(execute_command(&cli, settings_in(&dir)).await.is_err());
    }
}
