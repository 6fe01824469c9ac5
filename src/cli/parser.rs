//! CLI argument parsing with clap
//!
//! This module defines the command-line interface structure using clap,
//! including all commands, arguments, and their documentation.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Watches web pages for a changed "updated at" marker
#[derive(Parser, Debug)]
#[command(name = "pagewatch")]
#[command(about = "Watches web pages for a changed \"updated at\" marker")]
#[command(long_about = "
pagewatch periodically fetches a list of pages, extracts an \"updated at\"
marker from each one and reports changes to a chat. It also answers chat
commands (/check, /setinterval) and serves a keep-alive endpoint.

EXAMPLES:
    # Run the monitor, bot and keep-alive endpoint
    pagewatch

    # Run one check cycle and print the summary
    pagewatch check

    # Check without sending notifications
    pagewatch check --no-notify

    # Change the check interval to 30 minutes
    pagewatch set-interval 30

    # Validate configuration without starting anything
    pagewatch --config /etc/pagewatch/config.toml validate
")]
#[command(version = crate::clap_long_version())]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Configuration file path
    ///
    /// Use a single TOML file instead of the layered `config/` directory.
    /// The file must exist and be readable.
    #[arg(short, long, value_name = "FILE", value_parser = super::validation::validate_config_file_path)]
    pub config: Option<PathBuf>,

    /// Override environment detection
    ///
    /// Selects which `config/{environment}.toml` overlay is loaded.
    #[arg(short, long, value_enum)]
    pub env: Option<Environment>,

    /// Enable verbose logging (debug level)
    #[arg(short, long)]
    pub verbose: bool,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Run the scheduler, chat bot and keep-alive endpoint (default)
    Run,

    /// Run one check cycle, print the summary and exit
    Check {
        /// Log notifications instead of delivering them
        #[arg(long)]
        no_notify: bool,
    },

    /// Store a new check interval in minutes (1-1440)
    SetInterval {
        #[arg(value_name = "MINUTES", value_parser = super::validation::validate_interval_minutes)]
        minutes: u32,
    },

    /// Validate configuration and exit
    Validate,
}

/// Environment options
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Environment {
    #[value(name = "development", alias = "dev")]
    Development,
    #[value(name = "test")]
    Test,
    #[value(name = "staging", alias = "stage")]
    Staging,
    #[value(name = "production", alias = "prod")]
    Production,
}

impl From<Environment> for crate::config::Environment {
    fn from(env: Environment) -> Self {
        match env {
            Environment::Development => crate::config::Environment::Development,
            Environment::Test => crate::config::Environment::Test,
            Environment::Staging => crate::config::Environment::Staging,
            Environment::Production => crate::config::Environment::Production,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_version_flag() {
        let err = Cli::try_parse_from(["pagewatch", "--version"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayVersion);
    }

    #[test]
    fn test_default_behavior() {
        let cli = Cli::try_parse_from(["pagewatch"]).unwrap();
        assert!(cli.command.is_none());
        assert!(!cli.verbose);
        assert!(!cli.quiet);
        assert!(cli.config.is_none());
    }

    #[test]
    fn test_check_command() {
        let cli = Cli::try_parse_from(["pagewatch", "check", "--no-notify"]).unwrap();
        assert_eq!(cli.command, Some(Commands::Check { no_notify: true }));
    }

    #[test]
    fn test_set_interval_command() {
        let cli = Cli::try_parse_from(["pagewatch", "set-interval", "45"]).unwrap();
        assert_eq!(cli.command, Some(Commands::SetInterval { minutes: 45 }));
    }

    #[test]
    fn test_set_interval_out_of_range() {
        for value in ["0", "1441", "abc"] {
            let err = Cli::try_parse_from(["pagewatch", "set-interval", value]).unwrap_err();
            assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation, "{value}");
        }
    }

    #[test]
    fn test_env_alias() {
        let cli = Cli::try_parse_from(["pagewatch", "--env", "prod", "validate"]).unwrap();
        assert_eq!(cli.env, Some(Environment::Production));
        assert_eq!(cli.command, Some(Commands::Validate));
    }

    #[test]
    fn test_conflicting_verbose_quiet() {
        let err = Cli::try_parse_from(["pagewatch", "--verbose", "--quiet"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ArgumentConflict);
    }
}
