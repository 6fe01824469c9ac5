//! Configuration loader for pagewatch
//!
//! This module provides the `ConfigLoader` struct that handles loading
//! configuration from multiple sources with proper precedence.

use std::path::{Path, PathBuf};

use config::{Config, Environment, File, FileFormat};

use crate::config::environment::Environment as AppEnvironment;
use crate::config::error::ConfigError;
use crate::config::settings::Settings;

/// Environment variable for configuration directory
const CONFIG_DIR_ENV: &str = "PAGEWATCH_CONFIG_DIR";

/// Environment variable for specific configuration file
pub const CONFIG_FILE_ENV: &str = "PAGEWATCH_CONFIG_FILE";

/// Default configuration directory
const DEFAULT_CONFIG_DIR: &str = "config";

/// Environment variable prefix for configuration overrides
const ENV_PREFIX: &str = "PAGEWATCH";

/// Separator for nested configuration keys in environment variables
const ENV_SEPARATOR: &str = "__";

/// Plain credential variables read when the layered value is empty
const BOT_TOKEN_ENV: &str = "BOT_TOKEN";
const CHAT_ID_ENV: &str = "CHAT_ID";
const OWNER_ID_ENV: &str = "OWNER_ID";

type Builder = config::ConfigBuilder<config::builder::DefaultState>;

/// Configuration loader that handles layered configuration loading
///
/// The loader supports the following configuration sources (in order of priority):
/// 1. `default.toml` - Base default configuration (required)
/// 2. `{environment}.toml` - Environment-specific configuration (optional)
/// 3. `local.toml` - Local overrides (optional)
/// 4. `PAGEWATCH_*` environment variables (highest priority)
///
/// After layering, empty Telegram credentials are filled from `BOT_TOKEN`,
/// `CHAT_ID` and `OWNER_ID`.
#[derive(Debug)]
pub struct ConfigLoader {
    config_dir: PathBuf,
    /// If set, skips layered loading
    config_file: Option<PathBuf>,
    environment: AppEnvironment,
}

impl ConfigLoader {
    /// Create a new configuration loader from the process environment
    ///
    /// # Errors
    ///
    /// Returns an error if both `PAGEWATCH_CONFIG_DIR` and `PAGEWATCH_CONFIG_FILE`
    /// are set, as they are mutually exclusive.
    pub fn new() -> Result<Self, ConfigError> {
        let config_dir = std::env::var(CONFIG_DIR_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_DIR));

        let config_file = std::env::var(CONFIG_FILE_ENV).ok().map(PathBuf::from);

        if config_file.is_some() && std::env::var(CONFIG_DIR_ENV).is_ok() {
            return Err(ConfigError::mutual_exclusivity(
                "PAGEWATCH_CONFIG_DIR and PAGEWATCH_CONFIG_FILE cannot both be set. \
                 Use PAGEWATCH_CONFIG_DIR for layered configuration or \
                 PAGEWATCH_CONFIG_FILE for a single configuration file.",
            ));
        }

        Ok(Self {
            config_dir,
            config_file,
            environment: AppEnvironment::from_env(),
        })
    }

    /// Loader reading exactly one TOML file (plus env overrides)
    pub fn from_file(path: impl Into<PathBuf>) -> Self {
        Self {
            config_dir: PathBuf::from(DEFAULT_CONFIG_DIR),
            config_file: Some(path.into()),
            environment: AppEnvironment::from_env(),
        }
    }

    /// Replace the environment used to pick the `{environment}.toml` overlay
    pub fn with_environment(mut self, environment: AppEnvironment) -> Self {
        self.environment = environment;
        self
    }

    pub fn environment(&self) -> AppEnvironment {
        self.environment
    }

    /// Load configuration from all sources
    ///
    /// A missing `config/` directory is not an error in layered mode: the
    /// built-in defaults plus environment variables are used instead, which
    /// matches a deployment configured purely through the environment.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - the single configuration file does not exist
    /// - `default.toml` is missing from an existing configuration directory
    /// - parsing or validation fails
    pub fn load(&self) -> Result<Settings, ConfigError> {
        let config = self.build_config()?;
        let mut settings: Settings = config.try_deserialize().map_err(|e| {
            ConfigError::ParseError(format!("Failed to deserialize configuration: {}", e))
        })?;

        apply_credential_fallbacks(&mut settings);
        settings.validate()?;

        Ok(settings)
    }

    fn build_config(&self) -> Result<Config, ConfigError> {
        let builder = Config::builder();

        let builder = if let Some(ref config_file) = self.config_file {
            Self::add_file_source(builder, config_file, true)?
        } else if self.config_dir.is_dir() {
            self.build_layered_config(builder)?
        } else {
            tracing::debug!(
                config_dir = %self.config_dir.display(),
                "Configuration directory not found, using built-in defaults"
            );
            builder
        };

        // PAGEWATCH_MONITOR__STATE_FILE -> monitor.state_file
        let builder = Self::add_env_source(builder);

        builder.build().map_err(ConfigError::from)
    }

    fn build_layered_config(&self, builder: Builder) -> Result<Builder, ConfigError> {
        let default_path = self.config_dir.join("default.toml");
        let builder = Self::add_file_source(builder, &default_path, true)?;

        let env_path = self
            .config_dir
            .join(format!("{}.toml", self.environment.as_str()));
        let builder = Self::add_file_source(builder, &env_path, false)?;

        let local_path = self.config_dir.join("local.toml");
        Self::add_file_source(builder, &local_path, false)
    }

    fn add_file_source(
        builder: Builder,
        path: &Path,
        required: bool,
    ) -> Result<Builder, ConfigError> {
        if required && !path.exists() {
            return Err(ConfigError::file_not_found(format!(
                "Required configuration file not found: {}",
                path.display()
            )));
        }

        Ok(builder.add_source(
            File::new(path.to_str().unwrap_or_default(), FileFormat::Toml).required(required),
        ))
    }

    fn add_env_source(builder: Builder) -> Builder {
        builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator(ENV_SEPARATOR)
                .ignore_empty(true)
                .try_parsing(true),
        )
    }
}

/// Fill empty Telegram credentials from the plain `BOT_TOKEN` / `CHAT_ID` /
/// `OWNER_ID` variables.
fn apply_credential_fallbacks(settings: &mut Settings) {
    let telegram = &mut settings.telegram;
    for (slot, var) in [
        (&mut telegram.bot_token, BOT_TOKEN_ENV),
        (&mut telegram.chat_id, CHAT_ID_ENV),
        (&mut telegram.owner_id, OWNER_ID_ENV),
    ] {
        if slot.is_empty()
            && let Ok(value) = std::env::var(var)
        {
            *slot = value.trim().to_string();
        }
    }
}
