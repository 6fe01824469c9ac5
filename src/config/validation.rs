//! Configuration validation logic
//!
//! Each section validates its own ranges and formats; `Settings::validate`
//! runs them all and stops at the first failure.

use reqwest::Url;
use scraper::Selector;

use crate::config::error::ConfigError;
use crate::config::settings::{
    LoggerSettings, MonitorConfig, NotifierChannel, NotifierConfig, ServerConfig, Settings,
    TelegramConfig,
};

/// Valid log levels
const VALID_LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Valid log formats
const VALID_LOG_FORMATS: &[&str] = &["full", "compact", "json"];

/// Inclusive bounds of the check interval in minutes
pub const MIN_INTERVAL_MINUTES: u32 = 1;
pub const MAX_INTERVAL_MINUTES: u32 = 1440;

impl Settings {
    /// Validate every configuration section
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.server.validate()?;
        self.monitor.validate()?;
        self.telegram.validate()?;
        self.notifier.validate()?;
        self.logger.validate()?;
        Ok(())
    }
}

impl ServerConfig {
    /// Port must be non-zero and the host non-empty when the endpoint is enabled
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.enabled {
            return Ok(());
        }

        if self.port == 0 {
            return Err(ConfigError::validation(
                "server.port",
                "Port must be between 1 and 65535.",
            ));
        }

        if self.host.trim().is_empty() {
            return Err(ConfigError::validation(
                "server.host",
                "Host cannot be empty when the keep-alive endpoint is enabled.",
            ));
        }

        Ok(())
    }
}

impl MonitorConfig {
    /// Validate monitor configuration
    ///
    /// # Validation Rules
    /// - File paths must not be empty
    /// - Default interval must be within [1, 1440] minutes
    /// - Fetch timeout must be greater than 0
    /// - Both CSS selectors must parse
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("monitor.sources_file", &self.sources_file),
            ("monitor.state_file", &self.state_file),
            ("monitor.interval_file", &self.interval_file),
        ] {
            if value.trim().is_empty() {
                return Err(ConfigError::validation(field, "Path cannot be empty."));
            }
        }

        if !(MIN_INTERVAL_MINUTES..=MAX_INTERVAL_MINUTES).contains(&self.default_interval_minutes)
        {
            return Err(ConfigError::validation(
                "monitor.default_interval_minutes",
                format!(
                    "Interval must be between {} and {} minutes, got {}.",
                    MIN_INTERVAL_MINUTES, MAX_INTERVAL_MINUTES, self.default_interval_minutes
                ),
            ));
        }

        if self.fetch_timeout == 0 {
            return Err(ConfigError::validation(
                "monitor.fetch_timeout",
                "Fetch timeout must be greater than 0 seconds.",
            ));
        }

        validate_selector("monitor.marker_selector", &self.marker_selector)?;
        validate_selector("monitor.name_selector", &self.name_selector)?;

        Ok(())
    }
}

fn validate_selector(field: &str, selector: &str) -> Result<(), ConfigError> {
    Selector::parse(selector)
        .map(|_| ())
        .map_err(|e| ConfigError::validation(field, format!("Invalid CSS selector '{}': {:?}", selector, e)))
}

impl TelegramConfig {
    /// Token and chat id may be empty; the API base must be an http(s) URL
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_http_url("telegram.api_base", &self.api_base)?;

        if self.poll_timeout == 0 {
            return Err(ConfigError::validation(
                "telegram.poll_timeout",
                "Poll timeout must be greater than 0 seconds.",
            ));
        }

        Ok(())
    }
}

impl NotifierConfig {
    /// A webhook channel needs a usable URL and method
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.channel != NotifierChannel::Webhook {
            return Ok(());
        }

        if self.webhook.url.is_empty() {
            return Err(ConfigError::validation(
                "notifier.webhook.url",
                "Webhook URL is required when notifier.channel is \"webhook\".",
            ));
        }
        validate_http_url("notifier.webhook.url", &self.webhook.url)?;

        if self.webhook.method.parse::<reqwest::Method>().is_err() {
            return Err(ConfigError::validation(
                "notifier.webhook.method",
                format!("Invalid HTTP method: {}", self.webhook.method),
            ));
        }

        if self.webhook.timeout_seconds == 0 {
            return Err(ConfigError::validation(
                "notifier.webhook.timeout_seconds",
                "Webhook timeout must be greater than 0 seconds.",
            ));
        }

        Ok(())
    }
}

impl LoggerSettings {
    /// Validate log level, file format and rotation bounds
    pub fn validate(&self) -> Result<(), ConfigError> {
        let level = self.level.to_lowercase();
        if !VALID_LOG_LEVELS.contains(&level.as_str()) {
            return Err(ConfigError::validation(
                "logger.level",
                format!(
                    "Invalid log level '{}'. Valid levels are: {}",
                    self.level,
                    VALID_LOG_LEVELS.join(", ")
                ),
            ));
        }

        if !self.console.enabled && !self.file.enabled {
            return Err(ConfigError::validation(
                "logger",
                "At least one output (console or file) must be enabled.",
            ));
        }

        if self.file.enabled {
            if self.file.path.trim().is_empty() {
                return Err(ConfigError::validation(
                    "logger.file.path",
                    "Log file path cannot be empty when file output is enabled.",
                ));
            }

            let format = self.file.format.to_lowercase();
            if !VALID_LOG_FORMATS.contains(&format.as_str()) {
                return Err(ConfigError::validation(
                    "logger.file.format",
                    format!(
                        "Invalid log format '{}'. Valid formats are: {}",
                        self.file.format,
                        VALID_LOG_FORMATS.join(", ")
                    ),
                ));
            }

            if self.file.rotation.max_size == 0 || self.file.rotation.max_files == 0 {
                return Err(ConfigError::validation(
                    "logger.file.rotation",
                    "Rotation max_size and max_files must be greater than 0.",
                ));
            }
        }

        Ok(())
    }
}

fn validate_http_url(field: &str, value: &str) -> Result<(), ConfigError> {
    let url = Url::parse(value)
        .map_err(|e| ConfigError::validation(field, format!("Invalid URL '{}': {}", value, e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::validation(
            field,
            "URL must use http or https protocol.",
        ));
    }

    Ok(())
}
