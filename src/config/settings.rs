//! Configuration settings structures for pagewatch
//!
//! This module defines all configuration structures that can be loaded from
//! TOML files and environment variables.

use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::config::error::ConfigError;
use crate::logger::{ConsoleConfig, FileConfig, LogFormat, LoggerConfig, RotationConfig};

// ============================================================================
// Default value functions
// ============================================================================

fn default_app_name() -> String {
    "pagewatch".to_string()
}

fn default_app_version() -> String {
    crate::pkg_version().to_string()
}

fn default_true() -> bool {
    true
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_liveness_message() -> String {
    "Bot is running!".to_string()
}

fn default_sources_file() -> String {
    "sources.json".to_string()
}

fn default_state_file() -> String {
    "last_check.json".to_string()
}

fn default_interval_file() -> String {
    "interval.txt".to_string()
}

fn default_interval_minutes() -> u32 {
    15
}

fn default_fetch_timeout() -> u64 {
    10
}

fn default_marker_selector() -> String {
    "div.updatedAtDate".to_string()
}

fn default_name_selector() -> String {
    "div.flx.Fonkartochka h1".to_string()
}

fn default_api_base() -> String {
    "https://api.telegram.org".to_string()
}

fn default_poll_timeout() -> u64 {
    30
}

fn default_webhook_method() -> String {
    "POST".to_string()
}

fn default_webhook_timeout() -> u64 {
    10
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_path() -> String {
    "logs/pagewatch.log".to_string()
}

fn default_log_format() -> String {
    "json".to_string()
}

fn default_max_size() -> u64 {
    10 * 1024 * 1024 // 10MB
}

fn default_max_files() -> usize {
    5
}

// ============================================================================
// Application Configuration
// ============================================================================

/// Application basic information configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Application name
    #[serde(default = "default_app_name")]
    pub name: String,

    /// Application version
    #[serde(default = "default_app_version")]
    pub version: String,
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            name: default_app_name(),
            version: default_app_version(),
        }
    }
}

// ============================================================================
// Keep-alive Server Configuration
// ============================================================================

/// Keep-alive HTTP endpoint configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Whether the keep-alive endpoint is started
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Static body returned by `GET /`
    #[serde(default = "default_liveness_message")]
    pub message: String,
}

impl ServerConfig {
    /// Get the full server address as "host:port"
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            host: default_host(),
            port: default_port(),
            message: default_liveness_message(),
        }
    }
}

// ============================================================================
// Monitor Configuration
// ============================================================================

/// Source list, persisted state and page lookup configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonitorConfig {
    /// JSON file holding the ordered `[{name, url}]` source list
    #[serde(default = "default_sources_file")]
    pub sources_file: String,

    /// JSON file holding the last-seen marker per source name
    #[serde(default = "default_state_file")]
    pub state_file: String,

    /// Text file holding the check interval in minutes
    #[serde(default = "default_interval_file")]
    pub interval_file: String,

    /// Interval used when the interval file is missing or unreadable
    #[serde(default = "default_interval_minutes")]
    pub default_interval_minutes: u32,

    /// Per-page fetch timeout in seconds
    #[serde(default = "default_fetch_timeout")]
    pub fetch_timeout: u64,

    /// CSS selector of the element carrying the update marker
    #[serde(default = "default_marker_selector")]
    pub marker_selector: String,

    /// CSS selector of the element carrying the display name
    #[serde(default = "default_name_selector")]
    pub name_selector: String,
}

impl MonitorConfig {
    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout)
    }
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            sources_file: default_sources_file(),
            state_file: default_state_file(),
            interval_file: default_interval_file(),
            default_interval_minutes: default_interval_minutes(),
            fetch_timeout: default_fetch_timeout(),
            marker_selector: default_marker_selector(),
            name_selector: default_name_selector(),
        }
    }
}

// ============================================================================
// Telegram Configuration
// ============================================================================

/// Chat transport credentials
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TelegramConfig {
    /// Bot API token. Empty disables the command surface.
    #[serde(default)]
    pub bot_token: String,

    /// Chat receiving notifications
    #[serde(default)]
    pub chat_id: String,

    /// Only this user may run `/setinterval`
    #[serde(default)]
    pub owner_id: String,

    /// Bot API base URL
    #[serde(default = "default_api_base")]
    pub api_base: String,

    /// Long-poll timeout in seconds for `getUpdates`
    #[serde(default = "default_poll_timeout")]
    pub poll_timeout: u64,
}

impl TelegramConfig {
    pub fn has_token(&self) -> bool {
        !self.bot_token.is_empty()
    }
}

// The token is a credential, keep it out of debug output.
impl std::fmt::Debug for TelegramConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelegramConfig")
            .field("bot_token_set", &self.has_token())
            .field("chat_id", &self.chat_id)
            .field("owner_id", &self.owner_id)
            .field("api_base", &self.api_base)
            .field("poll_timeout", &self.poll_timeout)
            .finish()
    }
}

impl Default for TelegramConfig {
    fn default() -> Self {
        Self {
            bot_token: String::new(),
            chat_id: String::new(),
            owner_id: String::new(),
            api_base: default_api_base(),
            poll_timeout: default_poll_timeout(),
        }
    }
}

// ============================================================================
// Notifier Configuration
// ============================================================================

/// Where change and error notifications are delivered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum NotifierChannel {
    #[default]
    Telegram,
    Webhook,
    /// Log only, no delivery
    Log,
}

/// Webhook delivery configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebhookConfig {
    #[serde(default)]
    pub url: String,

    #[serde(default = "default_webhook_method")]
    pub method: String,

    #[serde(default = "default_webhook_timeout")]
    pub timeout_seconds: u64,

    #[serde(default)]
    pub headers: HashMap<String, String>,
}

impl Default for WebhookConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            method: default_webhook_method(),
            timeout_seconds: default_webhook_timeout(),
            headers: HashMap::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct NotifierConfig {
    #[serde(default)]
    pub channel: NotifierChannel,

    #[serde(default)]
    pub webhook: WebhookConfig,
}

// ============================================================================
// Logger Settings (compatible with existing LoggerConfig)
// ============================================================================

/// Console output settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsoleSettings {
    /// Whether console output is enabled
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Whether to use colored output
    #[serde(default = "default_true")]
    pub colored: bool,
}

impl Default for ConsoleSettings {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            colored: default_true(),
        }
    }
}

/// Rotation settings for file logging
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RotationSettings {
    /// Maximum file size in bytes before rotation
    #[serde(default = "default_max_size")]
    pub max_size: u64,

    /// Maximum number of rotated files to keep
    #[serde(default = "default_max_files")]
    pub max_files: usize,
}

impl Default for RotationSettings {
    fn default() -> Self {
        Self {
            max_size: default_max_size(),
            max_files: default_max_files(),
        }
    }
}

/// File output settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileSettings {
    /// Whether file output is enabled
    #[serde(default)]
    pub enabled: bool,

    /// Path to the log file
    #[serde(default = "default_log_path")]
    pub path: String,

    /// Whether to append to existing file
    #[serde(default = "default_true")]
    pub append: bool,

    /// Log format: "full", "compact", or "json"
    #[serde(default = "default_log_format")]
    pub format: String,

    #[serde(default)]
    pub rotation: RotationSettings,
}

impl Default for FileSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            path: default_log_path(),
            append: default_true(),
            format: default_log_format(),
            rotation: RotationSettings::default(),
        }
    }
}

/// Logger configuration settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggerSettings {
    /// Log level: "trace", "debug", "info", "warn", "error"
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default)]
    pub console: ConsoleSettings,

    #[serde(default)]
    pub file: FileSettings,
}

impl Default for LoggerSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            console: ConsoleSettings::default(),
            file: FileSettings::default(),
        }
    }
}

impl LoggerSettings {
    /// Convert LoggerSettings to the runtime LoggerConfig
    pub fn into_logger_config(self) -> Result<LoggerConfig, ConfigError> {
        let console = ConsoleConfig::new(self.console.enabled, self.console.colored);
        let file = self.file.into_file_config()?;

        LoggerConfig::new(console, file, self.level).map_err(|e| ConfigError::ValidationError {
            field: "logger".to_string(),
            message: e.to_string(),
        })
    }
}

impl FileSettings {
    /// Convert FileSettings to FileConfig
    pub fn into_file_config(self) -> Result<FileConfig, ConfigError> {
        let format = self
            .format
            .parse::<LogFormat>()
            .map_err(|e| ConfigError::validation("logger.file.format".to_string(), e.to_string()))?;
        let rotation = RotationConfig::new(self.rotation.max_size, self.rotation.max_files);

        FileConfig::new(
            self.enabled,
            PathBuf::from(self.path),
            self.append,
            format,
            rotation,
        )
        .map_err(|e| ConfigError::ValidationError {
            field: "logger.file".to_string(),
            message: e.to_string(),
        })
    }
}

// ============================================================================
// Root Settings
// ============================================================================

/// Root configuration structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Settings {
    #[serde(default)]
    pub application: ApplicationConfig,

    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub monitor: MonitorConfig,

    #[serde(default)]
    pub telegram: TelegramConfig,

    #[serde(default)]
    pub notifier: NotifierConfig,

    #[serde(default)]
    pub logger: LoggerSettings,
}
