//! Configuration management module for pagewatch
//!
//! This module provides layered configuration loading with support for:
//! - TOML configuration files
//! - Environment variable overrides
//! - Multiple environment configurations (development, test, staging, production)
//!
//! # Configuration Priority (lowest to highest)
//! 1. `default.toml` - Base default configuration
//! 2. `{environment}.toml` - Environment-specific configuration
//! 3. `local.toml` - Local overrides (not committed to version control)
//! 4. `PAGEWATCH_*` environment variables

pub mod environment;
pub mod error;
pub mod loader;
pub mod settings;
pub mod validation;

pub use environment::Environment;
pub use loader::ConfigLoader;
pub use settings::{
    MonitorConfig, NotifierChannel, NotifierConfig, ServerConfig, Settings, TelegramConfig,
    WebhookConfig,
};
pub use validation::{MAX_INTERVAL_MINUTES, MIN_INTERVAL_MINUTES};
