use std::path::PathBuf;

use thiserror::Error;

use crate::config::error::ConfigError;

/// Application-wide error type that represents all possible errors in the system.
///
/// Cycle-level failures (`Configuration`, `StateCorrupt`) abort a check cycle
/// before any page is fetched. Per-source failures (`Fetch`) are converted into
/// check outcomes by the caller and never abort a cycle. Command-level failures
/// (`Unauthorized`, `Validation`) are turned into user-visible replies.
#[derive(Error, Debug)]
pub enum AppError {
    /// Missing or malformed configuration, including the source list
    #[error("Configuration error: {key}")]
    Configuration {
        key: String,
        #[source]
        source: anyhow::Error,
    },

    /// Persisted check state exists but cannot be parsed
    #[error("Check state at {} is corrupt", path.display())]
    StateCorrupt {
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },

    /// Page could not be fetched (network error, non-2xx status or timeout)
    #[error("Failed to fetch {url}: {source}")]
    Fetch {
        url: String,
        #[source]
        source: anyhow::Error,
    },

    /// Caller is not allowed to perform the operation
    #[error("Unauthorized: {message}")]
    Unauthorized { message: String },

    /// Validation error with field-specific details
    #[error("Validation failed for {field}: {reason}")]
    Validation { field: String, reason: String },

    /// Third-party API call failed (chat transport, webhook)
    #[error("External API error ({service}): {message}")]
    ExternalApi {
        service: String,
        message: String,
        #[source]
        source: Option<anyhow::Error>,
    },

    /// Filesystem operation failed
    #[error("I/O error: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    /// Internal error for unexpected failures
    #[error("Internal error")]
    Internal {
        #[source]
        source: anyhow::Error,
    },
}

impl AppError {
    /// Builds a `Configuration` error from a key and a displayable cause
    pub fn configuration(key: impl Into<String>, source: impl Into<anyhow::Error>) -> Self {
        AppError::Configuration {
            key: key.into(),
            source: source.into(),
        }
    }

    /// Builds a `Validation` error
    pub fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        AppError::Validation {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Builds an `Io` error with a short description of the failed operation
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        AppError::Io {
            context: context.into(),
            source,
        }
    }
}

impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        AppError::Internal { source: error }
    }
}

impl From<ConfigError> for AppError {
    fn from(error: ConfigError) -> Self {
        let key = match &error {
            ConfigError::ValidationError { field, .. } => field.clone(),
            _ => "settings".to_string(),
        };
        AppError::Configuration {
            key,
            source: error.into(),
        }
    }
}

/// Type alias for Result with AppError to simplify function signatures
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_error_mentions_url() {
        let err = AppError::Fetch {
            url: "https://example.com/a".to_string(),
            source: anyhow::anyhow!("operation timed out"),
        };
        let text = err.to_string();
        assert!(text.contains("https://example.com/a"));
        assert!(text.contains("operation timed out"));
    }

    #[test]
    fn test_config_validation_error_keeps_field_as_key() {
        let err: AppError = ConfigError::validation("server.port", "Port must not be 0").into();
        match err {
            AppError::Configuration { key, .. } => assert_eq!(key, "server.port"),
            other => panic!("Expected Configuration error, got {other:?}"),
        }
    }

    #[test]
    fn test_state_corrupt_display() {
        let err = AppError::StateCorrupt {
            path: PathBuf::from("last_check.json"),
            source: anyhow::anyhow!("expected value at line 1"),
        };
        assert_eq!(err.to_string(), "Check state at last_check.json is corrupt");
    }
}
