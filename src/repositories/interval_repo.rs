//! Check interval persisted as a plain integer (minutes) in a text file.

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use super::file::{read_optional, write_atomic};
use crate::config::{MAX_INTERVAL_MINUTES, MIN_INTERVAL_MINUTES};
use crate::error::{AppError, AppResult};
use crate::jobs::IntervalProvider;

/// File-backed, externally mutable check interval
#[derive(Debug, Clone)]
pub struct IntervalRepository {
    path: PathBuf,
    default_minutes: u32,
}

impl IntervalRepository {
    pub fn new(path: impl Into<PathBuf>, default_minutes: u32) -> Self {
        Self {
            path: path.into(),
            default_minutes: clamp_minutes(i64::from(default_minutes)),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Current interval in minutes.
    ///
    /// Out-of-range values are clamped into [1, 1440]; a missing, unreadable
    /// or non-integer file yields the configured default.
    pub async fn read_minutes(&self) -> u32 {
        let bytes = match read_optional(&self.path).await {
            Ok(Some(bytes)) => bytes,
            Ok(None) => return self.default_minutes,
            Err(e) => {
                tracing::warn!(error = %e, "Interval file unreadable, using default");
                return self.default_minutes;
            }
        };

        match String::from_utf8_lossy(&bytes).trim().parse::<i64>() {
            Ok(minutes) => clamp_minutes(minutes),
            Err(_) => {
                tracing::warn!(
                    path = %self.path.display(),
                    default = self.default_minutes,
                    "Interval file does not hold an integer, using default"
                );
                self.default_minutes
            }
        }
    }

    /// Persists a new interval. Values outside [1, 1440] are rejected without
    /// touching the file.
    pub async fn write_minutes(&self, minutes: u32) -> AppResult<()> {
        validate_minutes(minutes)?;
        write_atomic(&self.path, minutes.to_string().as_bytes()).await?;
        tracing::info!(minutes, "Check interval updated");
        Ok(())
    }
}

#[async_trait]
impl IntervalProvider for IntervalRepository {
    async fn interval_minutes(&self) -> u32 {
        self.read_minutes().await
    }
}

/// Range check shared by the chat command and the CLI
pub fn validate_minutes(minutes: u32) -> AppResult<()> {
    if (MIN_INTERVAL_MINUTES..=MAX_INTERVAL_MINUTES).contains(&minutes) {
        Ok(())
    } else {
        Err(AppError::validation(
            "minutes",
            format!(
                "Interval must be between {} and {} minutes, got {}",
                MIN_INTERVAL_MINUTES, MAX_INTERVAL_MINUTES, minutes
            ),
        ))
    }
}

fn clamp_minutes(minutes: i64) -> u32 {
    minutes.clamp(
        i64::from(MIN_INTERVAL_MINUTES),
        i64::from(MAX_INTERVAL_MINUTES),
    ) as u32
}
