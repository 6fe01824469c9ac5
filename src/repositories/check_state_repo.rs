//! Persisted check state: last-seen marker per source name.

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use super::file::{read_optional, write_atomic};
use crate::error::{AppError, AppResult};
use crate::models::CheckState;

/// Loads and persists the full check state
#[async_trait]
pub trait StateStore: Send + Sync {
    /// Empty state when nothing was persisted yet; `AppError::StateCorrupt`
    /// when the persisted state cannot be parsed.
    async fn load(&self) -> AppResult<CheckState>;

    /// Replaces the persisted state as a whole.
    async fn save(&self, state: &CheckState) -> AppResult<()>;
}

/// State store writing pretty-printed JSON
#[derive(Debug, Clone)]
pub struct JsonStateRepository {
    path: PathBuf,
}

impl JsonStateRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl StateStore for JsonStateRepository {
    async fn load(&self) -> AppResult<CheckState> {
        let Some(bytes) = read_optional(&self.path).await? else {
            tracing::debug!(path = %self.path.display(), "No check state yet, starting empty");
            return Ok(CheckState::new());
        };

        serde_json::from_slice(&bytes).map_err(|e| AppError::StateCorrupt {
            path: self.path.clone(),
            source: e.into(),
        })
    }

    async fn save(&self, state: &CheckState) -> AppResult<()> {
        let bytes = serde_json::to_vec_pretty(state).map_err(|e| AppError::Internal {
            source: e.into(),
        })?;

        write_atomic(&self.path, &bytes).await?;
        tracing::debug!(entries = state.len(), path = %self.path.display(), "Check state saved");
        Ok(())
    }
}
