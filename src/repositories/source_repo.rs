//! Source registry backed by a JSON file.
//!
//! The file holds an ordered array of `{"name": ..., "url": ...}` records.
//! It is re-read on every call so edits take effect on the next cycle.

use std::collections::HashSet;
use std::path::PathBuf;

use async_trait::async_trait;
use validator::Validate;

use super::file::read_optional;
use crate::error::{AppError, AppResult};
use crate::models::SourceDescriptor;

const SOURCES_KEY: &str = "monitor.sources_file";

/// Provides the ordered list of monitored sources
#[async_trait]
pub trait SourceRegistry: Send + Sync {
    /// Fails with `AppError::Configuration` when the list is missing or malformed.
    async fn load_sources(&self) -> AppResult<Vec<SourceDescriptor>>;
}

/// Source registry reading a JSON file
#[derive(Debug, Clone)]
pub struct JsonSourceRepository {
    path: PathBuf,
}

impl JsonSourceRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn malformed(&self, reason: impl std::fmt::Display) -> AppError {
        AppError::configuration(
            SOURCES_KEY,
            anyhow::anyhow!("{}: {}", self.path.display(), reason),
        )
    }
}

#[async_trait]
impl SourceRegistry for JsonSourceRepository {
    async fn load_sources(&self) -> AppResult<Vec<SourceDescriptor>> {
        let bytes = read_optional(&self.path)
            .await
            .map_err(|e| self.malformed(e))?
            .ok_or_else(|| self.malformed("source list not found"))?;

        let sources: Vec<SourceDescriptor> =
            serde_json::from_slice(&bytes).map_err(|e| self.malformed(e))?;

        let mut seen = HashSet::new();
        for (index, source) in sources.iter().enumerate() {
            source
                .validate()
                .map_err(|e| self.malformed(format!("source #{}: {}", index + 1, e)))?;

            if !seen.insert(source.name.as_str()) {
                return Err(self.malformed(format!("duplicate source name '{}'", source.name)));
            }
        }

        tracing::debug!(count = sources.len(), path = %self.path.display(), "Sources loaded");
        Ok(sources)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    async fn repo_with(contents: &str) -> (TempDir, JsonSourceRepository) {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("sources.json");
        tokio::fs::write(&path, contents).await.unwrap();
        (dir, JsonSourceRepository::new(path))
    }

    fn assert_configuration_error(result: AppResult<Vec<SourceDescriptor>>) {
        match result {
            Err(AppError::Configuration { key, .. }) => assert_eq!(key, SOURCES_KEY),
            other => panic!("Expected Configuration error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_loads_sources_in_file_order() {
        let (_dir, repo) = repo_with(
            r#"[
                {"name": "Zeta", "url": "https://example.com/z"},
                {"name": "Alpha", "url": "https://example.com/a", "note": "ignored"}
            ]"#,
        )
        .await;

        let sources = repo.load_sources().await.unwrap();
        assert_eq!(
            sources,
            vec![
                SourceDescriptor::new("Zeta", "https://example.com/z"),
                SourceDescriptor::new("Alpha", "https://example.com/a"),
            ]
        );
    }

    #[tokio::test]
    async fn test_missing_file_is_configuration_error() {
        let dir = TempDir::new().unwrap();
        let repo = JsonSourceRepository::new(dir.path().join("sources.json"));
        assert_configuration_error(repo.load_sources().await);
    }

    #[tokio::test]
    async fn test_not_a_list_is_configuration_error() {
        let (_dir, repo) = repo_with(r#"{"name": "SiteA", "url": "https://example.com"}"#).await;
        assert_configuration_error(repo.load_sources().await);
    }

    #[tokio::test]
    async fn test_record_without_url_is_configuration_error() {
        let (_dir, repo) = repo_with(r#"[{"name": "SiteA"}]"#).await;
        assert_configuration_error(repo.load_sources().await);
    }

    #[tokio::test]
    async fn test_empty_name_is_configuration_error() {
        let (_dir, repo) = repo_with(r#"[{"name": "", "url": "https://example.com"}]"#).await;
        assert_configuration_error(repo.load_sources().await);
    }

    #[tokio::test]
    async fn test_duplicate_names_rejected() {
        let (_dir, repo) = repo_with(
            r#"[
                {"name": "SiteA", "url": "https://example.com/1"},
                {"name": "SiteA", "url": "https://example.com/2"}
            ]"#,
        )
        .await;
        assert_configuration_error(repo.load_sources().await);
    }

    #[tokio::test]
    async fn test_empty_list_is_allowed() {
        let (_dir, repo) = repo_with("[]").await;
        assert!(repo.load_sources().await.unwrap().is_empty());
    }
}
