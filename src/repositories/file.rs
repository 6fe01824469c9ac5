//! Small filesystem helpers shared by the file-backed repositories.

use std::path::{Path, PathBuf};

use tokio::io::AsyncWriteExt;

use crate::error::{AppError, AppResult};

/// Replaces `path` with `contents` by writing a sibling temp file and renaming
/// it over the target, so a crash never leaves a truncated file behind.
pub(crate) async fn write_atomic(path: &Path, contents: &[u8]) -> AppResult<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| AppError::io(format!("create directory {}", parent.display()), e))?;
    }

    let tmp = temp_path(path);
    let mut file = tokio::fs::File::create(&tmp)
        .await
        .map_err(|e| AppError::io(format!("create {}", tmp.display()), e))?;
    file.write_all(contents)
        .await
        .map_err(|e| AppError::io(format!("write {}", tmp.display()), e))?;
    file.sync_all()
        .await
        .map_err(|e| AppError::io(format!("sync {}", tmp.display()), e))?;
    drop(file);

    tokio::fs::rename(&tmp, path)
        .await
        .map_err(|e| AppError::io(format!("replace {}", path.display()), e))
}

/// Reads a file, mapping "not found" to `None`
pub(crate) async fn read_optional(path: &Path) -> AppResult<Option<Vec<u8>>> {
    match tokio::fs::read(path).await {
        Ok(bytes) => Ok(Some(bytes)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(AppError::io(format!("read {}", path.display()), e)),
    }
}

fn temp_path(path: &Path) -> PathBuf {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    path.with_file_name(format!(".{}.tmp", file_name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_write_atomic_replaces_content_and_cleans_temp() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("state.json");
        tokio::fs::write(&path, b"old content that is longer").await.unwrap();

        write_atomic(&path, b"new").await.unwrap();

        assert_eq!(tokio::fs::read(&path).await.unwrap(), b"new");
        assert!(!temp_path(&path).exists());
    }

    #[tokio::test]
    async fn test_write_atomic_creates_parent_dirs() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("data").join("interval.txt");

        write_atomic(&path, b"30").await.unwrap();

        assert_eq!(tokio::fs::read_to_string(&path).await.unwrap(), "30");
    }

    #[tokio::test]
    async fn test_read_optional_missing_file() {
        let dir = TempDir::new().unwrap();
        let result = read_optional(&dir.path().join("missing.json")).await.unwrap();
        assert!(result.is_none());
    }
}
