//! Local filesystem implementation of the FileStorage port.
//!
//! Files live flat in one upload directory under generated names of the
//! form `{epoch_millis}-{uuid}{.ext}`.

use async_trait::async_trait;
use chrono::Utc;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use uuid::Uuid;

use crate::ports::{FileStorage, StorageError};

/// Flat upload directory on the local disk.
///
/// # Atomic Writes
///
/// Content is written to `{name}.tmp`, synced, then renamed into place, so
/// readers never observe a partially written file.
#[derive(Debug, Clone)]
pub struct LocalFileStorage {
    base_path: PathBuf,
}

impl LocalFileStorage {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Generates a unique name, keeping the lower-cased extension of the
    /// client file name.
    fn generate_name(original_name: Option<&str>) -> String {
        let extension = original_name
            .and_then(|name| Path::new(name).extension())
            .and_then(|ext| ext.to_str())
            .filter(|ext| !ext.is_empty() && ext.chars().all(|c| c.is_ascii_alphanumeric()))
            .map(|ext| format!(".{}", ext.to_ascii_lowercase()))
            .unwrap_or_default();
        format!(
            "{}-{}{}",
            Utc::now().timestamp_millis(),
            Uuid::new_v4(),
            extension
        )
    }

    /// Rejects anything that could resolve outside the upload directory.
    fn resolve(&self, name: &str) -> Result<PathBuf, StorageError> {
        if name.is_empty() || name.contains('/') || name.contains('\\') || name.contains("..") {
            return Err(StorageError::InvalidName(name.to_string()));
        }
        Ok(self.base_path.join(name))
    }

    async fn ensure_base_dir(&self) -> Result<(), StorageError> {
        fs::create_dir_all(&self.base_path).await.map_err(|e| {
            StorageError::Io(format!(
                "Failed to create upload directory {}: {}",
                self.base_path.display(),
                e
            ))
        })
    }
}

#[async_trait]
impl FileStorage for LocalFileStorage {
    async fn store(
        &self,
        original_name: Option<&str>,
        bytes: &[u8],
    ) -> Result<String, StorageError> {
        self.ensure_base_dir().await?;

        let name = Self::generate_name(original_name);
        let final_path = self.base_path.join(&name);
        let temp_path = self.base_path.join(format!("{}.tmp", name));

        let mut file = fs::File::create(&temp_path).await.map_err(|e| {
            StorageError::Io(format!(
                "Failed to create temp file {}: {}",
                temp_path.display(),
                e
            ))
        })?;
        file.write_all(bytes).await.map_err(|e| {
            StorageError::Io(format!("Failed to write {}: {}", temp_path.display(), e))
        })?;
        file.sync_all().await.map_err(|e| {
            StorageError::Io(format!("Failed to sync {}: {}", temp_path.display(), e))
        })?;

        fs::rename(&temp_path, &final_path).await.map_err(|e| {
            StorageError::Io(format!(
                "Failed to rename {} to {}: {}",
                temp_path.display(),
                final_path.display(),
                e
            ))
        })?;

        tracing::debug!(file = %name, size = bytes.len(), "Stored upload");
        Ok(name)
    }

    async fn load(&self, name: &str) -> Result<Vec<u8>, StorageError> {
        let path = self.resolve(name)?;
        fs::read(&path).await.map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => StorageError::NotFound(name.to_string()),
            _ => StorageError::Io(format!("Failed to read {}: {}", path.display(), e)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_storage() -> (LocalFileStorage, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let storage = LocalFileStorage::new(temp_dir.path().join("uploads"));
        (storage, temp_dir)
    }

    #[tokio::test]
    async fn store_then_load_returns_same_bytes() {
        let (storage, _temp) = create_storage();

        let name = storage.store(Some("photo.PNG"), b"\x89PNG").await.unwrap();

        assert!(name.ends_with(".png"));
        assert_eq!(storage.load(&name).await.unwrap(), b"\x89PNG");
    }

    #[tokio::test]
    async fn generated_names_are_unique_and_prefixed_with_millis() {
        let (storage, _temp) = create_storage();

        let a = storage.store(Some("a.jpg"), b"a").await.unwrap();
        let b = storage.store(Some("a.jpg"), b"b").await.unwrap();

        assert_ne!(a, b);
        let (millis, _) = a.split_once('-').unwrap();
        assert!(millis.parse::<i64>().is_ok());
    }

    #[tokio::test]
    async fn name_without_extension_has_none() {
        let (storage, _temp) = create_storage();

        let name = storage.store(None, b"x").await.unwrap();

        assert!(!name.contains('.'));
    }

    #[tokio::test]
    async fn no_temp_file_left_behind() {
        let (storage, _temp) = create_storage();
        storage.store(Some("doc.txt"), b"x").await.unwrap();

        let mut entries = fs::read_dir(storage.base_path()).await.unwrap();
        while let Some(entry) = entries.next_entry().await.unwrap() {
            assert!(!entry.file_name().to_string_lossy().ends_with(".tmp"));
        }
    }

    #[tokio::test]
    async fn load_missing_is_not_found() {
        let (storage, _temp) = create_storage();

        let result = storage.load("123-missing.png").await;

        assert!(matches!(result, Err(StorageError::NotFound(_))));
    }

    #[tokio::test]
    async fn load_rejects_traversal() {
        let (storage, _temp) = create_storage();

        for name in ["../secret", "a/b.png", "a\\b.png", ".."] {
            let result = storage.load(name).await;
            assert!(matches!(result, Err(StorageError::InvalidName(_))), "{name}");
        }
    }
}
