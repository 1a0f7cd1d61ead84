//! FileStorage port for uploaded listing and profile images.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::foundation::{DomainError, ErrorCode};

/// Errors that can occur during file storage operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    #[error("File not found: {0}")]
    NotFound(String),

    /// Name would escape the storage root or is otherwise unusable.
    #[error("Invalid file name: {0}")]
    InvalidName(String),

    #[error("IO error: {0}")]
    Io(String),
}

impl From<StorageError> for DomainError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::NotFound(name) | StorageError::InvalidName(name) => {
                DomainError::not_found(ErrorCode::FileNotFound, "File", name)
            }
            StorageError::Io(message) => DomainError::new(ErrorCode::StorageError, message),
        }
    }
}

/// Flat blob store keyed by generated file names.
#[async_trait]
pub trait FileStorage: Send + Sync {
    /// Store `bytes` under a freshly generated name and return that name.
    ///
    /// The extension of `original_name`, if any, is kept (lower-cased).
    async fn store(&self, original_name: Option<&str>, bytes: &[u8])
        -> Result<String, StorageError>;

    /// Read a previously stored file.
    ///
    /// # Errors
    ///
    /// - `InvalidName` for names containing path separators or `..`
    /// - `NotFound` if nothing is stored under `name`
    async fn load(&self, name: &str) -> Result<Vec<u8>, StorageError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::ErrorKind;

    #[test]
    fn invalid_names_surface_as_not_found() {
        let err: DomainError = StorageError::InvalidName("../etc/passwd".into()).into();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn io_failures_are_internal() {
        let err: DomainError = StorageError::Io("disk full".into()).into();
        assert_eq!(err.kind(), ErrorKind::Internal);
    }

    #[test]
    fn file_storage_is_object_safe() {
        fn _accepts_dyn(_storage: &dyn FileStorage) {}
    }
}
