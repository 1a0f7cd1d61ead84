//! Upload storage configuration

use serde::Deserialize;
use std::path::PathBuf;

use super::error::ValidationError;

#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Directory holding uploaded files
    #[serde(default = "default_upload_dir")]
    pub upload_dir: PathBuf,

    /// Largest accepted multipart request body
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,
}

impl StorageConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.upload_dir.as_os_str().is_empty() {
            return Err(ValidationError::MissingRequired("STORAGE__UPLOAD_DIR"));
        }
        if self.max_upload_bytes == 0 {
            return Err(ValidationError::InvalidUploadLimit);
        }
        Ok(())
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            upload_dir: default_upload_dir(),
            max_upload_bytes: default_max_upload_bytes(),
        }
    }
}

fn default_upload_dir() -> PathBuf {
    PathBuf::from("uploads")
}

fn default_max_upload_bytes() -> usize {
    10 * 1024 * 1024
}
