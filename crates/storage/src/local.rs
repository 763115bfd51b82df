use crate::backend::{ensure_not_cancelled, Backend};
use crate::StorageError;
use docstore_config::LocalSettings;
use docstore_utils::{combine, ensure_valid_path};
use std::io::ErrorKind;
use std::path::PathBuf;
use tokio_util::sync::CancellationToken;

/// Local filesystem storage backend rooted at a base directory
#[derive(Debug, Clone)]
pub struct LocalBackend {
    base_directory: String,
}

impl LocalBackend {
    pub fn new(settings: &LocalSettings) -> Result<Self, StorageError> {
        settings.validate()?;

        tracing::debug!("Local backend rooted at {:?}", settings.base_directory);
        Ok(Self {
            base_directory: settings.base_directory.clone(),
        })
    }

    pub fn base_directory(&self) -> &str {
        &self.base_directory
    }

    fn resolve(&self, path: &str) -> Result<PathBuf, StorageError> {
        let full = combine(&[self.base_directory.as_str(), path]);
        if full.is_empty() {
            return Ok(PathBuf::from("."));
        }
        ensure_valid_path(&full)?;
        Ok(PathBuf::from(full))
    }
}

#[async_trait::async_trait]
impl Backend for LocalBackend {
    async fn exists(&self, path: &str, cancel: &CancellationToken) -> Result<bool, StorageError> {
        ensure_not_cancelled(cancel)?;
        let full = self.resolve(path)?;
        Ok(tokio::fs::metadata(&full).await.map(|m| m.is_file()).unwrap_or(false))
    }

    fn exists_sync(&self, path: &str, cancel: &CancellationToken) -> Result<bool, StorageError> {
        ensure_not_cancelled(cancel)?;
        Ok(self.resolve(path)?.is_file())
    }

    async fn directory_exists(&self, path: &str, cancel: &CancellationToken) -> Result<bool, StorageError> {
        ensure_not_cancelled(cancel)?;
        let full = self.resolve(path)?;
        Ok(tokio::fs::metadata(&full).await.map(|m| m.is_dir()).unwrap_or(false))
    }

    fn directory_exists_sync(&self, path: &str, cancel: &CancellationToken) -> Result<bool, StorageError> {
        ensure_not_cancelled(cancel)?;
        Ok(self.resolve(path)?.is_dir())
    }

    async fn create_directory(&self, path: &str, cancel: &CancellationToken) -> Result<(), StorageError> {
        ensure_not_cancelled(cancel)?;
        let full = self.resolve(path)?;
        tokio::fs::create_dir_all(&full).await?;
        tracing::debug!("Created directory {}", full.display());
        Ok(())
    }

    fn create_directory_sync(&self, path: &str, cancel: &CancellationToken) -> Result<(), StorageError> {
        ensure_not_cancelled(cancel)?;
        let full = self.resolve(path)?;
        std::fs::create_dir_all(&full)?;
        tracing::debug!("Created directory {}", full.display());
        Ok(())
    }

    async fn delete_directory(&self, path: &str, cancel: &CancellationToken) -> Result<(), StorageError> {
        ensure_not_cancelled(cancel)?;
        let full = self.resolve(path)?;
        tokio::fs::remove_dir(&full).await?;
        tracing::debug!("Deleted directory {}", full.display());
        Ok(())
    }

    fn delete_directory_sync(&self, path: &str, cancel: &CancellationToken) -> Result<(), StorageError> {
        ensure_not_cancelled(cancel)?;
        let full = self.resolve(path)?;
        std::fs::remove_dir(&full)?;
        tracing::debug!("Deleted directory {}", full.display());
        Ok(())
    }

    async fn read_all_bytes(&self, path: &str, cancel: &CancellationToken) -> Result<Vec<u8>, StorageError> {
        ensure_not_cancelled(cancel)?;
        let full = self.resolve(path)?;
        Ok(tokio::fs::read(&full).await?)
    }

    fn read_all_bytes_sync(&self, path: &str, cancel: &CancellationToken) -> Result<Vec<u8>, StorageError> {
        ensure_not_cancelled(cancel)?;
        let full = self.resolve(path)?;
        Ok(std::fs::read(&full)?)
    }

    async fn write(&self, path: &str, data: &[u8], cancel: &CancellationToken) -> Result<(), StorageError> {
        ensure_not_cancelled(cancel)?;
        let full = self.resolve(path)?;
        tokio::fs::write(&full, data).await?;
        tracing::debug!("Wrote {} bytes to {}", data.len(), full.display());
        Ok(())
    }

    fn write_sync(&self, path: &str, data: &[u8], cancel: &CancellationToken) -> Result<(), StorageError> {
        ensure_not_cancelled(cancel)?;
        let full = self.resolve(path)?;
        std::fs::write(&full, data)?;
        tracing::debug!("Wrote {} bytes to {}", data.len(), full.display());
        Ok(())
    }

    async fn delete(&self, path: &str, cancel: &CancellationToken) -> Result<(), StorageError> {
        ensure_not_cancelled(cancel)?;
        let full = self.resolve(path)?;

        let is_file = tokio::fs::metadata(&full).await.map(|m| m.is_file()).unwrap_or(false);
        if !is_file {
            return Ok(());
        }
        match tokio::fs::remove_file(&full).await {
            Err(e) if e.kind() != ErrorKind::NotFound => Err(e.into()),
            _ => {
                tracing::debug!("Deleted {}", full.display());
                Ok(())
            }
        }
    }

    fn delete_sync(&self, path: &str, cancel: &CancellationToken) -> Result<(), StorageError> {
        ensure_not_cancelled(cancel)?;
        let full = self.resolve(path)?;

        if !full.is_file() {
            return Ok(());
        }
        match std::fs::remove_file(&full) {
            Err(e) if e.kind() != ErrorKind::NotFound => Err(e.into()),
            _ => {
                tracing::debug!("Deleted {}", full.display());
                Ok(())
            }
        }
    }

    fn is_remote(&self) -> bool {
        false
    }
}
