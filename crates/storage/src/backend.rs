use crate::StorageError;
use docstore_utils::{decode_text, to_base64};
use encoding_rs::Encoding;
use tokio_util::sync::CancellationToken;

/// Storage backend trait for document storage abstraction.
///
/// Paths are relative to the backend root. Every operation comes as an async
/// method and a blocking `_sync` twin with the same outcome for the same input.
/// Cancellation is observed before I/O starts; an operation already handed to
/// the medium may still complete.
#[async_trait::async_trait]
pub trait Backend: Send + Sync {
    /// Whether a file exists at `path`. A missing file is `Ok(false)`, never an error.
    async fn exists(&self, path: &str, cancel: &CancellationToken) -> Result<bool, StorageError>;
    fn exists_sync(&self, path: &str, cancel: &CancellationToken) -> Result<bool, StorageError>;

    /// Whether a directory exists at `path`. A missing directory is `Ok(false)`.
    async fn directory_exists(&self, path: &str, cancel: &CancellationToken) -> Result<bool, StorageError>;
    fn directory_exists_sync(&self, path: &str, cancel: &CancellationToken) -> Result<bool, StorageError>;

    /// Creates `path` along with any missing parents
    async fn create_directory(&self, path: &str, cancel: &CancellationToken) -> Result<(), StorageError>;
    fn create_directory_sync(&self, path: &str, cancel: &CancellationToken) -> Result<(), StorageError>;

    /// Removes an empty directory
    async fn delete_directory(&self, path: &str, cancel: &CancellationToken) -> Result<(), StorageError>;
    fn delete_directory_sync(&self, path: &str, cancel: &CancellationToken) -> Result<(), StorageError>;

    async fn read_all_bytes(&self, path: &str, cancel: &CancellationToken) -> Result<Vec<u8>, StorageError>;
    fn read_all_bytes_sync(&self, path: &str, cancel: &CancellationToken) -> Result<Vec<u8>, StorageError>;

    /// Writes `data` to `path`, replacing any existing file
    async fn write(&self, path: &str, data: &[u8], cancel: &CancellationToken) -> Result<(), StorageError>;
    fn write_sync(&self, path: &str, data: &[u8], cancel: &CancellationToken) -> Result<(), StorageError>;

    /// Deletes the file at `path`; a missing file is not an error
    async fn delete(&self, path: &str, cancel: &CancellationToken) -> Result<(), StorageError>;
    fn delete_sync(&self, path: &str, cancel: &CancellationToken) -> Result<(), StorageError>;

    /// Check if backend is local or remote
    fn is_remote(&self) -> bool;

    /// Releases connection resources. Safe to call more than once.
    fn close(&self) {}

    async fn read_as_base64(&self, path: &str, cancel: &CancellationToken) -> Result<String, StorageError> {
        let bytes = self.read_all_bytes(path, cancel).await?;
        Ok(to_base64(&bytes))
    }

    fn read_as_base64_sync(&self, path: &str, cancel: &CancellationToken) -> Result<String, StorageError> {
        let bytes = self.read_all_bytes_sync(path, cancel)?;
        Ok(to_base64(&bytes))
    }

    /// Reads the file as text; `None` means UTF-8
    async fn read_all_text(
        &self,
        path: &str,
        encoding: Option<&'static Encoding>,
        cancel: &CancellationToken,
    ) -> Result<String, StorageError> {
        let bytes = self.read_all_bytes(path, cancel).await?;
        Ok(decode_text(&bytes, encoding))
    }

    fn read_all_text_sync(
        &self,
        path: &str,
        encoding: Option<&'static Encoding>,
        cancel: &CancellationToken,
    ) -> Result<String, StorageError> {
        let bytes = self.read_all_bytes_sync(path, cancel)?;
        Ok(decode_text(&bytes, encoding))
    }

    /// Copies by reading the whole source into memory and writing it out
    async fn copy(&self, source: &str, destination: &str, cancel: &CancellationToken) -> Result<(), StorageError> {
        let bytes = self.read_all_bytes(source, cancel).await?;
        self.write(destination, &bytes, cancel).await
    }

    fn copy_sync(&self, source: &str, destination: &str, cancel: &CancellationToken) -> Result<(), StorageError> {
        let bytes = self.read_all_bytes_sync(source, cancel)?;
        self.write_sync(destination, &bytes, cancel)
    }
}

pub(crate) fn ensure_not_cancelled(cancel: &CancellationToken) -> Result<(), StorageError> {
    if cancel.is_cancelled() {
        return Err(StorageError::Cancelled);
    }
    Ok(())
}
