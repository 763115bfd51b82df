use docstore_config::{HandlerMode, HandlerSettings};
use docstore_storage::{Backend, CancellationToken, Encoding, FtpBackend, LocalBackend, StorageError};

/// Forwards every document operation to the backend selected by the
/// configured mode. Dropping the handler releases the backend.
pub struct DocumentHandler {
    mode: HandlerMode,
    backend: Box<dyn Backend>,
}

impl DocumentHandler {
    pub fn new(settings: &HandlerSettings) -> Result<Self, StorageError> {
        settings.validate()?;

        let backend: Box<dyn Backend> = match settings.mode {
            HandlerMode::Local => {
                let local = settings.local.as_ref().ok_or_else(|| missing("local"))?;
                Box::new(LocalBackend::new(local)?)
            }
            HandlerMode::Remote => {
                let remote = settings.remote.as_ref().ok_or_else(|| missing("remote"))?;
                Box::new(FtpBackend::new(remote)?)
            }
        };

        tracing::info!("Document handler ready ({} mode)", settings.mode);
        Ok(Self {
            mode: settings.mode,
            backend,
        })
    }

    /// Handler over a backend built elsewhere
    pub fn with_backend(mode: HandlerMode, backend: Box<dyn Backend>) -> Self {
        Self { mode, backend }
    }

    pub fn mode(&self) -> HandlerMode {
        self.mode
    }

    pub fn backend(&self) -> &dyn Backend {
        self.backend.as_ref()
    }

    pub async fn exists(&self, path: &str, cancel: &CancellationToken) -> Result<bool, StorageError> {
        self.backend.exists(path, cancel).await
    }

    pub fn exists_sync(&self, path: &str, cancel: &CancellationToken) -> Result<bool, StorageError> {
        self.backend.exists_sync(path, cancel)
    }

    pub async fn directory_exists(&self, path: &str, cancel: &CancellationToken) -> Result<bool, StorageError> {
        self.backend.directory_exists(path, cancel).await
    }

    pub fn directory_exists_sync(&self, path: &str, cancel: &CancellationToken) -> Result<bool, StorageError> {
        self.backend.directory_exists_sync(path, cancel)
    }

    pub async fn create_directory(&self, path: &str, cancel: &CancellationToken) -> Result<(), StorageError> {
        self.backend.create_directory(path, cancel).await
    }

    pub fn create_directory_sync(&self, path: &str, cancel: &CancellationToken) -> Result<(), StorageError> {
        self.backend.create_directory_sync(path, cancel)
    }

    pub async fn delete_directory(&self, path: &str, cancel: &CancellationToken) -> Result<(), StorageError> {
        self.backend.delete_directory(path, cancel).await
    }

    pub fn delete_directory_sync(&self, path: &str, cancel: &CancellationToken) -> Result<(), StorageError> {
        self.backend.delete_directory_sync(path, cancel)
    }

    pub async fn read_all_bytes(&self, path: &str, cancel: &CancellationToken) -> Result<Vec<u8>, StorageError> {
        self.backend.read_all_bytes(path, cancel).await
    }

    pub fn read_all_bytes_sync(&self, path: &str, cancel: &CancellationToken) -> Result<Vec<u8>, StorageError> {
        self.backend.read_all_bytes_sync(path, cancel)
    }

    pub async fn read_as_base64(&self, path: &str, cancel: &CancellationToken) -> Result<String, StorageError> {
        self.backend.read_as_base64(path, cancel).await
    }

    pub fn read_as_base64_sync(&self, path: &str, cancel: &CancellationToken) -> Result<String, StorageError> {
        self.backend.read_as_base64_sync(path, cancel)
    }

    pub async fn read_all_text(
        &self,
        path: &str,
        encoding: Option<&'static Encoding>,
        cancel: &CancellationToken,
    ) -> Result<String, StorageError> {
        self.backend.read_all_text(path, encoding, cancel).await
    }

    pub fn read_all_text_sync(
        &self,
        path: &str,
        encoding: Option<&'static Encoding>,
        cancel: &CancellationToken,
    ) -> Result<String, StorageError> {
        self.backend.read_all_text_sync(path, encoding, cancel)
    }

    pub async fn write(&self, path: &str, data: &[u8], cancel: &CancellationToken) -> Result<(), StorageError> {
        self.backend.write(path, data, cancel).await
    }

    pub fn write_sync(&self, path: &str, data: &[u8], cancel: &CancellationToken) -> Result<(), StorageError> {
        self.backend.write_sync(path, data, cancel)
    }

    pub async fn delete(&self, path: &str, cancel: &CancellationToken) -> Result<(), StorageError> {
        self.backend.delete(path, cancel).await
    }

    pub fn delete_sync(&self, path: &str, cancel: &CancellationToken) -> Result<(), StorageError> {
        self.backend.delete_sync(path, cancel)
    }

    pub async fn copy(&self, source: &str, destination: &str, cancel: &CancellationToken) -> Result<(), StorageError> {
        self.backend.copy(source, destination, cancel).await
    }

    pub fn copy_sync(&self, source: &str, destination: &str, cancel: &CancellationToken) -> Result<(), StorageError> {
        self.backend.copy_sync(source, destination, cancel)
    }

    /// Releases the backend's connection. Safe to call more than once.
    pub fn close(&self) {
        self.backend.close();
    }
}

impl Drop for DocumentHandler {
    fn drop(&mut self) {
        self.backend.close();
    }
}

fn missing(field: &str) -> StorageError {
    docstore_config::ConfigError::MissingField(field.to_string()).into()
}
