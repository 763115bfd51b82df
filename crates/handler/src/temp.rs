use crate::DocumentHandler;
use docstore_config::{HandlerMode, TempSettings};
use docstore_storage::{CancellationToken, Encoding, StorageError};
use docstore_utils::combine;

/// Document operations confined to the temp area.
///
/// In local mode the configured base directory is itself the temp folder; in
/// remote mode every path is placed under a folder named after the token.
pub struct TempFileHandler {
    handler: DocumentHandler,
    root: String,
}

impl TempFileHandler {
    pub fn new(settings: &TempSettings) -> Result<Self, StorageError> {
        settings.validate()?;
        let handler = DocumentHandler::new(&settings.to_handler_settings())?;
        Self::with_handler(settings, handler)
    }

    /// Temp scope over a handler built elsewhere; `settings` still decides the root
    pub fn with_handler(settings: &TempSettings, handler: DocumentHandler) -> Result<Self, StorageError> {
        settings.validate()?;

        let root = match settings.mode {
            HandlerMode::Local => String::new(),
            HandlerMode::Remote => settings.folder_name.clone(),
        };

        Ok(Self { handler, root })
    }

    pub fn handler(&self) -> &DocumentHandler {
        &self.handler
    }

    fn scoped(&self, path: &str) -> String {
        combine(&[self.root.as_str(), path])
    }

    pub async fn exists(&self, path: &str, cancel: &CancellationToken) -> Result<bool, StorageError> {
        self.handler.exists(&self.scoped(path), cancel).await
    }

    pub fn exists_sync(&self, path: &str, cancel: &CancellationToken) -> Result<bool, StorageError> {
        self.handler.exists_sync(&self.scoped(path), cancel)
    }

    pub async fn write(&self, path: &str, data: &[u8], cancel: &CancellationToken) -> Result<(), StorageError> {
        self.handler.write(&self.scoped(path), data, cancel).await
    }

    pub fn write_sync(&self, path: &str, data: &[u8], cancel: &CancellationToken) -> Result<(), StorageError> {
        self.handler.write_sync(&self.scoped(path), data, cancel)
    }

    pub async fn delete(&self, path: &str, cancel: &CancellationToken) -> Result<(), StorageError> {
        self.handler.delete(&self.scoped(path), cancel).await
    }

    pub fn delete_sync(&self, path: &str, cancel: &CancellationToken) -> Result<(), StorageError> {
        self.handler.delete_sync(&self.scoped(path), cancel)
    }

    pub async fn read_all_bytes(&self, path: &str, cancel: &CancellationToken) -> Result<Vec<u8>, StorageError> {
        self.handler.read_all_bytes(&self.scoped(path), cancel).await
    }

    pub fn read_all_bytes_sync(&self, path: &str, cancel: &CancellationToken) -> Result<Vec<u8>, StorageError> {
        self.handler.read_all_bytes_sync(&self.scoped(path), cancel)
    }

    pub async fn read_all_text(
        &self,
        path: &str,
        encoding: Option<&'static Encoding>,
        cancel: &CancellationToken,
    ) -> Result<String, StorageError> {
        self.handler.read_all_text(&self.scoped(path), encoding, cancel).await
    }

    pub fn read_all_text_sync(
        &self,
        path: &str,
        encoding: Option<&'static Encoding>,
        cancel: &CancellationToken,
    ) -> Result<String, StorageError> {
        self.handler.read_all_text_sync(&self.scoped(path), encoding, cancel)
    }

    pub async fn read_as_base64(&self, path: &str, cancel: &CancellationToken) -> Result<String, StorageError> {
        self.handler.read_as_base64(&self.scoped(path), cancel).await
    }

    pub fn read_as_base64_sync(&self, path: &str, cancel: &CancellationToken) -> Result<String, StorageError> {
        self.handler.read_as_base64_sync(&self.scoped(path), cancel)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use docstore_config::{LocalSettings, RemoteSettings};
    use docstore_storage::{FtpBackend, FtpSession};
    use parking_lot::Mutex;
    use std::sync::Arc;

    fn local_temp(dir: &tempfile::TempDir, folder: &str) -> TempSettings {
        let base = dir.path().join(folder);
        std::fs::create_dir_all(&base).unwrap();
        TempSettings {
            mode: HandlerMode::Local,
            local: Some(LocalSettings::new(base.to_string_lossy())),
            remote: None,
            folder_name: folder.to_string(),
        }
    }

    #[tokio::test]
    async fn test_local_temp_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let temp = TempFileHandler::new(&local_temp(&dir, "scratch")).unwrap();
        let cancel = CancellationToken::new();

        temp.write("/upload.txt", b"f1", &cancel).await.unwrap();
        assert!(dir.path().join("scratch").join("upload.txt").is_file());
        assert_eq!(temp.read_all_text("upload.txt", None, &cancel).await.unwrap(), "f1");
        assert_eq!(temp.read_as_base64_sync("upload.txt", &cancel).unwrap(), "ZjE=");

        temp.delete("upload.txt", &cancel).await.unwrap();
        assert!(!temp.exists_sync("upload.txt", &cancel).unwrap());
    }

    #[test]
    fn test_local_base_must_end_with_folder_name() {
        let dir = tempfile::tempdir().unwrap();
        let mut settings = local_temp(&dir, "scratch");
        settings.folder_name = "other".to_string();

        assert!(matches!(
            TempFileHandler::new(&settings),
            Err(StorageError::ConfigError(_))
        ));
    }

    type Stored = Arc<Mutex<Vec<(String, Vec<u8>)>>>;

    /// Session that keeps uploads in memory
    struct RecordingSession {
        stored: Stored,
    }

    impl FtpSession for RecordingSession {
        fn size(&mut self, path: &str) -> Result<usize, StorageError> {
            self.stored
                .lock()
                .iter()
                .find(|(p, _)| p.as_str() == path)
                .map(|(_, data)| data.len())
                .ok_or_else(|| StorageError::ProtocolError {
                    code: Some(450),
                    message: "No such file".to_string(),
                })
        }

        fn list(&mut self, _path: &str) -> Result<Vec<String>, StorageError> {
            Ok(vec![])
        }

        fn make_directory(&mut self, _path: &str) -> Result<(), StorageError> {
            Ok(())
        }

        fn remove_directory(&mut self, _path: &str) -> Result<(), StorageError> {
            Ok(())
        }

        fn delete(&mut self, path: &str) -> Result<(), StorageError> {
            self.stored.lock().retain(|(p, _)| p.as_str() != path);
            Ok(())
        }

        fn retrieve(&mut self, path: &str) -> Result<Vec<u8>, StorageError> {
            self.stored
                .lock()
                .iter()
                .find(|(p, _)| p.as_str() == path)
                .map(|(_, data)| data.clone())
                .ok_or_else(|| StorageError::ProtocolError {
                    code: Some(550),
                    message: "No such file".to_string(),
                })
        }

        fn store(&mut self, path: &str, data: &[u8]) -> Result<(), StorageError> {
            self.stored.lock().push((path.to_string(), data.to_vec()));
            Ok(())
        }

        fn quit(&mut self) -> Result<(), StorageError> {
            Ok(())
        }
    }

    #[test]
    fn test_remote_paths_are_placed_under_folder_name() {
        let remote = RemoteSettings::new("ftp://ftp.example.com", "user", "secret").unwrap();
        let settings = TempSettings {
            mode: HandlerMode::Remote,
            local: None,
            remote: Some(remote.clone()),
            folder_name: "scratch".to_string(),
        };

        let stored: Stored = Arc::new(Mutex::new(Vec::new()));
        let session = RecordingSession { stored: Arc::clone(&stored) };
        let backend = FtpBackend::with_session(&remote, Box::new(session)).unwrap();
        let handler = DocumentHandler::with_backend(HandlerMode::Remote, Box::new(backend));
        let temp = TempFileHandler::with_handler(&settings, handler).unwrap();
        let cancel = CancellationToken::new();

        assert!(temp.handler().backend().is_remote());
        temp.write_sync("a.txt", b"f1", &cancel).unwrap();
        assert_eq!(
            *stored.lock(),
            vec![("/scratch/a.txt".to_string(), b"f1".to_vec())]
        );
        assert_eq!(temp.read_as_base64_sync("/a.txt", &cancel).unwrap(), "ZjE=");

        temp.delete_sync("a.txt", &cancel).unwrap();
        assert!(stored.lock().is_empty());
    }
}
