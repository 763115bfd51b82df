mod client;
mod endpoint;
mod session;

pub use endpoint::FtpEndpoint;
pub use session::FtpSession;

use crate::backend::{ensure_not_cancelled, Backend};
use crate::StorageError;
use client::FtpClient;
use docstore_config::RemoteSettings;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// FTP storage backend.
///
/// Commands run over a single blocking session that is opened on first use;
/// the async methods hand that work to tokio's blocking pool. A cancellation
/// requested after a transfer started does not interrupt it.
pub struct FtpBackend {
    client: Arc<FtpClient>,
}

impl FtpBackend {
    pub fn new(settings: &RemoteSettings) -> Result<Self, StorageError> {
        settings.validate()?;
        let endpoint = FtpEndpoint::parse(&settings.url)?;

        tracing::debug!("FTP backend for {}", endpoint.address());
        Ok(Self {
            client: Arc::new(FtpClient::new(
                endpoint,
                settings.username.clone(),
                settings.password.clone(),
            )),
        })
    }

    /// Backend driving an already established session, e.g. a TLS-wrapped
    /// stream or a test double
    pub fn with_session(settings: &RemoteSettings, session: Box<dyn FtpSession>) -> Result<Self, StorageError> {
        settings.validate()?;
        let endpoint = FtpEndpoint::parse(&settings.url)?;

        Ok(Self {
            client: Arc::new(FtpClient::with_session(
                endpoint,
                settings.username.clone(),
                settings.password.clone(),
                session,
            )),
        })
    }

    async fn run<T, F>(&self, cancel: &CancellationToken, op: F) -> Result<T, StorageError>
    where
        T: Send + 'static,
        F: FnOnce(&FtpClient, &CancellationToken) -> Result<T, StorageError> + Send + 'static,
    {
        ensure_not_cancelled(cancel)?;

        let client = Arc::clone(&self.client);
        let cancel = cancel.clone();
        tokio::task::spawn_blocking(move || op(client.as_ref(), &cancel)).await?
    }
}

#[async_trait::async_trait]
impl Backend for FtpBackend {
    async fn exists(&self, path: &str, cancel: &CancellationToken) -> Result<bool, StorageError> {
        let path = path.to_owned();
        self.run(cancel, move |client, cancel| client.file_exists(&path, cancel)).await
    }

    fn exists_sync(&self, path: &str, cancel: &CancellationToken) -> Result<bool, StorageError> {
        self.client.file_exists(path, cancel)
    }

    async fn directory_exists(&self, path: &str, cancel: &CancellationToken) -> Result<bool, StorageError> {
        let path = path.to_owned();
        self.run(cancel, move |client, cancel| client.directory_exists(&path, cancel)).await
    }

    fn directory_exists_sync(&self, path: &str, cancel: &CancellationToken) -> Result<bool, StorageError> {
        self.client.directory_exists(path, cancel)
    }

    async fn create_directory(&self, path: &str, cancel: &CancellationToken) -> Result<(), StorageError> {
        let path = path.to_owned();
        self.run(cancel, move |client, cancel| client.create_directory(&path, cancel)).await
    }

    fn create_directory_sync(&self, path: &str, cancel: &CancellationToken) -> Result<(), StorageError> {
        self.client.create_directory(path, cancel)
    }

    async fn delete_directory(&self, path: &str, cancel: &CancellationToken) -> Result<(), StorageError> {
        let path = path.to_owned();
        self.run(cancel, move |client, cancel| client.delete_directory(&path, cancel)).await
    }

    fn delete_directory_sync(&self, path: &str, cancel: &CancellationToken) -> Result<(), StorageError> {
        self.client.delete_directory(path, cancel)
    }

    async fn read_all_bytes(&self, path: &str, cancel: &CancellationToken) -> Result<Vec<u8>, StorageError> {
        let path = path.to_owned();
        self.run(cancel, move |client, cancel| client.read_all_bytes(&path, cancel)).await
    }

    fn read_all_bytes_sync(&self, path: &str, cancel: &CancellationToken) -> Result<Vec<u8>, StorageError> {
        self.client.read_all_bytes(path, cancel)
    }

    async fn write(&self, path: &str, data: &[u8], cancel: &CancellationToken) -> Result<(), StorageError> {
        let path = path.to_owned();
        let data = data.to_vec();
        self.run(cancel, move |client, cancel| client.write(&path, &data, cancel)).await
    }

    fn write_sync(&self, path: &str, data: &[u8], cancel: &CancellationToken) -> Result<(), StorageError> {
        self.client.write(path, data, cancel)
    }

    async fn delete(&self, path: &str, cancel: &CancellationToken) -> Result<(), StorageError> {
        let path = path.to_owned();
        self.run(cancel, move |client, cancel| client.delete(&path, cancel)).await
    }

    fn delete_sync(&self, path: &str, cancel: &CancellationToken) -> Result<(), StorageError> {
        self.client.delete(path, cancel)
    }

    fn is_remote(&self) -> bool {
        true
    }

    fn close(&self) {
        self.client.close();
    }
}

#[cfg(test)]
mod tests {
    use super::session::MockFtpSession;
    use super::*;
    use mockall::predicate::eq;
    use parking_lot::Mutex;

    fn settings() -> RemoteSettings {
        RemoteSettings::new("ftp://ftp.example.com/docs/", "user", "secret").unwrap()
    }

    #[test]
    fn test_construction_validates_settings() {
        let mut missing = settings();
        missing.password.clear();
        assert!(matches!(
            FtpBackend::new(&missing),
            Err(StorageError::ConfigError(_))
        ));

        let mut http = settings();
        http.url = "http://example.com/docs".to_string();
        assert!(FtpBackend::new(&http).is_err());

        let backend = FtpBackend::new(&settings()).unwrap();
        assert!(backend.is_remote());
    }

    #[tokio::test]
    async fn test_copy_round_trip_through_memory() {
        let stored: Arc<Mutex<Vec<u8>>> = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&stored);

        let mut session = MockFtpSession::new();
        session
            .expect_retrieve()
            .with(eq("/docs/in/src.bin"))
            .times(2)
            .returning(|_| Ok(vec![0x00, 0xFF, 0x10]));
        session
            .expect_store()
            .with(eq("/docs/out/dst.bin"), eq(&[0x00u8, 0xFF, 0x10][..]))
            .times(1)
            .returning(move |_, data| {
                *sink.lock() = data.to_vec();
                Ok(())
            });
        session.expect_quit().times(1).returning(|| Ok(()));

        let backend = FtpBackend::with_session(&settings(), Box::new(session)).unwrap();
        let cancel = CancellationToken::new();

        let before = backend.read_all_bytes("in/src.bin", &cancel).await.unwrap();
        backend.copy("/in/src.bin", "out/dst.bin", &cancel).await.unwrap();

        assert_eq!(*stored.lock(), before);
        backend.close();
    }

    #[tokio::test]
    async fn test_read_transforms_are_built_on_download() {
        let mut session = MockFtpSession::new();
        session
            .expect_retrieve()
            .with(eq("/docs/x.txt"))
            .times(2)
            .returning(|_| Ok(vec![0x66, 0x31]));
        session.expect_quit().times(1).returning(|| Ok(()));

        let backend = FtpBackend::with_session(&settings(), Box::new(session)).unwrap();
        let cancel = CancellationToken::new();

        assert_eq!(backend.read_all_text("x.txt", None, &cancel).await.unwrap(), "f1");
        assert_eq!(backend.read_as_base64_sync("x.txt", &cancel).unwrap(), "ZjE=");
    }

    #[tokio::test]
    async fn test_create_then_check_directory() {
        let mut session = MockFtpSession::new();
        let created = Arc::new(Mutex::new(Vec::<String>::new()));
        let made = Arc::clone(&created);
        let seen = Arc::clone(&created);

        session.expect_list().returning(move |path| {
            let dir = path.trim_end_matches('/');
            if dir == "/docs" || seen.lock().iter().any(|d| d == dir) {
                Ok(vec![])
            } else {
                Err(StorageError::ProtocolError {
                    code: Some(crate::FILE_UNAVAILABLE),
                    message: "not found".to_string(),
                })
            }
        });
        session.expect_make_directory().returning(move |path| {
            made.lock().push(path.to_string());
            Ok(())
        });
        session.expect_quit().returning(|| Ok(()));

        let backend = FtpBackend::with_session(&settings(), Box::new(session)).unwrap();
        let cancel = CancellationToken::new();

        assert!(!backend.directory_exists("/m/n", &cancel).await.unwrap());
        backend.create_directory("/m/n", &cancel).await.unwrap();
        assert!(backend.directory_exists("/m/n", &cancel).await.unwrap());
        assert_eq!(*created.lock(), vec!["/docs/m", "/docs/m/n"]);

        backend.create_directory_sync("/m/n", &cancel).unwrap();
        assert_eq!(created.lock().len(), 2);
    }

    #[tokio::test]
    async fn test_async_cancellation_before_start() {
        let mut session = MockFtpSession::new();
        session.expect_quit().returning(|| Ok(()));
        let backend = FtpBackend::with_session(&settings(), Box::new(session)).unwrap();

        let cancel = CancellationToken::new();
        cancel.cancel();

        assert!(matches!(
            backend.write("x.txt", b"x", &cancel).await,
            Err(StorageError::Cancelled)
        ));
        assert!(matches!(
            backend.directory_exists("x", &cancel).await,
            Err(StorageError::Cancelled)
        ));
    }
}
