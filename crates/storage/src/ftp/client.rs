use super::endpoint::FtpEndpoint;
use super::session::{FtpSession, SuppaSession};
use crate::backend::ensure_not_cancelled;
use crate::StorageError;
use parking_lot::Mutex;
use tokio_util::sync::CancellationToken;

const FORWARD_SLASH: char = '/';

/// FTP verbs routed through [`FtpClient::execute`]
#[derive(Debug, Clone, Copy)]
pub(crate) enum FtpCommand<'a> {
    Upload(&'a [u8]),
    Delete,
    MakeDirectory,
    RemoveDirectory,
    SizeQuery,
}

impl FtpCommand<'_> {
    fn verb(&self) -> &'static str {
        match self {
            FtpCommand::Upload(_) => "STOR",
            FtpCommand::Delete => "DELE",
            FtpCommand::MakeDirectory => "MKD",
            FtpCommand::RemoveDirectory => "RMD",
            FtpCommand::SizeQuery => "SIZE",
        }
    }

    /// Verbs for which a 550 reply counts as success
    fn tolerates_file_unavailable(&self) -> bool {
        matches!(self, FtpCommand::MakeDirectory | FtpCommand::SizeQuery)
    }
}

/// Blocking FTP operations over one lazily connected session
pub(crate) struct FtpClient {
    endpoint: FtpEndpoint,
    username: String,
    password: String,
    session: Mutex<Option<Box<dyn FtpSession>>>,
}

impl FtpClient {
    pub fn new(endpoint: FtpEndpoint, username: String, password: String) -> Self {
        Self {
            endpoint,
            username,
            password,
            session: Mutex::new(None),
        }
    }

    /// Client that uses `session` instead of dialing the server on first use
    pub fn with_session(
        endpoint: FtpEndpoint,
        username: String,
        password: String,
        session: Box<dyn FtpSession>,
    ) -> Self {
        Self {
            endpoint,
            username,
            password,
            session: Mutex::new(Some(session)),
        }
    }

    fn connect(&self) -> Result<Box<dyn FtpSession>, StorageError> {
        let address = self.endpoint.address();
        let session = SuppaSession::connect(&self.endpoint, &self.username, &self.password)?;
        tracing::info!("Connected to FTP server {} as {}", address, self.username);
        Ok(Box::new(session))
    }

    fn in_session<T>(
        &self,
        f: impl FnOnce(&mut dyn FtpSession) -> Result<T, StorageError>,
    ) -> Result<T, StorageError> {
        let mut guard = self.session.lock();
        if guard.is_none() {
            *guard = Some(self.connect()?);
        }
        let Some(session) = Option::as_mut(&mut *guard) else {
            return Err(StorageError::ConnectionError("no FTP session".to_string()));
        };

        let result = f(&mut **session);
        if let Err(StorageError::ConnectionError(e)) = &result {
            tracing::warn!("FTP connection lost ({}), reconnecting on next call", e);
            *guard = None;
        }
        result
    }

    /// Runs a single verb against `path`
    pub fn execute(&self, command: FtpCommand<'_>, path: &str, cancel: &CancellationToken) -> Result<(), StorageError> {
        ensure_not_cancelled(cancel)?;

        let target = self.endpoint.remote_path(path)?;
        tracing::debug!("FTP {} {}", command.verb(), target);

        let outcome = self.in_session(|session| match command {
            FtpCommand::Upload(data) => session.store(&target, data),
            FtpCommand::Delete => session.delete(&target),
            FtpCommand::MakeDirectory => session.make_directory(&target),
            FtpCommand::RemoveDirectory => session.remove_directory(&target),
            FtpCommand::SizeQuery => session.size(&target).map(|_| ()),
        });

        match outcome {
            Err(e) if command.tolerates_file_unavailable() && e.is_file_unavailable() => {
                tracing::warn!("FTP {} {} ignored: {}", command.verb(), target, e);
                Ok(())
            }
            other => other,
        }
    }

    /// Permissive: any answer to SIZE other than an error, including 550, means present.
    pub fn file_exists(&self, path: &str, cancel: &CancellationToken) -> Result<bool, StorageError> {
        self.execute(FtpCommand::SizeQuery, path, cancel)?;
        Ok(true)
    }

    pub fn directory_exists(&self, path: &str, cancel: &CancellationToken) -> Result<bool, StorageError> {
        ensure_not_cancelled(cancel)?;

        // Without the trailing slash some servers answer NLST on a missing
        // directory with an empty listing instead of an error.
        let mut directory = path.to_string();
        if !directory.ends_with(FORWARD_SLASH) {
            directory.push(FORWARD_SLASH);
        }
        let target = self.endpoint.remote_path(&directory)?;

        match self.in_session(|session| session.list(&target)) {
            Ok(_) => Ok(true),
            Err(e) => {
                tracing::debug!("FTP NLST {} failed, treating as missing: {}", target, e);
                Ok(false)
            }
        }
    }

    /// Creates `path` and every missing ancestor, parent before child
    pub fn create_directory(&self, path: &str, cancel: &CancellationToken) -> Result<(), StorageError> {
        ensure_not_cancelled(cancel)?;

        let prefixes = directory_prefixes(path);

        let mut existing = prefixes.len();
        while existing > 0 {
            if self.directory_exists(&prefixes[existing - 1], cancel)? {
                break;
            }
            existing -= 1;
        }

        for prefix in &prefixes[existing..] {
            self.execute(FtpCommand::MakeDirectory, prefix, cancel)?;
        }
        Ok(())
    }

    pub fn delete_directory(&self, path: &str, cancel: &CancellationToken) -> Result<(), StorageError> {
        self.execute(FtpCommand::RemoveDirectory, path, cancel)
    }

    pub fn read_all_bytes(&self, path: &str, cancel: &CancellationToken) -> Result<Vec<u8>, StorageError> {
        ensure_not_cancelled(cancel)?;

        let target = self.endpoint.remote_path(path)?;
        tracing::debug!("FTP RETR {}", target);
        self.in_session(|session| session.retrieve(&target))
    }

    pub fn write(&self, path: &str, data: &[u8], cancel: &CancellationToken) -> Result<(), StorageError> {
        self.execute(FtpCommand::Upload(data), path, cancel)
    }

    pub fn delete(&self, path: &str, cancel: &CancellationToken) -> Result<(), StorageError> {
        match self.execute(FtpCommand::Delete, path, cancel) {
            Err(e) if e.is_file_unavailable() => {
                tracing::debug!("FTP DELE {}: nothing to delete", path);
                Ok(())
            }
            other => other,
        }
    }

    /// Sends QUIT and drops the session. Later calls are no-ops.
    pub fn close(&self) {
        let Some(mut session) = self.session.lock().take() else {
            return;
        };
        match session.quit() {
            Ok(()) => tracing::info!("Closed FTP session to {}", self.endpoint.address()),
            Err(e) => tracing::warn!("FTP QUIT to {} failed: {}", self.endpoint.address(), e),
        }
    }
}

impl Drop for FtpClient {
    fn drop(&mut self) {
        self.close();
    }
}

/// `a/b/c` -> `["/a", "/a/b", "/a/b/c"]`
pub(crate) fn directory_prefixes(path: &str) -> Vec<String> {
    let normalized = path.trim().replace('\\', "/");
    let segments: Vec<&str> = normalized
        .split(FORWARD_SLASH)
        .filter(|s| !s.is_empty())
        .collect();

    (1..=segments.len())
        .map(|depth| format!("{}{}", FORWARD_SLASH, segments[..depth].join("/")))
        .collect()
}
