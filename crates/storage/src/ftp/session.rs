use super::endpoint::FtpEndpoint;
use crate::StorageError;
use suppaftp::types::FileType;
use suppaftp::{FtpError, FtpStream};

/// One logged-in FTP control connection.
///
/// Paths are absolute server-side paths. Implementors report server replies as
/// [`StorageError::ProtocolError`] carrying the reply code, and transport
/// failures as [`StorageError::ConnectionError`].
#[cfg_attr(test, mockall::automock)]
pub trait FtpSession: Send {
    /// SIZE
    fn size(&mut self, path: &str) -> Result<usize, StorageError>;

    /// NLST
    fn list(&mut self, path: &str) -> Result<Vec<String>, StorageError>;

    /// MKD, one level only
    fn make_directory(&mut self, path: &str) -> Result<(), StorageError>;

    /// RMD
    fn remove_directory(&mut self, path: &str) -> Result<(), StorageError>;

    /// DELE
    fn delete(&mut self, path: &str) -> Result<(), StorageError>;

    /// RETR into memory
    fn retrieve(&mut self, path: &str) -> Result<Vec<u8>, StorageError>;

    /// STOR, replacing any existing file
    fn store(&mut self, path: &str, data: &[u8]) -> Result<(), StorageError>;

    /// QUIT
    fn quit(&mut self) -> Result<(), StorageError>;
}

/// [`FtpSession`] over a plain `suppaftp` stream in binary mode
pub struct SuppaSession {
    stream: FtpStream,
}

impl SuppaSession {
    pub fn connect(endpoint: &FtpEndpoint, username: &str, password: &str) -> Result<Self, StorageError> {
        let mut stream = FtpStream::connect(endpoint.address())?;
        stream.login(username, password)?;
        stream.transfer_type(FileType::Binary)?;

        Ok(Self { stream })
    }
}

impl FtpSession for SuppaSession {
    fn size(&mut self, path: &str) -> Result<usize, StorageError> {
        Ok(self.stream.size(path)?)
    }

    fn list(&mut self, path: &str) -> Result<Vec<String>, StorageError> {
        Ok(self.stream.nlst(Some(path))?)
    }

    fn make_directory(&mut self, path: &str) -> Result<(), StorageError> {
        Ok(self.stream.mkdir(path)?)
    }

    fn remove_directory(&mut self, path: &str) -> Result<(), StorageError> {
        Ok(self.stream.rmdir(path)?)
    }

    fn delete(&mut self, path: &str) -> Result<(), StorageError> {
        Ok(self.stream.rm(path)?)
    }

    fn retrieve(&mut self, path: &str) -> Result<Vec<u8>, StorageError> {
        Ok(self.stream.retr_as_buffer(path)?.into_inner())
    }

    fn store(&mut self, path: &str, data: &[u8]) -> Result<(), StorageError> {
        let mut reader = data;
        self.stream.put_file(path, &mut reader)?;
        Ok(())
    }

    fn quit(&mut self) -> Result<(), StorageError> {
        Ok(self.stream.quit()?)
    }
}

impl From<FtpError> for StorageError {
    fn from(err: FtpError) -> Self {
        match err {
            FtpError::UnexpectedResponse(response) => StorageError::ProtocolError {
                code: Some(response.status as u32),
                message: String::from_utf8_lossy(&response.body).trim().to_string(),
            },
            FtpError::ConnectionError(e) => StorageError::ConnectionError(e.to_string()),
            other => StorageError::ProtocolError {
                code: None,
                message: other.to_string(),
            },
        }
    }
}
