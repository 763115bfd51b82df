use thiserror::Error;

/// FTP reply code for "requested action not taken, file unavailable"
pub const FILE_UNAVAILABLE: u32 = 550;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Invalid storage configuration: {0}")]
    ConfigError(#[from] docstore_config::ConfigError),

    #[error("Invalid path: {0}")]
    InvalidPath(String),

    #[error("FTP error{}: {message}", reply_code(.code))]
    ProtocolError { code: Option<u32>, message: String },

    #[error("FTP connection failed: {0}")]
    ConnectionError(String),

    #[error("Operation cancelled")]
    Cancelled,

    #[error("Background task failed: {0}")]
    JoinError(#[from] tokio::task::JoinError),
}

impl StorageError {
    /// True for the FTP 550 "file unavailable" reply
    pub fn is_file_unavailable(&self) -> bool {
        matches!(self, StorageError::ProtocolError { code: Some(FILE_UNAVAILABLE), .. })
    }

    pub fn is_not_found(&self) -> bool {
        match self {
            StorageError::IoError(e) => e.kind() == std::io::ErrorKind::NotFound,
            other => other.is_file_unavailable(),
        }
    }
}

impl From<docstore_utils::UtilsError> for StorageError {
    fn from(err: docstore_utils::UtilsError) -> Self {
        match err {
            docstore_utils::UtilsError::PathError(path) => StorageError::InvalidPath(path),
        }
    }
}

fn reply_code(code: &Option<u32>) -> String {
    code.map(|c| format!(" {}", c)).unwrap_or_default()
}
