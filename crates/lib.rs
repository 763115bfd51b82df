// Re-export all public APIs from the workspace crates

pub use docstore_utils::*;
pub use docstore_config::*;
pub use docstore_storage::*;
pub use docstore_handler::*;

/// Prelude module for convenient imports
pub mod prelude {
    // Configuration
    pub use docstore_config::{Config, HandlerMode, HandlerSettings, LocalSettings, RemoteSettings, TempSettings};

    // Backends
    pub use docstore_storage::{Backend, CancellationToken, FtpBackend, LocalBackend, StorageError};

    // Handlers
    pub use docstore_handler::{DocumentHandler, TempFileHandler};
}
