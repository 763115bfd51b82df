mod backend;
mod local;
mod ftp;
mod errors;

pub use backend::Backend;
pub use local::LocalBackend;
pub use ftp::{FtpBackend, FtpEndpoint, FtpSession};
pub use errors::*;

pub use encoding_rs::Encoding;
pub use tokio_util::sync::CancellationToken;
