mod models;
mod defaults;
mod loader;
mod validation;
mod errors;

pub use models::*;
pub use defaults::{DEFAULT_CONFIG_TEMPLATE, DEFAULT_TEMP_FOLDER_NAME};
pub use validation::FTP_SCHEME;
pub use errors::ConfigError;
