use thiserror::Error;

#[derive(Error, Debug)]
pub enum UtilsError {
    #[error("Invalid path: {0}")]
    PathError(String),
}
