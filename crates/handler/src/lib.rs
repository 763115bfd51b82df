mod document;
mod temp;

pub use document::DocumentHandler;
pub use temp::TempFileHandler;
