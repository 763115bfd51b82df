pub mod encoding;
pub mod path;
pub mod errors;

pub use encoding::*;
pub use path::*;
pub use errors::*;
