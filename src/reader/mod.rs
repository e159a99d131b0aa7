mod decompress;
mod log_file;

pub use decompress::ContentHint;
pub use log_file::{Record, read_object};
