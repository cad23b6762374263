//! Uploaded files as the ingestion pipeline sees them.
//!
//! An [`Upload`] is a plain data contract: a display name, the MIME type the front end
//! declared, the size, and a reader over the bytes. Validation looks only at the name
//! and the recorded size, so an oversized file is rejected without reading it.

mod text;
mod upload;
mod validate;

pub use text::read_text_bytes;
pub use upload::{FileKind, Upload};
pub use validate::{ALLOWED_EXTENSIONS, validate_file_size, validate_file_type};
