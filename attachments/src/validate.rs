use std::io::Read;

use studybuddy_core::{ValidationError, size_limit_bytes};

use crate::upload::{FileKind, Upload, extension_of};

/// Extensions accepted by [`validate_file_type`].
pub const ALLOWED_EXTENSIONS: &[&str] = &["pdf", "txt"];

/// Checks that `name` has a supported extension.
///
/// # Errors
/// [`ValidationError::UnsupportedType`] for anything but `.pdf` and `.txt`.
pub fn validate_file_type(name: &str) -> Result<FileKind, ValidationError> {
    let extension = extension_of(name);
    FileKind::from_extension(&extension).ok_or(ValidationError::UnsupportedType { extension })
}

/// Checks the recorded size of `upload` against `max_size_mb`. Reads no content.
///
/// # Errors
/// [`ValidationError::Empty`] for zero bytes, [`ValidationError::TooLarge`] above the limit.
pub fn validate_file_size<R: Read>(
    upload: &Upload<R>,
    max_size_mb: f64,
) -> Result<(), ValidationError> {
    let limit_bytes = size_limit_bytes(max_size_mb);
    if upload.is_empty() {
        return Err(ValidationError::Empty);
    }
    if upload.size() > limit_bytes {
        return Err(ValidationError::TooLarge {
            size_bytes: upload.size(),
            limit_bytes,
        });
    }
    Ok(())
}
