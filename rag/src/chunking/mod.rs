//! Fixed-size, overlapping text chunking.
//!
//! Text is cut into windows of `chunk_size` characters; each window starts
//! `chunk_size - overlap` characters after the previous one. Dropping the first
//! `overlap` characters of every chunk after the first and concatenating the
//! rest reproduces the input exactly.

mod fixed;

pub use fixed::{FixedSizeChunker, TextChunks};

use studybuddy_core::ConfigError;

/// Splits `text` into overlapping chunks of at most `chunk_size` characters.
///
/// The returned iterator borrows `text`; it yields nothing for empty input and stops
/// at the first window that reaches the end of the text.
///
/// ```rust
/// use studybuddy_rag::chunking::chunk_text;
///
/// let chunks: Vec<&str> = chunk_text("abcdefgh", 4, 1).unwrap().collect();
/// assert_eq!(chunks, ["abcd", "defg", "gh"]);
/// ```
///
/// # Errors
/// [`ConfigError::Zero`] when `chunk_size` is 0, [`ConfigError::ChunkOverlap`] when
/// `overlap >= chunk_size`.
pub fn chunk_text(
    text: &str,
    chunk_size: usize,
    overlap: usize,
) -> Result<TextChunks<'_>, ConfigError> {
    Ok(FixedSizeChunker::new(chunk_size, overlap)?.chunks(text))
}

/// Whether a chunk is worth storing: anything but empty or whitespace-only text.
#[must_use]
pub fn validate_chunk(text: &str) -> bool {
    !text.trim().is_empty()
}
