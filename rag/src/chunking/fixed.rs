//! Fixed-size text chunking.

use std::iter::FusedIterator;

use studybuddy_core::{ConfigError, Settings};

/// Chunks text into fixed-size pieces with configurable overlap.
///
/// Sizes are counted in characters, never bytes, so multi-byte text is never split
/// inside a code point.
///
/// ```rust
/// use studybuddy_rag::chunking::FixedSizeChunker;
///
/// let chunker = FixedSizeChunker::new(1200, 200).unwrap();
/// let text = "A".repeat(3000);
/// let sizes: Vec<usize> = chunker.chunks(&text).map(|c| c.chars().count()).collect();
/// assert_eq!(sizes, [1200, 1200, 1000]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedSizeChunker {
    chunk_size: usize,
    overlap: usize,
}

impl FixedSizeChunker {
    /// Creates a new fixed-size chunker.
    ///
    /// # Errors
    /// Fails when `chunk_size` is 0 or `overlap >= chunk_size`.
    pub const fn new(chunk_size: usize, overlap: usize) -> Result<Self, ConfigError> {
        if chunk_size == 0 {
            return Err(ConfigError::Zero { name: "chunk_size" });
        }
        if overlap >= chunk_size {
            return Err(ConfigError::ChunkOverlap {
                overlap,
                chunk_size,
            });
        }
        Ok(Self {
            chunk_size,
            overlap,
        })
    }

    /// Creates a chunker from the `chunk_size` and `chunk_overlap` settings.
    ///
    /// # Errors
    /// Same as [`FixedSizeChunker::new`].
    pub const fn from_settings(settings: &Settings) -> Result<Self, ConfigError> {
        Self::new(settings.chunk_size, settings.chunk_overlap)
    }

    /// Maximum characters per chunk.
    #[must_use]
    pub const fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Characters shared by consecutive chunks.
    #[must_use]
    pub const fn overlap(&self) -> usize {
        self.overlap
    }

    /// Lazily chunks `text`. Call again (or clone the iterator) to restart.
    #[must_use]
    pub const fn chunks<'a>(&self, text: &'a str) -> TextChunks<'a> {
        TextChunks {
            text,
            chunk_size: self.chunk_size,
            step: self.chunk_size - self.overlap,
            start: Some(0),
        }
    }
}

impl Default for FixedSizeChunker {
    fn default() -> Self {
        Self {
            chunk_size: 1200,
            overlap: 200,
        }
    }
}

/// Iterator over the chunks of a borrowed text.
#[derive(Debug, Clone)]
pub struct TextChunks<'a> {
    text: &'a str,
    chunk_size: usize,
    step: usize,
    /// Byte offset of the next window; `None` once a window has reached the end.
    start: Option<usize>,
}

impl<'a> Iterator for TextChunks<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        let start = self.start?;
        let rest = &self.text[start..];
        if rest.is_empty() {
            self.start = None;
            return None;
        }

        let end = char_offset(rest, self.chunk_size).map_or(self.text.len(), |o| start + o);
        self.start = if end == self.text.len() {
            None
        } else {
            // step < chunk_size, so the next start lies inside this window
            char_offset(rest, self.step).map(|o| start + o)
        };
        Some(&self.text[start..end])
    }
}

impl FusedIterator for TextChunks<'_> {}

/// Byte offset of the `n`th character of `s`, or `None` if `s` has `n` or fewer characters.
fn char_offset(s: &str, n: usize) -> Option<usize> {
    s.char_indices().nth(n).map(|(i, _)| i)
}
