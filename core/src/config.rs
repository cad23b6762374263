//! Tunables for ingestion and retrieval.

// Megabyte limits are fractional by design; the byte conversion saturates.
#![allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]

use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Converts a megabyte limit into bytes (`mb * 1024 * 1024`).
#[must_use]
pub fn size_limit_bytes(max_size_mb: f64) -> u64 {
    (max_size_mb * 1024.0 * 1024.0) as u64
}

/// Settings consumed by the ingestion pipeline and the retriever.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Upload size limit in megabytes.
    pub max_file_size_mb: f64,
    /// Maximum number of pages accepted in a PDF.
    pub max_pdf_pages: usize,
    /// Pages extracted per batch; bounds peak memory.
    pub pdf_batch_size: usize,
    /// Characters per chunk.
    pub chunk_size: usize,
    /// Characters shared by consecutive chunks.
    pub chunk_overlap: usize,
    /// Number of chunks retrieved per question.
    pub top_k: usize,
    /// Character budget of the context handed to the answer model.
    pub max_context_chars: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            max_file_size_mb: 50.0,
            max_pdf_pages: 500,
            pdf_batch_size: 10,
            chunk_size: 1200,
            chunk_overlap: 200,
            top_k: 5,
            max_context_chars: 14_000,
        }
    }
}

impl Settings {
    /// Creates settings with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a builder for custom settings.
    #[must_use]
    pub fn builder() -> SettingsBuilder {
        SettingsBuilder::new()
    }

    /// Reads overrides from the process environment.
    ///
    /// Recognised variables: `MAX_FILE_SIZE_MB`, `MAX_PDF_PAGES`, `PDF_BATCH_SIZE`,
    /// `CHUNK_SIZE`, `CHUNK_OVERLAP`, `TOP_K`, `MAX_CONTEXT_CHARS`.
    ///
    /// # Errors
    /// Returns [`ConfigError`] when a variable does not parse or the result is invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Like [`Settings::from_env`], reading variables through `lookup`.
    ///
    /// # Errors
    /// Returns [`ConfigError`] when a value does not parse or the result is invalid.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut settings = Self::default();
        override_from(&lookup, "MAX_FILE_SIZE_MB", &mut settings.max_file_size_mb)?;
        override_from(&lookup, "MAX_PDF_PAGES", &mut settings.max_pdf_pages)?;
        override_from(&lookup, "PDF_BATCH_SIZE", &mut settings.pdf_batch_size)?;
        override_from(&lookup, "CHUNK_SIZE", &mut settings.chunk_size)?;
        override_from(&lookup, "CHUNK_OVERLAP", &mut settings.chunk_overlap)?;
        override_from(&lookup, "TOP_K", &mut settings.top_k)?;
        override_from(&lookup, "MAX_CONTEXT_CHARS", &mut settings.max_context_chars)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Checks the invariants the pipeline relies on.
    ///
    /// # Errors
    /// Returns the first violated constraint.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_file_size_mb.is_nan() || self.max_file_size_mb <= 0.0 {
            return Err(ConfigError::NonPositive {
                name: "max_file_size_mb",
            });
        }
        for (name, value) in [
            ("max_pdf_pages", self.max_pdf_pages),
            ("pdf_batch_size", self.pdf_batch_size),
            ("chunk_size", self.chunk_size),
            ("top_k", self.top_k),
            ("max_context_chars", self.max_context_chars),
        ] {
            if value == 0 {
                return Err(ConfigError::Zero { name });
            }
        }
        if self.chunk_overlap >= self.chunk_size {
            return Err(ConfigError::ChunkOverlap {
                overlap: self.chunk_overlap,
                chunk_size: self.chunk_size,
            });
        }
        Ok(())
    }

    /// Upload size limit in bytes.
    #[must_use]
    pub fn max_file_size_bytes(&self) -> u64 {
        size_limit_bytes(self.max_file_size_mb)
    }
}

fn override_from<F, T>(lookup: &F, key: &str, slot: &mut T) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    let Some(raw) = lookup(key) else {
        return Ok(());
    };
    *slot = raw
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidValue {
            key: key.to_string(),
            value: raw.clone(),
        })?;
    Ok(())
}

/// Builder for [`Settings`].
#[derive(Debug, Default)]
pub struct SettingsBuilder {
    settings: Settings,
}

impl SettingsBuilder {
    /// Creates a builder seeded with default values.
    #[must_use]
    pub fn new() -> Self {
        Self {
            settings: Settings::default(),
        }
    }

    /// Sets the upload size limit in megabytes.
    #[must_use]
    pub const fn max_file_size_mb(mut self, mb: f64) -> Self {
        self.settings.max_file_size_mb = mb;
        self
    }

    /// Sets the PDF page limit.
    #[must_use]
    pub const fn max_pdf_pages(mut self, pages: usize) -> Self {
        self.settings.max_pdf_pages = pages;
        self
    }

    /// Sets the number of pages extracted per batch.
    #[must_use]
    pub const fn pdf_batch_size(mut self, pages: usize) -> Self {
        self.settings.pdf_batch_size = pages;
        self
    }

    /// Sets chunk size and overlap, in characters.
    #[must_use]
    pub const fn chunking(mut self, chunk_size: usize, overlap: usize) -> Self {
        self.settings.chunk_size = chunk_size;
        self.settings.chunk_overlap = overlap;
        self
    }

    /// Sets how many chunks are retrieved per question.
    #[must_use]
    pub const fn top_k(mut self, k: usize) -> Self {
        self.settings.top_k = k;
        self
    }

    /// Sets the context budget handed to the answer model.
    #[must_use]
    pub const fn max_context_chars(mut self, chars: usize) -> Self {
        self.settings.max_context_chars = chars;
        self
    }

    /// Validates and returns the settings.
    ///
    /// # Errors
    /// Returns [`ConfigError`] if the combination is invalid.
    pub fn build(self) -> Result<Settings, ConfigError> {
        self.settings.validate()?;
        Ok(self.settings)
    }
}
