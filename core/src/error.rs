//! Error kinds reported by the ingestion pipeline.

use thiserror::Error;

/// Input rejected before any parsing starts.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The file extension is not one of the supported types.
    #[error("unsupported file type `{extension}`; upload a PDF or TXT file")]
    UnsupportedType {
        /// Lower-cased extension of the rejected name (empty when there is none).
        extension: String,
    },
    /// The file is larger than the configured upload limit.
    #[error("file is too large ({size_bytes} bytes, limit is {limit_bytes} bytes)")]
    TooLarge {
        /// Size of the rejected input.
        size_bytes: u64,
        /// Maximum accepted size.
        limit_bytes: u64,
    },
    /// The file contains no bytes.
    #[error("file is empty")]
    Empty,
}

/// Failure while extracting text from an accepted file.
#[derive(Debug, Error)]
pub enum ProcessingError {
    /// The bytes do not carry a PDF signature.
    #[error("file is not a valid PDF")]
    InvalidFormat,
    /// The document exceeds the page limit.
    #[error("PDF has {pages} pages, the limit is {limit}")]
    TooManyPages {
        /// Pages in the document.
        pages: usize,
        /// Configured maximum.
        limit: usize,
    },
    /// Every page extracted to empty text.
    #[error("no extractable text found (scanned or image-only PDF?)")]
    NoExtractableText,
    /// The parser could not read the document, or it is password protected.
    #[error("PDF is corrupt or encrypted")]
    CorruptOrEncrypted {
        /// Parser detail, logged but not shown to users.
        reason: String,
    },
    /// The decoded text is empty after trimming.
    #[error("document contains no text")]
    EmptyText,
    /// Chunking produced nothing worth storing.
    #[error("no valid text found in document")]
    NoValidChunks,
    /// Reading the upload failed.
    #[error("failed to read upload")]
    Io(#[from] std::io::Error),
}

/// Invalid tunables.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The window would never advance.
    #[error("chunk overlap ({overlap}) must be smaller than chunk size ({chunk_size})")]
    ChunkOverlap {
        /// Configured overlap.
        overlap: usize,
        /// Configured chunk size.
        chunk_size: usize,
    },
    /// A count that must be at least one was zero.
    #[error("{name} must be at least 1")]
    Zero {
        /// Setting name.
        name: &'static str,
    },
    /// A limit that must be strictly positive was not.
    #[error("{name} must be a positive number")]
    NonPositive {
        /// Setting name.
        name: &'static str,
    },
    /// An override could not be parsed.
    #[error("invalid value `{value}` for {key}")]
    InvalidValue {
        /// Environment key.
        key: String,
        /// Raw value.
        value: String,
    },
}

/// Coarse category of an [`IngestError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Bad input detected before processing.
    Validation,
    /// Failure during extraction.
    Processing,
    /// Invalid tunables.
    Config,
}

/// Any failure of a single ingestion.
#[derive(Debug, Error)]
pub enum IngestError {
    /// See [`ValidationError`].
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// See [`ProcessingError`].
    #[error(transparent)]
    Processing(#[from] ProcessingError),
    /// See [`ConfigError`].
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl IngestError {
    /// Returns the coarse category.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) => ErrorKind::Validation,
            Self::Processing(_) => ErrorKind::Processing,
            Self::Config(_) => ErrorKind::Config,
        }
    }

    /// Returns a stable snake-case reason, suitable for logs and metrics labels.
    #[must_use]
    pub const fn reason(&self) -> &'static str {
        match self {
            Self::Validation(err) => match err {
                ValidationError::UnsupportedType { .. } => "unsupported_type",
                ValidationError::TooLarge { .. } => "too_large",
                ValidationError::Empty => "empty",
            },
            Self::Processing(err) => match err {
                ProcessingError::InvalidFormat => "invalid_format",
                ProcessingError::TooManyPages { .. } => "too_many_pages",
                ProcessingError::NoExtractableText => "no_extractable_text",
                ProcessingError::CorruptOrEncrypted { .. } => "corrupt_or_encrypted",
                ProcessingError::EmptyText => "empty",
                ProcessingError::NoValidChunks => "no_valid_chunks",
                ProcessingError::Io(_) => "io",
            },
            Self::Config(_) => "invalid_config",
        }
    }
}

/// An [`IngestError`] tagged with the file it belongs to.
///
/// The display form is the message shown to users: the file name and the
/// reason, without parser internals.
#[derive(Debug, Error)]
#[error("could not process {file}: {error}")]
pub struct FileError {
    /// Display name of the offending file.
    pub file: String,
    /// What went wrong.
    #[source]
    pub error: IngestError,
}

impl FileError {
    /// Tags `error` with `file`.
    pub fn new(file: impl Into<String>, error: impl Into<IngestError>) -> Self {
        Self {
            file: file.into(),
            error: error.into(),
        }
    }
}
