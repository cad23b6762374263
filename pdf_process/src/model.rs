use studybuddy_core::{ConfigError, Settings};

/// Limits applied while reading a PDF.
#[derive(Debug, Clone, PartialEq)]
pub struct PdfLimits {
    /// Maximum input size in megabytes.
    pub max_size_mb: f64,
    /// Maximum page count; larger documents are rejected before extraction.
    pub max_pages: usize,
    /// Pages extracted per batch.
    pub batch_size: usize,
}

impl Default for PdfLimits {
    fn default() -> Self {
        Self {
            max_size_mb: 50.0,
            max_pages: 500,
            batch_size: 10,
        }
    }
}

impl PdfLimits {
    /// Takes the PDF-related values from `settings`.
    #[must_use]
    pub const fn from_settings(settings: &Settings) -> Self {
        Self {
            max_size_mb: settings.max_file_size_mb,
            max_pages: settings.max_pdf_pages,
            batch_size: settings.pdf_batch_size,
        }
    }

    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if self.max_size_mb.is_nan() || self.max_size_mb <= 0.0 {
            return Err(ConfigError::NonPositive {
                name: "max_size_mb",
            });
        }
        if self.max_pages == 0 {
            return Err(ConfigError::Zero { name: "max_pages" });
        }
        if self.batch_size == 0 {
            return Err(ConfigError::Zero { name: "batch_size" });
        }
        Ok(())
    }
}

/// Text and bookkeeping from a successfully read PDF.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedPdf {
    /// Normalized text of all pages, in page order.
    pub text: String,
    /// Total pages in the document.
    pub page_count: usize,
    /// Information dictionary entries, when present.
    pub metadata: DocumentMeta,
}

/// Minimal PDF metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentMeta {
    /// Optional title from the information dictionary.
    pub title: Option<String>,
    /// Optional author from the information dictionary.
    pub author: Option<String>,
}
