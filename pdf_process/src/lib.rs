//! Memory-bounded PDF text extraction.
//!
//! The size cap is checked before parsing and the page cap before any text is extracted.
//! Parsing keeps the raw object table of the whole file in memory, so peak memory is
//! bounded by the size cap plus one batch of decoded text. Pages are then extracted in
//! fixed-size batches, and each page's content streams are dropped from the object table
//! as soon as no remaining page references them, which shrinks what stays resident while
//! later batches run.
//!
//! ```rust,no_run
//! use studybuddy_pdf_process::{PdfLimits, read_pdf_bytes};
//!
//! # fn demo(bytes: &[u8]) -> studybuddy_core::Result<()> {
//! let mut report = |done: usize, total: usize| println!("page {done}/{total}");
//! let text = read_pdf_bytes(bytes, &PdfLimits::default(), Some(&mut report))?;
//! # Ok(()) }
//! ```

mod model;
mod parser;

pub use model::{DocumentMeta, ExtractedPdf, PdfLimits};

use studybuddy_core::{BatchProgress, Result};

/// Reads the text of a PDF held in memory.
///
/// `progress` is invoked once per completed batch with `(pages_done, total_pages)`.
///
/// # Errors
/// - [`ProcessingError::InvalidFormat`](studybuddy_core::ProcessingError::InvalidFormat)
///   when the `%PDF` signature is missing (including inputs shorter than 4 bytes);
/// - [`ValidationError::TooLarge`](studybuddy_core::ValidationError::TooLarge) above
///   `limits.max_size_mb`;
/// - [`ProcessingError::CorruptOrEncrypted`](studybuddy_core::ProcessingError::CorruptOrEncrypted)
///   when the document cannot be parsed, is encrypted, or a page fails to extract;
/// - [`ProcessingError::TooManyPages`](studybuddy_core::ProcessingError::TooManyPages)
///   above `limits.max_pages`, before any extraction;
/// - [`ProcessingError::NoExtractableText`](studybuddy_core::ProcessingError::NoExtractableText)
///   when every page is empty.
pub fn read_pdf_bytes(
    bytes: &[u8],
    limits: &PdfLimits,
    progress: Option<&mut dyn BatchProgress>,
) -> Result<String> {
    extract_pdf(bytes, limits, progress).map(|pdf| pdf.text)
}

/// Like [`read_pdf_bytes`], also returning the page count and document metadata.
///
/// # Errors
/// Same as [`read_pdf_bytes`].
pub fn extract_pdf(
    bytes: &[u8],
    limits: &PdfLimits,
    progress: Option<&mut dyn BatchProgress>,
) -> Result<ExtractedPdf> {
    parser::parse_from_bytes(bytes, limits, progress)
}

#[cfg(test)]
pub(crate) mod test_support {
    use lopdf::content::{Content, Operation};
    use lopdf::{Document, Object, Stream, dictionary};

    /// Builds a PDF with one line of Helvetica text per page.
    pub(crate) fn build_pdf(pages: &[&str]) -> Vec<u8> {
        build_pdf_with(pages, |_| {})
    }

    pub(crate) fn build_pdf_with(pages: &[&str], customize: impl FnOnce(&mut Document)) -> Vec<u8> {
        let mut doc = Document::with_version("1.4");
        let pages_id = doc.new_object_id();
        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Helvetica",
            "Encoding" => "WinAnsiEncoding",
        });
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! { "F1" => font_id },
        });

        let mut kids: Vec<Object> = Vec::with_capacity(pages.len());
        for text in pages {
            let content = Content {
                operations: vec![
                    Operation::new("BT", vec![]),
                    Operation::new("Tf", vec!["F1".into(), 12.into()]),
                    Operation::new("Td", vec![72.into(), 720.into()]),
                    Operation::new("Tj", vec![Object::string_literal(*text)]),
                    Operation::new("ET", vec![]),
                ],
            };
            let content_id =
                doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Contents" => content_id,
                "Resources" => resources_id,
                "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
            });
            kids.push(page_id.into());
        }

        let count = i64::try_from(pages.len()).unwrap();
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => count,
            }),
        );
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);
        customize(&mut doc);

        let mut bytes = Vec::new();
        doc.save_to(&mut bytes).unwrap();
        bytes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{build_pdf, build_pdf_with};
    use lopdf::{Object, dictionary};
    use studybuddy_core::{ConfigError, IngestError, ProcessingError, ValidationError};

    fn limits(max_pages: usize, batch_size: usize) -> PdfLimits {
        PdfLimits {
            max_size_mb: 1.0,
            max_pages,
            batch_size,
        }
    }

    #[test]
    fn missing_signature_is_invalid_format() {
        let cases: [&[u8]; 5] = [b"", b"%", b"%PD", b"Not a PDF file", b"PDF-1.4 without percent"];
        for bytes in cases {
            let err = read_pdf_bytes(bytes, &limits(500, 10), None).unwrap_err();
            assert!(
                matches!(err, IngestError::Processing(ProcessingError::InvalidFormat)),
                "{bytes:?} gave {err:?}"
            );
        }
    }

    #[test]
    fn oversize_rejected_before_parsing() {
        let mut large = b"%PDF-1.4\n".to_vec();
        large.resize(2 * 1024 * 1024, b'0');
        let err = read_pdf_bytes(&large, &limits(500, 10), None).unwrap_err();
        assert!(matches!(
            err,
            IngestError::Validation(ValidationError::TooLarge { .. })
        ));
    }

    #[test]
    fn three_pages_in_one_batch() {
        let bytes = build_pdf(&["Newton's first law", "Newton's second law", "Newton's third law"]);
        let mut calls = Vec::new();
        let mut record = |done: usize, total: usize| calls.push((done, total));

        let pdf = extract_pdf(&bytes, &limits(500, 10), Some(&mut record)).unwrap();

        assert_eq!(calls, vec![(3, 3)]);
        assert_eq!(pdf.page_count, 3);
        assert_eq!(
            pdf.text,
            "Newton's first law\nNewton's second law\nNewton's third law"
        );
    }

    #[test]
    fn progress_reported_per_batch_in_page_order() {
        let bytes = build_pdf(&["one", "two", "three", "four", "five"]);
        let mut calls = Vec::new();
        let mut record = |done: usize, total: usize| calls.push((done, total));

        let text = read_pdf_bytes(&bytes, &limits(500, 2), Some(&mut record)).unwrap();

        assert_eq!(calls, vec![(2, 5), (4, 5), (5, 5)]);
        assert_eq!(text, "one\ntwo\nthree\nfour\nfive");
    }

    #[test]
    fn blank_page_inside_a_batch_is_skipped() {
        let bytes = build_pdf(&["alpha", "", "gamma", "delta"]);
        let text = read_pdf_bytes(&bytes, &limits(500, 3), None).unwrap();
        assert_eq!(text, "alpha\ngamma\ndelta");
    }

    #[test]
    fn too_many_pages_rejected_before_extraction() {
        let bytes = build_pdf(&["a", "b", "c"]);
        let mut calls = 0;
        let mut count = |_: usize, _: usize| calls += 1;

        let err = read_pdf_bytes(&bytes, &limits(2, 1), Some(&mut count)).unwrap_err();

        assert!(matches!(
            err,
            IngestError::Processing(ProcessingError::TooManyPages { pages: 3, limit: 2 })
        ));
        assert_eq!(calls, 0);
    }

    #[test]
    fn blank_pages_have_no_extractable_text() {
        let bytes = build_pdf(&["", "   "]);
        let err = read_pdf_bytes(&bytes, &limits(500, 10), None).unwrap_err();
        assert!(matches!(
            err,
            IngestError::Processing(ProcessingError::NoExtractableText)
        ));
    }

    #[test]
    fn garbage_after_signature_is_not_extracted() {
        let err = read_pdf_bytes(b"%PDF-1.4\nthis is not really a pdf", &limits(500, 10), None)
            .unwrap_err();
        assert!(matches!(
            err,
            IngestError::Processing(
                ProcessingError::CorruptOrEncrypted { .. } | ProcessingError::NoExtractableText
            )
        ));
    }

    #[test]
    fn encrypted_documents_rejected() {
        let bytes = build_pdf_with(&["secret"], |doc| {
            let encrypt_id = doc.add_object(dictionary! {
                "Filter" => "Standard",
                "V" => 1,
                "R" => 2,
                "O" => Object::string_literal(vec![0u8; 32]),
                "U" => Object::string_literal(vec![0u8; 32]),
                "P" => -4,
            });
            doc.trailer.set("Encrypt", encrypt_id);
        });
        let err = read_pdf_bytes(&bytes, &limits(500, 10), None).unwrap_err();
        assert!(matches!(
            err,
            IngestError::Processing(ProcessingError::CorruptOrEncrypted { .. })
        ));
    }

    #[test]
    fn metadata_from_info_dictionary() {
        let bytes = build_pdf_with(&["body"], |doc| {
            let info_id = doc.add_object(dictionary! {
                "Title" => Object::string_literal("Thermodynamics"),
                "Author" => Object::string_literal(" R. Clausius "),
            });
            doc.trailer.set("Info", info_id);
        });
        let pdf = extract_pdf(&bytes, &limits(500, 10), None).unwrap();
        assert_eq!(pdf.metadata.title.as_deref(), Some("Thermodynamics"));
        assert_eq!(pdf.metadata.author.as_deref(), Some("R. Clausius"));
    }

    #[test]
    fn zero_batch_size_is_config_error() {
        let bytes = build_pdf(&["x"]);
        let err = read_pdf_bytes(&bytes, &limits(500, 0), None).unwrap_err();
        assert!(matches!(
            err,
            IngestError::Config(ConfigError::Zero { name: "batch_size" })
        ));
    }
}
