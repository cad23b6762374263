use std::collections::HashMap;

use lopdf::{Document, ObjectId};
use studybuddy_core::{
    BatchProgress, IngestError, ProcessingError, ValidationError, size_limit_bytes,
};

use crate::model::{DocumentMeta, ExtractedPdf, PdfLimits};

const PDF_SIGNATURE: &[u8] = b"%PDF";

pub(crate) fn parse_from_bytes(
    bytes: &[u8],
    limits: &PdfLimits,
    mut progress: Option<&mut dyn BatchProgress>,
) -> Result<ExtractedPdf, IngestError> {
    limits.validate()?;
    if !bytes.starts_with(PDF_SIGNATURE) {
        return Err(ProcessingError::InvalidFormat.into());
    }
    let limit_bytes = size_limit_bytes(limits.max_size_mb);
    let size_bytes = bytes.len() as u64;
    if size_bytes > limit_bytes {
        return Err(ValidationError::TooLarge {
            size_bytes,
            limit_bytes,
        }
        .into());
    }

    let mut doc = Document::load_mem(bytes).map_err(|e| corrupt(e.to_string()))?;
    if doc.trailer.get(b"Encrypt").is_ok() {
        return Err(corrupt("document is encrypted".to_string()).into());
    }

    let pages: Vec<(u32, ObjectId)> = doc.get_pages().into_iter().collect();
    let total = pages.len();
    if total > limits.max_pages {
        return Err(ProcessingError::TooManyPages {
            pages: total,
            limit: limits.max_pages,
        }
        .into());
    }

    let metadata = extract_metadata(&doc);
    let mut content_refs = content_refcounts(&doc, &pages);
    let mut text = String::new();
    let mut done = 0;

    for batch in pages.chunks(limits.batch_size) {
        let batch_text = extract_batch(&mut doc, batch, &mut content_refs)?;
        if !batch_text.is_empty() {
            if !text.is_empty() {
                text.push('\n');
            }
            text.push_str(&batch_text);
        }
        drop(batch_text);

        done += batch.len();
        tracing::debug!(done, total, "extracted PDF page batch");
        if let Some(progress) = progress.as_deref_mut() {
            progress.on_batch_progress(done, total);
        }
    }

    if text.trim().is_empty() {
        return Err(ProcessingError::NoExtractableText.into());
    }

    Ok(ExtractedPdf {
        text,
        page_count: total,
        metadata,
    })
}

fn corrupt(reason: String) -> ProcessingError {
    ProcessingError::CorruptOrEncrypted { reason }
}

/// Extracts one batch as normalized text, then releases each page's content streams once
/// no later page needs them.
///
/// lopdf walks the page tree on every `extract_text` call, so the whole batch goes through
/// one call. Every text object ends in a newline, which keeps pages on separate lines.
fn extract_batch(
    doc: &mut Document,
    batch: &[(u32, ObjectId)],
    content_refs: &mut HashMap<ObjectId, usize>,
) -> Result<String, ProcessingError> {
    let numbers: Vec<u32> = batch.iter().map(|&(number, _)| number).collect();
    let raw = doc
        .extract_text(&numbers)
        .map_err(|e| corrupt(format!("pages {numbers:?}: {e}")))?;
    for &(_, page_id) in batch {
        release_page(doc, page_id, content_refs);
    }
    Ok(normalize_text(&raw))
}

/// Counts how many pages reference each content stream.
fn content_refcounts(doc: &Document, pages: &[(u32, ObjectId)]) -> HashMap<ObjectId, usize> {
    let mut refs = HashMap::new();
    for &(_, page_id) in pages {
        for content_id in doc.get_page_contents(page_id) {
            *refs.entry(content_id).or_insert(0) += 1;
        }
    }
    refs
}

fn release_page(doc: &mut Document, page_id: ObjectId, content_refs: &mut HashMap<ObjectId, usize>) {
    for content_id in doc.get_page_contents(page_id) {
        let Some(count) = content_refs.get_mut(&content_id) else {
            continue;
        };
        *count -= 1;
        if *count == 0 {
            content_refs.remove(&content_id);
            doc.objects.remove(&content_id);
        }
    }
}

fn normalize_text(text: &str) -> String {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

fn extract_metadata(doc: &Document) -> DocumentMeta {
    let info = doc
        .trailer
        .get(b"Info")
        .and_then(lopdf::Object::as_reference)
        .and_then(|id| doc.get_dictionary(id));
    let Ok(info) = info else {
        return DocumentMeta::default();
    };
    let field = |key: &[u8]| {
        info.get(key)
            .and_then(lopdf::Object::as_str)
            .ok()
            .map(to_clean_string)
            .filter(|value| !value.is_empty())
    };
    DocumentMeta {
        title: field(b"Title"),
        author: field(b"Author"),
    }
}

fn to_clean_string(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).trim().to_string()
}
