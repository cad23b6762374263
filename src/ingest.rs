//! Upload-to-store pipeline.

use std::io::Read;

use serde::Serialize;
use studybuddy_attachments::{
    FileKind, Upload, read_text_bytes, validate_file_size, validate_file_type,
};
use studybuddy_core::{
    AnswerModel, BatchProgress, FileError, IngestError, ProcessingError, Settings,
};
use studybuddy_pdf_process::{PdfLimits, extract_pdf};
use studybuddy_rag::{
    Answer, ChunkStore, DocumentId, FixedSizeChunker, clean_text, validate_chunk,
};

/// Summary of a successfully ingested upload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IngestedDocument {
    /// Identity in the store. Re-uploading a file with the same name keeps it.
    pub doc_id: DocumentId,
    /// Display name.
    pub doc_name: String,
    /// Chunks stored for the document.
    pub chunk_count: usize,
    /// Page count for PDFs.
    pub page_count: Option<usize>,
}

struct Prepared {
    chunks: Vec<String>,
    page_count: Option<usize>,
}

/// Validates, loads, cleans and chunks one upload, then stores the chunks.
///
/// The store is only touched after every step succeeded, so a failing upload never
/// leaves partial chunks behind. A document already stored under the same display name
/// is replaced in place and keeps its id.
///
/// `progress` receives `(pages_done, total_pages)` after each PDF page batch.
///
/// # Errors
/// Any validation, loading or configuration failure, tagged with the upload's name.
pub fn ingest_upload<R: Read>(
    store: &mut ChunkStore,
    upload: Upload<R>,
    settings: &Settings,
    progress: Option<&mut dyn BatchProgress>,
) -> Result<IngestedDocument, FileError> {
    let doc_name = upload.name().to_string();
    let prepared = match prepare(upload, settings, progress) {
        Ok(prepared) => prepared,
        Err(error) => {
            tracing::warn!(
                file = %doc_name,
                reason = error.reason(),
                %error,
                detail = ?error,
                "ingestion failed"
            );
            return Err(FileError::new(doc_name, error));
        }
    };

    let doc_id = store
        .find_by_name(&doc_name)
        .cloned()
        .unwrap_or_else(DocumentId::generate);
    let chunk_count = store.upsert_doc(doc_id.clone(), doc_name.as_str(), prepared.chunks);
    tracing::info!(file = %doc_name, %doc_id, chunks = chunk_count, "ingested document");

    Ok(IngestedDocument {
        doc_id,
        doc_name,
        chunk_count,
        page_count: prepared.page_count,
    })
}

fn prepare<R: Read>(
    upload: Upload<R>,
    settings: &Settings,
    progress: Option<&mut dyn BatchProgress>,
) -> Result<Prepared, IngestError> {
    let chunker = FixedSizeChunker::from_settings(settings)?;
    validate_file_type(upload.name())?;
    validate_file_size(&upload, settings.max_file_size_mb)?;

    let kind = upload.kind();
    let bytes = upload.read_bytes().map_err(ProcessingError::Io)?;
    let (text, page_count) = match kind {
        FileKind::Pdf => {
            let pdf = extract_pdf(&bytes, &PdfLimits::from_settings(settings), progress)?;
            (pdf.text, Some(pdf.page_count))
        }
        FileKind::Text => (read_text_bytes(&bytes)?, None),
    };
    drop(bytes);

    let cleaned = clean_text(&text);
    let chunks: Vec<String> = chunker
        .chunks(&cleaned)
        .filter(|chunk| validate_chunk(chunk))
        .map(str::to_owned)
        .collect();
    if chunks.is_empty() {
        return Err(ProcessingError::NoValidChunks.into());
    }
    Ok(Prepared { chunks, page_count })
}

/// Ingests several uploads, one result per upload in order.
///
/// A failing upload does not affect the others. PDF batch progress is logged.
pub fn ingest_batch<R, I>(
    store: &mut ChunkStore,
    uploads: I,
    settings: &Settings,
) -> Vec<Result<IngestedDocument, FileError>>
where
    R: Read,
    I: IntoIterator<Item = Upload<R>>,
{
    uploads
        .into_iter()
        .map(|upload| {
            let name = upload.name().to_string();
            let mut log_progress = |done: usize, total: usize| {
                tracing::info!(file = %name, done, total, "extracted PDF pages");
            };
            ingest_upload(store, upload, settings, Some(&mut log_progress))
        })
        .collect()
}

/// Removes a document from the store. Returns whether it was present.
pub fn remove_document(store: &mut ChunkStore, doc_id: &DocumentId) -> bool {
    let removed = store.remove_doc(doc_id);
    if removed {
        tracing::info!(%doc_id, "removed document");
    }
    removed
}

/// Answers `question` from everything in `store`, using `settings.top_k` and
/// `settings.max_context_chars`.
///
/// # Errors
/// See [`studybuddy_rag::answer_question`].
pub async fn answer_question<M: AnswerModel>(
    store: &ChunkStore,
    question: &str,
    settings: &Settings,
    model: &M,
) -> studybuddy_rag::Result<Answer> {
    studybuddy_rag::answer_question(
        model,
        question,
        store.all_chunks(),
        settings.top_k,
        settings.max_context_chars,
    )
    .await
}
