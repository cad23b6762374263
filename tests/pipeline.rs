//! End-to-end ingestion and question answering.

mod common;

use std::io::Write;
use std::sync::Mutex;

use common::pdf_with_pages;
use studybuddy::rag::chunk_text;
use studybuddy::{
    AnswerModel, ChunkStore, IngestError, ProcessingError, Settings, Upload, ValidationError,
    answer_question, ingest_batch, ingest_upload,
};

#[test]
fn three_page_pdf_is_ingested_in_one_batch() {
    let bytes = pdf_with_pages(&[
        "Entropy measures disorder.",
        "The second law says entropy never decreases.",
        "Heat flows from hot to cold.",
    ]);
    assert!(bytes.starts_with(b"%PDF-1.4"));
    let settings = Settings::builder()
        .max_pdf_pages(500)
        .pdf_batch_size(10)
        .build()
        .unwrap();
    let mut store = ChunkStore::new();
    let mut calls = Vec::new();
    let mut record = |done: usize, total: usize| calls.push((done, total));

    let doc = ingest_upload(
        &mut store,
        Upload::from_bytes("thermo.pdf", "application/pdf", bytes),
        &settings,
        Some(&mut record),
    )
    .unwrap();

    assert_eq!(calls, vec![(3, 3)]);
    assert!(doc.chunk_count >= 1);
    assert_eq!(doc.page_count, Some(3));
    let chunks = store.get_chunks(&doc.doc_id);
    assert!(chunks[0].text().starts_with("Entropy measures disorder."));
}

#[test]
fn empty_upload_is_rejected_and_nothing_stored() {
    let mut store = ChunkStore::new();
    let err = ingest_upload(
        &mut store,
        Upload::from_bytes("empty.pdf", "application/pdf", Vec::new()),
        &Settings::default(),
        None,
    )
    .unwrap_err();

    assert!(matches!(
        err.error,
        IngestError::Validation(ValidationError::Empty)
    ));
    assert!(store.is_empty());
    assert_eq!(store.chunk_count(), 0);
}

#[test]
fn long_text_chunks_with_exact_overlap() {
    let text = "A".repeat(3000);
    let chunks: Vec<&str> = chunk_text(&text, 1200, 200).unwrap().collect();

    let lengths: Vec<usize> = chunks.iter().map(|c| c.chars().count()).collect();
    assert_eq!(lengths, [1200, 1200, 1000]);
    for pair in chunks.windows(2) {
        let tail: String = pair[0].chars().skip(1000).collect();
        let head: String = pair[1].chars().take(200).collect();
        assert_eq!(tail, head);
    }
}

#[test]
fn batch_isolates_failures() {
    let settings = Settings::builder().max_pdf_pages(2).build().unwrap();
    let uploads = [
        Upload::from_bytes("ohm.txt", "text/plain", "Ohm's law: V = IR."),
        Upload::from_bytes(
            "long.pdf",
            "application/pdf",
            pdf_with_pages(&["one", "two", "three"]),
        ),
        Upload::from_bytes("slides.pptx", "application/octet-stream", "PK"),
        Upload::from_bytes("fake.pdf", "application/pdf", "just text"),
        Upload::from_bytes("short.pdf", "application/pdf", pdf_with_pages(&["Gauss"])),
    ];
    let mut store = ChunkStore::new();

    let results = ingest_batch(&mut store, uploads, &settings);

    let reasons: Vec<&str> = results
        .iter()
        .map(|r| r.as_ref().map_or_else(|e| e.error.reason(), |_| "ok"))
        .collect();
    assert_eq!(
        reasons,
        ["ok", "too_many_pages", "unsupported_type", "invalid_format", "ok"]
    );

    let failure = results[1].as_ref().unwrap_err();
    assert_eq!(failure.file, "long.pdf");
    assert!(failure.to_string().contains("long.pdf"));

    let stats = store.get_statistics();
    assert_eq!(stats.total_docs, 2);
    let names: Vec<_> = stats.docs.iter().map(|d| d.doc_name.as_str()).collect();
    assert_eq!(names, ["ohm.txt", "short.pdf"]);
}

#[test]
fn reupload_replaces_document_and_keeps_id() {
    let mut store = ChunkStore::new();
    let settings = Settings::default();

    let first = ingest_upload(
        &mut store,
        Upload::from_bytes("notes.txt", "text/plain", "first draft"),
        &settings,
        None,
    )
    .unwrap();
    let second = ingest_upload(
        &mut store,
        Upload::from_bytes("notes.txt", "text/plain", "second draft"),
        &settings,
        None,
    )
    .unwrap();

    assert_eq!(first.doc_id, second.doc_id);
    assert_eq!(store.len(), 1);
    let chunks = store.get_chunks(&second.doc_id);
    assert_eq!(chunks.len(), 1);
    assert_eq!(chunks[0].text(), "second draft");
}

#[test]
fn oversized_file_rejected_without_reading() {
    let mut file = tempfile::Builder::new().suffix(".txt").tempfile().unwrap();
    file.write_all(&[b'x'; 4096]).unwrap();
    let settings = Settings::builder().max_file_size_mb(0.001).build().unwrap();
    let mut store = ChunkStore::new();

    let err = ingest_upload(
        &mut store,
        Upload::open(file.path()).unwrap(),
        &settings,
        None,
    )
    .unwrap_err();

    assert!(matches!(
        err.error,
        IngestError::Validation(ValidationError::TooLarge {
            size_bytes: 4096,
            limit_bytes: 1048
        })
    ));
    assert!(store.is_empty());
}

#[test]
fn latin1_text_file_from_disk() {
    let mut file = tempfile::Builder::new().suffix(".txt").tempfile().unwrap();
    file.write_all(b"Caf\xe9 au lait\r\n\r\n\r\nna\xefve").unwrap();
    let mut store = ChunkStore::new();

    let doc = ingest_upload(
        &mut store,
        Upload::open(file.path()).unwrap(),
        &Settings::default(),
        None,
    )
    .unwrap();

    assert_eq!(store.get_chunks(&doc.doc_id)[0].text(), "Café au lait\n\nnaïve");
}

#[test]
fn whitespace_only_text_is_empty() {
    let mut store = ChunkStore::new();
    let err = ingest_upload(
        &mut store,
        Upload::from_bytes("blank.txt", "text/plain", " \n\t \n"),
        &Settings::default(),
        None,
    )
    .unwrap_err();
    assert!(matches!(
        err.error,
        IngestError::Processing(ProcessingError::EmptyText)
    ));
}

/// Records the context it was given and answers with the first excerpt header.
#[derive(Default)]
struct CitingModel {
    contexts: Mutex<Vec<String>>,
}

impl AnswerModel for CitingModel {
    async fn answer(&self, _question: &str, context: &str) -> anyhow::Result<String> {
        self.contexts.lock().unwrap().push(context.to_string());
        Ok(context.lines().next().unwrap_or_default().to_string())
    }
}

#[tokio::test]
async fn question_is_answered_from_best_chunk() {
    let mut store = ChunkStore::new();
    let settings = Settings::builder().top_k(1).build().unwrap();
    let uploads = [
        Upload::from_bytes(
            "circuits.txt",
            "text/plain",
            "Ohm's law relates voltage, current and resistance.",
        ),
        Upload::from_bytes(
            "cells.txt",
            "text/plain",
            "Mitochondria produce ATP through respiration.",
        ),
    ];
    for result in ingest_batch(&mut store, uploads, &settings) {
        result.unwrap();
    }

    let model = CitingModel::default();
    let answer = answer_question(&store, "Where is ATP produced?", &settings, &model)
        .await
        .unwrap();

    assert_eq!(answer.answer, "[cells.txt, chunk 1]");
    assert_eq!(answer.used_excerpts.len(), 1);
    assert_eq!(answer.used_excerpts[0].chunk.doc_name(), "cells.txt");
    assert_eq!(model.contexts.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn empty_store_answers_without_model() {
    let store = ChunkStore::new();
    let model = CitingModel::default();

    let answer = answer_question(&store, "Anything?", &Settings::default(), &model)
        .await
        .unwrap();

    assert_eq!(answer.answer, studybuddy::rag::NO_DOCUMENTS_ANSWER);
    assert!(model.contexts.lock().unwrap().is_empty());
}
