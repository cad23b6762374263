//! # studybuddy
//!
//! Facade crate for the study-assistant document core. Users upload PDFs and plain-text
//! files; each upload is validated, loaded, cleaned and cut into overlapping chunks that
//! live in an in-memory [`ChunkStore`]. Questions are answered from the best matching
//! chunks by any [`AnswerModel`].
//!
//! ## Pipeline
//!
//! ```text
//! Upload ─▶ validate type/size ─▶ PDF or text loader ─▶ clean ─▶ chunk ─▶ ChunkStore
//!                                                                           │
//! question ─▶ select_top_k ◀────────────────────────────────────────────────┘
//!                  │
//!                  └─▶ bounded context ─▶ AnswerModel ─▶ Answer + cited excerpts
//! ```
//!
//! ## Example
//!
//! ```rust
//! use studybuddy::{ChunkStore, Settings, Upload, ingest_batch};
//!
//! let settings = Settings::default();
//! let mut store = ChunkStore::new();
//! let uploads = [
//!     Upload::from_bytes("ohm.txt", "text/plain", "Ohm's law: V = IR."),
//!     Upload::from_bytes("slides.pptx", "application/octet-stream", "binary"),
//! ];
//!
//! let results = ingest_batch(&mut store, uploads, &settings);
//! assert!(results[0].is_ok());
//! let failure = results[1].as_ref().unwrap_err();
//! assert!(failure.to_string().starts_with("could not process slides.pptx: unsupported file type"));
//! assert_eq!(store.get_statistics().total_docs, 1);
//! ```
//!
//! ## Crates
//!
//! - [`studybuddy_core`]: errors, [`Settings`], collaborator traits.
//! - [`attachments`]: the upload contract, validation, text decoding.
//! - [`pdf`]: memory-bounded PDF extraction.
//! - [`rag`]: chunking, the chunk store, retrieval and answer assembly.

mod ingest;

pub use ingest::{
    IngestedDocument, answer_question, ingest_batch, ingest_upload, remove_document,
};

pub use studybuddy_attachments as attachments;
pub use studybuddy_pdf_process as pdf;
pub use studybuddy_rag as rag;

pub use studybuddy_attachments::Upload;
pub use studybuddy_core::*;
pub use studybuddy_rag::{Answer, ChunkStore, DocumentId, ScoredChunk, StoreStatistics};
