//! Chunking, chunk storage and lexical retrieval.
//!
//! The pieces compose into the query side of the pipeline:
//! - [`chunking::chunk_text`] – cut cleaned text into overlapping windows.
//! - [`ChunkStore::upsert_doc`] – keep a document's chunks for the session.
//! - [`select_top_k`] – rank stored chunks against a question with BM25.
//! - [`answer_question`] – bound the best chunks into a context and ask an
//!   [`AnswerModel`](studybuddy_core::AnswerModel).
//!
//! Everything is in-memory and synchronous apart from the model call itself.
//!
//! ```rust
//! use studybuddy_rag::{ChunkStore, DocumentId, chunking::chunk_text, select_top_k};
//!
//! let text = "Ohm's law: V = IR. Kirchhoff's current law: currents into a node sum to zero.";
//! let mut store = ChunkStore::new();
//! store.upsert_doc(DocumentId::generate(), "circuits.txt", chunk_text(text, 40, 10).unwrap());
//!
//! let top = select_top_k("Where do currents sum to zero?", store.all_chunks(), 1).unwrap();
//! assert!(top[0].chunk.text().contains("sum"));
//! ```

pub mod answer;
pub mod chunking;
pub mod cleaning;
pub mod error;
pub mod retrieval;
pub mod store;
pub mod types;

pub use answer::{Answer, NO_DOCUMENTS_ANSWER, answer_question, assemble_context};
pub use chunking::{FixedSizeChunker, chunk_text, validate_chunk};
pub use cleaning::clean_text;
pub use error::{RagError, Result};
pub use retrieval::select_top_k;
pub use store::ChunkStore;
pub use types::{Chunk, DocumentId, DocumentStats, ScoredChunk, StoreStatistics};
