//! Core types for the RAG crate.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use xxhash_rust::xxh3::xxh3_64;

/// Opaque document identity.
///
/// Ordered by its string form, which makes it usable as a ranking tie-breaker.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentId(String);

impl DocumentId {
    /// Wraps a caller-chosen identifier.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generates a fresh random identifier.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for DocumentId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for DocumentId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// A contiguous slice of a document's text; the unit of retrieval.
///
/// Chunks are created by the [`ChunkStore`](crate::ChunkStore) and never change afterwards.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Chunk {
    doc_id: DocumentId,
    doc_name: String,
    index: usize,
    text: String,
    content_hash: u64,
}

impl Chunk {
    pub(crate) fn new(doc_id: DocumentId, doc_name: String, index: usize, text: String) -> Self {
        let content_hash = xxh3_64(text.as_bytes());
        Self {
            doc_id,
            doc_name,
            index,
            text,
            content_hash,
        }
    }

    /// Stable identifier, `{doc_id}#chunk_{index}`.
    #[must_use]
    pub fn id(&self) -> String {
        format!("{}#chunk_{}", self.doc_id, self.index)
    }

    /// Owning document.
    #[must_use]
    pub const fn doc_id(&self) -> &DocumentId {
        &self.doc_id
    }

    /// Display name of the owning document, for citations.
    #[must_use]
    pub fn doc_name(&self) -> &str {
        &self.doc_name
    }

    /// Zero-based position within the document.
    #[must_use]
    pub const fn index(&self) -> usize {
        self.index
    }

    /// The chunk text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// xxh3 hash of the text.
    #[must_use]
    pub const fn content_hash(&self) -> u64 {
        self.content_hash
    }
}

/// A retrieved chunk and its relevance score.
#[derive(Clone, Debug, Serialize)]
pub struct ScoredChunk {
    /// The matching chunk.
    pub chunk: Chunk,
    /// Relevance score (higher is better, 0.0 when no query term matches).
    pub score: f32,
}

/// Per-document line of [`StoreStatistics`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DocumentStats {
    /// Document identity.
    pub doc_id: DocumentId,
    /// Display name.
    pub doc_name: String,
    /// Number of chunks stored for the document.
    pub num_chunks: usize,
}

/// Aggregate snapshot of a [`ChunkStore`](crate::ChunkStore).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct StoreStatistics {
    /// Number of documents.
    pub total_docs: usize,
    /// Sum of per-document chunk counts.
    pub total_chunks: usize,
    /// Documents in insertion order.
    pub docs: Vec<DocumentStats>,
}
