//! In-memory chunk store.
//!
//! Holds every uploaded document's chunks for the lifetime of the session. Documents
//! keep the position of their first insertion, so listings and retrieval order are
//! stable across re-uploads.

use std::collections::HashMap;

use crate::chunking::validate_chunk;
use crate::types::{Chunk, DocumentId, DocumentStats, StoreStatistics};

#[derive(Debug, Clone)]
struct StoredDocument {
    id: DocumentId,
    name: String,
    chunks: Vec<Chunk>,
}

/// Document id to ordered chunk list, plus display names.
#[derive(Debug, Clone, Default)]
pub struct ChunkStore {
    documents: Vec<StoredDocument>,
    positions: HashMap<DocumentId, usize>,
}

impl ChunkStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces all chunks of a document.
    ///
    /// Empty and whitespace-only texts are dropped; the rest are indexed `0..n` in the
    /// order given. Replacing a document discards its previous chunks entirely.
    /// Returns the number of chunks stored.
    pub fn upsert_doc<I, S>(
        &mut self,
        doc_id: DocumentId,
        doc_name: impl Into<String>,
        texts: I,
    ) -> usize
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let name = doc_name.into();
        let chunks: Vec<Chunk> = texts
            .into_iter()
            .map(Into::into)
            .filter(|text: &String| validate_chunk(text))
            .enumerate()
            .map(|(index, text)| Chunk::new(doc_id.clone(), name.clone(), index, text))
            .collect();
        let count = chunks.len();

        let document = StoredDocument {
            id: doc_id.clone(),
            name,
            chunks,
        };
        if let Some(&pos) = self.positions.get(&doc_id) {
            tracing::debug!(%doc_id, chunks = count, "replacing document");
            self.documents[pos] = document;
        } else {
            tracing::debug!(%doc_id, chunks = count, "adding document");
            self.positions.insert(doc_id, self.documents.len());
            self.documents.push(document);
        }
        count
    }

    /// Removes a document and its chunks. Returns whether it was present.
    pub fn remove_doc(&mut self, doc_id: &DocumentId) -> bool {
        let Some(pos) = self.positions.remove(doc_id) else {
            return false;
        };
        self.documents.remove(pos);
        for later in &self.documents[pos..] {
            if let Some(p) = self.positions.get_mut(&later.id) {
                *p -= 1;
            }
        }
        true
    }

    /// Documents as `(id, name)` pairs in insertion order.
    pub fn list_docs(&self) -> impl Iterator<Item = (&DocumentId, &str)> + '_ {
        self.documents.iter().map(|d| (&d.id, d.name.as_str()))
    }

    /// Chunks of one document, in index order. Empty for unknown ids.
    #[must_use]
    pub fn get_chunks(&self, doc_id: &DocumentId) -> &[Chunk] {
        self.positions
            .get(doc_id)
            .map(|&pos| self.documents[pos].chunks.as_slice())
            .unwrap_or_default()
    }

    /// Display name of a document.
    #[must_use]
    pub fn doc_name(&self, doc_id: &DocumentId) -> Option<&str> {
        self.positions
            .get(doc_id)
            .map(|&pos| self.documents[pos].name.as_str())
    }

    /// Id of the first document with the given display name.
    #[must_use]
    pub fn find_by_name(&self, doc_name: &str) -> Option<&DocumentId> {
        self.documents
            .iter()
            .find(|d| d.name == doc_name)
            .map(|d| &d.id)
    }

    /// Every stored chunk, documents in insertion order, chunks in index order.
    pub fn all_chunks(&self) -> impl Iterator<Item = &Chunk> + '_ {
        self.documents.iter().flat_map(|d| d.chunks.iter())
    }

    /// Aggregate counts.
    #[must_use]
    pub fn get_statistics(&self) -> StoreStatistics {
        let docs: Vec<DocumentStats> = self
            .documents
            .iter()
            .map(|d| DocumentStats {
                doc_id: d.id.clone(),
                doc_name: d.name.clone(),
                num_chunks: d.chunks.len(),
            })
            .collect();
        StoreStatistics {
            total_docs: docs.len(),
            total_chunks: docs.iter().map(|d| d.num_chunks).sum(),
            docs,
        }
    }

    /// Number of documents.
    #[must_use]
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// Whether the store holds no documents.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Total number of chunks across documents.
    #[must_use]
    pub fn chunk_count(&self) -> usize {
        self.documents.iter().map(|d| d.chunks.len()).sum()
    }

    /// Removes everything.
    pub fn clear(&mut self) {
        self.documents.clear();
        self.positions.clear();
    }
}
