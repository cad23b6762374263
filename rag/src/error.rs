//! Error types for the RAG crate.

use studybuddy_core::ConfigError;
use thiserror::Error;

/// Errors that can occur while answering a question.
#[derive(Debug, Error)]
pub enum RagError {
    /// Retrieval was asked for something the tunables do not allow.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The answer model failed.
    #[error("answer model failed: {0}")]
    Model(#[source] anyhow::Error),
}

/// Result type alias for RAG operations.
pub type Result<T> = std::result::Result<T, RagError>;
