//! # studybuddy-core
//!
//! Shared vocabulary for the studybuddy workspace: the error kinds every stage of the
//! ingestion pipeline reports, the tunable [`Settings`], and the narrow capabilities the
//! core depends on from its collaborators.
//!
//! ```text
//! ┌──────────────┐    ┌──────────────────────┐    ┌──────────────────┐
//! │  Front end   │───▶│  studybuddy (facade) │◀───│  Answer models   │
//! │              │    │                      │    │                  │
//! │ - CLI        │    │ - Upload validation  │    │ - any LLM client │
//! │ - chat UI    │    │ - PDF / text loading │    │   implementing   │
//! │              │    │ - Chunk store        │    │   AnswerModel    │
//! └──────────────┘    └──────────────────────┘    └──────────────────┘
//! ```
//!
//! | Capability | Trait | Used by |
//! |------------|-------|---------|
//! | **Batch progress** | [`BatchProgress`] | PDF loader, once per completed page batch |
//! | **Answer generation** | [`AnswerModel`] | Answer assembler, after retrieval |

mod answer;
mod config;
mod error;
mod progress;

pub use answer::AnswerModel;
pub use config::{Settings, SettingsBuilder, size_limit_bytes};
pub use error::{ConfigError, ErrorKind, FileError, IngestError, ProcessingError, ValidationError};
pub use progress::BatchProgress;

/// Result alias used by the ingestion stages.
pub type Result<T, E = IngestError> = core::result::Result<T, E>;
