//! Answer assembly: retrieve, bound the context, ask the model.

use studybuddy_core::{AnswerModel, ConfigError};

use crate::error::{RagError, Result};
use crate::retrieval::select_top_k;
use crate::types::{Chunk, ScoredChunk};

/// Returned without calling the model when nothing has been uploaded.
pub const NO_DOCUMENTS_ANSWER: &str =
    "No documents have been uploaded yet. Upload a PDF or text file, then ask again.";

const SEPARATOR: &str = "\n\n---\n\n";

/// A model answer and the excerpts it was given.
#[derive(Clone, Debug)]
pub struct Answer {
    /// The model's answer text.
    pub answer: String,
    /// Excerpts included in the context, in rank order.
    pub used_excerpts: Vec<ScoredChunk>,
}

/// Renders ranked excerpts into a context of at most `max_chars` characters.
///
/// Each excerpt becomes a `[doc_name, chunk N]` header (N counted from 1) followed by
/// its text; blocks are separated by a horizontal rule. Blocks are added in rank order
/// until the next one would not fit. A first block that alone exceeds the budget is
/// cut at a character boundary rather than dropped.
///
/// Returns the context and how many leading excerpts it contains.
#[must_use]
pub fn assemble_context(excerpts: &[ScoredChunk], max_chars: usize) -> (String, usize) {
    let separator_chars = SEPARATOR.chars().count();
    let mut context = String::new();
    let mut used_chars = 0;
    let mut used = 0;

    for excerpt in excerpts {
        let block = render_block(&excerpt.chunk);
        let block_chars = block.chars().count();
        let needed = if used == 0 {
            block_chars
        } else {
            separator_chars + block_chars
        };

        if used_chars + needed > max_chars {
            if used == 0 && max_chars > 0 {
                context.extend(block.chars().take(max_chars));
                used = 1;
            }
            break;
        }
        if used > 0 {
            context.push_str(SEPARATOR);
        }
        context.push_str(&block);
        used_chars += needed;
        used += 1;
    }

    (context, used)
}

fn render_block(chunk: &Chunk) -> String {
    format!(
        "[{}, chunk {}]\n{}",
        chunk.doc_name(),
        chunk.index() + 1,
        chunk.text()
    )
}

/// Answers `question` from the given chunks.
///
/// With no chunks at all, returns [`NO_DOCUMENTS_ANSWER`] and never calls `model`.
///
/// # Errors
/// - [`RagError::Config`] when `top_k` or `max_context_chars` is 0;
/// - [`RagError::Model`] when the model call fails.
pub async fn answer_question<'a, M, I>(
    model: &M,
    question: &str,
    chunks: I,
    top_k: usize,
    max_context_chars: usize,
) -> Result<Answer>
where
    M: AnswerModel,
    I: IntoIterator<Item = &'a Chunk>,
{
    if max_context_chars == 0 {
        return Err(ConfigError::Zero {
            name: "max_context_chars",
        }
        .into());
    }
    let mut excerpts = select_top_k(question, chunks, top_k)?;
    if excerpts.is_empty() {
        return Ok(Answer {
            answer: NO_DOCUMENTS_ANSWER.to_string(),
            used_excerpts: Vec::new(),
        });
    }

    let (context, used) = assemble_context(&excerpts, max_context_chars);
    excerpts.truncate(used);
    tracing::debug!(
        excerpts = used,
        context_chars = context.chars().count(),
        "asking answer model"
    );

    let answer = model
        .answer(question, &context)
        .await
        .map_err(RagError::Model)?;
    Ok(Answer {
        answer,
        used_excerpts: excerpts,
    })
}
