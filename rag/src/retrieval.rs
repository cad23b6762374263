//! Lexical top-k retrieval.
//!
//! Chunks are ranked with Okapi BM25 over lowercased Unicode words. Ties are broken
//! by document id and then chunk index, so the same question over the same store
//! always yields the same excerpts.

// Term counts are far below f32's exact integer range.
#![allow(clippy::cast_precision_loss)]

use std::collections::{BTreeSet, HashMap};

use ordered_float::OrderedFloat;
use studybuddy_core::ConfigError;
use unicode_segmentation::UnicodeSegmentation;

use crate::types::{Chunk, ScoredChunk};

/// Term frequency saturation.
const K1: f32 = 1.5;
/// Length normalization strength.
const B: f32 = 0.75;

const STOP_WORDS: &[&str] = &[
    "an", "and", "are", "as", "at", "be", "by", "can", "do", "does", "for", "from", "has",
    "have", "how", "in", "is", "it", "its", "of", "on", "or", "that", "the", "this", "to",
    "was", "were", "what", "when", "where", "which", "who", "why", "with",
];

/// Lowercased words of `text`, minus stop words and single characters.
pub(crate) fn tokenize(text: &str) -> impl Iterator<Item = String> + '_ {
    text.unicode_words()
        .map(str::to_lowercase)
        .filter(|word| word.chars().nth(1).is_some() && !STOP_WORDS.contains(&word.as_str()))
}

/// Selects the `top_k` chunks most relevant to `question`.
///
/// Results are ordered by descending score, then ascending document id, then ascending
/// chunk index. When fewer chunks match than requested, non-matching chunks (score 0)
/// fill the remaining slots in that same order. Returns `min(top_k, chunks)` results.
///
/// # Errors
/// [`ConfigError::Zero`] when `top_k` is 0.
pub fn select_top_k<'a, I>(
    question: &str,
    chunks: I,
    top_k: usize,
) -> Result<Vec<ScoredChunk>, ConfigError>
where
    I: IntoIterator<Item = &'a Chunk>,
{
    if top_k == 0 {
        return Err(ConfigError::Zero { name: "top_k" });
    }
    let chunks: Vec<&Chunk> = chunks.into_iter().collect();
    if chunks.is_empty() {
        return Ok(Vec::new());
    }

    let query: BTreeSet<String> = tokenize(question).collect();
    let scores = bm25_scores(&query, &chunks);

    let mut ranked: Vec<(f32, &Chunk)> = scores.into_iter().zip(chunks).collect();
    ranked.sort_by(|(sa, a), (sb, b)| {
        OrderedFloat(*sb)
            .cmp(&OrderedFloat(*sa))
            .then_with(|| a.doc_id().cmp(b.doc_id()))
            .then_with(|| a.index().cmp(&b.index()))
    });
    ranked.truncate(top_k);

    tracing::debug!(
        terms = query.len(),
        returned = ranked.len(),
        best = ranked.first().map_or(0.0, |(s, _)| *s),
        "ranked chunks"
    );

    Ok(ranked
        .into_iter()
        .map(|(score, chunk)| ScoredChunk {
            chunk: chunk.clone(),
            score,
        })
        .collect())
}

fn bm25_scores(query: &BTreeSet<String>, chunks: &[&Chunk]) -> Vec<f32> {
    if query.is_empty() {
        return vec![0.0; chunks.len()];
    }

    let mut lengths = Vec::with_capacity(chunks.len());
    let mut frequencies: Vec<HashMap<String, usize>> = Vec::with_capacity(chunks.len());
    for chunk in chunks {
        let mut tf = HashMap::new();
        let mut len = 0usize;
        for term in tokenize(chunk.text()) {
            len += 1;
            if query.contains(&term) {
                *tf.entry(term).or_insert(0) += 1;
            }
        }
        lengths.push(len as f32);
        frequencies.push(tf);
    }

    let n = chunks.len() as f32;
    let avg_len = (lengths.iter().sum::<f32>() / n).max(1.0);
    let idf: Vec<(&str, f32)> = query
        .iter()
        .map(|term| {
            let df = frequencies.iter().filter(|tf| tf.contains_key(term)).count() as f32;
            (term.as_str(), ((n - df + 0.5) / (df + 0.5)).ln_1p())
        })
        .collect();

    frequencies
        .iter()
        .zip(&lengths)
        .map(|(tf, &len)| {
            idf.iter()
                .filter_map(|&(term, idf)| {
                    let f = *tf.get(term)? as f32;
                    Some(idf * f * (K1 + 1.0) / (f + K1 * (1.0 - B + B * len / avg_len)))
                })
                .sum::<f32>()
        })
        .collect()
}
