//! Basic retrieval flow using the in-memory store and a toy answer model.

use studybuddy_core::AnswerModel;
use studybuddy_rag::{ChunkStore, DocumentId, answer_question, chunk_text, clean_text};

struct FirstSentence;

impl AnswerModel for FirstSentence {
    async fn answer(&self, _question: &str, context: &str) -> anyhow::Result<String> {
        let body = context.lines().nth(1).unwrap_or_default();
        Ok(body.split_inclusive('.').next().unwrap_or_default().to_string())
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let docs = [
        (
            "rag-basics.txt",
            "Retrieval-augmented generation fetches relevant passages before answering.\r\n\r\n\r\nOnly the passages, not whole files, reach the model.",
        ),
        (
            "chunking.txt",
            "Chunking splits large files into overlapping passages for indexing. Overlap keeps sentences that straddle a boundary searchable.",
        ),
        (
            "rust.txt",
            "Rust focuses on performance and safety using ownership and borrowing.",
        ),
    ];

    let mut store = ChunkStore::new();
    for (name, text) in docs {
        let cleaned = clean_text(text);
        store.upsert_doc(DocumentId::generate(), name, chunk_text(&cleaned, 80, 20)?);
    }

    let stats = store.get_statistics();
    println!("{} documents, {} chunks", stats.total_docs, stats.total_chunks);

    let answer = answer_question(
        &FirstSentence,
        "How should I split documents into passages?",
        store.all_chunks(),
        2,
        2_000,
    )
    .await?;

    println!("Answer: {}", answer.answer);
    for (rank, hit) in answer.used_excerpts.iter().enumerate() {
        println!(
            "{rank}: {} (score = {:.3}) - {}",
            hit.chunk.id(),
            hit.score,
            hit.chunk.text()
        );
    }

    Ok(())
}
