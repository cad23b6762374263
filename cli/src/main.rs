//! Command-line front end for studybuddy.
//!
//! Ingests the given files into a fresh in-memory store, reports per-file failures
//! without stopping, prints store statistics and, given a question, the ranked
//! excerpts an answer model would be shown.
//!
//! # Usage
//!
//! ```bash
//! # Ingest two files and retrieve excerpts
//! cargo run -p studybuddy-cli -- -f lecture.pdf -f notes.txt "What is entropy?"
//!
//! # Show the bounded context as well
//! cargo run -p studybuddy-cli -- -f lecture.pdf --show-context "What is entropy?"
//!
//! # Machine-readable report
//! cargo run -p studybuddy-cli -- -f lecture.pdf --json "What is entropy?"
//!
//! # Tunables come from the environment
//! CHUNK_SIZE=800 CHUNK_OVERLAP=100 TOP_K=3 cargo run -p studybuddy-cli -- -f notes.txt
//!
//! # Verbose logging
//! RUST_LOG=debug cargo run -p studybuddy-cli -- -f lecture.pdf
//! ```

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use studybuddy::rag::{NO_DOCUMENTS_ANSWER, assemble_context, select_top_k};
use studybuddy::{
    ChunkStore, FileError, IngestedDocument, ProcessingError, ScoredChunk, Settings, Upload,
    ingest_upload,
};
use tracing_subscriber::EnvFilter;

/// Ingest study material and retrieve the excerpts relevant to a question.
#[derive(Parser, Debug)]
#[command(name = "studybuddy", version, about)]
struct Args {
    /// File to ingest (PDF or TXT). Repeat for several files.
    #[arg(short, long = "file", value_name = "PATH")]
    files: Vec<PathBuf>,

    /// Number of excerpts to retrieve. Overrides `TOP_K`.
    #[arg(short = 'k', long)]
    top_k: Option<usize>,

    /// Also print the bounded context handed to an answer model.
    #[arg(long)]
    show_context: bool,

    /// Print the report as JSON.
    #[arg(long)]
    json: bool,

    /// Question to retrieve excerpts for.
    question: Option<String>,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<()> {
    let mut settings = Settings::from_env().context("invalid configuration")?;
    if let Some(top_k) = args.top_k {
        settings.top_k = top_k;
        settings.validate().context("invalid --top-k")?;
    }

    let mut store = ChunkStore::new();
    let mut ingested = Vec::new();
    let mut failures = Vec::new();
    for path in &args.files {
        match ingest_path(&mut store, path, &settings) {
            Ok(doc) => ingested.push(doc),
            Err(err) => failures.push(err),
        }
    }

    let excerpts = match &args.question {
        Some(question) => select_top_k(question, store.all_chunks(), settings.top_k)?,
        None => Vec::new(),
    };
    let context = args
        .show_context
        .then(|| assemble_context(&excerpts, settings.max_context_chars).0);

    if args.json {
        print_json(&store, &ingested, &failures, &excerpts, context.as_deref())?;
    } else {
        print_text(args, &store, &ingested, &failures, &excerpts, context.as_deref());
    }
    Ok(())
}

fn ingest_path(
    store: &mut ChunkStore,
    path: &Path,
    settings: &Settings,
) -> Result<IngestedDocument, FileError> {
    let upload = Upload::open(path).map_err(|err| {
        tracing::warn!(path = %path.display(), %err, "cannot open file");
        FileError::new(path.display().to_string(), ProcessingError::Io(err))
    })?;
    let name = upload.name().to_string();
    let mut log_progress = |done: usize, total: usize| {
        tracing::info!(file = %name, done, total, "extracted PDF pages");
    };
    ingest_upload(store, upload, settings, Some(&mut log_progress))
}

fn print_text(
    args: &Args,
    store: &ChunkStore,
    ingested: &[IngestedDocument],
    failures: &[FileError],
    excerpts: &[ScoredChunk],
    context: Option<&str>,
) {
    for doc in ingested {
        match doc.page_count {
            Some(pages) => println!(
                "ingested {} ({pages} pages, {} chunks)",
                doc.doc_name, doc.chunk_count
            ),
            None => println!("ingested {} ({} chunks)", doc.doc_name, doc.chunk_count),
        }
    }
    for failure in failures {
        eprintln!("{failure}");
    }

    let stats = store.get_statistics();
    println!(
        "{} documents, {} chunks",
        stats.total_docs, stats.total_chunks
    );

    if args.question.is_none() {
        return;
    }
    if excerpts.is_empty() {
        println!("\n{NO_DOCUMENTS_ANSWER}");
        return;
    }

    println!();
    for (rank, hit) in excerpts.iter().enumerate() {
        println!(
            "{}. [{}, chunk {}] score {:.3}",
            rank + 1,
            hit.chunk.doc_name(),
            hit.chunk.index() + 1,
            hit.score
        );
        println!("{}\n", hit.chunk.text());
    }

    if let Some(context) = context {
        println!("--- context ({} chars) ---", context.chars().count());
        println!("{context}");
    }
}

fn print_json(
    store: &ChunkStore,
    ingested: &[IngestedDocument],
    failures: &[FileError],
    excerpts: &[ScoredChunk],
    context: Option<&str>,
) -> Result<()> {
    let report = json_report(store, ingested, failures, excerpts, context);
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn json_report(
    store: &ChunkStore,
    ingested: &[IngestedDocument],
    failures: &[FileError],
    excerpts: &[ScoredChunk],
    context: Option<&str>,
) -> serde_json::Value {
    let failures: Vec<_> = failures
        .iter()
        .map(|f| {
            serde_json::json!({
                "file": f.file,
                "reason": f.error.reason(),
                "message": f.error.to_string(),
            })
        })
        .collect();
    serde_json::json!({
        "documents": ingested,
        "failures": failures,
        "statistics": store.get_statistics(),
        "excerpts": excerpts,
        "context": context,
    })
}
