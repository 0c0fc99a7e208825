use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use engine::{DocId, DocumentStatus, SearchIndex};
use serde::Deserialize;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Debug, Deserialize)]
struct InputDoc {
    id: DocId,
    text: String,
    #[serde(default)]
    status: DocumentStatus,
    #[serde(default)]
    ratings: Vec<i32>,
}

#[derive(Clone, Copy, ValueEnum)]
enum StatusArg {
    Active,
    Irrelevant,
    Banned,
    Removed,
}

impl From<StatusArg> for DocumentStatus {
    fn from(arg: StatusArg) -> Self {
        match arg {
            StatusArg::Active => DocumentStatus::Active,
            StatusArg::Irrelevant => DocumentStatus::Irrelevant,
            StatusArg::Banned => DocumentStatus::Banned,
            StatusArg::Removed => DocumentStatus::Removed,
        }
    }
}

#[derive(Parser)]
#[command(name = "cli")]
#[command(about = "Load documents from JSONL and answer queries from stdin", long_about = None)]
struct Cli {
    /// Input JSONL file, one document per line
    #[arg(long)]
    docs: String,
    /// Space-delimited stop words
    #[arg(long, default_value = "")]
    stop_words: String,
    /// Maximum number of results per query
    #[arg(long, default_value_t = engine::DEFAULT_MAX_RESULTS)]
    top_k: usize,
    /// Status documents must carry to be returned
    #[arg(long, value_enum, default_value_t = StatusArg::Active)]
    status: StatusArg,
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let cli = Cli::parse();

    let mut index = SearchIndex::new(&cli.stop_words).with_max_results(cli.top_k);
    let file = File::open(&cli.docs).with_context(|| format!("open {}", cli.docs))?;
    for (line_no, line) in BufReader::new(file).lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let doc: InputDoc = serde_json::from_str(&line)
            .with_context(|| format!("parse {}:{}", cli.docs, line_no + 1))?;
        index
            .add_document(doc.id, &doc.text, doc.status, &doc.ratings)
            .with_context(|| format!("ingest document {}", doc.id))?;
    }
    tracing::info!(documents = index.document_count(), "index ready");

    let status: DocumentStatus = cli.status.into();
    let stdin = io::stdin();
    let mut stdout = io::stdout().lock();
    for query in stdin.lock().lines() {
        let query = query?;
        if query.trim().is_empty() {
            continue;
        }
        match index.find_top_documents_with_status(&query, status) {
            Ok(hits) => {
                serde_json::to_writer(&mut stdout, &hits)?;
                writeln!(stdout)?;
            }
            Err(e) => tracing::warn!(%query, error = %e, "query rejected"),
        }
    }
    Ok(())
}
