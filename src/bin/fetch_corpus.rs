use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Parser;
use tracing::info;

use markov_text::config::Config;
use markov_text::corpus::{Corpus, clean, fetch_gutenberg};
use markov_text::logging;

#[derive(Parser)]
#[command(
    name = "fetch_corpus",
    version,
    about = "Download a Project Gutenberg book and write it as a clean corpus"
)]
struct Cli {
    #[arg(short, long, help = "Gutenberg book id [default: 64317]")]
    book: Option<u32>,

    #[arg(short, long, help = "Clean a local text file instead of downloading")]
    input: Option<PathBuf>,

    #[arg(short, long, help = "Output corpus file (defaults to the configured path)")]
    output: Option<PathBuf>,
}

fn main() -> Result<()> {
    logging::init();
    let cli = Cli::parse();
    let config = Config::load()?;

    let corpus = match &cli.input {
        Some(path) => Corpus::new(clean(&std::fs::read_to_string(path)?)),
        None => {
            let book = cli.book.unwrap_or(config.gutenberg_book);
            fetch_gutenberg(book).with_context(|| format!("fetching Gutenberg book {book}"))?
        }
    };

    if corpus.is_empty() {
        bail!("no words left after cleaning");
    }

    let output = cli.output.unwrap_or_else(|| config.corpus_path());
    corpus.save(&output)?;
    info!(path = %output.display(), tokens = corpus.len(), "wrote corpus");
    println!(
        "wrote {} words ({} distinct) to {}",
        corpus.len(),
        corpus.vocabulary_size(),
        output.display()
    );
    Ok(())
}
