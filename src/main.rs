use std::path::PathBuf;

use anyhow::Result;
use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use rand::SeedableRng;
use rand::rngs::SmallRng;
use tracing::info;

use markov_text::config::Config;
use markov_text::corpus::Corpus;
use markov_text::logging;
use markov_text::ngram::{NGramModel, SequenceGenerator};

#[derive(Parser)]
#[command(
    name = "markov-text",
    version,
    about = "Generate text from an n-gram model of a corpus"
)]
struct Cli {
    #[arg(short, long, help = "Context size in tokens [default: 2]")]
    ngrams: Option<usize>,

    #[arg(short, long, help = "Number of tokens to generate [default: 20]")]
    length: Option<usize>,

    #[arg(short, long, help = "Corpus file (whitespace-separated lowercase words)")]
    corpus: Option<PathBuf>,

    #[arg(long, help = "Seed for reproducible output")]
    seed: Option<u64>,

    #[arg(help = "Word to start from; must occur in the corpus")]
    start_word: String,
}

fn main() -> Result<()> {
    logging::init();
    let cli = Cli::parse();
    let config = Config::load()?;

    let ngrams = cli.ngrams.unwrap_or(config.ngrams);
    let length = cli.length.unwrap_or(config.length);
    if ngrams == 0 {
        Cli::command()
            .error(ErrorKind::ValueValidation, "--ngrams must be at least 1")
            .exit();
    }

    let corpus = load_corpus(cli.corpus, &config)?;
    if let Err(err) = corpus.check_word(&cli.start_word) {
        Cli::command().error(ErrorKind::InvalidValue, err).exit();
    }

    println!("length={length} ngrams={ngrams}");

    let model = NGramModel::build(corpus.tokens(), ngrams)?;
    let mut rng = match cli.seed.or(config.seed) {
        Some(seed) => SmallRng::seed_from_u64(seed),
        None => SmallRng::from_entropy(),
    };
    let generated = SequenceGenerator::new(&model).generate(&cli.start_word, length, &mut rng)?;

    println!("{}", generated.join(" "));
    Ok(())
}

/// An explicit `--corpus` must exist. Otherwise fall back from the
/// configured corpus file to the built-in sample.
fn load_corpus(explicit: Option<PathBuf>, config: &Config) -> Result<Corpus> {
    if let Some(path) = explicit {
        return Corpus::load(&path);
    }
    let path = config.corpus_path();
    if path.exists() {
        return Corpus::load(&path);
    }
    info!(path = %path.display(), "no corpus file, using built-in sample");
    Ok(Corpus::embedded())
}
