use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use rand::SeedableRng;
use rand::rngs::SmallRng;

use markov_text::chain::definition::ModelDefinition;
use markov_text::chain::{MarkovChain, State};
use markov_text::logging;

#[derive(Parser)]
#[command(
    name = "hmm_walk",
    version,
    about = "Random walks over a Markov chain or hidden Markov model"
)]
struct Cli {
    #[arg(short, long, help = "TOML model definition (defaults to the weather model)")]
    model: Option<PathBuf>,

    #[arg(short, long, default_value_t = 3, help = "Number of states to visit")]
    length: usize,

    #[arg(short, long, help = "State to start from (chain walk only)")]
    start: Option<String>,

    #[arg(long, help = "Walk the hidden chain without emitting observations")]
    hidden_only: bool,

    #[arg(long, help = "Print eigenvalues and the stationary distribution")]
    spectrum: bool,

    #[arg(long, help = "Seed for reproducible output")]
    seed: Option<u64>,

    #[arg(long, help = "Print the walk as JSON")]
    json: bool,
}

fn main() -> Result<()> {
    logging::init();
    let cli = Cli::parse();

    let definition = match &cli.model {
        Some(path) => ModelDefinition::load(path)?,
        None => ModelDefinition::weather(),
    };
    let mut rng = match cli.seed {
        Some(seed) => SmallRng::seed_from_u64(seed),
        None => SmallRng::from_entropy(),
    };

    let chain_only = cli.hidden_only || cli.start.is_some() || !definition.has_emissions();
    if chain_only {
        let chain = definition.build_chain()?;
        if cli.spectrum {
            print_spectrum(&chain);
        }
        let start = cli.start.map(State::new);
        let walk = chain.walk(cli.length, start.as_ref(), &mut rng)?;
        if cli.json {
            println!("{}", serde_json::to_string(&walk)?);
        } else {
            let names: Vec<String> = walk.iter().map(State::to_string).collect();
            println!("[{}]", names.join(", "));
        }
    } else {
        let hmm = definition.build_hmm()?;
        if cli.spectrum {
            print_spectrum(hmm.chain());
        }
        let pairs = hmm.observed_walk(cli.length, &mut rng)?;
        if cli.json {
            println!("{}", serde_json::to_string(&pairs)?);
        } else {
            let shown: Vec<String> = pairs.iter().map(|p| p.to_string()).collect();
            println!("[{}]", shown.join(", "));
        }
    }

    Ok(())
}

/// Diagnostics are best effort: failures are reported, not fatal.
fn print_spectrum(chain: &MarkovChain) {
    let names: Vec<String> = chain.states().iter().map(State::to_string).collect();
    println!("states: {}", names.join(" "));

    match chain.eigen_spectrum() {
        Ok(spectrum) => {
            for (value, vector) in spectrum.eigenvalues.iter().zip(&spectrum.left_eigenvectors) {
                let components: Vec<String> = vector.iter().map(|x| format!("{x:.4}")).collect();
                println!("eigenvalue {value:.4}: [{}]", components.join(", "));
            }
        }
        Err(err) => eprintln!("eigen-spectrum unavailable: {err}"),
    }

    match chain.stationary_distribution() {
        Ok(pi) => {
            let components: Vec<String> = pi.iter().map(|x| format!("{x:.4}")).collect();
            println!("stationary: [{}]", components.join(", "));
        }
        Err(err) => eprintln!("stationary distribution unavailable: {err}"),
    }
}
