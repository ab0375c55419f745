//! knn CLI: classify synthetic uniform points by k-nearest-neighbor majority vote.

use std::io::{self, BufWriter};
use std::time::Instant;

use binary_knn::batch::BatchMode;
use binary_knn::config::{RunConfig, run};
use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "knn")]
#[command(about = "Binary k-nearest-neighbor classification over synthetic data")]
#[command(version)]
struct Cli {
    /// Number of labeled training points
    #[arg(value_parser = clap::value_parser!(u64).range(1..))]
    n_train: u64,

    /// Dimensionality of every point
    #[arg(value_parser = clap::value_parser!(u64).range(1..))]
    d: u64,

    /// Number of query points to classify
    #[arg(value_parser = clap::value_parser!(u64).range(1..))]
    n_test: u64,

    /// Number of neighbors that vote
    #[arg(value_parser = clap::value_parser!(u64).range(1..))]
    k: u64,

    /// Random seed for reproducibility
    #[arg(long)]
    seed: Option<u64>,

    /// Classify queries on all cores
    #[arg(long)]
    parallel: bool,

    /// Print a run summary to stderr
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn to_config(&self) -> Result<RunConfig, Box<dyn std::error::Error>> {
        let mut config = RunConfig::new(
            usize::try_from(self.n_train)?,
            usize::try_from(self.d)?,
            usize::try_from(self.n_test)?,
            usize::try_from(self.k)?,
        );
        if let Some(s) = self.seed {
            config = config.with_seed(s);
        }
        if self.parallel {
            config = config.with_mode(BatchMode::Parallel);
        }
        Ok(config)
    }
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = execute(&cli) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn execute(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = cli.to_config()?;
    let start = Instant::now();

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    run(&config, &mut out)?;

    if cli.verbose {
        eprintln!(
            "Classified {} queries against {} points (d={}, k={}, {:?}) in {:.2?}",
            config.n_test,
            config.n_train,
            config.dim,
            config.k,
            config.mode,
            start.elapsed()
        );
    }
    Ok(())
}
