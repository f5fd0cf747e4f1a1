use clap::{Parser, Subcommand};
use probkit_dist::random::{RandomSource, Seed};
use rand::Rng as _;

use self::{
    bootstrap::BootstrapArg, cdf::CdfArg, fit::FitArg, kde::KdeArg, summarize::SummarizeArg,
    test_means::TestMeansArg,
};

mod bootstrap;
mod cdf;
mod fit;
mod kde;
mod summarize;
mod test_means;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// Seed for every randomized step (decimal or 32 hex digits)
    ///
    /// A random seed is chosen and reported when omitted.
    #[arg(long, global = true)]
    seed: Option<Seed>,
    /// What to compute
    #[command(subcommand)]
    mode: Mode,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Print summary statistics of a sample
    Summarize(#[clap(flatten)] SummarizeArg),
    /// Print the empirical CDF as a staircase
    Cdf(#[clap(flatten)] CdfArg),
    /// Fit a least-squares line to two-column data
    Fit(#[clap(flatten)] FitArg),
    /// Estimate the sampling distribution of a statistic
    Bootstrap(#[clap(flatten)] BootstrapArg),
    /// Evaluate a kernel density estimate on a grid
    Kde(#[clap(flatten)] KdeArg),
    /// Test whether two samples have different means
    TestMeans(#[clap(flatten)] TestMeansArg),
}

/// Builds the random source shared by the whole run.
fn random_source(seed: Option<Seed>) -> RandomSource {
    let seed = seed.unwrap_or_else(|| rand::rng().random());
    eprintln!("Using seed {seed}");
    RandomSource::with_seed(seed)
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    match args.mode {
        Mode::Summarize(arg) => summarize::run(&arg)?,
        Mode::Cdf(arg) => cdf::run(&arg)?,
        Mode::Fit(arg) => fit::run(&arg, &mut random_source(args.seed))?,
        Mode::Bootstrap(arg) => bootstrap::run(&arg, &mut random_source(args.seed))?,
        Mode::Kde(arg) => kde::run(&arg)?,
        Mode::TestMeans(arg) => test_means::run(&arg, &mut random_source(args.seed))?,
    }
    Ok(())
}
