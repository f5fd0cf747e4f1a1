use std::path::PathBuf;

use probkit_dist::random::RandomSource;
use probkit_stats::{
    StatsError, moments,
    resample::{self, SamplingSummary},
};
use serde::Serialize;

use crate::util;

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum, Serialize)]
#[serde(rename_all = "kebab-case")]
enum Statistic {
    Mean,
    Median,
    StdDev,
}

impl Statistic {
    fn eval(self, xs: &[f64]) -> Result<f64, StatsError> {
        match self {
            Self::Mean => moments::mean(xs),
            Self::Median => moments::median(xs),
            Self::StdDev => moments::std_dev(xs, 1),
        }
    }
}

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct BootstrapArg {
    /// Input file of whitespace-separated numbers (`-` for stdin)
    input: PathBuf,
    /// Statistic to resample
    #[arg(long, value_enum, default_value_t = Statistic::Mean)]
    statistic: Statistic,
    /// Number of resamples
    #[arg(long, default_value_t = 1000)]
    iters: usize,
    /// Output file path
    #[arg(long)]
    output: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
struct BootstrapOutput {
    statistic: Statistic,
    actual: f64,
    iters: usize,
    #[serde(flatten)]
    summary: SamplingSummary,
}

pub(crate) fn run(arg: &BootstrapArg, rng: &mut RandomSource) -> anyhow::Result<()> {
    let BootstrapArg {
        input,
        statistic,
        iters,
        output,
    } = arg;
    let xs = util::read_numbers(input)?;
    let actual = statistic.eval(&xs)?;
    eprintln!(
        "Resampling {} values from {} {iters} times...",
        xs.len(),
        input.display()
    );

    let estimates = resample::bootstrap(&xs, *iters, |sample| statistic.eval(sample), rng)?;
    let summary = SamplingSummary::from_estimates(&estimates, actual)?;
    let bootstrap_output = BootstrapOutput {
        statistic: *statistic,
        actual,
        iters: *iters,
        summary,
    };

    util::save_json(&bootstrap_output, output.as_deref())?;
    Ok(())
}
