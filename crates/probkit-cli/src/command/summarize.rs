use std::path::PathBuf;

use probkit_dist::{
    histogram::Histogram,
    value::{Real, reals},
};
use probkit_stats::moments;
use serde::Serialize;

use crate::util;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct SummarizeArg {
    /// Input file of whitespace-separated numbers (`-` for stdin)
    input: PathBuf,
    /// Delta degrees of freedom for the variance divisor (`n - ddof`)
    #[arg(long, default_value_t = 0)]
    ddof: usize,
    /// Fraction trimmed from each tail for the trimmed mean
    #[arg(long, default_value_t = 0.01)]
    trim: f64,
    /// Output file path
    #[arg(long)]
    output: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
struct Summary {
    count: usize,
    mean: f64,
    variance: f64,
    std_dev: f64,
    skewness: Option<f64>,
    median_skewness: Option<f64>,
    mode: Option<f64>,
    min: f64,
    median: f64,
    max: f64,
    interquartile_range: (f64, f64),
    trimmed_mean: Option<f64>,
}

pub(crate) fn run(arg: &SummarizeArg) -> anyhow::Result<()> {
    let SummarizeArg {
        input,
        ddof,
        trim,
        output,
    } = arg;
    let xs = util::read_numbers(input)?;
    eprintln!("Summarizing {} values from {}", xs.len(), input.display());

    let (mean, variance) = moments::mean_var(&xs, *ddof)?;
    let hist = Histogram::from_values(reals(&xs));
    let summary = Summary {
        count: xs.len(),
        mean,
        variance,
        std_dev: variance.sqrt(),
        // zero-variance samples have no defined skewness
        skewness: moments::skewness(&xs).ok(),
        median_skewness: moments::pearson_median_skewness(&xs).ok(),
        mode: hist.mode().map(Real::into_inner),
        min: moments::percentile(&xs, 0.0)?,
        median: moments::median(&xs)?,
        max: moments::percentile(&xs, 100.0)?,
        interquartile_range: moments::interquartile_range(&xs)?,
        trimmed_mean: moments::trimmed_mean(&xs, *trim).ok(),
    };

    util::save_json(&summary, output.as_deref())?;
    Ok(())
}
