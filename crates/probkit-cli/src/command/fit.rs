use std::path::PathBuf;

use probkit_dist::random::RandomSource;
use probkit_stats::{
    correlation,
    hypothesis::{CorrelationPermute, HypothesisTest as _},
    regression::{self, LineFit},
};
use serde::Serialize;

use crate::util;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct FitArg {
    /// Input file with one `x y` pair per line (`-` for stdin)
    input: PathBuf,
    /// Permutations for the correlation test (0 skips the test)
    #[arg(long, default_value_t = 0)]
    iters: usize,
    /// Output file path
    #[arg(long)]
    output: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
struct FitOutput {
    count: usize,
    fit: LineFit,
    r_squared: f64,
    pearson: f64,
    spearman: f64,
    /// p-value of the correlation under random pairing
    p_value: Option<f64>,
}

pub(crate) fn run(arg: &FitArg, rng: &mut RandomSource) -> anyhow::Result<()> {
    let FitArg {
        input,
        iters,
        output,
    } = arg;
    let (xs, ys) = util::read_pairs(input)?;
    eprintln!("Fitting {} pairs from {}", xs.len(), input.display());

    let fit = LineFit::least_squares(&xs, &ys)?;
    let residuals = fit.residuals(&xs, &ys)?;
    let p_value = if *iters > 0 {
        eprintln!("Running {iters} permutations...");
        let outcome = CorrelationPermute::new(&xs, &ys)?.run(*iters, rng)?;
        Some(outcome.p_value)
    } else {
        None
    };
    let fit_output = FitOutput {
        count: xs.len(),
        fit,
        r_squared: regression::coefficient_of_determination(&ys, &residuals)?,
        pearson: correlation::correlation(&xs, &ys)?,
        spearman: correlation::spearman_correlation(&xs, &ys)?,
        p_value,
    };

    util::save_json(&fit_output, output.as_deref())?;
    Ok(())
}
