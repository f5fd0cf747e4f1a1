use std::path::PathBuf;

use probkit_dist::random::RandomSource;
use probkit_stats::{
    hypothesis::{
        DiffMeansOneSided, DiffMeansPermute, DiffMeansResample, HypothesisTest as _, TestOutcome,
    },
    moments,
};
use serde::Serialize;

use crate::util;

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum, Serialize)]
#[serde(rename_all = "kebab-case")]
enum Method {
    /// Shuffle pooled values between the groups, two-sided
    Permute,
    /// Shuffle pooled values, testing whether the first group is larger
    OneSided,
    /// Draw both groups from the pooled values with replacement
    Resample,
}

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct TestMeansArg {
    /// First sample (`-` for stdin)
    first: PathBuf,
    /// Second sample
    second: PathBuf,
    /// Null model used to simulate the difference in means
    #[arg(long, value_enum, default_value_t = Method::Permute)]
    method: Method,
    /// Number of simulations
    #[arg(long, default_value_t = 1000)]
    iters: usize,
    /// Output file path
    #[arg(long)]
    output: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
struct TestMeansOutput {
    method: Method,
    mean_difference: f64,
    effect_size: Option<f64>,
    #[serde(flatten)]
    outcome: TestOutcome,
}

pub(crate) fn run(arg: &TestMeansArg, rng: &mut RandomSource) -> anyhow::Result<()> {
    let TestMeansArg {
        first,
        second,
        method,
        iters,
        output,
    } = arg;
    let group1 = util::read_numbers(first)?;
    let group2 = util::read_numbers(second)?;
    eprintln!(
        "Testing {} vs {} values with {iters} simulations ({method:?})...",
        group1.len(),
        group2.len()
    );

    let outcome = match method {
        Method::Permute => DiffMeansPermute::new(&group1, &group2)?.run(*iters, rng)?,
        Method::OneSided => DiffMeansOneSided::new(&group1, &group2)?.run(*iters, rng)?,
        Method::Resample => DiffMeansResample::new(&group1, &group2)?.run(*iters, rng)?,
    };
    let test_output = TestMeansOutput {
        method: *method,
        mean_difference: moments::mean(&group1)? - moments::mean(&group2)?,
        effect_size: moments::cohen_effect_size(&group1, &group2).ok(),
        outcome,
    };

    util::save_json(&test_output, output.as_deref())?;
    Ok(())
}
