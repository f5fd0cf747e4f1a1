use std::path::PathBuf;

use probkit_dist::{cdf::Cdf, value::Real};
use serde::Serialize;

use crate::util;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct CdfArg {
    /// Input file of whitespace-separated numbers (`-` for stdin)
    input: PathBuf,
    /// Percentile ranks (0-100) to report
    #[arg(long, value_delimiter = ',', default_values_t = [5.0, 25.0, 50.0, 75.0, 95.0])]
    percentiles: Vec<f64>,
    /// Output file path
    #[arg(long)]
    output: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
struct Percentile {
    rank: f64,
    value: f64,
}

#[derive(Debug, Serialize)]
struct CdfOutput {
    percentiles: Vec<Percentile>,
    /// Staircase points, ready to be drawn as connected line segments
    xs: Vec<f64>,
    ps: Vec<f64>,
}

pub(crate) fn run(arg: &CdfArg) -> anyhow::Result<()> {
    let CdfArg {
        input,
        percentiles,
        output,
    } = arg;
    let values = util::read_numbers(input)?;
    let cdf = Cdf::from_reals(&values)?;
    eprintln!(
        "Built CDF of {} values ({} distinct) from {}",
        values.len(),
        cdf.len(),
        input.display()
    );

    let percentiles = percentiles
        .iter()
        .map(|&rank| {
            let value = cdf.percentile(rank)?.into_inner();
            Ok(Percentile { rank, value })
        })
        .collect::<anyhow::Result<Vec<_>>>()?;
    let (xs, ps) = cdf.render();
    let output_value = CdfOutput {
        percentiles,
        xs: xs.into_iter().map(Real::into_inner).collect(),
        ps,
    };

    util::save_json(&output_value, output.as_deref())?;
    Ok(())
}
