use std::path::PathBuf;

use probkit_dist::pdf::{Bandwidth, KernelDensity, NormalPdf, Pdf as _, linspace};
use probkit_stats::moments;
use serde::Serialize;

use crate::util;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct KdeArg {
    /// Input file of whitespace-separated numbers (`-` for stdin)
    input: PathBuf,
    /// Bandwidth rule: `scott`, `silverman`, or a fixed kernel width
    #[arg(long, default_value = "scott")]
    bandwidth: Bandwidth,
    /// Number of evaluation points between the sample minimum and maximum
    #[arg(long, default_value_t = 101)]
    points: usize,
    /// Output file path
    #[arg(long)]
    output: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
struct KdeOutput {
    bandwidth: f64,
    xs: Vec<f64>,
    densities: Vec<f64>,
    /// Density of a normal distribution with the sample's mean and standard deviation
    normal_densities: Option<Vec<f64>>,
}

/// Normal density matching the sample's mean and standard deviation.
///
/// `None` when the sample is too small or has no spread.
fn fitted_normal(sample: &[f64]) -> Option<NormalPdf> {
    moments::mean_var(sample, 1)
        .ok()
        .and_then(|(mean, var)| NormalPdf::new(mean, var.sqrt()).ok())
}

pub(crate) fn run(arg: &KdeArg) -> anyhow::Result<()> {
    let KdeArg {
        input,
        bandwidth,
        points,
        output,
    } = arg;
    let sample = util::read_numbers(input)?;
    eprintln!(
        "Estimating density of {} values from {}",
        sample.len(),
        input.display()
    );

    let normal = fitted_normal(&sample);
    let kde = KernelDensity::with_bandwidth(sample, *bandwidth)?;
    let support = kde.support();
    let (low, high) = (support[0], support[support.len() - 1]);
    let xs = linspace(low, high, *points);
    let kde_output = KdeOutput {
        bandwidth: kde.bandwidth(),
        densities: kde.densities(&xs),
        normal_densities: normal.map(|pdf| pdf.densities(&xs)),
        xs,
    };

    util::save_json(&kde_output, output.as_deref())?;
    Ok(())
}
