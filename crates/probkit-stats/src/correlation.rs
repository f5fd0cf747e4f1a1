//! Covariance and correlation of paired sequences.

use crate::{error::StatsError, moments};

/// Population covariance: `mean((x - mean(x)) (y - mean(y)))`.
///
/// # Examples
///
/// ```
/// use probkit_stats::correlation::covariance;
///
/// let cov = covariance(&[1.0, 2.0, 3.0], &[2.0, 4.0, 6.0]).unwrap();
/// assert!((cov - 4.0 / 3.0).abs() < 1e-12);
/// ```
pub fn covariance(xs: &[f64], ys: &[f64]) -> Result<f64, StatsError> {
    StatsError::check_paired(xs, ys)?;
    covariance_about(xs, ys, moments::mean(xs)?, moments::mean(ys)?)
}

/// Covariance about caller-supplied centers `mux` and `muy`.
#[expect(clippy::cast_precision_loss)]
pub fn covariance_about(xs: &[f64], ys: &[f64], mux: f64, muy: f64) -> Result<f64, StatsError> {
    StatsError::check_paired(xs, ys)?;
    let sum = xs
        .iter()
        .zip(ys)
        .map(|(x, y)| (x - mux) * (y - muy))
        .sum::<f64>();
    Ok(sum / xs.len() as f64)
}

/// Pearson correlation coefficient.
///
/// Fails with [`StatsError::DivisionByZero`] when either sequence has zero
/// variance.
///
/// # Examples
///
/// ```
/// use probkit_stats::correlation::correlation;
///
/// let r = correlation(&[1.0, 2.0, 3.0, 4.0], &[8.0, 6.0, 4.0, 2.0]).unwrap();
/// assert!((r + 1.0).abs() < 1e-12);
/// assert!(correlation(&[1.0, 1.0], &[1.0, 2.0]).is_err());
/// ```
pub fn correlation(xs: &[f64], ys: &[f64]) -> Result<f64, StatsError> {
    StatsError::check_paired(xs, ys)?;
    let (mux, varx) = moments::mean_var(xs, 0)?;
    let (muy, vary) = moments::mean_var(ys, 0)?;
    if varx == 0.0 || vary == 0.0 {
        return Err(StatsError::division_by_zero(
            "correlation with a zero-variance sequence",
        ));
    }
    let cov = covariance_about(xs, ys, mux, muy)?;
    Ok(cov / (varx.sqrt() * vary.sqrt()))
}

/// Replaces each value with its 1-based rank.
///
/// Equal values receive distinct ranks in the order they appear in `xs`.
///
/// # Examples
///
/// ```
/// use probkit_stats::correlation::map_to_ranks;
///
/// assert_eq!(map_to_ranks(&[30.0, 10.0, 20.0, 10.0]), vec![4.0, 1.0, 3.0, 2.0]);
/// ```
#[expect(clippy::cast_precision_loss)]
#[must_use]
pub fn map_to_ranks(xs: &[f64]) -> Vec<f64> {
    let mut order = (0..xs.len()).collect::<Vec<_>>();
    // sort_by is stable, so ties keep their original index order
    order.sort_by(|&a, &b| xs[a].total_cmp(&xs[b]));
    let mut ranks = vec![0.0; xs.len()];
    for (rank, index) in order.into_iter().enumerate() {
        ranks[index] = (rank + 1) as f64;
    }
    ranks
}

/// Spearman rank correlation: Pearson correlation of [`map_to_ranks`].
pub fn spearman_correlation(xs: &[f64], ys: &[f64]) -> Result<f64, StatsError> {
    StatsError::check_paired(xs, ys)?;
    correlation(&map_to_ranks(xs), &map_to_ranks(ys))
}

/// Correlation between `xs` and itself shifted by `lag` positions.
pub fn serial_correlation(xs: &[f64], lag: usize) -> Result<f64, StatsError> {
    if lag >= xs.len() {
        return Err(StatsError::EmptyInput);
    }
    correlation(&xs[lag..], &xs[..xs.len() - lag])
}
