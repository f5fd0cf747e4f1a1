//! Resampling of raw sequences and summaries of sampling distributions.
//!
//! Every operation takes the random source explicitly, so a seeded
//! [`RandomSource`](probkit_dist::random::RandomSource) makes the results
//! exactly reproducible.

use probkit_dist::{cdf::Cdf, value::Value as _};
use rand::Rng;
use serde::Serialize;

use crate::{error::StatsError, moments};

/// Draws `n` values uniformly from `xs`, with replacement.
///
/// `n == 0` yields an empty vector even for empty input; drawing one or more
/// values from an empty input fails with [`StatsError::EmptyInput`].
///
/// # Examples
///
/// ```
/// use probkit_dist::random::RandomSource;
/// use probkit_stats::resample::resample_with_replacement;
///
/// let xs = [1.0, 2.0, 3.0];
/// let mut rng = RandomSource::seed_from_u64(3);
/// let sample = resample_with_replacement(&xs, 10, &mut rng).unwrap();
/// assert_eq!(sample.len(), 10);
/// assert!(sample.iter().all(|x| xs.contains(x)));
/// ```
pub fn resample_with_replacement<T, R>(
    xs: &[T],
    n: usize,
    rng: &mut R,
) -> Result<Vec<T>, StatsError>
where
    T: Copy,
    R: Rng + ?Sized,
{
    if n == 0 {
        return Ok(vec![]);
    }
    if xs.is_empty() {
        return Err(StatsError::EmptyInput);
    }
    Ok((0..n).map(|_| xs[rng.random_range(0..xs.len())]).collect())
}

/// Sampling distribution of `statistic`: evaluates it on `iters` resamples
/// of `xs`, each the same size as `xs`.
///
/// # Examples
///
/// ```
/// use probkit_dist::random::RandomSource;
/// use probkit_stats::{moments, resample::bootstrap};
///
/// let xs = [2.0, 4.0, 4.0, 5.0, 7.0, 9.0];
/// let mut rng = RandomSource::seed_from_u64(11);
/// let means = bootstrap(&xs, 100, moments::mean, &mut rng).unwrap();
/// assert_eq!(means.len(), 100);
/// ```
pub fn bootstrap<F, R>(
    xs: &[f64],
    iters: usize,
    mut statistic: F,
    rng: &mut R,
) -> Result<Vec<f64>, StatsError>
where
    F: FnMut(&[f64]) -> Result<f64, StatsError>,
    R: Rng + ?Sized,
{
    if xs.is_empty() {
        return Err(StatsError::EmptyInput);
    }
    (0..iters)
        .map(|_| {
            let sample = resample_with_replacement(xs, xs.len(), rng)?;
            statistic(&sample)
        })
        .collect()
}

/// Summary of a sampling distribution of estimates around an actual value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SamplingSummary {
    /// Mean of the estimates.
    pub mean: f64,
    /// Root mean squared error of the estimates about the actual value.
    pub std_err: f64,
    /// 90% confidence interval (5th and 95th percentiles).
    pub confidence_interval: (f64, f64),
}

impl SamplingSummary {
    /// Summarizes `estimates` of a quantity whose value is `actual`.
    ///
    /// # Examples
    ///
    /// ```
    /// use probkit_stats::resample::SamplingSummary;
    ///
    /// let estimates = (1..=100).map(f64::from).collect::<Vec<_>>();
    /// let summary = SamplingSummary::from_estimates(&estimates, 50.5).unwrap();
    /// assert_eq!(summary.mean, 50.5);
    /// assert_eq!(summary.confidence_interval, (5.0, 95.0));
    /// ```
    #[expect(clippy::cast_precision_loss)]
    pub fn from_estimates(estimates: &[f64], actual: f64) -> Result<Self, StatsError> {
        let mean = moments::mean(estimates)?;
        let mse = estimates
            .iter()
            .map(|e| (e - actual).powi(2))
            .sum::<f64>()
            / estimates.len() as f64;
        let cdf = Cdf::from_reals(estimates)?;
        let (low, high) = cdf.credible_interval(90.0)?;
        Ok(Self {
            mean,
            std_err: mse.sqrt(),
            confidence_interval: (low.to_f64(), high.to_f64()),
        })
    }
}
