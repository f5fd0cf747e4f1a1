//! Moments and summary statistics of raw observation sequences.
//!
//! Variance-type operators take an explicit `ddof` (delta degrees of
//! freedom): the divisor is `n - ddof`. Use `ddof = 0` for the biased
//! population estimator and `ddof = 1` for the unbiased sample estimator.
//! There is no default, so every call site states which convention it uses.

use probkit_dist::{cdf::Cdf, value::Value as _};

use crate::error::StatsError;

/// Arithmetic mean.
///
/// # Examples
///
/// ```
/// use probkit_stats::moments::mean;
///
/// assert_eq!(mean(&[1.0, 2.0, 3.0, 6.0]).unwrap(), 3.0);
/// assert!(mean(&[]).is_err());
/// ```
#[expect(clippy::cast_precision_loss)]
pub fn mean(xs: &[f64]) -> Result<f64, StatsError> {
    if xs.is_empty() {
        return Err(StatsError::EmptyInput);
    }
    Ok(xs.iter().sum::<f64>() / xs.len() as f64)
}

/// Variance with divisor `n - ddof`.
///
/// Fails with [`StatsError::DivisionByZero`] when `n <= ddof`.
///
/// # Examples
///
/// ```
/// use probkit_stats::moments::variance;
///
/// let xs = [1.0, 1.0, 1.0, 3.0, 3.0, 591.0];
/// assert_eq!(variance(&xs, 0).unwrap(), 48217.0);
/// assert!((variance(&xs, 1).unwrap() - 48217.0 * 6.0 / 5.0).abs() < 1e-9);
/// ```
pub fn variance(xs: &[f64], ddof: usize) -> Result<f64, StatsError> {
    mean_var(xs, ddof).map(|(_, var)| var)
}

/// Square root of [`variance`].
pub fn std_dev(xs: &[f64], ddof: usize) -> Result<f64, StatsError> {
    variance(xs, ddof).map(f64::sqrt)
}

/// Mean and variance (divisor `n - ddof`) in one pass over the deviations.
#[expect(clippy::cast_precision_loss)]
pub fn mean_var(xs: &[f64], ddof: usize) -> Result<(f64, f64), StatsError> {
    let mu = mean(xs)?;
    let n = xs.len();
    if n <= ddof {
        return Err(StatsError::division_by_zero(
            "variance needs more observations than ddof",
        ));
    }
    let ss = xs.iter().map(|x| (x - mu).powi(2)).sum::<f64>();
    Ok((mu, ss / (n - ddof) as f64))
}

/// Sorts `xs` and drops `floor(p * n)` observations from each end.
///
/// Truncation is count-based and symmetric; no interpolation happens at the
/// cut points.
///
/// # Examples
///
/// ```
/// use probkit_stats::moments::trim;
///
/// let xs = [9.0, 1.0, 5.0, 3.0, 7.0, 100.0, -50.0, 4.0, 6.0, 2.0];
/// assert_eq!(trim(&xs, 0.1), vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 9.0]);
/// ```
#[expect(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
#[must_use]
pub fn trim(xs: &[f64], p: f64) -> Vec<f64> {
    let mut sorted = xs.to_vec();
    sorted.sort_by(f64::total_cmp);
    let n = sorted.len();
    let k = ((p * n as f64).floor() as usize).min(n / 2);
    sorted[k..n - k].to_vec()
}

/// Mean after [`trim`]ming a fraction `p` from each tail.
pub fn trimmed_mean(xs: &[f64], p: f64) -> Result<f64, StatsError> {
    mean(&trim(xs, p))
}

/// Mean and variance after [`trim`]ming a fraction `p` from each tail.
pub fn trimmed_mean_var(xs: &[f64], p: f64, ddof: usize) -> Result<(f64, f64), StatsError> {
    mean_var(&trim(xs, p), ddof)
}

/// `k`-th raw moment: `mean(x^k)`.
#[expect(clippy::cast_precision_loss)]
pub fn raw_moment(xs: &[f64], k: i32) -> Result<f64, StatsError> {
    if xs.is_empty() {
        return Err(StatsError::EmptyInput);
    }
    Ok(xs.iter().map(|x| x.powi(k)).sum::<f64>() / xs.len() as f64)
}

/// `k`-th central moment: `mean((x - mean)^k)`.
#[expect(clippy::cast_precision_loss)]
pub fn central_moment(xs: &[f64], k: i32) -> Result<f64, StatsError> {
    let mu = mean(xs)?;
    Ok(xs.iter().map(|x| (x - mu).powi(k)).sum::<f64>() / xs.len() as f64)
}

/// `k`-th central moment divided by `std^k` (population standard deviation).
pub fn standardized_moment(xs: &[f64], k: i32) -> Result<f64, StatsError> {
    let var = central_moment(xs, 2)?;
    if var == 0.0 {
        return Err(StatsError::division_by_zero(
            "standardized moment of a sample with zero variance",
        ));
    }
    Ok(central_moment(xs, k)? / var.sqrt().powi(k))
}

/// Sample skewness: the third standardized moment.
pub fn skewness(xs: &[f64]) -> Result<f64, StatsError> {
    standardized_moment(xs, 3)
}

/// Median, taken from the CDF of the observations (the smallest value whose
/// cumulative probability reaches 0.5).
pub fn median(xs: &[f64]) -> Result<f64, StatsError> {
    percentile(xs, 50.0)
}

/// Value at percentile rank `rank` (0–100), taken from the CDF of the
/// observations.
pub fn percentile(xs: &[f64], rank: f64) -> Result<f64, StatsError> {
    if xs.is_empty() {
        return Err(StatsError::EmptyInput);
    }
    let cdf = Cdf::from_reals(xs)?;
    Ok(cdf.percentile(rank)?.to_f64())
}

/// 25th and 75th percentiles.
pub fn interquartile_range(xs: &[f64]) -> Result<(f64, f64), StatsError> {
    if xs.is_empty() {
        return Err(StatsError::EmptyInput);
    }
    let cdf = Cdf::from_reals(xs)?;
    Ok((cdf.percentile(25.0)?.to_f64(), cdf.percentile(75.0)?.to_f64()))
}

/// Pearson's median skewness: `3 (mean - median) / std`.
pub fn pearson_median_skewness(xs: &[f64]) -> Result<f64, StatsError> {
    let (mu, var) = mean_var(xs, 0)?;
    if var == 0.0 {
        return Err(StatsError::division_by_zero(
            "median skewness of a sample with zero variance",
        ));
    }
    Ok(3.0 * (mu - median(xs)?) / var.sqrt())
}

/// Cohen's d: difference in means divided by the pooled standard deviation.
///
/// Group variances use `ddof = 0` and are pooled weighted by group size.
#[expect(clippy::cast_precision_loss)]
pub fn cohen_effect_size(group1: &[f64], group2: &[f64]) -> Result<f64, StatsError> {
    let (mu1, var1) = mean_var(group1, 0)?;
    let (mu2, var2) = mean_var(group2, 0)?;
    let (n1, n2) = (group1.len() as f64, group2.len() as f64);
    let pooled = (n1 * var1 + n2 * var2) / (n1 + n2);
    if pooled == 0.0 {
        return Err(StatsError::division_by_zero(
            "effect size of groups with zero pooled variance",
        ));
    }
    Ok((mu1 - mu2) / pooled.sqrt())
}
