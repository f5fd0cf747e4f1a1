//! Helpers for visual checks of distribution shape.

use probkit_dist::DistError;
use rand::Rng;
use rand_distr::{Distribution as _, Normal, StandardNormal};

use crate::error::StatsError;

/// Pairs a sorted standard-normal sample with the sorted data.
///
/// If `ys` is normally distributed, the points `(xs[i], ys[i])` fall close to
/// the line `y = mean + std * x`.
///
/// # Examples
///
/// ```
/// use probkit_dist::random::RandomSource;
/// use probkit_stats::probplot::normal_probability;
///
/// let mut rng = RandomSource::seed_from_u64(10);
/// let (xs, ys) = normal_probability(&[3.0, 1.0, 2.0], &mut rng).unwrap();
/// assert_eq!(ys, vec![1.0, 2.0, 3.0]);
/// assert!(xs.is_sorted());
/// ```
pub fn normal_probability<R>(ys: &[f64], rng: &mut R) -> Result<(Vec<f64>, Vec<f64>), StatsError>
where
    R: Rng + ?Sized,
{
    if ys.is_empty() {
        return Err(StatsError::EmptyInput);
    }
    let mut xs = (0..ys.len())
        .map(|_| StandardNormal.sample(rng))
        .collect::<Vec<f64>>();
    xs.sort_by(f64::total_cmp);
    let mut ys = ys.to_vec();
    ys.sort_by(f64::total_cmp);
    Ok((xs, ys))
}

/// Adds Gaussian noise with standard deviation `width` to each value.
///
/// Used to spread out rounded data before plotting. `width` must be finite
/// and non-negative; a width of 0 returns the values unchanged.
pub fn jitter<R>(values: &[f64], width: f64, rng: &mut R) -> Result<Vec<f64>, StatsError>
where
    R: Rng + ?Sized,
{
    let invalid_width = || DistError::InvalidParameter {
        name: "width",
        value: width,
    };
    if width < 0.0 || !width.is_finite() {
        return Err(invalid_width().into());
    }
    let noise = Normal::new(0.0, width).map_err(|_| invalid_width())?;
    Ok(values.iter().map(|v| v + noise.sample(rng)).collect())
}
