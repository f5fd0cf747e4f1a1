//! Cumulative distribution functions.
//!
//! A [`Cdf`] stores two parallel sequences: strictly increasing values `xs`
//! and non-decreasing cumulative probabilities `ps`, where `ps[i]` is the
//! probability that a random draw is `<= xs[i]`.
//!
//! # Lookup semantics
//!
//! - [`Cdf::probability`] uses floor semantics: the last `ps[i]` with
//!   `xs[i] <= x`, or 0 below the first value.
//! - [`Cdf::value`] uses ceiling semantics: the first `xs[i]` with
//!   `ps[i] >= p`. A probability equal to a stored `ps[i]` therefore maps to
//!   that knot's value rather than the next one.
//!
//! Both lookups are binary searches, so repeated probabilities (ties in the
//! cumulative sum) resolve deterministically by value order.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::{
    error::DistError,
    histogram::Histogram,
    pmf::Pmf,
    value::{Real, Value, real},
};

/// Step-function cumulative distribution over ordered values.
///
/// # Examples
///
/// ```
/// use probkit_dist::cdf::Cdf;
///
/// let cdf = Cdf::from_values([1, 2, 2, 3, 5]).unwrap();
/// assert_eq!(cdf.probability(&0), 0.0);
/// assert_eq!(cdf.probability(&2), 0.6);
/// assert_eq!(cdf.probability(&5), 1.0);
/// assert_eq!(cdf.value(0.6).unwrap(), 2);
/// assert_eq!(cdf.value(0.61).unwrap(), 3);
/// ```
///
/// Equality compares `xs` and `ps` exactly. The same data can round
/// differently depending on how the CDF was built: [`Cdf::from_histogram`]
/// divides integer running counts, while [`Cdf::from_pmf`] sums
/// already-normalized masses. Compare `ps` with a tolerance across paths.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cdf<K> {
    xs: Vec<K>,
    ps: Vec<f64>,
}

impl<K> Default for Cdf<K> {
    fn default() -> Self {
        Self {
            xs: vec![],
            ps: vec![],
        }
    }
}

impl<K> Cdf<K>
where
    K: Ord + Copy,
{
    /// Builds a CDF from `(value, weight)` pairs sorted by value with unique
    /// values.
    ///
    /// Weights are accumulated into a running sum which is divided by the
    /// final total. An empty input produces an empty CDF.
    fn from_sorted_weights<I>(weights: I) -> Result<Self, DistError>
    where
        I: IntoIterator<Item = (K, f64)>,
    {
        let mut xs = vec![];
        let mut ps = vec![];
        let mut running = 0.0;
        for (value, weight) in weights {
            running += weight;
            xs.push(value);
            ps.push(running);
        }
        debug_assert!(xs.is_sorted_by(|a, b| a < b), "values must be strictly increasing");

        if xs.is_empty() {
            return Ok(Self::default());
        }
        if running == 0.0 {
            return Err(DistError::division_by_zero(
                "cannot build a CDF whose total weight is zero",
            ));
        }
        for p in &mut ps {
            *p /= running;
        }
        Ok(Self { xs, ps })
    }

    /// Builds a CDF from raw observations.
    pub fn from_values<I>(values: I) -> Result<Self, DistError>
    where
        I: IntoIterator<Item = K>,
    {
        Self::from_histogram(&Histogram::from_values(values))
    }

    /// Builds a CDF by accumulating histogram counts in value order.
    ///
    /// An empty histogram yields an empty CDF; a non-empty histogram whose
    /// total is 0 fails with [`DistError::DivisionByZero`].
    #[expect(clippy::cast_precision_loss)]
    pub fn from_histogram(hist: &Histogram<K>) -> Result<Self, DistError> {
        Self::from_sorted_weights(hist.iter().map(|(v, c)| (v, c as f64)))
    }

    /// Builds a CDF by accumulating PMF masses in value order.
    ///
    /// The PMF does not need to be normalized.
    pub fn from_pmf(pmf: &Pmf<K>) -> Result<Self, DistError> {
        Self::from_sorted_weights(pmf.iter())
    }

    /// Returns the values in ascending order.
    #[must_use]
    pub fn xs(&self) -> &[K] {
        &self.xs
    }

    /// Returns the cumulative probabilities, parallel to [`Self::xs`].
    #[must_use]
    pub fn ps(&self) -> &[f64] {
        &self.ps
    }

    /// Returns the number of knots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.xs.len()
    }

    /// Returns `true` if the CDF has no values.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.xs.is_empty()
    }

    /// Returns `(value, cumulative probability)` pairs in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = (K, f64)> + '_ {
        self.xs.iter().copied().zip(self.ps.iter().copied())
    }

    /// Returns the probability that a random draw is `<= x`.
    #[must_use]
    pub fn probability(&self, x: &K) -> f64 {
        let idx = self.xs.partition_point(|v| v <= x);
        if idx == 0 { 0.0 } else { self.ps[idx - 1] }
    }

    /// Returns [`Self::probability`] for several values.
    #[must_use]
    pub fn probabilities<'a, I>(&self, xs: I) -> Vec<f64>
    where
        I: IntoIterator<Item = &'a K>,
        K: 'a,
    {
        xs.into_iter().map(|x| self.probability(x)).collect()
    }

    /// Returns the percentile rank (0–100) of `x`.
    #[must_use]
    pub fn percentile_rank(&self, x: &K) -> f64 {
        100.0 * self.probability(x)
    }

    /// Returns the smallest value whose cumulative probability is `>= p`.
    ///
    /// `p == 0` maps to the first value and `p == 1` to the last. Fails with
    /// [`DistError::ProbabilityOutOfRange`] if `p` is outside `[0, 1]` and
    /// with [`DistError::EmptyDistribution`] if the CDF is empty.
    pub fn value(&self, p: f64) -> Result<K, DistError> {
        if !(0.0..=1.0).contains(&p) {
            return Err(DistError::ProbabilityOutOfRange { p });
        }
        let (Some(&first), Some(&last)) = (self.xs.first(), self.xs.last()) else {
            return Err(DistError::EmptyDistribution);
        };
        if p == 0.0 {
            return Ok(first);
        }
        if p == 1.0 {
            return Ok(last);
        }
        let idx = self.ps.partition_point(|&q| q < p);
        Ok(self.xs.get(idx).copied().unwrap_or(last))
    }

    /// Returns the value at percentile rank `rank` (0–100).
    pub fn percentile(&self, rank: f64) -> Result<K, DistError> {
        self.value(rank / 100.0)
    }

    /// Returns the central interval covering `percentage` percent of the mass.
    ///
    /// # Examples
    ///
    /// ```
    /// use probkit_dist::cdf::Cdf;
    ///
    /// let cdf = Cdf::from_values(1..=100).unwrap();
    /// assert_eq!(cdf.credible_interval(90.0).unwrap(), (5, 95));
    /// ```
    pub fn credible_interval(&self, percentage: f64) -> Result<(K, K), DistError> {
        let tail = (100.0 - percentage) / 200.0;
        Ok((self.value(tail)?, self.value(1.0 - tail)?))
    }

    /// Draws one value by inverting a uniform draw.
    pub fn random<R>(&self, rng: &mut R) -> Result<K, DistError>
    where
        R: Rng + ?Sized,
    {
        self.value(rng.random::<f64>())
    }

    /// Draws `n` independent values.
    ///
    /// The sample is materialized eagerly; each call produces a fresh sample.
    pub fn sample<R>(&self, n: usize, rng: &mut R) -> Result<Vec<K>, DistError>
    where
        R: Rng + ?Sized,
    {
        if self.is_empty() {
            return Err(DistError::EmptyDistribution);
        }
        (0..n).map(|_| self.random(rng)).collect()
    }

    /// Distribution of the maximum of `k` independent draws (`ps^k`).
    ///
    /// `k` must be at least 1.
    pub fn max_of(&self, k: u32) -> Result<Self, DistError> {
        if k == 0 {
            return Err(DistError::InvalidParameter {
                name: "k",
                value: 0.0,
            });
        }
        let k = f64::from(k);
        Ok(Self {
            xs: self.xs.clone(),
            ps: self.ps.iter().map(|p| p.powf(k)).collect(),
        })
    }

    /// Converts back to a PMF by taking forward differences.
    #[must_use]
    pub fn make_pmf(&self) -> Pmf<K> {
        Pmf::from_cdf(self)
    }

    /// Returns points tracing the CDF as a staircase.
    ///
    /// Each knot becomes two points: the flat level reached before it, then the
    /// rise to its own probability. Plotting the result with straight lines
    /// draws the step function.
    ///
    /// # Examples
    ///
    /// ```
    /// use probkit_dist::cdf::Cdf;
    ///
    /// let cdf = Cdf::from_values([1, 2]).unwrap();
    /// let (xs, ps) = cdf.render();
    /// assert_eq!(xs, vec![1, 1, 2, 2]);
    /// assert_eq!(ps, vec![0.0, 0.5, 0.5, 1.0]);
    /// ```
    #[must_use]
    pub fn render(&self) -> (Vec<K>, Vec<f64>) {
        let mut xs = Vec::with_capacity(2 * self.len());
        let mut ps = Vec::with_capacity(2 * self.len());
        let mut prev = 0.0;
        for (x, p) in self.iter() {
            xs.extend([x, x]);
            ps.extend([prev, p]);
            prev = p;
        }
        (xs, ps)
    }
}

impl<K> Cdf<K>
where
    K: Value,
{
    /// Returns the mean of the distribution.
    #[must_use]
    pub fn mean(&self) -> f64 {
        let mut prev = 0.0;
        let mut total = 0.0;
        for (x, p) in self.iter() {
            total += (p - prev) * x.to_f64();
            prev = p;
        }
        total
    }

    /// Multiplies every value by `factor`.
    ///
    /// A negative factor would reverse the value order, so it is rejected.
    pub fn scale(&self, factor: f64) -> Result<Cdf<Real>, DistError> {
        if factor.is_nan() || factor < 0.0 {
            return Err(DistError::InvalidParameter {
                name: "factor",
                value: factor,
            });
        }
        let mut scaled = Cdf::<Real>::default();
        for (x, p) in self.iter() {
            let x = real(x.to_f64() * factor);
            // A zero factor collapses every value onto one knot
            if scaled.xs.last() == Some(&x) {
                if let Some(last) = scaled.ps.last_mut() {
                    *last = p;
                }
            } else {
                scaled.xs.push(x);
                scaled.ps.push(p);
            }
        }
        Ok(scaled)
    }
}

impl<K> Cdf<K>
where
    K: Ord + Copy + std::ops::Add<Output = K>,
{
    /// Adds `term` to every value.
    #[must_use]
    pub fn shift(&self, term: K) -> Self {
        Self {
            xs: self.xs.iter().map(|&x| x + term).collect(),
            ps: self.ps.clone(),
        }
    }
}

impl Cdf<Real> {
    /// Builds a CDF from floating point observations.
    pub fn from_reals(values: &[f64]) -> Result<Self, DistError> {
        Self::from_values(values.iter().copied().map(real))
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::random::RandomSource;

    #[test]
    fn test_concrete_example() {
        let cdf = Cdf::from_values([1, 2, 2, 3, 5]).unwrap();
        assert_eq!(cdf.xs(), &[1, 2, 3, 5]);
        assert_eq!(cdf.probability(&2), 0.6);
        assert_eq!(cdf.probability(&0), 0.0);
        assert_eq!(cdf.probability(&4), 0.8);
        assert_eq!(cdf.probability(&5), 1.0);
        assert_eq!(cdf.probability(&100), 1.0);
        assert_eq!(cdf.value(0.6).unwrap(), 2);
        assert_eq!(cdf.value(0.61).unwrap(), 3);
    }

    #[test]
    fn test_inverse_consistency() {
        let cdf = Cdf::from_values([2, 4, 4, 4, 7, 9]).unwrap();
        assert_eq!(cdf.value(cdf.probability(&4)).unwrap(), 4);
        let median = cdf.percentile(50.0).unwrap();
        assert_eq!(median, 4);
        assert_eq!(cdf.percentile(50.0).unwrap(), median);
    }

    #[test]
    fn test_value_boundaries() {
        let cdf = Cdf::from_values([3, 8, 10]).unwrap();
        assert_eq!(cdf.value(0.0).unwrap(), 3);
        assert_eq!(cdf.value(1.0).unwrap(), 10);
        assert_eq!(cdf.value(1e-9).unwrap(), 3);
    }

    #[test]
    fn test_value_out_of_range() {
        let cdf = Cdf::from_values([1, 2]).unwrap();
        assert_eq!(
            cdf.value(-0.1),
            Err(DistError::ProbabilityOutOfRange { p: -0.1 })
        );
        assert!(matches!(
            cdf.value(1.5),
            Err(DistError::ProbabilityOutOfRange { .. })
        ));
        assert!(cdf.value(f64::NAN).is_err());
    }

    #[test]
    fn test_construction_paths_agree_within_tolerance() {
        let hist = Histogram::from_values([1, 2, 2, 3, 5]);
        let direct = Cdf::from_histogram(&hist).unwrap();
        let via_pmf = Pmf::from_histogram(&hist).unwrap().make_cdf().unwrap();
        assert_eq!(direct.xs(), via_pmf.xs());
        assert_eq!(direct.ps(), &[0.2, 0.6, 0.8, 1.0]);
        for (a, b) in direct.ps().iter().zip(via_pmf.ps()) {
            assert!((a - b).abs() < 1e-12, "{a} vs {b}");
        }
        assert_eq!(via_pmf.ps().last(), Some(&1.0));
    }

    #[test]
    fn test_max_of() {
        let cdf = Cdf::from_values([1, 2, 3, 4]).unwrap();
        let max = cdf.max_of(2).unwrap();
        assert_eq!(max.xs(), cdf.xs());
        assert!((max.probability(&2) - 0.25).abs() < 1e-12);
        assert_eq!(max.probability(&4), 1.0);
        assert_eq!(cdf.max_of(1).unwrap(), cdf);
        assert!(matches!(
            cdf.max_of(0),
            Err(DistError::InvalidParameter { name: "k", .. })
        ));
    }

    #[test]
    fn test_empty_cdf() {
        let cdf = Cdf::<i32>::from_values([]).unwrap();
        assert!(cdf.is_empty());
        assert_eq!(cdf.probability(&1), 0.0);
        assert_eq!(cdf.value(0.5), Err(DistError::EmptyDistribution));
        let mut rng = RandomSource::seed_from_u64(0);
        assert_eq!(cdf.sample(3, &mut rng), Err(DistError::EmptyDistribution));
    }

    #[test]
    fn test_zero_weight_pmf_fails() {
        let pmf = Pmf::from_masses([(1, 0.0), (2, 0.0)]);
        assert!(matches!(
            Cdf::from_pmf(&pmf),
            Err(DistError::DivisionByZero { .. })
        ));
    }

    #[test]
    fn test_from_unnormalized_pmf() {
        let pmf = Pmf::from_masses([(1, 2.0), (2, 2.0)]);
        let cdf = Cdf::from_pmf(&pmf).unwrap();
        assert_eq!(cdf.ps(), &[0.5, 1.0]);
    }

    #[test]
    fn test_sample_is_reproducible_and_fresh() {
        let cdf = Cdf::from_values(0..100).unwrap();
        let mut rng1 = RandomSource::seed_from_u64(5);
        let mut rng2 = RandomSource::seed_from_u64(5);
        let a = cdf.sample(50, &mut rng1).unwrap();
        let b = cdf.sample(50, &mut rng2).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.len(), 50);
        let c = cdf.sample(50, &mut rng1).unwrap();
        assert_ne!(a, c);
    }

    #[test]
    fn test_mean_matches_pmf() {
        let values = [1, 1, 1, 3, 3, 591];
        let cdf = Cdf::from_values(values).unwrap();
        assert!((cdf.mean() - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_render_staircase() {
        let cdf = Cdf::from_values([1, 2, 2, 3, 5]).unwrap();
        let (xs, ps) = cdf.render();
        assert_eq!(xs, vec![1, 1, 2, 2, 3, 3, 5, 5]);
        assert_eq!(ps[0], 0.0);
        assert_eq!(ps[1], 0.2);
        assert_eq!(ps[2], 0.2);
        assert_eq!(ps[7], 1.0);
    }

    #[test]
    fn test_shift_and_scale() {
        let cdf = Cdf::from_values([1, 2, 3]).unwrap();
        let shifted = cdf.shift(10);
        assert_eq!(shifted.xs(), &[11, 12, 13]);
        assert_eq!(shifted.ps(), cdf.ps());

        let scaled = cdf.scale(0.5).unwrap();
        assert_eq!(scaled.xs(), &[real(0.5), real(1.0), real(1.5)]);
        let collapsed = cdf.scale(0.0).unwrap();
        assert_eq!(collapsed.xs(), &[real(0.0)]);
        assert_eq!(collapsed.ps(), &[1.0]);
        assert!(cdf.scale(-1.0).is_err());
    }

    #[test]
    fn test_percentile_rank() {
        let cdf = Cdf::from_values([10, 20, 30, 40]).unwrap();
        assert_eq!(cdf.percentile_rank(&20), 50.0);
        assert_eq!(cdf.percentile_rank(&5), 0.0);
    }

    proptest! {
        #[test]
        fn prop_cdf_is_monotone(values in proptest::collection::vec(-100.0_f64..100.0, 1..200)) {
            let cdf = Cdf::from_reals(&values).unwrap();
            for pair in cdf.ps().windows(2) {
                prop_assert!(pair[0] <= pair[1]);
            }
            for pair in cdf.xs().windows(2) {
                prop_assert!(pair[0] < pair[1]);
            }
            prop_assert_eq!(*cdf.ps().last().unwrap(), 1.0);
        }

        #[test]
        fn prop_value_inverts_probability(values in proptest::collection::vec(0_i32..50, 1..100)) {
            let cdf = Cdf::from_values(values).unwrap();
            for &x in cdf.xs() {
                prop_assert_eq!(cdf.value(cdf.probability(&x)).unwrap(), x);
            }
        }
    }
}
