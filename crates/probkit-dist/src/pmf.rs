//! Probability mass functions.
//!
//! A [`Pmf`] maps values to probability masses. Masses are *not* kept
//! normalized: operations such as [`Pmf::increment`], [`Pmf::multiply`] and
//! [`Pmf::scale_masses`] leave the total wherever it lands, and callers invoke
//! [`Pmf::normalize`] when they need a true probability distribution. This
//! allows multi-step transforms (e.g. reweighting by value to model observer
//! bias) to pass through an unnormalized intermediate state.

use std::{
    collections::BTreeMap,
    ops::{Add, Sub},
};

use rand::Rng;

use crate::{
    cdf::Cdf,
    error::DistError,
    histogram::Histogram,
    value::{Real, Value, real},
};

/// Discrete distribution mapping values to probability masses.
///
/// # Examples
///
/// ```
/// use probkit_dist::pmf::Pmf;
///
/// let pmf = Pmf::from_values([1, 2, 2, 3, 5]).unwrap();
/// assert_eq!(pmf.probability(&2), 0.4);
/// assert_eq!(pmf.probability(&4), 0.0);
/// assert!((pmf.mean() - 2.6).abs() < 1e-12);
/// ```
///
/// Equality compares masses exactly, so two PMFs reached through different
/// arithmetic may differ in the last bit.
#[derive(Debug, Clone, PartialEq)]
pub struct Pmf<K> {
    masses: BTreeMap<K, f64>,
}

impl<K> Default for Pmf<K> {
    fn default() -> Self {
        Self {
            masses: BTreeMap::new(),
        }
    }
}

impl<K> Pmf<K>
where
    K: Ord + Copy,
{
    /// Creates an empty PMF.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a PMF from explicit `(value, mass)` pairs without normalizing.
    ///
    /// Masses of repeated values are summed.
    #[must_use]
    pub fn from_masses<I>(masses: I) -> Self
    where
        I: IntoIterator<Item = (K, f64)>,
    {
        let mut pmf = Self::new();
        for (value, mass) in masses {
            pmf.increment(value, mass);
        }
        pmf
    }

    /// Creates a normalized PMF from raw observations.
    ///
    /// Fails with [`DistError::DivisionByZero`] if `values` is empty.
    pub fn from_values<I>(values: I) -> Result<Self, DistError>
    where
        I: IntoIterator<Item = K>,
    {
        Self::from_histogram(&Histogram::from_values(values))
    }

    /// Creates a PMF where each mass is `count / total`.
    ///
    /// Fails with [`DistError::DivisionByZero`] if the histogram total is 0.
    #[expect(clippy::cast_precision_loss)]
    pub fn from_histogram(hist: &Histogram<K>) -> Result<Self, DistError> {
        let mut pmf = Self::from_masses(hist.iter().map(|(v, c)| (v, c as f64)));
        pmf.normalize()?;
        Ok(pmf)
    }

    /// Creates a PMF from the forward differences of a CDF.
    #[must_use]
    pub fn from_cdf(cdf: &Cdf<K>) -> Self {
        let mut prev = 0.0;
        let mut pmf = Self::new();
        for (value, p) in cdf.iter() {
            pmf.increment(value, p - prev);
            prev = p;
        }
        pmf
    }

    /// Sets the mass of `value`.
    pub fn set(&mut self, value: K, mass: f64) {
        self.masses.insert(value, mass);
    }

    /// Adds `amount` to the mass of `value`, creating the entry if absent.
    pub fn increment(&mut self, value: K, amount: f64) {
        *self.masses.entry(value).or_insert(0.0) += amount;
    }

    /// Multiplies the mass of `value` by `factor`.
    ///
    /// Absent values stay absent.
    pub fn multiply(&mut self, value: &K, factor: f64) {
        if let Some(mass) = self.masses.get_mut(value) {
            *mass *= factor;
        }
    }

    /// Multiplies every mass by `factor`.
    pub fn scale_masses(&mut self, factor: f64) {
        for mass in self.masses.values_mut() {
            *mass *= factor;
        }
    }

    /// Removes `value` and returns its mass, if it was present.
    pub fn remove(&mut self, value: &K) -> Option<f64> {
        self.masses.remove(value)
    }

    /// Returns the mass of `value`, or 0 if absent.
    #[must_use]
    pub fn probability(&self, value: &K) -> f64 {
        self.probability_or(value, 0.0)
    }

    /// Returns the mass of `value`, or `default` if absent.
    #[must_use]
    pub fn probability_or(&self, value: &K, default: f64) -> f64 {
        self.masses.get(value).copied().unwrap_or(default)
    }

    /// Returns the masses of several values.
    #[must_use]
    pub fn probabilities<'a, I>(&self, values: I) -> Vec<f64>
    where
        I: IntoIterator<Item = &'a K>,
        K: 'a,
    {
        values.into_iter().map(|v| self.probability(v)).collect()
    }

    /// Returns the sum of all masses.
    #[must_use]
    pub fn total(&self) -> f64 {
        self.masses.values().sum()
    }

    /// Returns the number of values with a mass entry.
    #[must_use]
    pub fn len(&self) -> usize {
        self.masses.len()
    }

    /// Returns `true` if the PMF has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.masses.is_empty()
    }

    /// Returns the values in ascending order.
    pub fn values(&self) -> impl Iterator<Item = K> + '_ {
        self.masses.keys().copied()
    }

    /// Returns `(value, mass)` pairs in ascending value order.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = (K, f64)> + '_ {
        self.masses.iter().map(|(&v, &p)| (v, p))
    }

    /// Rescales the masses so they sum to 1.
    ///
    /// Returns the total before normalization.
    pub fn normalize(&mut self) -> Result<f64, DistError> {
        self.normalize_to(1.0)
    }

    /// Rescales the masses so they sum to `target`.
    ///
    /// Returns the total before normalization. Fails with
    /// [`DistError::DivisionByZero`] if the total mass is 0, including when
    /// the PMF is empty; the PMF is left untouched in that case.
    pub fn normalize_to(&mut self, target: f64) -> Result<f64, DistError> {
        let total = self.total();
        if total == 0.0 {
            return Err(DistError::division_by_zero(
                "cannot normalize a PMF whose total mass is zero",
            ));
        }
        self.scale_masses(target / total);
        Ok(total)
    }

    /// Returns the value with the largest mass (smallest value on ties).
    #[must_use]
    pub fn mode(&self) -> Option<K> {
        let mut best: Option<(K, f64)> = None;
        for (value, mass) in self.iter() {
            if best.is_none_or(|(_, p)| mass > p) {
                best = Some((value, mass));
            }
        }
        best.map(|(value, _)| value)
    }

    /// Builds the cumulative distribution of this PMF.
    pub fn make_cdf(&self) -> Result<Cdf<K>, DistError> {
        Cdf::from_pmf(self)
    }

    /// Returns the value at percentile rank `rank` (0–100).
    pub fn percentile(&self, rank: f64) -> Result<K, DistError> {
        self.make_cdf()?.percentile(rank)
    }

    /// Returns the 50th percentile.
    pub fn median(&self) -> Result<K, DistError> {
        self.percentile(50.0)
    }

    /// Returns the central credible interval covering `percentage` percent of the mass.
    pub fn credible_interval(&self, percentage: f64) -> Result<(K, K), DistError> {
        self.make_cdf()?.credible_interval(percentage)
    }

    /// Draws a random value with probability proportional to its mass.
    ///
    /// Walks the values accumulating mass until the running sum reaches a
    /// uniform draw scaled by the total mass, so unnormalized PMFs are
    /// sampled correctly too.
    pub fn random<R>(&self, rng: &mut R) -> Result<K, DistError>
    where
        R: Rng + ?Sized,
    {
        let Some((&last, _)) = self.masses.last_key_value() else {
            return Err(DistError::EmptyDistribution);
        };
        let total = self.total();
        if total <= 0.0 {
            return Err(DistError::division_by_zero(
                "cannot draw from a PMF whose total mass is zero",
            ));
        }
        let target = rng.random::<f64>() * total;
        let mut running = 0.0;
        for (value, mass) in self.iter() {
            running += mass;
            if running >= target {
                return Ok(value);
            }
        }
        // Only reachable through rounding in the running sum
        Ok(last)
    }

    /// Returns parallel sequences of values and masses.
    #[must_use]
    pub fn render(&self) -> (Vec<K>, Vec<f64>) {
        self.iter().unzip()
    }

    /// Probability that a draw from `self` exceeds an independent draw from `other`.
    #[must_use]
    pub fn prob_greater(&self, other: &Self) -> f64 {
        self.pairwise_probability(other, |a, b| a > b)
    }

    /// Probability that a draw from `self` is below an independent draw from `other`.
    #[must_use]
    pub fn prob_less(&self, other: &Self) -> f64 {
        self.pairwise_probability(other, |a, b| a < b)
    }

    /// Probability that independent draws from `self` and `other` are equal.
    #[must_use]
    pub fn prob_equal(&self, other: &Self) -> f64 {
        self.pairwise_probability(other, |a, b| a == b)
    }

    fn pairwise_probability(&self, other: &Self, pred: impl Fn(&K, &K) -> bool) -> f64 {
        let mut total = 0.0;
        for (v1, p1) in self.iter() {
            for (v2, p2) in other.iter() {
                if pred(&v1, &v2) {
                    total += p1 * p2;
                }
            }
        }
        total
    }

    /// Distribution of the maximum of `k` independent draws.
    ///
    /// Fails with [`DistError::InvalidParameter`] when `k` is 0.
    pub fn max_of(&self, k: u32) -> Result<Self, DistError> {
        Ok(self.make_cdf()?.max_of(k)?.make_pmf())
    }

    /// Builds a normalized mixture of PMFs.
    ///
    /// Each component contributes its masses multiplied by its weight.
    ///
    /// # Examples
    ///
    /// ```
    /// use probkit_dist::pmf::Pmf;
    ///
    /// let d6 = Pmf::from_values(1..=6).unwrap();
    /// let d4 = Pmf::from_values(1..=4).unwrap();
    /// let mix = Pmf::mixture([(0.5, &d6), (0.5, &d4)]).unwrap();
    /// assert!((mix.probability(&1) - (1.0 / 12.0 + 1.0 / 8.0)).abs() < 1e-12);
    /// ```
    pub fn mixture<'a, I>(components: I) -> Result<Self, DistError>
    where
        I: IntoIterator<Item = (f64, &'a Self)>,
        K: 'a,
    {
        let mut mix = Self::new();
        for (weight, pmf) in components {
            for (value, mass) in pmf.iter() {
                mix.increment(value, weight * mass);
            }
        }
        mix.normalize()?;
        Ok(mix)
    }
}

impl<K> Pmf<K>
where
    K: Value,
{
    /// Returns `Σ p(x)·x`.
    ///
    /// The PMF is assumed to be normalized; no normalization happens here.
    #[must_use]
    pub fn mean(&self) -> f64 {
        self.iter().map(|(x, p)| p * x.to_f64()).sum()
    }

    /// Returns `Σ p(x)·(x - mu)²`, using the mean if `mu` is `None`.
    #[must_use]
    pub fn variance(&self, mu: Option<f64>) -> f64 {
        let mu = mu.unwrap_or_else(|| self.mean());
        self.iter()
            .map(|(x, p)| p * (x.to_f64() - mu).powi(2))
            .sum()
    }

    /// Returns the square root of [`Self::variance`] about the mean.
    #[must_use]
    pub fn std_dev(&self) -> f64 {
        self.variance(None).sqrt()
    }

    /// Reweights each mass by its value and normalizes.
    ///
    /// Models size-biased sampling, where an observer is proportionally more
    /// likely to see large values (e.g. class sizes as reported by students).
    pub fn observer_biased(&self) -> Result<Self, DistError> {
        let mut biased = self.clone();
        for (value, _) in self.iter() {
            biased.multiply(&value, value.to_f64());
        }
        biased.normalize()?;
        Ok(biased)
    }

    /// Inverse of [`Self::observer_biased`]: divides each mass by its value.
    ///
    /// Fails with [`DistError::DivisionByZero`] if any value is 0.
    pub fn observer_unbiased(&self) -> Result<Self, DistError> {
        let mut unbiased = self.clone();
        for (value, _) in self.iter() {
            let x = value.to_f64();
            if x == 0.0 {
                return Err(DistError::division_by_zero(
                    "cannot unbias a PMF that contains the value 0",
                ));
            }
            unbiased.multiply(&value, 1.0 / x);
        }
        unbiased.normalize()?;
        Ok(unbiased)
    }
}

impl<K> Pmf<K>
where
    K: Ord + Copy + Add<Output = K>,
{
    /// Distribution of the sum of independent draws from `self` and `other`.
    ///
    /// Every pair of values contributes `p1 * p2` to `v1 + v2`; the cost is
    /// `O(|self| * |other|)`.
    ///
    /// # Examples
    ///
    /// ```
    /// use probkit_dist::pmf::Pmf;
    ///
    /// let die = Pmf::from_values(1..=6).unwrap();
    /// let two_dice = die.convolve_with(&die);
    /// assert!((two_dice.probability(&7) - 6.0 / 36.0).abs() < 1e-12);
    /// ```
    #[must_use]
    pub fn convolve_with(&self, other: &Self) -> Self {
        let mut sum = Self::new();
        for (v1, p1) in self.iter() {
            for (v2, p2) in other.iter() {
                sum.increment(v1 + v2, p1 * p2);
            }
        }
        sum
    }

    /// Shifts every value by `term`, keeping the masses.
    #[must_use]
    pub fn shift_by(&self, term: K) -> Self {
        Self::from_masses(self.iter().map(|(v, p)| (v + term, p)))
    }
}

impl<K> Pmf<K>
where
    K: Ord + Copy + Sub<Output = K>,
{
    /// Distribution of `v1 - v2` for independent draws from `self` and `other`.
    #[must_use]
    pub fn difference_with(&self, other: &Self) -> Self {
        let mut diff = Self::new();
        for (v1, p1) in self.iter() {
            for (v2, p2) in other.iter() {
                diff.increment(v1 - v2, p1 * p2);
            }
        }
        diff
    }
}

impl Pmf<Real> {
    /// Creates a normalized PMF from floating point observations.
    pub fn from_reals(values: &[f64]) -> Result<Self, DistError> {
        Self::from_values(values.iter().copied().map(real))
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::random::RandomSource;

    const EPS: f64 = 1e-12;

    #[test]
    fn test_probability_matches_histogram() {
        let hist = Histogram::from_values([1, 2, 2, 3, 5]);
        let pmf = Pmf::from_histogram(&hist).unwrap();
        for value in hist.values() {
            let expected = hist.frequency(&value) as f64 / hist.total() as f64;
            assert!((pmf.probability(&value) - expected).abs() < EPS);
        }
    }

    #[test]
    fn test_normalize_returns_previous_total() {
        let mut pmf = Pmf::from_masses([(1, 2.0), (2, 6.0)]);
        let total = pmf.normalize().unwrap();
        assert_eq!(total, 8.0);
        assert!((pmf.probability(&1) - 0.25).abs() < EPS);
        assert!((pmf.total() - 1.0).abs() < EPS);
    }

    #[test]
    fn test_normalize_to_target() {
        let mut pmf = Pmf::from_masses([(1, 1.0), (2, 1.0)]);
        pmf.normalize_to(10.0).unwrap();
        assert!((pmf.probability(&2) - 5.0).abs() < EPS);
    }

    #[test]
    fn test_normalize_zero_mass_fails() {
        let mut empty = Pmf::<i32>::new();
        assert!(matches!(
            empty.normalize(),
            Err(DistError::DivisionByZero { .. })
        ));

        let mut zeros = Pmf::from_masses([(1, 0.0), (2, 0.0)]);
        assert!(matches!(
            zeros.normalize(),
            Err(DistError::DivisionByZero { .. })
        ));
        assert_eq!(zeros.probability(&1), 0.0);
    }

    #[test]
    fn test_mutation_does_not_renormalize() {
        let mut pmf = Pmf::from_values([1, 2]).unwrap();
        pmf.multiply(&2, 3.0);
        assert!((pmf.total() - 2.0).abs() < EPS);
        pmf.normalize().unwrap();
        assert!((pmf.probability(&2) - 0.75).abs() < EPS);
    }

    #[test]
    fn test_probability_default() {
        let pmf = Pmf::from_values([1]).unwrap();
        assert_eq!(pmf.probability_or(&2, 0.5), 0.5);
        assert_eq!(pmf.probability(&2), 0.0);
    }

    #[test]
    fn test_mean_and_variance() {
        let pmf = Pmf::from_values([1, 1, 1, 3, 3, 591]).unwrap();
        assert!((pmf.mean() - 100.0).abs() < 1e-9);
        assert!((pmf.variance(None) - 48217.0).abs() < 1e-6);
        let second_moment = pmf
            .iter()
            .map(|(x, p)| p * f64::from(x * x))
            .sum::<f64>();
        assert!((pmf.variance(Some(0.0)) - second_moment).abs() < 1e-6);
    }

    #[test]
    fn test_percentile_and_median() {
        let pmf = Pmf::from_values([1, 2, 2, 3, 5]).unwrap();
        assert_eq!(pmf.median().unwrap(), 2);
        assert_eq!(pmf.percentile(100.0).unwrap(), 5);
        assert!(matches!(
            pmf.percentile(101.0),
            Err(DistError::ProbabilityOutOfRange { .. })
        ));
    }

    #[test]
    fn test_random_empty_fails() {
        let mut rng = RandomSource::seed_from_u64(0);
        assert_eq!(
            Pmf::<i32>::new().random(&mut rng),
            Err(DistError::EmptyDistribution)
        );
    }

    #[test]
    fn test_random_respects_masses() {
        let mut rng = RandomSource::seed_from_u64(3);
        let pmf = Pmf::from_masses([(1, 0.0), (2, 1.0), (3, 0.0)]);
        for _ in 0..100 {
            assert_eq!(pmf.random(&mut rng).unwrap(), 2);
        }
    }

    #[test]
    fn test_random_unnormalized() {
        let mut rng = RandomSource::seed_from_u64(11);
        let pmf = Pmf::from_masses([(0, 30.0), (1, 10.0)]);
        let ones = (0..4000)
            .filter(|_| pmf.random(&mut rng).unwrap() == 1)
            .count();
        assert!((800..1200).contains(&ones), "ones = {ones}");
    }

    #[test]
    fn test_convolution_of_dice() {
        let die = Pmf::from_values(1..=6).unwrap();
        let sum = die.convolve_with(&die);
        assert_eq!(sum.len(), 11);
        assert!((sum.probability(&2) - 1.0 / 36.0).abs() < EPS);
        assert!((sum.probability(&12) - 1.0 / 36.0).abs() < EPS);
        assert!((sum.total() - 1.0).abs() < EPS);
    }

    #[test]
    fn test_shift_preserves_masses() {
        let pmf = Pmf::from_values([1, 2, 2]).unwrap();
        let shifted = pmf.shift_by(10);
        assert_eq!(shifted.probability(&12), pmf.probability(&2));
        assert_eq!(shifted.probability(&2), 0.0);
        assert_eq!(shifted.len(), pmf.len());
    }

    #[test]
    fn test_difference() {
        let coin = Pmf::from_values([0, 1]).unwrap();
        let diff = coin.difference_with(&coin);
        assert!((diff.probability(&0) - 0.5).abs() < EPS);
        assert!((diff.probability(&-1) - 0.25).abs() < EPS);
    }

    #[test]
    fn test_pairwise_comparisons() {
        let a = Pmf::from_values([1, 2]).unwrap();
        let b = Pmf::from_values([2, 3]).unwrap();
        assert!((a.prob_less(&b) - 0.75).abs() < EPS);
        assert!((a.prob_equal(&b) - 0.25).abs() < EPS);
        assert!(a.prob_greater(&b).abs() < EPS);
    }

    #[test]
    fn test_observer_bias_roundtrip() {
        let actual = Pmf::from_masses([(10, 8.0), (20, 8.0), (40, 1.0)]);
        let biased = actual.observer_biased().unwrap();
        assert!(biased.mean() > actual.mean() / actual.total());
        let unbiased = biased.observer_unbiased().unwrap();
        let mut normalized = actual.clone();
        normalized.normalize().unwrap();
        for (value, mass) in normalized.iter() {
            assert!((unbiased.probability(&value) - mass).abs() < 1e-12);
        }
    }

    #[test]
    fn test_observer_unbias_zero_value_fails() {
        let pmf = Pmf::from_values([0, 1]).unwrap();
        assert!(matches!(
            pmf.observer_unbiased(),
            Err(DistError::DivisionByZero { .. })
        ));
    }

    #[test]
    fn test_max_of_two_coins() {
        let coin = Pmf::from_values([0, 1]).unwrap();
        let max = coin.max_of(2).unwrap();
        assert!((max.probability(&1) - 0.75).abs() < EPS);
        assert!(matches!(
            coin.max_of(0),
            Err(DistError::InvalidParameter { name: "k", .. })
        ));
    }

    #[test]
    fn test_mode() {
        let pmf = Pmf::from_values([3, 3, 1, 2, 2]).unwrap();
        assert_eq!(pmf.mode(), Some(2));
    }

    proptest! {
        #[test]
        fn prop_normalized_masses_sum_to_one(
            values in proptest::collection::vec(-50_i32..50, 1..200),
        ) {
            let pmf = Pmf::from_values(values).unwrap();
            let sum = pmf.values().map(|v| pmf.probability(&v)).sum::<f64>();
            prop_assert!((sum - 1.0).abs() < 1e-9);
        }

        #[test]
        fn prop_cdf_roundtrip_preserves_masses(
            values in proptest::collection::vec(0_i32..30, 1..100),
        ) {
            let pmf = Pmf::from_values(values).unwrap();
            let back = Pmf::from_cdf(&pmf.make_cdf().unwrap());
            prop_assert_eq!(back.len(), pmf.len());
            for (value, mass) in pmf.iter() {
                prop_assert!((back.probability(&value) - mass).abs() < 1e-9);
            }
        }
    }
}
