//! Simulation-based hypothesis tests.
//!
//! A test computes a statistic on the observed data, then repeatedly
//! simulates data under the null hypothesis and counts how often the
//! simulated statistic is at least as extreme as the observed one.
//!
//! # Examples
//!
//! ```
//! use probkit_dist::random::RandomSource;
//! use probkit_stats::hypothesis::{DiffMeansPermute, HypothesisTest as _};
//!
//! let control = [4.1, 3.9, 4.3, 4.0, 4.2, 3.8];
//! let treated = [5.2, 5.0, 5.4, 4.9, 5.3, 5.1];
//! let test = DiffMeansPermute::new(&control, &treated).unwrap();
//!
//! let mut rng = RandomSource::seed_from_u64(1);
//! let outcome = test.run(500, &mut rng).unwrap();
//! assert!(outcome.p_value < 0.05);
//! ```

use rand::{Rng, seq::SliceRandom as _};
use serde::Serialize;

use crate::{correlation, error::StatsError, moments, resample::resample_with_replacement};

/// Result of running a [`HypothesisTest`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TestOutcome {
    /// Test statistic of the observed data.
    pub actual: f64,
    /// Fraction of simulations whose statistic is `>= actual`.
    pub p_value: f64,
    /// Number of simulations.
    pub iters: usize,
    /// Largest simulated statistic.
    pub max_simulated: f64,
}

/// A hypothesis test driven by simulation under the null hypothesis.
pub trait HypothesisTest {
    /// The data the statistic is computed from.
    type Data;

    /// The observed data.
    fn data(&self) -> &Self::Data;

    /// Computes the test statistic of `data`.
    fn test_statistic(&self, data: &Self::Data) -> Result<f64, StatsError>;

    /// Simulates one data set under the null hypothesis.
    fn run_model<R>(&self, rng: &mut R) -> Self::Data
    where
        R: Rng + ?Sized;

    /// Test statistic of the observed data.
    fn observed(&self) -> Result<f64, StatsError> {
        self.test_statistic(self.data())
    }

    /// Runs `iters` simulations and estimates the p-value.
    ///
    /// Fails with [`StatsError::DivisionByZero`] when `iters` is 0.
    #[expect(clippy::cast_precision_loss)]
    fn run<R>(&self, iters: usize, rng: &mut R) -> Result<TestOutcome, StatsError>
    where
        R: Rng + ?Sized,
    {
        if iters == 0 {
            return Err(StatsError::division_by_zero(
                "hypothesis test with zero iterations",
            ));
        }
        let actual = self.observed()?;
        let mut count = 0_usize;
        let mut max_simulated = f64::NEG_INFINITY;
        for _ in 0..iters {
            let stat = self.test_statistic(&self.run_model(rng))?;
            if stat >= actual {
                count += 1;
            }
            max_simulated = max_simulated.max(stat);
        }
        Ok(TestOutcome {
            actual,
            p_value: count as f64 / iters as f64,
            iters,
            max_simulated,
        })
    }
}

/// Two observed groups and their concatenation.
#[derive(Debug, Clone)]
struct TwoGroups {
    data: (Vec<f64>, Vec<f64>),
    pooled: Vec<f64>,
}

impl TwoGroups {
    fn new(group1: &[f64], group2: &[f64]) -> Result<Self, StatsError> {
        if group1.is_empty() || group2.is_empty() {
            return Err(StatsError::EmptyInput);
        }
        Ok(Self {
            data: (group1.to_vec(), group2.to_vec()),
            pooled: [group1, group2].concat(),
        })
    }

    fn diff_means((a, b): &(Vec<f64>, Vec<f64>)) -> Result<f64, StatsError> {
        Ok(moments::mean(a)? - moments::mean(b)?)
    }

    fn permute<R>(&self, rng: &mut R) -> (Vec<f64>, Vec<f64>)
    where
        R: Rng + ?Sized,
    {
        let mut shuffled = self.pooled.clone();
        shuffled.shuffle(rng);
        let rest = shuffled.split_off(self.data.0.len());
        (shuffled, rest)
    }
}

/// Two-sided test of a difference in means; the null model shuffles the
/// pooled observations between the groups.
#[derive(Debug, Clone)]
pub struct DiffMeansPermute {
    groups: TwoGroups,
}

impl DiffMeansPermute {
    pub fn new(group1: &[f64], group2: &[f64]) -> Result<Self, StatsError> {
        Ok(Self {
            groups: TwoGroups::new(group1, group2)?,
        })
    }
}

impl HypothesisTest for DiffMeansPermute {
    type Data = (Vec<f64>, Vec<f64>);

    fn data(&self) -> &Self::Data {
        &self.groups.data
    }

    fn test_statistic(&self, data: &Self::Data) -> Result<f64, StatsError> {
        TwoGroups::diff_means(data).map(f64::abs)
    }

    fn run_model<R>(&self, rng: &mut R) -> Self::Data
    where
        R: Rng + ?Sized,
    {
        self.groups.permute(rng)
    }
}

/// One-sided variant of [`DiffMeansPermute`]: tests whether the first group
/// has the larger mean.
#[derive(Debug, Clone)]
pub struct DiffMeansOneSided {
    groups: TwoGroups,
}

impl DiffMeansOneSided {
    pub fn new(group1: &[f64], group2: &[f64]) -> Result<Self, StatsError> {
        Ok(Self {
            groups: TwoGroups::new(group1, group2)?,
        })
    }
}

impl HypothesisTest for DiffMeansOneSided {
    type Data = (Vec<f64>, Vec<f64>);

    fn data(&self) -> &Self::Data {
        &self.groups.data
    }

    fn test_statistic(&self, data: &Self::Data) -> Result<f64, StatsError> {
        TwoGroups::diff_means(data)
    }

    fn run_model<R>(&self, rng: &mut R) -> Self::Data
    where
        R: Rng + ?Sized,
    {
        self.groups.permute(rng)
    }
}

/// Two-sided test of a difference in means; the null model draws both
/// groups with replacement from the pooled observations.
#[derive(Debug, Clone)]
pub struct DiffMeansResample {
    groups: TwoGroups,
}

impl DiffMeansResample {
    pub fn new(group1: &[f64], group2: &[f64]) -> Result<Self, StatsError> {
        Ok(Self {
            groups: TwoGroups::new(group1, group2)?,
        })
    }
}

impl HypothesisTest for DiffMeansResample {
    type Data = (Vec<f64>, Vec<f64>);

    fn data(&self) -> &Self::Data {
        &self.groups.data
    }

    fn test_statistic(&self, data: &Self::Data) -> Result<f64, StatsError> {
        TwoGroups::diff_means(data).map(f64::abs)
    }

    fn run_model<R>(&self, rng: &mut R) -> Self::Data
    where
        R: Rng + ?Sized,
    {
        let (a, b) = &self.groups.data;
        let pooled = &self.groups.pooled;
        // pooled is never empty, so resampling cannot fail
        let draw = |n, rng: &mut R| resample_with_replacement(pooled, n, rng).unwrap_or_default();
        let first = draw(a.len(), rng);
        (first, draw(b.len(), rng))
    }
}

/// Test of a correlation between paired sequences; the statistic is the
/// absolute Pearson correlation and the null model shuffles `xs`.
#[derive(Debug, Clone)]
pub struct CorrelationPermute {
    data: (Vec<f64>, Vec<f64>),
}

impl CorrelationPermute {
    pub fn new(xs: &[f64], ys: &[f64]) -> Result<Self, StatsError> {
        StatsError::check_paired(xs, ys)?;
        Ok(Self {
            data: (xs.to_vec(), ys.to_vec()),
        })
    }
}

impl HypothesisTest for CorrelationPermute {
    type Data = (Vec<f64>, Vec<f64>);

    fn data(&self) -> &Self::Data {
        &self.data
    }

    fn test_statistic(&self, (xs, ys): &Self::Data) -> Result<f64, StatsError> {
        correlation::correlation(xs, ys).map(f64::abs)
    }

    fn run_model<R>(&self, rng: &mut R) -> Self::Data
    where
        R: Rng + ?Sized,
    {
        let mut xs = self.data.0.clone();
        xs.shuffle(rng);
        (xs, self.data.1.clone())
    }
}

#[cfg(test)]
mod tests {
    use probkit_dist::random::RandomSource;

    use super::*;

    const LOW: [f64; 8] = [1.0, 2.0, 1.5, 2.5, 1.8, 2.2, 1.1, 2.9];
    const HIGH: [f64; 8] = [4.0, 5.0, 4.5, 5.5, 4.8, 5.2, 4.1, 5.9];

    #[test]
    fn test_permutation_preserves_group_sizes() {
        let test = DiffMeansPermute::new(&LOW, &HIGH[..5]).unwrap();
        let mut rng = RandomSource::seed_from_u64(2);
        let (a, b) = test.run_model(&mut rng);
        assert_eq!((a.len(), b.len()), (8, 5));
        let mut all = [a, b].concat();
        all.sort_by(f64::total_cmp);
        let mut expected = [&LOW[..], &HIGH[..5]].concat();
        expected.sort_by(f64::total_cmp);
        assert_eq!(all, expected);
    }

    #[test]
    fn test_separated_groups_are_significant() {
        let mut rng = RandomSource::seed_from_u64(3);
        let outcome = DiffMeansPermute::new(&LOW, &HIGH)
            .unwrap()
            .run(1000, &mut rng)
            .unwrap();
        assert!((outcome.actual - 3.0).abs() < 1e-12);
        assert!(outcome.p_value < 0.01, "{outcome:?}");
        assert_eq!(outcome.iters, 1000);

        let outcome = DiffMeansResample::new(&LOW, &HIGH)
            .unwrap()
            .run(1000, &mut rng)
            .unwrap();
        assert!(outcome.p_value < 0.01, "{outcome:?}");
    }

    #[test]
    fn test_one_sided_direction() {
        let mut rng = RandomSource::seed_from_u64(4);
        let test = DiffMeansOneSided::new(&LOW, &HIGH).unwrap();
        assert!((test.observed().unwrap() + 3.0).abs() < 1e-12);
        // the first group is smaller, so nearly every permutation beats it
        let outcome = test.run(500, &mut rng).unwrap();
        assert!(outcome.p_value > 0.99, "{outcome:?}");
    }

    #[test]
    fn test_same_groups_are_not_significant() {
        let mut rng = RandomSource::seed_from_u64(5);
        let outcome = DiffMeansPermute::new(&LOW, &LOW)
            .unwrap()
            .run(200, &mut rng)
            .unwrap();
        assert_eq!(outcome.actual, 0.0);
        assert_eq!(outcome.p_value, 1.0);
    }

    #[test]
    fn test_correlation_permute() {
        let xs = (0..20).map(f64::from).collect::<Vec<_>>();
        let ys = xs.iter().map(|x| 2.0 * x + 1.0).collect::<Vec<_>>();
        let mut rng = RandomSource::seed_from_u64(6);
        let outcome = CorrelationPermute::new(&xs, &ys)
            .unwrap()
            .run(300, &mut rng)
            .unwrap();
        assert!((outcome.actual - 1.0).abs() < 1e-12);
        assert!(outcome.p_value < 0.01);
        assert!(outcome.max_simulated < outcome.actual);
    }

    #[test]
    fn test_invalid_inputs() {
        assert!(DiffMeansPermute::new(&[], &LOW).is_err());
        assert_eq!(
            CorrelationPermute::new(&LOW, &HIGH[..3]).unwrap_err(),
            StatsError::LengthMismatch { left: 8, right: 3 }
        );
        let mut rng = RandomSource::seed_from_u64(7);
        assert!(matches!(
            DiffMeansPermute::new(&LOW, &HIGH).unwrap().run(0, &mut rng),
            Err(StatsError::DivisionByZero { .. })
        ));
    }
}
