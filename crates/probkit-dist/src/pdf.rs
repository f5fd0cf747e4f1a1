//! Continuous probability densities.
//!
//! A [`Pdf`] evaluates a density at any real point. Densities can be
//! discretized into a [`Pmf`] with [`Pdf::make_pmf`]; this is an
//! approximation whose fidelity depends on how finely the evaluation points
//! cover the support.

use std::{f64::consts::PI, str::FromStr};

use rand::Rng;
use rand_distr::{Distribution as _, Exp, Normal};

use crate::{
    error::DistError,
    pmf::Pmf,
    value::{Real, real},
};

/// Number of points in the default evaluation grid.
const SUPPORT_POINTS: usize = 101;

/// Returns `n` evenly spaced points from `low` to `high` inclusive.
///
/// # Examples
///
/// ```
/// use probkit_dist::pdf::linspace;
///
/// assert_eq!(linspace(0.0, 1.0, 5), vec![0.0, 0.25, 0.5, 0.75, 1.0]);
/// assert_eq!(linspace(2.0, 3.0, 1), vec![2.0]);
/// assert!(linspace(0.0, 1.0, 0).is_empty());
/// ```
#[expect(clippy::cast_precision_loss)]
#[must_use]
pub fn linspace(low: f64, high: f64, n: usize) -> Vec<f64> {
    match n {
        0 => vec![],
        1 => vec![low],
        _ => {
            let step = (high - low) / (n - 1) as f64;
            (0..n).map(|i| low + step * i as f64).collect()
        }
    }
}

/// A continuous probability density.
pub trait Pdf {
    /// Evaluates the density at `x`.
    fn density(&self, x: f64) -> f64;

    /// Default grid of evaluation points covering most of the mass.
    fn support(&self) -> Vec<f64>;

    /// Evaluates the density at each point of `xs`.
    fn densities(&self, xs: &[f64]) -> Vec<f64> {
        xs.iter().map(|&x| self.density(x)).collect()
    }

    /// Discretizes the density at `xs` and normalizes the result.
    ///
    /// Fails with [`DistError::DivisionByZero`] if the density is 0 at every
    /// point (or `xs` is empty).
    fn make_pmf(&self, xs: &[f64]) -> Result<Pmf<Real>, DistError> {
        let mut pmf = Pmf::from_masses(xs.iter().map(|&x| (real(x), self.density(x))));
        pmf.normalize()?;
        Ok(pmf)
    }

    /// Like [`Self::make_pmf`], on the default [`Self::support`] grid.
    fn make_pmf_on_support(&self) -> Result<Pmf<Real>, DistError> {
        self.make_pmf(&self.support())
    }

    /// Returns `(xs, densities)` for plotting.
    fn render(&self, xs: &[f64]) -> (Vec<f64>, Vec<f64>) {
        (xs.to_vec(), self.densities(xs))
    }
}

/// Gaussian density with mean `mu` and standard deviation `sigma`.
///
/// # Examples
///
/// ```
/// use probkit_dist::pdf::{NormalPdf, Pdf as _};
///
/// let pdf = NormalPdf::new(0.0, 1.0).unwrap();
/// assert!((pdf.density(0.0) - 0.398_942_280_401_432_7).abs() < 1e-15);
/// ```
#[derive(Debug, Clone)]
pub struct NormalPdf {
    mu: f64,
    sigma: f64,
    normal: Normal<f64>,
}

impl NormalPdf {
    /// Creates a Gaussian density. `sigma` must be positive and finite.
    pub fn new(mu: f64, sigma: f64) -> Result<Self, DistError> {
        if !(sigma > 0.0 && sigma.is_finite()) {
            return Err(DistError::InvalidParameter {
                name: "sigma",
                value: sigma,
            });
        }
        let normal = Normal::new(mu, sigma).map_err(|_| DistError::InvalidParameter {
            name: "mu",
            value: mu,
        })?;
        Ok(Self { mu, sigma, normal })
    }

    #[must_use]
    pub fn mu(&self) -> f64 {
        self.mu
    }

    #[must_use]
    pub fn sigma(&self) -> f64 {
        self.sigma
    }

    /// Draws `n` values from the distribution.
    pub fn sample<R>(&self, n: usize, rng: &mut R) -> Vec<f64>
    where
        R: Rng + ?Sized,
    {
        (0..n).map(|_| self.normal.sample(rng)).collect()
    }
}

impl Pdf for NormalPdf {
    fn density(&self, x: f64) -> f64 {
        let z = (x - self.mu) / self.sigma;
        (-0.5 * z * z).exp() / (self.sigma * (2.0 * PI).sqrt())
    }

    /// `mu ± 3 sigma`.
    fn support(&self) -> Vec<f64> {
        linspace(
            self.mu - 3.0 * self.sigma,
            self.mu + 3.0 * self.sigma,
            SUPPORT_POINTS,
        )
    }
}

/// Exponential density with rate `lambda`.
#[derive(Debug, Clone)]
pub struct ExponentialPdf {
    lambda: f64,
    exp: Exp<f64>,
}

impl ExponentialPdf {
    /// Creates an exponential density. `lambda` must be positive and finite.
    pub fn new(lambda: f64) -> Result<Self, DistError> {
        let invalid = DistError::InvalidParameter {
            name: "lambda",
            value: lambda,
        };
        if !(lambda > 0.0 && lambda.is_finite()) {
            return Err(invalid);
        }
        let exp = Exp::new(lambda).map_err(|_| invalid)?;
        Ok(Self { lambda, exp })
    }

    #[must_use]
    pub fn lambda(&self) -> f64 {
        self.lambda
    }

    /// Draws `n` values from the distribution.
    pub fn sample<R>(&self, n: usize, rng: &mut R) -> Vec<f64>
    where
        R: Rng + ?Sized,
    {
        (0..n).map(|_| self.exp.sample(rng)).collect()
    }
}

impl Pdf for ExponentialPdf {
    fn density(&self, x: f64) -> f64 {
        if x < 0.0 {
            0.0
        } else {
            self.lambda * (-self.lambda * x).exp()
        }
    }

    /// `[0, 5 / lambda]`, which covers all but `e^-5` of the mass.
    fn support(&self) -> Vec<f64> {
        linspace(0.0, 5.0 / self.lambda, SUPPORT_POINTS)
    }
}

/// Rule for choosing the kernel width of a [`KernelDensity`].
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum Bandwidth {
    /// Scott's rule: `std * n^(-1/5)`.
    #[default]
    Scott,
    /// Silverman's rule: `std * (3n/4)^(-1/5)`.
    Silverman,
    /// An explicit kernel standard deviation.
    Fixed(f64),
}

/// Parses `scott`, `silverman`, or a positive number for a fixed width.
impl FromStr for Bandwidth {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "scott" => Ok(Self::Scott),
            "silverman" => Ok(Self::Silverman),
            other => other
                .parse::<f64>()
                .ok()
                .filter(|h| *h > 0.0 && h.is_finite())
                .map(Self::Fixed)
                .ok_or_else(|| {
                    format!("invalid bandwidth '{s}' (expected scott, silverman or a width)")
                }),
        }
    }
}

impl Bandwidth {
    #[expect(clippy::cast_precision_loss)]
    fn compute(self, sample: &[f64]) -> Result<f64, DistError> {
        let n = sample.len() as f64;
        let spread = || {
            if sample.len() < 2 {
                return 0.0;
            }
            let mean = sample.iter().sum::<f64>() / n;
            let var = sample.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (n - 1.0);
            var.sqrt()
        };
        let h = match self {
            Self::Scott => spread() * n.powf(-0.2),
            Self::Silverman => spread() * (0.75 * n).powf(-0.2),
            Self::Fixed(h) => {
                if !(h > 0.0 && h.is_finite()) {
                    return Err(DistError::InvalidParameter {
                        name: "bandwidth",
                        value: h,
                    });
                }
                h
            }
        };
        if h == 0.0 || !h.is_finite() {
            return Err(DistError::division_by_zero(
                "kernel bandwidth is zero because the sample has no spread",
            ));
        }
        Ok(h)
    }
}

/// Gaussian kernel density estimate built from a sample.
///
/// The estimate owns its sample. The density at `x` is the mean of Gaussian
/// kernels of width `bandwidth` centered at each observation.
///
/// # Examples
///
/// ```
/// use probkit_dist::pdf::{KernelDensity, Pdf as _};
///
/// let kde = KernelDensity::new(vec![1.0, 2.0, 2.5, 3.0, 7.0]).unwrap();
/// assert!(kde.density(2.5) > kde.density(5.0));
/// let pmf = kde.make_pmf_on_support().unwrap();
/// assert!((pmf.total() - 1.0).abs() < 1e-9);
/// ```
#[derive(Debug, Clone)]
pub struct KernelDensity {
    sample: Vec<f64>,
    bandwidth: f64,
}

impl KernelDensity {
    /// Builds an estimate with Scott's bandwidth rule.
    pub fn new(sample: Vec<f64>) -> Result<Self, DistError> {
        Self::with_bandwidth(sample, Bandwidth::Scott)
    }

    /// Builds an estimate with an explicit bandwidth rule.
    ///
    /// Fails with [`DistError::EmptyDistribution`] for an empty sample and with
    /// [`DistError::DivisionByZero`] when a rule-derived bandwidth is zero
    /// (fewer than two observations, or all observations equal).
    pub fn with_bandwidth(sample: Vec<f64>, rule: Bandwidth) -> Result<Self, DistError> {
        if sample.is_empty() {
            return Err(DistError::EmptyDistribution);
        }
        let bandwidth = rule.compute(&sample)?;
        Ok(Self { sample, bandwidth })
    }

    /// The standard deviation of each kernel.
    #[must_use]
    pub fn bandwidth(&self) -> f64 {
        self.bandwidth
    }

    #[must_use]
    pub fn sample(&self) -> &[f64] {
        &self.sample
    }

    /// Draws `n` values from the estimate: a random observation plus
    /// Gaussian kernel noise.
    pub fn resample<R>(&self, n: usize, rng: &mut R) -> Result<Vec<f64>, DistError>
    where
        R: Rng + ?Sized,
    {
        let noise = Normal::new(0.0, self.bandwidth).map_err(|_| DistError::InvalidParameter {
            name: "bandwidth",
            value: self.bandwidth,
        })?;
        Ok((0..n)
            .map(|_| {
                let center = self.sample[rng.random_range(0..self.sample.len())];
                center + noise.sample(rng)
            })
            .collect())
    }
}

impl Pdf for KernelDensity {
    #[expect(clippy::cast_precision_loss)]
    fn density(&self, x: f64) -> f64 {
        let norm = self.bandwidth * (2.0 * PI).sqrt();
        let sum = self
            .sample
            .iter()
            .map(|xi| {
                let z = (x - xi) / self.bandwidth;
                (-0.5 * z * z).exp()
            })
            .sum::<f64>();
        sum / (norm * self.sample.len() as f64)
    }

    /// From the smallest to the largest observation.
    fn support(&self) -> Vec<f64> {
        let low = self.sample.iter().copied().fold(f64::INFINITY, f64::min);
        let high = self.sample.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        linspace(low, high, SUPPORT_POINTS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::RandomSource;

    /// Trapezoidal integral of the density over `xs`.
    fn integrate(pdf: &impl Pdf, xs: &[f64]) -> f64 {
        xs.windows(2)
            .map(|w| 0.5 * (w[1] - w[0]) * (pdf.density(w[0]) + pdf.density(w[1])))
            .sum()
    }

    #[test]
    fn test_normal_density_closed_form() {
        let pdf = NormalPdf::new(2.0, 3.0).unwrap();
        let expected = 1.0 / (3.0 * (2.0 * PI).sqrt()) * (-(1.0_f64 / 18.0)).exp();
        assert!((pdf.density(3.0) - expected).abs() < 1e-15);
        assert!((pdf.density(1.0) - pdf.density(3.0)).abs() < 1e-15);
    }

    #[test]
    fn test_bandwidth_from_str() {
        assert_eq!("scott".parse::<Bandwidth>(), Ok(Bandwidth::Scott));
        assert_eq!("Silverman".parse::<Bandwidth>(), Ok(Bandwidth::Silverman));
        assert_eq!("0.25".parse::<Bandwidth>(), Ok(Bandwidth::Fixed(0.25)));
        assert!("0".parse::<Bandwidth>().is_err());
        assert!("wide".parse::<Bandwidth>().is_err());
    }

    #[test]
    fn test_normal_rejects_bad_sigma() {
        assert!(NormalPdf::new(0.0, 0.0).is_err());
        assert!(NormalPdf::new(0.0, -1.0).is_err());
        assert!(NormalPdf::new(0.0, f64::NAN).is_err());
    }

    #[test]
    fn test_normal_integrates_to_one() {
        let pdf = NormalPdf::new(0.0, 1.0).unwrap();
        let total = integrate(&pdf, &linspace(-8.0, 8.0, 2001));
        assert!((total - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_make_pmf_is_normalized_approximation() {
        let pdf = NormalPdf::new(10.0, 2.0).unwrap();
        let pmf = pdf.make_pmf_on_support().unwrap();
        assert_eq!(pmf.len(), SUPPORT_POINTS);
        assert!((pmf.total() - 1.0).abs() < 1e-9);
        assert!((pmf.mean() - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_make_pmf_on_empty_grid_fails() {
        let pdf = NormalPdf::new(0.0, 1.0).unwrap();
        assert!(matches!(
            pdf.make_pmf(&[]),
            Err(DistError::DivisionByZero { .. })
        ));
    }

    #[test]
    fn test_exponential_density() {
        let pdf = ExponentialPdf::new(2.0).unwrap();
        assert_eq!(pdf.density(-1.0), 0.0);
        assert!((pdf.density(0.0) - 2.0).abs() < 1e-15);
        assert!(ExponentialPdf::new(0.0).is_err());
        let total = integrate(&pdf, &linspace(0.0, 20.0, 4001));
        assert!((total - 1.0).abs() < 1e-4);
    }

    #[test]
    fn test_kde_is_mean_of_kernels() {
        let kde = KernelDensity::with_bandwidth(vec![0.0, 2.0], Bandwidth::Fixed(1.0)).unwrap();
        let unit = NormalPdf::new(0.0, 1.0).unwrap();
        let expected = 0.5 * (unit.density(1.0) + unit.density(-1.0));
        assert!((kde.density(1.0) - expected).abs() < 1e-15);
    }

    #[test]
    fn test_kde_scott_bandwidth() {
        let sample = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        let kde = KernelDensity::new(sample).unwrap();
        let std = 2.5_f64.sqrt();
        assert!((kde.bandwidth() - std * 5.0_f64.powf(-0.2)).abs() < 1e-12);

        let silverman =
            KernelDensity::with_bandwidth(vec![1.0, 2.0, 3.0, 4.0, 5.0], Bandwidth::Silverman)
                .unwrap();
        assert!(silverman.bandwidth() > kde.bandwidth());
    }

    #[test]
    fn test_kde_degenerate_samples() {
        assert_eq!(
            KernelDensity::new(vec![]).unwrap_err(),
            DistError::EmptyDistribution
        );
        assert!(matches!(
            KernelDensity::new(vec![3.0, 3.0, 3.0]),
            Err(DistError::DivisionByZero { .. })
        ));
        assert!(matches!(
            KernelDensity::new(vec![3.0]),
            Err(DistError::DivisionByZero { .. })
        ));
        assert!(KernelDensity::with_bandwidth(vec![3.0], Bandwidth::Fixed(0.5)).is_ok());
        assert!(KernelDensity::with_bandwidth(vec![3.0], Bandwidth::Fixed(0.0)).is_err());
    }

    #[test]
    fn test_kde_integrates_to_one() {
        let kde = KernelDensity::new(vec![-1.0, 0.0, 0.5, 2.0, 4.0]).unwrap();
        let total = integrate(&kde, &linspace(-20.0, 25.0, 4001));
        assert!((total - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_kde_resample_is_reproducible() {
        let kde = KernelDensity::new(vec![1.0, 2.0, 4.0, 8.0]).unwrap();
        let mut rng1 = RandomSource::seed_from_u64(9);
        let mut rng2 = RandomSource::seed_from_u64(9);
        let a = kde.resample(20, &mut rng1).unwrap();
        let b = kde.resample(20, &mut rng2).unwrap();
        assert_eq!(a.len(), 20);
        assert_eq!(a, b);
    }

    #[test]
    fn test_normal_sample_mean() {
        let pdf = NormalPdf::new(5.0, 1.0).unwrap();
        let mut rng = RandomSource::seed_from_u64(2);
        let xs = pdf.sample(10_000, &mut rng);
        let mean = xs.iter().sum::<f64>() / 10_000.0;
        assert!((mean - 5.0).abs() < 0.05);
    }
}
