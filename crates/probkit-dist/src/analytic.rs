//! Closed-form distributions.
//!
//! Evaluation of analytic CDFs and PMFs, and helpers that discretize them
//! into [`Pmf`]s or render them for comparison against empirical CDFs.

use std::f64::consts::SQRT_2;

use crate::{
    error::DistError,
    pdf::{ExponentialPdf, NormalPdf, Pdf as _, linspace},
    pmf::Pmf,
    value::{Real, real},
};

/// Error function.
///
/// Abramowitz & Stegun formula 7.1.26; maximum absolute error 1.5e-7.
///
/// # Examples
///
/// ```
/// use probkit_dist::analytic::erf;
///
/// assert!(erf(0.0).abs() < 1e-7);
/// assert!((erf(1.0) - 0.842_700_792_9).abs() < 1e-6);
/// ```
#[must_use]
pub fn erf(x: f64) -> f64 {
    const P: f64 = 0.327_591_1;
    const A1: f64 = 0.254_829_592;
    const A2: f64 = -0.284_496_736;
    const A3: f64 = 1.421_413_741;
    const A4: f64 = -1.453_152_027;
    const A5: f64 = 1.061_405_429;

    if x.is_nan() {
        return f64::NAN;
    }
    let sign = x.signum();
    let x = x.abs();
    let t = 1.0 / (1.0 + P * x);
    let poly = t * (A1 + t * (A2 + t * (A3 + t * (A4 + t * A5))));
    sign * (1.0 - poly * (-x * x).exp())
}

/// CDF of the normal distribution with mean `mu` and standard deviation `sigma`.
#[must_use]
pub fn eval_normal_cdf(x: f64, mu: f64, sigma: f64) -> f64 {
    0.5 * (1.0 + erf((x - mu) / (sigma * SQRT_2)))
}

/// Inverse CDF of the normal distribution.
///
/// Uses Acklam's rational approximation (relative error below 1.2e-9).
/// Returns infinities at `p == 0` and `p == 1`; fails with
/// [`DistError::ProbabilityOutOfRange`] outside `[0, 1]`.
///
/// # Examples
///
/// ```
/// use probkit_dist::analytic::eval_normal_cdf_inverse;
///
/// let z = eval_normal_cdf_inverse(0.975, 0.0, 1.0).unwrap();
/// assert!((z - 1.959_964).abs() < 1e-5);
/// ```
pub fn eval_normal_cdf_inverse(p: f64, mu: f64, sigma: f64) -> Result<f64, DistError> {
    const A: [f64; 6] = [
        -3.969_683_028_665_376e1,
        2.209_460_984_245_205e2,
        -2.759_285_104_469_687e2,
        1.383_577_518_672_69e2,
        -3.066_479_806_614_716e1,
        2.506_628_277_459_239,
    ];
    const B: [f64; 5] = [
        -5.447_609_879_822_406e1,
        1.615_858_368_580_409e2,
        -1.556_989_798_598_866e2,
        6.680_131_188_771_972e1,
        -1.328_068_155_288_572e1,
    ];
    const C: [f64; 6] = [
        -7.784_894_002_430_293e-3,
        -3.223_964_580_411_365e-1,
        -2.400_758_277_161_838,
        -2.549_732_539_343_734,
        4.374_664_141_464_968,
        2.938_163_982_698_783,
    ];
    const D: [f64; 4] = [
        7.784_695_709_041_462e-3,
        3.224_671_290_700_398e-1,
        2.445_134_137_142_996,
        3.754_408_661_907_416,
    ];
    const P_LOW: f64 = 0.024_25;

    if !(0.0..=1.0).contains(&p) {
        return Err(DistError::ProbabilityOutOfRange { p });
    }
    if p == 0.0 {
        return Ok(f64::NEG_INFINITY);
    }
    if p == 1.0 {
        return Ok(f64::INFINITY);
    }

    let tail = |q: f64| {
        let q = (-2.0 * q.ln()).sqrt();
        (((((C[0] * q + C[1]) * q + C[2]) * q + C[3]) * q + C[4]) * q + C[5])
            / ((((D[0] * q + D[1]) * q + D[2]) * q + D[3]) * q + 1.0)
    };
    let z = if p < P_LOW {
        tail(p)
    } else if p <= 1.0 - P_LOW {
        let q = p - 0.5;
        let r = q * q;
        (((((A[0] * r + A[1]) * r + A[2]) * r + A[3]) * r + A[4]) * r + A[5]) * q
            / (((((B[0] * r + B[1]) * r + B[2]) * r + B[3]) * r + B[4]) * r + 1.0)
    } else {
        -tail(1.0 - p)
    };
    Ok(mu + sigma * z)
}

/// CDF of the lognormal distribution whose logarithm has mean `mu` and
/// standard deviation `sigma`.
#[must_use]
pub fn eval_lognormal_cdf(x: f64, mu: f64, sigma: f64) -> f64 {
    if x <= 0.0 {
        0.0
    } else {
        eval_normal_cdf(x.ln(), mu, sigma)
    }
}

/// CDF of the exponential distribution with rate `lambda`.
#[must_use]
pub fn eval_exponential_cdf(x: f64, lambda: f64) -> f64 {
    if x < 0.0 {
        0.0
    } else {
        1.0 - (-lambda * x).exp()
    }
}

/// Number of ways to choose `k` items from `n`.
///
/// Computed multiplicatively in floating point, so it stays finite well past
/// the range of `u64`.
#[must_use]
pub fn binomial_coefficient(n: u64, k: u64) -> f64 {
    if k > n {
        return 0.0;
    }
    let k = k.min(n - k);
    let mut result = 1.0;
    for i in 0..k {
        #[expect(clippy::cast_precision_loss)]
        let (num, den) = ((n - i) as f64, (i + 1) as f64);
        result = result * num / den;
    }
    result
}

/// Probability of `k` successes in `n` trials with success probability `p`.
#[must_use]
pub fn eval_binomial_pmf(k: u64, n: u64, p: f64) -> f64 {
    if k > n {
        return 0.0;
    }
    #[expect(clippy::cast_precision_loss)]
    let (kf, nf) = (k as f64, n as f64);
    binomial_coefficient(n, k) * p.powf(kf) * (1.0 - p).powf(nf - kf)
}

/// Probability of exactly `k` events for a Poisson rate `lambda`.
#[must_use]
pub fn eval_poisson_pmf(k: u64, lambda: f64) -> f64 {
    // log space keeps k! from overflowing
    #[expect(clippy::cast_precision_loss)]
    let log_factorial = (1..=k).map(|i| (i as f64).ln()).sum::<f64>();
    #[expect(clippy::cast_precision_loss)]
    let kf = k as f64;
    (kf * lambda.ln() - lambda - log_factorial).exp()
}

/// Discretizes a normal distribution over `mu ± num_sigmas * sigma` at `n` points.
pub fn make_normal_pmf(
    mu: f64,
    sigma: f64,
    num_sigmas: f64,
    n: usize,
) -> Result<Pmf<Real>, DistError> {
    let pdf = NormalPdf::new(mu, sigma)?;
    let low = mu - num_sigmas * sigma;
    let high = mu + num_sigmas * sigma;
    pdf.make_pmf(&linspace(low, high, n))
}

/// Discretizes an exponential distribution over `[0, high]` at `n` points.
pub fn make_exponential_pmf(lambda: f64, high: f64, n: usize) -> Result<Pmf<Real>, DistError> {
    let pdf = ExponentialPdf::new(lambda)?;
    pdf.make_pmf(&linspace(0.0, high, n))
}

/// Uniform PMF over `n` evenly spaced points in `[low, high]`.
pub fn make_uniform_pmf(low: f64, high: f64, n: usize) -> Result<Pmf<Real>, DistError> {
    let mut pmf = Pmf::from_masses(linspace(low, high, n).into_iter().map(|x| (real(x), 1.0)));
    pmf.normalize()?;
    Ok(pmf)
}

/// Evaluates the normal CDF at `n` points in `[low, high]`.
#[must_use]
pub fn render_normal_cdf(
    mu: f64,
    sigma: f64,
    low: f64,
    high: f64,
    n: usize,
) -> (Vec<f64>, Vec<f64>) {
    let xs = linspace(low, high, n);
    let ps = xs.iter().map(|&x| eval_normal_cdf(x, mu, sigma)).collect();
    (xs, ps)
}

/// Evaluates the exponential CDF at `n` points in `[low, high]`.
#[must_use]
pub fn render_expo_cdf(lambda: f64, low: f64, high: f64, n: usize) -> (Vec<f64>, Vec<f64>) {
    let xs = linspace(low, high, n);
    let ps = xs.iter().map(|&x| eval_exponential_cdf(x, lambda)).collect();
    (xs, ps)
}
