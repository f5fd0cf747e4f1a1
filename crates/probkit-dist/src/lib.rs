//! Discrete and continuous distribution toolkit.
//!
//! This crate provides the distribution objects that the rest of `probkit`
//! builds on:
//!
//! - **Histograms**: value → count frequency tables
//! - **PMFs**: value → probability mass, normalized on demand
//! - **CDFs**: sorted step functions with forward and inverse lookup
//! - **PDFs**: Gaussian, exponential and kernel density estimates
//! - **Analytic distributions**: closed-form CDFs and discretized PMFs
//! - **Random source**: the single seedable generator every randomized
//!   operation draws from
//!
//! Data flows from raw observations into a [`Histogram`](histogram::Histogram),
//! then a [`Pmf`](pmf::Pmf), a [`Cdf`](cdf::Cdf), and optionally a
//! [`Pdf`](pdf::Pdf). Each step is also available directly from raw values.
//!
//! # Modules
//!
//! - [`histogram`]: Frequency tables
//! - [`pmf`]: Probability mass functions and their arithmetic
//! - [`cdf`]: Cumulative distribution functions
//! - [`pdf`]: Continuous densities and kernel density estimation
//! - [`analytic`]: Closed-form distributions
//! - [`random`]: Seedable random source
//! - [`value`]: Ordered keys, including [`Real`](value::Real) for `f64` data
//!
//! # Examples
//!
//! ## From observations to a CDF
//!
//! ```
//! use probkit_dist::{cdf::Cdf, histogram::Histogram, pmf::Pmf};
//!
//! let hist = Histogram::from_values([1, 2, 2, 3, 5]);
//! let pmf = Pmf::from_histogram(&hist).unwrap();
//! let cdf = pmf.make_cdf().unwrap();
//!
//! // Masses are summed in floating point, so compare with a tolerance.
//! assert!((cdf.probability(&2) - 0.6).abs() < 1e-12);
//! assert_eq!(cdf.percentile(50.0).unwrap(), 2);
//!
//! // Building straight from the counts divides each running count once.
//! let direct = Cdf::from_histogram(&hist).unwrap();
//! assert_eq!(direct.probability(&2), 0.6);
//! ```
//!
//! ## Reproducible sampling
//!
//! ```
//! use probkit_dist::{pmf::Pmf, random::RandomSource};
//!
//! let pmf = Pmf::from_values([1, 2, 3]).unwrap();
//! let mut rng = RandomSource::seed_from_u64(2024);
//! let draw = pmf.random(&mut rng).unwrap();
//! assert!((1..=3).contains(&draw));
//! ```
//!
//! ## Kernel density estimation
//!
//! ```
//! use probkit_dist::pdf::{KernelDensity, Pdf as _};
//!
//! let kde = KernelDensity::new(vec![1.2, 1.9, 2.1, 2.4, 3.8]).unwrap();
//! let pmf = kde.make_pmf_on_support().unwrap();
//! assert_eq!(pmf.len(), 101);
//! ```

pub use self::error::DistError;

pub mod analytic;
pub mod cdf;
mod error;
pub mod histogram;
pub mod pdf;
pub mod pmf;
pub mod random;
pub mod value;
