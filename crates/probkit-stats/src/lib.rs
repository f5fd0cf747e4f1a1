//! Statistical operators on raw observation sequences.
//!
//! Everything here consumes plain `&[f64]` slices (or a [`Frame`](frame::Frame)
//! of named columns) and returns scalars, tuples or new sequences. Randomized
//! operators take the random source explicitly; see
//! [`probkit_dist::random`].
//!
//! # Modules
//!
//! - [`moments`]: Mean, variance, trimmed and higher moments
//! - [`correlation`]: Covariance, Pearson and Spearman correlation
//! - [`regression`]: Least-squares line fits and goodness of fit
//! - [`resample`]: Resampling with replacement and bootstrap summaries
//! - [`frame`]: Named columns and row-level resampling
//! - [`hypothesis`]: Permutation and resampling hypothesis tests
//! - [`probplot`]: Normal probability plots and jitter
//!
//! # Examples
//!
//! ```
//! use probkit_stats::{correlation, moments, regression::LineFit};
//!
//! let heights = [150.0, 160.0, 170.0, 180.0];
//! let weights = [50.0, 56.0, 66.0, 72.0];
//!
//! let mean = moments::mean(&heights).unwrap();
//! assert_eq!(mean, 165.0);
//!
//! let r = correlation::correlation(&heights, &weights).unwrap();
//! assert!(r > 0.99);
//!
//! let fit = LineFit::least_squares(&heights, &weights).unwrap();
//! assert!(fit.slope > 0.0);
//! ```

pub use self::error::StatsError;

pub mod correlation;
mod error;
pub mod frame;
pub mod hypothesis;
pub mod moments;
pub mod probplot;
pub mod regression;
pub mod resample;
