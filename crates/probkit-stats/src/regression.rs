//! Ordinary least-squares line fitting.

use serde::Serialize;

use crate::{correlation, error::StatsError, moments};

/// Intercept and slope of a fitted line `y = intercept + slope * x`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LineFit {
    pub intercept: f64,
    pub slope: f64,
}

impl LineFit {
    /// Fits `ys` against `xs` by closed-form least squares.
    ///
    /// `slope = cov(x, y) / var(x)` and
    /// `intercept = mean(y) - slope * mean(x)`.
    ///
    /// Fails with [`StatsError::DivisionByZero`] when every `x` is equal.
    ///
    /// # Examples
    ///
    /// ```
    /// use probkit_stats::regression::LineFit;
    ///
    /// let fit = LineFit::least_squares(&[1.0, 2.0, 3.0, 4.0], &[2.0, 4.0, 6.0, 8.0]).unwrap();
    /// assert!(fit.intercept.abs() < 1e-12);
    /// assert!((fit.slope - 2.0).abs() < 1e-12);
    /// assert_eq!(fit.predict(10.0), fit.intercept + 20.0);
    /// ```
    pub fn least_squares(xs: &[f64], ys: &[f64]) -> Result<Self, StatsError> {
        StatsError::check_paired(xs, ys)?;
        let (mux, varx) = moments::mean_var(xs, 0)?;
        if varx == 0.0 {
            return Err(StatsError::division_by_zero(
                "least squares with zero-variance x",
            ));
        }
        let muy = moments::mean(ys)?;
        let slope = correlation::covariance_about(xs, ys, mux, muy)? / varx;
        Ok(Self {
            intercept: muy - slope * mux,
            slope,
        })
    }

    /// Value of the line at `x`.
    #[must_use]
    pub fn predict(&self, x: f64) -> f64 {
        self.intercept + self.slope * x
    }

    /// Values of the line at each of `xs`.
    #[must_use]
    pub fn fit_line(&self, xs: &[f64]) -> Vec<f64> {
        xs.iter().map(|&x| self.predict(x)).collect()
    }

    /// Observed minus predicted for each pair.
    pub fn residuals(&self, xs: &[f64], ys: &[f64]) -> Result<Vec<f64>, StatsError> {
        StatsError::check_paired(xs, ys)?;
        Ok(xs
            .iter()
            .zip(ys)
            .map(|(&x, &y)| y - self.predict(x))
            .collect())
    }
}

/// `1 - var(residuals) / var(ys)`.
///
/// Fails with [`StatsError::DivisionByZero`] when `ys` has zero variance.
pub fn coefficient_of_determination(ys: &[f64], residuals: &[f64]) -> Result<f64, StatsError> {
    let var_y = moments::variance(ys, 0)?;
    if var_y == 0.0 {
        return Err(StatsError::division_by_zero(
            "coefficient of determination of constant ys",
        ));
    }
    Ok(1.0 - moments::variance(residuals, 0)? / var_y)
}
