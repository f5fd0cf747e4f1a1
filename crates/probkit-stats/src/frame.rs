//! Tabular data with named numeric columns, and row-level resampling.

use probkit_dist::pmf::Pmf;
use rand::{Rng, seq::index};

use crate::error::StatsError;

/// A table of equally long, named `f64` columns.
///
/// Columns keep the order in which they were added.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Frame {
    columns: Vec<(String, Vec<f64>)>,
    rows: usize,
}

impl Frame {
    /// Creates a frame with no columns and no rows.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a column, replacing any existing column with the same name.
    ///
    /// The first column fixes the row count; later columns must match it.
    ///
    /// # Examples
    ///
    /// ```
    /// use probkit_stats::frame::Frame;
    ///
    /// let frame = Frame::new()
    ///     .with_column("height", vec![170.0, 182.0, 165.0])
    ///     .unwrap()
    ///     .with_column("weight", vec![65.0, 80.0, 58.0])
    ///     .unwrap();
    /// assert_eq!(frame.len(), 3);
    /// assert_eq!(frame.column("weight").unwrap(), &[65.0, 80.0, 58.0]);
    /// assert!(frame.clone().with_column("age", vec![30.0]).is_err());
    /// ```
    pub fn with_column(
        mut self,
        name: impl Into<String>,
        values: Vec<f64>,
    ) -> Result<Self, StatsError> {
        let name = name.into();
        if self.columns.is_empty() {
            self.rows = values.len();
        } else if values.len() != self.rows {
            return Err(StatsError::ColumnLength {
                name,
                expected: self.rows,
                actual: values.len(),
            });
        }
        match self.columns.iter_mut().find(|(n, _)| *n == name) {
            Some((_, column)) => *column = values,
            None => self.columns.push((name, values)),
        }
        Ok(self)
    }

    /// Returns the column named `name`.
    pub fn column(&self, name: &str) -> Result<&[f64], StatsError> {
        self.columns
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, values)| values.as_slice())
            .ok_or_else(|| StatsError::MissingColumn {
                name: name.to_owned(),
            })
    }

    /// Column names in insertion order.
    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|(name, _)| name.as_str())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows == 0
    }

    /// Builds a new frame from the rows at `indices`, in that order.
    ///
    /// Indices may repeat. Panics if an index is out of bounds.
    #[must_use]
    pub fn take_rows(&self, indices: &[usize]) -> Self {
        let columns = self
            .columns
            .iter()
            .map(|(name, values)| {
                let taken = indices.iter().map(|&i| values[i]).collect();
                (name.clone(), taken)
            })
            .collect();
        Self {
            columns,
            rows: indices.len(),
        }
    }
}

/// Draws `n` distinct rows without replacement.
pub fn sample_rows<R>(frame: &Frame, n: usize, rng: &mut R) -> Result<Frame, StatsError>
where
    R: Rng + ?Sized,
{
    if n > frame.len() {
        return Err(StatsError::SampleSize {
            requested: n,
            available: frame.len(),
        });
    }
    let indices = index::sample(rng, frame.len(), n).into_vec();
    Ok(frame.take_rows(&indices))
}

/// Draws `n` rows uniformly with replacement.
///
/// Pass `frame.len()` as `n` for a same-size bootstrap resample.
pub fn resample_rows<R>(frame: &Frame, n: usize, rng: &mut R) -> Result<Frame, StatsError>
where
    R: Rng + ?Sized,
{
    if n == 0 {
        return Ok(frame.take_rows(&[]));
    }
    if frame.is_empty() {
        return Err(StatsError::EmptyInput);
    }
    let indices = (0..n)
        .map(|_| rng.random_range(0..frame.len()))
        .collect::<Vec<_>>();
    Ok(frame.take_rows(&indices))
}

/// Resamples `frame.len()` rows with probability proportional to the
/// `weight_column` value of each row.
///
/// Row indices are weighted into a PMF whose CDF is then sampled, which is
/// how survey weights are honored when bootstrapping. Weights must be
/// finite and non-negative ([`StatsError::InvalidWeight`]); if every weight
/// is zero, normalization fails with a division by zero.
///
/// # Examples
///
/// ```
/// use probkit_dist::random::RandomSource;
/// use probkit_stats::frame::{Frame, resample_by_weight};
///
/// let frame = Frame::new()
///     .with_column("value", vec![1.0, 2.0, 3.0])
///     .unwrap()
///     .with_column("weight", vec![0.0, 1.0, 0.0])
///     .unwrap();
/// let mut rng = RandomSource::seed_from_u64(8);
/// let sample = resample_by_weight(&frame, "weight", &mut rng).unwrap();
/// assert_eq!(sample.column("value").unwrap(), &[2.0, 2.0, 2.0]);
/// ```
pub fn resample_by_weight<R>(
    frame: &Frame,
    weight_column: &str,
    rng: &mut R,
) -> Result<Frame, StatsError>
where
    R: Rng + ?Sized,
{
    let weights = frame.column(weight_column)?;
    if let Some((row, &weight)) = weights
        .iter()
        .enumerate()
        .find(|(_, w)| !w.is_finite() || **w < 0.0)
    {
        return Err(StatsError::InvalidWeight { row, weight });
    }
    if frame.is_empty() {
        return Err(StatsError::EmptyInput);
    }

    // zero-weight rows are left out so they can never be drawn
    let mut pmf = Pmf::from_masses(
        weights
            .iter()
            .enumerate()
            .filter(|(_, w)| **w > 0.0)
            .map(|(row, &w)| (row, w)),
    );
    pmf.normalize()?;
    let indices = pmf.make_cdf()?.sample(frame.len(), rng)?;
    Ok(frame.take_rows(&indices))
}

#[cfg(test)]
mod tests {
    use probkit_dist::{DistError, random::RandomSource};

    use super::*;

    fn sample_frame() -> Frame {
        Frame::new()
            .with_column("x", (0..10).map(f64::from).collect())
            .unwrap()
            .with_column("w", vec![1.0; 10])
            .unwrap()
    }

    #[test]
    fn test_columns() {
        let frame = sample_frame();
        assert_eq!(frame.column_names().collect::<Vec<_>>(), vec!["x", "w"]);
        assert_eq!(
            frame.column("y"),
            Err(StatsError::MissingColumn {
                name: "y".to_owned()
            })
        );
        let replaced = frame.with_column("x", vec![0.0; 10]).unwrap();
        assert_eq!(replaced.column_names().count(), 2);
        assert_eq!(replaced.column("x").unwrap(), &[0.0; 10]);
    }

    #[test]
    fn test_column_length_mismatch() {
        let err = sample_frame().with_column("z", vec![1.0]).unwrap_err();
        assert_eq!(
            err,
            StatsError::ColumnLength {
                name: "z".to_owned(),
                expected: 10,
                actual: 1
            }
        );
    }

    #[test]
    fn test_take_rows_keeps_rows_aligned() {
        let frame = Frame::new()
            .with_column("a", vec![1.0, 2.0, 3.0])
            .unwrap()
            .with_column("b", vec![10.0, 20.0, 30.0])
            .unwrap();
        let taken = frame.take_rows(&[2, 0, 2]);
        assert_eq!(taken.column("a").unwrap(), &[3.0, 1.0, 3.0]);
        assert_eq!(taken.column("b").unwrap(), &[30.0, 10.0, 30.0]);
    }

    #[test]
    fn test_sample_rows_without_replacement() {
        let mut rng = RandomSource::seed_from_u64(4);
        let sample = sample_rows(&sample_frame(), 10, &mut rng).unwrap();
        let mut xs = sample.column("x").unwrap().to_vec();
        xs.sort_by(f64::total_cmp);
        assert_eq!(xs, (0..10).map(f64::from).collect::<Vec<_>>());
        assert_eq!(
            sample_rows(&sample_frame(), 11, &mut rng),
            Err(StatsError::SampleSize {
                requested: 11,
                available: 10
            })
        );
    }

    #[test]
    fn test_resample_rows_is_reproducible() {
        let frame = sample_frame();
        let a = resample_rows(&frame, 25, &mut RandomSource::seed_from_u64(6)).unwrap();
        let b = resample_rows(&frame, 25, &mut RandomSource::seed_from_u64(6)).unwrap();
        assert_eq!(a.len(), 25);
        assert_eq!(a, b);
        assert!(resample_rows(&Frame::new(), 0, &mut RandomSource::seed_from_u64(6))
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_resample_by_weight_follows_weights() {
        let frame = Frame::new()
            .with_column("x", vec![0.0, 1.0])
            .unwrap()
            .with_column("w", vec![1.0, 3.0])
            .unwrap();
        let mut rng = RandomSource::seed_from_u64(12);
        let ones = (0..200)
            .map(|_| resample_by_weight(&frame, "w", &mut rng).unwrap())
            .flat_map(|f| f.column("x").unwrap().to_vec())
            .filter(|&x| x == 1.0)
            .count();
        // 400 draws with p = 0.75
        assert!((250..350).contains(&ones), "{ones}");
    }

    #[test]
    fn test_resample_by_weight_rejects_bad_weights() {
        let mut rng = RandomSource::seed_from_u64(1);
        let frame = sample_frame().with_column("w", {
            let mut w = vec![1.0; 10];
            w[3] = -2.0;
            w
        });
        assert_eq!(
            resample_by_weight(&frame.unwrap(), "w", &mut rng),
            Err(StatsError::InvalidWeight { row: 3, weight: -2.0 })
        );

        let zeros = sample_frame().with_column("w", vec![0.0; 10]).unwrap();
        assert!(matches!(
            resample_by_weight(&zeros, "w", &mut rng),
            Err(StatsError::Distribution(DistError::DivisionByZero { .. }))
        ));
        assert!(resample_by_weight(&zeros, "missing", &mut rng).is_err());
    }
}
