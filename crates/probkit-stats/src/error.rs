use probkit_dist::DistError;

/// Errors raised by statistical operators.
#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error)]
pub enum StatsError {
    /// An operator that needs at least one observation got none.
    #[display("input sequence is empty")]
    EmptyInput,
    /// Paired sequences have different lengths.
    #[display("paired sequences differ in length ({left} vs {right})")]
    LengthMismatch { left: usize, right: usize },
    /// A variance, count or other divisor is zero.
    #[display("division by zero: {context}")]
    DivisionByZero { context: &'static str },
    /// A frame has no column with the requested name.
    #[display("no column named '{name}'")]
    MissingColumn { name: String },
    /// A column added to a frame has the wrong number of rows.
    #[display("column '{name}' has {actual} rows, expected {expected}")]
    ColumnLength {
        name: String,
        expected: usize,
        actual: usize,
    },
    /// A sample without replacement asks for more rows than exist.
    #[display("cannot sample {requested} rows without replacement from {available}")]
    SampleSize { requested: usize, available: usize },
    /// A sampling weight is negative or not finite.
    #[display("invalid weight {weight} in row {row}")]
    InvalidWeight { row: usize, weight: f64 },
    /// A distribution operation failed.
    #[display("{_0}")]
    Distribution(DistError),
}

impl StatsError {
    pub(crate) fn division_by_zero(context: &'static str) -> Self {
        Self::DivisionByZero { context }
    }

    pub(crate) fn check_paired(xs: &[f64], ys: &[f64]) -> Result<(), Self> {
        if xs.len() != ys.len() {
            return Err(Self::LengthMismatch {
                left: xs.len(),
                right: ys.len(),
            });
        }
        if xs.is_empty() {
            return Err(Self::EmptyInput);
        }
        Ok(())
    }
}

impl From<DistError> for StatsError {
    fn from(err: DistError) -> Self {
        Self::Distribution(err)
    }
}
