/// Errors raised by distribution operations.
///
/// Lookups of absent values are never errors; they return a zero (or
/// caller-supplied) default. The variants here cover degenerate
/// distributions and out-of-range arguments only.
#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error)]
pub enum DistError {
    /// A total, variance or value that is used as a divisor is zero.
    #[display("division by zero: {context}")]
    DivisionByZero { context: &'static str },
    /// Drawing from or inverting a distribution with no entries.
    #[display("distribution has no values")]
    EmptyDistribution,
    /// A probability argument is outside `[0, 1]` (or NaN).
    #[display("probability {p} is outside [0, 1]")]
    ProbabilityOutOfRange { p: f64 },
    /// A distribution parameter is invalid (non-positive scale, …).
    #[display("invalid parameter `{name}`: {value}")]
    InvalidParameter { name: &'static str, value: f64 },
}

impl DistError {
    pub(crate) fn division_by_zero(context: &'static str) -> Self {
        Self::DivisionByZero { context }
    }
}
