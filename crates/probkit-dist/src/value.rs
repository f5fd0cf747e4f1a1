//! Keys stored in distributions.
//!
//! Every distribution in this crate is keyed by an ordered type so that
//! iteration, CDF construction and lookups are deterministic. Floating point
//! observations use [`Real`], a totally ordered wrapper around `f64`.

use ordered_float::OrderedFloat;

/// Totally ordered `f64` used as a key for floating point observations.
pub type Real = OrderedFloat<f64>;

/// Wraps an `f64` into a [`Real`] key.
///
/// # Examples
///
/// ```
/// use probkit_dist::value::{Value as _, real};
///
/// assert_eq!(real(1.5).to_f64(), 1.5);
/// ```
#[must_use]
pub fn real(x: f64) -> Real {
    OrderedFloat(x)
}

/// Wraps every element of a slice into [`Real`] keys.
#[must_use]
pub fn reals(xs: &[f64]) -> Vec<Real> {
    xs.iter().copied().map(OrderedFloat).collect()
}

/// A numeric distribution key.
///
/// Operations that need arithmetic on values (moments, observer bias, …)
/// convert keys to `f64` through this trait.
pub trait Value: Copy + Ord {
    /// Converts the key to a floating point number.
    fn to_f64(self) -> f64;
}

macro_rules! impl_value_lossless {
    ($($ty:ty),*) => {
        $(
            impl Value for $ty {
                fn to_f64(self) -> f64 {
                    f64::from(self)
                }
            }
        )*
    };
}

macro_rules! impl_value_lossy {
    ($($ty:ty),*) => {
        $(
            impl Value for $ty {
                #[allow(clippy::cast_precision_loss)]
                fn to_f64(self) -> f64 {
                    self as f64
                }
            }
        )*
    };
}

impl_value_lossless!(i8, i16, i32, u8, u16, u32);
impl_value_lossy!(i64, u64, isize, usize);

impl Value for Real {
    fn to_f64(self) -> f64 {
        self.0
    }
}
