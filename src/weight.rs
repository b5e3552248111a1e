use std::fmt::{Debug, Display};
use std::ops::Add;

/// Numeric edge weight.
///
/// Weights only need a partial order so that floating point types can
/// be used; graph construction rejects values that do not compare
/// with themselves (NaN), so every weight stored in a [`Graph`] is
/// totally ordered in practice.
///
/// [`Graph`]: crate::Graph
pub trait Weight: Copy + PartialOrd + Add<Output = Self> + Debug + Display {
    fn zero() -> Self;

    /// `None` if the sum does not fit the type. Floating point sums
    /// never fail; they run off to infinity instead.
    fn checked_add(self, other: Self) -> Option<Self>;

    /// Sum clamped to the bounds of the type.
    fn saturating_add(self, other: Self) -> Self;

    fn is_negative(&self) -> bool {
        *self < Self::zero()
    }

    /// False for values such as NaN that are unordered even with
    /// respect to themselves.
    fn is_comparable(&self) -> bool {
        self.partial_cmp(self).is_some()
    }
}

macro_rules! impl_int_weight {
    ($($t:ty),*) => {
        $(
            impl Weight for $t {
                fn zero() -> Self {
                    0
                }

                fn checked_add(self, other: Self) -> Option<Self> {
                    <$t>::checked_add(self, other)
                }

                fn saturating_add(self, other: Self) -> Self {
                    <$t>::saturating_add(self, other)
                }
            }
        )*
    };
}

macro_rules! impl_float_weight {
    ($($t:ty),*) => {
        $(
            impl Weight for $t {
                fn zero() -> Self {
                    0.0
                }

                fn checked_add(self, other: Self) -> Option<Self> {
                    Some(self + other)
                }

                fn saturating_add(self, other: Self) -> Self {
                    self + other
                }
            }
        )*
    };
}

impl_int_weight!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);
impl_float_weight!(f32, f64);

/// Sums a sequence of weights, starting from zero and clamping at the
/// bounds of the type.
pub fn total<W: Weight, I: IntoIterator<Item = W>>(weights: I) -> W {
    weights.into_iter().fold(W::zero(), |acc, w| acc.saturating_add(w))
}
