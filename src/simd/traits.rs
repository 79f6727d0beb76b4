//! Element types that can be benchmarked.
//!
//! [`Element`] binds each Rust primitive to its [`NumericKind`] at compile
//! time: its bounds, the halved range inputs are drawn from, and the
//! arithmetic both benchmark paths share. Integer arithmetic wraps on both
//! paths and float arithmetic follows IEEE 754 on both paths, so scalar and
//! lane results can be compared exactly.

use std::fmt::{Debug, Display};

use num::PrimInt;
use rand::distr::Open01;
use rand::Rng;

use crate::kind::NumericKind;
use crate::simd::kernels::{LaneDiv, LaneKernels, ScalarKernel};

pub trait Element: Copy + Default + PartialEq + Debug + Display + Send + Sync + 'static {
    const KIND: NumericKind;
    const MIN: Self;
    const MAX: Self;

    /// Bounds of the generation range: inclusive for integers, exclusive
    /// for floats.
    fn safe_bounds() -> (Self, Self);

    /// Draws one value from the safe range.
    fn sample<R: Rng>(rng: &mut R) -> Self;

    fn scalar_add(self, rhs: Self) -> Self;
    fn scalar_sub(self, rhs: Self) -> Self;
    fn scalar_mul(self, rhs: Self) -> Self;

    /// Scalar and lane division kernels, `None` for kinds that do not
    /// benchmark division.
    fn division_kernels() -> Option<(ScalarKernel<Self>, LaneKernels<Self>)> {
        None
    }
}

/// `[MIN / 2, MAX / 2]`; unsigned kinds start at zero.
#[inline]
fn halved_bounds<T: PrimInt>() -> (T, T) {
    let two = T::one() + T::one();
    (T::min_value() / two, T::max_value() / two)
}

macro_rules! impl_integer_element {
    ($($t:ty => $kind:ident),* $(,)?) => {$(
        impl Element for $t {
            const KIND: NumericKind = NumericKind::$kind;
            const MIN: Self = <$t>::MIN;
            const MAX: Self = <$t>::MAX;

            #[inline]
            fn safe_bounds() -> (Self, Self) {
                halved_bounds::<$t>()
            }

            #[inline]
            fn sample<R: Rng>(rng: &mut R) -> Self {
                let (low, high) = Self::safe_bounds();
                rng.random_range(low..=high)
            }

            #[inline(always)]
            fn scalar_add(self, rhs: Self) -> Self {
                self.wrapping_add(rhs)
            }

            #[inline(always)]
            fn scalar_sub(self, rhs: Self) -> Self {
                self.wrapping_sub(rhs)
            }

            #[inline(always)]
            fn scalar_mul(self, rhs: Self) -> Self {
                self.wrapping_mul(rhs)
            }
        }
    )*};
}

macro_rules! impl_float_element {
    ($($t:ty => $kind:ident),* $(,)?) => {$(
        impl Element for $t {
            const KIND: NumericKind = NumericKind::$kind;
            const MIN: Self = <$t>::MIN;
            const MAX: Self = <$t>::MAX;

            #[inline]
            fn safe_bounds() -> (Self, Self) {
                (0.0, 0.5)
            }

            // Open01 never yields 0.0, so generated divisors are never zero
            #[inline]
            fn sample<R: Rng>(rng: &mut R) -> Self {
                let fraction: $t = rng.sample(Open01);
                fraction / 2.0
            }

            #[inline(always)]
            fn scalar_add(self, rhs: Self) -> Self {
                self + rhs
            }

            #[inline(always)]
            fn scalar_sub(self, rhs: Self) -> Self {
                self - rhs
            }

            #[inline(always)]
            fn scalar_mul(self, rhs: Self) -> Self {
                self * rhs
            }

            fn division_kernels() -> Option<(ScalarKernel<Self>, LaneKernels<Self>)> {
                let scalar: ScalarKernel<$t> = |a, b| a / b;
                Some((scalar, LaneKernels::of::<LaneDiv>()))
            }
        }
    )*};
}

impl_integer_element! {
    i8 => I8,
    u8 => U8,
    i16 => I16,
    u16 => U16,
    i32 => I32,
    u32 => U32,
    i64 => I64,
    u64 => U64,
}

impl_float_element! {
    f32 => F32,
    f64 => F64,
}
