//! Register-sized lanes and the flat-array ↔ lane conversions.
//!
//! A [`Lane<T, N>`] is `N` contiguous elements processed together. `N` is a
//! compile-time constant so lane arithmetic has a fixed trip count and the
//! compiler emits packed vector instructions for it; the runner picks the
//! instantiation that matches the [`LaneWidth`] reported by the host.

use std::num::NonZeroUsize;
use std::ops::{Add, Div, Index, Mul, Sub};

use crate::error::{configuration_error, Result};
use crate::simd::traits::Element;

/// Widest lane the runner can dispatch to (64 one-byte elements, AVX-512).
pub const MAX_LANE_WIDTH: usize = 64;

/// One vector register of `N` elements of `T`.
#[derive(Copy, Clone, Debug, PartialEq)]
#[repr(transparent)]
pub struct Lane<T: Element, const N: usize>([T; N]);

impl<T: Element, const N: usize> Lane<T, N> {
    #[inline(always)]
    pub fn new(elements: [T; N]) -> Self {
        Self(elements)
    }

    #[inline(always)]
    pub fn splat(value: T) -> Self {
        Self([value; N])
    }

    /// Loads exactly `N` elements.
    ///
    /// # Panics
    ///
    /// Panics if `values.len() != N`.
    #[inline(always)]
    pub fn from_slice(values: &[T]) -> Self {
        let mut elements = [T::default(); N];
        elements.copy_from_slice(values);
        Self(elements)
    }

    #[inline(always)]
    pub fn as_slice(&self) -> &[T] {
        &self.0
    }

    #[inline(always)]
    pub fn to_array(self) -> [T; N] {
        self.0
    }

    /// Applies `f` slot by slot.
    #[inline(always)]
    pub fn zip_with(self, rhs: Self, f: impl Fn(T, T) -> T) -> Self {
        let mut out = self.0;
        for (o, &r) in out.iter_mut().zip(rhs.0.iter()) {
            *o = f(*o, r);
        }
        Self(out)
    }
}

impl<T: Element, const N: usize> Default for Lane<T, N> {
    fn default() -> Self {
        Self([T::default(); N])
    }
}

impl<T: Element, const N: usize> Index<usize> for Lane<T, N> {
    type Output = T;

    #[inline(always)]
    fn index(&self, index: usize) -> &T {
        &self.0[index]
    }
}

impl<T: Element, const N: usize> Add for Lane<T, N> {
    type Output = Self;

    #[inline(always)]
    fn add(self, rhs: Self) -> Self {
        self.zip_with(rhs, T::scalar_add)
    }
}

impl<T: Element, const N: usize> Sub for Lane<T, N> {
    type Output = Self;

    #[inline(always)]
    fn sub(self, rhs: Self) -> Self {
        self.zip_with(rhs, T::scalar_sub)
    }
}

impl<T: Element, const N: usize> Mul for Lane<T, N> {
    type Output = Self;

    #[inline(always)]
    fn mul(self, rhs: Self) -> Self {
        self.zip_with(rhs, T::scalar_mul)
    }
}

// No integer division: zeroed padding slots would trap.
impl<T: Element + num::Float, const N: usize> Div for Lane<T, N> {
    type Output = Self;

    #[inline(always)]
    fn div(self, rhs: Self) -> Self {
        self.zip_with(rhs, |a, b| a / b)
    }
}

/// Number of elements of one kind processed per lane.
///
/// Always a power of two no larger than [`MAX_LANE_WIDTH`], which is what
/// every vector unit reports and what the runner has instantiations for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LaneWidth(NonZeroUsize);

impl LaneWidth {
    pub fn new(width: usize) -> Result<Self> {
        match NonZeroUsize::new(width) {
            Some(w) if w.is_power_of_two() && w.get() <= MAX_LANE_WIDTH => Ok(Self(w)),
            _ => Err(configuration_error(format!(
                "lane width {width} is not a power of two in 1..={MAX_LANE_WIDTH}"
            ))),
        }
    }

    #[inline]
    pub fn get(self) -> usize {
        self.0.get()
    }

    #[inline]
    pub fn pad_count(self, count: usize) -> usize {
        pad_count(count, self.get())
    }

    #[inline]
    pub fn padded_len(self, count: usize) -> usize {
        count + self.pad_count(count)
    }

    /// Lanes needed to cover `count` elements.
    #[inline]
    pub fn lane_count(self, count: usize) -> usize {
        self.padded_len(count) / self.get()
    }
}

/// Elements to append so that `count` becomes a multiple of `lane_width`.
///
/// # Panics
///
/// Panics if `lane_width` is zero.
#[inline]
pub fn pad_count(count: usize, lane_width: usize) -> usize {
    (lane_width - count % lane_width) % lane_width
}

/// Splits a padded array into lanes of `N` contiguous elements, in order.
pub fn partition<T: Element, const N: usize>(flat: &[T]) -> Vec<Lane<T, N>> {
    debug_assert_eq!(flat.len() % N, 0, "array is not padded to the lane width");

    flat.chunks_exact(N).map(Lane::from_slice).collect()
}

/// Copies every lane back into one flat array, in order.
pub fn flatten<T: Element, const N: usize>(lanes: &[Lane<T, N>]) -> Vec<T> {
    let mut flat = Vec::with_capacity(lanes.len() * N);

    for lane in lanes {
        flat.extend_from_slice(lane.as_slice());
    }

    flat
}
