//! Seeded input generation.
//!
//! Values are drawn from half of each kind's range (see
//! [`Element::safe_bounds`]) so that add on every kind, and subtract on
//! signed kinds, can never overflow. Draws alternate between the two arrays
//! (`lhs[0]`, `rhs[0]`, `lhs[1]`, ...), so the values of the first `count`
//! slots do not depend on how much padding follows them.

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::error::{configuration_error, Result};
use crate::simd::{Element, LaneWidth};

/// Seed every run starts from.
pub const DEFAULT_SEED: u64 = 42;

pub struct InputGenerator {
    rng: StdRng,
}

impl InputGenerator {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Fills `lhs` and `rhs` pairwise. Slices of different lengths are a
    /// configuration error and are left untouched.
    pub fn fill<T: Element>(&mut self, lhs: &mut [T], rhs: &mut [T]) -> Result<()> {
        if lhs.len() != rhs.len() {
            return Err(configuration_error(format!(
                "input arrays differ in length: {} vs {}",
                lhs.len(),
                rhs.len()
            )));
        }

        for (l, r) in lhs.iter_mut().zip(rhs.iter_mut()) {
            *l = T::sample(&mut self.rng);
            *r = T::sample(&mut self.rng);
        }
        Ok(())
    }
}

/// Generates two unpadded arrays of `count` values from `seed`.
pub fn generate_pair<T: Element>(count: usize, seed: u64) -> Result<(Vec<T>, Vec<T>)> {
    if count == 0 {
        return Err(configuration_error("element count must be greater than zero"));
    }

    let mut lhs = vec![T::default(); count];
    let mut rhs = vec![T::default(); count];
    InputGenerator::new(seed).fill(&mut lhs, &mut rhs)?;

    Ok((lhs, rhs))
}

/// The two operand arrays of one benchmark run, padded to a lane multiple.
#[derive(Debug, Clone, PartialEq)]
pub struct InputBuffers<T: Element> {
    lhs: Vec<T>,
    rhs: Vec<T>,
    count: usize,
}

impl<T: Element> InputBuffers<T> {
    /// Allocates `count` plus padding slots and generates the first `count`.
    /// Padding slots keep `T::default()`.
    pub fn generate(count: usize, lane_width: LaneWidth, seed: u64) -> Result<Self> {
        if count == 0 {
            return Err(configuration_error("element count must be greater than zero"));
        }

        let padded_len = lane_width.padded_len(count);
        let mut lhs = vec![T::default(); padded_len];
        let mut rhs = vec![T::default(); padded_len];

        InputGenerator::new(seed).fill(&mut lhs[..count], &mut rhs[..count])?;

        Ok(Self { lhs, rhs, count })
    }

    /// Left operands, padding included.
    pub fn lhs(&self) -> &[T] {
        &self.lhs
    }

    /// Right operands, padding included.
    pub fn rhs(&self) -> &[T] {
        &self.rhs
    }

    /// Number of generated (compared) elements.
    pub fn count(&self) -> usize {
        self.count
    }

    pub fn padded_len(&self) -> usize {
        self.lhs.len()
    }

    pub fn pad_count(&self) -> usize {
        self.padded_len() - self.count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_padding_is_default_valued() {
        let width = LaneWidth::new(8).unwrap();
        let inputs = InputBuffers::<i32>::generate(13, width, DEFAULT_SEED).unwrap();

        assert_eq!(inputs.count(), 13);
        assert_eq!(inputs.padded_len(), 16);
        assert_eq!(inputs.pad_count(), 3);
        assert!(inputs.lhs()[13..].iter().all(|&v| v == 0));
        assert!(inputs.rhs()[13..].iter().all(|&v| v == 0));
    }

    #[test]
    fn test_padding_does_not_change_values() {
        let narrow = InputBuffers::<u16>::generate(21, LaneWidth::new(1).unwrap(), 7).unwrap();
        let wide = InputBuffers::<u16>::generate(21, LaneWidth::new(32).unwrap(), 7).unwrap();

        assert_eq!(narrow.lhs(), &wide.lhs()[..21]);
        assert_eq!(narrow.rhs(), &wide.rhs()[..21]);
    }

    #[test]
    fn test_unequal_lengths_rejected() {
        let mut lhs = [0i16; 4];
        let mut rhs = [0i16; 5];
        let err = InputGenerator::new(DEFAULT_SEED)
            .fill(&mut lhs[..], &mut rhs[..])
            .unwrap_err();

        assert!(err.is_configuration());
        assert_eq!(lhs, [0; 4]);
        assert_eq!(rhs, [0; 5]);
    }

    #[test]
    fn test_zero_count_rejected() {
        let width = LaneWidth::new(4).unwrap();
        assert!(InputBuffers::<f64>::generate(0, width, DEFAULT_SEED).is_err());
        assert!(generate_pair::<u8>(0, DEFAULT_SEED).is_err());
    }
}
