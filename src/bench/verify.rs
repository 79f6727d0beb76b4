use crate::error::{BenchError, Result};
use crate::kind::Operation;
use crate::simd::Element;

/// Checks `scalar[i] == vector[i]` for every index, stopping at the first
/// mismatch. Callers pass only the compared (unpadded) prefix.
pub fn verify<T: Element>(operation: Operation, scalar: &[T], vector: &[T]) -> Result<()> {
    debug_assert_eq!(scalar.len(), vector.len());

    match scalar.iter().zip(vector).position(|(s, v)| s != v) {
        None => Ok(()),
        Some(index) => Err(BenchError::Correctness {
            kind: T::KIND,
            operation,
            index,
            scalar: scalar[index].to_string(),
            vector: vector[index].to_string(),
        }),
    }
}
