use std::fmt;

use crate::error::{BenchError, Result};
use crate::kind::{NumericKind, Operation};
use crate::simd::kernels::{LaneAdd, LaneKernels, LaneMul, LaneSub, ScalarKernel};
use crate::simd::Element;

/// One benchmark case: an operation with its scalar and lane kernels.
pub struct OperationSpec<T: Element> {
    operation: Operation,
    scalar: ScalarKernel<T>,
    lanes: LaneKernels<T>,
}

impl<T: Element> OperationSpec<T> {
    /// The canonical kernel pair for `operation` on `T`.
    ///
    /// Fails with [`BenchError::Unsupported`] for division on integer kinds.
    pub fn new(operation: Operation) -> Result<Self> {
        match operation {
            Operation::Add => Ok(Self::from_kernels(
                operation,
                T::scalar_add,
                LaneKernels::of::<LaneAdd>(),
            )),
            Operation::Subtract => Ok(Self::from_kernels(
                operation,
                T::scalar_sub,
                LaneKernels::of::<LaneSub>(),
            )),
            Operation::Multiply => Ok(Self::from_kernels(
                operation,
                T::scalar_mul,
                LaneKernels::of::<LaneMul>(),
            )),
            Operation::Divide => T::division_kernels()
                .map(|(scalar, lanes)| Self::from_kernels(operation, scalar, lanes))
                .ok_or(BenchError::Unsupported {
                    kind: T::KIND,
                    operation,
                }),
        }
    }

    /// Pairs arbitrary kernels under `operation`'s name. Nothing checks that
    /// they compute the same thing; the runner's verification will.
    pub fn from_kernels(
        operation: Operation,
        scalar: ScalarKernel<T>,
        lanes: LaneKernels<T>,
    ) -> Self {
        Self {
            operation,
            scalar,
            lanes,
        }
    }

    pub fn operation(&self) -> Operation {
        self.operation
    }

    pub fn kind(&self) -> NumericKind {
        T::KIND
    }

    pub fn scalar(&self) -> ScalarKernel<T> {
        self.scalar
    }

    pub fn lanes(&self) -> &LaneKernels<T> {
        &self.lanes
    }
}

impl<T: Element> Clone for OperationSpec<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: Element> Copy for OperationSpec<T> {}

impl<T: Element> fmt::Debug for OperationSpec<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OperationSpec")
            .field("operation", &self.operation)
            .field("kind", &T::KIND)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simd::Lane;

    #[test]
    fn test_canonical_kernels_agree() {
        let spec = OperationSpec::<i16>::new(Operation::Multiply).unwrap();
        let lhs = Lane::<i16, 8>::splat(300);
        let rhs = Lane::<i16, 8>::splat(300);

        let lane = (spec.lanes().w8)(lhs, rhs);
        assert_eq!(lane[3], (spec.scalar())(300, 300));
        assert_eq!(spec.kind(), NumericKind::I16);
    }

    #[test]
    fn test_integer_division_unsupported() {
        let err = OperationSpec::<u32>::new(Operation::Divide).unwrap_err();
        assert_eq!(
            err,
            BenchError::Unsupported {
                kind: NumericKind::U32,
                operation: Operation::Divide
            }
        );
        assert!(OperationSpec::<f32>::new(Operation::Divide).is_ok());
    }
}
