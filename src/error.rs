//! Error types for benchmark runs.
//!
//! Every failure is final: a correctness failure means the scalar and lane
//! kernels are not equivalent, the other variants mean the run could not be
//! set up. None of them is retried.

use thiserror::Error;

use crate::kind::{NumericKind, Operation};

/// Errors that can occur while setting up or executing a benchmark case.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BenchError {
    /// Scalar and reconstructed lane outputs disagree.
    #[error(
        "{kind} {operation}: results are not the same at index {index}: {scalar} vs {vector}"
    )]
    Correctness {
        /// Element kind of the failing case.
        kind: NumericKind,
        /// Operation of the failing case.
        operation: Operation,
        /// First index where the outputs differ.
        index: usize,
        /// Scalar output at `index`.
        scalar: String,
        /// Lane output at `index`.
        vector: String,
    },
    /// Invalid run parameters, rejected before any buffer is allocated.
    #[error("Invalid configuration: {message}")]
    Configuration {
        /// Human-readable error message.
        message: String,
    },
    /// The operation is not defined for the element kind.
    #[error("Unsupported benchmark: {operation} on {kind}")]
    Unsupported {
        /// Requested element kind.
        kind: NumericKind,
        /// Requested operation.
        operation: Operation,
    },
    /// The host could not report a vector register width.
    #[error("Platform query failed: {message}")]
    PlatformQuery {
        /// Human-readable error message.
        message: String,
    },
}

impl BenchError {
    /// True for the errors that reject a case before any work begins.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            BenchError::Configuration { .. } | BenchError::Unsupported { .. }
        )
    }
}

/// Result type alias for benchmark operations.
pub type Result<T> = std::result::Result<T, BenchError>;

/// Creates a configuration error.
pub fn configuration_error(message: impl Into<String>) -> BenchError {
    BenchError::Configuration {
        message: message.into(),
    }
}

/// Creates a platform query error.
pub fn platform_error(message: impl Into<String>) -> BenchError {
    BenchError::PlatformQuery {
        message: message.into(),
    }
}
