//! Scalar vs SIMD arithmetic benchmark.
//!
//! `lanebench` times element-by-element ("traditional") arithmetic against
//! lane-wise arithmetic on register-sized groups of elements, for every
//! integer width and both float widths. Inputs come from a seeded generator
//! that halves each kind's range so neither path overflows differently, and
//! every run cross-checks the two outputs before it reports a timing.
//!
//! ```rust,no_run
//! use lanebench::{bench, Operation, OperationSpec};
//!
//! let spec = OperationSpec::<i32>::new(Operation::Add)?;
//! let result = bench::run(1_000_000, 1_000, spec)?;
//! println!("scalar: {} ms, simd: {} ms", result.scalar_millis, result.vector_millis);
//! # Ok::<(), lanebench::BenchError>(())
//! ```

pub mod bench;
pub mod catalog;
pub mod config;
pub mod error;
pub mod kind;
pub mod report;
pub mod simd;

pub use bench::{BenchmarkResult, OperationSpec};
pub use config::BenchConfig;
pub use error::{BenchError, Result};
pub use kind::{NumericKind, Operation};
pub use simd::{Element, Lane, LaneWidth};
