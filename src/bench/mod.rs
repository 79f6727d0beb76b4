//! The benchmark engine: input generation, the timed runner and output
//! verification.

pub mod generator;
pub mod operation;
pub mod runner;
pub mod verify;

pub use generator::{generate_pair, InputBuffers, InputGenerator, DEFAULT_SEED};
pub use operation::OperationSpec;
pub use runner::{run, Benchmark, BenchmarkResult};
pub use verify::verify;
