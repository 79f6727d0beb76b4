use crate::bench::DEFAULT_SEED;
use crate::error::{configuration_error, Result};

/// Elements per operand array in a default run.
pub const DEFAULT_COUNT: usize = 1_000_000;

/// Kernel passes per phase in a default run.
pub const DEFAULT_REPETITIONS: usize = 1_000;

/// Settings shared by every case of a benchmark run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BenchConfig {
    /// Number of elements in each operand array
    pub count: usize,

    /// Number of times each kernel is applied over the arrays
    pub repetitions: usize,

    /// Seed of the input generator
    pub seed: u64,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            count: DEFAULT_COUNT,
            repetitions: DEFAULT_REPETITIONS,
            seed: DEFAULT_SEED,
        }
    }
}

impl BenchConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the element count
    pub fn count(mut self, count: usize) -> Self {
        self.count = count;
        self
    }

    /// Set the repetition count
    pub fn repetitions(mut self, repetitions: usize) -> Self {
        self.repetitions = repetitions;
        self
    }

    /// Set the generator seed
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.count == 0 {
            return Err(configuration_error("element count must be greater than zero"));
        }
        if self.repetitions == 0 {
            return Err(configuration_error("repetitions must be greater than zero"));
        }
        Ok(())
    }
}
