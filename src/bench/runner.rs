//! Times the scalar and lane kernels of one [`OperationSpec`].
//!
//! A run generates inputs, pads them to the lane width, times `repetitions`
//! passes of each path separately, then flattens the lane output and checks
//! it against the scalar output. Only the two kernel loops are timed.

use std::hint::black_box;
use std::time::{Duration, Instant};

use log::debug;

use crate::bench::generator::{InputBuffers, DEFAULT_SEED};
use crate::bench::operation::OperationSpec;
use crate::bench::verify::verify;
use crate::error::{configuration_error, Result};
use crate::simd::kernels::LaneKernel;
use crate::simd::{flatten, partition, platform, Element, Isa, Lane, LaneWidth};

/// Wall-clock time of each path, in whole milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BenchmarkResult {
    pub scalar_millis: u64,
    pub vector_millis: u64,
    /// Lane width the vector path ran at.
    pub lane_width: usize,
    /// Vector unit the lane kernels were compiled for.
    pub isa: Option<Isa>,
}

impl BenchmarkResult {
    fn from_durations(
        scalar: Duration,
        vector: Duration,
        lane_width: usize,
        isa: Option<Isa>,
    ) -> Self {
        Self {
            scalar_millis: millis(scalar),
            vector_millis: millis(vector),
            lane_width,
            isa,
        }
    }

    /// Scalar time over vector time; `None` when the vector path took under
    /// a millisecond.
    pub fn speedup(&self) -> Option<f64> {
        (self.vector_millis > 0).then(|| self.scalar_millis as f64 / self.vector_millis as f64)
    }
}

fn millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

/// A configured benchmark run for one element type.
#[derive(Debug, Clone, Copy)]
pub struct Benchmark<T: Element> {
    count: usize,
    repetitions: usize,
    seed: u64,
    lane_width: Option<LaneWidth>,
    spec: OperationSpec<T>,
}

impl<T: Element> Benchmark<T> {
    /// Rejects a zero `count` or `repetitions` before anything is allocated.
    pub fn new(count: usize, repetitions: usize, spec: OperationSpec<T>) -> Result<Self> {
        if count == 0 {
            return Err(configuration_error("element count must be greater than zero"));
        }
        if repetitions == 0 {
            return Err(configuration_error("repetitions must be greater than zero"));
        }

        Ok(Self {
            count,
            repetitions,
            seed: DEFAULT_SEED,
            lane_width: None,
            spec,
        })
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Uses `lane_width` instead of asking the platform.
    pub fn with_lane_width(mut self, lane_width: LaneWidth) -> Self {
        self.lane_width = Some(lane_width);
        self
    }

    /// Without an explicit lane width, the width is one register of the
    /// vector unit the lane kernels were compiled for.
    pub fn run(&self) -> Result<BenchmarkResult> {
        let isa = self.spec.lanes().isa();
        let width = match (self.lane_width, isa) {
            (Some(width), _) => width,
            (None, Some(isa)) => isa.lane_width(T::KIND)?,
            (None, None) => platform::lane_width::<T>()?,
        };

        let inputs = InputBuffers::<T>::generate(self.count, width, self.seed)?;

        debug!(
            "{} {}: {} elements + {} padding, lane width {} on {}, {} repetitions",
            T::KIND,
            self.spec.operation(),
            inputs.count(),
            inputs.pad_count(),
            width.get(),
            isa.map_or("baseline", Isa::name),
            self.repetitions
        );

        let lanes = self.spec.lanes();
        match width.get() {
            1 => self.execute::<1>(&inputs, lanes.w1),
            2 => self.execute::<2>(&inputs, lanes.w2),
            4 => self.execute::<4>(&inputs, lanes.w4),
            8 => self.execute::<8>(&inputs, lanes.w8),
            16 => self.execute::<16>(&inputs, lanes.w16),
            32 => self.execute::<32>(&inputs, lanes.w32),
            64 => self.execute::<64>(&inputs, lanes.w64),
            other => Err(configuration_error(format!("no lane kernel for width {other}"))),
        }
    }

    fn execute<const N: usize>(
        &self,
        inputs: &InputBuffers<T>,
        lane_kernel: LaneKernel<T, N>,
    ) -> Result<BenchmarkResult> {
        let count = inputs.count();
        let lhs = &inputs.lhs()[..count];
        let rhs = &inputs.rhs()[..count];
        let lhs_lanes = partition::<T, N>(inputs.lhs());
        let rhs_lanes = partition::<T, N>(inputs.rhs());

        // Opaque pointers keep the optimizer from fusing or auto-vectorizing the scalar loop
        let scalar_kernel = black_box(self.spec.scalar());
        let lane_kernel = black_box(lane_kernel);

        let mut scalar_out = vec![T::default(); inputs.padded_len()];
        let start = Instant::now();
        for _ in 0..self.repetitions {
            for ((out, &a), &b) in scalar_out[..count].iter_mut().zip(lhs).zip(rhs) {
                *out = scalar_kernel(a, b);
            }
            black_box(&mut scalar_out);
        }
        let scalar_elapsed = start.elapsed();
        debug!("scalar phase: {scalar_elapsed:?}");

        let mut lane_out = vec![Lane::<T, N>::default(); lhs_lanes.len()];
        let start = Instant::now();
        for _ in 0..self.repetitions {
            for ((out, &a), &b) in lane_out.iter_mut().zip(&lhs_lanes).zip(&rhs_lanes) {
                *out = lane_kernel(a, b);
            }
            black_box(&mut lane_out);
        }
        let vector_elapsed = start.elapsed();
        debug!("vector phase: {vector_elapsed:?}");

        let vector_out = flatten(&lane_out);
        verify(
            self.spec.operation(),
            &scalar_out[..count],
            &vector_out[..count],
        )?;

        Ok(BenchmarkResult::from_durations(
            scalar_elapsed,
            vector_elapsed,
            N,
            self.spec.lanes().isa(),
        ))
    }
}

/// Runs `spec` over `count` elements `repetitions` times at the host's lane
/// width, with the default seed.
pub fn run<T: Element>(
    count: usize,
    repetitions: usize,
    spec: OperationSpec<T>,
) -> Result<BenchmarkResult> {
    Benchmark::new(count, repetitions, spec)?.run()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kind::Operation;

    #[test]
    fn test_zero_repetitions_rejected() {
        let spec = OperationSpec::<u8>::new(Operation::Add).unwrap();
        let err = Benchmark::new(16, 0, spec).unwrap_err();
        assert!(err.is_configuration());
    }

    #[test]
    fn test_speedup() {
        let result = BenchmarkResult {
            scalar_millis: 30,
            vector_millis: 10,
            lane_width: 8,
            isa: Some(Isa::Avx2),
        };
        assert_eq!(result.speedup(), Some(3.0));

        let instant = BenchmarkResult {
            vector_millis: 0,
            ..result
        };
        assert_eq!(instant.speedup(), None);
    }

    #[test]
    fn test_default_width_matches_kernel_isa() {
        let spec = OperationSpec::<i32>::new(Operation::Add).unwrap();
        let Some(isa) = spec.lanes().isa() else {
            return;
        };

        let result = Benchmark::new(1_000, 1, spec).unwrap().run().unwrap();
        assert_eq!(result.isa, Some(isa));
        assert_eq!(result.lane_width, isa.register_bytes() / 4);
    }

    #[test]
    fn test_every_width_dispatches() {
        let spec = OperationSpec::<i8>::new(Operation::Subtract).unwrap();

        for width in [1, 2, 4, 8, 16, 32, 64] {
            let result = Benchmark::new(100, 2, spec)
                .unwrap()
                .with_lane_width(LaneWidth::new(width).unwrap())
                .run()
                .unwrap();
            assert_eq!(result.lane_width, width);
        }
    }
}
