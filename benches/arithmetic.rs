//! Criterion measurements of the scalar and lane kernels.
//!
//! The `lanebench` binary times whole phases with wall-clock milliseconds.
//! This suite measures the same kernels with criterion's statistics, at
//! sizes chosen to sit in different cache levels, with `ndarray`'s
//! element-wise arithmetic as an outside reference.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use ndarray::Array1;

use lanebench::bench::{generate_pair, DEFAULT_SEED};
use lanebench::simd::{partition, pad_count, Element, Lane};
use lanebench::{Operation, OperationSpec};

/// Elements per operand array. For 4-byte kinds: 16 KiB (L1), 1 MiB (L2)
/// and 16 MiB (L3 or memory).
const SIZES: &[usize] = &[4_096, 262_144, 4_194_304];

/// Lane width of the lane kernel measured here; 8 × 32-bit fills an AVX2
/// register.
const LANES: usize = 8;

fn padded_inputs<T: Element>(size: usize) -> (Vec<T>, Vec<T>) {
    let (mut lhs, mut rhs) = generate_pair::<T>(size, DEFAULT_SEED).unwrap();
    let padded = size + pad_count(size, LANES);
    lhs.resize(padded, T::default());
    rhs.resize(padded, T::default());
    (lhs, rhs)
}

fn bench_kind<T: Element>(
    c: &mut Criterion,
    operation: Operation,
    reference: fn(&Array1<T>, &Array1<T>) -> Array1<T>,
) {
    let spec = OperationSpec::<T>::new(operation).unwrap();
    let scalar = spec.scalar();
    let lane = spec.lanes().w8;

    for &size in SIZES {
        let mut group = c.benchmark_group(format!("{}_{}_{}", T::KIND, operation, size));
        group.throughput(Throughput::Elements(size as u64));

        let (lhs, rhs) = padded_inputs::<T>(size);

        group.bench_function(BenchmarkId::new("scalar", size), |b| {
            let mut out = vec![T::default(); size];
            b.iter(|| {
                for ((o, &x), &y) in out.iter_mut().zip(&lhs[..size]).zip(&rhs[..size]) {
                    *o = black_box(scalar)(x, y);
                }
                black_box(&mut out);
            })
        });

        let lhs_lanes = partition::<T, LANES>(&lhs);
        let rhs_lanes = partition::<T, LANES>(&rhs);
        group.bench_function(BenchmarkId::new("lanes", size), |b| {
            let mut out = vec![Lane::<T, LANES>::default(); lhs_lanes.len()];
            b.iter(|| {
                for ((o, &x), &y) in out.iter_mut().zip(&lhs_lanes).zip(&rhs_lanes) {
                    *o = black_box(lane)(x, y);
                }
                black_box(&mut out);
            })
        });

        let a = Array1::from_vec(lhs[..size].to_vec());
        let b_arr = Array1::from_vec(rhs[..size].to_vec());
        group.bench_function(BenchmarkId::new("ndarray", size), |b| {
            b.iter(|| black_box(reference(black_box(&a), black_box(&b_arr))))
        });

        group.finish();
    }
}

fn arithmetic_benchmarks(c: &mut Criterion) {
    bench_kind::<f32>(c, Operation::Add, |a, b| a + b);
    bench_kind::<f32>(c, Operation::Divide, |a, b| a / b);
    bench_kind::<i32>(c, Operation::Multiply, |a, b| {
        ndarray::Zip::from(a).and(b).map_collect(|&x, &y| x.wrapping_mul(y))
    });
}

criterion_group!(benches, arithmetic_benchmarks);
criterion_main!(benches);
