//! End-to-end benchmark runs: timing, padding, verification and
//! configuration errors.

use lanebench::bench::{self, generate_pair, Benchmark, DEFAULT_SEED};
use lanebench::simd::kernels::{LaneAdd, LaneSub};
use lanebench::simd::{platform, Element, LaneKernels, LaneWidth};
use lanebench::{BenchError, NumericKind, Operation, OperationSpec};

#[test]
#[ignore = "full-size run, takes seconds in release and minutes in debug"]
fn test_i32_add_full_size() {
    let spec = OperationSpec::<i32>::new(Operation::Add).unwrap();
    let result = bench::run(1_000_000, 1_000, spec).unwrap();
    assert!(result.scalar_millis > 0);
    assert!(result.vector_millis > 0);
}

#[test]
fn test_i32_add_reports_both_timings() {
    let spec = OperationSpec::<i32>::new(Operation::Add).unwrap();
    let result = bench::run(1_000_000, 20, spec).unwrap();

    assert!(result.lane_width.is_power_of_two());
    assert!(result.scalar_millis > 0, "scalar phase took {result:?}");
    assert!(result.vector_millis > 0, "vector phase took {result:?}");
}

#[test]
fn test_f64_divide_with_padding() {
    let spec = OperationSpec::<f64>::new(Operation::Divide).unwrap();
    let width = LaneWidth::new(4).unwrap();
    assert_eq!(width.pad_count(17), 3);

    let result = Benchmark::new(17, 5, spec)
        .unwrap()
        .with_lane_width(width)
        .run()
        .unwrap();
    assert_eq!(result.lane_width, 4);
}

#[test]
fn test_mismatched_kernels_fail_verification() {
    let spec = OperationSpec::<i32>::from_kernels(
        Operation::Add,
        i32::scalar_add,
        LaneKernels::of::<LaneSub>(),
    );

    // a + b and a - b first differ where b != 0, which is the very first
    // element for the default seed
    let (_, rhs) = generate_pair::<i32>(1_000, DEFAULT_SEED).unwrap();
    assert_ne!(rhs[0], 0);

    let err = Benchmark::new(1_000, 1, spec)
        .unwrap()
        .with_lane_width(LaneWidth::new(8).unwrap())
        .run()
        .unwrap_err();

    match err {
        BenchError::Correctness {
            kind,
            operation,
            index,
            ..
        } => {
            assert_eq!(kind, NumericKind::I32);
            assert_eq!(operation, Operation::Add);
            assert_eq!(index, 0);
        }
        other => panic!("expected a correctness error, got {other:?}"),
    }
}

#[test]
fn test_zero_count_fails_before_running() {
    let spec = OperationSpec::<i32>::new(Operation::Add).unwrap();
    let err = bench::run(0, 1_000, spec).unwrap_err();
    assert!(matches!(err, BenchError::Configuration { .. }));
}

#[test]
fn test_seed_changes_nothing_but_inputs() {
    let spec = OperationSpec::<u8>::new(Operation::Multiply).unwrap();
    for seed in [0, 1, DEFAULT_SEED, u64::MAX] {
        let result = Benchmark::new(333, 2, spec)
            .unwrap()
            .with_seed(seed)
            .with_lane_width(LaneWidth::new(32).unwrap())
            .run()
            .unwrap();
        assert_eq!(result.lane_width, 32);
    }
}

#[test]
fn test_matching_custom_kernels_pass() {
    let spec = OperationSpec::<u64>::from_kernels(
        Operation::Add,
        u64::scalar_add,
        LaneKernels::of::<LaneAdd>(),
    );
    assert!(bench::run(1_001, 3, spec).is_ok());
}

#[test]
fn test_reported_width_is_one_register_of_the_kernel_isa() {
    let spec = OperationSpec::<u16>::new(Operation::Subtract).unwrap();
    assert_eq!(spec.lanes().isa(), platform::available_isa());

    let result = bench::run(4_099, 2, spec).unwrap();
    let isa = result.isa.expect("x86_64 and aarch64 hosts have a vector unit");
    assert_eq!(
        result.lane_width,
        isa.lane_width(NumericKind::U16).unwrap().get()
    );
}
