//! Lane kernels and their per-width, per-ISA instantiations.
//!
//! A lane kernel is generic over the lane width, but the runner only learns
//! the width at run time and calls kernels through plain function pointers.
//! [`LaneKernels`] bridges the two: it holds one function pointer per
//! supported width, all instantiated from the same [`LaneOp`].
//!
//! Each instantiation is compiled for the vector unit the host reports, so a
//! 16 × i32 lane on AVX-512 is one `zmm` operation rather than four baseline
//! `xmm` ones. The ISA-specific bodies are `#[target_feature]` functions;
//! the safe wrappers stored in the table are only handed out for an ISA
//! that [`platform::available_isa`] confirmed.

use crate::simd::lane::Lane;
use crate::simd::platform::{self, Isa};
use crate::simd::traits::Element;

/// Element-wise kernel of the scalar path.
pub type ScalarKernel<T> = fn(T, T) -> T;

/// Lane-wise kernel of the vector path at one width.
pub type LaneKernel<T, const N: usize> = fn(Lane<T, N>, Lane<T, N>) -> Lane<T, N>;

/// A binary operation on lanes of any width.
pub trait LaneOp<T: Element> {
    fn apply<const N: usize>(lhs: Lane<T, N>, rhs: Lane<T, N>) -> Lane<T, N>;
}

pub struct LaneAdd;
pub struct LaneSub;
pub struct LaneMul;
/// Float kinds only.
pub struct LaneDiv;

impl<T: Element> LaneOp<T> for LaneAdd {
    #[inline(always)]
    fn apply<const N: usize>(lhs: Lane<T, N>, rhs: Lane<T, N>) -> Lane<T, N> {
        lhs + rhs
    }
}

impl<T: Element> LaneOp<T> for LaneSub {
    #[inline(always)]
    fn apply<const N: usize>(lhs: Lane<T, N>, rhs: Lane<T, N>) -> Lane<T, N> {
        lhs - rhs
    }
}

impl<T: Element> LaneOp<T> for LaneMul {
    #[inline(always)]
    fn apply<const N: usize>(lhs: Lane<T, N>, rhs: Lane<T, N>) -> Lane<T, N> {
        lhs * rhs
    }
}

impl<T: Element + num::Float> LaneOp<T> for LaneDiv {
    #[inline(always)]
    fn apply<const N: usize>(lhs: Lane<T, N>, rhs: Lane<T, N>) -> Lane<T, N> {
        lhs / rhs
    }
}

#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
mod x86 {
    use super::{Element, Lane, LaneOp};

    #[target_feature(enable = "avx512f,avx512bw,avx512dq")]
    unsafe fn avx512_apply<T: Element, K: LaneOp<T>, const N: usize>(
        lhs: Lane<T, N>,
        rhs: Lane<T, N>,
    ) -> Lane<T, N> {
        K::apply::<N>(lhs, rhs)
    }

    #[target_feature(enable = "avx2")]
    unsafe fn avx2_apply<T: Element, K: LaneOp<T>, const N: usize>(
        lhs: Lane<T, N>,
        rhs: Lane<T, N>,
    ) -> Lane<T, N> {
        K::apply::<N>(lhs, rhs)
    }

    #[target_feature(enable = "sse2")]
    unsafe fn sse2_apply<T: Element, K: LaneOp<T>, const N: usize>(
        lhs: Lane<T, N>,
        rhs: Lane<T, N>,
    ) -> Lane<T, N> {
        K::apply::<N>(lhs, rhs)
    }

    pub(super) fn on_avx512<T: Element, K: LaneOp<T>, const N: usize>(
        lhs: Lane<T, N>,
        rhs: Lane<T, N>,
    ) -> Lane<T, N> {
        // SAFETY: only stored by `LaneKernels::for_isa` after AVX-512 F/BW/DQ were detected
        unsafe { avx512_apply::<T, K, N>(lhs, rhs) }
    }

    pub(super) fn on_avx2<T: Element, K: LaneOp<T>, const N: usize>(
        lhs: Lane<T, N>,
        rhs: Lane<T, N>,
    ) -> Lane<T, N> {
        // SAFETY: only stored by `LaneKernels::for_isa` after AVX2 was detected
        unsafe { avx2_apply::<T, K, N>(lhs, rhs) }
    }

    pub(super) fn on_sse2<T: Element, K: LaneOp<T>, const N: usize>(
        lhs: Lane<T, N>,
        rhs: Lane<T, N>,
    ) -> Lane<T, N> {
        // SAFETY: only stored by `LaneKernels::for_isa` after SSE2 was detected
        unsafe { sse2_apply::<T, K, N>(lhs, rhs) }
    }
}

#[cfg(target_arch = "aarch64")]
mod aarch64 {
    use super::{Element, Lane, LaneOp};

    #[target_feature(enable = "neon")]
    unsafe fn neon_apply<T: Element, K: LaneOp<T>, const N: usize>(
        lhs: Lane<T, N>,
        rhs: Lane<T, N>,
    ) -> Lane<T, N> {
        K::apply::<N>(lhs, rhs)
    }

    pub(super) fn on_neon<T: Element, K: LaneOp<T>, const N: usize>(
        lhs: Lane<T, N>,
        rhs: Lane<T, N>,
    ) -> Lane<T, N> {
        // SAFETY: only stored by `LaneKernels::for_isa` after NEON was detected
        unsafe { neon_apply::<T, K, N>(lhs, rhs) }
    }
}

macro_rules! lane_kernels {
    ($($field:ident => $n:literal),* $(,)?) => {
        /// One lane kernel per supported lane width, all compiled for the
        /// same vector unit.
        pub struct LaneKernels<T: Element> {
            $(pub $field: LaneKernel<T, $n>,)*
            isa: Option<Isa>,
        }

        impl<T: Element> LaneKernels<T> {
            /// Instantiates `K` at every supported width for the host's
            /// widest vector unit.
            pub fn of<K: LaneOp<T>>() -> Self {
                Self::for_isa::<K>(platform::available_isa())
            }

            /// Instantiates `K` for the build target's baseline features
            /// only, whatever the host supports.
            pub fn portable<K: LaneOp<T>>() -> Self {
                Self {
                    $($field: <K as LaneOp<T>>::apply::<$n>,)*
                    isa: None,
                }
            }

            /// Vector unit the kernels were compiled for; `None` for
            /// [`LaneKernels::portable`] kernels.
            pub fn isa(&self) -> Option<Isa> {
                self.isa
            }

            // Callers pass only what `available_isa` returned
            fn for_isa<K: LaneOp<T>>(isa: Option<Isa>) -> Self {
                match isa {
                    #[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
                    Some(Isa::Avx512) => Self {
                        $($field: x86::on_avx512::<T, K, $n>,)*
                        isa,
                    },
                    #[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
                    Some(Isa::Avx2) => Self {
                        $($field: x86::on_avx2::<T, K, $n>,)*
                        isa,
                    },
                    #[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
                    Some(Isa::Sse2) => Self {
                        $($field: x86::on_sse2::<T, K, $n>,)*
                        isa,
                    },
                    #[cfg(target_arch = "aarch64")]
                    Some(Isa::Neon) => Self {
                        $($field: aarch64::on_neon::<T, K, $n>,)*
                        isa,
                    },
                    _ => Self::portable::<K>(),
                }
            }
        }

        impl<T: Element> Clone for LaneKernels<T> {
            fn clone(&self) -> Self {
                *self
            }
        }

        impl<T: Element> Copy for LaneKernels<T> {}
    };
}

lane_kernels! {
    w1 => 1,
    w2 => 2,
    w4 => 4,
    w8 => 8,
    w16 => 16,
    w32 => 32,
    w64 => 64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_instantiations_share_one_operation() {
        let kernels = LaneKernels::<i32>::of::<LaneSub>();

        let lhs = Lane::<i32, 4>::new([10, 20, 30, 40]);
        let rhs = Lane::<i32, 4>::splat(1);
        assert_eq!((kernels.w4)(lhs, rhs).to_array(), [9, 19, 29, 39]);

        let lhs = Lane::<i32, 1>::new([5]);
        let rhs = Lane::<i32, 1>::new([7]);
        assert_eq!((kernels.w1)(lhs, rhs).to_array(), [-2]);
    }

    #[test]
    fn test_kernels_follow_detected_isa() {
        let kernels = LaneKernels::<u8>::of::<LaneAdd>();
        assert_eq!(kernels.isa(), platform::available_isa());
        assert_eq!(LaneKernels::<u8>::portable::<LaneAdd>().isa(), None);
    }

    #[test]
    fn test_isa_kernels_match_portable_kernels() {
        use rand::rngs::StdRng;
        use rand::SeedableRng;

        let mut rng = StdRng::seed_from_u64(42);
        let native = LaneKernels::<i64>::of::<LaneMul>();
        let portable = LaneKernels::<i64>::portable::<LaneMul>();

        for _ in 0..100 {
            let lhs = Lane::<i64, 8>::new(std::array::from_fn(|_| i64::sample(&mut rng)));
            let rhs = Lane::<i64, 8>::new(std::array::from_fn(|_| i64::sample(&mut rng)));
            assert_eq!((native.w8)(lhs, rhs), (portable.w8)(lhs, rhs));

            let lhs = Lane::<i64, 2>::from_slice(&lhs.as_slice()[..2]);
            let rhs = Lane::<i64, 2>::from_slice(&rhs.as_slice()[..2]);
            assert_eq!((native.w2)(lhs, rhs), (portable.w2)(lhs, rhs));
        }
    }

    #[test]
    fn test_float_division_kernel() {
        let kernels = LaneKernels::<f32>::of::<LaneDiv>();
        let lhs = Lane::<f32, 8>::splat(0.25);
        let rhs = Lane::<f32, 8>::splat(0.125);
        assert_eq!((kernels.w8)(lhs, rhs), Lane::splat(2.0));
    }
}
