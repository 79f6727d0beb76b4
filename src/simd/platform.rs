//! Run-time discovery of the host's vector register width.
//!
//! The lane width of a kind is the register width divided by the element
//! size, e.g. 8 × i32 or 4 × f64 on AVX2. The build script also records the
//! widest unit it saw on the build host; a mismatch between the two is
//! logged, since it means the binary was built elsewhere.

use std::fmt;
use std::mem::size_of;

use log::{debug, warn};

use crate::error::{platform_error, Result};
use crate::kind::NumericKind;
use crate::simd::lane::LaneWidth;
use crate::simd::traits::Element;

/// Vector instruction sets the benchmark knows the register width of.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Isa {
    Avx512,
    Avx2,
    Sse2,
    Neon,
}

impl Isa {
    pub fn register_bytes(self) -> usize {
        match self {
            Isa::Avx512 => 64,
            Isa::Avx2 => 32,
            Isa::Sse2 | Isa::Neon => 16,
        }
    }

    /// Elements of `kind` per register.
    pub fn lane_width(self, kind: NumericKind) -> Result<LaneWidth> {
        LaneWidth::new(self.register_bytes() / kind.byte_width())
    }

    pub fn name(self) -> &'static str {
        match self {
            Isa::Avx512 => "AVX-512",
            Isa::Avx2 => "AVX2",
            Isa::Sse2 => "SSE2",
            Isa::Neon => "NEON",
        }
    }
}

impl fmt::Display for Isa {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}-bit)", self.name(), self.register_bytes() * 8)
    }
}

/// Widest vector unit seen by the build script on the build host, if any.
#[cfg(avx512)]
pub const BUILD_ISA: Option<Isa> = Some(Isa::Avx512);
#[cfg(avx2)]
pub const BUILD_ISA: Option<Isa> = Some(Isa::Avx2);
#[cfg(sse)]
pub const BUILD_ISA: Option<Isa> = Some(Isa::Sse2);
#[cfg(neon)]
pub const BUILD_ISA: Option<Isa> = Some(Isa::Neon);
#[cfg(not(any(avx512, avx2, sse, neon)))]
pub const BUILD_ISA: Option<Isa> = None;

// AVX-512 lanes of 8/16-bit and 64-bit integers need the BW and DQ extensions
#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
fn detect() -> Option<Isa> {
    if is_x86_feature_detected!("avx512f")
        && is_x86_feature_detected!("avx512bw")
        && is_x86_feature_detected!("avx512dq")
    {
        Some(Isa::Avx512)
    } else if is_x86_feature_detected!("avx2") {
        Some(Isa::Avx2)
    } else if is_x86_feature_detected!("sse2") {
        Some(Isa::Sse2)
    } else {
        None
    }
}

#[cfg(target_arch = "aarch64")]
fn detect() -> Option<Isa> {
    if std::arch::is_aarch64_feature_detected!("neon") {
        Some(Isa::Neon)
    } else {
        None
    }
}

#[cfg(not(any(target_arch = "x86", target_arch = "x86_64", target_arch = "aarch64")))]
fn detect() -> Option<Isa> {
    None
}

/// Widest vector unit available to this process, without logging.
pub fn available_isa() -> Option<Isa> {
    detect()
}

/// Widest vector unit available to this process.
pub fn detect_isa() -> Result<Isa> {
    let isa = available_isa().ok_or_else(|| {
        platform_error(format!(
            "no supported vector unit on {}",
            std::env::consts::ARCH
        ))
    })?;

    if let Some(build_isa) = BUILD_ISA {
        if build_isa != isa {
            warn!("vector unit differs from build host: running on {isa}, built on {build_isa}");
        }
    }

    debug!("detected vector unit {isa}");
    Ok(isa)
}

/// Elements of `kind` per vector register on this host.
pub fn lane_width_for(kind: NumericKind) -> Result<LaneWidth> {
    detect_isa()?.lane_width(kind)
}

/// Elements of `T` per vector register on this host.
pub fn lane_width<T: Element>() -> Result<LaneWidth> {
    debug_assert_eq!(T::KIND.byte_width(), size_of::<T>());
    lane_width_for(T::KIND)
}
