//! SIMD extension probing for code-path selection.
//!
//! This crate answers one question: *which wide-vector instruction sets can the
//! running processor execute right now?* It covers three extensions:
//!
//! | Extension | Query | Probe |
//! |-----------|-------|-------|
//! | AVX (256-bit) | [`has_avx()`] | CPUID.1:ECX[28] + XCR0[2:1] |
//! | AVX-512F (512-bit) | [`has_avx512()`] | CPUID.7.0:EBX[16] + XCR0[7:5,2:1] |
//! | NEON (ARM) | [`has_neon()`] | mandatory on aarch64, CP15 read on arm |
//!
//! # Usage
//!
//! ```
//! fn sum_scalar(xs: &[f32]) -> f32 {
//!   xs.iter().sum()
//! }
//! fn sum_avx(xs: &[f32]) -> f32 {
//!   sum_scalar(xs) // stand-in for a 256-bit kernel
//! }
//!
//! // Probe once, keep the choice.
//! let sum: fn(&[f32]) -> f32 = if simdprobe::has_avx() { sum_avx } else { sum_scalar };
//! assert_eq!(sum(&[1.0, 2.0]), 3.0);
//! ```
//!
//! # Design
//!
//! 1. **Capability is not enough**: the x86 queries also require the OS to have
//!    enabled save/restore of the wider register state (XCR0), otherwise the
//!    registers are lost across context switches.
//! 2. **Build-time selection**: exactly one probe set is compiled per target
//!    architecture. Queries for a foreign architecture return `false`.
//! 3. **Stateless**: nothing is cached. Callers that query often should store
//!    the result, e.g. via [`Extensions::probe()`].
//! 4. **Total**: no query fails. Every reason a capability cannot be confirmed
//!    is reported as `false`; [`explain()`] tells you which one.

#![no_std]

#[cfg(test)]
extern crate std;

mod caps;
mod detect;
mod error;
mod outcome;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use caps::{Extension, Extensions};
pub use error::{ParseExtensionError, UnsupportedExtension};
pub use outcome::Outcome;

/// Does the processor support AVX, with YMM state enabled by the OS?
///
/// Always `false` on non-x86 targets.
#[inline]
#[must_use]
pub fn has_avx() -> bool {
  detect::avx().is_supported()
}

/// Does the processor support AVX-512 Foundation, with opmask and ZMM state
/// enabled by the OS?
///
/// Always `false` on non-x86 targets.
#[inline]
#[must_use]
pub fn has_avx512() -> bool {
  detect::avx512().is_supported()
}

/// Does the processor support NEON (Advanced SIMD)?
///
/// Always `true` on aarch64, always `false` off ARM.
#[inline]
#[must_use]
pub fn has_neon() -> bool {
  detect::neon().is_supported()
}

/// Probe `extension` and report why it is or isn't usable.
///
/// Runs the same probe as the matching `has_*` query.
///
/// # Example
///
/// ```
/// use simdprobe::{Extension, explain};
///
/// let outcome = explain(Extension::Avx);
/// assert_eq!(outcome.is_supported(), simdprobe::has_avx());
/// ```
#[must_use]
pub fn explain(extension: Extension) -> Outcome {
  match extension {
    Extension::Avx => detect::avx(),
    Extension::Avx512 => detect::avx512(),
    Extension::Neon => detect::neon(),
  }
}

/// Boolean form of [`explain()`].
#[inline]
#[must_use]
pub fn is_supported(extension: Extension) -> bool {
  explain(extension).is_supported()
}

/// Fail unless `extension` is usable.
///
/// Intended for startup checks in binaries that were told to use a specific
/// vector path and must not silently fall back.
///
/// # Errors
///
/// Returns [`UnsupportedExtension`] carrying the probe [`Outcome`] when the
/// extension cannot be used.
///
/// # Example
///
/// ```
/// use simdprobe::{Extension, require};
///
/// match require(Extension::Neon) {
///   Ok(()) => { /* NEON path */ }
///   Err(err) => assert!(!err.outcome().is_supported()),
/// }
/// ```
pub fn require(extension: Extension) -> Result<(), UnsupportedExtension> {
  let outcome = explain(extension);
  if outcome.is_supported() {
    Ok(())
  } else {
    Err(UnsupportedExtension::new(extension, outcome))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_queries_match_explain() {
    assert_eq!(has_avx(), explain(Extension::Avx).is_supported());
    assert_eq!(has_avx512(), explain(Extension::Avx512).is_supported());
    assert_eq!(has_neon(), explain(Extension::Neon).is_supported());
  }

  #[test]
  fn test_is_supported_dispatch() {
    assert_eq!(is_supported(Extension::Avx), has_avx());
    assert_eq!(is_supported(Extension::Avx512), has_avx512());
    assert_eq!(is_supported(Extension::Neon), has_neon());
  }

  #[test]
  fn test_require_agrees_with_query() {
    for extension in Extension::ALL {
      match require(extension) {
        Ok(()) => assert!(is_supported(extension)),
        Err(err) => {
          assert!(!is_supported(extension));
          assert_eq!(err.extension(), extension);
          assert!(!err.outcome().is_supported());
        }
      }
    }
  }

  #[test]
  fn test_queries_deterministic() {
    for _ in 0..8 {
      assert_eq!(has_avx(), has_avx());
      assert_eq!(has_avx512(), has_avx512());
      assert_eq!(has_neon(), has_neon());
    }
  }
}
