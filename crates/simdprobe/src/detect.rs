//! Native probing.
//!
//! One probe set is compiled per target architecture:
//!
//! | Target | AVX / AVX-512 | NEON |
//! |--------|---------------|------|
//! | x86, x86_64 | CPUID + XGETBV | [`ForeignArch`](Outcome::ForeignArch) |
//! | aarch64 | [`ForeignArch`](Outcome::ForeignArch) | [`Baseline`](Outcome::Baseline) |
//! | arm | [`ForeignArch`](Outcome::ForeignArch) | CP15 read |
//! | anything else | [`ForeignArch`](Outcome::ForeignArch) | [`ForeignArch`](Outcome::ForeignArch) |
//!
//! Under Miri no instruction is issued and probes report
//! [`Interpreted`](Outcome::Interpreted); the aarch64 NEON baseline needs no
//! instruction and is reported as usual.
//!
//! Nothing is cached: every call re-issues the probe.

use crate::{Extension, Outcome};

mod arm;
mod proptests;
mod x86;


#[cfg(any(test, feature = "testing"))]
pub use arm::{CP15_NEON_BIT, decide_neon_cp15};
#[cfg(any(test, feature = "testing"))]
pub use x86::{
  Cpuid, LEAF1_ECX_AVX, LEAF1_ECX_OSXSAVE, LEAF7_EBX_AVX512F, Leaf, XCR0_AVX_MASK, XCR0_AVX512_MASK, decide_avx,
  decide_avx512,
};

/// Probe AVX on the executing processor.
#[inline]
pub(crate) fn avx() -> Outcome {
  #[cfg(miri)]
  let outcome = Outcome::Interpreted;
  #[cfg(all(not(miri), any(target_arch = "x86", target_arch = "x86_64")))]
  let outcome = x86::decide_avx(&x86::Native);
  #[cfg(all(not(miri), not(any(target_arch = "x86", target_arch = "x86_64"))))]
  let outcome = Outcome::ForeignArch;

  report(Extension::Avx, outcome)
}

/// Probe AVX-512F on the executing processor.
#[inline]
pub(crate) fn avx512() -> Outcome {
  #[cfg(miri)]
  let outcome = Outcome::Interpreted;
  #[cfg(all(not(miri), any(target_arch = "x86", target_arch = "x86_64")))]
  let outcome = x86::decide_avx512(&x86::Native);
  #[cfg(all(not(miri), not(any(target_arch = "x86", target_arch = "x86_64"))))]
  let outcome = Outcome::ForeignArch;

  report(Extension::Avx512, outcome)
}

/// Probe NEON on the executing processor.
#[inline]
pub(crate) fn neon() -> Outcome {
  #[cfg(target_arch = "aarch64")]
  let outcome = Outcome::Baseline;
  #[cfg(all(target_arch = "arm", miri))]
  let outcome = Outcome::Interpreted;
  #[cfg(all(target_arch = "arm", not(miri)))]
  let outcome = arm::decide_neon_cp15(arm::read_cp15());
  #[cfg(not(any(target_arch = "aarch64", target_arch = "arm")))]
  let outcome = Outcome::ForeignArch;

  report(Extension::Neon, outcome)
}

/// Hand the outcome back, logging it when `diag` is enabled.
#[inline(always)]
fn report(extension: Extension, outcome: Outcome) -> Outcome {
  #[cfg(feature = "diag")]
  log::debug!(target: "simdprobe", "{extension}: {outcome}");
  #[cfg(not(feature = "diag"))]
  let _ = extension;

  outcome
}
