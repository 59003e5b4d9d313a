// x86 / x86_64 probing
// ─────────────────────────────────────────────────────────────────────────────
//
// Decoding is kept apart from instruction issuance: `decide_*` read registers
// through the `Cpuid` trait, so they compile on every target and can be driven
// by a stub. Only `Native` emits CPUID/XGETBV, and only on x86 targets.

#![cfg_attr(
  not(any(target_arch = "x86", target_arch = "x86_64", test, feature = "testing")),
  allow(dead_code)
)]

use crate::Outcome;

/// Output registers of one CPUID invocation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Leaf {
  /// EAX (first output register).
  pub eax: u32,
  /// EBX (second output register).
  pub ebx: u32,
  /// ECX (third output register).
  pub ecx: u32,
  /// EDX (fourth output register).
  pub edx: u32,
}

/// Register reads a probe needs: CPUID and XGETBV.
pub trait Cpuid {
  /// CPUID with `leaf` in EAX and `subleaf` in ECX.
  fn cpuid(&self, leaf: u32, subleaf: u32) -> Leaf;

  /// XGETBV: read extended control register `xcr`.
  ///
  /// Callers must only invoke this after observing CPUID.1:ECX.OSXSAVE.
  fn xgetbv(&self, xcr: u32) -> u64;
}

/// CPUID.1:ECX bit 27: OS has set CR4.OSXSAVE, XGETBV is usable.
pub const LEAF1_ECX_OSXSAVE: u32 = 1 << 27;
/// CPUID.1:ECX bit 28: AVX.
pub const LEAF1_ECX_AVX: u32 = 1 << 28;
/// CPUID.7.0:EBX bit 16: AVX-512 Foundation.
pub const LEAF7_EBX_AVX512F: u32 = 1 << 16;

/// XCR0 bits 1-2: XMM + YMM_Hi128 state.
pub const XCR0_AVX_MASK: u64 = 0x6;
/// XCR0 bits 1-2 and 5-7: adds opmask, ZMM_Hi256 and Hi16_ZMM state.
pub const XCR0_AVX512_MASK: u64 = 0xE6;

/// Decide AVX support from CPUID leaves 0/1 and XCR0.
pub fn decide_avx<C: Cpuid + ?Sized>(cpu: &C) -> Outcome {
  const LEAF: u32 = 1;

  let max_leaf = cpu.cpuid(0, 0).eax;
  if max_leaf < LEAF {
    return Outcome::LeafUnavailable {
      max_leaf,
      required: LEAF,
    };
  }

  let leaf1 = cpu.cpuid(1, 0);
  if leaf1.ecx & LEAF1_ECX_AVX == 0 {
    return Outcome::CpuFlagClear;
  }

  os_state(cpu, leaf1, XCR0_AVX_MASK)
}

/// Decide AVX-512F support from CPUID leaves 0/7.0 and XCR0.
pub fn decide_avx512<C: Cpuid + ?Sized>(cpu: &C) -> Outcome {
  const LEAF: u32 = 7;

  let max_leaf = cpu.cpuid(0, 0).eax;
  if max_leaf < LEAF {
    return Outcome::LeafUnavailable {
      max_leaf,
      required: LEAF,
    };
  }

  if cpu.cpuid(LEAF, 0).ebx & LEAF7_EBX_AVX512F == 0 {
    return Outcome::CpuFlagClear;
  }

  // OSXSAVE lives in leaf 1, which every CPU reaching leaf 7 implements.
  os_state(cpu, cpu.cpuid(1, 0), XCR0_AVX512_MASK)
}

/// Check that the OS saves/restores every state component in `required`.
fn os_state<C: Cpuid + ?Sized>(cpu: &C, leaf1: Leaf, required: u64) -> Outcome {
  // XGETBV is #UD without CR4.OSXSAVE.
  if leaf1.ecx & LEAF1_ECX_OSXSAVE == 0 {
    return Outcome::OsXsaveDisabled;
  }

  let xcr0 = cpu.xgetbv(0);
  if xcr0 & required == required {
    Outcome::Supported
  } else {
    Outcome::OsStateDisabled { xcr0, required }
  }
}

// ─────────────────────────────────────────────────────────────────────────────
// Native instruction issuance
// ─────────────────────────────────────────────────────────────────────────────

/// The executing processor.
#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct Native;

#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
#[allow(unsafe_code)] // CPUID/XGETBV intrinsics
impl Cpuid for Native {
  #[inline]
  #[allow(unused_unsafe)] // `__cpuid_count` is a safe fn on newer toolchains
  fn cpuid(&self, leaf: u32, subleaf: u32) -> Leaf {
    #[cfg(target_arch = "x86")]
    use core::arch::x86::__cpuid_count;
    #[cfg(target_arch = "x86_64")]
    use core::arch::x86_64::__cpuid_count;

    // SAFETY: CPUID is present on every processor this target runs on.
    let r = unsafe { __cpuid_count(leaf, subleaf) };

    Leaf {
      eax: r.eax,
      ebx: r.ebx,
      ecx: r.ecx,
      edx: r.edx,
    }
  }

  #[inline]
  fn xgetbv(&self, xcr: u32) -> u64 {
    #[cfg(target_arch = "x86")]
    use core::arch::x86::_xgetbv;
    #[cfg(target_arch = "x86_64")]
    use core::arch::x86_64::_xgetbv;

    // SAFETY: `os_state` only calls this after seeing OSXSAVE set, which
    // guarantees XGETBV is enabled. It reads a register and touches no memory.
    unsafe { _xgetbv(xcr) }
  }
}
