//! Register stubs for exercising the probe logic without the real processor.
//!
//! Available in test builds or with the `testing` feature:
//! ```toml
//! [dev-dependencies]
//! simdprobe = { version = "...", features = ["testing"] }
//! ```
//!
//! The `decide_*` functions are the exact decision sequences the native
//! queries run; [`FakeCpu`] feeds them chosen register values.
//!
//! ```ignore
//! use simdprobe::testing::{FakeCpu, LEAF1_ECX_AVX, LEAF1_ECX_OSXSAVE, decide_avx};
//!
//! let cpu = FakeCpu::new(13)
//!   .with_leaf1_ecx(LEAF1_ECX_AVX | LEAF1_ECX_OSXSAVE)
//!   .with_xcr0(0b100);
//! assert!(!decide_avx(&cpu).is_supported());
//! ```

use core::cell::Cell;

pub use crate::detect::{
  CP15_NEON_BIT, Cpuid, LEAF1_ECX_AVX, LEAF1_ECX_OSXSAVE, LEAF7_EBX_AVX512F, Leaf, XCR0_AVX_MASK, XCR0_AVX512_MASK,
  decide_avx, decide_avx512, decide_neon_cp15,
};

/// A scripted x86 processor.
///
/// Leaf 0 reports `max_leaf` in EAX. Leaves 1 and 7 (sub-leaf 0) return the
/// configured registers; every other leaf reads as zero. XGETBV returns the
/// configured XCR0 and panics if none was set, standing in for the #UD a real
/// processor raises when XSAVE is disabled.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FakeCpu {
  max_leaf: u32,
  leaf1: Leaf,
  leaf7: Leaf,
  xcr0: Option<u64>,
  xgetbv_calls: Cell<u32>,
}

impl FakeCpu {
  /// A processor whose highest basic leaf is `max_leaf`, with every feature
  /// bit clear and no readable XCR0.
  #[must_use]
  pub fn new(max_leaf: u32) -> Self {
    Self {
      max_leaf,
      ..Self::default()
    }
  }

  /// Set ECX of leaf 1.
  #[must_use]
  pub fn with_leaf1_ecx(mut self, ecx: u32) -> Self {
    self.leaf1.ecx = ecx;
    self
  }

  /// Set EBX of leaf 7, sub-leaf 0.
  #[must_use]
  pub fn with_leaf7_ebx(mut self, ebx: u32) -> Self {
    self.leaf7.ebx = ebx;
    self
  }

  /// Make XGETBV(0) return `xcr0`.
  #[must_use]
  pub fn with_xcr0(mut self, xcr0: u64) -> Self {
    self.xcr0 = Some(xcr0);
    self
  }

  /// Number of XGETBV executions so far.
  #[must_use]
  pub fn xgetbv_calls(&self) -> u32 {
    self.xgetbv_calls.get()
  }
}

impl Cpuid for FakeCpu {
  fn cpuid(&self, leaf: u32, subleaf: u32) -> Leaf {
    match (leaf, subleaf) {
      (0, _) => Leaf {
        eax: self.max_leaf,
        ..Leaf::default()
      },
      (1, _) => self.leaf1,
      (7, 0) => self.leaf7,
      _ => Leaf::default(),
    }
  }

  fn xgetbv(&self, xcr: u32) -> u64 {
    self.xgetbv_calls.set(self.xgetbv_calls.get().saturating_add(1));
    assert_eq!(xcr, 0, "only XCR0 is defined");
    match self.xcr0 {
      Some(xcr0) => xcr0,
      None => panic!("XGETBV executed with XSAVE disabled"),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_leaf_routing() {
    let cpu = FakeCpu::new(7).with_leaf1_ecx(0xAB).with_leaf7_ebx(0xCD);
    assert_eq!(cpu.cpuid(0, 0).eax, 7);
    assert_eq!(cpu.cpuid(1, 0).ecx, 0xAB);
    assert_eq!(cpu.cpuid(7, 0).ebx, 0xCD);
    assert_eq!(cpu.cpuid(7, 1), Leaf::default());
    assert_eq!(cpu.cpuid(0xD, 0), Leaf::default());
  }

  #[test]
  fn test_xgetbv_counts_reads() {
    let cpu = FakeCpu::new(1).with_xcr0(0x7);
    assert_eq!(cpu.xgetbv_calls(), 0);
    assert_eq!(cpu.xgetbv(0), 0x7);
    assert_eq!(cpu.xgetbv(0), 0x7);
    assert_eq!(cpu.xgetbv_calls(), 2);
  }

  #[test]
  #[should_panic(expected = "XSAVE disabled")]
  fn test_xgetbv_without_xcr0_panics() {
    let _ = FakeCpu::new(1).xgetbv(0);
  }
}
