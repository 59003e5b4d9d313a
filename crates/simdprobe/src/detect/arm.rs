// ARM probing
// ─────────────────────────────────────────────────────────────────────────────
//
// aarch64: Advanced SIMD is part of the base ISA, nothing to probe.
// arm (32-bit): NEON is optional; read CP15 c1/c0/2 and test bit 12.

#![cfg_attr(not(any(target_arch = "arm", test, feature = "testing")), allow(dead_code))]

use crate::Outcome;

/// Bit of the CP15 c1/c0/2 register that reports NEON.
pub const CP15_NEON_BIT: u32 = 1 << 12;

/// Decide NEON support from the value of CP15 c1/c0/2.
#[inline]
pub fn decide_neon_cp15(register: u32) -> Outcome {
  if register & CP15_NEON_BIT != 0 {
    Outcome::Supported
  } else {
    Outcome::CpuFlagClear
  }
}

/// Read CP15 c1/c0/2 with `mrc`.
#[cfg(target_arch = "arm")]
#[allow(unsafe_code)] // inline asm
#[inline]
pub(crate) fn read_cp15() -> u32 {
  let value: u32;
  // SAFETY: `mrc` moves a coprocessor register into a general-purpose
  // register; no memory, stack or flags are touched.
  unsafe {
    core::arch::asm!(
      "mrc p15, 0, {value}, c1, c0, 2",
      value = out(reg) value,
      options(nomem, nostack, preserves_flags),
    );
  }
  value
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_bit_12_decides() {
    assert_eq!(decide_neon_cp15(CP15_NEON_BIT), Outcome::Supported);
    assert_eq!(decide_neon_cp15(u32::MAX), Outcome::Supported);
    assert_eq!(decide_neon_cp15(0), Outcome::CpuFlagClear);
    assert_eq!(decide_neon_cp15(!CP15_NEON_BIT), Outcome::CpuFlagClear);
  }

  #[test]
  fn test_neighbouring_bits_ignored() {
    assert_eq!(decide_neon_cp15(1 << 11 | 1 << 13), Outcome::CpuFlagClear);
    assert_eq!(decide_neon_cp15(0x00F0_1000), Outcome::Supported);
  }
}
