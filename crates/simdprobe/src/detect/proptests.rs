//! Property tests for the register decoders.
//!
//! Each decision sequence is checked against its closed-form bit rule over
//! arbitrary register snapshots, using [`FakeCpu`] in place of the processor.

#![cfg(all(test, not(miri)))]

use proptest::prelude::*;

use super::{arm, x86};
use crate::{Outcome, testing::FakeCpu};

fn avx_rule(max_leaf: u32, ecx: u32, xcr0: u64) -> bool {
  max_leaf >= 1
    && ecx & x86::LEAF1_ECX_AVX != 0
    && ecx & x86::LEAF1_ECX_OSXSAVE != 0
    && xcr0 & 0b110 == 0b110
}

fn avx512_rule(max_leaf: u32, ecx: u32, ebx: u32, xcr0: u64) -> bool {
  max_leaf >= 7
    && ebx & x86::LEAF7_EBX_AVX512F != 0
    && ecx & x86::LEAF1_ECX_OSXSAVE != 0
    && xcr0 & 0xE6 == 0xE6
}

/// XCR0 values concentrated around the interesting low byte.
fn xcr0_strategy() -> impl Strategy<Value = u64> {
  prop_oneof![0u64..=0xFF, any::<u64>()]
}

proptest! {
  #![proptest_config(ProptestConfig::with_cases(1024))]

  #[test]
  fn avx_matches_bit_rule(max_leaf in 0u32..=0x20, ecx in any::<u32>(), xcr0 in xcr0_strategy()) {
    let cpu = FakeCpu::new(max_leaf).with_leaf1_ecx(ecx).with_xcr0(xcr0);
    prop_assert_eq!(x86::decide_avx(&cpu).is_supported(), avx_rule(max_leaf, ecx, xcr0));
  }

  #[test]
  fn avx512_matches_bit_rule(
    max_leaf in 0u32..=0x20,
    ecx in any::<u32>(),
    ebx in any::<u32>(),
    xcr0 in xcr0_strategy(),
  ) {
    let cpu = FakeCpu::new(max_leaf).with_leaf1_ecx(ecx).with_leaf7_ebx(ebx).with_xcr0(xcr0);
    prop_assert_eq!(
      x86::decide_avx512(&cpu).is_supported(),
      avx512_rule(max_leaf, ecx, ebx, xcr0)
    );
  }

  #[test]
  fn xcr0_read_at_most_once_and_only_with_osxsave(
    max_leaf in 0u32..=0x20,
    ecx in any::<u32>(),
    ebx in any::<u32>(),
    xcr0 in xcr0_strategy(),
  ) {
    let cpu = FakeCpu::new(max_leaf).with_leaf1_ecx(ecx).with_leaf7_ebx(ebx).with_xcr0(xcr0);
    let _ = x86::decide_avx(&cpu);
    let _ = x86::decide_avx512(&cpu);

    prop_assert!(cpu.xgetbv_calls() <= 2);
    if ecx & x86::LEAF1_ECX_OSXSAVE == 0 {
      prop_assert_eq!(cpu.xgetbv_calls(), 0);
    }
  }

  #[test]
  fn osxsave_clear_never_faults(max_leaf in 0u32..=0x20, ecx in any::<u32>(), ebx in any::<u32>()) {
    // No XCR0 configured: reaching XGETBV would panic.
    let ecx = ecx & !x86::LEAF1_ECX_OSXSAVE;
    let cpu = FakeCpu::new(max_leaf).with_leaf1_ecx(ecx).with_leaf7_ebx(ebx);
    prop_assert!(!x86::decide_avx(&cpu).is_supported());
    prop_assert!(!x86::decide_avx512(&cpu).is_supported());
  }

  #[test]
  fn state_refusal_reports_observed_xcr0(ecx in any::<u32>(), xcr0 in xcr0_strategy()) {
    let ecx = ecx | x86::LEAF1_ECX_AVX | x86::LEAF1_ECX_OSXSAVE;
    let cpu = FakeCpu::new(13).with_leaf1_ecx(ecx).with_xcr0(xcr0);
    match x86::decide_avx(&cpu) {
      Outcome::Supported => prop_assert_eq!(xcr0 & x86::XCR0_AVX_MASK, x86::XCR0_AVX_MASK),
      Outcome::OsStateDisabled { xcr0: seen, required } => {
        prop_assert_eq!(seen, xcr0);
        prop_assert_eq!(required, x86::XCR0_AVX_MASK);
      }
      other => prop_assert!(false, "unexpected outcome {:?}", other),
    }
  }

  #[test]
  fn neon_matches_bit_12(register in any::<u32>()) {
    prop_assert_eq!(arm::decide_neon_cp15(register).is_supported(), register & (1 << 12) != 0);
  }
}
