//! Fuzz target for the register decoders.
//!
//! Tests that, for arbitrary register snapshots:
//! - No panics (in particular, XGETBV is never reached with OSXSAVE clear)
//! - AVX / AVX-512F / NEON decisions match their bit rules
//! - Negative outcomes carry the registers that caused them

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use simdprobe::{
  Outcome,
  testing::{
    CP15_NEON_BIT, FakeCpu, LEAF1_ECX_AVX, LEAF1_ECX_OSXSAVE, LEAF7_EBX_AVX512F, XCR0_AVX_MASK, XCR0_AVX512_MASK,
    decide_avx, decide_avx512, decide_neon_cp15,
  },
};

#[derive(Arbitrary, Debug)]
struct Registers {
  max_leaf: u32,
  leaf1_ecx: u32,
  leaf7_ebx: u32,
  /// `None` models a processor whose XGETBV would fault.
  xcr0: Option<u64>,
  cp15: u32,
}

fuzz_target!(|regs: Registers| {
  // Without a readable XCR0, pretend the OS never enabled XSAVE.
  let ecx = match regs.xcr0 {
    Some(_) => regs.leaf1_ecx,
    None => regs.leaf1_ecx & !LEAF1_ECX_OSXSAVE,
  };

  let mut cpu = FakeCpu::new(regs.max_leaf).with_leaf1_ecx(ecx).with_leaf7_ebx(regs.leaf7_ebx);
  if let Some(xcr0) = regs.xcr0 {
    cpu = cpu.with_xcr0(xcr0);
  }
  let xcr0 = regs.xcr0.unwrap_or(0);
  let osxsave = ecx & LEAF1_ECX_OSXSAVE != 0;

  // ─── AVX ───
  let avx = decide_avx(&cpu);
  let expected =
    regs.max_leaf >= 1 && ecx & LEAF1_ECX_AVX != 0 && osxsave && xcr0 & XCR0_AVX_MASK == XCR0_AVX_MASK;
  assert_eq!(avx.is_supported(), expected, "AVX decision for {regs:?}");
  if let Outcome::OsStateDisabled { xcr0: seen, required } = avx {
    assert_eq!(seen, xcr0);
    assert_eq!(required, XCR0_AVX_MASK);
  }

  // ─── AVX-512F ───
  let avx512 = decide_avx512(&cpu);
  let expected = regs.max_leaf >= 7
    && regs.leaf7_ebx & LEAF7_EBX_AVX512F != 0
    && osxsave
    && xcr0 & XCR0_AVX512_MASK == XCR0_AVX512_MASK;
  assert_eq!(avx512.is_supported(), expected, "AVX-512F decision for {regs:?}");
  if let Outcome::LeafUnavailable { max_leaf, required } = avx512 {
    assert_eq!(max_leaf, regs.max_leaf);
    assert_eq!(required, 7);
  }

  // ─── XGETBV only behind OSXSAVE ───
  if !osxsave {
    assert_eq!(cpu.xgetbv_calls(), 0);
  }

  // ─── NEON ───
  assert_eq!(
    decide_neon_cp15(regs.cp15).is_supported(),
    regs.cp15 & CP15_NEON_BIT != 0
  );
});
