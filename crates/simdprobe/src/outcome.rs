//! Probe outcomes.
//!
//! A query's boolean answer folds several distinct situations into `false`.
//! [`Outcome`] keeps them apart for diagnostics.

use core::fmt;

/// Why a probe answered the way it did.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum Outcome {
  /// The processor advertises the extension and the OS manages its state.
  Supported,
  /// The extension is part of the architecture baseline; nothing was probed.
  Baseline,
  /// CPUID does not reach the leaf that carries the feature bit.
  LeafUnavailable {
    /// Highest basic leaf reported by CPUID leaf 0.
    max_leaf: u32,
    /// Leaf the feature bit lives in.
    required: u32,
  },
  /// The processor does not advertise the extension.
  CpuFlagClear,
  /// The OS has not enabled XSAVE (CPUID.1:ECX.OSXSAVE clear), so XCR0 cannot
  /// be read and no extended register state is managed.
  OsXsaveDisabled,
  /// The processor has the extension, but the OS does not save/restore all of
  /// the register state it needs.
  OsStateDisabled {
    /// Value read from XCR0.
    xcr0: u64,
    /// State-component mask the extension needs.
    required: u64,
  },
  /// The extension does not exist on this build's target architecture.
  ForeignArch,
  /// Running under an interpreter (Miri) that cannot issue the probe.
  Interpreted,
}

impl Outcome {
  /// `true` for [`Supported`](Self::Supported) and [`Baseline`](Self::Baseline).
  #[inline]
  #[must_use]
  pub const fn is_supported(self) -> bool {
    matches!(self, Self::Supported | Self::Baseline)
  }
}

impl fmt::Display for Outcome {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match *self {
      Self::Supported => f.write_str("supported"),
      Self::Baseline => f.write_str("supported (architectural baseline)"),
      Self::LeafUnavailable { max_leaf, required } => {
        write!(f, "CPUID leaf {required:#x} unavailable (highest leaf {max_leaf:#x})")
      }
      Self::CpuFlagClear => f.write_str("not advertised by the processor"),
      Self::OsXsaveDisabled => f.write_str("XSAVE not enabled by the OS"),
      Self::OsStateDisabled { xcr0, required } => {
        write!(f, "register state not enabled by the OS (XCR0 {xcr0:#x}, need {required:#x})")
      }
      Self::ForeignArch => f.write_str("not applicable to this architecture"),
      Self::Interpreted => f.write_str("not probed under an interpreter"),
    }
  }
}

#[cfg(test)]
mod tests {
  use std::string::ToString;

  use super::*;

  #[test]
  fn test_only_positive_variants_are_supported() {
    assert!(Outcome::Supported.is_supported());
    assert!(Outcome::Baseline.is_supported());

    let negatives = [
      Outcome::LeafUnavailable { max_leaf: 0, required: 1 },
      Outcome::CpuFlagClear,
      Outcome::OsXsaveDisabled,
      Outcome::OsStateDisabled { xcr0: 0x3, required: 0x6 },
      Outcome::ForeignArch,
      Outcome::Interpreted,
    ];
    for outcome in negatives {
      assert!(!outcome.is_supported(), "{outcome:?} must not count as supported");
    }
  }

  #[test]
  fn test_display_includes_register_values() {
    let leaf = Outcome::LeafUnavailable { max_leaf: 0x5, required: 0x7 }.to_string();
    assert_eq!(leaf, "CPUID leaf 0x7 unavailable (highest leaf 0x5)");

    let state = Outcome::OsStateDisabled { xcr0: 0x7, required: 0xe6 }.to_string();
    assert!(state.contains("0x7"));
    assert!(state.contains("0xe6"));
  }
}
