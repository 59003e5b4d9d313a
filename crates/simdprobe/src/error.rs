//! Error types.
//!
//! The queries themselves never fail. Errors only come from [`require()`]
//! and from parsing an [`Extension`] name.
//!
//! [`require()`]: crate::require

use core::fmt;

use crate::{Extension, Outcome};

/// A required extension is not usable on this machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UnsupportedExtension {
  extension: Extension,
  outcome: Outcome,
}

impl UnsupportedExtension {
  #[inline]
  pub(crate) const fn new(extension: Extension, outcome: Outcome) -> Self {
    Self { extension, outcome }
  }

  /// The extension that was required.
  #[inline]
  #[must_use]
  pub const fn extension(&self) -> Extension {
    self.extension
  }

  /// What the probe observed.
  #[inline]
  #[must_use]
  pub const fn outcome(&self) -> Outcome {
    self.outcome
  }
}

impl fmt::Display for UnsupportedExtension {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{} unavailable: {}", self.extension, self.outcome)
  }
}

impl core::error::Error for UnsupportedExtension {}

/// A string did not name a known [`Extension`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[non_exhaustive]
pub struct ParseExtensionError;

impl fmt::Display for ParseExtensionError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str("unknown SIMD extension (expected avx, avx512 or neon)")
  }
}

impl core::error::Error for ParseExtensionError {}

#[cfg(test)]
mod tests {
  use std::string::ToString;

  use super::*;

  #[test]
  fn test_unsupported_display() {
    let err = UnsupportedExtension::new(Extension::Avx512, Outcome::CpuFlagClear);
    assert_eq!(err.to_string(), "AVX-512 unavailable: not advertised by the processor");
    assert_eq!(err.extension(), Extension::Avx512);
    assert_eq!(err.outcome(), Outcome::CpuFlagClear);
  }

  #[test]
  fn test_errors_are_error_trait_objects() {
    fn assert_error<E: core::error::Error + Send + Sync + 'static>() {}
    assert_error::<UnsupportedExtension>();
    assert_error::<ParseExtensionError>();
  }
}
