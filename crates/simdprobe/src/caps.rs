//! Extension identifiers and probe snapshots.
//!
//! [`Extension`] names one of the three probed instruction sets.
//! [`Extensions`] is a value-type snapshot of all three, taken by
//! [`Extensions::probe()`] and owned by the caller.

use core::{fmt, str::FromStr};

use crate::ParseExtensionError;

// ─────────────────────────────────────────────────────────────────────────────
// Extension
// ─────────────────────────────────────────────────────────────────────────────

/// A SIMD instruction-set extension this crate can probe.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Extension {
  /// x86 Advanced Vector Extensions (256-bit YMM registers).
  Avx,
  /// x86 AVX-512 Foundation (512-bit ZMM registers + opmasks).
  Avx512,
  /// ARM Advanced SIMD (128-bit Q registers).
  Neon,
}

impl Extension {
  /// Every probed extension, in declaration order.
  pub const ALL: [Self; 3] = [Self::Avx, Self::Avx512, Self::Neon];

  /// Display name.
  #[inline]
  #[must_use]
  pub const fn name(self) -> &'static str {
    match self {
      Self::Avx => "AVX",
      Self::Avx512 => "AVX-512",
      Self::Neon => "NEON",
    }
  }

  /// Vector register width in bits.
  #[inline]
  #[must_use]
  pub const fn register_bits(self) -> u32 {
    match self {
      Self::Avx => 256,
      Self::Avx512 => 512,
      Self::Neon => 128,
    }
  }
}

impl fmt::Display for Extension {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.name())
  }
}

impl FromStr for Extension {
  type Err = ParseExtensionError;

  /// Case-insensitive. Accepts `avx`/`avx256`, `avx512`/`avx-512`, `neon`.
  fn from_str(s: &str) -> Result<Self, Self::Err> {
    const NAMES: [(&str, Extension); 5] = [
      ("avx", Extension::Avx),
      ("avx256", Extension::Avx),
      ("avx512", Extension::Avx512),
      ("avx-512", Extension::Avx512),
      ("neon", Extension::Neon),
    ];

    NAMES
      .iter()
      .find(|(name, _)| name.eq_ignore_ascii_case(s.trim()))
      .map(|&(_, ext)| ext)
      .ok_or(ParseExtensionError)
  }
}

// ─────────────────────────────────────────────────────────────────────────────
// Extensions
// ─────────────────────────────────────────────────────────────────────────────

/// Support for every [`Extension`], probed once.
///
/// The crate never caches probe results; this is the value callers keep
/// instead.
///
/// # Example
///
/// ```
/// use simdprobe::{Extension, Extensions};
///
/// let ext = Extensions::probe();
/// match ext.widest() {
///   Some(Extension::Avx512) => { /* 512-bit kernel */ }
///   Some(Extension::Avx) => { /* 256-bit kernel */ }
///   Some(Extension::Neon) => { /* 128-bit kernel */ }
///   None => { /* scalar */ }
/// }
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Extensions {
  /// [`has_avx()`](crate::has_avx)
  pub avx: bool,
  /// [`has_avx512()`](crate::has_avx512)
  pub avx512: bool,
  /// [`has_neon()`](crate::has_neon)
  pub neon: bool,
}

impl Extensions {
  /// Nothing supported.
  pub const NONE: Self = Self {
    avx: false,
    avx512: false,
    neon: false,
  };

  /// Run all three probes.
  #[must_use]
  pub fn probe() -> Self {
    Self {
      avx: crate::has_avx(),
      avx512: crate::has_avx512(),
      neon: crate::has_neon(),
    }
  }

  /// Is `extension` marked supported in this snapshot?
  #[inline]
  #[must_use]
  pub const fn has(self, extension: Extension) -> bool {
    match extension {
      Extension::Avx => self.avx,
      Extension::Avx512 => self.avx512,
      Extension::Neon => self.neon,
    }
  }

  /// `true` if no extension is supported.
  #[inline]
  #[must_use]
  pub const fn is_empty(self) -> bool {
    !(self.avx || self.avx512 || self.neon)
  }

  /// Supported extensions, in [`Extension::ALL`] order.
  pub fn iter(self) -> impl Iterator<Item = Extension> {
    Extension::ALL.into_iter().filter(move |&ext| self.has(ext))
  }

  /// The supported extension with the widest registers.
  #[must_use]
  pub fn widest(self) -> Option<Extension> {
    self.iter().max_by_key(|ext| ext.register_bits())
  }
}

impl fmt::Display for Extensions {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if self.is_empty() {
      return f.write_str("none");
    }
    for (i, ext) in self.iter().enumerate() {
      if i > 0 {
        f.write_str(", ")?;
      }
      f.write_str(ext.name())?;
    }
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use std::{string::ToString, vec::Vec};

  use super::*;

  #[test]
  fn test_parse_names() {
    assert_eq!("avx".parse(), Ok(Extension::Avx));
    assert_eq!("AVX256".parse(), Ok(Extension::Avx));
    assert_eq!("avx512".parse(), Ok(Extension::Avx512));
    assert_eq!("AVX-512".parse(), Ok(Extension::Avx512));
    assert_eq!(" Neon ".parse(), Ok(Extension::Neon));
    assert_eq!("sse2".parse::<Extension>(), Err(ParseExtensionError));
    assert_eq!("".parse::<Extension>(), Err(ParseExtensionError));
  }

  #[test]
  fn test_display_round_trips_through_parse() {
    for ext in Extension::ALL {
      assert_eq!(ext.to_string().parse(), Ok(ext));
    }
  }

  #[test]
  fn test_snapshot_has() {
    let ext = Extensions {
      avx: true,
      ..Extensions::NONE
    };
    assert!(ext.has(Extension::Avx));
    assert!(!ext.has(Extension::Avx512));
    assert!(!ext.has(Extension::Neon));
    assert!(!ext.is_empty());
    assert!(Extensions::NONE.is_empty());
    assert_eq!(Extensions::default(), Extensions::NONE);
  }

  #[test]
  fn test_widest_prefers_register_width() {
    let x86 = Extensions {
      avx: true,
      avx512: true,
      neon: false,
    };
    assert_eq!(x86.widest(), Some(Extension::Avx512));

    let arm = Extensions {
      neon: true,
      ..Extensions::NONE
    };
    assert_eq!(arm.widest(), Some(Extension::Neon));
    assert_eq!(Extensions::NONE.widest(), None);
  }

  #[test]
  fn test_snapshot_display() {
    assert_eq!(Extensions::NONE.to_string(), "none");

    let both = Extensions {
      avx: true,
      avx512: true,
      neon: false,
    };
    assert_eq!(both.to_string(), "AVX, AVX-512");
    assert_eq!(both.iter().collect::<Vec<_>>(), [Extension::Avx, Extension::Avx512]);
  }

  #[test]
  #[cfg(not(miri))]
  fn test_probe_matches_queries() {
    let ext = Extensions::probe();
    assert_eq!(ext.avx, crate::has_avx());
    assert_eq!(ext.avx512, crate::has_avx512());
    assert_eq!(ext.neon, crate::has_neon());
  }
}
