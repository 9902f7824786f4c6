//! Opaque edge fingerprints compared across module boundaries

use crate::io::error::{Result, WaveError};
use std::fmt;
use std::str::FromStr;

/// Width of a fingerprint in bytes
pub const FINGERPRINT_LEN: usize = 8;

/// Value that must match on both sides of a shared edge
///
/// Equality is byte-wise. No ordering is meaningful. Fingerprints derived
/// from images hold eight ASCII hex digits, which is also how they print.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Fingerprint([u8; FINGERPRINT_LEN]);

impl Fingerprint {
    /// Wrap raw bytes
    pub const fn new(bytes: [u8; FINGERPRINT_LEN]) -> Self {
        Self(bytes)
    }

    /// Build a fingerprint from an integer label, handy for hand-made catalogs
    pub const fn from_u64(value: u64) -> Self {
        Self(value.to_be_bytes())
    }

    /// Raw bytes
    pub const fn as_bytes(&self) -> &[u8; FINGERPRINT_LEN] {
        &self.0
    }
}

impl FromStr for Fingerprint {
    type Err = WaveError;

    /// Accepts 1 to 8 ASCII characters, zero-padded on the right
    fn from_str(s: &str) -> Result<Self> {
        if s.is_empty() || s.len() > FINGERPRINT_LEN || !s.is_ascii() {
            return Err(WaveError::InvalidFingerprint {
                value: s.to_string(),
                reason: format!("expected 1 to {FINGERPRINT_LEN} ASCII characters"),
            });
        }

        let mut bytes = [0u8; FINGERPRINT_LEN];
        for (slot, byte) in bytes.iter_mut().zip(s.bytes()) {
            *slot = byte;
        }
        Ok(Self(bytes))
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let printable = self
            .0
            .iter()
            .take_while(|&&b| b != 0)
            .all(u8::is_ascii_graphic)
            && self.0.iter().skip_while(|&&b| b != 0).all(|&b| b == 0)
            && self.0.first().is_some_and(|&b| b != 0);

        if printable {
            for &byte in self.0.iter().take_while(|&&b| b != 0) {
                write!(f, "{}", char::from(byte))?;
            }
            Ok(())
        } else {
            write!(f, "0x")?;
            for byte in &self.0 {
                write!(f, "{byte:02x}")?;
            }
            Ok(())
        }
    }
}
