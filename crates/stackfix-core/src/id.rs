//! Session-unique identifiers for uploaded images.
//!
//! Identifiers are random version-4 UUID strings. They key entries in
//! the file collection and in rendered lists; they are never persisted.

use std::fmt;
use std::fmt::Write;

/// Opaque identifier assigned to an uploaded image at creation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ImageId(String);

impl ImageId {
    /// Generate a fresh identifier from the platform's secure random source.
    ///
    /// # Panics
    ///
    /// Panics if the platform random source is unavailable (on WASM,
    /// `crypto.getRandomValues`). There is no meaningful recovery from
    /// a missing entropy source.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn generate() -> Self {
        let mut bytes = [0u8; 16];
        getrandom::fill(&mut bytes).expect("platform random source unavailable");
        Self::from_random_bytes(bytes)
    }

    /// Format 16 random bytes as a version-4, variant-1 UUID.
    fn from_random_bytes(mut bytes: [u8; 16]) -> Self {
        bytes[6] = (bytes[6] & 0x0f) | 0x40;
        bytes[8] = (bytes[8] & 0x3f) | 0x80;

        let mut out = String::with_capacity(36);
        for (i, b) in bytes.iter().enumerate() {
            if matches!(i, 4 | 6 | 8 | 10) {
                out.push('-');
            }
            let _ = write!(out, "{b:02x}");
        }
        Self(out)
    }

    /// The identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ImageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
