//! SimHash fingerprinting
//!
//! Each token is hashed to a stable 128-bit digest; a page's fingerprint is
//! built by letting every token vote its frequency on each bit position
//! (+freq where the digest bit is set, -freq where it is not) and keeping
//! the sign of the total. Pages sharing more weighted vocabulary therefore
//! converge to more shared bits.

use crate::text::TokenFrequency;
use sha2::{Digest, Sha256};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Width of a fingerprint in bits
pub const FINGERPRINT_BITS: usize = 128;

/// A 128-bit SimHash fingerprint of a page's weighted vocabulary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Fingerprint(pub u128);

/// Error parsing a fingerprint from its hex line form
#[derive(Debug, Error)]
#[error("invalid fingerprint line: {0:?}")]
pub struct ParseFingerprintError(String);

impl Fingerprint {
    /// Number of bit positions at which two fingerprints differ
    pub fn hamming_distance(&self, other: Fingerprint) -> u32 {
        (self.0 ^ other.0).count_ones()
    }

    /// Fraction of bit positions at which two fingerprints agree, in [0, 1]
    ///
    /// # Examples
    ///
    /// ```
    /// use kumo_weave::dedup::Fingerprint;
    ///
    /// let a = Fingerprint(0);
    /// assert_eq!(a.similarity(a), 1.0);
    /// assert_eq!(a.similarity(Fingerprint(u128::MAX)), 0.0);
    /// ```
    pub fn similarity(&self, other: Fingerprint) -> f64 {
        let agreeing = FINGERPRINT_BITS as u32 - self.hamming_distance(other);
        f64::from(agreeing) / FINGERPRINT_BITS as f64
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:032x}", self.0)
    }
}

impl FromStr for Fingerprint {
    type Err = ParseFingerprintError;

    /// Parses exactly 32 lowercase-or-uppercase hex digits
    ///
    /// The strict length requirement lets the store reject a torn final
    /// line left by a crash mid-append.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != 32 {
            return Err(ParseFingerprintError(s.to_string()));
        }
        u128::from_str_radix(s, 16)
            .map(Fingerprint)
            .map_err(|_| ParseFingerprintError(s.to_string()))
    }
}

/// Hashes a token to a stable 128-bit digest
///
/// The first 16 bytes of the SHA-256 digest, big-endian. The fingerprint
/// log persists across runs, so this mapping must never change.
pub fn hash_token(token: &str) -> u128 {
    let digest = Sha256::digest(token.as_bytes());
    let mut bytes = [0u8; 16];
    bytes.copy_from_slice(&digest[..16]);
    u128::from_be_bytes(bytes)
}

/// Computes the SimHash fingerprint of a frequency map
///
/// For each bit position i, sums +count over tokens whose digest has bit i
/// set and -count otherwise; bit i of the result is 1 iff the sum is
/// positive. Deterministic: the same map always yields the same fingerprint.
pub fn fingerprint(frequencies: &TokenFrequency) -> Fingerprint {
    let mut sums = [0i64; FINGERPRINT_BITS];

    for (token, count) in frequencies {
        let digest = hash_token(token);
        let weight = *count as i64;
        for (i, sum) in sums.iter_mut().enumerate() {
            if digest >> i & 1 == 1 {
                *sum += weight;
            } else {
                *sum -= weight;
            }
        }
    }

    let mut bits = 0u128;
    for (i, sum) in sums.iter().enumerate() {
        if *sum > 0 {
            bits |= 1u128 << i;
        }
    }
    Fingerprint(bits)
}
