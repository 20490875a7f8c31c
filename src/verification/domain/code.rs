//! One-time codes and their digests.

use super::PhoneNumber;
use rand::Rng;
use sha2::{Digest, Sha256};
use std::fmt;

const CODE_SPACE: u32 = 1_000_000;

/// A six-digit one-time code.
#[derive(Clone, PartialEq, Eq)]
pub struct VerificationCode(String);

impl VerificationCode {
    /// Generates a uniformly random code, zero-padded to six digits.
    #[must_use]
    pub fn generate() -> Self {
        let value = rand::rng().random_range(0..CODE_SPACE);
        Self(format!("{value:06}"))
    }

    /// Returns the code text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the digest stored for this code and `phone`.
    #[must_use]
    pub fn digest_for(&self, phone: &PhoneNumber) -> CodeDigest {
        CodeDigest::compute(phone, &self.0)
    }
}

impl fmt::Debug for VerificationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("VerificationCode(..)")
    }
}

/// Hex-encoded SHA-256 digest of a phone number and code.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CodeDigest(String);

impl CodeDigest {
    /// Digests a code presented for `phone`.
    #[must_use]
    pub fn compute(phone: &PhoneNumber, code: &str) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(phone.as_str().as_bytes());
        hasher.update(b":");
        hasher.update(code.trim().as_bytes());
        Self(format!("{:x}", hasher.finalize()))
    }

    /// Wraps a digest read back from storage.
    #[must_use]
    pub const fn from_persisted(digest: String) -> Self {
        Self(digest)
    }

    /// Returns the digest text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}
