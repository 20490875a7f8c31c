//! Stored verification state for one phone number.

use super::{CodeDigest, PhoneNumber};
use chrono::{DateTime, Utc};

/// The outstanding code for a phone number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationEntry {
    phone: PhoneNumber,
    code_digest: CodeDigest,
    expires_at: DateTime<Utc>,
    resend_available_at: DateTime<Utc>,
    failed_attempts: u32,
}

impl VerificationEntry {
    /// Creates an entry with no failed attempts.
    #[must_use]
    pub const fn new(
        phone: PhoneNumber,
        code_digest: CodeDigest,
        expires_at: DateTime<Utc>,
        resend_available_at: DateTime<Utc>,
    ) -> Self {
        Self {
            phone,
            code_digest,
            expires_at,
            resend_available_at,
            failed_attempts: 0,
        }
    }

    /// Replaces the failed attempt count, as read back from storage.
    #[must_use]
    pub const fn with_failed_attempts(mut self, failed_attempts: u32) -> Self {
        self.failed_attempts = failed_attempts;
        self
    }

    /// Returns the phone number.
    #[must_use]
    pub const fn phone(&self) -> &PhoneNumber {
        &self.phone
    }

    /// Returns the stored code digest.
    #[must_use]
    pub const fn code_digest(&self) -> &CodeDigest {
        &self.code_digest
    }

    /// Returns when the code stops being accepted.
    #[must_use]
    pub const fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }

    /// Returns when a new code may be sent.
    #[must_use]
    pub const fn resend_available_at(&self) -> DateTime<Utc> {
        self.resend_available_at
    }

    /// Returns the number of wrong guesses so far.
    #[must_use]
    pub const fn failed_attempts(&self) -> u32 {
        self.failed_attempts
    }

    /// Returns whether the code is no longer accepted at `now`.
    #[must_use]
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }

    /// Returns whether `code` is the outstanding code.
    #[must_use]
    pub fn matches(&self, code: &str) -> bool {
        CodeDigest::compute(&self.phone, code) == self.code_digest
    }

    /// Counts one wrong guess and returns the new total.
    pub const fn record_failure(&mut self) -> u32 {
        self.failed_attempts = self.failed_attempts.saturating_add(1);
        self.failed_attempts
    }
}
