//! E.164 phone numbers.

use super::VerificationDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

const MIN_DIGITS: usize = 8;
const MAX_DIGITS: usize = 15;

/// A phone number in E.164 form, e.g. `+2348012345678`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PhoneNumber(String);

impl PhoneNumber {
    /// Parses a phone number, ignoring spaces and dashes.
    ///
    /// # Errors
    ///
    /// Returns [`VerificationDomainError::InvalidPhoneNumber`] unless the
    /// value is `+` followed by 8 to 15 digits.
    pub fn new(value: impl Into<String>) -> Result<Self, VerificationDomainError> {
        let raw = value.into();
        let compact: String = raw
            .chars()
            .filter(|character| !character.is_whitespace() && *character != '-')
            .collect();
        let Some(digits) = compact.strip_prefix('+') else {
            return Err(VerificationDomainError::InvalidPhoneNumber(raw));
        };
        let is_valid = (MIN_DIGITS..=MAX_DIGITS).contains(&digits.len())
            && digits.chars().all(|character| character.is_ascii_digit());
        if !is_valid {
            return Err(VerificationDomainError::InvalidPhoneNumber(raw));
        }
        Ok(Self(compact))
    }

    /// Returns the number as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
