//! Sign-in identifiers.

use super::IdentityDomainError;
use crate::notification::domain::EmailAddress;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Organisation-issued member identifier, stored upper-cased.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MpcnId(String);

impl MpcnId {
    /// Creates an MPCN ID, normalizing case and surrounding whitespace.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityDomainError::InvalidMpcnId`] unless the value is a
    /// non-empty run of ASCII letters, digits and hyphens.
    pub fn new(value: impl Into<String>) -> Result<Self, IdentityDomainError> {
        let raw = value.into();
        let normalized = raw.trim().to_ascii_uppercase();
        let is_valid = !normalized.is_empty()
            && !normalized.starts_with('-')
            && !normalized.ends_with('-')
            && normalized
                .chars()
                .all(|character| character.is_ascii_alphanumeric() || character == '-');
        if !is_valid {
            return Err(IdentityDomainError::InvalidMpcnId(raw));
        }
        Ok(Self(normalized))
    }

    /// Returns the identifier as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MpcnId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// What the user typed into the sign-in field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginIdentifier {
    /// An email address.
    Email(EmailAddress),
    /// An MPCN ID.
    MpcnId(MpcnId),
}

impl LoginIdentifier {
    /// Classifies raw input: anything containing `@` is an email address,
    /// everything else an MPCN ID.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityDomainError`] when the input is empty or malformed.
    pub fn parse(input: &str) -> Result<Self, IdentityDomainError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(IdentityDomainError::EmptyIdentifier);
        }
        if trimmed.contains('@') {
            return EmailAddress::new(trimmed)
                .map(Self::Email)
                .map_err(|_| IdentityDomainError::InvalidEmail(trimmed.to_owned()));
        }
        MpcnId::new(trimmed).map(Self::MpcnId)
    }
}
