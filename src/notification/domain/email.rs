//! Email addresses and rendered messages.

use super::NotificationDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A syntactically plausible email address, stored lower-cased.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Creates a validated email address.
    ///
    /// # Errors
    ///
    /// Returns [`NotificationDomainError::InvalidEmailAddress`] unless the
    /// value has a non-empty local part, a single `@` and a dotted domain.
    pub fn new(value: impl Into<String>) -> Result<Self, NotificationDomainError> {
        let raw = value.into();
        let normalized = raw.trim().to_ascii_lowercase();
        let mut parts = normalized.split('@');
        let local = parts.next().unwrap_or_default();
        let domain = parts.next().unwrap_or_default();
        let is_valid = !local.is_empty()
            && parts.next().is_none()
            && domain.contains('.')
            && !domain.starts_with('.')
            && !domain.ends_with('.')
            && !normalized.chars().any(char::is_whitespace);
        if !is_valid {
            return Err(NotificationDomainError::InvalidEmailAddress(raw));
        }
        Ok(Self(normalized))
    }

    /// Returns the address as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for EmailAddress {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A rendered email ready for the mailer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailMessage {
    to: Vec<EmailAddress>,
    subject: String,
    body: String,
}

impl EmailMessage {
    /// Creates a message.
    ///
    /// # Errors
    ///
    /// Returns [`NotificationDomainError::NoRecipients`] when `to` is empty.
    pub fn new(
        to: Vec<EmailAddress>,
        subject: impl Into<String>,
        body: impl Into<String>,
    ) -> Result<Self, NotificationDomainError> {
        if to.is_empty() {
            return Err(NotificationDomainError::NoRecipients);
        }
        Ok(Self {
            to,
            subject: subject.into(),
            body: body.into(),
        })
    }

    /// Returns the recipients.
    #[must_use]
    pub fn to(&self) -> &[EmailAddress] {
        &self.to
    }

    /// Returns the subject line.
    #[must_use]
    pub fn subject(&self) -> &str {
        &self.subject
    }

    /// Returns the plain-text body.
    #[must_use]
    pub fn body(&self) -> &str {
        &self.body
    }
}
