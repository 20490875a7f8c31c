//! Error types for notification domain values.

use thiserror::Error;

/// Errors returned while constructing notification values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum NotificationDomainError {
    /// The email address is not of the form `local@domain`.
    #[error("invalid email address: {0}")]
    InvalidEmailAddress(String),

    /// An email needs at least one recipient.
    #[error("email message has no recipients")]
    NoRecipients,
}

/// Error returned while parsing notification enumerations from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown notification {kind}: {value}")]
pub struct ParseNotificationValueError {
    /// Which enumeration failed to parse.
    pub kind: &'static str,
    /// The rejected value.
    pub value: String,
}
