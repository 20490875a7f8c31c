//! Error types for verification values.

use thiserror::Error;

/// Errors returned while constructing verification values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum VerificationDomainError {
    /// The phone number is not in E.164 form.
    #[error("invalid phone number: {0}")]
    InvalidPhoneNumber(String),
}
