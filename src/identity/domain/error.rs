//! Error types for identity values.

use thiserror::Error;

/// Errors returned while parsing sign-in identifiers.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum IdentityDomainError {
    /// Nothing was entered.
    #[error("sign-in identifier is empty")]
    EmptyIdentifier,

    /// The value contains `@` but is not a valid email address.
    #[error("invalid email address: {0}")]
    InvalidEmail(String),

    /// The value is not a well-formed MPCN ID.
    #[error("invalid MPCN ID: {0}")]
    InvalidMpcnId(String),
}
