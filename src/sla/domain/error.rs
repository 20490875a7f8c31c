//! Error types for resolution requests.

use super::ResolutionRequestId;
use thiserror::Error;

/// Errors returned by resolution request operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SlaDomainError {
    /// The title is empty.
    #[error("resolution request title must not be empty")]
    EmptyTitle,

    /// The request is already resolved.
    #[error("resolution request {0} is already resolved")]
    AlreadyResolved(ResolutionRequestId),
}

/// Error returned while parsing request status from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown resolution request status: {0}")]
pub struct ParseSlaValueError(pub String);
