//! Error types for role transfer values.

use super::ApprovalStatus;
use crate::authority::domain::UserId;
use thiserror::Error;

/// Errors returned by role approval transitions.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RoleTransferDomainError {
    /// The approval has already left the pending state.
    #[error("This request has already been {}.", .0.as_str())]
    AlreadyProcessed(ApprovalStatus),

    /// The requester named themselves as the target.
    #[error("user {0} cannot transfer the role to themselves")]
    SelfTransfer(UserId),
}

/// Error returned while parsing role transfer enumerations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown role transfer {kind}: {value}")]
pub struct ParseRoleTransferValueError {
    /// Which enumeration failed to parse.
    pub kind: &'static str,
    /// The rejected value.
    pub value: String,
}
