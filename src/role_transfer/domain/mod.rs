//! Domain model for role transfers.

mod approval;
mod error;
mod token;

pub use approval::{
    ApprovalStatus, PersistedRoleApprovalData, RoleApproval, RoleApprovalId, TransferAction,
};
pub use error::{ParseRoleTransferValueError, RoleTransferDomainError};
pub use token::{ApprovalToken, TokenDigest};
