//! Port contracts for role transfers.

pub mod assignments;
pub mod repository;

pub use assignments::{RoleAssignmentError, RoleAssignmentResult, RoleAssignments};
pub use repository::{
    RoleApprovalRepository, RoleApprovalRepositoryError, RoleApprovalRepositoryResult,
};
