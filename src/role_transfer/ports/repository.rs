//! Role approval persistence port.

use crate::role_transfer::domain::{RoleApproval, RoleApprovalId, TokenDigest};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for role approval repository operations.
pub type RoleApprovalRepositoryResult<T> = Result<T, RoleApprovalRepositoryError>;

/// Role approval persistence contract.
#[async_trait]
pub trait RoleApprovalRepository: Send + Sync {
    /// Stores a new approval.
    ///
    /// # Errors
    ///
    /// Returns [`RoleApprovalRepositoryError::DuplicateApproval`] when the
    /// identifier or token digest already exists.
    async fn store(&self, approval: &RoleApproval) -> RoleApprovalRepositoryResult<()>;

    /// Persists changes to an existing approval.
    ///
    /// # Errors
    ///
    /// Returns [`RoleApprovalRepositoryError::NotFound`] when the approval
    /// does not exist.
    async fn update(&self, approval: &RoleApproval) -> RoleApprovalRepositoryResult<()>;

    /// Finds the approval issued for a token digest.
    async fn find_by_digest(
        &self,
        digest: &TokenDigest,
    ) -> RoleApprovalRepositoryResult<Option<RoleApproval>>;

    /// Finds an approval by identifier.
    async fn find_by_id(
        &self,
        id: RoleApprovalId,
    ) -> RoleApprovalRepositoryResult<Option<RoleApproval>>;
}

/// Errors returned by role approval repository implementations.
#[derive(Debug, Clone, Error)]
pub enum RoleApprovalRepositoryError {
    /// An approval with the same identifier or token already exists.
    #[error("duplicate role approval: {0}")]
    DuplicateApproval(RoleApprovalId),

    /// The approval was not found.
    #[error("role approval not found: {0}")]
    NotFound(RoleApprovalId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl RoleApprovalRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
