//! In-memory role approval repository.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::role_transfer::{
    domain::{RoleApproval, RoleApprovalId, TokenDigest},
    ports::{RoleApprovalRepository, RoleApprovalRepositoryError, RoleApprovalRepositoryResult},
};

fn poisoned(err: impl ToString) -> RoleApprovalRepositoryError {
    RoleApprovalRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

/// Thread-safe in-memory role approval repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRoleApprovalRepository {
    approvals: Arc<RwLock<HashMap<RoleApprovalId, RoleApproval>>>,
}

impl InMemoryRoleApprovalRepository {
    /// Creates an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RoleApprovalRepository for InMemoryRoleApprovalRepository {
    async fn store(&self, approval: &RoleApproval) -> RoleApprovalRepositoryResult<()> {
        let mut approvals = self.approvals.write().map_err(poisoned)?;
        let clashes = approvals.contains_key(&approval.id())
            || approvals
                .values()
                .any(|existing| existing.token_digest() == approval.token_digest());
        if clashes {
            return Err(RoleApprovalRepositoryError::DuplicateApproval(approval.id()));
        }
        approvals.insert(approval.id(), approval.clone());
        Ok(())
    }

    async fn update(&self, approval: &RoleApproval) -> RoleApprovalRepositoryResult<()> {
        let mut approvals = self.approvals.write().map_err(poisoned)?;
        let slot = approvals
            .get_mut(&approval.id())
            .ok_or(RoleApprovalRepositoryError::NotFound(approval.id()))?;
        *slot = approval.clone();
        Ok(())
    }

    async fn find_by_digest(
        &self,
        digest: &TokenDigest,
    ) -> RoleApprovalRepositoryResult<Option<RoleApproval>> {
        let approvals = self.approvals.read().map_err(poisoned)?;
        Ok(approvals
            .values()
            .find(|approval| approval.token_digest() == digest)
            .cloned())
    }

    async fn find_by_id(
        &self,
        id: RoleApprovalId,
    ) -> RoleApprovalRepositoryResult<Option<RoleApproval>> {
        let approvals = self.approvals.read().map_err(poisoned)?;
        Ok(approvals.get(&id).cloned())
    }
}
