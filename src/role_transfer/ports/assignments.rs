//! Role assignment port backed by the user profile store.

use crate::authority::domain::{Role, UserId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for role assignment operations.
pub type RoleAssignmentResult<T> = Result<T, RoleAssignmentError>;

/// Reads and writes the role recorded on user profiles.
#[async_trait]
pub trait RoleAssignments: Send + Sync {
    /// Returns every user currently holding `role`.
    async fn holders_of(&self, role: Role) -> RoleAssignmentResult<Vec<UserId>>;

    /// Sets the role of `user_id`.
    ///
    /// # Errors
    ///
    /// Returns [`RoleAssignmentError::UnknownUser`] when no profile exists.
    async fn assign_role(&self, user_id: UserId, role: Role) -> RoleAssignmentResult<()>;
}

/// Errors returned by role assignment implementations.
#[derive(Debug, Clone, Error)]
pub enum RoleAssignmentError {
    /// No profile exists for the user.
    #[error("unknown user: {0}")]
    UnknownUser(UserId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl RoleAssignmentError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
