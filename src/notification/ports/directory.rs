//! User directory port backed by the auth provider.

use crate::authority::domain::{Role, UserId};
use crate::notification::domain::EmailAddress;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for directory lookups.
pub type DirectoryResult<T> = Result<T, DirectoryError>;

/// Lookup of contact details and role membership.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Returns the email address of `user_id`, or `None` when the user is
    /// unknown or has no address.
    async fn email_for(&self, user_id: UserId) -> DirectoryResult<Option<EmailAddress>>;

    /// Returns every user currently holding `role`.
    async fn users_with_role(&self, role: Role) -> DirectoryResult<Vec<UserId>>;
}

/// Errors returned by directory implementations.
#[derive(Debug, Clone, Error)]
pub enum DirectoryError {
    /// The directory could not be reached.
    #[error("directory unavailable: {0}")]
    Unavailable(Arc<dyn std::error::Error + Send + Sync>),
}

impl DirectoryError {
    /// Wraps a lookup failure.
    pub fn unavailable(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Unavailable(Arc::new(err))
    }
}
