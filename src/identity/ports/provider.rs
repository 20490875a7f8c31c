//! Auth provider ports used during sign-in.

use crate::identity::domain::{AuthenticatedUser, MpcnId};
use crate::notification::domain::EmailAddress;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for auth provider calls.
pub type IdentityProviderResult<T> = Result<T, IdentityProviderError>;

/// Resolves MPCN IDs to the email address the account signs in with.
#[async_trait]
pub trait IdentityDirectory: Send + Sync {
    /// Returns the email address registered for `mpcn_id`.
    async fn email_for_mpcn_id(
        &self,
        mpcn_id: &MpcnId,
    ) -> IdentityProviderResult<Option<EmailAddress>>;
}

/// Password verification against the auth provider.
#[async_trait]
pub trait PasswordAuthenticator: Send + Sync {
    /// Returns the authenticated user, or `None` when the email is unknown or
    /// the password does not match.
    async fn authenticate(
        &self,
        email: &EmailAddress,
        password: &str,
    ) -> IdentityProviderResult<Option<AuthenticatedUser>>;
}

/// Errors returned by auth provider adapters.
#[derive(Debug, Clone, Error)]
pub enum IdentityProviderError {
    /// The provider could not be reached.
    #[error("identity provider unavailable: {0}")]
    Unavailable(Arc<dyn std::error::Error + Send + Sync>),
}

impl IdentityProviderError {
    /// Wraps a provider failure.
    pub fn unavailable(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Unavailable(Arc::new(err))
    }
}
