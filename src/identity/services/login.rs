//! Resolves sign-in input into an authorization context.

use crate::authority::domain::AuthorizationContext;
use crate::identity::{
    domain::{IdentityDomainError, LoginIdentifier},
    ports::{IdentityDirectory, IdentityProviderError, PasswordAuthenticator},
};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

/// Errors returned by [`LoginService::sign_in`].
#[derive(Debug, Error)]
pub enum LoginError {
    /// The identifier could not be parsed.
    #[error(transparent)]
    Identifier(#[from] IdentityDomainError),

    /// Unknown MPCN ID, unknown email or wrong password.
    #[error("Incorrect password. Please try again.")]
    InvalidCredentials,

    /// The auth provider failed.
    #[error(transparent)]
    Provider(#[from] IdentityProviderError),
}

/// Sign-in service accepting either an email address or an MPCN ID.
#[derive(Clone)]
pub struct LoginService<D, A>
where
    D: IdentityDirectory,
    A: PasswordAuthenticator,
{
    directory: Arc<D>,
    authenticator: Arc<A>,
}

impl<D, A> LoginService<D, A>
where
    D: IdentityDirectory,
    A: PasswordAuthenticator,
{
    /// Creates a sign-in service.
    #[must_use]
    pub const fn new(directory: Arc<D>, authenticator: Arc<A>) -> Self {
        Self {
            directory,
            authenticator,
        }
    }

    /// Authenticates `identifier` and `password`.
    ///
    /// # Errors
    ///
    /// Returns [`LoginError::InvalidCredentials`] for an unknown MPCN ID or a
    /// wrong password, [`LoginError::Identifier`] for malformed input and
    /// [`LoginError::Provider`] when the provider fails.
    pub async fn sign_in(
        &self,
        identifier: &str,
        password: &str,
    ) -> Result<AuthorizationContext, LoginError> {
        let email = match LoginIdentifier::parse(identifier)? {
            LoginIdentifier::Email(email) => email,
            LoginIdentifier::MpcnId(mpcn_id) => {
                let resolved = self.directory.email_for_mpcn_id(&mpcn_id).await?;
                resolved.ok_or_else(|| {
                    debug!(mpcn_id = %mpcn_id, "unknown MPCN ID");
                    LoginError::InvalidCredentials
                })?
            }
        };

        let user = self
            .authenticator
            .authenticate(&email, password)
            .await?
            .ok_or(LoginError::InvalidCredentials)?;
        info!(user_id = %user.user_id, role = user.role.as_str(), "user signed in");
        Ok(AuthorizationContext::for_session(user.user_id, user.role))
    }
}
