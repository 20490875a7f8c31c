//! In-memory user accounts for tests and local runs.
//!
//! One store backs every user-facing port: sign-in lookups, the notification
//! user directory and role assignment for top-role transfers.

use async_trait::async_trait;
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::authority::domain::{Role, UserId};
use crate::identity::{
    domain::{AuthenticatedUser, MpcnId, UserAccount},
    ports::{
        IdentityDirectory, IdentityProviderError, IdentityProviderResult, PasswordAuthenticator,
    },
};
use crate::notification::{
    domain::EmailAddress,
    ports::{DirectoryError, DirectoryResult, UserDirectory},
};
use crate::role_transfer::ports::{RoleAssignmentError, RoleAssignmentResult, RoleAssignments};

#[derive(Debug, Clone)]
struct StoredAccount {
    account: UserAccount,
    password_digest: String,
}

fn password_digest(password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(password.as_bytes());
    format!("{:x}", hasher.finalize())
}

fn poisoned(err: impl ToString) -> std::io::Error {
    std::io::Error::other(err.to_string())
}

/// Thread-safe in-memory account store.
#[derive(Debug, Clone, Default)]
pub struct InMemoryUserAccounts {
    accounts: Arc<RwLock<HashMap<UserId, StoredAccount>>>,
}

impl InMemoryUserAccounts {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces an account with its password.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityProviderError::Unavailable`] when the lock is poisoned.
    pub fn insert(&self, account: UserAccount, password: &str) -> IdentityProviderResult<()> {
        let mut accounts = self
            .accounts
            .write()
            .map_err(|err| IdentityProviderError::unavailable(poisoned(err)))?;
        accounts.insert(
            account.user_id(),
            StoredAccount {
                account,
                password_digest: password_digest(password),
            },
        );
        Ok(())
    }

    /// Returns the current role of `user_id`.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityProviderError::Unavailable`] when the lock is poisoned.
    pub fn role_of(&self, user_id: UserId) -> IdentityProviderResult<Option<Role>> {
        let accounts = self
            .accounts
            .read()
            .map_err(|err| IdentityProviderError::unavailable(poisoned(err)))?;
        Ok(accounts.get(&user_id).map(|stored| stored.account.role()))
    }

    fn user_ids_with_role(&self, role: Role) -> Result<Vec<UserId>, std::io::Error> {
        let accounts = self.accounts.read().map_err(poisoned)?;
        let mut holders: Vec<UserId> = accounts
            .values()
            .filter(|stored| stored.account.role() == role)
            .map(|stored| stored.account.user_id())
            .collect();
        holders.sort();
        Ok(holders)
    }
}

#[async_trait]
impl IdentityDirectory for InMemoryUserAccounts {
    async fn email_for_mpcn_id(
        &self,
        mpcn_id: &MpcnId,
    ) -> IdentityProviderResult<Option<EmailAddress>> {
        let accounts = self
            .accounts
            .read()
            .map_err(|err| IdentityProviderError::unavailable(poisoned(err)))?;
        Ok(accounts
            .values()
            .find(|stored| stored.account.mpcn_id() == Some(mpcn_id))
            .map(|stored| stored.account.email().clone()))
    }
}

#[async_trait]
impl PasswordAuthenticator for InMemoryUserAccounts {
    async fn authenticate(
        &self,
        email: &EmailAddress,
        password: &str,
    ) -> IdentityProviderResult<Option<AuthenticatedUser>> {
        let accounts = self
            .accounts
            .read()
            .map_err(|err| IdentityProviderError::unavailable(poisoned(err)))?;
        let digest = password_digest(password);
        Ok(accounts
            .values()
            .find(|stored| stored.account.email() == email && stored.password_digest == digest)
            .map(|stored| AuthenticatedUser {
                user_id: stored.account.user_id(),
                role: stored.account.role(),
            }))
    }
}

#[async_trait]
impl UserDirectory for InMemoryUserAccounts {
    async fn email_for(&self, user_id: UserId) -> DirectoryResult<Option<EmailAddress>> {
        let accounts = self
            .accounts
            .read()
            .map_err(|err| DirectoryError::unavailable(poisoned(err)))?;
        Ok(accounts
            .get(&user_id)
            .map(|stored| stored.account.email().clone()))
    }

    async fn users_with_role(&self, role: Role) -> DirectoryResult<Vec<UserId>> {
        self.user_ids_with_role(role)
            .map_err(DirectoryError::unavailable)
    }
}

#[async_trait]
impl RoleAssignments for InMemoryUserAccounts {
    async fn holders_of(&self, role: Role) -> RoleAssignmentResult<Vec<UserId>> {
        self.user_ids_with_role(role)
            .map_err(RoleAssignmentError::persistence)
    }

    async fn assign_role(&self, user_id: UserId, role: Role) -> RoleAssignmentResult<()> {
        let mut accounts = self
            .accounts
            .write()
            .map_err(|err| RoleAssignmentError::persistence(poisoned(err)))?;
        let stored = accounts
            .get_mut(&user_id)
            .ok_or(RoleAssignmentError::UnknownUser(user_id))?;
        stored.account.set_role(role);
        Ok(())
    }
}
