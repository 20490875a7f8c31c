//! User accounts as seen by the auth provider.

use crate::authority::domain::{Role, UserId};
use crate::notification::domain::EmailAddress;
use super::MpcnId;

/// Result of a successful password check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticatedUser {
    /// Authenticated user.
    pub user_id: UserId,
    /// Role recorded for the user.
    pub role: Role,
}

/// A user known to the auth provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserAccount {
    user_id: UserId,
    email: EmailAddress,
    mpcn_id: Option<MpcnId>,
    display_name: String,
    role: Role,
}

impl UserAccount {
    /// Creates an account without an MPCN ID.
    #[must_use]
    pub fn new(
        user_id: UserId,
        email: EmailAddress,
        display_name: impl Into<String>,
        role: Role,
    ) -> Self {
        Self {
            user_id,
            email,
            mpcn_id: None,
            display_name: display_name.into(),
            role,
        }
    }

    /// Attaches an MPCN ID.
    #[must_use]
    pub fn with_mpcn_id(mut self, mpcn_id: MpcnId) -> Self {
        self.mpcn_id = Some(mpcn_id);
        self
    }

    /// Returns the user identifier.
    #[must_use]
    pub const fn user_id(&self) -> UserId {
        self.user_id
    }

    /// Returns the email address.
    #[must_use]
    pub const fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Returns the MPCN ID, if issued.
    #[must_use]
    pub const fn mpcn_id(&self) -> Option<&MpcnId> {
        self.mpcn_id.as_ref()
    }

    /// Returns the display name.
    #[must_use]
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// Returns the current role.
    #[must_use]
    pub const fn role(&self) -> Role {
        self.role
    }

    /// Replaces the role.
    pub const fn set_role(&mut self, role: Role) {
        self.role = role;
    }
}
