//! Per-session authorization context.

use super::{AuthorityError, AuthorityTier, Capability, Role, UserId};
use std::collections::BTreeSet;

/// Capabilities of the signed-in actor, computed once per session.
///
/// Services receive the context by reference and ask it whether an action is
/// permitted rather than inspecting the role directly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorizationContext {
    user_id: UserId,
    role: Role,
    capabilities: BTreeSet<Capability>,
}

impl AuthorizationContext {
    /// Builds the context for a session held by `user_id` with `role`.
    #[must_use]
    pub fn for_session(user_id: UserId, role: Role) -> Self {
        Self {
            user_id,
            role,
            capabilities: role.capabilities().into_iter().collect(),
        }
    }

    /// Returns the acting user.
    #[must_use]
    pub const fn user_id(&self) -> UserId {
        self.user_id
    }

    /// Returns the acting role.
    #[must_use]
    pub const fn role(&self) -> Role {
        self.role
    }

    /// Returns the authority tier of the acting role.
    #[must_use]
    pub const fn tier(&self) -> AuthorityTier {
        self.role.tier()
    }

    /// Returns whether the session grants `capability`.
    #[must_use]
    pub fn has_capability(&self, capability: Capability) -> bool {
        self.capabilities.contains(&capability)
    }

    /// Checks that the session grants `capability`.
    ///
    /// # Errors
    ///
    /// Returns [`AuthorityError::MissingCapability`] when it does not.
    pub fn require(&self, capability: Capability) -> Result<(), AuthorityError> {
        if self.has_capability(capability) {
            return Ok(());
        }
        Err(AuthorityError::MissingCapability {
            role: self.role,
            capability,
        })
    }
}
