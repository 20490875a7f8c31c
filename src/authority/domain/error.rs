//! Error types for authority checks.

use super::{Capability, Role};
use thiserror::Error;

/// Errors returned when an actor fails an authority check.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AuthorityError {
    /// The actor's role does not grant the capability.
    #[error("role {role} lacks capability {capability}")]
    MissingCapability {
        /// Role held by the actor.
        role: Role,
        /// Capability the operation needs.
        capability: Capability,
    },

    /// The action needs a justification and none was supplied.
    #[error("a non-empty reason is required for this action")]
    ReasonRequired,

    /// The action needs an explicit acknowledgement of its impact.
    #[error("the impact of this action must be acknowledged")]
    AcknowledgementRequired,
}

/// Error returned while parsing roles from persistence or session claims.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown role: {0}")]
pub struct ParseRoleError(pub String);
