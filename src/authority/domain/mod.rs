//! Domain types for roles, capabilities and confirmation policy.

mod capability;
mod confirmation;
mod context;
mod error;
mod ids;
mod role;

pub use capability::Capability;
pub use confirmation::{Confirmation, ConfirmationPolicy, Justification};
pub use context::AuthorizationContext;
pub use error::{AuthorityError, ParseRoleError};
pub use ids::UserId;
pub use role::{AuthorityTier, Role};
