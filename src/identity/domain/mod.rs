//! Domain model for sign-in.

mod account;
mod error;
mod identifier;

pub use account::{AuthenticatedUser, UserAccount};
pub use error::IdentityDomainError;
pub use identifier::{LoginIdentifier, MpcnId};
