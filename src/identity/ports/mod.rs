//! Port contracts for the auth provider.

mod provider;

pub use provider::{
    IdentityDirectory, IdentityProviderError, IdentityProviderResult, PasswordAuthenticator,
};
