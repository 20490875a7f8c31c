//! Sign-in resolution by email address or MPCN ID.
//!
//! Users may sign in with either their email address or the organisation-issued
//! MPCN ID. An MPCN ID is first resolved to an email address through
//! [`ports::IdentityDirectory`], then the password is checked by
//! [`ports::PasswordAuthenticator`]. Unknown IDs and wrong passwords are
//! indistinguishable to the caller.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
