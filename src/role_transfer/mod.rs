//! Token-driven transfer of the highest authority role.
//!
//! A general overseer requests a transfer to another user. The request is
//! stored as a [`domain::RoleApproval`] keyed by the SHA-256 digest of a
//! random token; the plaintext token is handed out once and later presented
//! with an `approve` or `reject` action. Approval demotes every current
//! general overseer to admin and promotes the target.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
