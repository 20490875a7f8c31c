//! Append-only audit log.
//!
//! Every mutating workflow action records an [`domain::AuditEvent`]
//! regardless of the actor's tier. Events are read back per entity, oldest
//! first, to build activity timelines.
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]

pub mod adapters;
pub mod domain;
pub mod ports;

#[cfg(test)]
mod tests;
