//! Authority model shared by every workflow in the crate.
//!
//! Roles map onto authority tiers, tiers decide how much confirmation friction
//! an action needs, and capabilities are the only thing services consult when
//! deciding whether an actor may perform an operation. An
//! [`domain::AuthorizationContext`] is computed once per session and injected
//! into services instead of comparing role strings at call sites.

pub mod domain;

#[cfg(test)]
mod tests;
