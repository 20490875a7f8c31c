//! SLA tracking for resolution requests.
//!
//! [`services::SlaMonitor::sweep`] is meant to run on a schedule. Each open
//! request raises at most one "approaching" alert and one "breach" alert,
//! delivered to every user who receives SLA alerts through a single outbox
//! email and one in-app notification each.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
