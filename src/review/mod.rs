//! Task and work-report review workflow.
//!
//! Employees submit tasks and work reports; a team lead records the first-tier
//! decision; an admin or the general overseer may override it. Approval by
//! the team lead is final, rejection leaves the record pending so it can be
//! overridden, and an override always sets the final status. Every mutation
//! is audited and queues a notification for the submitter.
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;
