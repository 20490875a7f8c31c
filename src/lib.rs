//! MPCN workforce: review, override and governance core.
//!
//! This crate holds the rules behind task and work-report review: who may
//! decide what, how an administrator or the general overseer supersedes a
//! team lead, what gets recorded and who gets told.
//!
//! # Architecture
//!
//! Each bounded context follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (in-memory, `PostgreSQL`)
//! - **Services**: Orchestration that checks authority, mutates the domain,
//!   records audit events and queues notifications
//!
//! # Modules
//!
//! - [`authority`]: Roles, tiers, capabilities and confirmation policy
//! - [`review`]: Task and work-report review with override and rate changes
//! - [`audit`]: Append-only activity log and entity timelines
//! - [`notification`]: Outbox, email rendering, delivery with retry
//! - [`sla`]: Resolution requests and the breach monitor
//! - [`role_transfer`]: Token-driven hand-over of the overseer role
//! - [`verification`]: SMS one-time codes
//! - [`identity`]: Sign-in by email or MPCN ID
//! - [`payroll`]: Approved-earnings summaries
//! - [`config`]: Layered configuration
//! - [`telemetry`]: Logging initialisation

pub mod audit;
pub mod authority;
pub mod config;
pub mod identity;
pub mod notification;
pub mod payroll;
pub mod review;
pub mod role_transfer;
pub mod sla;
pub mod telemetry;
pub mod verification;

#[cfg(test)]
mod test_support;
