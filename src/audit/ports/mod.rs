//! Port contracts for the audit log.

pub mod log;

pub use log::{AuditLog, AuditLogError, AuditLogResult};

#[cfg(test)]
pub use log::MockAuditLog;
