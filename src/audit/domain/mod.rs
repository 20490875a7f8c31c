//! Domain model for audit events.

mod error;
mod event;
mod ids;

pub use error::ParseAuditValueError;
pub use event::{AuditAction, AuditEvent, EntityRef, EntityType, PersistedAuditEventData};
pub use ids::AuditEventId;
