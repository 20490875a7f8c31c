//! Append-only audit log port.

use crate::audit::domain::{AuditEvent, AuditEventId, EntityRef};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for audit log operations.
pub type AuditLogResult<T> = Result<T, AuditLogError>;

/// Audit log persistence contract.
///
/// Implementations never update or delete stored events.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AuditLog: Send + Sync {
    /// Appends an event.
    ///
    /// # Errors
    ///
    /// Returns [`AuditLogError::DuplicateEvent`] when the event identifier
    /// was already appended.
    async fn append(&self, event: &AuditEvent) -> AuditLogResult<()>;

    /// Returns the events recorded for `entity`, oldest first.
    async fn list_for_entity(&self, entity: EntityRef) -> AuditLogResult<Vec<AuditEvent>>;
}

/// Errors returned by audit log implementations.
#[derive(Debug, Clone, Error)]
pub enum AuditLogError {
    /// An event with the same identifier already exists.
    #[error("duplicate audit event: {0}")]
    DuplicateEvent(AuditEventId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl AuditLogError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
