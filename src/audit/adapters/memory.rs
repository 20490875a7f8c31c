//! In-memory audit log for tests and single-process deployments.

use async_trait::async_trait;
use std::sync::{Arc, RwLock};

use crate::audit::{
    domain::{AuditEvent, EntityRef},
    ports::{AuditLog, AuditLogError, AuditLogResult},
};

/// Thread-safe in-memory audit log.
#[derive(Debug, Clone, Default)]
pub struct InMemoryAuditLog {
    events: Arc<RwLock<Vec<AuditEvent>>>,
}

impl InMemoryAuditLog {
    /// Creates an empty audit log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns every appended event in append order.
    ///
    /// # Errors
    ///
    /// Returns [`AuditLogError::Persistence`] when the lock is poisoned.
    pub fn all(&self) -> AuditLogResult<Vec<AuditEvent>> {
        let events = self.events.read().map_err(|err| {
            AuditLogError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(events.clone())
    }
}

#[async_trait]
impl AuditLog for InMemoryAuditLog {
    async fn append(&self, event: &AuditEvent) -> AuditLogResult<()> {
        let mut events = self.events.write().map_err(|err| {
            AuditLogError::persistence(std::io::Error::other(err.to_string()))
        })?;
        if events.iter().any(|existing| existing.id() == event.id()) {
            return Err(AuditLogError::DuplicateEvent(event.id()));
        }
        events.push(event.clone());
        Ok(())
    }

    async fn list_for_entity(&self, entity: EntityRef) -> AuditLogResult<Vec<AuditEvent>> {
        let events = self.events.read().map_err(|err| {
            AuditLogError::persistence(std::io::Error::other(err.to_string()))
        })?;
        let mut matching: Vec<AuditEvent> = events
            .iter()
            .filter(|event| event.entity() == entity)
            .cloned()
            .collect();
        matching.sort_by_key(AuditEvent::occurred_at);
        Ok(matching)
    }
}
