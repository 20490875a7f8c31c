//! Outbox port used by publishers and the dispatcher.

use crate::notification::domain::{OutboxMessage, OutboxMessageId};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use thiserror::Error;

/// Result type for notification store operations.
pub type NotificationStoreResult<T> = Result<T, NotificationStoreError>;

/// Durable queue of outbound notifications.
#[async_trait]
pub trait NotificationOutbox: Send + Sync {
    /// Adds a message to the outbox.
    ///
    /// # Errors
    ///
    /// Returns [`NotificationStoreError::Duplicate`] when the identifier is
    /// already queued.
    async fn enqueue(&self, message: &OutboxMessage) -> NotificationStoreResult<()>;

    /// Returns up to `limit` pending messages available at `now`, oldest first.
    async fn due(
        &self,
        now: DateTime<Utc>,
        limit: usize,
    ) -> NotificationStoreResult<Vec<OutboxMessage>>;

    /// Persists the delivery state of a message.
    ///
    /// # Errors
    ///
    /// Returns [`NotificationStoreError::NotFound`] when the message is unknown.
    async fn update(&self, message: &OutboxMessage) -> NotificationStoreResult<()>;

    /// Finds a message by identifier.
    async fn find_by_id(
        &self,
        id: OutboxMessageId,
    ) -> NotificationStoreResult<Option<OutboxMessage>>;
}

/// Errors returned by notification stores.
#[derive(Debug, Clone, Error)]
pub enum NotificationStoreError {
    /// A row with the same identifier already exists.
    #[error("duplicate notification: {0}")]
    Duplicate(uuid::Uuid),

    /// The row was not found.
    #[error("notification not found: {0}")]
    NotFound(uuid::Uuid),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl NotificationStoreError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}

