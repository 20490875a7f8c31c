//! In-memory notification adapters for tests and local runs.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::{
    Arc, Mutex, RwLock,
    atomic::{AtomicU32, Ordering},
};

use crate::authority::domain::UserId;
use crate::notification::{
    domain::{EmailMessage, InAppNotification, OutboxMessage, OutboxMessageId},
    ports::{
        DeliveryError, InAppNotifications, Mailer, NotificationOutbox, NotificationStoreError,
        NotificationStoreResult,
    },
};

fn poisoned(err: impl ToString) -> NotificationStoreError {
    NotificationStoreError::persistence(std::io::Error::other(err.to_string()))
}

/// Thread-safe in-memory outbox.
///
/// A number of upcoming enqueues can be made to fail to exercise publishers'
/// error paths.
#[derive(Debug, Clone, Default)]
pub struct InMemoryOutbox {
    messages: Arc<RwLock<HashMap<OutboxMessageId, OutboxMessage>>>,
    enqueue_failures: Arc<AtomicU32>,
}

impl InMemoryOutbox {
    /// Creates an empty outbox.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns every message regardless of status, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`NotificationStoreError::Persistence`] when the lock is poisoned.
    pub fn all(&self) -> NotificationStoreResult<Vec<OutboxMessage>> {
        let messages = self.messages.read().map_err(poisoned)?;
        let mut all: Vec<OutboxMessage> = messages.values().cloned().collect();
        all.sort_by_key(OutboxMessage::created_at);
        Ok(all)
    }

    /// Makes the next `count` enqueues fail with a persistence error.
    pub fn fail_next_enqueue(&self, count: u32) {
        self.enqueue_failures.store(count, Ordering::SeqCst);
    }

    fn take_enqueue_failure(&self) -> bool {
        self.enqueue_failures
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |left| left.checked_sub(1))
            .is_ok()
    }
}

#[async_trait]
impl NotificationOutbox for InMemoryOutbox {
    async fn enqueue(&self, message: &OutboxMessage) -> NotificationStoreResult<()> {
        if self.take_enqueue_failure() {
            return Err(poisoned("simulated outbox failure"));
        }
        let mut messages = self.messages.write().map_err(poisoned)?;
        if messages.contains_key(&message.id()) {
            return Err(NotificationStoreError::Duplicate(message.id().into_inner()));
        }
        messages.insert(message.id(), message.clone());
        Ok(())
    }

    async fn due(
        &self,
        now: DateTime<Utc>,
        limit: usize,
    ) -> NotificationStoreResult<Vec<OutboxMessage>> {
        let messages = self.messages.read().map_err(poisoned)?;
        let mut due: Vec<OutboxMessage> = messages
            .values()
            .filter(|message| message.is_due(now))
            .cloned()
            .collect();
        due.sort_by_key(OutboxMessage::available_at);
        due.truncate(limit);
        Ok(due)
    }

    async fn update(&self, message: &OutboxMessage) -> NotificationStoreResult<()> {
        let mut messages = self.messages.write().map_err(poisoned)?;
        let slot = messages
            .get_mut(&message.id())
            .ok_or(NotificationStoreError::NotFound(message.id().into_inner()))?;
        *slot = message.clone();
        Ok(())
    }

    async fn find_by_id(
        &self,
        id: OutboxMessageId,
    ) -> NotificationStoreResult<Option<OutboxMessage>> {
        let messages = self.messages.read().map_err(poisoned)?;
        Ok(messages.get(&id).cloned())
    }
}

/// Thread-safe in-memory store of in-app notification rows.
#[derive(Debug, Clone, Default)]
pub struct InMemoryInAppNotifications {
    rows: Arc<RwLock<Vec<InAppNotification>>>,
}

impl InMemoryInAppNotifications {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl InAppNotifications for InMemoryInAppNotifications {
    async fn insert(&self, notification: &InAppNotification) -> NotificationStoreResult<()> {
        let mut rows = self.rows.write().map_err(poisoned)?;
        if rows.iter().any(|row| row.id == notification.id) {
            return Err(NotificationStoreError::Duplicate(notification.id.into_inner()));
        }
        rows.push(notification.clone());
        Ok(())
    }

    async fn list_for_user(
        &self,
        user_id: UserId,
    ) -> NotificationStoreResult<Vec<InAppNotification>> {
        let rows = self.rows.read().map_err(poisoned)?;
        let mut selected: Vec<InAppNotification> = rows
            .iter()
            .filter(|row| row.user_id == user_id)
            .cloned()
            .collect();
        selected.sort_by(|left, right| right.created_at.cmp(&left.created_at));
        Ok(selected)
    }
}

/// Mailer that records messages instead of sending them.
///
/// A number of upcoming sends can be made to fail to exercise retries.
#[derive(Debug, Clone, Default)]
pub struct RecordingMailer {
    state: Arc<Mutex<RecordingMailerState>>,
}

#[derive(Debug, Default)]
struct RecordingMailerState {
    sent: Vec<EmailMessage>,
    failures_remaining: u32,
}

impl RecordingMailer {
    /// Creates a mailer that accepts every message.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes the next `count` sends fail with a transport error.
    pub fn fail_next(&self, count: u32) {
        if let Ok(mut state) = self.state.lock() {
            state.failures_remaining = count;
        }
    }

    /// Returns the messages accepted so far.
    #[must_use]
    pub fn sent(&self) -> Vec<EmailMessage> {
        self.state
            .lock()
            .map(|state| state.sent.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, message: &EmailMessage) -> Result<(), DeliveryError> {
        let mut state = self
            .state
            .lock()
            .map_err(|err| DeliveryError::transport(std::io::Error::other(err.to_string())))?;
        if state.failures_remaining > 0 {
            state.failures_remaining -= 1;
            return Err(DeliveryError::transport(std::io::Error::other(
                "simulated transport failure",
            )));
        }
        state.sent.push(message.clone());
        Ok(())
    }
}
