//! Outbox message aggregate and retry policy.

use super::{NotificationPayload, ParseNotificationValueError};
use chrono::{DateTime, Duration, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for an outbox message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OutboxMessageId(Uuid);

impl OutboxMessageId {
    /// Creates a new random identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates an identifier from an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the wrapped UUID.
    #[must_use]
    pub const fn into_inner(self) -> Uuid {
        self.0
    }
}

impl Default for OutboxMessageId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for OutboxMessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Delivery state of an outbox message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeliveryStatus {
    /// Waiting for (another) delivery attempt.
    Pending,
    /// Delivered to the mailer.
    Delivered,
    /// Attempt budget exhausted.
    Failed,
}

impl DeliveryStatus {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Delivered => "delivered",
            Self::Failed => "failed",
        }
    }
}

impl TryFrom<&str> for DeliveryStatus {
    type Error = ParseNotificationValueError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim() {
            "pending" => Ok(Self::Pending),
            "delivered" => Ok(Self::Delivered),
            "failed" => Ok(Self::Failed),
            _ => Err(ParseNotificationValueError {
                kind: "delivery status",
                value: value.to_owned(),
            }),
        }
    }
}

/// Bounded exponential back-off for failed deliveries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    max_attempts: u32,
    base_delay: Duration,
}

impl RetryPolicy {
    /// Largest exponent applied to the base delay.
    const MAX_BACKOFF_EXPONENT: u32 = 10;

    /// Upper bound on any single back-off delay.
    pub const MAX_DELAY: Duration = Duration::days(7);

    /// Creates a policy; `max_attempts` is clamped to at least one and
    /// `base_delay` to the range `0..=MAX_DELAY`.
    #[must_use]
    pub fn new(max_attempts: u32, base_delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            base_delay: base_delay.clamp(Duration::zero(), Self::MAX_DELAY),
        }
    }

    /// Returns the maximum number of delivery attempts.
    #[must_use]
    pub const fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Returns the delay before the next attempt after `attempts` failures,
    /// never more than [`Self::MAX_DELAY`].
    #[must_use]
    pub fn delay_after(&self, attempts: u32) -> Duration {
        let exponent = attempts.saturating_sub(1).min(Self::MAX_BACKOFF_EXPONENT);
        let factor = 1_i32 << exponent;
        self.base_delay
            .checked_mul(factor)
            .map_or(Self::MAX_DELAY, |delay| delay.min(Self::MAX_DELAY))
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(5, Duration::seconds(30))
    }
}

/// A notification waiting for, or done with, delivery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutboxMessage {
    id: OutboxMessageId,
    payload: NotificationPayload,
    status: DeliveryStatus,
    attempts: u32,
    last_error: Option<String>,
    available_at: DateTime<Utc>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted outbox message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedOutboxData {
    /// Persisted identifier.
    pub id: OutboxMessageId,
    /// Persisted payload.
    pub payload: NotificationPayload,
    /// Persisted delivery status.
    pub status: DeliveryStatus,
    /// Persisted attempt count.
    pub attempts: u32,
    /// Persisted last delivery error.
    pub last_error: Option<String>,
    /// Persisted earliest next attempt.
    pub available_at: DateTime<Utc>,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl OutboxMessage {
    /// Creates a pending message available immediately.
    #[must_use]
    pub fn new(payload: NotificationPayload, clock: &impl Clock) -> Self {
        let timestamp = clock.utc();
        Self {
            id: OutboxMessageId::new(),
            payload,
            status: DeliveryStatus::Pending,
            attempts: 0,
            last_error: None,
            available_at: timestamp,
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Reconstructs a message from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedOutboxData) -> Self {
        Self {
            id: data.id,
            payload: data.payload,
            status: data.status,
            attempts: data.attempts,
            last_error: data.last_error,
            available_at: data.available_at,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the message identifier.
    #[must_use]
    pub const fn id(&self) -> OutboxMessageId {
        self.id
    }

    /// Returns the payload.
    #[must_use]
    pub const fn payload(&self) -> &NotificationPayload {
        &self.payload
    }

    /// Returns the delivery status.
    #[must_use]
    pub const fn status(&self) -> DeliveryStatus {
        self.status
    }

    /// Returns the number of failed attempts so far.
    #[must_use]
    pub const fn attempts(&self) -> u32 {
        self.attempts
    }

    /// Returns the most recent delivery error.
    #[must_use]
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Returns the earliest time of the next attempt.
    #[must_use]
    pub const fn available_at(&self) -> DateTime<Utc> {
        self.available_at
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest update timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Returns whether the message should be attempted at `now`.
    #[must_use]
    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        self.status == DeliveryStatus::Pending && self.available_at <= now
    }

    /// Marks the message as delivered.
    pub fn mark_delivered(&mut self, clock: &impl Clock) {
        self.status = DeliveryStatus::Delivered;
        self.last_error = None;
        self.updated_at = clock.utc();
    }

    /// Records a failed attempt and schedules the next one, or gives up once
    /// the policy's attempt budget is spent.
    pub fn record_failure(
        &mut self,
        error: impl Into<String>,
        policy: &RetryPolicy,
        clock: &impl Clock,
    ) {
        let now = clock.utc();
        self.attempts = self.attempts.saturating_add(1);
        self.last_error = Some(error.into());
        if self.attempts >= policy.max_attempts() {
            self.status = DeliveryStatus::Failed;
        } else {
            self.available_at = now
                .checked_add_signed(policy.delay_after(self.attempts))
                .unwrap_or(DateTime::<Utc>::MAX_UTC);
        }
        self.updated_at = now;
    }
}
