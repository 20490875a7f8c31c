//! Diesel row models for the notification outbox.

use super::schema::notification_outbox;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde_json::Value;

/// Query result row and full-row write model for outbox messages.
#[derive(Debug, Clone, Queryable, Selectable, Insertable, AsChangeset)]
#[diesel(table_name = notification_outbox)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[diesel(treat_none_as_null = true)]
pub struct OutboxRow {
    /// Message identifier.
    pub id: uuid::Uuid,
    /// Payload kind.
    pub kind: String,
    /// Serialized payload.
    pub payload: Value,
    /// Delivery status.
    pub status: String,
    /// Failed attempts so far.
    pub attempts: i32,
    /// Most recent delivery error.
    pub last_error: Option<String>,
    /// Earliest next attempt.
    pub available_at: DateTime<Utc>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}
