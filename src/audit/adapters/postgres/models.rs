//! Diesel row models for audit persistence.

use super::schema::audit_events;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde_json::Value;

/// Query result row for audit events.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = audit_events)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct AuditEventRow {
    /// Event identifier.
    pub id: uuid::Uuid,
    /// Entity kind.
    pub entity_type: String,
    /// Entity identifier.
    pub entity_id: uuid::Uuid,
    /// Recorded action.
    pub action: String,
    /// Acting user.
    pub actor_id: Option<uuid::Uuid>,
    /// Acting role.
    pub actor_role: Option<String>,
    /// Value before the change.
    pub previous_value: Option<Value>,
    /// Value after the change.
    pub new_value: Option<Value>,
    /// Free-text note.
    pub note: Option<String>,
    /// Event timestamp.
    pub occurred_at: DateTime<Utc>,
}

/// Insert model for audit events.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = audit_events)]
pub struct NewAuditEventRow {
    /// Event identifier.
    pub id: uuid::Uuid,
    /// Entity kind.
    pub entity_type: String,
    /// Entity identifier.
    pub entity_id: uuid::Uuid,
    /// Recorded action.
    pub action: String,
    /// Acting user.
    pub actor_id: Option<uuid::Uuid>,
    /// Acting role.
    pub actor_role: Option<String>,
    /// Value before the change.
    pub previous_value: Option<Value>,
    /// Value after the change.
    pub new_value: Option<Value>,
    /// Free-text note.
    pub note: Option<String>,
    /// Event timestamp.
    pub occurred_at: DateTime<Utc>,
}
