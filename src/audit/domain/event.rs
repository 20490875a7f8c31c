//! Audit event aggregate and its classification enums.

use super::{AuditEventId, ParseAuditValueError};
use crate::authority::domain::{AuthorizationContext, Role, UserId};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// Kind of entity an audit event refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityType {
    /// A submitted task.
    Task,
    /// A submitted work report.
    WorkReport,
    /// A pending transfer of the highest authority role.
    RoleApproval,
    /// A resolution request tracked against an SLA.
    ResolutionRequest,
}

impl EntityType {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Task => "task",
            Self::WorkReport => "work_report",
            Self::RoleApproval => "role_approval",
            Self::ResolutionRequest => "resolution_request",
        }
    }
}

impl TryFrom<&str> for EntityType {
    type Error = ParseAuditValueError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim() {
            "task" => Ok(Self::Task),
            "work_report" => Ok(Self::WorkReport),
            "role_approval" => Ok(Self::RoleApproval),
            "resolution_request" => Ok(Self::ResolutionRequest),
            _ => Err(ParseAuditValueError {
                kind: "entity type",
                value: value.to_owned(),
            }),
        }
    }
}

/// Action recorded by an audit event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditAction {
    /// A task or work report was submitted.
    Submitted,
    /// A team lead approved a submission.
    TeamLeadApproved,
    /// A team lead rejected a submission.
    TeamLeadRejected,
    /// An admin or overseer approved over the team lead.
    OverrideApproved,
    /// An admin or overseer rejected over the team lead.
    OverrideRejected,
    /// The earnings rate of a submission changed.
    RateOverride,
    /// A transfer of the highest role was requested.
    RoleTransferRequested,
    /// A transfer of the highest role was approved.
    RoleTransferApproved,
    /// A transfer of the highest role was rejected.
    RoleTransferRejected,
    /// A transfer of the highest role lapsed unused.
    RoleTransferExpired,
    /// An SLA alert was raised for a resolution request.
    SlaAlertRaised,
}

impl AuditAction {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Submitted => "submitted",
            Self::TeamLeadApproved => "team_lead_approved",
            Self::TeamLeadRejected => "team_lead_rejected",
            Self::OverrideApproved => "override_approved",
            Self::OverrideRejected => "override_rejected",
            Self::RateOverride => "rate_override",
            Self::RoleTransferRequested => "role_transfer_requested",
            Self::RoleTransferApproved => "role_transfer_approved",
            Self::RoleTransferRejected => "role_transfer_rejected",
            Self::RoleTransferExpired => "role_transfer_expired",
            Self::SlaAlertRaised => "sla_alert_raised",
        }
    }
}

impl TryFrom<&str> for AuditAction {
    type Error = ParseAuditValueError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim() {
            "submitted" => Ok(Self::Submitted),
            "team_lead_approved" => Ok(Self::TeamLeadApproved),
            "team_lead_rejected" => Ok(Self::TeamLeadRejected),
            "override_approved" => Ok(Self::OverrideApproved),
            "override_rejected" => Ok(Self::OverrideRejected),
            "rate_override" => Ok(Self::RateOverride),
            "role_transfer_requested" => Ok(Self::RoleTransferRequested),
            "role_transfer_approved" => Ok(Self::RoleTransferApproved),
            "role_transfer_rejected" => Ok(Self::RoleTransferRejected),
            "role_transfer_expired" => Ok(Self::RoleTransferExpired),
            "sla_alert_raised" => Ok(Self::SlaAlertRaised),
            _ => Err(ParseAuditValueError {
                kind: "action",
                value: value.to_owned(),
            }),
        }
    }
}

/// Reference to the entity an event is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntityRef {
    /// Kind of entity.
    pub entity_type: EntityType,
    /// Identifier of the entity.
    pub entity_id: Uuid,
}

impl EntityRef {
    /// Creates an entity reference.
    #[must_use]
    pub const fn new(entity_type: EntityType, entity_id: Uuid) -> Self {
        Self {
            entity_type,
            entity_id,
        }
    }
}

/// A single append-only audit record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditEvent {
    id: AuditEventId,
    entity: EntityRef,
    action: AuditAction,
    actor_id: Option<UserId>,
    actor_role: Option<Role>,
    previous_value: Option<Value>,
    new_value: Option<Value>,
    note: Option<String>,
    occurred_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted audit event.
#[derive(Debug, Clone, PartialEq)]
pub struct PersistedAuditEventData {
    /// Persisted event identifier.
    pub id: AuditEventId,
    /// Persisted entity reference.
    pub entity: EntityRef,
    /// Persisted action.
    pub action: AuditAction,
    /// Persisted actor, if the action was performed by a user.
    pub actor_id: Option<UserId>,
    /// Persisted actor role at the time of the action.
    pub actor_role: Option<Role>,
    /// Persisted value before the change.
    pub previous_value: Option<Value>,
    /// Persisted value after the change.
    pub new_value: Option<Value>,
    /// Persisted free-text note.
    pub note: Option<String>,
    /// Persisted event timestamp.
    pub occurred_at: DateTime<Utc>,
}

impl AuditEvent {
    /// Creates an event for `action` on `entity`, stamped with the clock.
    #[must_use]
    pub fn new(entity: EntityRef, action: AuditAction, clock: &impl Clock) -> Self {
        Self {
            id: AuditEventId::new(),
            entity,
            action,
            actor_id: None,
            actor_role: None,
            previous_value: None,
            new_value: None,
            note: None,
            occurred_at: clock.utc(),
        }
    }

    /// Reconstructs an event from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedAuditEventData) -> Self {
        Self {
            id: data.id,
            entity: data.entity,
            action: data.action,
            actor_id: data.actor_id,
            actor_role: data.actor_role,
            previous_value: data.previous_value,
            new_value: data.new_value,
            note: data.note,
            occurred_at: data.occurred_at,
        }
    }

    /// Records the acting session.
    #[must_use]
    pub fn with_actor(mut self, actor: &AuthorizationContext) -> Self {
        self.actor_id = Some(actor.user_id());
        self.actor_role = Some(actor.role());
        self
    }

    /// Records the values before and after the change.
    #[must_use]
    pub fn with_change(mut self, previous: Value, new: Value) -> Self {
        self.previous_value = Some(previous);
        self.new_value = Some(new);
        self
    }

    /// Records the value after the change.
    #[must_use]
    pub fn with_new_value(mut self, new: Value) -> Self {
        self.new_value = Some(new);
        self
    }

    /// Attaches a free-text note.
    #[must_use]
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    /// Returns the event identifier.
    #[must_use]
    pub const fn id(&self) -> AuditEventId {
        self.id
    }

    /// Returns the entity the event refers to.
    #[must_use]
    pub const fn entity(&self) -> EntityRef {
        self.entity
    }

    /// Returns the recorded action.
    #[must_use]
    pub const fn action(&self) -> AuditAction {
        self.action
    }

    /// Returns the acting user, if any.
    #[must_use]
    pub const fn actor_id(&self) -> Option<UserId> {
        self.actor_id
    }

    /// Returns the acting role, if any.
    #[must_use]
    pub const fn actor_role(&self) -> Option<Role> {
        self.actor_role
    }

    /// Returns the value before the change.
    #[must_use]
    pub const fn previous_value(&self) -> Option<&Value> {
        self.previous_value.as_ref()
    }

    /// Returns the value after the change.
    #[must_use]
    pub const fn new_value(&self) -> Option<&Value> {
        self.new_value.as_ref()
    }

    /// Returns the free-text note.
    #[must_use]
    pub fn note(&self) -> Option<&str> {
        self.note.as_deref()
    }

    /// Returns when the action happened.
    #[must_use]
    pub const fn occurred_at(&self) -> DateTime<Utc> {
        self.occurred_at
    }
}
