//! Resolution request aggregate.

use super::{ParseSlaValueError, SlaDomainError};
use crate::authority::domain::UserId;
use crate::notification::domain::SlaAlertKind;
use chrono::{DateTime, Duration, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for a resolution request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResolutionRequestId(Uuid);

impl ResolutionRequestId {
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

impl Default for ResolutionRequestId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ResolutionRequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Whether a request still needs attention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestStatus {
    /// Awaiting resolution.
    Open,
    /// Closed.
    Resolved,
}

impl RequestStatus {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Resolved => "resolved",
        }
    }
}

impl TryFrom<&str> for RequestStatus {
    type Error = ParseSlaValueError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim() {
            "open" => Ok(Self::Open),
            "resolved" => Ok(Self::Resolved),
            _ => Err(ParseSlaValueError(value.to_owned())),
        }
    }
}

/// A request with a service-level due timestamp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolutionRequest {
    id: ResolutionRequestId,
    title: String,
    requester_id: UserId,
    sla_due: DateTime<Utc>,
    status: RequestStatus,
    breach_alerted_at: Option<DateTime<Utc>>,
    warning_alerted_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted resolution request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedResolutionRequestData {
    /// Persisted identifier.
    pub id: ResolutionRequestId,
    /// Persisted title.
    pub title: String,
    /// Persisted requester.
    pub requester_id: UserId,
    /// Persisted due timestamp.
    pub sla_due: DateTime<Utc>,
    /// Persisted status.
    pub status: RequestStatus,
    /// Persisted breach alert timestamp.
    pub breach_alerted_at: Option<DateTime<Utc>>,
    /// Persisted warning alert timestamp.
    pub warning_alerted_at: Option<DateTime<Utc>>,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl ResolutionRequest {
    /// Opens a request due at `sla_due`.
    ///
    /// # Errors
    ///
    /// Returns [`SlaDomainError::EmptyTitle`] when the title is blank.
    pub fn open(
        title: impl Into<String>,
        requester_id: UserId,
        sla_due: DateTime<Utc>,
        clock: &impl Clock,
    ) -> Result<Self, SlaDomainError> {
        let raw_title = title.into();
        let trimmed = raw_title.trim();
        if trimmed.is_empty() {
            return Err(SlaDomainError::EmptyTitle);
        }
        let now = clock.utc();
        Ok(Self {
            id: ResolutionRequestId::new(),
            title: trimmed.to_owned(),
            requester_id,
            sla_due,
            status: RequestStatus::Open,
            breach_alerted_at: None,
            warning_alerted_at: None,
            created_at: now,
            updated_at: now,
        })
    }

    /// Reconstructs a request from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedResolutionRequestData) -> Self {
        Self {
            id: data.id,
            title: data.title,
            requester_id: data.requester_id,
            sla_due: data.sla_due,
            status: data.status,
            breach_alerted_at: data.breach_alerted_at,
            warning_alerted_at: data.warning_alerted_at,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the request identifier.
    #[must_use]
    pub const fn id(&self) -> ResolutionRequestId {
        self.id
    }

    /// Returns the title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the requester.
    #[must_use]
    pub const fn requester_id(&self) -> UserId {
        self.requester_id
    }

    /// Returns the due timestamp.
    #[must_use]
    pub const fn sla_due(&self) -> DateTime<Utc> {
        self.sla_due
    }

    /// Returns the status.
    #[must_use]
    pub const fn status(&self) -> RequestStatus {
        self.status
    }

    /// Returns when the breach alert was raised.
    #[must_use]
    pub const fn breach_alerted_at(&self) -> Option<DateTime<Utc>> {
        self.breach_alerted_at
    }

    /// Returns when the approaching alert was raised.
    #[must_use]
    pub const fn warning_alerted_at(&self) -> Option<DateTime<Utc>> {
        self.warning_alerted_at
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

    /// Returns the alert owed at `now`, if any.
    ///
    /// A breach takes precedence; an approaching alert is owed only before
    /// the due time and inside `warning_window`.
    #[must_use]
    pub fn alert_due(&self, now: DateTime<Utc>, warning_window: Duration) -> Option<SlaAlertKind> {
        if self.status != RequestStatus::Open {
            return None;
        }
        if now >= self.sla_due {
            return self.breach_alerted_at.is_none().then_some(SlaAlertKind::Breach);
        }
        let in_window = self
            .sla_due
            .checked_sub_signed(warning_window)
            .is_none_or(|window_start| now >= window_start);
        (in_window && self.warning_alerted_at.is_none()).then_some(SlaAlertKind::Approaching)
    }

    /// Stamps the request as alerted for `kind`.
    pub fn mark_alerted(&mut self, kind: SlaAlertKind, clock: &impl Clock) {
        let now = clock.utc();
        match kind {
            SlaAlertKind::Breach => self.breach_alerted_at = Some(now),
            SlaAlertKind::Approaching => self.warning_alerted_at = Some(now),
        }
        self.updated_at = now;
    }

    /// Closes the request.
    ///
    /// # Errors
    ///
    /// Returns [`SlaDomainError::AlreadyResolved`] when already closed.
    pub fn resolve(&mut self, clock: &impl Clock) -> Result<(), SlaDomainError> {
        if self.status == RequestStatus::Resolved {
            return Err(SlaDomainError::AlreadyResolved(self.id));
        }
        self.status = RequestStatus::Resolved;
        self.updated_at = clock.utc();
        Ok(())
    }
}
