//! Role approval aggregate.

use super::{ParseRoleTransferValueError, RoleTransferDomainError, TokenDigest};
use crate::authority::domain::UserId;
use chrono::{DateTime, Duration, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for a role approval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoleApprovalId(Uuid);

impl RoleApprovalId {
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

impl Default for RoleApprovalId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RoleApprovalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Lifecycle state of a role approval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApprovalStatus {
    /// Awaiting a decision.
    Pending,
    /// Transfer carried out.
    Approved,
    /// Transfer declined.
    Rejected,
    /// Token presented after its lifetime.
    Expired,
}

impl ApprovalStatus {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
            Self::Expired => "expired",
        }
    }
}

impl TryFrom<&str> for ApprovalStatus {
    type Error = ParseRoleTransferValueError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            "expired" => Ok(Self::Expired),
            _ => Err(ParseRoleTransferValueError {
                kind: "approval status",
                value: value.to_owned(),
            }),
        }
    }
}

/// Decision presented together with a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransferAction {
    /// Carry out the transfer.
    Approve,
    /// Decline the transfer.
    Reject,
}

impl TryFrom<&str> for TransferAction {
    type Error = ParseRoleTransferValueError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim() {
            "approve" => Ok(Self::Approve),
            "reject" => Ok(Self::Reject),
            _ => Err(ParseRoleTransferValueError {
                kind: "action",
                value: value.to_owned(),
            }),
        }
    }
}

/// Request to hand the highest authority role to another user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleApproval {
    id: RoleApprovalId,
    token_digest: TokenDigest,
    requested_by: UserId,
    target_user: UserId,
    status: ApprovalStatus,
    expires_at: DateTime<Utc>,
    processed_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted role approval.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedRoleApprovalData {
    /// Persisted identifier.
    pub id: RoleApprovalId,
    /// Persisted token digest.
    pub token_digest: TokenDigest,
    /// Persisted requester.
    pub requested_by: UserId,
    /// Persisted target user.
    pub target_user: UserId,
    /// Persisted status.
    pub status: ApprovalStatus,
    /// Persisted expiry.
    pub expires_at: DateTime<Utc>,
    /// Persisted processing timestamp.
    pub processed_at: Option<DateTime<Utc>>,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl RoleApproval {
    /// Creates a pending approval valid for `lifetime`.
    ///
    /// # Errors
    ///
    /// Returns [`RoleTransferDomainError::SelfTransfer`] when the requester
    /// and target are the same user.
    pub fn request(
        requested_by: UserId,
        target_user: UserId,
        token_digest: TokenDigest,
        lifetime: Duration,
        clock: &impl Clock,
    ) -> Result<Self, RoleTransferDomainError> {
        if requested_by == target_user {
            return Err(RoleTransferDomainError::SelfTransfer(target_user));
        }
        let now = clock.utc();
        Ok(Self {
            id: RoleApprovalId::new(),
            token_digest,
            requested_by,
            target_user,
            status: ApprovalStatus::Pending,
            expires_at: now
                .checked_add_signed(lifetime)
                .unwrap_or(DateTime::<Utc>::MAX_UTC),
            processed_at: None,
            created_at: now,
        })
    }

    /// Reconstructs an approval from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedRoleApprovalData) -> Self {
        Self {
            id: data.id,
            token_digest: data.token_digest,
            requested_by: data.requested_by,
            target_user: data.target_user,
            status: data.status,
            expires_at: data.expires_at,
            processed_at: data.processed_at,
            created_at: data.created_at,
        }
    }

    /// Returns the approval identifier.
    #[must_use]
    pub const fn id(&self) -> RoleApprovalId {
        self.id
    }

    /// Returns the stored token digest.
    #[must_use]
    pub const fn token_digest(&self) -> &TokenDigest {
        &self.token_digest
    }

    /// Returns the requesting user.
    #[must_use]
    pub const fn requested_by(&self) -> UserId {
        self.requested_by
    }

    /// Returns the user who would receive the role.
    #[must_use]
    pub const fn target_user(&self) -> UserId {
        self.target_user
    }

    /// Returns the lifecycle state.
    #[must_use]
    pub const fn status(&self) -> ApprovalStatus {
        self.status
    }

    /// Returns the expiry timestamp.
    #[must_use]
    pub const fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }

    /// Returns when a decision was recorded.
    #[must_use]
    pub const fn processed_at(&self) -> Option<DateTime<Utc>> {
        self.processed_at
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns whether the token lifetime has passed at `now`.
    #[must_use]
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }

    /// Marks the approval approved.
    ///
    /// # Errors
    ///
    /// Returns [`RoleTransferDomainError::AlreadyProcessed`] unless pending.
    pub fn approve(&mut self, clock: &impl Clock) -> Result<(), RoleTransferDomainError> {
        self.finish(ApprovalStatus::Approved, clock)
    }

    /// Marks the approval rejected.
    ///
    /// # Errors
    ///
    /// Returns [`RoleTransferDomainError::AlreadyProcessed`] unless pending.
    pub fn reject(&mut self, clock: &impl Clock) -> Result<(), RoleTransferDomainError> {
        self.finish(ApprovalStatus::Rejected, clock)
    }

    /// Marks the approval expired.
    ///
    /// # Errors
    ///
    /// Returns [`RoleTransferDomainError::AlreadyProcessed`] unless pending.
    pub fn expire(&mut self, clock: &impl Clock) -> Result<(), RoleTransferDomainError> {
        self.finish(ApprovalStatus::Expired, clock)
    }

    fn finish(
        &mut self,
        status: ApprovalStatus,
        clock: &impl Clock,
    ) -> Result<(), RoleTransferDomainError> {
        if self.status != ApprovalStatus::Pending {
            return Err(RoleTransferDomainError::AlreadyProcessed(self.status));
        }
        self.status = status;
        self.processed_at = Some(clock.utc());
        Ok(())
    }
}
