//! Requesting and processing top-role transfers.

use super::page::{RoleTransferResponse, TransferOutcome};
use crate::audit::{
    domain::{AuditAction, AuditEvent, EntityRef, EntityType},
    ports::{AuditLog, AuditLogError},
};
use crate::authority::domain::{AuthorityError, AuthorizationContext, Capability, Role, UserId};
use crate::role_transfer::{
    domain::{
        ApprovalStatus, ApprovalToken, RoleApproval, RoleTransferDomainError, TokenDigest,
        TransferAction,
    },
    ports::{
        RoleApprovalRepository, RoleApprovalRepositoryError, RoleAssignmentError, RoleAssignments,
    },
};
use chrono::Duration;
use mockable::Clock;
use serde_json::json;
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

/// Service-level errors for role transfers.
///
/// Client mistakes (missing or unknown tokens, bad actions, reused or expired
/// tokens) are reported through [`RoleTransferResponse`] instead.
#[derive(Debug, Error)]
pub enum RoleTransferError {
    /// The actor may not request transfers.
    #[error(transparent)]
    Authority(#[from] AuthorityError),
    /// The request is invalid.
    #[error(transparent)]
    Domain(#[from] RoleTransferDomainError),
    /// The approval store failed.
    #[error(transparent)]
    Repository(#[from] RoleApprovalRepositoryError),
    /// A role could not be reassigned.
    #[error(transparent)]
    Assignment(#[from] RoleAssignmentError),
    /// The audit log rejected an event.
    #[error(transparent)]
    Audit(#[from] AuditLogError),
    /// The confirmation page failed to render.
    #[error("failed to render confirmation page: {0}")]
    Render(String),
}

impl From<minijinja::Error> for RoleTransferError {
    fn from(err: minijinja::Error) -> Self {
        Self::Render(err.to_string())
    }
}

/// Result type for role transfer operations.
pub type RoleTransferResult<T> = Result<T, RoleTransferError>;

/// A newly requested transfer and the token that decides it.
#[derive(Debug, Clone)]
pub struct IssuedTransfer {
    /// The stored approval.
    pub approval: RoleApproval,
    /// Plaintext token; not recoverable once dropped.
    pub token: ApprovalToken,
}

/// Role transfer orchestration service.
#[derive(Clone)]
pub struct RoleTransferService<R, A, L, C>
where
    R: RoleApprovalRepository,
    A: RoleAssignments,
    L: AuditLog,
    C: Clock + Send + Sync,
{
    approvals: Arc<R>,
    assignments: Arc<A>,
    audit: Arc<L>,
    clock: Arc<C>,
    token_lifetime: Duration,
}

impl<R, A, L, C> RoleTransferService<R, A, L, C>
where
    R: RoleApprovalRepository,
    A: RoleAssignments,
    L: AuditLog,
    C: Clock + Send + Sync,
{
    /// Creates a service issuing tokens valid for 24 hours.
    #[must_use]
    pub fn new(approvals: Arc<R>, assignments: Arc<A>, audit: Arc<L>, clock: Arc<C>) -> Self {
        Self {
            approvals,
            assignments,
            audit,
            clock,
            token_lifetime: Duration::hours(24),
        }
    }

    /// Overrides the token lifetime.
    #[must_use]
    pub const fn with_token_lifetime(mut self, lifetime: Duration) -> Self {
        self.token_lifetime = lifetime;
        self
    }

    /// Requests transfer of the highest authority role to `target`.
    ///
    /// # Errors
    ///
    /// Returns [`RoleTransferError::Authority`] unless the actor may transfer
    /// the role, [`RoleTransferError::Domain`] for a self-transfer, and
    /// repository or audit failures otherwise.
    pub async fn request_transfer(
        &self,
        actor: &AuthorizationContext,
        target: UserId,
    ) -> RoleTransferResult<IssuedTransfer> {
        actor.require(Capability::TransferTopRole)?;
        let token = ApprovalToken::generate();
        let approval = RoleApproval::request(
            actor.user_id(),
            target,
            token.digest(),
            self.token_lifetime,
            &*self.clock,
        )?;
        self.approvals.store(&approval).await?;

        let event = AuditEvent::new(
            entity_of(&approval),
            AuditAction::RoleTransferRequested,
            &*self.clock,
        )
        .with_actor(actor)
        .with_new_value(json!({
            "target_user": target,
            "expires_at": approval.expires_at(),
        }));
        self.audit.append(&event).await?;
        info!(
            approval_id = %approval.id(),
            requested_by = %actor.user_id(),
            target_user = %target,
            "role transfer requested"
        );
        Ok(IssuedTransfer { approval, token })
    }

    /// Applies `action` to the approval identified by `token`.
    ///
    /// # Errors
    ///
    /// Returns [`RoleTransferError`] only for infrastructure failures; every
    /// client-facing outcome is an `Ok` response with its status code.
    pub async fn process(
        &self,
        token: &str,
        action: &str,
    ) -> RoleTransferResult<RoleTransferResponse> {
        let presented = token.trim();
        if presented.is_empty() {
            return Ok(RoleTransferResponse::render(TransferOutcome::MissingToken)?);
        }
        let Ok(transfer_action) = TransferAction::try_from(action) else {
            return Ok(RoleTransferResponse::render(TransferOutcome::InvalidAction)?);
        };
        let Some(mut approval) = self
            .approvals
            .find_by_digest(&TokenDigest::of(presented))
            .await?
        else {
            return Ok(RoleTransferResponse::render(TransferOutcome::UnknownToken)?);
        };

        if approval.status() != ApprovalStatus::Pending {
            warn!(
                approval_id = %approval.id(),
                status = approval.status().as_str(),
                "role transfer token reused"
            );
            return Ok(RoleTransferResponse::render(
                TransferOutcome::AlreadyProcessed(approval.status()),
            )?);
        }

        let outcome = if approval.is_expired_at(self.clock.utc()) {
            approval.expire(&*self.clock)?;
            self.approvals.update(&approval).await?;
            let event = self.decision_event(&approval, AuditAction::RoleTransferExpired);
            self.audit.append(&event).await?;
            TransferOutcome::Expired
        } else {
            match transfer_action {
                TransferAction::Approve => self.approve(&mut approval).await?,
                TransferAction::Reject => {
                    approval.reject(&*self.clock)?;
                    self.approvals.update(&approval).await?;
                    let event = self.decision_event(&approval, AuditAction::RoleTransferRejected);
                    self.audit.append(&event).await?;
                    TransferOutcome::Rejected
                }
            }
        };
        info!(
            approval_id = %approval.id(),
            status = approval.status().as_str(),
            "role transfer processed"
        );
        Ok(RoleTransferResponse::render(outcome)?)
    }

    async fn approve(&self, approval: &mut RoleApproval) -> RoleTransferResult<TransferOutcome> {
        let target = approval.target_user();
        let current_holders = self.assignments.holders_of(Role::GeneralOverseer).await?;
        let mut demoted = Vec::new();
        for holder in current_holders.into_iter().filter(|holder| *holder != target) {
            self.assignments.assign_role(holder, Role::Admin).await?;
            demoted.push(holder);
        }
        self.assignments
            .assign_role(target, Role::GeneralOverseer)
            .await?;

        approval.approve(&*self.clock)?;
        self.approvals.update(approval).await?;
        let demoted_list = demoted
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        let event = self
            .decision_event(approval, AuditAction::RoleTransferApproved)
            .with_note(format!("promoted {target}; demoted [{demoted_list}]"));
        self.audit.append(&event).await?;
        Ok(TransferOutcome::Approved)
    }

    fn decision_event(&self, approval: &RoleApproval, action: AuditAction) -> AuditEvent {
        AuditEvent::new(entity_of(approval), action, &*self.clock).with_change(
            json!(ApprovalStatus::Pending.as_str()),
            json!(approval.status().as_str()),
        )
    }
}

fn entity_of(approval: &RoleApproval) -> EntityRef {
    EntityRef::new(EntityType::RoleApproval, approval.id().into_inner())
}
