//! Review workflow orchestration: submission, team-lead review, override and
//! rate adjustment.

use super::requests::{
    OverrideRequest, RateAdjustmentRequest, SubmitWorkRequest, TeamLeadReviewRequest,
};
use crate::audit::{
    domain::{AuditAction, AuditEvent, EntityRef},
    ports::{AuditLog, AuditLogError},
};
use crate::authority::domain::{
    AuthorityError, AuthorizationContext, Capability, ConfirmationPolicy, Justification, UserId,
};
use crate::notification::{
    domain::{NotificationPayload, OutboxMessage, ReviewNotification},
    ports::NotificationOutbox,
};
use crate::review::{
    domain::{
        Decision, FinalStatus, NewSubmission, RecordId, RecordKind, ReviewDomainError,
        ReviewRecord,
    },
    ports::{ReviewRepository, ReviewRepositoryError},
};
use mockable::Clock;
use serde_json::json;
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

/// Service-level errors for the review workflow.
#[derive(Debug, Error)]
pub enum ReviewWorkflowError {
    /// The actor lacks a capability or the confirmation is incomplete.
    #[error(transparent)]
    Authority(#[from] AuthorityError),
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] ReviewDomainError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] ReviewRepositoryError),
    /// The audit log rejected an event.
    #[error(transparent)]
    Audit(#[from] AuditLogError),
    /// The record does not exist.
    #[error("review record not found: {0}")]
    NotFound(RecordId),
}

/// Result type for review workflow operations.
pub type ReviewWorkflowResult<T> = Result<T, ReviewWorkflowError>;

/// Review workflow orchestration service.
#[derive(Clone)]
pub struct ReviewWorkflowService<R, A, O, C>
where
    R: ReviewRepository,
    A: AuditLog,
    O: NotificationOutbox,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    audit: Arc<A>,
    outbox: Arc<O>,
    clock: Arc<C>,
}

impl<R, A, O, C> ReviewWorkflowService<R, A, O, C>
where
    R: ReviewRepository,
    A: AuditLog,
    O: NotificationOutbox,
    C: Clock + Send + Sync,
{
    /// Creates a new review workflow service.
    #[must_use]
    pub const fn new(repository: Arc<R>, audit: Arc<A>, outbox: Arc<O>, clock: Arc<C>) -> Self {
        Self {
            repository,
            audit,
            outbox,
            clock,
        }
    }

    /// Submits a task or work report on behalf of the actor.
    ///
    /// # Errors
    ///
    /// Returns [`ReviewWorkflowError::Authority`] when the actor may not
    /// submit work, [`ReviewWorkflowError::Domain`] for invalid fields, and
    /// repository or audit failures otherwise.
    pub async fn submit(
        &self,
        actor: &AuthorizationContext,
        request: SubmitWorkRequest,
    ) -> ReviewWorkflowResult<ReviewRecord> {
        actor.require(Capability::SubmitWork)?;
        let record = ReviewRecord::submit(
            NewSubmission {
                kind: request.kind,
                submitter_id: actor.user_id(),
                title: request.title,
                platform: request.platform,
                work_date: request.work_date,
                hours_worked: request.hours_worked,
                rate: request.rate,
            },
            &*self.clock,
        )?;
        self.repository.store(&record).await?;

        let event = AuditEvent::new(entity_of(&record), AuditAction::Submitted, &*self.clock)
            .with_actor(actor)
            .with_new_value(json!({
                "hours_worked": record.hours_worked().to_string(),
                "rate": record.current_rate().to_string(),
                "earnings": record.earnings().to_string(),
            }));
        self.audit.append(&event).await?;
        info!(
            record_id = %record.id(),
            kind = record.kind().as_str(),
            submitter = %actor.user_id(),
            "work submitted"
        );
        Ok(record)
    }

    /// Records a team lead's decision on a record awaiting first-tier review.
    ///
    /// # Errors
    ///
    /// Returns [`ReviewWorkflowError::Authority`] unless the actor reviews as
    /// team lead, [`ReviewWorkflowError::NotFound`] for an unknown record and
    /// [`ReviewWorkflowError::Domain`] when the record is not awaiting review
    /// or a rejection has no reason. [`ReviewWorkflowError::Audit`] means the
    /// decision was stored and the submitter notified, but the audit event
    /// was not written.
    pub async fn team_lead_review(
        &self,
        actor: &AuthorizationContext,
        request: TeamLeadReviewRequest,
    ) -> ReviewWorkflowResult<ReviewRecord> {
        actor.require(Capability::ReviewAsTeamLead)?;
        let reason = request
            .reason
            .and_then(|raw| Justification::new(raw).ok());

        let mut record = self.load(request.record_id).await?;
        record.record_team_lead_decision(
            actor.user_id(),
            request.decision,
            reason.clone(),
            &*self.clock,
        )?;
        self.repository.update(&record).await?;

        let action = match request.decision {
            Decision::Approved => AuditAction::TeamLeadApproved,
            Decision::Rejected => AuditAction::TeamLeadRejected,
        };
        let mut event = AuditEvent::new(entity_of(&record), action, &*self.clock)
            .with_actor(actor)
            .with_change(
                json!(FinalStatus::Pending.as_str()),
                json!(record.final_status().as_str()),
            );
        if let Some(justification) = &reason {
            event = event.with_note(justification.as_str());
        }
        info!(
            record_id = %record.id(),
            decision = request.decision.as_str(),
            reviewer = %actor.user_id(),
            "team lead review recorded"
        );

        self.publish(&record, request.decision, reason.as_ref(), false)
            .await;
        self.audit.append(&event).await?;
        Ok(record)
    }

    /// Applies an authoritative override decision.
    ///
    /// The tier-scaled confirmation policy is checked before the record is
    /// read, so an incomplete confirmation never touches storage.
    ///
    /// # Errors
    ///
    /// Returns [`ReviewWorkflowError::Authority`] when the actor may not
    /// override or the confirmation is incomplete, and
    /// [`ReviewWorkflowError::NotFound`] for an unknown record. As with
    /// [`Self::team_lead_review`], an audit failure is reported only after
    /// the decision is stored and the notification queued.
    pub async fn override_decision(
        &self,
        actor: &AuthorizationContext,
        request: OverrideRequest,
    ) -> ReviewWorkflowResult<ReviewRecord> {
        actor.require(Capability::OverrideDecision)?;
        let reason = ConfirmationPolicy::for_tier(actor.tier()).check(&request.confirmation)?;

        let mut record = self.load(request.record_id).await?;
        let previous_status = record.final_status();
        record.apply_override(
            actor.user_id(),
            request.decision,
            reason.clone(),
            &*self.clock,
        );
        self.repository.update(&record).await?;

        let action = match request.decision {
            Decision::Approved => AuditAction::OverrideApproved,
            Decision::Rejected => AuditAction::OverrideRejected,
        };
        let mut event = AuditEvent::new(entity_of(&record), action, &*self.clock)
            .with_actor(actor)
            .with_change(
                json!(previous_status.as_str()),
                json!(record.final_status().as_str()),
            );
        if let Some(justification) = &reason {
            event = event.with_note(justification.as_str());
        }
        info!(
            record_id = %record.id(),
            decision = request.decision.as_str(),
            reviewer = %actor.user_id(),
            role = actor.role().as_str(),
            "override applied"
        );

        self.publish(&record, request.decision, reason.as_ref(), true)
            .await;
        self.audit.append(&event).await?;
        Ok(record)
    }

    /// Changes the rate of a pending record and recomputes its earnings.
    ///
    /// Every adjustment is audited with the previous and new rate, whatever
    /// the actor's tier.
    ///
    /// # Errors
    ///
    /// Returns [`ReviewWorkflowError::Authority`] when the actor may not
    /// adjust rates or the confirmation is incomplete,
    /// [`ReviewWorkflowError::NotFound`] for an unknown record and
    /// [`ReviewWorkflowError::Domain`] once the record is final.
    pub async fn adjust_rate(
        &self,
        actor: &AuthorizationContext,
        request: RateAdjustmentRequest,
    ) -> ReviewWorkflowResult<ReviewRecord> {
        actor.require(Capability::AdjustRate)?;
        let reason = ConfirmationPolicy::for_tier(actor.tier()).check(&request.confirmation)?;

        let mut record = self.load(request.record_id).await?;
        let change = record.adjust_rate(request.new_rate, &*self.clock)?;
        self.repository.update(&record).await?;

        let mut event =
            AuditEvent::new(entity_of(&record), AuditAction::RateOverride, &*self.clock)
                .with_actor(actor)
                .with_change(
                    json!(change.previous.to_string()),
                    json!(change.new.to_string()),
                );
        if let Some(justification) = &reason {
            event = event.with_note(justification.as_str());
        }
        self.audit.append(&event).await?;
        info!(
            record_id = %record.id(),
            previous_rate = %change.previous,
            new_rate = %change.new,
            actor = %actor.user_id(),
            "rate adjusted"
        );
        Ok(record)
    }

    /// Retrieves a record by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`ReviewWorkflowError::NotFound`] for an unknown record.
    pub async fn find(&self, record_id: RecordId) -> ReviewWorkflowResult<ReviewRecord> {
        self.load(record_id).await
    }

    /// Lists records of `kind` eligible for override.
    ///
    /// # Errors
    ///
    /// Returns [`ReviewWorkflowError::Authority`] unless the actor may
    /// override decisions.
    pub async fn list_overridable(
        &self,
        actor: &AuthorizationContext,
        kind: RecordKind,
    ) -> ReviewWorkflowResult<Vec<ReviewRecord>> {
        actor.require(Capability::OverrideDecision)?;
        Ok(self.repository.list_overridable(kind).await?)
    }

    /// Lists the records submitted by `submitter`.
    ///
    /// # Errors
    ///
    /// Returns [`ReviewWorkflowError::Repository`] when the lookup fails.
    pub async fn list_for_submitter(
        &self,
        submitter: UserId,
    ) -> ReviewWorkflowResult<Vec<ReviewRecord>> {
        Ok(self.repository.list_for_submitter(submitter).await?)
    }

    /// Returns the audit timeline of a record, oldest event first.
    ///
    /// # Errors
    ///
    /// Returns [`ReviewWorkflowError::Authority`] unless the actor may view
    /// audit trails, and [`ReviewWorkflowError::NotFound`] for an unknown
    /// record.
    pub async fn timeline(
        &self,
        actor: &AuthorizationContext,
        record_id: RecordId,
    ) -> ReviewWorkflowResult<Vec<AuditEvent>> {
        actor.require(Capability::ViewAuditTrail)?;
        let record = self.load(record_id).await?;
        Ok(self.audit.list_for_entity(entity_of(&record)).await?)
    }

    async fn load(&self, record_id: RecordId) -> ReviewWorkflowResult<ReviewRecord> {
        self.repository
            .find_by_id(record_id)
            .await?
            .ok_or(ReviewWorkflowError::NotFound(record_id))
    }

    async fn publish(
        &self,
        record: &ReviewRecord,
        decision: Decision,
        reason: Option<&Justification>,
        is_override: bool,
    ) {
        let notice = ReviewNotification {
            item_type: record.kind().notification_type().to_owned(),
            action: decision.as_str().to_owned(),
            user_id: record.submitter_id(),
            item_title: record.title().to_owned(),
            platform: record.platform().to_owned(),
            work_date: record.work_date(),
            reason: reason.map(|justification| justification.as_str().to_owned()),
            reviewer_name: None,
            is_override,
        };
        let message =
            OutboxMessage::new(NotificationPayload::ReviewDecision(notice), &*self.clock);
        if let Err(err) = self.outbox.enqueue(&message).await {
            warn!(
                record_id = %record.id(),
                error = %err,
                "failed to queue review notification"
            );
        }
    }
}

fn entity_of(record: &ReviewRecord) -> EntityRef {
    EntityRef::new(record.kind().entity_type(), record.id().into_inner())
}
