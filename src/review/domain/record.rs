//! Review record aggregate root.

use super::{
    Decision, Earnings, FinalStatus, Hours, Rate, RecordId, RecordKind, ReviewDomainError,
    TierReview,
};
use crate::authority::domain::{Justification, UserId};
use chrono::{DateTime, NaiveDate, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Validated input for a new submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSubmission {
    /// Task or work report.
    pub kind: RecordKind,
    /// Submitting employee.
    pub submitter_id: UserId,
    /// Short description shown to reviewers.
    pub title: String,
    /// Platform the work was done on.
    pub platform: String,
    /// Day the work was done.
    pub work_date: NaiveDate,
    /// Hours spent.
    pub hours_worked: Hours,
    /// Rate in force at submission time.
    pub rate: Rate,
}

/// Rate values before and after an adjustment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateChange {
    /// Rate before the adjustment.
    pub previous: Rate,
    /// Rate after the adjustment.
    pub new: Rate,
}

/// A submitted task or work report moving through review.
///
/// Serialises for read models; rebuilding one from stored data goes through
/// [`ReviewRecord::from_persisted`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReviewRecord {
    id: RecordId,
    kind: RecordKind,
    submitter_id: UserId,
    title: String,
    platform: String,
    work_date: NaiveDate,
    hours_worked: Hours,
    base_rate: Rate,
    current_rate: Rate,
    earnings: Earnings,
    final_status: FinalStatus,
    team_lead: Option<TierReview>,
    admin: Option<TierReview>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted review record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedReviewData {
    /// Persisted record identifier.
    pub id: RecordId,
    /// Persisted record kind.
    pub kind: RecordKind,
    /// Persisted submitter.
    pub submitter_id: UserId,
    /// Persisted title.
    pub title: String,
    /// Persisted platform.
    pub platform: String,
    /// Persisted work date.
    pub work_date: NaiveDate,
    /// Persisted hours worked.
    pub hours_worked: Hours,
    /// Persisted rate at submission time.
    pub base_rate: Rate,
    /// Persisted current rate.
    pub current_rate: Rate,
    /// Persisted earnings.
    pub earnings: Earnings,
    /// Persisted final status.
    pub final_status: FinalStatus,
    /// Persisted team-lead decision.
    pub team_lead: Option<TierReview>,
    /// Persisted override decision.
    pub admin: Option<TierReview>,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl ReviewRecord {
    /// Creates a pending record from a submission.
    ///
    /// # Errors
    ///
    /// Returns [`ReviewDomainError::EmptyTitle`] or
    /// [`ReviewDomainError::EmptyPlatform`] when the text fields are blank.
    pub fn submit(
        submission: NewSubmission,
        clock: &impl Clock,
    ) -> Result<Self, ReviewDomainError> {
        let title = submission.title.trim();
        if title.is_empty() {
            return Err(ReviewDomainError::EmptyTitle);
        }
        let platform = submission.platform.trim();
        if platform.is_empty() {
            return Err(ReviewDomainError::EmptyPlatform);
        }

        let timestamp = clock.utc();
        let earnings = Earnings::compute(&submission.hours_worked, &submission.rate);
        Ok(Self {
            id: RecordId::new(),
            kind: submission.kind,
            submitter_id: submission.submitter_id,
            title: title.to_owned(),
            platform: platform.to_owned(),
            work_date: submission.work_date,
            hours_worked: submission.hours_worked,
            base_rate: submission.rate.clone(),
            current_rate: submission.rate,
            earnings,
            final_status: FinalStatus::Pending,
            team_lead: None,
            admin: None,
            created_at: timestamp,
            updated_at: timestamp,
        })
    }

    /// Reconstructs a record from persisted storage.
    ///
    /// # Errors
    ///
    /// Returns [`ReviewDomainError::InconsistentFinalStatus`] when the stored
    /// final status is not backed by a matching tier decision.
    pub fn from_persisted(data: PersistedReviewData) -> Result<Self, ReviewDomainError> {
        let record = Self {
            id: data.id,
            kind: data.kind,
            submitter_id: data.submitter_id,
            title: data.title,
            platform: data.platform,
            work_date: data.work_date,
            hours_worked: data.hours_worked,
            base_rate: data.base_rate,
            current_rate: data.current_rate,
            earnings: data.earnings,
            final_status: data.final_status,
            team_lead: data.team_lead,
            admin: data.admin,
            created_at: data.created_at,
            updated_at: data.updated_at,
        };
        if !record.final_status_is_backed() {
            return Err(ReviewDomainError::InconsistentFinalStatus(record.id));
        }
        Ok(record)
    }

    /// Returns the record identifier.
    #[must_use]
    pub const fn id(&self) -> RecordId {
        self.id
    }

    /// Returns whether this is a task or a work report.
    #[must_use]
    pub const fn kind(&self) -> RecordKind {
        self.kind
    }

    /// Returns the submitting user.
    #[must_use]
    pub const fn submitter_id(&self) -> UserId {
        self.submitter_id
    }

    /// Returns the title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the platform the work was done on.
    #[must_use]
    pub fn platform(&self) -> &str {
        &self.platform
    }

    /// Returns the day the work was done.
    #[must_use]
    pub const fn work_date(&self) -> NaiveDate {
        self.work_date
    }

    /// Returns the hours worked.
    #[must_use]
    pub const fn hours_worked(&self) -> &Hours {
        &self.hours_worked
    }

    /// Returns the rate in force at submission time.
    #[must_use]
    pub const fn base_rate(&self) -> &Rate {
        &self.base_rate
    }

    /// Returns the current rate.
    #[must_use]
    pub const fn current_rate(&self) -> &Rate {
        &self.current_rate
    }

    /// Returns the derived earnings.
    #[must_use]
    pub const fn earnings(&self) -> &Earnings {
        &self.earnings
    }

    /// Returns the authoritative outcome.
    #[must_use]
    pub const fn final_status(&self) -> FinalStatus {
        self.final_status
    }

    /// Returns the team-lead decision, if any.
    #[must_use]
    pub const fn team_lead_review(&self) -> Option<&TierReview> {
        self.team_lead.as_ref()
    }

    /// Returns the override decision, if any.
    #[must_use]
    pub const fn admin_review(&self) -> Option<&TierReview> {
        self.admin.as_ref()
    }

    /// Returns the team-lead verdict; `None` until the team lead decides.
    #[must_use]
    pub fn team_lead_status(&self) -> Option<Decision> {
        self.team_lead.as_ref().map(|review| review.decision)
    }

    /// Returns the override verdict; `None` unless overridden.
    #[must_use]
    pub fn admin_status(&self) -> Option<Decision> {
        self.admin.as_ref().map(|review| review.decision)
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

    /// Returns whether the record is still pending.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.final_status == FinalStatus::Pending
    }

    /// Returns whether an override may be offered: the team lead rejected the
    /// record and no final decision has been made.
    #[must_use]
    pub fn is_overridable(&self) -> bool {
        self.team_lead_status() == Some(Decision::Rejected) && self.is_pending()
    }

    /// Returns whether the ordinary team-lead review action is offered.
    #[must_use]
    pub fn accepts_team_lead_review(&self) -> bool {
        self.is_pending() && self.team_lead.is_none()
    }

    /// Records the first-tier decision.
    ///
    /// Approval finalises the record; rejection leaves it pending so that an
    /// admin or overseer may override it.
    ///
    /// # Errors
    ///
    /// Returns [`ReviewDomainError::NotAwaitingTeamLeadReview`] when the record
    /// was already reviewed or finalised, and
    /// [`ReviewDomainError::RejectionReasonRequired`] when rejecting without a
    /// reason.
    pub fn record_team_lead_decision(
        &mut self,
        reviewer_id: UserId,
        decision: Decision,
        reason: Option<Justification>,
        clock: &impl Clock,
    ) -> Result<(), ReviewDomainError> {
        if !self.accepts_team_lead_review() {
            return Err(ReviewDomainError::NotAwaitingTeamLeadReview {
                record_id: self.id,
                final_status: self.final_status,
            });
        }
        if decision == Decision::Rejected && reason.is_none() {
            return Err(ReviewDomainError::RejectionReasonRequired);
        }

        let timestamp = clock.utc();
        self.team_lead = Some(TierReview {
            decision,
            reviewer_id,
            reviewed_at: timestamp,
            reason: reason.map(Justification::into_inner),
        });
        if decision == Decision::Approved {
            self.final_status = FinalStatus::Approved;
        }
        self.updated_at = timestamp;
        Ok(())
    }

    /// Records an authoritative override decision.
    ///
    /// The final status always follows the override, whatever the team lead
    /// decided.
    pub fn apply_override(
        &mut self,
        reviewer_id: UserId,
        decision: Decision,
        reason: Option<Justification>,
        clock: &impl Clock,
    ) {
        let timestamp = clock.utc();
        self.admin = Some(TierReview {
            decision,
            reviewer_id,
            reviewed_at: timestamp,
            reason: reason.map(Justification::into_inner),
        });
        self.final_status = decision.into();
        self.updated_at = timestamp;
    }

    /// Changes the current rate of a pending record and recomputes earnings.
    ///
    /// # Errors
    ///
    /// Returns [`ReviewDomainError::NotPending`] once the record is final.
    pub fn adjust_rate(
        &mut self,
        new_rate: Rate,
        clock: &impl Clock,
    ) -> Result<RateChange, ReviewDomainError> {
        if !self.is_pending() {
            return Err(ReviewDomainError::NotPending {
                record_id: self.id,
                final_status: self.final_status,
            });
        }
        let previous = std::mem::replace(&mut self.current_rate, new_rate);
        self.earnings = Earnings::compute(&self.hours_worked, &self.current_rate);
        self.updated_at = clock.utc();
        Ok(RateChange {
            previous,
            new: self.current_rate.clone(),
        })
    }

    fn final_status_is_backed(&self) -> bool {
        match self.final_status {
            FinalStatus::Pending => true,
            FinalStatus::Approved => {
                self.team_lead_status() == Some(Decision::Approved)
                    || self.admin_status() == Some(Decision::Approved)
            }
            FinalStatus::Rejected => self.admin_status() == Some(Decision::Rejected),
        }
    }
}
