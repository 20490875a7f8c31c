//! Request payloads accepted by the review workflow service.

use crate::authority::domain::Confirmation;
use crate::review::domain::{Decision, Hours, Rate, RecordId, RecordKind};
use chrono::NaiveDate;

/// Request payload for submitting a task or work report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitWorkRequest {
    pub(super) kind: RecordKind,
    pub(super) title: String,
    pub(super) platform: String,
    pub(super) work_date: NaiveDate,
    pub(super) hours_worked: Hours,
    pub(super) rate: Rate,
}

impl SubmitWorkRequest {
    /// Creates a submission request.
    #[must_use]
    pub fn new(
        kind: RecordKind,
        title: impl Into<String>,
        platform: impl Into<String>,
        work_date: NaiveDate,
        hours_worked: Hours,
        rate: Rate,
    ) -> Self {
        Self {
            kind,
            title: title.into(),
            platform: platform.into(),
            work_date,
            hours_worked,
            rate,
        }
    }
}

/// Request payload for a team lead's first-tier decision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamLeadReviewRequest {
    pub(super) record_id: RecordId,
    pub(super) decision: Decision,
    pub(super) reason: Option<String>,
}

impl TeamLeadReviewRequest {
    /// Creates a review request without a reason.
    #[must_use]
    pub const fn new(record_id: RecordId, decision: Decision) -> Self {
        Self {
            record_id,
            decision,
            reason: None,
        }
    }

    /// Sets the reason shown to the submitter.
    #[must_use]
    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }
}

/// Request payload for an admin-tier override.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverrideRequest {
    pub(super) record_id: RecordId,
    pub(super) decision: Decision,
    pub(super) confirmation: Confirmation,
}

impl OverrideRequest {
    /// Creates an override request.
    #[must_use]
    pub const fn new(record_id: RecordId, decision: Decision, confirmation: Confirmation) -> Self {
        Self {
            record_id,
            decision,
            confirmation,
        }
    }
}

/// Request payload for changing the rate of a pending record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateAdjustmentRequest {
    pub(super) record_id: RecordId,
    pub(super) new_rate: Rate,
    pub(super) confirmation: Confirmation,
}

impl RateAdjustmentRequest {
    /// Creates a rate adjustment request.
    #[must_use]
    pub const fn new(record_id: RecordId, new_rate: Rate, confirmation: Confirmation) -> Self {
        Self {
            record_id,
            new_rate,
            confirmation,
        }
    }
}
