//! Earnings summaries built from the review repository.

use crate::authority::domain::{AuthorityError, AuthorizationContext, Capability, UserId};
use crate::payroll::domain::{PayPeriod, PayrollSummary};
use crate::review::ports::{ReviewRepository, ReviewRepositoryError};
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

/// Errors returned by the payroll service.
#[derive(Debug, Error)]
pub enum PayrollError {
    /// The actor may not read another user's payroll.
    #[error(transparent)]
    Authority(#[from] AuthorityError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] ReviewRepositoryError),
}

/// Read-only payroll summaries over review records.
#[derive(Clone)]
pub struct PayrollService<R>
where
    R: ReviewRepository,
{
    records: Arc<R>,
}

impl<R> PayrollService<R>
where
    R: ReviewRepository,
{
    /// Creates a payroll service.
    #[must_use]
    pub const fn new(records: Arc<R>) -> Self {
        Self { records }
    }

    /// Summarises `submitter`'s approved earnings within `period` on behalf
    /// of `actor`.
    ///
    /// Users may always read their own summary; reading someone else's needs
    /// the audit-trail capability held by the admin tiers.
    ///
    /// # Errors
    ///
    /// Returns [`PayrollError::Authority`] when the actor may not read the
    /// submitter's payroll, or [`PayrollError::Repository`] on lookup failure.
    pub async fn summarize(
        &self,
        actor: &AuthorizationContext,
        submitter: UserId,
        period: PayPeriod,
    ) -> Result<PayrollSummary, PayrollError> {
        if actor.user_id() != submitter {
            actor.require(Capability::ViewAuditTrail)?;
        }
        let records = self.records.list_for_submitter(submitter).await?;
        let summary = PayrollSummary::from_records(submitter, period, &records);
        debug!(
            submitter = %submitter,
            reader = %actor.user_id(),
            period = %period,
            approved = summary.approved_records().len(),
            pending = summary.pending_count(),
            earnings = %summary.total_earnings(),
            "payroll summarised"
        );
        Ok(summary)
    }
}
