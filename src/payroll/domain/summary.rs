//! Approved-earnings summary for one submitter and period.

use super::PayPeriod;
use crate::authority::domain::UserId;
use crate::review::domain::{Earnings, FinalStatus, Hours, RecordId, ReviewRecord};
use serde::{Deserialize, Serialize};

/// Totals over the approved work of one submitter in one period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollSummary {
    submitter_id: UserId,
    period: PayPeriod,
    approved_records: Vec<RecordId>,
    total_hours: Hours,
    total_earnings: Earnings,
    pending_count: usize,
}

impl PayrollSummary {
    /// Builds a summary from the submitter's records.
    ///
    /// Records outside `period` are ignored. Approved records contribute hours
    /// and earnings; pending records are only counted; rejected records are
    /// skipped.
    #[must_use]
    pub fn from_records<'a>(
        submitter_id: UserId,
        period: PayPeriod,
        records: impl IntoIterator<Item = &'a ReviewRecord>,
    ) -> Self {
        let mut approved = Vec::new();
        let mut pending_count = 0;
        for record in records
            .into_iter()
            .filter(|record| record.submitter_id() == submitter_id)
            .filter(|record| period.contains(record.work_date()))
        {
            match record.final_status() {
                FinalStatus::Approved => approved.push(record),
                FinalStatus::Pending => pending_count += 1,
                FinalStatus::Rejected => {}
            }
        }

        Self {
            submitter_id,
            period,
            approved_records: approved.iter().map(|record| record.id()).collect(),
            total_hours: approved
                .iter()
                .map(|record| record.hours_worked().clone())
                .sum(),
            total_earnings: approved
                .iter()
                .map(|record| record.earnings().clone())
                .sum(),
            pending_count,
        }
    }

    /// Returns the submitter the summary belongs to.
    #[must_use]
    pub const fn submitter_id(&self) -> UserId {
        self.submitter_id
    }

    /// Returns the summarised period.
    #[must_use]
    pub const fn period(&self) -> PayPeriod {
        self.period
    }

    /// Returns the approved records, oldest first.
    #[must_use]
    pub fn approved_records(&self) -> &[RecordId] {
        &self.approved_records
    }

    /// Returns the hours across approved records.
    #[must_use]
    pub const fn total_hours(&self) -> &Hours {
        &self.total_hours
    }

    /// Returns the earnings across approved records.
    #[must_use]
    pub const fn total_earnings(&self) -> &Earnings {
        &self.total_earnings
    }

    /// Returns how many records in the period still await a decision.
    #[must_use]
    pub const fn pending_count(&self) -> usize {
        self.pending_count
    }
}
