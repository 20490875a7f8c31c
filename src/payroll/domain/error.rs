//! Error types for payroll domain validation.

use chrono::NaiveDate;
use thiserror::Error;

/// Errors returned while constructing payroll values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PayrollDomainError {
    /// The period ends before it starts.
    #[error("pay period ends ({end}) before it starts ({start})")]
    InvertedPeriod {
        /// First day of the period.
        start: NaiveDate,
        /// Last day of the period.
        end: NaiveDate,
    },
}
