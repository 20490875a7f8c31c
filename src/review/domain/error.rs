//! Error types for review domain validation and parsing.

use super::{FinalStatus, RecordId};
use thiserror::Error;

/// Errors returned while constructing or mutating review records.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ReviewDomainError {
    /// The submission title is empty after trimming.
    #[error("submission title must not be empty")]
    EmptyTitle,

    /// The submission platform is empty after trimming.
    #[error("submission platform must not be empty")]
    EmptyPlatform,

    /// A decimal input could not be parsed.
    #[error("invalid decimal value: {0}")]
    InvalidDecimal(String),

    /// Hours worked must not be negative.
    #[error("hours worked must not be negative, got {0}")]
    NegativeHours(String),

    /// Rates must not be negative.
    #[error("rate must not be negative, got {0}")]
    NegativeRate(String),

    /// A team-lead rejection needs a reason.
    #[error("a rejection reason is required")]
    RejectionReasonRequired,

    /// The record no longer accepts a team-lead decision.
    #[error("record {record_id} is not awaiting team-lead review (final status {final_status})")]
    NotAwaitingTeamLeadReview {
        /// Record identifier.
        record_id: RecordId,
        /// Current final status.
        final_status: FinalStatus,
    },

    /// The operation is only allowed on pending records.
    #[error("record {record_id} is no longer pending (final status {final_status})")]
    NotPending {
        /// Record identifier.
        record_id: RecordId,
        /// Current final status.
        final_status: FinalStatus,
    },

    /// Persisted data violates the final-status invariant.
    #[error("record {0} has a final status not backed by any tier decision")]
    InconsistentFinalStatus(RecordId),
}

/// Error returned while parsing review enumerations from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown review {kind}: {value}")]
pub struct ParseReviewValueError {
    /// Which enumeration failed to parse.
    pub kind: &'static str,
    /// The rejected value.
    pub value: String,
}
