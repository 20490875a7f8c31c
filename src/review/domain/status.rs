//! Status enumerations and tier decisions.

use super::ParseReviewValueError;
use crate::audit::domain::EntityType;
use crate::authority::domain::UserId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which of the two parallel entities a record is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordKind {
    /// A task submission.
    Task,
    /// A work report submission.
    WorkReport,
}

impl RecordKind {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Task => "task",
            Self::WorkReport => "work_report",
        }
    }

    /// Returns the short label used in notification payloads.
    #[must_use]
    pub const fn notification_type(self) -> &'static str {
        match self {
            Self::Task => "task",
            Self::WorkReport => "report",
        }
    }

    /// Returns the audit entity type for the record kind.
    #[must_use]
    pub const fn entity_type(self) -> EntityType {
        match self {
            Self::Task => EntityType::Task,
            Self::WorkReport => EntityType::WorkReport,
        }
    }
}

impl TryFrom<&str> for RecordKind {
    type Error = ParseReviewValueError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "task" => Ok(Self::Task),
            "work_report" | "report" => Ok(Self::WorkReport),
            _ => Err(ParseReviewValueError {
                kind: "record kind",
                value: value.to_owned(),
            }),
        }
    }
}

/// Authoritative outcome of a record after all review tiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FinalStatus {
    /// No final decision yet.
    Pending,
    /// Approved, either by the team lead or by override.
    Approved,
    /// Rejected by override.
    Rejected,
}

impl FinalStatus {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }
}

impl fmt::Display for FinalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for FinalStatus {
    type Error = ParseReviewValueError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "pending" => Ok(Self::Pending),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            _ => Err(ParseReviewValueError {
                kind: "final status",
                value: value.to_owned(),
            }),
        }
    }
}

impl From<Decision> for FinalStatus {
    fn from(decision: Decision) -> Self {
        match decision {
            Decision::Approved => Self::Approved,
            Decision::Rejected => Self::Rejected,
        }
    }
}

/// A reviewer's verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Decision {
    /// The submission is accepted.
    Approved,
    /// The submission is refused.
    Rejected,
}

impl Decision {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for Decision {
    type Error = ParseReviewValueError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "approved" | "approve" => Ok(Self::Approved),
            "rejected" | "reject" => Ok(Self::Rejected),
            _ => Err(ParseReviewValueError {
                kind: "decision",
                value: value.to_owned(),
            }),
        }
    }
}

/// Decision recorded by one review tier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierReview {
    /// The verdict.
    pub decision: Decision,
    /// Who decided.
    pub reviewer_id: UserId,
    /// When the decision was recorded.
    pub reviewed_at: DateTime<Utc>,
    /// Free-text context for the decision.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}
