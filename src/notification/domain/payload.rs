//! Notification payloads carried by outbox messages.

use crate::authority::domain::UserId;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Decision notice sent to the submitter of a task or work report.
///
/// Field names follow the notification function contract (`camelCase`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewNotification {
    /// `task` or `report`.
    #[serde(rename = "type")]
    pub item_type: String,
    /// `approved` or `rejected`.
    pub action: String,
    /// Submitter to notify.
    pub user_id: UserId,
    /// Title of the reviewed item.
    pub item_title: String,
    /// Platform the work was done on.
    pub platform: String,
    /// Day the work was done.
    pub work_date: NaiveDate,
    /// Reviewer's reason, if given.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    /// Display name of the reviewer, if known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reviewer_name: Option<String>,
    /// Whether the decision overrides the team lead.
    #[serde(default)]
    pub is_override: bool,
}

/// Whether an SLA alert reports a breach or an approaching deadline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlaAlertKind {
    /// The due timestamp has passed.
    Breach,
    /// The due timestamp is inside the warning window.
    Approaching,
}

impl SlaAlertKind {
    /// Returns the canonical representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Breach => "breach",
            Self::Approaching => "approaching",
        }
    }
}

/// Alert about a resolution request addressed to every admin-tier user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlaAlert {
    /// Resolution request the alert is about.
    pub request_id: Uuid,
    /// Title of the resolution request.
    pub title: String,
    /// SLA due timestamp.
    pub sla_due: DateTime<Utc>,
    /// Breach or approaching.
    pub kind: SlaAlertKind,
    /// Users to alert.
    pub recipients: Vec<UserId>,
}

/// Content of an outbox message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NotificationPayload {
    /// Review decision notice for a submitter.
    ReviewDecision(ReviewNotification),
    /// SLA alert for admin-tier users.
    SlaAlert(SlaAlert),
}

impl NotificationPayload {
    /// Returns the users the payload is addressed to.
    #[must_use]
    pub fn recipients(&self) -> Vec<UserId> {
        match self {
            Self::ReviewDecision(notice) => vec![notice.user_id],
            Self::SlaAlert(alert) => alert.recipients.clone(),
        }
    }

    /// Returns the short payload kind used in logs and storage.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::ReviewDecision(_) => "review_decision",
            Self::SlaAlert(_) => "sla_alert",
        }
    }
}
