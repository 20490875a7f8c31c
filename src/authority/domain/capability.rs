//! Capabilities consulted by services before mutating state.

use serde::{Deserialize, Serialize};
use std::fmt;

/// An action an actor may be permitted to perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    /// Submit tasks and work reports.
    SubmitWork,
    /// Record the first-tier decision on a submission.
    ReviewAsTeamLead,
    /// Record an authoritative decision superseding the team lead.
    OverrideDecision,
    /// Change the earnings rate of a pending submission.
    AdjustRate,
    /// Start a transfer of the highest authority role.
    TransferTopRole,
    /// Receive SLA breach and approach alerts.
    ReceiveSlaAlerts,
    /// Read the audit timeline of any entity.
    ViewAuditTrail,
}

impl Capability {
    /// Returns the canonical name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SubmitWork => "submit_work",
            Self::ReviewAsTeamLead => "review_as_team_lead",
            Self::OverrideDecision => "override_decision",
            Self::AdjustRate => "adjust_rate",
            Self::TransferTopRole => "transfer_top_role",
            Self::ReceiveSlaAlerts => "receive_sla_alerts",
            Self::ViewAuditTrail => "view_audit_trail",
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
