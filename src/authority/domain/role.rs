//! Roles and the authority tiers they map onto.

use super::{Capability, ParseRoleError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Ranking of roles; `0` is the highest authority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AuthorityTier(u8);

impl AuthorityTier {
    /// The highest authority tier, held by the general overseer.
    pub const HIGHEST: Self = Self(0);
    /// The administrative tier directly below the overseer.
    pub const ADMIN: Self = Self(1);
    /// The team-lead tier.
    pub const TEAM_LEAD: Self = Self(2);
    /// The tier of ordinary members.
    pub const MEMBER: Self = Self(3);

    /// Returns the numeric rank.
    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }

    /// Returns whether this is the highest tier.
    #[must_use]
    pub const fn is_highest(self) -> bool {
        self.0 == Self::HIGHEST.0
    }

    /// Returns whether this tier outranks or equals `other`.
    #[must_use]
    pub const fn at_least(self, other: Self) -> bool {
        self.0 <= other.0
    }
}

impl fmt::Display for AuthorityTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "tier {}", self.0)
    }
}

/// Role held by a user account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Highest authority; may override any decision and hand the role on.
    GeneralOverseer,
    /// Administrator; may override team-lead decisions and adjust rates.
    Admin,
    /// Reviews submissions from their team.
    TeamLead,
    /// Submits tasks and work reports.
    Employee,
    /// Tracks investments; no workflow authority.
    Investor,
}

impl Role {
    /// Every role, highest authority first.
    pub const ALL: [Self; 5] = [
        Self::GeneralOverseer,
        Self::Admin,
        Self::TeamLead,
        Self::Employee,
        Self::Investor,
    ];

    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::GeneralOverseer => "general_overseer",
            Self::Admin => "admin",
            Self::TeamLead => "team_lead",
            Self::Employee => "employee",
            Self::Investor => "investor",
        }
    }

    /// Returns the authority tier of the role.
    #[must_use]
    pub const fn tier(self) -> AuthorityTier {
        match self {
            Self::GeneralOverseer => AuthorityTier::HIGHEST,
            Self::Admin => AuthorityTier::ADMIN,
            Self::TeamLead => AuthorityTier::TEAM_LEAD,
            Self::Employee | Self::Investor => AuthorityTier::MEMBER,
        }
    }

    /// Returns whether the role belongs to the admin tiers (overseer or admin).
    #[must_use]
    pub const fn is_admin_tier(self) -> bool {
        self.tier().at_least(AuthorityTier::ADMIN)
    }

    /// Returns the capabilities granted by the role.
    #[must_use]
    pub fn capabilities(self) -> Vec<Capability> {
        let mut granted = vec![Capability::SubmitWork];
        match self {
            Self::GeneralOverseer => granted.extend([
                Capability::ReviewAsTeamLead,
                Capability::OverrideDecision,
                Capability::AdjustRate,
                Capability::TransferTopRole,
                Capability::ReceiveSlaAlerts,
                Capability::ViewAuditTrail,
            ]),
            Self::Admin => granted.extend([
                Capability::ReviewAsTeamLead,
                Capability::OverrideDecision,
                Capability::AdjustRate,
                Capability::ReceiveSlaAlerts,
                Capability::ViewAuditTrail,
            ]),
            Self::TeamLead => granted.push(Capability::ReviewAsTeamLead),
            Self::Employee => {}
            Self::Investor => granted.clear(),
        }
        granted
    }

    /// Returns the roles that belong to the admin tiers.
    pub fn admin_tier_roles() -> impl Iterator<Item = Self> {
        Self::ALL.into_iter().filter(|role| role.is_admin_tier())
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for Role {
    type Error = ParseRoleError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "general_overseer" => Ok(Self::GeneralOverseer),
            "admin" => Ok(Self::Admin),
            "team_lead" => Ok(Self::TeamLead),
            "employee" => Ok(Self::Employee),
            "investor" => Ok(Self::Investor),
            _ => Err(ParseRoleError(value.to_owned())),
        }
    }
}
