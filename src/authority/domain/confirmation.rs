//! Tier-scaled confirmation requirements for sensitive actions.
//!
//! The same policy drives the number of confirmation steps a client shows and
//! the checks the services run before writing, so a caller that skips the
//! client flow still meets the requirement.

use super::{AuthorityError, AuthorityTier};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A validated, non-empty free-text reason.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Justification(String);

impl Justification {
    /// Creates a justification from raw input.
    ///
    /// # Errors
    ///
    /// Returns [`AuthorityError::ReasonRequired`] when the input is empty or
    /// whitespace only.
    pub fn new(value: impl Into<String>) -> Result<Self, AuthorityError> {
        let raw = value.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(AuthorityError::ReasonRequired);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the reason text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the justification and returns the reason text.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl AsRef<str> for Justification {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for Justification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Input an actor supplies when confirming a sensitive action.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Confirmation {
    reason: Option<String>,
    acknowledged: bool,
}

impl Confirmation {
    /// Creates an empty confirmation.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            reason: None,
            acknowledged: false,
        }
    }

    /// Sets the free-text reason.
    #[must_use]
    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    /// Marks the impact summary as acknowledged.
    #[must_use]
    pub const fn acknowledged(mut self) -> Self {
        self.acknowledged = true;
        self
    }

    /// Returns the raw reason, if any.
    #[must_use]
    pub fn reason(&self) -> Option<&str> {
        self.reason.as_deref()
    }

    /// Returns whether the impact summary was acknowledged.
    #[must_use]
    pub const fn is_acknowledged(&self) -> bool {
        self.acknowledged
    }
}

/// Confirmation friction required for an authority tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfirmationPolicy {
    steps: u8,
    shows_impact_summary: bool,
    requires_reason: bool,
    requires_acknowledgement: bool,
}

impl ConfirmationPolicy {
    /// Returns the policy for `tier`.
    ///
    /// The highest tier confirms across three steps with a mandatory reason
    /// and an explicit acknowledgement; the admin tier across two steps with
    /// a mandatory reason; every other tier in a single step.
    #[must_use]
    pub const fn for_tier(tier: AuthorityTier) -> Self {
        match tier.value() {
            0 => Self {
                steps: 3,
                shows_impact_summary: true,
                requires_reason: true,
                requires_acknowledgement: true,
            },
            1 => Self {
                steps: 2,
                shows_impact_summary: true,
                requires_reason: true,
                requires_acknowledgement: false,
            },
            _ => Self {
                steps: 1,
                shows_impact_summary: false,
                requires_reason: false,
                requires_acknowledgement: false,
            },
        }
    }

    /// Returns the number of confirmation steps.
    #[must_use]
    pub const fn steps(&self) -> u8 {
        self.steps
    }

    /// Returns whether an impact summary is presented.
    #[must_use]
    pub const fn shows_impact_summary(&self) -> bool {
        self.shows_impact_summary
    }

    /// Returns whether a reason is mandatory.
    #[must_use]
    pub const fn requires_reason(&self) -> bool {
        self.requires_reason
    }

    /// Returns whether an explicit acknowledgement is mandatory.
    #[must_use]
    pub const fn requires_acknowledgement(&self) -> bool {
        self.requires_acknowledgement
    }

    /// Checks a confirmation against the policy.
    ///
    /// Returns the validated reason when one was supplied. A blank reason is
    /// treated as absent.
    ///
    /// # Errors
    ///
    /// Returns [`AuthorityError::ReasonRequired`] or
    /// [`AuthorityError::AcknowledgementRequired`] when the confirmation
    /// falls short of the policy.
    pub fn check(
        &self,
        confirmation: &Confirmation,
    ) -> Result<Option<Justification>, AuthorityError> {
        let justification = confirmation
            .reason()
            .and_then(|reason| Justification::new(reason).ok());

        if self.requires_reason && justification.is_none() {
            return Err(AuthorityError::ReasonRequired);
        }
        if self.requires_acknowledgement && !confirmation.is_acknowledged() {
            return Err(AuthorityError::AcknowledgementRequired);
        }
        Ok(justification)
    }
}
