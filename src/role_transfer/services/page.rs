//! HTML confirmation pages returned to the token holder.

use crate::role_transfer::domain::ApprovalStatus;
use minijinja::{Environment, context};

const PAGE_NAME: &str = "role_transfer.html";

const PAGE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <title>{{ title }}</title>
</head>
<body>
  <main class="{{ tone }}">
    <h1>{{ title }}</h1>
    <p>{{ message }}</p>
  </main>
</body>
</html>"#;

/// Result of presenting a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferOutcome {
    /// No token was supplied.
    MissingToken,
    /// The token matches no approval.
    UnknownToken,
    /// The action was neither `approve` nor `reject`.
    InvalidAction,
    /// The approval was already decided.
    AlreadyProcessed(ApprovalStatus),
    /// The token lifetime has passed; the approval is now expired.
    Expired,
    /// The role was transferred.
    Approved,
    /// The transfer was declined.
    Rejected,
}

impl TransferOutcome {
    /// Returns the HTTP status code for the outcome.
    #[must_use]
    pub const fn status_code(self) -> u16 {
        match self {
            Self::UnknownToken => 404,
            Self::MissingToken
            | Self::InvalidAction
            | Self::AlreadyProcessed(_)
            | Self::Expired => 400,
            Self::Approved | Self::Rejected => 200,
        }
    }

    /// Returns the page heading.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::MissingToken | Self::UnknownToken | Self::InvalidAction => "Invalid request",
            Self::AlreadyProcessed(_) => "Already processed",
            Self::Expired => "Request expired",
            Self::Approved => "Role transfer approved",
            Self::Rejected => "Role transfer rejected",
        }
    }

    /// Returns the message shown to the token holder.
    #[must_use]
    pub fn message(self) -> String {
        match self {
            Self::MissingToken => "Missing token".to_owned(),
            Self::UnknownToken => "Invalid or unknown token".to_owned(),
            Self::InvalidAction => "Invalid action. Use approve or reject.".to_owned(),
            Self::AlreadyProcessed(status) => {
                format!("This request has already been {}.", status.as_str())
            }
            Self::Expired => "This request has expired.".to_owned(),
            Self::Approved => {
                "The General Overseer role has been transferred to the requested user.".to_owned()
            }
            Self::Rejected => "The role transfer request has been rejected.".to_owned(),
        }
    }
}

/// Status code and HTML body for a processed token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleTransferResponse {
    /// What happened.
    pub outcome: TransferOutcome,
    /// HTTP status code.
    pub status: u16,
    /// Rendered confirmation page.
    pub html: String,
}

impl RoleTransferResponse {
    pub(super) fn render(outcome: TransferOutcome) -> Result<Self, minijinja::Error> {
        let mut environment = Environment::new();
        environment.add_template(PAGE_NAME, PAGE)?;
        let tone = if outcome.status_code() == 200 {
            "success"
        } else {
            "error"
        };
        let html = environment.get_template(PAGE_NAME)?.render(context! {
            title => outcome.title(),
            message => outcome.message(),
            tone => tone,
        })?;
        Ok(Self {
            outcome,
            status: outcome.status_code(),
            html,
        })
    }
}
