//! Sign-in by email or MPCN ID feeding the review workflow.

use super::helpers::{PASSWORD, Platform, platform};
use chrono::NaiveDate;
use eyre::{Result, ensure};
use mpcn_workforce::{
    authority::domain::{Role, UserId},
    identity::{
        domain::{MpcnId, UserAccount},
        services::{LoginError, LoginService},
    },
    notification::domain::EmailAddress,
    review::{
        domain::{Hours, Rate, RecordKind},
        services::SubmitWorkRequest,
    },
};
use rstest::rstest;
use std::sync::Arc;

fn seed(platform: &Platform) -> Result<UserId> {
    let user_id = UserId::new();
    let account = UserAccount::new(
        user_id,
        EmailAddress::new("ada@mpcn.example")?,
        "Ada",
        Role::Employee,
    )
    .with_mpcn_id(MpcnId::new("MPCN-0042")?);
    platform.accounts.insert(account, PASSWORD)?;
    Ok(user_id)
}

#[rstest]
#[case("ada@mpcn.example")]
#[case("MPCN-0042")]
#[case("  mpcn-0042 ")]
#[tokio::test(flavor = "multi_thread")]
async fn signed_in_user_can_submit_work(
    platform: Platform,
    #[case] identifier: &str,
) -> Result<()> {
    let user_id = seed(&platform)?;
    let login = LoginService::new(Arc::clone(&platform.accounts), Arc::clone(&platform.accounts));

    let session = login.sign_in(identifier, PASSWORD).await?;
    ensure!(session.user_id() == user_id, "resolved to the seeded user");
    ensure!(session.role() == Role::Employee, "role carried into session");

    let record = platform
        .reviews
        .submit(
            &session,
            SubmitWorkRequest::new(
                RecordKind::Task,
                "Label street scenes",
                "Remotasks",
                NaiveDate::from_ymd_opt(2024, 3, 2).ok_or_else(|| eyre::eyre!("invalid date"))?,
                Hours::parse("2")?,
                Rate::parse("9.5")?,
            ),
        )
        .await?;
    ensure!(record.submitter_id() == user_id, "submission attributed");
    Ok(())
}

#[rstest]
#[case("ada@mpcn.example", "wrong password")]
#[case("MPCN-9999", PASSWORD)]
#[tokio::test(flavor = "multi_thread")]
async fn bad_credentials_are_indistinguishable(
    platform: Platform,
    #[case] identifier: &str,
    #[case] password: &str,
) -> Result<()> {
    seed(&platform)?;
    let login = LoginService::new(Arc::clone(&platform.accounts), Arc::clone(&platform.accounts));
    let result = login.sign_in(identifier, password).await;
    ensure!(
        matches!(result, Err(LoginError::InvalidCredentials)),
        "expected invalid credentials"
    );
    Ok(())
}
