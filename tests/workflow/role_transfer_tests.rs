//! Overseer hand-over through approval tokens.

use super::helpers::{Platform, SteppingClock, platform};
use chrono::Duration;
use eyre::{Result, ensure};
use mpcn_workforce::{
    audit::adapters::memory::InMemoryAuditLog,
    authority::domain::Role,
    identity::adapters::memory::InMemoryUserAccounts,
    role_transfer::{
        adapters::memory::InMemoryRoleApprovalRepository,
        domain::ApprovalStatus,
        services::{RoleTransferService, TransferOutcome},
    },
};
use rstest::rstest;
use std::sync::Arc;

type Transfers = RoleTransferService<
    InMemoryRoleApprovalRepository,
    InMemoryUserAccounts,
    InMemoryAuditLog,
    SteppingClock,
>;

fn transfers(platform: &Platform) -> Transfers {
    RoleTransferService::new(
        Arc::new(InMemoryRoleApprovalRepository::new()),
        Arc::clone(&platform.accounts),
        Arc::clone(&platform.audit),
        Arc::clone(&platform.clock),
    )
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn approved_transfer_swaps_overseer_and_cannot_be_replayed(
    platform: Platform,
) -> Result<()> {
    let overseer = platform.enrol("go@mpcn.example", Role::GeneralOverseer)?;
    let successor = platform.enrol("next@mpcn.example", Role::Admin)?;
    let service = transfers(&platform);

    let issued = service
        .request_transfer(&overseer, successor.user_id())
        .await?;
    let response = service.process(issued.token.as_str(), "approve").await?;
    ensure!(response.outcome == TransferOutcome::Approved, "approved");
    ensure!(response.status == 200, "success status");
    ensure!(response.html.contains("Role transfer approved"), "page heading");

    ensure!(
        platform.accounts.role_of(successor.user_id())? == Some(Role::GeneralOverseer),
        "successor promoted"
    );
    ensure!(
        platform.accounts.role_of(overseer.user_id())? == Some(Role::Admin),
        "previous overseer demoted"
    );

    let replay = service.process(issued.token.as_str(), "reject").await?;
    ensure!(
        replay.outcome == TransferOutcome::AlreadyProcessed(ApprovalStatus::Approved),
        "replay refused"
    );
    ensure!(replay.status == 400, "client error");
    ensure!(
        replay.html.contains("This request has already been approved."),
        "replay message"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn expired_token_changes_nothing(platform: Platform) -> Result<()> {
    let overseer = platform.enrol("go@mpcn.example", Role::GeneralOverseer)?;
    let successor = platform.enrol("next@mpcn.example", Role::Admin)?;
    let service = transfers(&platform).with_token_lifetime(Duration::hours(1));

    let issued = service
        .request_transfer(&overseer, successor.user_id())
        .await?;
    platform.clock.advance(Duration::hours(2));

    let response = service.process(issued.token.as_str(), "approve").await?;
    ensure!(response.outcome == TransferOutcome::Expired, "expired");
    ensure!(
        platform.accounts.role_of(successor.user_id())? == Some(Role::Admin),
        "successor unchanged"
    );
    ensure!(
        platform.accounts.role_of(overseer.user_id())? == Some(Role::GeneralOverseer),
        "overseer unchanged"
    );
    Ok(())
}

#[rstest]
#[case("", "approve", TransferOutcome::MissingToken, 400)]
#[case("deadbeef", "approve", TransferOutcome::UnknownToken, 404)]
#[case("deadbeef", "promote", TransferOutcome::InvalidAction, 400)]
#[tokio::test(flavor = "multi_thread")]
async fn malformed_requests_are_answered_without_side_effects(
    platform: Platform,
    #[case] token: &str,
    #[case] action: &str,
    #[case] outcome: TransferOutcome,
    #[case] status: u16,
) -> Result<()> {
    let response = transfers(&platform).process(token, action).await?;
    ensure!(response.outcome == outcome, "unexpected outcome {:?}", response.outcome);
    ensure!(response.status == status, "unexpected status {}", response.status);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn only_the_overseer_may_start_a_transfer(platform: Platform) -> Result<()> {
    let admin = platform.enrol("admin@mpcn.example", Role::Admin)?;
    let other = platform.enrol("other@mpcn.example", Role::Admin)?;
    let result = transfers(&platform)
        .request_transfer(&admin, other.user_id())
        .await;
    ensure!(result.is_err(), "admins cannot hand over the overseer role");
    Ok(())
}
