//! SLA sweeps raising alerts and their delivery.

use super::helpers::{Platform, platform};
use chrono::Duration;
use eyre::{Result, ensure};
use mockable::Clock;
use mpcn_workforce::{
    authority::domain::Role,
    notification::{domain::SlaAlertKind, ports::InAppNotifications},
    sla::{adapters::memory::InMemoryResolutionRequestRepository, services::SlaMonitor},
};
use rstest::rstest;
use std::sync::Arc;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn warning_then_breach_alert_admin_tier_once_each(platform: Platform) -> Result<()> {
    let employee = platform.enrol("ada@mpcn.example", Role::Employee)?;
    let admin = platform.enrol("admin@mpcn.example", Role::Admin)?;
    let overseer = platform.enrol("go@mpcn.example", Role::GeneralOverseer)?;
    platform.enrol("lead@mpcn.example", Role::TeamLead)?;

    let monitor = SlaMonitor::new(
        Arc::new(InMemoryResolutionRequestRepository::new()),
        Arc::clone(&platform.accounts),
        Arc::clone(&platform.outbox),
        Arc::clone(&platform.in_app),
        Arc::clone(&platform.audit),
        Arc::clone(&platform.clock),
    )
    .with_warning_window(Duration::hours(4));

    let due = platform.clock.utc() + Duration::hours(3);
    monitor
        .open(employee.user_id(), "Payment missing for February", due)
        .await?;

    let first = monitor.sweep().await?;
    ensure!(first.warnings == 1 && first.breaches == 0, "approaching alert");
    let repeat = monitor.sweep().await?;
    ensure!(repeat.warnings == 0 && repeat.breaches == 0, "warning not repeated");

    platform.clock.advance(Duration::hours(3) + Duration::minutes(1));
    let breach = monitor.sweep().await?;
    ensure!(breach.breaches == 1, "breach alert");

    for recipient in [&admin, &overseer] {
        let rows = platform.in_app.list_for_user(recipient.user_id()).await?;
        ensure!(rows.len() == 2, "one row per alert for each admin-tier user");
    }
    ensure!(
        platform.in_app.list_for_user(employee.user_id()).await?.is_empty(),
        "requester not alerted"
    );

    let delivered = platform.dispatcher.dispatch_due(10).await?;
    ensure!(delivered.delivered == 2, "one email per alert");
    let sent = platform.mailer.sent();
    let subjects: Vec<&str> = sent.iter().map(|email| email.subject()).collect();
    ensure!(
        subjects
            == [
                "SLA approaching: Payment missing for February",
                "SLA breached: Payment missing for February",
            ],
        "unexpected subjects: {subjects:?}"
    );
    let breach_email = sent.last().ok_or_else(|| eyre::eyre!("no email"))?;
    let mut recipients: Vec<&str> = breach_email.to().iter().map(|to| to.as_str()).collect();
    recipients.sort_unstable();
    ensure!(
        recipients == ["admin@mpcn.example", "go@mpcn.example"],
        "both admin-tier users addressed"
    );
    ensure!(SlaAlertKind::Breach.as_str() == "breach", "breach label");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn resolved_requests_are_not_alerted(platform: Platform) -> Result<()> {
    let employee = platform.enrol("ada@mpcn.example", Role::Employee)?;
    platform.enrol("admin@mpcn.example", Role::Admin)?;
    let monitor = SlaMonitor::new(
        Arc::new(InMemoryResolutionRequestRepository::new()),
        Arc::clone(&platform.accounts),
        Arc::clone(&platform.outbox),
        Arc::clone(&platform.in_app),
        Arc::clone(&platform.audit),
        Arc::clone(&platform.clock),
    );

    let request = monitor
        .open(
            employee.user_id(),
            "Wrong rate applied",
            platform.clock.utc() + Duration::hours(1),
        )
        .await?;
    monitor.resolve(request.id()).await?;
    platform.clock.advance(Duration::hours(2));

    let report = monitor.sweep().await?;
    ensure!(report.breaches == 0 && report.warnings == 0, "nothing raised");
    ensure!(platform.outbox.all()?.is_empty(), "nothing queued");
    Ok(())
}
