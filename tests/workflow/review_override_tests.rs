//! End-to-end override workflow with email delivery.

use super::helpers::{Platform, platform};
use chrono::{Duration, NaiveDate};
use eyre::{Result, ensure};
use mpcn_workforce::{
    audit::domain::AuditAction,
    authority::domain::{AuthorityError, Confirmation, Role},
    review::{
        domain::{Decision, FinalStatus, Hours, Rate, RecordKind},
        services::{
            OverrideRequest, RateAdjustmentRequest, ReviewWorkflowError, SubmitWorkRequest,
            TeamLeadReviewRequest,
        },
    },
};
use rstest::rstest;

fn report() -> Result<SubmitWorkRequest> {
    Ok(SubmitWorkRequest::new(
        RecordKind::WorkReport,
        "Week 9 evaluation batch",
        "Outlier",
        NaiveDate::from_ymd_opt(2024, 3, 1).ok_or_else(|| eyre::eyre!("invalid date"))?,
        Hours::parse("7.5")?,
        Rate::parse("12")?,
    ))
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn admin_override_reaches_submitter_by_email(platform: Platform) -> Result<()> {
    let employee = platform.enrol("ada@mpcn.example", Role::Employee)?;
    let lead = platform.enrol("lead@mpcn.example", Role::TeamLead)?;
    let admin = platform.enrol("admin@mpcn.example", Role::Admin)?;

    let record = platform.reviews.submit(&employee, report()?).await?;
    platform
        .reviews
        .team_lead_review(
            &lead,
            TeamLeadReviewRequest::new(record.id(), Decision::Rejected)
                .with_reason("hours look high"),
        )
        .await?;
    let overridable = platform
        .reviews
        .list_overridable(&admin, RecordKind::WorkReport)
        .await?;
    ensure!(overridable.len() == 1, "rejected report offered for override");
    platform.clock.advance(Duration::minutes(5));

    let overridden = platform
        .reviews
        .override_decision(
            &admin,
            OverrideRequest::new(
                record.id(),
                Decision::Approved,
                Confirmation::new().with_reason("checked against platform log"),
            ),
        )
        .await?;
    ensure!(overridden.final_status() == FinalStatus::Approved, "approved");
    ensure!(
        platform
            .reviews
            .list_overridable(&admin, RecordKind::WorkReport)
            .await?
            .is_empty(),
        "no longer offered once final"
    );

    let report = platform.dispatcher.dispatch_due(10).await?;
    ensure!(report.delivered == 2, "team lead and override notices delivered");

    let sent = platform.mailer.sent();
    let last = sent.last().ok_or_else(|| eyre::eyre!("no email sent"))?;
    ensure!(
        last.to().iter().map(|address| address.as_str()).eq(["ada@mpcn.example"]),
        "addressed to the submitter"
    );
    ensure!(
        last.subject() == r#"Your work report "Week 9 evaluation batch" was approved (override)"#,
        "unexpected subject: {}",
        last.subject()
    );
    ensure!(
        last.body().contains("overriding the team lead decision"),
        "override explained"
    );
    ensure!(
        last.body().contains("Reason: checked against platform log"),
        "reason included"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn overseer_override_is_refused_without_acknowledgement(platform: Platform) -> Result<()> {
    let employee = platform.enrol("ada@mpcn.example", Role::Employee)?;
    let overseer = platform.enrol("go@mpcn.example", Role::GeneralOverseer)?;
    let record = platform.reviews.submit(&employee, report()?).await?;

    let result = platform
        .reviews
        .override_decision(
            &overseer,
            OverrideRequest::new(
                record.id(),
                Decision::Rejected,
                Confirmation::new().with_reason("duplicate"),
            ),
        )
        .await;
    ensure!(
        matches!(
            result,
            Err(ReviewWorkflowError::Authority(
                AuthorityError::AcknowledgementRequired
            ))
        ),
        "acknowledgement demanded"
    );
    let stored = platform.reviews.find(record.id()).await?;
    ensure!(stored.final_status() == FinalStatus::Pending, "record untouched");
    ensure!(platform.outbox.all()?.is_empty(), "no notification queued");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn audit_timeline_records_every_step(platform: Platform) -> Result<()> {
    let employee = platform.enrol("ada@mpcn.example", Role::Employee)?;
    let lead = platform.enrol("lead@mpcn.example", Role::TeamLead)?;
    let overseer = platform.enrol("go@mpcn.example", Role::GeneralOverseer)?;

    let record = platform.reviews.submit(&employee, report()?).await?;
    platform
        .reviews
        .adjust_rate(
            &overseer,
            RateAdjustmentRequest::new(
                record.id(),
                Rate::parse("14")?,
                Confirmation::new().with_reason("senior rate").acknowledged(),
            ),
        )
        .await?;
    platform
        .reviews
        .team_lead_review(&lead, TeamLeadReviewRequest::new(record.id(), Decision::Approved))
        .await?;

    let timeline = platform.reviews.timeline(&overseer, record.id()).await?;
    let actions: Vec<AuditAction> = timeline.iter().map(|event| event.action()).collect();
    ensure!(
        actions
            == [
                AuditAction::Submitted,
                AuditAction::RateOverride,
                AuditAction::TeamLeadApproved,
            ],
        "unexpected timeline: {actions:?}"
    );
    let stored = platform.reviews.find(record.id()).await?;
    ensure!(stored.earnings().to_string() == "105.00", "earnings at adjusted rate");
    Ok(())
}
