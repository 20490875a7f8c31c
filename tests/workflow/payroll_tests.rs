//! Earnings after overrides and rate changes.

use super::helpers::{Platform, platform};
use chrono::NaiveDate;
use eyre::{Result, ensure};
use mpcn_workforce::{
    authority::domain::{Confirmation, Role},
    payroll::{domain::PayPeriod, services::PayrollService},
    review::{
        domain::{Decision, Hours, Rate, RecordKind},
        services::{
            OverrideRequest, RateAdjustmentRequest, SubmitWorkRequest, TeamLeadReviewRequest,
        },
    },
};
use rstest::rstest;
use std::sync::Arc;

fn task(title: &str, day: u32, hours: &str) -> Result<SubmitWorkRequest> {
    Ok(SubmitWorkRequest::new(
        RecordKind::Task,
        title,
        "Outlier",
        NaiveDate::from_ymd_opt(2024, 3, day).ok_or_else(|| eyre::eyre!("invalid date"))?,
        Hours::parse(hours)?,
        Rate::parse("10")?,
    ))
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn payroll_counts_overridden_and_adjusted_work(platform: Platform) -> Result<()> {
    let employee = platform.enrol("ada@mpcn.example", Role::Employee)?;
    let lead = platform.enrol("lead@mpcn.example", Role::TeamLead)?;
    let admin = platform.enrol("admin@mpcn.example", Role::Admin)?;

    let approved = platform.reviews.submit(&employee, task("A", 4, "3")?).await?;
    platform
        .reviews
        .adjust_rate(
            &admin,
            RateAdjustmentRequest::new(
                approved.id(),
                Rate::parse("12.5")?,
                Confirmation::new().with_reason("bonus week"),
            ),
        )
        .await?;
    platform
        .reviews
        .team_lead_review(&lead, TeamLeadReviewRequest::new(approved.id(), Decision::Approved))
        .await?;

    let rescued = platform.reviews.submit(&employee, task("B", 5, "2")?).await?;
    platform
        .reviews
        .team_lead_review(
            &lead,
            TeamLeadReviewRequest::new(rescued.id(), Decision::Rejected).with_reason("no proof"),
        )
        .await?;
    platform
        .reviews
        .override_decision(
            &admin,
            OverrideRequest::new(
                rescued.id(),
                Decision::Approved,
                Confirmation::new().with_reason("proof supplied later"),
            ),
        )
        .await?;

    platform.reviews.submit(&employee, task("C", 6, "5")?).await?;

    let payroll = PayrollService::new(Arc::clone(&platform.records));
    let period = PayPeriod::month_of(
        NaiveDate::from_ymd_opt(2024, 3, 1).ok_or_else(|| eyre::eyre!("invalid date"))?,
    );
    let summary = payroll.summarize(&employee, employee.user_id(), period).await?;
    ensure!(summary.approved_records().len() == 2, "two approved records");
    ensure!(summary.total_hours().to_string() == "5", "hours");
    ensure!(summary.total_earnings().to_string() == "57.50", "earnings");
    ensure!(summary.pending_count() == 1, "one pending");
    Ok(())
}
