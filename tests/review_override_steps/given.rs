//! Given steps for review override BDD scenarios.

use super::world::{OverrideWorld, run_async};
use chrono::NaiveDate;
use eyre::WrapErr;
use mpcn_workforce::review::{
    domain::{Decision, Hours, Rate, RecordKind},
    services::{SubmitWorkRequest, TeamLeadReviewRequest},
};
use rstest_bdd_macros::given;

#[given(r#"an employee has submitted a work report titled "{title}""#)]
fn employee_submitted_report(
    world: &mut OverrideWorld,
    title: String,
) -> Result<(), eyre::Report> {
    let request = SubmitWorkRequest::new(
        RecordKind::WorkReport,
        title,
        "Outlier",
        NaiveDate::from_ymd_opt(2024, 3, 1).ok_or_else(|| eyre::eyre!("invalid work date"))?,
        Hours::parse("7.5")?,
        Rate::parse("12")?,
    );
    let record = run_async(world.service.submit(&world.employee, request))
        .wrap_err("submit work report for override scenario")?;
    world.record = Some(record);
    Ok(())
}

#[given(r#"the team lead rejected it because "{reason}""#)]
fn team_lead_rejected(world: &mut OverrideWorld, reason: String) -> Result<(), eyre::Report> {
    let record_id = world.record()?.id();
    let reviewed = run_async(world.service.team_lead_review(
        &world.team_lead,
        TeamLeadReviewRequest::new(record_id, Decision::Rejected).with_reason(reason),
    ))
    .wrap_err("record team lead rejection in scenario setup")?;
    world.record = Some(reviewed);
    Ok(())
}
