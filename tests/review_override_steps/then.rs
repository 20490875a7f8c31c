//! Then steps for review override BDD scenarios.

use super::world::{OverrideWorld, run_async};
use mpcn_workforce::{
    authority::domain::AuthorityError,
    notification::domain::NotificationPayload,
    review::{
        domain::{Decision, FinalStatus},
        services::ReviewWorkflowError,
    },
};
use rstest_bdd_macros::then;

#[then(r#"the final status is "{status}""#)]
fn final_status_is(world: &OverrideWorld, status: String) -> Result<(), eyre::Report> {
    let expected = FinalStatus::try_from(status.as_str())
        .map_err(|err| eyre::eyre!("invalid expected status in scenario: {err}"))?;
    let record_id = world.record()?.id();
    let stored = run_async(world.service.find(record_id))?;
    if stored.final_status() != expected {
        return Err(eyre::eyre!(
            "expected final status {}, found {}",
            expected.as_str(),
            stored.final_status().as_str()
        ));
    }
    Ok(())
}

#[then(r#"the team lead decision is still "{decision}""#)]
fn team_lead_decision_is(world: &OverrideWorld, decision: String) -> Result<(), eyre::Report> {
    let expected = Decision::try_from(decision.as_str())
        .map_err(|err| eyre::eyre!("invalid expected decision in scenario: {err}"))?;
    let record = world.record()?;
    if record.team_lead_status() != Some(expected) {
        return Err(eyre::eyre!(
            "expected team lead decision {}, found {:?}",
            expected.as_str(),
            record.team_lead_status()
        ));
    }
    Ok(())
}

#[then("an override notification is queued for the employee")]
fn override_notification_queued(world: &OverrideWorld) -> Result<(), eyre::Report> {
    let queued = world.outbox.all()?;
    let found = queued.iter().any(|message| {
        matches!(
            message.payload(),
            NotificationPayload::ReviewDecision(notice)
                if notice.is_override && notice.user_id == world.employee.user_id()
        )
    });
    if !found {
        return Err(eyre::eyre!("no override notification queued for the employee"));
    }
    Ok(())
}

fn refused_with(world: &OverrideWorld, expected: &AuthorityError) -> Result<(), eyre::Report> {
    let result = world
        .last_override
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing override result"))?;
    if !matches!(result, Err(ReviewWorkflowError::Authority(err)) if err == expected) {
        return Err(eyre::eyre!("expected {expected:?}, got {result:?}"));
    }
    Ok(())
}

#[then("the override is refused because a reason is required")]
fn refused_for_missing_reason(world: &OverrideWorld) -> Result<(), eyre::Report> {
    refused_with(world, &AuthorityError::ReasonRequired)
}

#[then("the override is refused because an acknowledgement is required")]
fn refused_for_missing_acknowledgement(world: &OverrideWorld) -> Result<(), eyre::Report> {
    refused_with(world, &AuthorityError::AcknowledgementRequired)
}
