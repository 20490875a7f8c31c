//! When steps for review override BDD scenarios.

use super::world::{OverrideWorld, run_async};
use mpcn_workforce::{
    authority::domain::{AuthorizationContext, Confirmation},
    review::{domain::Decision, services::OverrideRequest},
};
use rstest_bdd_macros::when;

fn apply(
    world: &mut OverrideWorld,
    actor: &AuthorizationContext,
    decision: &str,
    confirmation: Confirmation,
) -> Result<(), eyre::Report> {
    let verdict = Decision::try_from(decision)
        .map_err(|err| eyre::eyre!("invalid decision in scenario: {err}"))?;
    let record_id = world.record()?.id();
    let result = run_async(world.service.override_decision(
        actor,
        OverrideRequest::new(record_id, verdict, confirmation),
    ));
    if let Ok(ref updated) = result {
        world.record = Some(updated.clone());
    }
    world.last_override = Some(result);
    Ok(())
}

#[when(r#"an admin overrides it to "{decision}" with reason "{reason}""#)]
fn admin_overrides_with_reason(
    world: &mut OverrideWorld,
    decision: String,
    reason: String,
) -> Result<(), eyre::Report> {
    let actor = world.admin.clone();
    apply(world, &actor, &decision, Confirmation::new().with_reason(reason))
}

#[when(r#"an admin overrides it to "{decision}" without a reason"#)]
fn admin_overrides_without_reason(
    world: &mut OverrideWorld,
    decision: String,
) -> Result<(), eyre::Report> {
    let actor = world.admin.clone();
    apply(world, &actor, &decision, Confirmation::new())
}

#[when(
    r#"the general overseer overrides it to "{decision}" with reason "{reason}" without acknowledging"#
)]
fn overseer_overrides_without_acknowledging(
    world: &mut OverrideWorld,
    decision: String,
    reason: String,
) -> Result<(), eyre::Report> {
    let actor = world.overseer.clone();
    apply(world, &actor, &decision, Confirmation::new().with_reason(reason))
}

#[when(
    r#"the general overseer overrides it to "{decision}" with reason "{reason}" and acknowledges the impact"#
)]
fn overseer_overrides_with_acknowledgement(
    world: &mut OverrideWorld,
    decision: String,
    reason: String,
) -> Result<(), eyre::Report> {
    let actor = world.overseer.clone();
    apply(
        world,
        &actor,
        &decision,
        Confirmation::new().with_reason(reason).acknowledged(),
    )
}
