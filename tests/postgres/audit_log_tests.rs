//! Audit events against the diesel audit log.

#![expect(
    clippy::expect_used,
    reason = "Test code uses expect for assertion clarity"
)]

use super::helpers::{PinnedClock, TestDatabase, test_runtime};
use chrono::Duration;
use mpcn_workforce::{
    audit::{
        adapters::postgres::PostgresAuditLog,
        domain::{AuditAction, AuditEvent, AuditEventId, EntityRef, EntityType},
        ports::{AuditLog, AuditLogError},
    },
    authority::domain::{AuthorizationContext, Role, UserId},
};
use pg_embedded_setup_unpriv::{TestCluster, test_support::shared_test_cluster};
use rstest::rstest;
use serde_json::json;

#[rstest]
fn appended_event_keeps_actor_and_values(shared_test_cluster: &'static TestCluster) {
    let db = TestDatabase::create(shared_test_cluster, "audit_round_trip").expect("database");
    let log = PostgresAuditLog::new(db.pool().expect("pool"));
    let rt = test_runtime().expect("runtime");
    let clock = PinnedClock::new();
    let admin = AuthorizationContext::for_session(UserId::new(), Role::Admin);
    let entity = EntityRef::new(EntityType::WorkReport, uuid::Uuid::new_v4());

    let event = AuditEvent::new(entity, AuditAction::RateOverride, &clock)
        .with_actor(&admin)
        .with_change(json!({"rate": "12.34"}), json!({"rate": "20"}))
        .with_note("client renegotiated");
    rt.block_on(log.append(&event)).expect("append should succeed");

    let events = rt
        .block_on(log.list_for_entity(entity))
        .expect("list should succeed");
    assert_eq!(events, vec![event]);
    let stored = events.first().expect("one event");
    assert_eq!(stored.actor_id(), Some(admin.user_id()));
    assert_eq!(stored.actor_role(), Some(Role::Admin));
    assert_eq!(stored.note(), Some("client renegotiated"));
}

#[rstest]
fn timeline_is_oldest_first_and_scoped_to_entity(shared_test_cluster: &'static TestCluster) {
    let db = TestDatabase::create(shared_test_cluster, "audit_timeline").expect("database");
    let log = PostgresAuditLog::new(db.pool().expect("pool"));
    let rt = test_runtime().expect("runtime");
    let clock = PinnedClock::new();
    let entity = EntityRef::new(EntityType::Task, uuid::Uuid::new_v4());
    let other = EntityRef::new(EntityType::Task, uuid::Uuid::new_v4());

    let submitted = AuditEvent::new(entity, AuditAction::Submitted, &clock);
    clock.advance(Duration::minutes(10));
    let rejected = AuditEvent::new(entity, AuditAction::TeamLeadRejected, &clock);
    clock.advance(Duration::minutes(10));
    let overridden = AuditEvent::new(entity, AuditAction::OverrideApproved, &clock);
    let unrelated = AuditEvent::new(other, AuditAction::Submitted, &clock);

    for event in [&overridden, &unrelated, &submitted, &rejected] {
        rt.block_on(log.append(event)).expect("append");
    }

    let actions: Vec<AuditAction> = rt
        .block_on(log.list_for_entity(entity))
        .expect("list")
        .iter()
        .map(AuditEvent::action)
        .collect();
    assert_eq!(
        actions,
        vec![
            AuditAction::Submitted,
            AuditAction::TeamLeadRejected,
            AuditAction::OverrideApproved,
        ]
    );
}

#[rstest]
fn system_events_have_no_actor(shared_test_cluster: &'static TestCluster) {
    let db = TestDatabase::create(shared_test_cluster, "audit_system").expect("database");
    let log = PostgresAuditLog::new(db.pool().expect("pool"));
    let rt = test_runtime().expect("runtime");
    let entity = EntityRef::new(EntityType::ResolutionRequest, uuid::Uuid::new_v4());

    let event = AuditEvent::new(entity, AuditAction::SlaAlertRaised, &PinnedClock::new())
        .with_new_value(json!({"kind": "breach"}));
    rt.block_on(log.append(&event)).expect("append");

    let events = rt.block_on(log.list_for_entity(entity)).expect("list");
    let stored = events.first().expect("one event");
    assert_eq!(stored.actor_id(), None);
    assert_eq!(stored.actor_role(), None);
    assert_eq!(stored.new_value(), Some(&json!({"kind": "breach"})));
}

#[rstest]
fn duplicate_event_is_reported(shared_test_cluster: &'static TestCluster) {
    let db = TestDatabase::create(shared_test_cluster, "audit_duplicate").expect("database");
    let log = PostgresAuditLog::new(db.pool().expect("pool"));
    let rt = test_runtime().expect("runtime");
    let entity = EntityRef::new(EntityType::Task, uuid::Uuid::new_v4());
    let event = AuditEvent::new(entity, AuditAction::Submitted, &PinnedClock::new());
    let event_id: AuditEventId = event.id();

    rt.block_on(log.append(&event)).expect("first append");
    let result = rt.block_on(log.append(&event));
    assert!(
        matches!(result, Err(AuditLogError::DuplicateEvent(id)) if id == event_id),
        "expected DuplicateEvent, got {result:?}"
    );
}
