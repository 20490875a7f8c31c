//! Outbox queueing and delivery state against the diesel outbox.

#![expect(
    clippy::expect_used,
    reason = "Test code uses expect for assertion clarity"
)]

use super::helpers::{PinnedClock, TestDatabase, test_runtime};
use chrono::{Duration, NaiveDate};
use mockable::Clock;
use mpcn_workforce::{
    authority::domain::UserId,
    notification::{
        adapters::postgres::PostgresOutbox,
        domain::{
            DeliveryStatus, NotificationPayload, OutboxMessage, OutboxMessageId,
            ReviewNotification, RetryPolicy, SlaAlert, SlaAlertKind,
        },
        ports::{NotificationOutbox, NotificationStoreError},
    },
};
use pg_embedded_setup_unpriv::{TestCluster, test_support::shared_test_cluster};
use rstest::rstest;

fn review_notice() -> NotificationPayload {
    NotificationPayload::ReviewDecision(ReviewNotification {
        item_type: "task".to_owned(),
        action: "approved".to_owned(),
        user_id: UserId::new(),
        item_title: "Annotation batch".to_owned(),
        platform: "Outlier".to_owned(),
        work_date: NaiveDate::from_ymd_opt(2024, 3, 1).expect("valid date"),
        reason: Some("verified with client".to_owned()),
        reviewer_name: None,
        is_override: true,
    })
}

fn sla_alert(clock: &PinnedClock) -> NotificationPayload {
    NotificationPayload::SlaAlert(SlaAlert {
        request_id: uuid::Uuid::new_v4(),
        title: "Missing payout".to_owned(),
        sla_due: clock.utc(),
        kind: SlaAlertKind::Breach,
        recipients: vec![UserId::new(), UserId::new()],
    })
}

#[rstest]
fn queued_message_reads_back_unchanged(shared_test_cluster: &'static TestCluster) {
    let db = TestDatabase::create(shared_test_cluster, "outbox_round_trip").expect("database");
    let outbox = PostgresOutbox::new(db.pool().expect("pool"));
    let rt = test_runtime().expect("runtime");
    let clock = PinnedClock::new();

    let message = OutboxMessage::new(review_notice(), &clock);
    rt.block_on(outbox.enqueue(&message)).expect("enqueue should succeed");

    let found = rt
        .block_on(outbox.find_by_id(message.id()))
        .expect("find should succeed")
        .expect("message should exist");
    assert_eq!(found, message);
    assert_eq!(found.status(), DeliveryStatus::Pending);
    assert_eq!(found.attempts(), 0);
}

#[rstest]
fn due_returns_available_pending_messages_oldest_first(
    shared_test_cluster: &'static TestCluster,
) {
    let db = TestDatabase::create(shared_test_cluster, "outbox_due").expect("database");
    let outbox = PostgresOutbox::new(db.pool().expect("pool"));
    let rt = test_runtime().expect("runtime");
    let clock = PinnedClock::new();
    let policy = RetryPolicy::new(5, Duration::minutes(30));

    let first = OutboxMessage::new(review_notice(), &clock);
    clock.advance(Duration::seconds(1));
    let second = OutboxMessage::new(sla_alert(&clock), &clock);
    let mut delivered = OutboxMessage::new(review_notice(), &clock);
    delivered.mark_delivered(&clock);
    let mut backing_off = OutboxMessage::new(review_notice(), &clock);
    backing_off.record_failure("smtp timeout", &policy, &clock);

    for message in [&second, &delivered, &backing_off, &first] {
        rt.block_on(outbox.enqueue(message)).expect("enqueue");
    }

    let due = rt.block_on(outbox.due(clock.utc(), 10)).expect("due");
    let ids: Vec<OutboxMessageId> = due.iter().map(OutboxMessage::id).collect();
    assert_eq!(ids, vec![first.id(), second.id()]);

    let limited = rt.block_on(outbox.due(clock.utc(), 1)).expect("due");
    assert_eq!(limited.len(), 1);

    clock.advance(Duration::hours(1));
    let later = rt.block_on(outbox.due(clock.utc(), 10)).expect("due");
    assert!(later.iter().any(|message| message.id() == backing_off.id()));
}

#[rstest]
fn update_persists_failures_and_delivery(shared_test_cluster: &'static TestCluster) {
    let db = TestDatabase::create(shared_test_cluster, "outbox_update").expect("database");
    let outbox = PostgresOutbox::new(db.pool().expect("pool"));
    let rt = test_runtime().expect("runtime");
    let clock = PinnedClock::new();
    let policy = RetryPolicy::new(2, Duration::minutes(1));

    let mut message = OutboxMessage::new(sla_alert(&clock), &clock);
    rt.block_on(outbox.enqueue(&message)).expect("enqueue");

    message.record_failure("gateway unavailable", &policy, &clock);
    rt.block_on(outbox.update(&message)).expect("first failure");
    let retrying = rt
        .block_on(outbox.find_by_id(message.id()))
        .expect("find")
        .expect("exists");
    assert_eq!(retrying, message);
    assert_eq!(retrying.last_error(), Some("gateway unavailable"));

    message.record_failure("gateway unavailable", &policy, &clock);
    rt.block_on(outbox.update(&message)).expect("second failure");
    let failed = rt
        .block_on(outbox.find_by_id(message.id()))
        .expect("find")
        .expect("exists");
    assert_eq!(failed.status(), DeliveryStatus::Failed);
    assert_eq!(failed.attempts(), 2);
    let due = rt
        .block_on(outbox.due(clock.utc() + Duration::days(1), 10))
        .expect("due");
    assert!(due.is_empty());
}

#[rstest]
fn delivered_message_leaves_the_queue(shared_test_cluster: &'static TestCluster) {
    let db = TestDatabase::create(shared_test_cluster, "outbox_delivered").expect("database");
    let outbox = PostgresOutbox::new(db.pool().expect("pool"));
    let rt = test_runtime().expect("runtime");
    let clock = PinnedClock::new();

    let mut message = OutboxMessage::new(review_notice(), &clock);
    rt.block_on(outbox.enqueue(&message)).expect("enqueue");
    clock.advance(Duration::seconds(3));
    message.mark_delivered(&clock);
    rt.block_on(outbox.update(&message)).expect("update");

    let found = rt
        .block_on(outbox.find_by_id(message.id()))
        .expect("find")
        .expect("exists");
    assert_eq!(found.status(), DeliveryStatus::Delivered);
    assert_eq!(found.updated_at(), clock.utc());
    assert!(rt.block_on(outbox.due(clock.utc(), 10)).expect("due").is_empty());
}

#[rstest]
fn duplicate_and_unknown_messages_are_reported(shared_test_cluster: &'static TestCluster) {
    let db = TestDatabase::create(shared_test_cluster, "outbox_errors").expect("database");
    let outbox = PostgresOutbox::new(db.pool().expect("pool"));
    let rt = test_runtime().expect("runtime");
    let clock = PinnedClock::new();

    let queued = OutboxMessage::new(review_notice(), &clock);
    rt.block_on(outbox.enqueue(&queued)).expect("enqueue");
    let duplicate = rt.block_on(outbox.enqueue(&queued));
    assert!(
        matches!(duplicate, Err(NotificationStoreError::Duplicate(id)) if id == queued.id().into_inner()),
        "expected Duplicate, got {duplicate:?}"
    );

    let stranger = OutboxMessage::new(review_notice(), &clock);
    let missing = rt.block_on(outbox.update(&stranger));
    assert!(
        matches!(missing, Err(NotificationStoreError::NotFound(id)) if id == stranger.id().into_inner()),
        "expected NotFound, got {missing:?}"
    );
}
