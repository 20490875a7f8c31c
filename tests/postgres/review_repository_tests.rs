//! Review record round trips against the diesel repository.

#![expect(
    clippy::expect_used,
    reason = "Test code uses expect for assertion clarity"
)]

use super::helpers::{PinnedClock, TestDatabase, test_runtime};
use bigdecimal::BigDecimal;
use chrono::{Duration, NaiveDate};
use diesel::connection::SimpleConnection;
use mpcn_workforce::{
    authority::domain::{Justification, UserId},
    review::{
        adapters::postgres::PostgresReviewRepository,
        domain::{
            Decision, FinalStatus, Hours, NewSubmission, Rate, RecordId, RecordKind, ReviewRecord,
        },
        ports::{ReviewRepository, ReviewRepositoryError},
    },
};
use pg_embedded_setup_unpriv::{TestCluster, test_support::shared_test_cluster};
use rstest::rstest;

fn submission(kind: RecordKind, submitter_id: UserId, hours: &str, rate: &str) -> NewSubmission {
    NewSubmission {
        kind,
        submitter_id,
        title: "Annotation batch".to_owned(),
        platform: "Outlier".to_owned(),
        work_date: NaiveDate::from_ymd_opt(2024, 3, 1).expect("valid date"),
        hours_worked: Hours::parse(hours).expect("valid hours"),
        rate: Rate::parse(rate).expect("valid rate"),
    }
}

fn submit(clock: &PinnedClock, kind: RecordKind, submitter_id: UserId) -> ReviewRecord {
    ReviewRecord::submit(submission(kind, submitter_id, "7.5", "12.34"), clock)
        .expect("valid submission")
}

fn decimal(raw: &str) -> BigDecimal {
    raw.parse().expect("valid decimal")
}

fn reason(text: &str) -> Option<Justification> {
    Some(Justification::new(text).expect("non-empty reason"))
}

#[rstest]
fn stored_record_reads_back_unchanged(shared_test_cluster: &'static TestCluster) {
    let db = TestDatabase::create(shared_test_cluster, "review_round_trip").expect("database");
    let repo = PostgresReviewRepository::new(db.pool().expect("pool"));
    let rt = test_runtime().expect("runtime");
    let clock = PinnedClock::new();

    let record = submit(&clock, RecordKind::WorkReport, UserId::new());
    rt.block_on(repo.store(&record)).expect("store should succeed");

    let found = rt
        .block_on(repo.find_by_id(record.id()))
        .expect("find should succeed")
        .expect("record should exist");
    assert_eq!(found, record);
    assert_eq!(found.earnings().value(), &decimal("92.55"));
    assert_eq!(found.final_status(), FinalStatus::Pending);
    assert!(found.team_lead_review().is_none());
}

#[rstest]
fn missing_record_is_none(shared_test_cluster: &'static TestCluster) {
    let db = TestDatabase::create(shared_test_cluster, "review_missing").expect("database");
    let repo = PostgresReviewRepository::new(db.pool().expect("pool"));
    let rt = test_runtime().expect("runtime");

    let found = rt
        .block_on(repo.find_by_id(RecordId::new()))
        .expect("query ok");
    assert!(found.is_none());
}

#[rstest]
fn duplicate_store_is_reported(shared_test_cluster: &'static TestCluster) {
    let db = TestDatabase::create(shared_test_cluster, "review_duplicate").expect("database");
    let repo = PostgresReviewRepository::new(db.pool().expect("pool"));
    let rt = test_runtime().expect("runtime");
    let record = submit(&PinnedClock::new(), RecordKind::Task, UserId::new());

    rt.block_on(repo.store(&record)).expect("first store");
    let result = rt.block_on(repo.store(&record));
    assert!(
        matches!(result, Err(ReviewRepositoryError::DuplicateRecord(id)) if id == record.id()),
        "expected DuplicateRecord, got {result:?}"
    );
}

#[rstest]
fn update_persists_both_review_tiers(shared_test_cluster: &'static TestCluster) {
    let db = TestDatabase::create(shared_test_cluster, "review_update").expect("database");
    let repo = PostgresReviewRepository::new(db.pool().expect("pool"));
    let rt = test_runtime().expect("runtime");
    let clock = PinnedClock::new();

    let mut record = submit(&clock, RecordKind::Task, UserId::new());
    rt.block_on(repo.store(&record)).expect("store");

    let lead = UserId::new();
    clock.advance(Duration::hours(2));
    record
        .record_team_lead_decision(lead, Decision::Rejected, reason("hours unverified"), &clock)
        .expect("record awaits review");
    rt.block_on(repo.update(&record)).expect("team lead update");

    let admin = UserId::new();
    clock.advance(Duration::hours(1));
    record.apply_override(admin, Decision::Approved, reason("verified with client"), &clock);
    rt.block_on(repo.update(&record)).expect("override update");

    let found = rt
        .block_on(repo.find_by_id(record.id()))
        .expect("find")
        .expect("record exists");
    assert_eq!(found, record);
    assert_eq!(found.final_status(), FinalStatus::Approved);
    assert_eq!(found.team_lead_status(), Some(Decision::Rejected));
    let team_lead = found.team_lead_review().expect("team lead tier");
    assert_eq!(team_lead.reviewer_id, lead);
    assert_eq!(team_lead.reason.as_deref(), Some("hours unverified"));
    let override_tier = found.admin_review().expect("admin tier");
    assert_eq!(override_tier.reviewer_id, admin);
    assert_eq!(override_tier.reviewed_at, found.updated_at());
}

#[rstest]
fn rate_adjustment_recomputes_stored_earnings(shared_test_cluster: &'static TestCluster) {
    let db = TestDatabase::create(shared_test_cluster, "review_rate").expect("database");
    let repo = PostgresReviewRepository::new(db.pool().expect("pool"));
    let rt = test_runtime().expect("runtime");
    let clock = PinnedClock::new();

    let mut record = submit(&clock, RecordKind::WorkReport, UserId::new());
    rt.block_on(repo.store(&record)).expect("store");
    record
        .adjust_rate(Rate::parse("20").expect("valid rate"), &clock)
        .expect("record is pending");
    rt.block_on(repo.update(&record)).expect("update");

    let found = rt
        .block_on(repo.find_by_id(record.id()))
        .expect("find")
        .expect("record exists");
    assert_eq!(found.base_rate(), record.base_rate());
    assert_eq!(found.current_rate().value(), &decimal("20"));
    assert_eq!(found.earnings().value(), &decimal("150"));
}

#[rstest]
fn update_of_unknown_record_is_not_found(shared_test_cluster: &'static TestCluster) {
    let db = TestDatabase::create(shared_test_cluster, "review_update_missing").expect("database");
    let repo = PostgresReviewRepository::new(db.pool().expect("pool"));
    let rt = test_runtime().expect("runtime");
    let record = submit(&PinnedClock::new(), RecordKind::Task, UserId::new());

    let result = rt.block_on(repo.update(&record));
    assert!(
        matches!(result, Err(ReviewRepositoryError::NotFound(id)) if id == record.id()),
        "expected NotFound, got {result:?}"
    );
}

#[rstest]
fn submitter_listing_is_oldest_first(shared_test_cluster: &'static TestCluster) {
    let db = TestDatabase::create(shared_test_cluster, "review_by_submitter").expect("database");
    let repo = PostgresReviewRepository::new(db.pool().expect("pool"));
    let rt = test_runtime().expect("runtime");
    let clock = PinnedClock::new();
    let submitter = UserId::new();

    let first = submit(&clock, RecordKind::Task, submitter);
    clock.advance(Duration::minutes(5));
    let second = submit(&clock, RecordKind::WorkReport, submitter);
    let stranger = submit(&clock, RecordKind::Task, UserId::new());
    for record in [&second, &stranger, &first] {
        rt.block_on(repo.store(record)).expect("store");
    }

    let listed = rt
        .block_on(repo.list_for_submitter(submitter))
        .expect("list");
    let ids: Vec<RecordId> = listed.iter().map(ReviewRecord::id).collect();
    assert_eq!(ids, vec![first.id(), second.id()]);
}

#[rstest]
fn overridable_listing_holds_pending_rejections_of_one_kind(
    shared_test_cluster: &'static TestCluster,
) {
    let db = TestDatabase::create(shared_test_cluster, "review_overridable").expect("database");
    let repo = PostgresReviewRepository::new(db.pool().expect("pool"));
    let rt = test_runtime().expect("runtime");
    let clock = PinnedClock::new();
    let lead = UserId::new();

    let mut rejected = submit(&clock, RecordKind::Task, UserId::new());
    rejected
        .record_team_lead_decision(lead, Decision::Rejected, reason("no evidence"), &clock)
        .expect("awaits review");

    clock.advance(Duration::minutes(1));
    let mut approved = submit(&clock, RecordKind::Task, UserId::new());
    approved
        .record_team_lead_decision(lead, Decision::Approved, None, &clock)
        .expect("awaits review");

    let mut overridden = submit(&clock, RecordKind::Task, UserId::new());
    overridden
        .record_team_lead_decision(lead, Decision::Rejected, reason("late"), &clock)
        .expect("awaits review");
    overridden.apply_override(UserId::new(), Decision::Rejected, reason("confirmed"), &clock);

    let mut other_kind = submit(&clock, RecordKind::WorkReport, UserId::new());
    other_kind
        .record_team_lead_decision(lead, Decision::Rejected, reason("duplicate"), &clock)
        .expect("awaits review");

    let untouched = submit(&clock, RecordKind::Task, UserId::new());

    for record in [&rejected, &approved, &overridden, &other_kind, &untouched] {
        rt.block_on(repo.store(record)).expect("store");
    }

    let tasks = rt
        .block_on(repo.list_overridable(RecordKind::Task))
        .expect("list tasks");
    assert_eq!(tasks, vec![rejected]);

    let reports = rt
        .block_on(repo.list_overridable(RecordKind::WorkReport))
        .expect("list reports");
    assert_eq!(reports, vec![other_kind]);
}

#[rstest]
#[case::approved_without_decision(
    "INSERT INTO review_records (id, kind, submitter_id, title, platform, work_date, \
     hours_worked, base_rate, current_rate, earnings, final_status) VALUES \
     ('00000000-0000-4000-8000-000000000001', 'task', '00000000-0000-4000-8000-000000000002', 'Batch', 'Outlier', '2024-03-01', \
     1, 10, 10, 10, 'approved')"
)]
#[case::rejected_by_team_lead_only(
    "INSERT INTO review_records (id, kind, submitter_id, title, platform, work_date, \
     hours_worked, base_rate, current_rate, earnings, final_status, team_lead_status) VALUES \
     ('00000000-0000-4000-8000-000000000001', 'task', '00000000-0000-4000-8000-000000000002', 'Batch', 'Outlier', '2024-03-01', \
     1, 10, 10, 10, 'rejected', 'rejected')"
)]
fn schema_refuses_unbacked_final_status(
    shared_test_cluster: &'static TestCluster,
    #[case] insert: &str,
) {
    let db = TestDatabase::create(shared_test_cluster, "review_check").expect("database");
    let mut conn = db.connect().expect("connection");

    let error = conn
        .batch_execute(insert)
        .expect_err("constraint should reject the row");
    assert!(
        error.to_string().contains("review_records_final_status_backed"),
        "unexpected error: {error}"
    );
}
