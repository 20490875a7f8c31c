//! `PostgreSQL` repository implementation for review records.

use super::{models::ReviewRecordRow, schema::review_records};
use crate::authority::domain::UserId;
use crate::review::{
    domain::{
        Decision, Earnings, FinalStatus, Hours, ParseReviewValueError, PersistedReviewData, Rate,
        RecordId, RecordKind, ReviewRecord, TierReview,
    },
    ports::{ReviewRepository, ReviewRepositoryError, ReviewRepositoryResult},
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL` connection pool type used by review adapters.
pub type ReviewPgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL`-backed review repository.
#[derive(Debug, Clone)]
pub struct PostgresReviewRepository {
    pool: ReviewPgPool,
}

impl PostgresReviewRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: ReviewPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> ReviewRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> ReviewRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(ReviewRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(ReviewRepositoryError::persistence)?
    }
}

#[async_trait]
impl ReviewRepository for PostgresReviewRepository {
    async fn store(&self, record: &ReviewRecord) -> ReviewRepositoryResult<()> {
        let record_id = record.id();
        let row = to_row(record);
        self.run_blocking(move |connection| {
            diesel::insert_into(review_records::table)
                .values(&row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        ReviewRepositoryError::DuplicateRecord(record_id)
                    }
                    _ => ReviewRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn update(&self, record: &ReviewRecord) -> ReviewRepositoryResult<()> {
        let record_id = record.id();
        let row = to_row(record);
        self.run_blocking(move |connection| {
            let updated = diesel::update(review_records::table.find(record_id.into_inner()))
                .set(&row)
                .execute(connection)
                .map_err(ReviewRepositoryError::persistence)?;
            if updated == 0 {
                return Err(ReviewRepositoryError::NotFound(record_id));
            }
            Ok(())
        })
        .await
    }

    async fn find_by_id(&self, id: RecordId) -> ReviewRepositoryResult<Option<ReviewRecord>> {
        self.run_blocking(move |connection| {
            let row = review_records::table
                .find(id.into_inner())
                .select(ReviewRecordRow::as_select())
                .first::<ReviewRecordRow>(connection)
                .optional()
                .map_err(ReviewRepositoryError::persistence)?;
            row.map(row_to_record).transpose()
        })
        .await
    }

    async fn list_for_submitter(
        &self,
        submitter: UserId,
    ) -> ReviewRepositoryResult<Vec<ReviewRecord>> {
        self.run_blocking(move |connection| {
            let rows = review_records::table
                .filter(review_records::submitter_id.eq(submitter.into_inner()))
                .order(review_records::created_at.asc())
                .select(ReviewRecordRow::as_select())
                .load::<ReviewRecordRow>(connection)
                .map_err(ReviewRepositoryError::persistence)?;
            rows.into_iter().map(row_to_record).collect()
        })
        .await
    }

    async fn list_overridable(
        &self,
        kind: RecordKind,
    ) -> ReviewRepositoryResult<Vec<ReviewRecord>> {
        self.run_blocking(move |connection| {
            let rows = review_records::table
                .filter(review_records::kind.eq(kind.as_str()))
                .filter(review_records::final_status.eq(FinalStatus::Pending.as_str()))
                .filter(review_records::team_lead_status.eq(Decision::Rejected.as_str()))
                .order(review_records::created_at.asc())
                .select(ReviewRecordRow::as_select())
                .load::<ReviewRecordRow>(connection)
                .map_err(ReviewRepositoryError::persistence)?;
            rows.into_iter().map(row_to_record).collect()
        })
        .await
    }
}

fn to_row(record: &ReviewRecord) -> ReviewRecordRow {
    let team_lead = record.team_lead_review();
    let admin = record.admin_review();
    ReviewRecordRow {
        id: record.id().into_inner(),
        kind: record.kind().as_str().to_owned(),
        submitter_id: record.submitter_id().into_inner(),
        title: record.title().to_owned(),
        platform: record.platform().to_owned(),
        work_date: record.work_date(),
        hours_worked: record.hours_worked().value().clone(),
        base_rate: record.base_rate().value().clone(),
        current_rate: record.current_rate().value().clone(),
        earnings: record.earnings().value().clone(),
        final_status: record.final_status().as_str().to_owned(),
        team_lead_status: team_lead.map(|review| review.decision.as_str().to_owned()),
        team_lead_reviewer_id: team_lead.map(|review| review.reviewer_id.into_inner()),
        team_lead_reviewed_at: team_lead.map(|review| review.reviewed_at),
        team_lead_rejection_reason: team_lead.and_then(|review| review.reason.clone()),
        admin_status: admin.map(|review| review.decision.as_str().to_owned()),
        admin_reviewer_id: admin.map(|review| review.reviewer_id.into_inner()),
        admin_reviewed_at: admin.map(|review| review.reviewed_at),
        admin_rejection_reason: admin.and_then(|review| review.reason.clone()),
        created_at: record.created_at(),
        updated_at: record.updated_at(),
    }
}

/// Column group describing one review tier.
struct TierColumns {
    tier: &'static str,
    status: Option<String>,
    reviewer_id: Option<uuid::Uuid>,
    reviewed_at: Option<DateTime<Utc>>,
    reason: Option<String>,
}

fn tier_review(columns: TierColumns) -> ReviewRepositoryResult<Option<TierReview>> {
    let TierColumns {
        tier,
        status,
        reviewer_id,
        reviewed_at,
        reason,
    } = columns;
    let Some(persisted_status) = status else {
        return Ok(None);
    };
    let decision =
        Decision::try_from(persisted_status.as_str()).map_err(ReviewRepositoryError::persistence)?;
    let (Some(reviewer), Some(at)) = (reviewer_id, reviewed_at) else {
        return Err(ReviewRepositoryError::persistence(ParseReviewValueError {
            kind: tier,
            value: "decision without reviewer or timestamp".to_owned(),
        }));
    };
    Ok(Some(TierReview {
        decision,
        reviewer_id: UserId::from_uuid(reviewer),
        reviewed_at: at,
        reason,
    }))
}

fn row_to_record(row: ReviewRecordRow) -> ReviewRepositoryResult<ReviewRecord> {
    let ReviewRecordRow {
        id,
        kind: persisted_kind,
        submitter_id,
        title,
        platform,
        work_date,
        hours_worked,
        base_rate,
        current_rate,
        earnings,
        final_status: persisted_final_status,
        team_lead_status,
        team_lead_reviewer_id,
        team_lead_reviewed_at,
        team_lead_rejection_reason,
        admin_status,
        admin_reviewer_id,
        admin_reviewed_at,
        admin_rejection_reason,
        created_at,
        updated_at,
    } = row;

    let kind = RecordKind::try_from(persisted_kind.as_str())
        .map_err(ReviewRepositoryError::persistence)?;
    let final_status = FinalStatus::try_from(persisted_final_status.as_str())
        .map_err(ReviewRepositoryError::persistence)?;
    let team_lead = tier_review(TierColumns {
        tier: "team lead review",
        status: team_lead_status,
        reviewer_id: team_lead_reviewer_id,
        reviewed_at: team_lead_reviewed_at,
        reason: team_lead_rejection_reason,
    })?;
    let admin = tier_review(TierColumns {
        tier: "admin review",
        status: admin_status,
        reviewer_id: admin_reviewer_id,
        reviewed_at: admin_reviewed_at,
        reason: admin_rejection_reason,
    })?;

    let data = PersistedReviewData {
        id: RecordId::from_uuid(id),
        kind,
        submitter_id: UserId::from_uuid(submitter_id),
        title,
        platform,
        work_date,
        hours_worked: Hours::new(hours_worked).map_err(ReviewRepositoryError::persistence)?,
        base_rate: Rate::new(base_rate).map_err(ReviewRepositoryError::persistence)?,
        current_rate: Rate::new(current_rate).map_err(ReviewRepositoryError::persistence)?,
        earnings: Earnings::from_persisted(earnings),
        final_status,
        team_lead,
        admin,
        created_at,
        updated_at,
    };
    ReviewRecord::from_persisted(data).map_err(ReviewRepositoryError::persistence)
}
