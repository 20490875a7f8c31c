//! Diesel row models for review record persistence.

use super::schema::review_records;
use bigdecimal::BigDecimal;
use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;

/// Query result row and full-row write model for review records.
#[derive(Debug, Clone, Queryable, Selectable, Insertable, AsChangeset)]
#[diesel(table_name = review_records)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[diesel(treat_none_as_null = true)]
pub struct ReviewRecordRow {
    /// Record identifier.
    pub id: uuid::Uuid,
    /// Record kind.
    pub kind: String,
    /// Submitting user.
    pub submitter_id: uuid::Uuid,
    /// Submission title.
    pub title: String,
    /// Platform.
    pub platform: String,
    /// Work date.
    pub work_date: NaiveDate,
    /// Hours worked.
    pub hours_worked: BigDecimal,
    /// Rate at submission time.
    pub base_rate: BigDecimal,
    /// Current rate.
    pub current_rate: BigDecimal,
    /// Derived earnings.
    pub earnings: BigDecimal,
    /// Final status.
    pub final_status: String,
    /// Team-lead verdict.
    pub team_lead_status: Option<String>,
    /// Team-lead reviewer.
    pub team_lead_reviewer_id: Option<uuid::Uuid>,
    /// Team-lead decision time.
    pub team_lead_reviewed_at: Option<DateTime<Utc>>,
    /// Team-lead reason.
    pub team_lead_rejection_reason: Option<String>,
    /// Override verdict.
    pub admin_status: Option<String>,
    /// Override reviewer.
    pub admin_reviewer_id: Option<uuid::Uuid>,
    /// Override decision time.
    pub admin_reviewed_at: Option<DateTime<Utc>>,
    /// Override reason.
    pub admin_rejection_reason: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}
