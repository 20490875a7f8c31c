//! Diesel schema for review record persistence.

diesel::table! {
    /// Task and work-report records with their review tiers.
    review_records (id) {
        /// Record identifier.
        id -> Uuid,
        /// `task` or `work_report`.
        #[max_length = 20]
        kind -> Varchar,
        /// Submitting user.
        submitter_id -> Uuid,
        /// Submission title.
        title -> Text,
        /// Platform the work was done on.
        #[max_length = 255]
        platform -> Varchar,
        /// Day the work was done.
        work_date -> Date,
        /// Hours worked.
        hours_worked -> Numeric,
        /// Rate at submission time.
        base_rate -> Numeric,
        /// Current rate.
        current_rate -> Numeric,
        /// Derived earnings.
        earnings -> Numeric,
        /// Authoritative outcome.
        #[max_length = 20]
        final_status -> Varchar,
        /// Team-lead verdict.
        #[max_length = 20]
        team_lead_status -> Nullable<Varchar>,
        /// Team lead who decided.
        team_lead_reviewer_id -> Nullable<Uuid>,
        /// When the team lead decided.
        team_lead_reviewed_at -> Nullable<Timestamptz>,
        /// Team-lead reason.
        team_lead_rejection_reason -> Nullable<Text>,
        /// Override verdict.
        #[max_length = 20]
        admin_status -> Nullable<Varchar>,
        /// Admin or overseer who overrode.
        admin_reviewer_id -> Nullable<Uuid>,
        /// When the override happened.
        admin_reviewed_at -> Nullable<Timestamptz>,
        /// Override justification.
        admin_rejection_reason -> Nullable<Text>,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}
