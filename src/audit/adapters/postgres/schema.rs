//! Diesel schema for audit persistence.

diesel::table! {
    /// Append-only audit events.
    audit_events (id) {
        /// Event identifier.
        id -> Uuid,
        /// Entity kind.
        #[max_length = 50]
        entity_type -> Varchar,
        /// Entity identifier.
        entity_id -> Uuid,
        /// Recorded action.
        #[max_length = 50]
        action -> Varchar,
        /// Acting user, if any.
        actor_id -> Nullable<Uuid>,
        /// Acting role, if any.
        #[max_length = 50]
        actor_role -> Nullable<Varchar>,
        /// Value before the change.
        previous_value -> Nullable<Jsonb>,
        /// Value after the change.
        new_value -> Nullable<Jsonb>,
        /// Free-text note.
        note -> Nullable<Text>,
        /// Event timestamp.
        occurred_at -> Timestamptz,
    }
}
