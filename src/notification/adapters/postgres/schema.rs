//! Diesel schema for the notification outbox.

diesel::table! {
    /// Outbound notifications awaiting or done with delivery.
    notification_outbox (id) {
        /// Message identifier.
        id -> Uuid,
        /// Payload kind.
        #[max_length = 50]
        kind -> Varchar,
        /// Serialized payload.
        payload -> Jsonb,
        /// Delivery status.
        #[max_length = 20]
        status -> Varchar,
        /// Failed attempts so far.
        attempts -> Int4,
        /// Most recent delivery error.
        last_error -> Nullable<Text>,
        /// Earliest next attempt.
        available_at -> Timestamptz,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}
