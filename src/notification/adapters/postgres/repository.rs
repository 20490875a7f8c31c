//! `PostgreSQL` outbox implementation.

use super::{models::OutboxRow, schema::notification_outbox};
use crate::notification::{
    domain::{
        DeliveryStatus, NotificationPayload, OutboxMessage, OutboxMessageId, PersistedOutboxData,
    },
    ports::{NotificationOutbox, NotificationStoreError, NotificationStoreResult},
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL` connection pool type used by the outbox adapter.
pub type NotificationPgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL`-backed notification outbox.
#[derive(Debug, Clone)]
pub struct PostgresOutbox {
    pool: NotificationPgPool,
}

impl PostgresOutbox {
    /// Creates a new outbox from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: NotificationPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> NotificationStoreResult<T>
    where
        F: FnOnce(&mut PgConnection) -> NotificationStoreResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(NotificationStoreError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(NotificationStoreError::persistence)?
    }
}

#[async_trait]
impl NotificationOutbox for PostgresOutbox {
    async fn enqueue(&self, message: &OutboxMessage) -> NotificationStoreResult<()> {
        let message_id = message.id().into_inner();
        let row = to_row(message)?;
        self.run_blocking(move |connection| {
            diesel::insert_into(notification_outbox::table)
                .values(&row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        NotificationStoreError::Duplicate(message_id)
                    }
                    _ => NotificationStoreError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn due(
        &self,
        now: DateTime<Utc>,
        limit: usize,
    ) -> NotificationStoreResult<Vec<OutboxMessage>> {
        let row_limit = i64::try_from(limit).map_err(NotificationStoreError::persistence)?;
        self.run_blocking(move |connection| {
            let rows = notification_outbox::table
                .filter(notification_outbox::status.eq(DeliveryStatus::Pending.as_str()))
                .filter(notification_outbox::available_at.le(now))
                .order(notification_outbox::available_at.asc())
                .limit(row_limit)
                .select(OutboxRow::as_select())
                .load::<OutboxRow>(connection)
                .map_err(NotificationStoreError::persistence)?;
            rows.into_iter().map(row_to_message).collect()
        })
        .await
    }

    async fn update(&self, message: &OutboxMessage) -> NotificationStoreResult<()> {
        let message_id = message.id().into_inner();
        let row = to_row(message)?;
        self.run_blocking(move |connection| {
            let updated = diesel::update(notification_outbox::table.find(message_id))
                .set(&row)
                .execute(connection)
                .map_err(NotificationStoreError::persistence)?;
            if updated == 0 {
                return Err(NotificationStoreError::NotFound(message_id));
            }
            Ok(())
        })
        .await
    }

    async fn find_by_id(
        &self,
        id: OutboxMessageId,
    ) -> NotificationStoreResult<Option<OutboxMessage>> {
        self.run_blocking(move |connection| {
            let row = notification_outbox::table
                .find(id.into_inner())
                .select(OutboxRow::as_select())
                .first::<OutboxRow>(connection)
                .optional()
                .map_err(NotificationStoreError::persistence)?;
            row.map(row_to_message).transpose()
        })
        .await
    }
}

fn to_row(message: &OutboxMessage) -> NotificationStoreResult<OutboxRow> {
    let payload =
        serde_json::to_value(message.payload()).map_err(NotificationStoreError::persistence)?;
    let attempts =
        i32::try_from(message.attempts()).map_err(NotificationStoreError::persistence)?;
    Ok(OutboxRow {
        id: message.id().into_inner(),
        kind: message.payload().kind().to_owned(),
        payload,
        status: message.status().as_str().to_owned(),
        attempts,
        last_error: message.last_error().map(str::to_owned),
        available_at: message.available_at(),
        created_at: message.created_at(),
        updated_at: message.updated_at(),
    })
}

fn row_to_message(row: OutboxRow) -> NotificationStoreResult<OutboxMessage> {
    let OutboxRow {
        id,
        payload: persisted_payload,
        status: persisted_status,
        attempts: persisted_attempts,
        last_error,
        available_at,
        created_at,
        updated_at,
        ..
    } = row;

    let payload = serde_json::from_value::<NotificationPayload>(persisted_payload)
        .map_err(NotificationStoreError::persistence)?;
    let status = DeliveryStatus::try_from(persisted_status.as_str())
        .map_err(NotificationStoreError::persistence)?;
    let attempts =
        u32::try_from(persisted_attempts).map_err(NotificationStoreError::persistence)?;

    Ok(OutboxMessage::from_persisted(PersistedOutboxData {
        id: OutboxMessageId::from_uuid(id),
        payload,
        status,
        attempts,
        last_error,
        available_at,
        created_at,
        updated_at,
    }))
}
