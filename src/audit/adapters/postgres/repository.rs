//! `PostgreSQL` audit log implementation.

use super::{
    models::{AuditEventRow, NewAuditEventRow},
    schema::audit_events,
};
use crate::audit::{
    domain::{
        AuditAction, AuditEvent, AuditEventId, EntityRef, EntityType, PersistedAuditEventData,
    },
    ports::{AuditLog, AuditLogError, AuditLogResult},
};
use crate::authority::domain::{Role, UserId};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL` connection pool type used by the audit adapter.
pub type AuditPgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL`-backed audit log.
#[derive(Debug, Clone)]
pub struct PostgresAuditLog {
    pool: AuditPgPool,
}

impl PostgresAuditLog {
    /// Creates a new audit log from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: AuditPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> AuditLogResult<T>
    where
        F: FnOnce(&mut PgConnection) -> AuditLogResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(AuditLogError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(AuditLogError::persistence)?
    }
}

#[async_trait]
impl AuditLog for PostgresAuditLog {
    async fn append(&self, event: &AuditEvent) -> AuditLogResult<()> {
        let event_id = event.id();
        let new_row = to_new_row(event);
        self.run_blocking(move |connection| {
            diesel::insert_into(audit_events::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        AuditLogError::DuplicateEvent(event_id)
                    }
                    _ => AuditLogError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn list_for_entity(&self, entity: EntityRef) -> AuditLogResult<Vec<AuditEvent>> {
        self.run_blocking(move |connection| {
            let rows = audit_events::table
                .filter(audit_events::entity_type.eq(entity.entity_type.as_str()))
                .filter(audit_events::entity_id.eq(entity.entity_id))
                .order((audit_events::occurred_at.asc(), audit_events::id.asc()))
                .select(AuditEventRow::as_select())
                .load::<AuditEventRow>(connection)
                .map_err(AuditLogError::persistence)?;
            rows.into_iter().map(row_to_event).collect()
        })
        .await
    }
}

fn to_new_row(event: &AuditEvent) -> NewAuditEventRow {
    let entity = event.entity();
    NewAuditEventRow {
        id: event.id().into_inner(),
        entity_type: entity.entity_type.as_str().to_owned(),
        entity_id: entity.entity_id,
        action: event.action().as_str().to_owned(),
        actor_id: event.actor_id().map(UserId::into_inner),
        actor_role: event.actor_role().map(|role| role.as_str().to_owned()),
        previous_value: event.previous_value().cloned(),
        new_value: event.new_value().cloned(),
        note: event.note().map(str::to_owned),
        occurred_at: event.occurred_at(),
    }
}

fn row_to_event(row: AuditEventRow) -> AuditLogResult<AuditEvent> {
    let AuditEventRow {
        id,
        entity_type: persisted_entity_type,
        entity_id,
        action: persisted_action,
        actor_id,
        actor_role: persisted_actor_role,
        previous_value,
        new_value,
        note,
        occurred_at,
    } = row;

    let entity_type = EntityType::try_from(persisted_entity_type.as_str())
        .map_err(AuditLogError::persistence)?;
    let action =
        AuditAction::try_from(persisted_action.as_str()).map_err(AuditLogError::persistence)?;
    let actor_role = persisted_actor_role
        .as_deref()
        .map(Role::try_from)
        .transpose()
        .map_err(AuditLogError::persistence)?;

    Ok(AuditEvent::from_persisted(PersistedAuditEventData {
        id: AuditEventId::from_uuid(id),
        entity: EntityRef::new(entity_type, entity_id),
        action,
        actor_id: actor_id.map(UserId::from_uuid),
        actor_role,
        previous_value,
        new_value,
        note,
        occurred_at,
    }))
}
