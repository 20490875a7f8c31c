//! Shared helpers for `PostgreSQL` adapter tests.

#![expect(
    clippy::print_stderr,
    reason = "Test cleanup warnings are informational"
)]

use chrono::{DateTime, Duration, Local, TimeZone, Utc};
use diesel::connection::SimpleConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use mockable::Clock;
use pg_embedded_setup_unpriv::TestCluster;
use std::sync::{Arc, Mutex, PoisonError};
use tokio::runtime::Runtime;

/// Creates the `review_records` table.
pub const CREATE_REVIEW_RECORDS_SQL: &str =
    include_str!("../../migrations/2024-03-01-000001_create_review_records/up.sql");

/// Creates the `audit_events` table.
pub const CREATE_AUDIT_EVENTS_SQL: &str =
    include_str!("../../migrations/2024-03-01-000002_create_audit_events/up.sql");

/// Creates the `notification_outbox` table.
pub const CREATE_NOTIFICATION_OUTBOX_SQL: &str =
    include_str!("../../migrations/2024-03-01-000003_create_notification_outbox/up.sql");

/// Template database name for the pre-migrated schema.
pub const TEMPLATE_DB: &str = "workforce_test_template";

/// Pool type shared by every adapter under test.
pub type TestPool = Pool<ConnectionManager<PgConnection>>;

/// Creates a runtime for driving the async adapters from sync tests.
///
/// # Errors
///
/// Returns an error when the runtime cannot be built.
pub fn test_runtime() -> eyre::Result<Runtime> {
    Ok(tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?)
}

/// Ensures the template database exists with every migration applied.
///
/// # Errors
///
/// Returns an error if template creation or migration fails.
pub fn ensure_template(cluster: &TestCluster) -> eyre::Result<()> {
    cluster
        .ensure_template_exists(TEMPLATE_DB, |db_name| {
            let url = cluster.connection().database_url(db_name);
            let mut conn = PgConnection::establish(&url).map_err(|e| eyre::eyre!("{e}"))?;
            conn.batch_execute(CREATE_REVIEW_RECORDS_SQL)
                .map_err(|e| eyre::eyre!("{e}"))?;
            conn.batch_execute(CREATE_AUDIT_EVENTS_SQL)
                .map_err(|e| eyre::eyre!("{e}"))?;
            conn.batch_execute(CREATE_NOTIFICATION_OUTBOX_SQL)
                .map_err(|e| eyre::eyre!("{e}"))?;
            Ok(())
        })
        .map_err(|e| eyre::eyre!("template setup failed: {e}"))
}

/// A database cloned from the template, dropped when this value is.
pub struct TestDatabase<'a> {
    cluster: &'a TestCluster,
    name: String,
    url: String,
}

impl<'a> TestDatabase<'a> {
    /// Creates a fresh database named after `prefix`.
    ///
    /// # Errors
    ///
    /// Returns an error if the template or the database cannot be created.
    pub fn create(cluster: &'a TestCluster, prefix: &str) -> eyre::Result<Self> {
        ensure_template(cluster)?;
        let name = format!("{prefix}_{}", uuid::Uuid::new_v4().simple());
        cluster
            .create_database_from_template(name.as_str(), TEMPLATE_DB)
            .map_err(|e| eyre::eyre!("create database {name}: {e}"))?;
        let url = cluster.connection().database_url(&name);
        Ok(Self { cluster, name, url })
    }

    /// Builds a single-connection pool for deterministic behaviour.
    ///
    /// # Errors
    ///
    /// Returns an error if the pool cannot connect.
    pub fn pool(&self) -> eyre::Result<TestPool> {
        let manager = ConnectionManager::<PgConnection>::new(self.url.as_str());
        Ok(Pool::builder().max_size(1).build(manager)?)
    }

    /// Opens a direct connection for raw SQL checks.
    ///
    /// # Errors
    ///
    /// Returns an error if the connection fails.
    pub fn connect(&self) -> eyre::Result<PgConnection> {
        Ok(PgConnection::establish(&self.url)?)
    }
}

impl Drop for TestDatabase<'_> {
    fn drop(&mut self) {
        if let Err(e) = self.cluster.drop_database(self.name.as_str()) {
            eprintln!("Warning: failed to drop test database {}: {e}", self.name);
        }
    }
}

/// Clock pinned to a whole second, so timestamps survive the microsecond
/// precision of `TIMESTAMPTZ` unchanged.
#[derive(Debug, Clone)]
pub struct PinnedClock {
    now: Arc<Mutex<DateTime<Utc>>>,
}

impl PinnedClock {
    /// Creates a clock pinned to 2024-03-04T08:00:00Z.
    #[must_use]
    pub fn new() -> Self {
        let start = Utc
            .with_ymd_and_hms(2024, 3, 4, 8, 0, 0)
            .single()
            .unwrap_or_else(Utc::now);
        Self {
            now: Arc::new(Mutex::new(start)),
        }
    }

    /// Moves the clock forward.
    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock().unwrap_or_else(PoisonError::into_inner);
        *now += by;
    }
}

impl Default for PinnedClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for PinnedClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
