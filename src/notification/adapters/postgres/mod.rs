//! `PostgreSQL` adapter for the notification outbox.

mod models;
mod repository;
mod schema;

pub use repository::{NotificationPgPool, PostgresOutbox};
