//! Repository port for review record persistence and lookup.

use crate::authority::domain::UserId;
use crate::review::domain::{RecordId, RecordKind, ReviewRecord};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for review repository operations.
pub type ReviewRepositoryResult<T> = Result<T, ReviewRepositoryError>;

/// Review record persistence contract.
///
/// Updates overwrite the stored row; there is no optimistic concurrency
/// check, so the last writer wins.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReviewRepository: Send + Sync {
    /// Stores a new record.
    ///
    /// # Errors
    ///
    /// Returns [`ReviewRepositoryError::DuplicateRecord`] when the identifier
    /// already exists.
    async fn store(&self, record: &ReviewRecord) -> ReviewRepositoryResult<()>;

    /// Persists changes to an existing record.
    ///
    /// # Errors
    ///
    /// Returns [`ReviewRepositoryError::NotFound`] when the record does not
    /// exist.
    async fn update(&self, record: &ReviewRecord) -> ReviewRepositoryResult<()>;

    /// Finds a record by identifier.
    ///
    /// Returns `None` when the record does not exist.
    async fn find_by_id(&self, id: RecordId) -> ReviewRepositoryResult<Option<ReviewRecord>>;

    /// Returns every record submitted by `submitter`, oldest first.
    async fn list_for_submitter(
        &self,
        submitter: UserId,
    ) -> ReviewRepositoryResult<Vec<ReviewRecord>>;

    /// Returns pending records of `kind` whose team-lead review was a
    /// rejection, oldest first.
    async fn list_overridable(&self, kind: RecordKind)
    -> ReviewRepositoryResult<Vec<ReviewRecord>>;
}

/// Errors returned by review repository implementations.
#[derive(Debug, Clone, Error)]
pub enum ReviewRepositoryError {
    /// A record with the same identifier already exists.
    #[error("duplicate review record: {0}")]
    DuplicateRecord(RecordId),

    /// The record was not found.
    #[error("review record not found: {0}")]
    NotFound(RecordId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl ReviewRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
