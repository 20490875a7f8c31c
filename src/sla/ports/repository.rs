//! Resolution request persistence port.

use crate::sla::domain::{ResolutionRequest, ResolutionRequestId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for resolution request repository operations.
pub type ResolutionRequestRepositoryResult<T> = Result<T, ResolutionRequestRepositoryError>;

/// Resolution request persistence contract.
#[async_trait]
pub trait ResolutionRequestRepository: Send + Sync {
    /// Stores a new request.
    ///
    /// # Errors
    ///
    /// Returns [`ResolutionRequestRepositoryError::DuplicateRequest`] when the
    /// identifier already exists.
    async fn store(&self, request: &ResolutionRequest) -> ResolutionRequestRepositoryResult<()>;

    /// Persists changes to an existing request.
    ///
    /// # Errors
    ///
    /// Returns [`ResolutionRequestRepositoryError::NotFound`] when the request
    /// does not exist.
    async fn update(&self, request: &ResolutionRequest) -> ResolutionRequestRepositoryResult<()>;

    /// Finds a request by identifier.
    async fn find_by_id(
        &self,
        id: ResolutionRequestId,
    ) -> ResolutionRequestRepositoryResult<Option<ResolutionRequest>>;

    /// Returns every open request ordered by due timestamp.
    async fn list_open(&self) -> ResolutionRequestRepositoryResult<Vec<ResolutionRequest>>;
}

/// Errors returned by resolution request repository implementations.
#[derive(Debug, Clone, Error)]
pub enum ResolutionRequestRepositoryError {
    /// A request with the same identifier already exists.
    #[error("duplicate resolution request: {0}")]
    DuplicateRequest(ResolutionRequestId),

    /// The request was not found.
    #[error("resolution request not found: {0}")]
    NotFound(ResolutionRequestId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl ResolutionRequestRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
