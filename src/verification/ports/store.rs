//! Durable verification code store.

use crate::verification::domain::{PhoneNumber, VerificationEntry};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use thiserror::Error;

/// Result type for verification store operations.
pub type VerificationStoreResult<T> = Result<T, VerificationStoreError>;

/// Keyed store of outstanding codes, one per phone number.
///
/// Implementations must survive process restarts and be shared by every
/// instance handling verification traffic.
#[async_trait]
pub trait VerificationCodeStore: Send + Sync {
    /// Stores `entry`, replacing any entry for the same phone number.
    async fn put(&self, entry: &VerificationEntry) -> VerificationStoreResult<()>;

    /// Returns the entry for `phone`; entries expired at `now` read as absent.
    async fn get(
        &self,
        phone: &PhoneNumber,
        now: DateTime<Utc>,
    ) -> VerificationStoreResult<Option<VerificationEntry>>;

    /// Counts a wrong guess and returns the new total, or `None` when no
    /// entry exists.
    async fn record_failure(&self, phone: &PhoneNumber) -> VerificationStoreResult<Option<u32>>;

    /// Removes the entry for `phone`, if any.
    async fn remove(&self, phone: &PhoneNumber) -> VerificationStoreResult<()>;
}

/// Errors returned by verification stores.
#[derive(Debug, Clone, Error)]
pub enum VerificationStoreError {
    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl VerificationStoreError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
