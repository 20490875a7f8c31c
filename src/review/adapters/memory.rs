//! In-memory repository for review workflow tests.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::authority::domain::UserId;
use crate::review::{
    domain::{RecordId, RecordKind, ReviewRecord},
    ports::{ReviewRepository, ReviewRepositoryError, ReviewRepositoryResult},
};

/// Thread-safe in-memory review repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryReviewRepository {
    records: Arc<RwLock<HashMap<RecordId, ReviewRecord>>>,
}

impl InMemoryReviewRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn select(
        &self,
        predicate: impl Fn(&ReviewRecord) -> bool,
    ) -> ReviewRepositoryResult<Vec<ReviewRecord>> {
        let records = self.records.read().map_err(|err| {
            ReviewRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        let mut selected: Vec<ReviewRecord> = records
            .values()
            .filter(|record| predicate(record))
            .cloned()
            .collect();
        selected.sort_by_key(ReviewRecord::created_at);
        Ok(selected)
    }
}

#[async_trait]
impl ReviewRepository for InMemoryReviewRepository {
    async fn store(&self, record: &ReviewRecord) -> ReviewRepositoryResult<()> {
        let mut records = self.records.write().map_err(|err| {
            ReviewRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        if records.contains_key(&record.id()) {
            return Err(ReviewRepositoryError::DuplicateRecord(record.id()));
        }
        records.insert(record.id(), record.clone());
        Ok(())
    }

    async fn update(&self, record: &ReviewRecord) -> ReviewRepositoryResult<()> {
        let mut records = self.records.write().map_err(|err| {
            ReviewRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        let slot = records
            .get_mut(&record.id())
            .ok_or(ReviewRepositoryError::NotFound(record.id()))?;
        *slot = record.clone();
        Ok(())
    }

    async fn find_by_id(&self, id: RecordId) -> ReviewRepositoryResult<Option<ReviewRecord>> {
        let records = self.records.read().map_err(|err| {
            ReviewRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(records.get(&id).cloned())
    }

    async fn list_for_submitter(
        &self,
        submitter: UserId,
    ) -> ReviewRepositoryResult<Vec<ReviewRecord>> {
        self.select(|record| record.submitter_id() == submitter)
    }

    async fn list_overridable(
        &self,
        kind: RecordKind,
    ) -> ReviewRepositoryResult<Vec<ReviewRecord>> {
        self.select(|record| record.kind() == kind && record.is_overridable())
    }
}
