//! In-memory resolution request repository.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::sla::{
    domain::{RequestStatus, ResolutionRequest, ResolutionRequestId},
    ports::{
        ResolutionRequestRepository, ResolutionRequestRepositoryError,
        ResolutionRequestRepositoryResult,
    },
};

fn poisoned(err: impl ToString) -> ResolutionRequestRepositoryError {
    ResolutionRequestRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

/// Thread-safe in-memory resolution request repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryResolutionRequestRepository {
    requests: Arc<RwLock<HashMap<ResolutionRequestId, ResolutionRequest>>>,
}

impl InMemoryResolutionRequestRepository {
    /// Creates an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ResolutionRequestRepository for InMemoryResolutionRequestRepository {
    async fn store(&self, request: &ResolutionRequest) -> ResolutionRequestRepositoryResult<()> {
        let mut requests = self.requests.write().map_err(poisoned)?;
        if requests.contains_key(&request.id()) {
            return Err(ResolutionRequestRepositoryError::DuplicateRequest(
                request.id(),
            ));
        }
        requests.insert(request.id(), request.clone());
        Ok(())
    }

    async fn update(&self, request: &ResolutionRequest) -> ResolutionRequestRepositoryResult<()> {
        let mut requests = self.requests.write().map_err(poisoned)?;
        let slot = requests
            .get_mut(&request.id())
            .ok_or(ResolutionRequestRepositoryError::NotFound(request.id()))?;
        *slot = request.clone();
        Ok(())
    }

    async fn find_by_id(
        &self,
        id: ResolutionRequestId,
    ) -> ResolutionRequestRepositoryResult<Option<ResolutionRequest>> {
        let requests = self.requests.read().map_err(poisoned)?;
        Ok(requests.get(&id).cloned())
    }

    async fn list_open(&self) -> ResolutionRequestRepositoryResult<Vec<ResolutionRequest>> {
        let requests = self.requests.read().map_err(poisoned)?;
        let mut open: Vec<ResolutionRequest> = requests
            .values()
            .filter(|request| request.status() == RequestStatus::Open)
            .cloned()
            .collect();
        open.sort_by_key(ResolutionRequest::sla_due);
        Ok(open)
    }
}
