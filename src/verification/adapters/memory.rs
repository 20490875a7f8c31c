//! In-memory verification adapters for tests and local runs.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, RwLock};

use crate::verification::{
    domain::{PhoneNumber, VerificationEntry},
    ports::{
        SmsError, SmsGateway, VerificationCodeStore, VerificationStoreError,
        VerificationStoreResult,
    },
};

fn poisoned(err: impl ToString) -> VerificationStoreError {
    VerificationStoreError::persistence(std::io::Error::other(err.to_string()))
}

/// Thread-safe in-memory code store.
#[derive(Debug, Clone, Default)]
pub struct InMemoryVerificationStore {
    entries: Arc<RwLock<HashMap<PhoneNumber, VerificationEntry>>>,
}

impl InMemoryVerificationStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl VerificationCodeStore for InMemoryVerificationStore {
    async fn put(&self, entry: &VerificationEntry) -> VerificationStoreResult<()> {
        let mut entries = self.entries.write().map_err(poisoned)?;
        entries.insert(entry.phone().clone(), entry.clone());
        Ok(())
    }

    async fn get(
        &self,
        phone: &PhoneNumber,
        now: DateTime<Utc>,
    ) -> VerificationStoreResult<Option<VerificationEntry>> {
        let entries = self.entries.read().map_err(poisoned)?;
        Ok(entries
            .get(phone)
            .filter(|entry| !entry.is_expired_at(now))
            .cloned())
    }

    async fn record_failure(&self, phone: &PhoneNumber) -> VerificationStoreResult<Option<u32>> {
        let mut entries = self.entries.write().map_err(poisoned)?;
        Ok(entries.get_mut(phone).map(VerificationEntry::record_failure))
    }

    async fn remove(&self, phone: &PhoneNumber) -> VerificationStoreResult<()> {
        let mut entries = self.entries.write().map_err(poisoned)?;
        entries.remove(phone);
        Ok(())
    }
}

/// SMS gateway that records messages instead of sending them.
#[derive(Debug, Clone, Default)]
pub struct RecordingSmsGateway {
    sent: Arc<Mutex<Vec<(PhoneNumber, String)>>>,
}

impl RecordingSmsGateway {
    /// Creates an empty gateway.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the messages sent so far.
    #[must_use]
    pub fn sent(&self) -> Vec<(PhoneNumber, String)> {
        self.sent
            .lock()
            .map(|sent| sent.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl SmsGateway for RecordingSmsGateway {
    async fn send(&self, phone: &PhoneNumber, body: &str) -> Result<(), SmsError> {
        let mut sent = self
            .sent
            .lock()
            .map_err(|err| SmsError::transport(std::io::Error::other(err.to_string())))?;
        sent.push((phone.clone(), body.to_owned()));
        Ok(())
    }
}
