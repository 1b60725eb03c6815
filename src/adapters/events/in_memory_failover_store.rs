//! In-memory failover store for tests and single-process setups.

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, EventId};
use crate::ports::{FailoverRecord, FailoverStore};

/// Failover store backed by an insertion-ordered vector.
///
/// Replacing a record keeps its original position, so `find` returns
/// records in first-publication order.
#[derive(Default)]
pub struct InMemoryFailoverStore {
    records: RwLock<Vec<FailoverRecord>>,
}

impl InMemoryFailoverStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records.
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }

    /// Returns the record stored under `event_id`, if any.
    pub async fn get(&self, event_id: &EventId) -> Option<FailoverRecord> {
        self.records
            .read()
            .await
            .iter()
            .find(|r| &r.event_id == event_id)
            .cloned()
    }
}

#[async_trait]
impl FailoverStore for InMemoryFailoverStore {
    async fn upsert(&self, record: FailoverRecord) -> Result<(), DomainError> {
        let mut records = self.records.write().await;
        match records.iter_mut().find(|r| r.event_id == record.event_id) {
            Some(existing) => *existing = record,
            None => records.push(record),
        }
        Ok(())
    }

    async fn find_page(&self, offset: usize, limit: usize) -> Result<Vec<FailoverRecord>, DomainError> {
        Ok(self
            .records
            .read()
            .await
            .iter()
            .skip(offset)
            .take(limit)
            .cloned()
            .collect())
    }

    async fn delete(&self, event_id: &EventId) -> Result<bool, DomainError> {
        let mut records = self.records.write().await;
        let before = records.len();
        records.retain(|r| &r.event_id != event_id);
        Ok(records.len() != before)
    }
}
