//! FailoverStore port - Durable side-store for serialized domain events.
//!
//! This port backs the failover publisher: a local durability backstop that
//! survives process crashes between "event recorded" and "event handled".
//!
//! ## Guarantees
//!
//! 1. At most one record per `event_id`; writing the same id again replaces
//!    the stored event in place
//! 2. Reads are bounded by the caller-supplied limit and return records in
//!    first-publication order, so `offset` pages past records a reader
//!    chooses to leave in place
//! 3. Reads never remove records; deletion is an explicit acknowledgement

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{DomainError, EventId};

/// A stored event: the dedup key and the serialized event envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FailoverRecord {
    /// Unique event identifier (deduplication key).
    pub event_id: EventId,

    /// Serialized event envelope (see `DomainEventSerializer`).
    pub event: String,
}

impl FailoverRecord {
    pub fn new(event_id: EventId, event: impl Into<String>) -> Self {
        Self {
            event_id,
            event: event.into(),
        }
    }
}

/// Port for the durable failover store.
///
/// All writes are keyed upserts, so concurrent publication of the same event
/// from several callers is safe without external locking.
#[async_trait]
pub trait FailoverStore: Send + Sync {
    /// Insert the record, or replace the one stored under the same `event_id`.
    async fn upsert(&self, record: FailoverRecord) -> Result<(), DomainError>;

    /// Read up to `limit` stored records, skipping the first `offset`.
    async fn find_page(&self, offset: usize, limit: usize) -> Result<Vec<FailoverRecord>, DomainError>;

    /// Read up to `limit` stored records from the start.
    async fn find(&self, limit: usize) -> Result<Vec<FailoverRecord>, DomainError> {
        self.find_page(0, limit).await
    }

    /// Remove a record. Returns `false` when nothing was stored under `event_id`.
    async fn delete(&self, event_id: &EventId) -> Result<bool, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    // Compile-time check that trait is object-safe
    #[allow(dead_code)]
    fn assert_object_safe(_: &dyn FailoverStore) {}

    #[test]
    fn record_serializes_to_wire_shape() {
        let id = EventId::parse("1b4e28ba-2fa1-11d2-883f-0016d3cca427").unwrap();
        let record = FailoverRecord::new(id, "{}");

        assert_eq!(
            serde_json::to_value(&record).unwrap(),
            json!({"eventId": "1b4e28ba-2fa1-11d2-883f-0016d3cca427", "event": "{}"})
        );
    }
}
