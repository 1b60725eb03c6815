//! Failover publisher - durable, idempotent side-channel for domain events.
//!
//! Events are serialized and upserted into a [`FailoverStore`] keyed by
//! event id, so they survive a crash between "recorded" and "handled".
//! They are later read back in bounded batches and rebuilt through the
//! [`DomainEventDeserializer`].
//!
//! ## Configuration
//!
//! | Setting | Default | Description |
//! |---------|---------|-------------|
//! | `batch_size` | 200 | Max records read per `consume` call |
//! | `on_deserialize_error` | `Skip` | What `consume` does with unreadable records |
//!
//! Reading never removes records; [`DomainEventFailoverPublisher::acknowledge`]
//! does. Skipped records stay stored, so readers that drain the store page
//! past them with [`DomainEventFailoverPublisher::consume_page`].

use once_cell::sync::OnceCell;
use std::sync::Arc;

use super::deserializer::DomainEventDeserializer;
use super::serializer::DomainEventSerializer;
use crate::config::{FailoverConfig, ReplayFailurePolicy, DEFAULT_FAILOVER_BATCH_SIZE};
use crate::domain::foundation::{DomainError, DomainEvent, ErrorCode, EventId};
use crate::ports::{FailoverRecord, FailoverStore};

/// Configuration for the failover publisher.
#[derive(Debug, Clone)]
pub struct FailoverPublisherConfig {
    pub batch_size: usize,
    pub on_deserialize_error: ReplayFailurePolicy,
}

impl Default for FailoverPublisherConfig {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_FAILOVER_BATCH_SIZE,
            on_deserialize_error: ReplayFailurePolicy::default(),
        }
    }
}

impl From<&FailoverConfig> for FailoverPublisherConfig {
    fn from(config: &FailoverConfig) -> Self {
        Self {
            batch_size: config.batch_size,
            on_deserialize_error: config.replay_policy,
        }
    }
}

impl FailoverPublisherConfig {
    pub fn with_batch_size(mut self, size: usize) -> Self {
        self.batch_size = size;
        self
    }

    pub fn with_policy(mut self, policy: ReplayFailurePolicy) -> Self {
        self.on_deserialize_error = policy;
        self
    }
}

/// One page read back from the failover store.
#[derive(Default)]
pub struct ConsumedBatch {
    /// Events rebuilt from the page, in store order.
    pub events: Vec<Arc<dyn DomainEvent>>,
    /// Records left in place because they could not be deserialized.
    pub skipped: Vec<EventId>,
    /// Records read from the store, rebuilt or not.
    pub read: usize,
}

/// Durable publisher backed by a [`FailoverStore`].
///
/// The deserializer is attached once, after the subscriber list is known.
/// Attaching a second one is a configuration fault.
pub struct DomainEventFailoverPublisher {
    store: Arc<dyn FailoverStore>,
    deserializer: OnceCell<Arc<DomainEventDeserializer>>,
    config: FailoverPublisherConfig,
}

impl DomainEventFailoverPublisher {
    /// Create a publisher with default configuration.
    pub fn new(store: Arc<dyn FailoverStore>) -> Self {
        Self::with_config(store, FailoverPublisherConfig::default())
    }

    /// Create a publisher with custom configuration.
    pub fn with_config(store: Arc<dyn FailoverStore>, config: FailoverPublisherConfig) -> Self {
        Self {
            store,
            deserializer: OnceCell::new(),
            config,
        }
    }

    pub fn config(&self) -> &FailoverPublisherConfig {
        &self.config
    }

    /// Attaches the deserializer used by `consume`.
    pub fn set_deserializer(&self, deserializer: Arc<DomainEventDeserializer>) -> Result<(), DomainError> {
        self.deserializer.set(deserializer).map_err(|_| {
            DomainError::new(
                ErrorCode::DeserializerAlreadySet,
                "A deserializer has already been set for the failover publisher",
            )
        })
    }

    /// Serializes `event` and upserts it under its event id.
    pub async fn publish(&self, event: &dyn DomainEvent) -> Result<(), DomainError> {
        let serialized = DomainEventSerializer::serialize(event)?;
        self.store
            .upsert(FailoverRecord::new(event.event_id(), serialized))
            .await?;

        tracing::debug!(
            event_id = %event.event_id(),
            event_type = event.event_name(),
            "Stored event in failover store"
        );
        Ok(())
    }

    /// Reads up to `batch_size` stored events and rebuilds them.
    ///
    /// Records are left in the store.
    pub async fn consume(&self) -> Result<Vec<Arc<dyn DomainEvent>>, DomainError> {
        Ok(self.consume_page(0).await?.events)
    }

    /// Reads up to `batch_size` stored events after the first `offset` and
    /// rebuilds them, reporting which records were skipped.
    pub async fn consume_page(&self, offset: usize) -> Result<ConsumedBatch, DomainError> {
        let deserializer = self.deserializer.get().ok_or_else(|| {
            DomainError::new(ErrorCode::DeserializerNotSet, "Deserializer has not been set yet")
        })?;

        let records = self.store.find_page(offset, self.config.batch_size).await?;
        let mut batch = ConsumedBatch {
            events: Vec::with_capacity(records.len()),
            skipped: Vec::new(),
            read: records.len(),
        };

        for record in records {
            match deserializer.deserialize(&record.event) {
                Ok(event) => batch.events.push(event),
                Err(e) => match self.config.on_deserialize_error {
                    ReplayFailurePolicy::Skip => {
                        tracing::warn!(
                            event_id = %record.event_id,
                            error = %e,
                            "Skipping failover record that could not be deserialized"
                        );
                        batch.skipped.push(record.event_id);
                    }
                    ReplayFailurePolicy::Fail => {
                        return Err(e.with_detail("event_id", record.event_id.to_string()));
                    }
                },
            }
        }

        Ok(batch)
    }

    /// Removes a stored record. Returns `false` if nothing was stored.
    pub async fn acknowledge(&self, event_id: &EventId) -> Result<bool, DomainError> {
        self.store.delete(event_id).await
    }
}
