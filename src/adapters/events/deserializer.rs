//! Rebuilds typed events from their serialized envelope.

use std::collections::HashMap;
use std::sync::Arc;

use super::serializer::DomainEventEnvelope;
use super::subscribers::DomainEventSubscribers;
use crate::domain::foundation::{
    DomainError, DomainEvent, DomainEventPrimitives, ErrorCode, EventDescriptor, EventId, Timestamp,
};

/// Maps stable event names to their reconstruction functions.
#[derive(Debug, Default)]
pub struct DomainEventDeserializer {
    mapping: HashMap<&'static str, EventDescriptor>,
}

impl DomainEventDeserializer {
    /// Builds the mapping from every event type the subscribers declare.
    pub fn configure(subscribers: &DomainEventSubscribers) -> Self {
        let mut deserializer = Self::default();
        for descriptor in subscribers.event_descriptors() {
            deserializer.register(descriptor);
        }
        deserializer
    }

    pub fn register(&mut self, descriptor: EventDescriptor) {
        self.mapping.insert(descriptor.name(), descriptor);
    }

    pub fn contains(&self, event_name: &str) -> bool {
        self.mapping.contains_key(event_name)
    }

    pub fn len(&self) -> usize {
        self.mapping.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mapping.is_empty()
    }

    /// Parses `raw` and reconstructs the event it describes.
    ///
    /// An unknown `type` is a hard failure; skipping is the caller's call.
    pub fn deserialize(&self, raw: &str) -> Result<Arc<dyn DomainEvent>, DomainError> {
        let envelope: DomainEventEnvelope = serde_json::from_str(raw)?;
        let data = envelope.data;

        let descriptor = self.mapping.get(data.event_type.as_str()).ok_or_else(|| {
            DomainError::for_type(
                ErrorCode::EventMappingNotFound,
                &data.event_type,
                format!("DomainEvent mapping not found for event: {}", data.event_type),
            )
        })?;

        let attributes = data.attributes_value()?;
        descriptor.reconstruct(DomainEventPrimitives {
            event_id: EventId::parse(&data.id)?,
            aggregate_id: data.aggregate_id,
            occurred_on: Timestamp::parse(&data.occurred_on)?,
            attributes,
        })
    }
}
