//! Canonical JSON envelope for domain events.
//!
//! The failover store keeps events in this shape, and the deserializer
//! reads it back:
//!
//! ```json
//! {"data": {"id": "...", "type": "order.placed", "occurredOn": "...",
//!           "aggregateId": "...", "attributes": "{...}"}}
//! ```
//!
//! Every field is a string; `attributes` holds the JSON-encoded attribute
//! object. Readers also accept `attributes` as an inline object.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value as JsonValue;

use crate::domain::foundation::{DomainError, DomainEvent};

/// Fields of a serialized event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SerializedDomainEvent {
    pub id: String,
    #[serde(rename = "type")]
    pub event_type: String,
    pub occurred_on: String,
    pub aggregate_id: String,
    /// JSON-encoded attributes.
    #[serde(deserialize_with = "attributes_as_text")]
    pub attributes: String,
}

impl SerializedDomainEvent {
    /// Decodes `attributes` back into a JSON value.
    pub fn attributes_value(&self) -> Result<JsonValue, DomainError> {
        Ok(serde_json::from_str(&self.attributes)?)
    }
}

fn attributes_as_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match JsonValue::deserialize(deserializer)? {
        JsonValue::String(text) => Ok(text),
        inline => Ok(inline.to_string()),
    }
}

/// Outer wrapper of the envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DomainEventEnvelope {
    pub data: SerializedDomainEvent,
}

/// Serializes events into the canonical envelope.
pub struct DomainEventSerializer;

impl DomainEventSerializer {
    /// Builds the envelope structure for `event`.
    pub fn envelope(event: &dyn DomainEvent) -> Result<DomainEventEnvelope, DomainError> {
        Ok(DomainEventEnvelope {
            data: SerializedDomainEvent {
                id: event.event_id().to_string(),
                event_type: event.event_name().to_string(),
                occurred_on: event.occurred_on().to_iso_string(),
                aggregate_id: event.aggregate_id().to_string(),
                attributes: serde_json::to_string(&event.to_primitives()?)?,
            },
        })
    }

    /// Serializes `event` to its envelope string.
    pub fn serialize(event: &dyn DomainEvent) -> Result<String, DomainError> {
        Ok(serde_json::to_string(&Self::envelope(event)?)?)
    }
}
