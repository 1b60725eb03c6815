//! Event bus adapters.
//!
//! - `InMemoryAsyncEventBus` - In-process bus, one spawned task per subscriber
//! - `DomainEventSerializer` / `DomainEventDeserializer` - Canonical event envelope
//! - `DomainEventFailoverPublisher` - Durable, idempotent side-store for events
//! - `FailoverReplayer` - Background service republishing stored events
//! - `FailoverEventBus` - Decorator storing events before in-process delivery

mod deserializer;
mod durable_bus;
mod failover_publisher;
mod failover_replayer;
mod in_memory;
mod in_memory_failover_store;
mod serializer;
mod subscribers;

pub use deserializer::DomainEventDeserializer;
pub use durable_bus::FailoverEventBus;
pub use crate::config::{ReplayFailurePolicy, DEFAULT_FAILOVER_BATCH_SIZE};
pub use failover_publisher::{ConsumedBatch, DomainEventFailoverPublisher, FailoverPublisherConfig};
pub use failover_replayer::{FailoverReplayer, FailoverReplayerConfig};
pub use in_memory::InMemoryAsyncEventBus;
pub use in_memory_failover_store::InMemoryFailoverStore;
pub use serializer::{DomainEventEnvelope, DomainEventSerializer, SerializedDomainEvent};
pub use subscribers::DomainEventSubscribers;
