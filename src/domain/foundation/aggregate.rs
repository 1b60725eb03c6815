//! Aggregate root support: the pending domain event buffer.

use serde_json::Value as JsonValue;
use std::sync::Arc;

use super::DomainEvent;

/// Ordered, append-only buffer of events recorded but not yet published.
#[derive(Debug, Default)]
pub struct RecordedEvents {
    pending: Vec<Arc<dyn DomainEvent>>,
}

impl RecordedEvents {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, event: Arc<dyn DomainEvent>) {
        self.pending.push(event);
    }

    /// Returns every pending event and leaves the buffer empty.
    pub fn drain(&mut self) -> Vec<Arc<dyn DomainEvent>> {
        std::mem::take(&mut self.pending)
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

/// An entity that accumulates domain events until they are pulled for publication.
///
/// Implementors only expose their buffer and a primitive projection; recording
/// and draining are provided.
///
/// # Example
///
/// ```ignore
/// let mut order = Order::place(customer_id, lines)?;
/// repository.save(&order).await?;
/// event_bus.publish(order.pull_domain_events()).await?;
/// ```
pub trait AggregateRoot {
    /// Access to the pending event buffer.
    fn recorded_events(&mut self) -> &mut RecordedEvents;

    /// Lossless primitive projection used by persistence adapters.
    fn to_primitives(&self) -> JsonValue;

    /// Appends an event to the pending buffer.
    fn record<E: DomainEvent>(&mut self, event: E)
    where
        Self: Sized,
    {
        self.recorded_events().record(Arc::new(event));
    }

    /// Returns the pending events and clears them, so repeated reads never
    /// publish the same event twice.
    fn pull_domain_events(&mut self) -> Vec<Arc<dyn DomainEvent>> {
        self.recorded_events().drain()
    }
}
