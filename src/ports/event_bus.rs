//! EventBus port - Interface for publishing domain events.
//!
//! This port defines how aggregates' recorded events leave the application
//! layer without knowing about the underlying delivery mechanism.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::foundation::{DomainError, DomainEvent};

/// Port for publishing domain events.
///
/// Implementations must ensure:
/// - Every subscriber registered for an event's name is invoked for it
/// - `publish` returns once delivery has been scheduled; it does not wait
///   for subscribers to finish
/// - Errors are propagated to the caller
///
/// # Example
///
/// ```ignore
/// let events = order.pull_domain_events();
/// event_bus.publish(events).await?;
/// ```
#[async_trait]
pub trait EventBus: Send + Sync {
    /// Publish a batch of events.
    async fn publish(&self, events: Vec<Arc<dyn DomainEvent>>) -> Result<(), DomainError>;
}
