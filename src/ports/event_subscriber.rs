//! DomainEventSubscriber port - Interface for reacting to domain events.
//!
//! A subscriber declares the event types it accepts. That single
//! declaration drives both the in-process bus (routing by event name) and
//! the failover deserializer (rebuilding stored events by the same name).

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::foundation::{DomainError, DomainEvent, EventDescriptor};

/// Handler for processing domain events.
///
/// Implementations should be:
/// - **Idempotent** - Replay after a crash may deliver the same event again
/// - **Isolated** - Errors don't affect other subscribers
///
/// # Example
///
/// ```ignore
/// struct SendConfirmationEmail { /* ... */ }
///
/// #[async_trait]
/// impl DomainEventSubscriber for SendConfirmationEmail {
///     fn subscribed_to(&self) -> Vec<EventDescriptor> {
///         vec![EventDescriptor::of::<OrderPlaced>()]
///     }
///
///     async fn on(&self, event: Arc<dyn DomainEvent>) -> Result<(), DomainError> {
///         if let Some(placed) = event.downcast_ref::<OrderPlaced>() {
///             // Send the email...
///         }
///         Ok(())
///     }
///
///     fn name(&self) -> &'static str {
///         "SendConfirmationEmail"
///     }
/// }
/// ```
#[async_trait]
pub trait DomainEventSubscriber: Send + Sync {
    /// Event types this subscriber wants to receive.
    fn subscribed_to(&self) -> Vec<EventDescriptor>;

    /// Process an event.
    async fn on(&self, event: Arc<dyn DomainEvent>) -> Result<(), DomainError>;

    /// Subscriber name for logging.
    fn name(&self) -> &'static str;
}

#[cfg(test)]
mod tests {
    use super::*;

    // Compile-time check that trait is object-safe
    #[allow(dead_code)]
    fn assert_subscriber_object_safe(_: &dyn DomainEventSubscriber) {}
}
