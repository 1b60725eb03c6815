//! Statically assembled list of event subscribers.

use std::sync::Arc;

use crate::domain::foundation::EventDescriptor;
use crate::ports::DomainEventSubscriber;

/// Every subscriber of the process, assembled once at startup.
///
/// The same list feeds the in-process bus and the failover deserializer,
/// so an event type routed to a subscriber is always replayable.
#[derive(Clone, Default)]
pub struct DomainEventSubscribers {
    items: Vec<Arc<dyn DomainEventSubscriber>>,
}

impl DomainEventSubscribers {
    pub fn new(items: Vec<Arc<dyn DomainEventSubscriber>>) -> Self {
        Self { items }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<dyn DomainEventSubscriber>> {
        self.items.iter()
    }

    /// All event types declared by any subscriber, deduplicated by name.
    pub fn event_descriptors(&self) -> Vec<EventDescriptor> {
        let mut descriptors: Vec<EventDescriptor> = Vec::new();
        for descriptor in self.items.iter().flat_map(|s| s.subscribed_to()) {
            if !descriptors.contains(&descriptor) {
                descriptors.push(descriptor);
            }
        }
        descriptors
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::fixtures::{OrderCancelled, OrderPlaced};
    use crate::domain::foundation::{DomainError, DomainEvent};
    use async_trait::async_trait;

    struct Listener(Vec<EventDescriptor>);

    #[async_trait]
    impl DomainEventSubscriber for Listener {
        fn subscribed_to(&self) -> Vec<EventDescriptor> {
            self.0.clone()
        }

        async fn on(&self, _: Arc<dyn DomainEvent>) -> Result<(), DomainError> {
            Ok(())
        }

        fn name(&self) -> &'static str {
            "Listener"
        }
    }

    #[test]
    fn descriptors_are_deduplicated_across_subscribers() {
        let subscribers = DomainEventSubscribers::new(vec![
            Arc::new(Listener(vec![EventDescriptor::of::<OrderPlaced>()])),
            Arc::new(Listener(vec![
                EventDescriptor::of::<OrderPlaced>(),
                EventDescriptor::of::<OrderCancelled>(),
            ])),
        ]);

        let names: Vec<_> = subscribers
            .event_descriptors()
            .iter()
            .map(|d| d.name())
            .collect();

        assert_eq!(subscribers.len(), 2);
        assert_eq!(names, vec!["order.placed", "order.cancelled"]);
    }
}
