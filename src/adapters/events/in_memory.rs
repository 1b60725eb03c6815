//! In-process event bus that fans events out to subscriber tasks.
//!
//! Every subscriber registered for an event's name gets its own spawned
//! task. `publish` returns once all tasks are spawned; it never waits for
//! subscribers to finish, and a failing subscriber does not affect others.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;

use super::subscribers::DomainEventSubscribers;
use crate::domain::foundation::{DomainError, DomainEvent};
use crate::ports::{DomainEventSubscriber, EventBus};

/// Asynchronous in-process event bus.
///
/// Routing is by event name, so the name an event type declares is
/// load-bearing. Subscribers are added before the bus is shared; after
/// that the routing table is read-only.
///
/// # Example
///
/// ```ignore
/// let mut bus = InMemoryAsyncEventBus::new();
/// bus.add_subscribers(&subscribers);
/// let bus: Arc<dyn EventBus> = Arc::new(bus);
///
/// bus.publish(order.pull_domain_events()).await?;
/// ```
#[derive(Default)]
pub struct InMemoryAsyncEventBus {
    subscriptions: HashMap<&'static str, Vec<Arc<dyn DomainEventSubscriber>>>,
}

impl InMemoryAsyncEventBus {
    /// Creates a bus with no subscribers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a bus routing to the given subscribers.
    pub fn with_subscribers(subscribers: &DomainEventSubscribers) -> Self {
        let mut bus = Self::new();
        bus.add_subscribers(subscribers);
        bus
    }

    /// Registers each subscriber under every event name it declares.
    pub fn add_subscribers(&mut self, subscribers: &DomainEventSubscribers) {
        for subscriber in subscribers.iter() {
            for descriptor in subscriber.subscribed_to() {
                self.subscriptions
                    .entry(descriptor.name())
                    .or_default()
                    .push(Arc::clone(subscriber));
            }
        }
    }

    /// Number of subscribers routed for `event_name`.
    pub fn subscriber_count(&self, event_name: &str) -> usize {
        self.subscriptions.get(event_name).map_or(0, Vec::len)
    }
}

#[async_trait]
impl EventBus for InMemoryAsyncEventBus {
    async fn publish(&self, events: Vec<Arc<dyn DomainEvent>>) -> Result<(), DomainError> {
        for event in events {
            let Some(subscribers) = self.subscriptions.get(event.event_name()) else {
                tracing::debug!(event_type = event.event_name(), "No subscribers for event");
                continue;
            };

            for subscriber in subscribers {
                let subscriber = Arc::clone(subscriber);
                let event = Arc::clone(&event);
                tokio::spawn(async move {
                    let event_id = event.event_id();
                    let event_type = event.event_name();
                    if let Err(e) = subscriber.on(event).await {
                        tracing::warn!(
                            subscriber = subscriber.name(),
                            event_type,
                            %event_id,
                            error = %e,
                            "Subscriber failed to handle event"
                        );
                    }
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::fixtures::{OrderCancelled, OrderPlaced};
    use crate::domain::foundation::{ErrorCode, EventDescriptor};
    use std::time::Duration;
    use tokio::sync::mpsc;

    struct ForwardingSubscriber {
        name: &'static str,
        descriptors: Vec<EventDescriptor>,
        tx: mpsc::UnboundedSender<(&'static str, &'static str)>,
    }

    #[async_trait]
    impl DomainEventSubscriber for ForwardingSubscriber {
        fn subscribed_to(&self) -> Vec<EventDescriptor> {
            self.descriptors.clone()
        }

        async fn on(&self, event: Arc<dyn DomainEvent>) -> Result<(), DomainError> {
            let _ = self.tx.send((self.name, event.event_name()));
            Ok(())
        }

        fn name(&self) -> &'static str {
            self.name
        }
    }

    struct FailingSubscriber;

    #[async_trait]
    impl DomainEventSubscriber for FailingSubscriber {
        fn subscribed_to(&self) -> Vec<EventDescriptor> {
            vec![EventDescriptor::of::<OrderPlaced>()]
        }

        async fn on(&self, _: Arc<dyn DomainEvent>) -> Result<(), DomainError> {
            Err(DomainError::new(ErrorCode::InternalError, "boom"))
        }

        fn name(&self) -> &'static str {
            "FailingSubscriber"
        }
    }

    async fn recv(
        rx: &mut mpsc::UnboundedReceiver<(&'static str, &'static str)>,
    ) -> (&'static str, &'static str) {
        tokio::time::timeout(Duration::from_secs(1), rx.recv())
            .await
            .expect("subscriber was not invoked in time")
            .expect("channel closed")
    }

    #[tokio::test]
    async fn every_matching_subscriber_receives_the_event() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let subscribers = DomainEventSubscribers::new(vec![
            Arc::new(ForwardingSubscriber {
                name: "mailer",
                descriptors: vec![EventDescriptor::of::<OrderPlaced>()],
                tx: tx.clone(),
            }),
            Arc::new(ForwardingSubscriber {
                name: "audit",
                descriptors: vec![
                    EventDescriptor::of::<OrderPlaced>(),
                    EventDescriptor::of::<OrderCancelled>(),
                ],
                tx,
            }),
        ]);
        let bus = InMemoryAsyncEventBus::with_subscribers(&subscribers);

        bus.publish(vec![Arc::new(OrderPlaced::new("order-1", 100))])
            .await
            .unwrap();

        let mut received = vec![recv(&mut rx).await, recv(&mut rx).await];
        received.sort();
        assert_eq!(
            received,
            vec![("audit", "order.placed"), ("mailer", "order.placed")]
        );
    }

    #[tokio::test]
    async fn events_are_routed_by_name_only() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let subscribers = DomainEventSubscribers::new(vec![Arc::new(ForwardingSubscriber {
            name: "refunds",
            descriptors: vec![EventDescriptor::of::<OrderCancelled>()],
            tx,
        })]);
        let bus = InMemoryAsyncEventBus::with_subscribers(&subscribers);

        bus.publish(vec![
            Arc::new(OrderPlaced::new("order-1", 100)),
            Arc::new(OrderCancelled::new("order-1", "changed mind")),
        ])
        .await
        .unwrap();

        assert_eq!(recv(&mut rx).await, ("refunds", "order.cancelled"));
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn failing_subscriber_does_not_affect_others() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let subscribers = DomainEventSubscribers::new(vec![
            Arc::new(FailingSubscriber),
            Arc::new(ForwardingSubscriber {
                name: "mailer",
                descriptors: vec![EventDescriptor::of::<OrderPlaced>()],
                tx,
            }),
        ]);
        let bus = InMemoryAsyncEventBus::with_subscribers(&subscribers);

        let result = bus
            .publish(vec![Arc::new(OrderPlaced::new("order-1", 100))])
            .await;

        assert!(result.is_ok());
        assert_eq!(recv(&mut rx).await, ("mailer", "order.placed"));
    }

    #[tokio::test]
    async fn publish_without_subscribers_is_a_no_op() {
        let bus = InMemoryAsyncEventBus::new();

        let result = bus
            .publish(vec![Arc::new(OrderPlaced::new("order-1", 100))])
            .await;

        assert!(result.is_ok());
        assert_eq!(bus.subscriber_count("order.placed"), 0);
    }

    #[test]
    fn add_subscribers_indexes_every_declared_name() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let subscribers = DomainEventSubscribers::new(vec![Arc::new(ForwardingSubscriber {
            name: "audit",
            descriptors: vec![
                EventDescriptor::of::<OrderPlaced>(),
                EventDescriptor::of::<OrderCancelled>(),
            ],
            tx,
        })]);

        let mut bus = InMemoryAsyncEventBus::new();
        bus.add_subscribers(&subscribers);

        assert_eq!(bus.subscriber_count("order.placed"), 1);
        assert_eq!(bus.subscriber_count("order.cancelled"), 1);
    }
}
