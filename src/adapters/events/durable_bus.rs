//! Event bus decorator that stores every event before delivering it.

use async_trait::async_trait;
use futures::future::try_join_all;
use std::sync::Arc;

use super::failover_publisher::DomainEventFailoverPublisher;
use crate::domain::foundation::{DomainError, DomainEvent};
use crate::ports::EventBus;

/// Upserts each event into the failover store, then publishes in-process.
///
/// If storing fails nothing is delivered and the error reaches the caller.
/// A crash after storing leaves the events for the replayer.
pub struct FailoverEventBus {
    failover: Arc<DomainEventFailoverPublisher>,
    inner: Arc<dyn EventBus>,
}

impl FailoverEventBus {
    pub fn new(failover: Arc<DomainEventFailoverPublisher>, inner: Arc<dyn EventBus>) -> Self {
        Self { failover, inner }
    }
}

#[async_trait]
impl EventBus for FailoverEventBus {
    async fn publish(&self, events: Vec<Arc<dyn DomainEvent>>) -> Result<(), DomainError> {
        try_join_all(events.iter().map(|event| self.failover.publish(event.as_ref()))).await?;
        self.inner.publish(events).await
    }
}
