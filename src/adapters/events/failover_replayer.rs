//! FailoverReplayer - Background service that drains the failover store.
//!
//! Each cycle pages through the failover store, republishes every event on
//! the in-process bus, and acknowledges the ones the bus accepted. Records
//! that cannot be deserialized, and events the bus rejects, stay stored and
//! are paged past, so they never hide the records behind them. They are
//! retried next cycle.
//!
//! ## Configuration
//!
//! | Setting | Default | Description |
//! |---------|---------|-------------|
//! | `poll_interval` | 1s | How often to replay stored events |
//!
//! ## Graceful Shutdown
//!
//! The service listens for a shutdown signal and replays one final batch
//! before stopping.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::time;

use super::failover_publisher::DomainEventFailoverPublisher;
use crate::config::FailoverConfig;
use crate::domain::foundation::DomainError;
use crate::ports::EventBus;

/// Configuration for the FailoverReplayer service.
#[derive(Debug, Clone)]
pub struct FailoverReplayerConfig {
    /// How often to replay stored events.
    pub poll_interval: Duration,
}

impl Default for FailoverReplayerConfig {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_millis(1000),
        }
    }
}

impl From<&FailoverConfig> for FailoverReplayerConfig {
    fn from(config: &FailoverConfig) -> Self {
        Self {
            poll_interval: config.replay_interval(),
        }
    }
}

impl FailoverReplayerConfig {
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }
}

/// Background service that republishes stored events.
pub struct FailoverReplayer {
    failover: Arc<DomainEventFailoverPublisher>,
    event_bus: Arc<dyn EventBus>,
    config: FailoverReplayerConfig,
}

impl FailoverReplayer {
    /// Create a new FailoverReplayer with default configuration.
    pub fn new(failover: Arc<DomainEventFailoverPublisher>, event_bus: Arc<dyn EventBus>) -> Self {
        Self::with_config(failover, event_bus, FailoverReplayerConfig::default())
    }

    /// Create a new FailoverReplayer with custom configuration.
    pub fn with_config(
        failover: Arc<DomainEventFailoverPublisher>,
        event_bus: Arc<dyn EventBus>,
        config: FailoverReplayerConfig,
    ) -> Self {
        Self {
            failover,
            event_bus,
            config,
        }
    }

    /// Run the replay loop until shutdown signal is received.
    ///
    /// Returns an error only for faults a retry cannot fix, such as a
    /// missing deserializer or a failing store.
    pub async fn run(&self, mut shutdown: watch::Receiver<bool>) -> Result<(), DomainError> {
        let mut interval = time::interval(self.config.poll_interval);

        loop {
            tokio::select! {
                _ = shutdown.changed() => {
                    if *shutdown.borrow() {
                        self.replay_once().await?;
                        tracing::info!("Failover replayer stopped");
                        return Ok(());
                    }
                }

                _ = interval.tick() => {
                    self.replay_once().await?;
                }
            }
        }
    }

    /// Replay everything currently stored, one page at a time.
    /// Returns the number of acknowledged events.
    ///
    /// Acknowledged records leave the store, so the offset only advances
    /// past records that stay behind.
    pub async fn replay_once(&self) -> Result<usize, DomainError> {
        let page_size = self.failover.config().batch_size;
        let mut offset = 0;
        let mut replayed = 0;

        loop {
            let page = self.failover.consume_page(offset).await?;
            offset += page.skipped.len();

            for event in page.events {
                let event_id = event.event_id();
                match self.event_bus.publish(vec![event]).await {
                    Ok(()) => {
                        self.failover.acknowledge(&event_id).await?;
                        replayed += 1;
                    }
                    Err(e) => {
                        tracing::warn!(%event_id, error = %e, "Failed to republish stored event");
                        offset += 1;
                    }
                }
            }

            if page.read == 0 || page.read < page_size {
                break;
            }
        }

        if replayed > 0 || offset > 0 {
            tracing::info!(replayed, left_stored = offset, "Replayed failover store");
        }
        Ok(replayed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::events::{
        DomainEventDeserializer, FailoverPublisherConfig, InMemoryFailoverStore,
        DEFAULT_FAILOVER_BATCH_SIZE,
    };
    use crate::domain::foundation::fixtures::{OrderCancelled, OrderPlaced};
    use crate::domain::foundation::{DomainEvent, ErrorCode, EventDescriptor};
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Bus that records what it was asked to publish.
    #[derive(Default)]
    struct RecordingBus {
        published: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl EventBus for RecordingBus {
        async fn publish(&self, events: Vec<Arc<dyn DomainEvent>>) -> Result<(), DomainError> {
            let mut published = self.published.lock().unwrap();
            published.extend(events.iter().map(|e| e.event_id().to_string()));
            Ok(())
        }
    }

    struct FailingBus;

    #[async_trait]
    impl EventBus for FailingBus {
        async fn publish(&self, _: Vec<Arc<dyn DomainEvent>>) -> Result<(), DomainError> {
            Err(DomainError::new(ErrorCode::InternalError, "Publish failed"))
        }
    }

    fn failover_with_deserializer(store: Arc<InMemoryFailoverStore>) -> Arc<DomainEventFailoverPublisher> {
        failover_with_batch_size(store, DEFAULT_FAILOVER_BATCH_SIZE)
    }

    fn failover_with_batch_size(
        store: Arc<InMemoryFailoverStore>,
        batch_size: usize,
    ) -> Arc<DomainEventFailoverPublisher> {
        let mut deserializer = DomainEventDeserializer::default();
        deserializer.register(EventDescriptor::of::<OrderPlaced>());
        let failover = DomainEventFailoverPublisher::with_config(
            store,
            FailoverPublisherConfig::default().with_batch_size(batch_size),
        );
        failover.set_deserializer(Arc::new(deserializer)).unwrap();
        Arc::new(failover)
    }

    #[tokio::test]
    async fn replay_once_republishes_and_acknowledges() {
        let store = Arc::new(InMemoryFailoverStore::new());
        let failover = failover_with_deserializer(store.clone());
        let bus = Arc::new(RecordingBus::default());
        let first = OrderPlaced::new("order-1", 100);
        let second = OrderPlaced::new("order-2", 200);
        failover.publish(&first).await.unwrap();
        failover.publish(&second).await.unwrap();

        let replayer = FailoverReplayer::new(failover, bus.clone());
        let count = replayer.replay_once().await.unwrap();

        assert_eq!(count, 2);
        assert!(store.is_empty().await);
        assert_eq!(
            *bus.published.lock().unwrap(),
            vec![first.event_id.to_string(), second.event_id.to_string()]
        );
    }

    #[tokio::test]
    async fn rejected_events_stay_stored() {
        let store = Arc::new(InMemoryFailoverStore::new());
        let failover = failover_with_deserializer(store.clone());
        failover.publish(&OrderPlaced::new("order-1", 100)).await.unwrap();

        let replayer = FailoverReplayer::new(failover, Arc::new(FailingBus));
        let count = replayer.replay_once().await.unwrap();

        assert_eq!(count, 0);
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn unreadable_records_do_not_block_the_ones_behind_them() {
        let store = Arc::new(InMemoryFailoverStore::new());
        let failover = failover_with_batch_size(store.clone(), 2);
        let bus = Arc::new(RecordingBus::default());
        failover.publish(&OrderCancelled::new("order-1", "late")).await.unwrap();
        failover.publish(&OrderCancelled::new("order-2", "late")).await.unwrap();
        let placed = OrderPlaced::new("order-3", 300);
        failover.publish(&placed).await.unwrap();

        let replayer = FailoverReplayer::new(failover, bus.clone());
        let count = replayer.replay_once().await.unwrap();

        assert_eq!(count, 1);
        assert_eq!(*bus.published.lock().unwrap(), vec![placed.event_id.to_string()]);
        assert_eq!(store.len().await, 2);
        assert!(store.get(&placed.event_id).await.is_none());
    }

    #[tokio::test]
    async fn replay_drains_more_than_one_page() {
        let store = Arc::new(InMemoryFailoverStore::new());
        let failover = failover_with_batch_size(store.clone(), 2);
        for i in 0..5 {
            failover.publish(&OrderPlaced::new("order", i)).await.unwrap();
        }

        let replayer = FailoverReplayer::new(failover, Arc::new(RecordingBus::default()));

        assert_eq!(replayer.replay_once().await.unwrap(), 5);
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn rejected_events_are_paged_past() {
        let store = Arc::new(InMemoryFailoverStore::new());
        let failover = failover_with_batch_size(store.clone(), 1);
        failover.publish(&OrderPlaced::new("order-1", 100)).await.unwrap();
        failover.publish(&OrderPlaced::new("order-2", 200)).await.unwrap();

        let replayer = FailoverReplayer::new(failover, Arc::new(FailingBus));

        assert_eq!(replayer.replay_once().await.unwrap(), 0);
        assert_eq!(store.len().await, 2);
    }

    #[tokio::test]
    async fn replay_without_deserializer_is_an_error() {
        let failover = Arc::new(DomainEventFailoverPublisher::new(Arc::new(
            InMemoryFailoverStore::new(),
        )));
        let replayer = FailoverReplayer::new(failover, Arc::new(RecordingBus::default()));

        let err = replayer.replay_once().await.unwrap_err();

        assert_eq!(err.code, ErrorCode::DeserializerNotSet);
    }

    #[tokio::test]
    async fn run_stops_on_shutdown_signal() {
        let store = Arc::new(InMemoryFailoverStore::new());
        let failover = failover_with_deserializer(store.clone());
        failover.publish(&OrderPlaced::new("order-1", 100)).await.unwrap();

        let config = FailoverReplayerConfig::default().with_poll_interval(Duration::from_millis(10));
        let replayer =
            FailoverReplayer::with_config(failover, Arc::new(RecordingBus::default()), config);

        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let handle = tokio::spawn(async move { replayer.run(shutdown_rx).await });

        tokio::time::sleep(Duration::from_millis(50)).await;
        shutdown_tx.send(true).unwrap();

        let result = handle.await.unwrap();
        assert!(result.is_ok());
        assert!(store.is_empty().await);
    }

    #[test]
    fn config_is_built_from_failover_settings() {
        let settings = FailoverConfig {
            replay_interval_ms: 250,
            ..Default::default()
        };

        assert_eq!(
            FailoverReplayerConfig::from(&settings).poll_interval,
            Duration::from_millis(250)
        );
    }

    #[test]
    fn config_defaults_to_one_second_interval() {
        assert_eq!(
            FailoverReplayerConfig::default().poll_interval,
            Duration::from_secs(1)
        );
    }
}
