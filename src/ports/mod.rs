//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## CQRS Ports
//!
//! - `CommandBus` / `CommandHandler` - Exact-type command dispatch
//! - `QueryBus` / `QueryHandler` - Exact-type query dispatch with typed responses
//!
//! ## Event Ports
//!
//! - `EventBus` - Port for publishing domain events
//! - `DomainEventSubscriber` - Subscriber that declares and processes event types
//! - `FailoverStore` - Durable, idempotent side-store for serialized events
//!
//! ## Persistence Ports
//!
//! - `AggregateStore` - Upsert of aggregate primitives by id
//!
//! ## Query Ports
//!
//! - `CriteriaConverter` - Criteria to backend-native query translation
//! - `QueryExecutor` - Backend-native query execution

mod aggregate_store;
mod command_bus;
mod criteria_query;
mod event_bus;
mod event_subscriber;
mod failover_store;
mod query_bus;

pub use aggregate_store::{AggregateStore, AggregateStoreExt};
pub use command_bus::{CommandBus, CommandBusExt, CommandHandler};
pub use criteria_query::{CriteriaConverter, QueryExecutor};
pub use event_bus::EventBus;
pub use event_subscriber::DomainEventSubscriber;
pub use failover_store::{FailoverRecord, FailoverStore};
pub use query_bus::{QueryBus, QueryBusExt, QueryHandler};
