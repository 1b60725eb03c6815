//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `cqrs` - In-process command and query buses
//! - `events` - Event bus, serializer and failover delivery
//! - `mongo` - Document-store (MongoDB dialect) criteria converter
//! - `postgres` - PostgreSQL client registry, converter, executor and failover store

pub mod cqrs;
pub mod events;
pub mod mongo;
pub mod postgres;

pub use cqrs::{InMemoryCommandBus, InMemoryQueryBus};
pub use events::{
    DomainEventFailoverPublisher, FailoverEventBus, FailoverReplayer, InMemoryAsyncEventBus,
    InMemoryFailoverStore,
};
