//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, the event model, CQRS markers and
//! error types that every bounded context builds on.

mod aggregate;
mod command;
mod errors;
mod events;
mod ids;
mod timestamp;

pub use aggregate::{AggregateRoot, RecordedEvents};
pub use command::{Command, MessageType, Query, QueryResponse};
pub use errors::{DomainError, ErrorCode, ValidationError};
pub use events::{
    DomainEvent, DomainEventClass, DomainEventPrimitives, EventDescriptor,
};
pub use ids::{EventId, Identifier};
pub use timestamp::Timestamp;

#[cfg(test)]
pub(crate) use events::fixtures;
