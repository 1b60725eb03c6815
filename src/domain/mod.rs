//! Domain layer containing the shared kernel's domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared primitives (identifiers, events, aggregates, CQRS markers, errors)
//! - `criteria` - Persistence-agnostic query description

pub mod criteria;
pub mod foundation;
