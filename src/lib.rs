//! Shared Kernel - Building blocks for hexagonal, event-driven services.
//!
//! - A criteria query model with converters for document and SQL stores
//! - Exact-type command and query dispatch
//! - Domain events with an in-process bus and durable failover delivery

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod telemetry;

#[doc(hidden)]
pub mod __private {
    pub use serde_json;
}
