//! AggregateStore port - Write side for aggregate roots.
//!
//! Aggregates are stored as their primitive projection, keyed by id. Writing
//! the same id again replaces the stored document, so saving is an upsert.

use async_trait::async_trait;
use serde_json::Value as JsonValue;

use crate::domain::foundation::{AggregateRoot, DomainError};

/// Port for persisting aggregate documents of one collection/table.
#[async_trait]
pub trait AggregateStore: Send + Sync {
    /// Insert `document` under `id`, or replace the one already stored there.
    ///
    /// The `id` argument wins over any `id` key inside `document`.
    async fn persist(&self, id: &str, document: JsonValue) -> Result<(), DomainError>;
}

/// Saves aggregates through their primitive projection.
#[async_trait]
pub trait AggregateStoreExt: AggregateStore {
    async fn save<A>(&self, id: &str, aggregate: &A) -> Result<(), DomainError>
    where
        A: AggregateRoot + Sync,
    {
        self.persist(id, aggregate.to_primitives()).await
    }
}

impl<S: AggregateStore + ?Sized> AggregateStoreExt for S {}
