//! Criteria translation and execution ports.
//!
//! A storage backend contributes two pieces: a [`CriteriaConverter`] that
//! turns a `Criteria` into the backend's native query, and a
//! [`QueryExecutor`] that runs that query. Adding a backend means adding a
//! parallel pair, never editing an existing converter.

use async_trait::async_trait;
use serde_json::Value as JsonValue;

use crate::domain::criteria::Criteria;
use crate::domain::foundation::DomainError;

/// Translates criteria into one backend's query representation.
pub trait CriteriaConverter: Send + Sync {
    /// Native `{predicate, sort, skip, limit}` structure of the backend.
    type Query: Send + 'static;

    fn convert(&self, criteria: &Criteria) -> Result<Self::Query, DomainError>;
}

/// Runs a backend-native query against a collection/table and returns raw records.
#[async_trait]
pub trait QueryExecutor: Send + Sync {
    type Query: Send + 'static;

    async fn execute(
        &self,
        collection: &str,
        query: Self::Query,
    ) -> Result<Vec<JsonValue>, DomainError>;
}
