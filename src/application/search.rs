//! CriteriaSearch - Runs a `Criteria` against one collection of a backend.

use serde::de::DeserializeOwned;
use serde_json::Value as JsonValue;

use crate::domain::criteria::Criteria;
use crate::domain::foundation::{DomainError, ErrorCode};
use crate::ports::{CriteriaConverter, QueryExecutor};

/// Pairs a backend's converter with its executor for one collection/table.
pub struct CriteriaSearch<C, E> {
    converter: C,
    executor: E,
    collection: String,
}

impl<C, E> CriteriaSearch<C, E>
where
    C: CriteriaConverter,
    E: QueryExecutor<Query = C::Query>,
{
    pub fn new(converter: C, executor: E, collection: impl Into<String>) -> Self {
        Self {
            converter,
            executor,
            collection: collection.into(),
        }
    }

    pub fn collection(&self) -> &str {
        &self.collection
    }

    /// Returns matching records as raw documents.
    pub async fn search(&self, criteria: &Criteria) -> Result<Vec<JsonValue>, DomainError> {
        let query = self.converter.convert(criteria)?;
        self.executor.execute(&self.collection, query).await
    }

    /// Returns matching records deserialized as `T`.
    pub async fn search_as<T: DeserializeOwned>(&self, criteria: &Criteria) -> Result<Vec<T>, DomainError> {
        self.search(criteria)
            .await?
            .into_iter()
            .map(|document| {
                serde_json::from_value(document).map_err(|e| {
                    DomainError::new(
                        ErrorCode::SerializationError,
                        format!("Record of {} does not match the expected shape: {}", self.collection, e),
                    )
                })
            })
            .collect()
    }
}
