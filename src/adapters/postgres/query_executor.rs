//! PostgreSQL implementation of QueryExecutor.

use async_trait::async_trait;
use serde_json::Value as JsonValue;
use sqlx::PgPool;

use super::criteria_converter::PostgresQuery;
use crate::domain::foundation::{DomainError, ErrorCode};
use crate::ports::QueryExecutor;

/// Runs [`PostgresQuery`] values and returns each row as a JSON document.
#[derive(Clone)]
pub struct PostgresQueryExecutor {
    pool: PgPool,
}

impl PostgresQueryExecutor {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl QueryExecutor for PostgresQueryExecutor {
    type Query = PostgresQuery;

    async fn execute(&self, table: &str, query: PostgresQuery) -> Result<Vec<JsonValue>, DomainError> {
        let mut builder = query.to_select(table)?;
        tracing::debug!(table, sql = builder.sql(), "Executing criteria query");

        builder
            .build_query_scalar::<JsonValue>()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                DomainError::new(
                    ErrorCode::DatabaseError,
                    format!("Failed to query {}: {}", table, e),
                )
            })
    }
}
