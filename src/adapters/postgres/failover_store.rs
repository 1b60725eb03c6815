//! PostgreSQL implementation of FailoverStore.
//!
//! Records live in the `domain_events` table (see `migrations/`). Upserts
//! keep the original `stored_at`, so `find` returns records in
//! first-publication order.

use async_trait::async_trait;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use crate::domain::foundation::{DomainError, ErrorCode, EventId};
use crate::ports::{FailoverRecord, FailoverStore};

const UPSERT_SQL: &str = r#"
    INSERT INTO domain_events (event_id, event)
    VALUES ($1, $2)
    ON CONFLICT (event_id) DO UPDATE SET event = EXCLUDED.event
"#;

const FIND_SQL: &str = r#"
    SELECT event_id, event
    FROM domain_events
    ORDER BY stored_at, event_id
    OFFSET $1
    LIMIT $2
"#;

const DELETE_SQL: &str = "DELETE FROM domain_events WHERE event_id = $1";

/// PostgreSQL implementation of FailoverStore.
#[derive(Clone)]
pub struct PostgresFailoverStore {
    pool: PgPool,
}

impl PostgresFailoverStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FailoverStore for PostgresFailoverStore {
    async fn upsert(&self, record: FailoverRecord) -> Result<(), DomainError> {
        sqlx::query(UPSERT_SQL)
            .bind(record.event_id.as_uuid())
            .bind(&record.event)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                DomainError::new(
                    ErrorCode::DatabaseError,
                    format!("Failed to upsert failover record: {}", e),
                )
            })?;

        Ok(())
    }

    async fn find_page(&self, offset: usize, limit: usize) -> Result<Vec<FailoverRecord>, DomainError> {
        let rows = sqlx::query(FIND_SQL)
            .bind(i64::try_from(offset).unwrap_or(i64::MAX))
            .bind(i64::try_from(limit).unwrap_or(i64::MAX))
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                DomainError::new(
                    ErrorCode::DatabaseError,
                    format!("Failed to read failover records: {}", e),
                )
            })?;

        rows.into_iter()
            .map(|row| {
                let event_id: Uuid = row.try_get("event_id").map_err(|e| {
                    DomainError::new(ErrorCode::DatabaseError, format!("Invalid event_id: {}", e))
                })?;
                let event: String = row.try_get("event").map_err(|e| {
                    DomainError::new(ErrorCode::DatabaseError, format!("Invalid event: {}", e))
                })?;
                Ok(FailoverRecord::new(EventId::from_uuid(event_id), event))
            })
            .collect()
    }

    async fn delete(&self, event_id: &EventId) -> Result<bool, DomainError> {
        let result = sqlx::query(DELETE_SQL)
            .bind(event_id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|e| {
                DomainError::new(
                    ErrorCode::DatabaseError,
                    format!("Failed to delete failover record: {}", e),
                )
            })?;

        Ok(result.rows_affected() > 0)
    }
}
