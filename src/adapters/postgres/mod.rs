//! PostgreSQL adapters.
//!
//! - `PostgresClientRegistry` - Named connection pools built once at startup
//! - `PostgresCriteriaConverter` - Criteria to parameterized SQL
//! - `PostgresQueryExecutor` - Runs converted queries, rows as JSON documents
//! - `PostgresFailoverStore` - Durable failover store on the `domain_events` table
//! - `PostgresAggregateStore` - Aggregate documents upserted by id

mod aggregate_store;
mod client_registry;
mod criteria_converter;
mod failover_store;
mod query_executor;

pub use aggregate_store::PostgresAggregateStore;
pub use client_registry::{PostgresClientRegistry, MIGRATOR};
pub use criteria_converter::{PostgresCriteriaConverter, PostgresPredicate, PostgresQuery, PostgresSort};
pub use failover_store::PostgresFailoverStore;
pub use query_executor::PostgresQueryExecutor;
