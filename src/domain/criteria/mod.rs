//! Criteria - persistence-agnostic filtering, ordering and pagination.
//!
//! Values are validated when constructed, so a `Criteria` never holds an
//! unknown operator or direction. Field names are not checked against any
//! schema; that is left to the storage layer at execution time.

mod criteria;
mod filter;
mod filter_operator;
mod filters;
mod order;

pub use criteria::Criteria;
pub use filter::{Filter, FilterField, FilterValue};
pub use filter_operator::FilterOperator;
pub use filters::Filters;
pub use order::{Order, OrderType};
