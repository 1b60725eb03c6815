//! Application layer - Use cases composed from ports.
//!
//! - `CriteriaSearch` - Criteria search over one collection of a storage backend

mod search;

pub use search::CriteriaSearch;
