//! Document-store (MongoDB dialect) adapters.
//!
//! Queries are emitted as `serde_json` documents in the MongoDB query
//! language, ready to hand to any driver that accepts extended JSON.

mod criteria_converter;

pub use criteria_converter::{MongoCriteriaConverter, MongoQuery, MONGO_ID_FIELD};
