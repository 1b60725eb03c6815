//! Criteria to MongoDB query translation.

use serde::Serialize;
use serde_json::{json, Map, Value as JsonValue};
use std::collections::HashMap;

use crate::domain::criteria::{Criteria, Filter, FilterOperator, Order};
use crate::domain::foundation::{DomainError, ErrorCode};
use crate::ports::CriteriaConverter;

/// Native identity field of a MongoDB document.
pub const MONGO_ID_FIELD: &str = "_id";

/// Logical identifier field rewritten to [`MONGO_ID_FIELD`] when sorting.
const LOGICAL_ID_FIELD: &str = "id";

/// `{filter, sort, skip, limit}` as accepted by `find`.
///
/// A `limit` of `0` means no limit.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MongoQuery {
    pub filter: JsonValue,
    pub sort: JsonValue,
    pub skip: u64,
    pub limit: u64,
}

type FilterTransformer = fn(&Filter) -> JsonValue;

/// Translates criteria into MongoDB filter and sort documents.
///
/// Filters are merged into one document keyed by field name. When two
/// filters target the same field the later one replaces the earlier one.
pub struct MongoCriteriaConverter {
    transformers: HashMap<FilterOperator, FilterTransformer>,
}

impl Default for MongoCriteriaConverter {
    fn default() -> Self {
        Self::new()
    }
}

impl MongoCriteriaConverter {
    pub fn new() -> Self {
        let transformers: [(FilterOperator, FilterTransformer); 6] = [
            (FilterOperator::Equal, equal_filter),
            (FilterOperator::NotEqual, not_equal_filter),
            (FilterOperator::Gt, greater_than_filter),
            (FilterOperator::Lt, lower_than_filter),
            (FilterOperator::Contains, contains_filter),
            (FilterOperator::NotContains, not_contains_filter),
        ];
        Self {
            transformers: transformers.into_iter().collect(),
        }
    }

    #[cfg(test)]
    fn without(operator: FilterOperator) -> Self {
        let mut converter = Self::new();
        converter.transformers.remove(&operator);
        converter
    }

    fn generate_filter(&self, criteria: &Criteria) -> Result<JsonValue, DomainError> {
        let mut document = Map::new();
        if !criteria.has_filters() {
            return Ok(JsonValue::Object(document));
        }

        for filter in criteria.filters() {
            let transformer = self.transformers.get(&filter.operator()).ok_or_else(|| {
                DomainError::for_type(
                    ErrorCode::UnsupportedOperator,
                    filter.operator().as_str(),
                    format!("Unexpected operator value {}", filter.operator()),
                )
            })?;

            if let JsonValue::Object(predicate) = transformer(filter) {
                for (field, condition) in predicate {
                    if document.insert(field.clone(), condition).is_some() {
                        tracing::debug!(field = %field, "Later filter replaces earlier filter on field");
                    }
                }
            }
        }

        Ok(JsonValue::Object(document))
    }

    fn generate_sort(&self, order: &Order) -> JsonValue {
        if !order.has_order() {
            return json!({});
        }
        let field = if order.order_by() == LOGICAL_ID_FIELD {
            MONGO_ID_FIELD
        } else {
            order.order_by()
        };
        let direction = if order.order_type().is_asc() { 1 } else { -1 };

        let mut sort = Map::new();
        sort.insert(field.to_string(), json!(direction));
        JsonValue::Object(sort)
    }
}

impl CriteriaConverter for MongoCriteriaConverter {
    type Query = MongoQuery;

    fn convert(&self, criteria: &Criteria) -> Result<MongoQuery, DomainError> {
        Ok(MongoQuery {
            filter: self.generate_filter(criteria)?,
            sort: self.generate_sort(criteria.order()),
            skip: criteria.offset().unwrap_or(0),
            limit: criteria.limit().unwrap_or(0),
        })
    }
}

fn predicate(filter: &Filter, condition: JsonValue) -> JsonValue {
    let mut predicate = Map::new();
    predicate.insert(filter.field().as_str().to_string(), condition);
    JsonValue::Object(predicate)
}

fn equal_filter(filter: &Filter) -> JsonValue {
    predicate(filter, json!({ "$eq": filter.value().to_json() }))
}

fn not_equal_filter(filter: &Filter) -> JsonValue {
    predicate(filter, json!({ "$ne": filter.value().to_json() }))
}

fn greater_than_filter(filter: &Filter) -> JsonValue {
    predicate(filter, json!({ "$gt": filter.value().to_json() }))
}

fn lower_than_filter(filter: &Filter) -> JsonValue {
    predicate(filter, json!({ "$lt": filter.value().to_json() }))
}

fn contains_filter(filter: &Filter) -> JsonValue {
    predicate(filter, json!({ "$regex": filter.value().to_string() }))
}

fn not_contains_filter(filter: &Filter) -> JsonValue {
    predicate(
        filter,
        json!({ "$not": { "$regex": filter.value().to_string() } }),
    )
}
