//! Persistence-agnostic query description.

use serde::{Deserialize, Serialize};

use super::{Filter, Filters, Order};

/// Filtering, ordering and pagination for a query.
///
/// Immutable: the `with_*` methods return new values. `limit` and `offset`
/// absent mean unbounded and zero respectively.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Criteria {
    filters: Filters,
    order: Order,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    limit: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    offset: Option<u64>,
}

impl Criteria {
    pub fn new(filters: Filters, order: Order, limit: Option<u64>, offset: Option<u64>) -> Self {
        Self {
            filters,
            order,
            limit,
            offset,
        }
    }

    /// Matches everything, in storage order, unpaginated.
    pub fn all() -> Self {
        Self::default()
    }

    pub fn with_filter(&self, filter: Filter) -> Self {
        Self {
            filters: self.filters.and(filter),
            ..self.clone()
        }
    }

    pub fn with_filters(&self, filters: Filters) -> Self {
        Self {
            filters,
            ..self.clone()
        }
    }

    pub fn with_order(&self, order: Order) -> Self {
        Self {
            order,
            ..self.clone()
        }
    }

    pub fn with_limit(&self, limit: u64) -> Self {
        Self {
            limit: Some(limit),
            ..self.clone()
        }
    }

    pub fn with_offset(&self, offset: u64) -> Self {
        Self {
            offset: Some(offset),
            ..self.clone()
        }
    }

    pub fn filters(&self) -> &Filters {
        &self.filters
    }

    pub fn order(&self) -> &Order {
        &self.order
    }

    pub fn limit(&self) -> Option<u64> {
        self.limit
    }

    pub fn offset(&self) -> Option<u64> {
        self.offset
    }

    pub fn has_filters(&self) -> bool {
        !self.filters.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::criteria::{FilterField, FilterOperator, FilterValue};

    fn name_filter() -> Filter {
        Filter::new(
            FilterField::new("name").unwrap(),
            FilterOperator::Equal,
            FilterValue::from("ann"),
        )
    }

    #[test]
    fn all_is_neutral() {
        let criteria = Criteria::all();
        assert!(!criteria.has_filters());
        assert!(!criteria.order().has_order());
        assert_eq!(criteria.limit(), None);
        assert_eq!(criteria.offset(), None);
    }

    #[test]
    fn factories_leave_original_untouched() {
        let base = Criteria::all();
        let narrowed = base
            .with_filter(name_filter())
            .with_order(Order::asc("name").unwrap())
            .with_limit(10)
            .with_offset(20);

        assert_eq!(base, Criteria::all());
        assert!(narrowed.has_filters());
        assert!(narrowed.order().has_order());
        assert_eq!(narrowed.limit(), Some(10));
        assert_eq!(narrowed.offset(), Some(20));
    }

    #[test]
    fn with_filters_replaces_sequence() {
        let criteria = Criteria::all()
            .with_filter(name_filter())
            .with_filters(Filters::none());
        assert!(!criteria.has_filters());
    }

    #[test]
    fn deserializing_a_directed_order_without_field_fails() {
        let result = serde_json::from_str::<Criteria>(
            r#"{"filters":[],"order":{"order_by":"","order_type":"asc"}}"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn deserializes_valid_criteria() {
        let criteria: Criteria = serde_json::from_str(
            r#"{"filters":[{"field":"name","operator":"=","value":"ann"}],
                "order":{"order_by":"name","order_type":"asc"},"limit":5}"#,
        )
        .unwrap();

        assert!(criteria.has_filters());
        assert_eq!(criteria.order(), &Order::asc("name").unwrap());
        assert_eq!(criteria.limit(), Some(5));
    }

    #[test]
    fn serializes_without_absent_pagination() {
        let json = serde_json::to_value(Criteria::all()).unwrap();
        assert!(json.get("limit").is_none());
        assert!(json.get("offset").is_none());
    }
}
