//! A single field/operator/value predicate.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::collections::HashMap;
use std::fmt;

use super::FilterOperator;
use crate::domain::foundation::ValidationError;

/// Name of the field a filter applies to. Never empty.
///
/// Existence of the field is checked by the storage layer at query time.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct FilterField(String);

impl FilterField {
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(ValidationError::empty_field("field"));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for FilterField {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<FilterField> for String {
    fn from(field: FilterField) -> Self {
        field.0
    }
}

impl fmt::Display for FilterField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Primitive value a field is compared against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterValue {
    Boolean(bool),
    Integer(i64),
    Float(f64),
    Text(String),
}

impl FilterValue {
    /// JSON form used by document-store queries.
    pub fn to_json(&self) -> JsonValue {
        match self {
            FilterValue::Boolean(b) => JsonValue::Bool(*b),
            FilterValue::Integer(i) => JsonValue::from(*i),
            FilterValue::Float(f) => JsonValue::from(*f),
            FilterValue::Text(s) => JsonValue::String(s.clone()),
        }
    }
}

impl fmt::Display for FilterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterValue::Boolean(b) => write!(f, "{}", b),
            FilterValue::Integer(i) => write!(f, "{}", i),
            FilterValue::Float(x) => write!(f, "{}", x),
            FilterValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for FilterValue {
    fn from(value: &str) -> Self {
        FilterValue::Text(value.to_string())
    }
}

impl From<String> for FilterValue {
    fn from(value: String) -> Self {
        FilterValue::Text(value)
    }
}

impl From<i64> for FilterValue {
    fn from(value: i64) -> Self {
        FilterValue::Integer(value)
    }
}

impl From<f64> for FilterValue {
    fn from(value: f64) -> Self {
        FilterValue::Float(value)
    }
}

impl From<bool> for FilterValue {
    fn from(value: bool) -> Self {
        FilterValue::Boolean(value)
    }
}

/// `{ field, operator, value }` predicate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Filter {
    field: FilterField,
    operator: FilterOperator,
    value: FilterValue,
}

impl Filter {
    pub fn new(field: FilterField, operator: FilterOperator, value: FilterValue) -> Self {
        Self {
            field,
            operator,
            value,
        }
    }

    /// Builds a filter from its primitive form, e.g. a parsed query string.
    ///
    /// Expects the keys `field`, `operator` and `value`; the value is kept as text.
    pub fn from_values(values: &HashMap<String, String>) -> Result<Self, ValidationError> {
        let field = values
            .get("field")
            .ok_or_else(|| ValidationError::empty_field("field"))?;
        let operator = values
            .get("operator")
            .ok_or_else(|| ValidationError::empty_field("operator"))?;
        let value = values
            .get("value")
            .ok_or_else(|| ValidationError::empty_field("value"))?;

        Ok(Self::new(
            FilterField::new(field.as_str())?,
            FilterOperator::from_value(operator)?,
            FilterValue::Text(value.clone()),
        ))
    }

    pub fn field(&self) -> &FilterField {
        &self.field
    }

    pub fn operator(&self) -> FilterOperator {
        self.operator
    }

    pub fn value(&self) -> &FilterValue {
        &self.value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn from_values_builds_filter() {
        let filter = Filter::from_values(&values(&[
            ("field", "name"),
            ("operator", "CONTAINS"),
            ("value", "ann"),
        ]))
        .unwrap();

        assert_eq!(filter.field().as_str(), "name");
        assert_eq!(filter.operator(), FilterOperator::Contains);
        assert_eq!(filter.value(), &FilterValue::Text("ann".to_string()));
    }

    #[test]
    fn from_values_rejects_unknown_operator() {
        let result = Filter::from_values(&values(&[
            ("field", "name"),
            ("operator", "STARTS_WITH"),
            ("value", "a"),
        ]));

        assert!(matches!(result, Err(ValidationError::InvalidValue { .. })));
    }

    #[test]
    fn from_values_requires_every_key() {
        let result = Filter::from_values(&values(&[("field", "name"), ("value", "a")]));
        assert_eq!(result.unwrap_err(), ValidationError::empty_field("operator"));
    }

    #[test]
    fn blank_field_is_rejected() {
        assert!(FilterField::new("  ").is_err());
    }

    #[test]
    fn filter_value_deserializes_primitives() {
        let parsed: Vec<FilterValue> = serde_json::from_str(r#"[true, 3, 2.5, "x"]"#).unwrap();
        assert_eq!(
            parsed,
            vec![
                FilterValue::Boolean(true),
                FilterValue::Integer(3),
                FilterValue::Float(2.5),
                FilterValue::Text("x".to_string()),
            ]
        );
    }
}
