//! Filter operators accepted by the criteria model.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::ValidationError;

/// Comparison applied by a single filter.
///
/// Only these tokens can ever enter a `Criteria`; anything else is rejected
/// by [`FilterOperator::from_value`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum FilterOperator {
    Equal,
    NotEqual,
    Gt,
    Lt,
    Contains,
    NotContains,
}

impl FilterOperator {
    /// Every supported operator, in declaration order.
    pub const ALL: [FilterOperator; 6] = [
        FilterOperator::Equal,
        FilterOperator::NotEqual,
        FilterOperator::Gt,
        FilterOperator::Lt,
        FilterOperator::Contains,
        FilterOperator::NotContains,
    ];

    /// Parses an operator token (`=`, `!=`, `>`, `<`, `CONTAINS`, `NOT_CONTAINS`).
    pub fn from_value(value: &str) -> Result<Self, ValidationError> {
        Self::ALL
            .into_iter()
            .find(|op| op.as_str() == value)
            .ok_or_else(|| ValidationError::invalid_value("filter operator", value))
    }

    /// Returns the wire token for this operator.
    pub fn as_str(&self) -> &'static str {
        match self {
            FilterOperator::Equal => "=",
            FilterOperator::NotEqual => "!=",
            FilterOperator::Gt => ">",
            FilterOperator::Lt => "<",
            FilterOperator::Contains => "CONTAINS",
            FilterOperator::NotContains => "NOT_CONTAINS",
        }
    }

    /// False for the negated operators (`!=`, `NOT_CONTAINS`).
    pub fn is_positive(&self) -> bool {
        !matches!(self, FilterOperator::NotEqual | FilterOperator::NotContains)
    }
}

impl fmt::Display for FilterOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FilterOperator {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_value(s)
    }
}

impl TryFrom<String> for FilterOperator {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_value(&value)
    }
}

impl From<FilterOperator> for String {
    fn from(op: FilterOperator) -> Self {
        op.as_str().to_string()
    }
}
