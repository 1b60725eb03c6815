//! Ordering of query results.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::ValidationError;

/// Sort direction. `None` means the storage layer may return rows in any order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderType {
    Asc,
    Desc,
    None,
}

impl OrderType {
    /// Parses `asc`, `desc` or `none`.
    pub fn from_value(value: &str) -> Result<Self, ValidationError> {
        match value {
            "asc" => Ok(OrderType::Asc),
            "desc" => Ok(OrderType::Desc),
            "none" => Ok(OrderType::None),
            other => Err(ValidationError::invalid_value("order type", other)),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderType::Asc => "asc",
            OrderType::Desc => "desc",
            OrderType::None => "none",
        }
    }

    pub fn is_asc(&self) -> bool {
        *self == OrderType::Asc
    }

    pub fn is_none(&self) -> bool {
        *self == OrderType::None
    }
}

impl fmt::Display for OrderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `{ order_by, order_type }`. `order_by` is empty exactly when there is no ordering.
///
/// Deserialization goes through [`Order::new`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "OrderPrimitives")]
pub struct Order {
    order_by: String,
    order_type: OrderType,
}

/// Unvalidated wire form of [`Order`].
#[derive(Deserialize)]
struct OrderPrimitives {
    #[serde(default)]
    order_by: String,
    order_type: OrderType,
}

impl TryFrom<OrderPrimitives> for Order {
    type Error = ValidationError;

    fn try_from(value: OrderPrimitives) -> Result<Self, Self::Error> {
        Self::new(value.order_by, value.order_type)
    }
}

impl Order {
    /// Canonical neutral value.
    pub fn none() -> Self {
        Self {
            order_by: String::new(),
            order_type: OrderType::None,
        }
    }

    pub fn asc(order_by: impl Into<String>) -> Result<Self, ValidationError> {
        Self::new(order_by, OrderType::Asc)
    }

    pub fn desc(order_by: impl Into<String>) -> Result<Self, ValidationError> {
        Self::new(order_by, OrderType::Desc)
    }

    /// Creates an ordering; a real direction requires a non-empty field.
    pub fn new(order_by: impl Into<String>, order_type: OrderType) -> Result<Self, ValidationError> {
        if order_type.is_none() {
            return Ok(Self::none());
        }
        let order_by = order_by.into();
        if order_by.trim().is_empty() {
            return Err(ValidationError::empty_field("orderBy"));
        }
        Ok(Self {
            order_by,
            order_type,
        })
    }

    /// Builds an ordering from optional primitives. A missing field means no ordering;
    /// a missing direction defaults to `none`.
    pub fn from_values(
        order_by: Option<&str>,
        order_type: Option<&str>,
    ) -> Result<Self, ValidationError> {
        match order_by.filter(|field| !field.is_empty()) {
            None => Ok(Self::none()),
            Some(field) => {
                let order_type = OrderType::from_value(order_type.unwrap_or("none"))?;
                Self::new(field, order_type)
            }
        }
    }

    pub fn order_by(&self) -> &str {
        &self.order_by
    }

    pub fn order_type(&self) -> OrderType {
        self.order_type
    }

    pub fn has_order(&self) -> bool {
        !self.order_type.is_none()
    }
}

impl Default for Order {
    fn default() -> Self {
        Self::none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn none_has_no_order_and_empty_field() {
        let order = Order::none();
        assert!(!order.has_order());
        assert_eq!(order.order_by(), "");
    }

    #[test]
    fn asc_and_desc_have_order() {
        assert!(Order::asc("name").unwrap().has_order());
        assert!(Order::desc("name").unwrap().order_type() == OrderType::Desc);
    }

    #[test]
    fn explicit_none_direction_discards_field() {
        let order = Order::new("name", OrderType::None).unwrap();
        assert_eq!(order, Order::none());
    }

    #[test]
    fn direction_without_field_is_rejected() {
        assert_eq!(Order::asc("").unwrap_err(), ValidationError::empty_field("orderBy"));
    }

    #[test]
    fn from_values_without_field_is_none() {
        assert_eq!(Order::from_values(None, Some("asc")).unwrap(), Order::none());
        assert_eq!(Order::from_values(Some(""), Some("desc")).unwrap(), Order::none());
    }

    #[test]
    fn from_values_defaults_direction_to_none() {
        assert!(!Order::from_values(Some("name"), None).unwrap().has_order());
    }

    #[test]
    fn from_values_rejects_unknown_direction() {
        assert!(Order::from_values(Some("name"), Some("up")).is_err());
    }

    #[test]
    fn deserialization_rejects_direction_without_field() {
        let err = serde_json::from_str::<Order>(r#"{"order_by":"","order_type":"asc"}"#);
        assert!(err.is_err());
    }

    #[test]
    fn deserialization_normalizes_undirected_order() {
        let order: Order =
            serde_json::from_str(r#"{"order_by":"name","order_type":"none"}"#).unwrap();
        assert_eq!(order, Order::none());

        let order: Order =
            serde_json::from_str(r#"{"order_by":"name","order_type":"desc"}"#).unwrap();
        assert_eq!(order, Order::desc("name").unwrap());
    }

    #[test]
    fn from_values_builds_directed_order() {
        let order = Order::from_values(Some("createdAt"), Some("desc")).unwrap();
        assert_eq!(order.order_by(), "createdAt");
        assert_eq!(order.order_type(), OrderType::Desc);
    }
}
