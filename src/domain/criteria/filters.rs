//! Ordered filter sequence.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::Filter;
use crate::domain::foundation::ValidationError;

/// Ordered sequence of filters. The empty sequence means "no filtering".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Filters(Vec<Filter>);

impl Filters {
    pub fn new(filters: Vec<Filter>) -> Self {
        Self(filters)
    }

    /// Canonical neutral value.
    pub fn none() -> Self {
        Self(Vec::new())
    }

    /// Builds filters from their primitive form, failing on the first invalid entry.
    pub fn from_values(values: &[HashMap<String, String>]) -> Result<Self, ValidationError> {
        values
            .iter()
            .map(Filter::from_values)
            .collect::<Result<Vec<_>, _>>()
            .map(Self)
    }

    /// Returns a new sequence with `filter` appended.
    pub fn and(&self, filter: Filter) -> Self {
        let mut filters = self.0.clone();
        filters.push(filter);
        Self(filters)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Filter> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'a> IntoIterator for &'a Filters {
    type Item = &'a Filter;
    type IntoIter = std::slice::Iter<'a, Filter>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
