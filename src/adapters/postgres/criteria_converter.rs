//! Criteria to parameterized PostgreSQL query translation.
//!
//! Produces `WHERE / ORDER BY / OFFSET / LIMIT` clauses with every filter
//! value bound as a parameter. Column names cannot be bound, so they are
//! validated as plain identifiers and double-quoted.

use sqlx::{Postgres, QueryBuilder};

use crate::domain::criteria::{Criteria, Filter, FilterOperator, FilterValue, Order};
use crate::domain::foundation::{DomainError, ErrorCode, ValidationError};
use crate::ports::CriteriaConverter;

/// One column predicate.
#[derive(Debug, Clone, PartialEq)]
pub struct PostgresPredicate {
    pub column: String,
    pub operator: FilterOperator,
    pub value: FilterValue,
}

/// Sort column and direction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostgresSort {
    pub column: String,
    pub ascending: bool,
}

/// `{predicate, sort, skip, limit}` for a PostgreSQL table.
///
/// A `limit` of `0` means no limit.
#[derive(Debug, Clone, PartialEq)]
pub struct PostgresQuery {
    pub predicates: Vec<PostgresPredicate>,
    pub sort: Option<PostgresSort>,
    pub skip: u64,
    pub limit: u64,
}

impl PostgresQuery {
    /// Builds `SELECT row_to_json(t) FROM (SELECT * FROM <table> ...) t`,
    /// yielding each row as one JSON document.
    pub fn to_select(&self, table: &str) -> Result<QueryBuilder<'static, Postgres>, DomainError> {
        let mut builder = QueryBuilder::new("SELECT row_to_json(t) AS document FROM (SELECT * FROM ");
        builder.push(quote_table(table)?);

        for (i, predicate) in self.predicates.iter().enumerate() {
            builder.push(if i == 0 { " WHERE " } else { " AND " });
            push_predicate(&mut builder, predicate);
        }

        if let Some(sort) = &self.sort {
            builder.push(" ORDER BY ");
            builder.push(quote_identifier(&sort.column));
            builder.push(if sort.ascending { " ASC" } else { " DESC" });
        }

        if self.skip > 0 {
            builder.push(" OFFSET ");
            builder.push_bind(to_bigint(self.skip));
        }
        if self.limit > 0 {
            builder.push(" LIMIT ");
            builder.push_bind(to_bigint(self.limit));
        }

        builder.push(") t");
        Ok(builder)
    }
}

/// Translates criteria into [`PostgresQuery`].
///
/// Predicates are merged per column; a later filter on a column replaces
/// the earlier one in place.
#[derive(Debug, Default, Clone)]
pub struct PostgresCriteriaConverter;

impl PostgresCriteriaConverter {
    pub fn new() -> Self {
        Self
    }

    fn predicate(&self, filter: &Filter) -> Result<PostgresPredicate, DomainError> {
        Ok(PostgresPredicate {
            column: validate_identifier(filter.field().as_str())?,
            operator: filter.operator(),
            value: filter.value().clone(),
        })
    }

    fn sort(&self, order: &Order) -> Result<Option<PostgresSort>, DomainError> {
        if !order.has_order() {
            return Ok(None);
        }
        Ok(Some(PostgresSort {
            column: validate_identifier(order.order_by())?,
            ascending: order.order_type().is_asc(),
        }))
    }
}

impl CriteriaConverter for PostgresCriteriaConverter {
    type Query = PostgresQuery;

    fn convert(&self, criteria: &Criteria) -> Result<PostgresQuery, DomainError> {
        let mut predicates: Vec<PostgresPredicate> = Vec::new();
        for filter in criteria.filters() {
            let predicate = self.predicate(filter)?;
            match predicates.iter_mut().find(|p| p.column == predicate.column) {
                Some(existing) => {
                    tracing::debug!(column = %predicate.column, "Later filter replaces earlier filter on column");
                    *existing = predicate;
                }
                None => predicates.push(predicate),
            }
        }

        Ok(PostgresQuery {
            predicates,
            sort: self.sort(criteria.order())?,
            skip: criteria.offset().unwrap_or(0),
            limit: criteria.limit().unwrap_or(0),
        })
    }
}

fn push_predicate(builder: &mut QueryBuilder<'static, Postgres>, predicate: &PostgresPredicate) {
    let column = quote_identifier(&predicate.column);
    match predicate.operator {
        FilterOperator::Equal | FilterOperator::NotEqual | FilterOperator::Gt | FilterOperator::Lt => {
            builder.push(column);
            builder.push(match predicate.operator {
                FilterOperator::Equal => " = ",
                FilterOperator::NotEqual => " <> ",
                FilterOperator::Gt => " > ",
                _ => " < ",
            });
            push_value(builder, &predicate.value);
        }
        FilterOperator::Contains | FilterOperator::NotContains => {
            builder.push("position(");
            builder.push_bind(predicate.value.to_string());
            builder.push(" in ");
            builder.push(column);
            builder.push(if predicate.operator.is_positive() {
                "::text) > 0"
            } else {
                "::text) = 0"
            });
        }
    }
}

fn push_value(builder: &mut QueryBuilder<'static, Postgres>, value: &FilterValue) {
    match value {
        FilterValue::Boolean(b) => builder.push_bind(*b),
        FilterValue::Integer(i) => builder.push_bind(*i),
        FilterValue::Float(f) => builder.push_bind(*f),
        FilterValue::Text(s) => builder.push_bind(s.clone()),
    };
}

fn to_bigint(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

/// Accepts `[A-Za-z_][A-Za-z0-9_]*`.
pub(crate) fn validate_identifier(name: &str) -> Result<String, DomainError> {
    let mut chars = name.chars();
    let valid_start = chars
        .next()
        .map_or(false, |c| c.is_ascii_alphabetic() || c == '_');
    if valid_start && chars.all(|c| c.is_ascii_alphanumeric() || c == '_') {
        Ok(name.to_string())
    } else {
        Err(ValidationError::invalid_format(name, "not a valid SQL identifier").into())
    }
}

pub(crate) fn quote_identifier(name: &str) -> String {
    format!("\"{}\"", name)
}

/// Quotes `table` or `schema.table` after validating each part.
pub(crate) fn quote_table(table: &str) -> Result<String, DomainError> {
    let parts = table
        .split('.')
        .map(|part| validate_identifier(part).map(|p| quote_identifier(&p)))
        .collect::<Result<Vec<_>, _>>()?;
    if parts.len() > 2 {
        return Err(DomainError::new(
            ErrorCode::InvalidArgument,
            format!("Table name <{}> has too many parts", table),
        ));
    }
    Ok(parts.join("."))
}
