//! Query builder for filtered, ordered and limited reads
//!
//! Equality filters are optional: a `None` value adds nothing to the query,
//! so handlers can pass request parameters straight through. All values are
//! bound as parameters; only column names (which are never user input) are
//! pushed into the SQL text.

use sqlx::postgres::{PgArguments, PgRow};
use sqlx::query::QueryAs;
use sqlx::{Postgres, QueryBuilder};

/// Sort direction for `ORDER BY`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    fn as_sql(self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

/// Filtered query builder
///
/// Example usage:
/// ```rust
/// use database_layer::{FilteredQuery, SortDirection};
///
/// let mut query = FilteredQuery::new("SELECT * FROM event_log");
/// query
///     .filter_eq("status", Some("ok"))
///     .filter_eq("category", None::<&str>)
///     .order_by(&[("ts", SortDirection::Desc), ("id", SortDirection::Desc)])
///     .limit(10);
///
/// assert_eq!(
///     query.sql(),
///     "SELECT * FROM event_log WHERE status = $1 ORDER BY ts DESC, id DESC LIMIT $2"
/// );
/// ```
pub struct FilteredQuery<'a> {
    query: QueryBuilder<'a, Postgres>,
    filter_count: usize,
    limit: Option<i64>,
}

impl<'a> FilteredQuery<'a> {
    /// Create a new builder from a base `SELECT` without a `WHERE` clause
    pub fn new(base_query: impl Into<String>) -> Self {
        Self {
            query: QueryBuilder::new(base_query),
            filter_count: 0,
            limit: None,
        }
    }

    /// Add an equality filter (only if value is Some)
    pub fn filter_eq<T>(&mut self, column: &str, value: Option<T>) -> &mut Self
    where
        T: 'a + sqlx::Encode<'a, Postgres> + sqlx::Type<Postgres> + Send,
    {
        if let Some(val) = value {
            let joiner = if self.filter_count == 0 { " WHERE " } else { " AND " };
            self.query.push(joiner);
            self.query.push(column);
            self.query.push(" = ");
            self.query.push_bind(val);
            self.filter_count += 1;
        }
        self
    }

    /// Add ORDER BY clause with one or more sort keys
    pub fn order_by(&mut self, keys: &[(&str, SortDirection)]) -> &mut Self {
        for (position, (column, direction)) in keys.iter().enumerate() {
            self.query.push(if position == 0 { " ORDER BY " } else { ", " });
            self.query.push(column);
            self.query.push(" ");
            self.query.push(direction.as_sql());
        }
        self
    }

    /// Add LIMIT clause
    pub fn limit(&mut self, limit: i64) -> &mut Self {
        self.limit = Some(limit);
        self.query.push(" LIMIT ");
        self.query.push_bind(limit);
        self
    }

    /// Build the final query as a typed query for fetching specific types
    pub fn build_query_as<T>(&mut self) -> QueryAs<'_, Postgres, T, PgArguments>
    where
        T: for<'r> sqlx::FromRow<'r, PgRow>,
    {
        self.query.build_query_as()
    }

    /// The SQL text built so far
    pub fn sql(&self) -> &str {
        self.query.sql()
    }

    /// Number of equality filters applied
    pub fn filter_count(&self) -> usize {
        self.filter_count
    }

    /// Limit applied, if any
    pub fn applied_limit(&self) -> Option<i64> {
        self.limit
    }
}
