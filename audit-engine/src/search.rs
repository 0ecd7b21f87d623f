// Filtered reads over the audit trail
use std::sync::Arc;

use serde::Deserialize;
use tracing::debug;
use utoipa::IntoParams;

use crate::entry::Event;
use crate::error::Result;
use crate::storage::EventStore;

pub const DEFAULT_LIMIT: i64 = 100;
pub const MAX_LIMIT: i64 = 1000;

/// Bounds applied to the caller-supplied `limit`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct QueryLimits {
    /// Limit used when the caller supplies none
    pub default_limit: i64,
    /// Largest number of events a single read may return
    pub max_limit: i64,
}

impl Default for QueryLimits {
    fn default() -> Self {
        Self {
            default_limit: DEFAULT_LIMIT,
            max_limit: MAX_LIMIT,
        }
    }
}

impl QueryLimits {
    /// Resolve a requested limit to the number of rows actually fetched
    pub fn resolve(&self, requested: Option<i64>) -> i64 {
        requested
            .unwrap_or(self.default_limit)
            .clamp(0, self.max_limit.max(0))
    }
}

/// Raw read parameters as received from the caller
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct EventQuery {
    /// Exact match on `status`
    pub status: Option<String>,
    /// Exact match on `category`
    pub category: Option<String>,
    /// Exact match on `resource_type`
    pub resource_type: Option<String>,
    /// Maximum number of events to return (default 100)
    pub limit: Option<i64>,
}

/// Normalised read: empty filter values are dropped and the limit is bounded
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventFilter {
    pub status: Option<String>,
    pub category: Option<String>,
    pub resource_type: Option<String>,
    pub limit: i64,
}

impl EventFilter {
    pub fn from_query(query: EventQuery, limits: QueryLimits) -> Self {
        Self {
            status: non_empty(query.status),
            category: non_empty(query.category),
            resource_type: non_empty(query.resource_type),
            limit: limits.resolve(query.limit),
        }
    }

    /// Whether an event satisfies every supplied filter
    pub fn matches(&self, event: &Event) -> bool {
        fn eq(filter: Option<&String>, value: &str) -> bool {
            filter.map_or(true, |expected| expected == value)
        }

        eq(self.status.as_ref(), &event.status)
            && eq(self.category.as_ref(), &event.category)
            && eq(self.resource_type.as_ref(), &event.resource_type)
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// Read side of the audit trail: newest events first, filtered and bounded
#[derive(Clone)]
pub struct QueryService {
    store: Arc<dyn EventStore>,
    limits: QueryLimits,
}

impl QueryService {
    pub fn new(store: Arc<dyn EventStore>, limits: QueryLimits) -> Self {
        Self { store, limits }
    }

    /// List events matching the query, ordered by `ts` descending
    ///
    /// # Errors
    ///
    /// Returns [`crate::AuditError::Store`] when the event store fails; no
    /// partial result is ever returned.
    pub async fn list(&self, query: EventQuery) -> Result<Vec<Event>> {
        let filter = EventFilter::from_query(query, self.limits);
        debug!(
            status = ?filter.status,
            category = ?filter.category,
            resource_type = ?filter.resource_type,
            limit = filter.limit,
            "Listing audit events"
        );
        self.store.list_events(&filter).await
    }
}
