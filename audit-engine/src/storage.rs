// Event store seam and its PostgreSQL implementation
use async_trait::async_trait;
use database_layer::{DatabaseError, DatabasePool, FilteredQuery, SortDirection, TransactionManager};
use tracing::debug;

use crate::entry::{Event, NewEvent};
use crate::error::{AuditError, Result};
use crate::search::EventFilter;

/// Persistence for audit events. Events can be inserted and listed; there is
/// no update or delete.
#[async_trait]
pub trait EventStore: Send + Sync {
    /// Events matching every filter, `ts` descending, at most `filter.limit`
    async fn list_events(&self, filter: &EventFilter) -> Result<Vec<Event>>;

    /// Insert one event atomically, returning it with its generated `id` and `ts`.
    /// On failure nothing is written and [`AuditError::InsertFailed`] carries the cause.
    async fn insert_event(&self, event: NewEvent) -> Result<Event>;
}

const SELECT_EVENTS: &str =
    "SELECT id, ts, status, category, resource_type, resource_id, action, data FROM event_log";

const INSERT_EVENT: &str = r#"
    INSERT INTO event_log (status, category, resource_type, resource_id, action, data)
    VALUES ($1, $2, $3, $4, $5, $6)
    RETURNING id, ts, status, category, resource_type, resource_id, action, data
"#;

/// Build the read for a filter. Same-timestamp events fall back to newest id first.
pub fn build_list_query(filter: &EventFilter) -> FilteredQuery<'_> {
    let mut query = FilteredQuery::new(SELECT_EVENTS);
    query
        .filter_eq("status", filter.status.as_deref())
        .filter_eq("category", filter.category.as_deref())
        .filter_eq("resource_type", filter.resource_type.as_deref())
        .order_by(&[("ts", SortDirection::Desc), ("id", SortDirection::Desc)])
        .limit(filter.limit);
    query
}

/// PostgreSQL-backed event store over the `event_log` table
#[derive(Clone, Debug)]
pub struct PgEventStore {
    transactions: TransactionManager,
}

impl PgEventStore {
    pub fn new(db: DatabasePool) -> Self {
        Self {
            transactions: TransactionManager::new(db),
        }
    }

    pub fn database(&self) -> &DatabasePool {
        self.transactions.pool()
    }
}

#[async_trait]
impl EventStore for PgEventStore {
    async fn list_events(&self, filter: &EventFilter) -> Result<Vec<Event>> {
        let mut query = build_list_query(filter);
        debug!(sql = query.sql(), "Fetching audit events");

        let events = query
            .build_query_as::<Event>()
            .fetch_all(self.database().pool())
            .await
            .map_err(DatabaseError::from)?;

        Ok(events)
    }

    async fn insert_event(&self, event: NewEvent) -> Result<Event> {
        let mut tx = self
            .transactions
            .begin()
            .await
            .map_err(|e| AuditError::InsertFailed(e.to_string()))?;

        let NewEvent {
            status,
            category,
            resource_type,
            resource_id,
            action,
            data,
        } = event;

        let inserted = sqlx::query_as::<_, Event>(INSERT_EVENT)
            .bind(status)
            .bind(category)
            .bind(resource_type)
            .bind(resource_id)
            .bind(action)
            .bind(data)
            .fetch_one(&mut *tx)
            .await;

        match inserted {
            Ok(row) => {
                TransactionManager::commit(tx)
                    .await
                    .map_err(|e| AuditError::InsertFailed(e.to_string()))?;
                Ok(row)
            }
            Err(e) => {
                let cause = e.to_string();
                TransactionManager::rollback(tx, &cause).await;
                Err(AuditError::InsertFailed(cause))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unfiltered_read() {
        let filter = EventFilter {
            status: None,
            category: None,
            resource_type: None,
            limit: 100,
        };
        let query = build_list_query(&filter);
        assert_eq!(
            query.sql(),
            format!("{SELECT_EVENTS} ORDER BY ts DESC, id DESC LIMIT $1")
        );
    }

    #[test]
    fn test_filtered_read() {
        let filter = EventFilter {
            status: Some("ok".into()),
            category: None,
            resource_type: Some("DocumentReference".into()),
            limit: 1,
        };
        let query = build_list_query(&filter);
        assert_eq!(
            query.sql(),
            format!(
                "{SELECT_EVENTS} WHERE status = $1 AND resource_type = $2 \
                 ORDER BY ts DESC, id DESC LIMIT $3"
            )
        );
        assert_eq!(query.filter_count(), 2);
        assert_eq!(query.applied_limit(), Some(1));
    }
}
