// Idempotent bootstrap of the event log table
use crate::connection::DatabasePool;
use crate::error::{DatabaseError, DatabaseResult};
use tracing::{debug, info};

pub const EVENT_LOG_TABLE: &str = "event_log";

/// Statements creating the event log table and its read indexes.
/// Every statement is safe to run against an already bootstrapped database.
pub const EVENT_LOG_DDL: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS event_log (
        id            BIGSERIAL PRIMARY KEY,
        ts            TIMESTAMPTZ NOT NULL DEFAULT now(),
        status        VARCHAR(64) NOT NULL DEFAULT 'ok',
        category      VARCHAR(64) NOT NULL DEFAULT 'handover',
        resource_type VARCHAR(64) NOT NULL DEFAULT 'DocumentReference',
        resource_id   VARCHAR(256),
        action        VARCHAR(128) NOT NULL,
        data          JSONB
    )
    "#,
    "CREATE INDEX IF NOT EXISTS event_log_ts_idx ON event_log (ts DESC, id DESC)",
    "CREATE INDEX IF NOT EXISTS event_log_status_idx ON event_log (status)",
    "CREATE INDEX IF NOT EXISTS event_log_category_idx ON event_log (category)",
    "CREATE INDEX IF NOT EXISTS event_log_resource_type_idx ON event_log (resource_type)",
];

/// Create the event log table and indexes if they do not exist yet
pub async fn ensure_event_log_schema(db: &DatabasePool) -> DatabaseResult<()> {
    for statement in EVENT_LOG_DDL {
        debug!(statement = statement.trim(), "Applying schema statement");
        sqlx::query(statement)
            .execute(db.pool())
            .await
            .map_err(|e| DatabaseError::SchemaError(e.to_string()))?;
    }

    info!(table = EVENT_LOG_TABLE, "Event log schema is up to date");
    Ok(())
}
