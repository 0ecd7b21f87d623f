use std::sync::Arc;

use audit_engine::{AuditWriter, EventStore, PgEventStore, QueryService};
use database_layer::{schema, DatabasePool};
use error_common::{NurseOsError, Result};

use crate::config::ServerConfig;

/// Main NurseOS server state shared by every handler
#[derive(Clone)]
pub struct NurseOsServer {
    /// Server configuration
    pub config: Arc<ServerConfig>,
    /// Read side of the audit trail
    pub query_service: QueryService,
    /// Write side of the audit trail
    pub audit_writer: AuditWriter,
}

impl NurseOsServer {
    /// Connect to PostgreSQL and build the server state
    ///
    /// # Errors
    ///
    /// Fails when the database cannot be reached or the schema bootstrap fails.
    pub async fn new(config: ServerConfig) -> Result<Self> {
        let db = DatabasePool::connect(&config.database.pool)
            .await
            .map_err(|e| NurseOsError::DatabaseError(e.to_string()))?;

        if config.database.bootstrap_schema {
            schema::ensure_event_log_schema(&db)
                .await
                .map_err(|e| NurseOsError::DatabaseError(e.to_string()))?;
        } else {
            tracing::info!("Schema bootstrap disabled; expecting event_log to exist");
        }

        Ok(Self::with_store(config, Arc::new(PgEventStore::new(db))))
    }

    /// Build the server state over any event store
    /// This is useful for testing
    pub fn with_store(config: ServerConfig, store: Arc<dyn EventStore>) -> Self {
        let query_service = QueryService::new(store.clone(), config.events);
        let audit_writer = AuditWriter::new(store);

        Self {
            config: Arc::new(config),
            query_service,
            audit_writer,
        }
    }

    /// Get server configuration
    pub fn get_config(&self) -> &ServerConfig {
        &self.config
    }
}

impl std::fmt::Debug for NurseOsServer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NurseOsServer")
            .field("server", &self.config.server)
            .field("events", &self.config.events)
            .finish_non_exhaustive()
    }
}
