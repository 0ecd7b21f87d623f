// Transaction management
use crate::connection::DatabasePool;
use crate::error::{DatabaseError, DatabaseResult};
use sqlx::{Postgres, Transaction};
use tracing::{debug, warn};

/// Owned PostgreSQL transaction. Dropping it without committing rolls it back
/// and returns the connection to the pool.
pub type PgTransaction = Transaction<'static, Postgres>;

/// Transaction manager handing out one transaction per unit of work
#[derive(Clone, Debug)]
pub struct TransactionManager {
    pool: DatabasePool,
}

impl TransactionManager {
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }

    /// Begin a new transaction
    pub async fn begin(&self) -> DatabaseResult<PgTransaction> {
        debug!("Beginning transaction");

        self.pool
            .pool()
            .begin()
            .await
            .map_err(|e| DatabaseError::TransactionFailed(format!("Failed to begin transaction: {e}")))
    }

    /// Commit a transaction
    pub async fn commit(tx: PgTransaction) -> DatabaseResult<()> {
        tx.commit()
            .await
            .map_err(|e| DatabaseError::TransactionFailed(format!("Failed to commit transaction: {e}")))?;
        debug!("Transaction committed");
        Ok(())
    }

    /// Roll a transaction back explicitly, logging the cause that triggered it.
    /// A failed rollback is logged only; the connection is discarded by the pool.
    pub async fn rollback(tx: PgTransaction, cause: &str) {
        match tx.rollback().await {
            Ok(()) => warn!(cause = cause, "Transaction rolled back"),
            Err(e) => warn!(cause = cause, error = %e, "Transaction rollback failed"),
        }
    }

    pub fn pool(&self) -> &DatabasePool {
        &self.pool
    }
}
