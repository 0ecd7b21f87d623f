//! Database layer for the NurseOS events API
//!
//! Wraps the PostgreSQL connection pool used by the event store and provides
//! the few pieces of SQL plumbing the store needs:
//!
//! - **Connection Management**: pooled connections with bounded acquire time
//! - **Schema Bootstrap**: idempotent creation of the `event_log` table
//! - **Transactions**: explicit commit/rollback with logging
//! - **Query Building**: optional equality filters, ordering and limits with
//!   every value bound as a parameter
//!
//! # Example
//!
//! ```rust,no_run
//! use database_layer::{DatabasePool, PoolSettings, schema};
//!
//! # async fn run() -> database_layer::DatabaseResult<()> {
//! let db = DatabasePool::connect(&PoolSettings::new("postgresql://localhost/nurseos")).await?;
//! schema::ensure_event_log_schema(&db).await?;
//! # Ok(())
//! # }
//! ```

pub mod connection;
pub mod error;
pub mod query;
pub mod schema;
pub mod transaction;

pub use connection::*;
pub use error::*;
pub use query::*;
pub use transaction::*;
