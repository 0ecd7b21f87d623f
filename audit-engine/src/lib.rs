//! Audit trail engine for the NurseOS handover tool
//!
//! Records immutable audit events describing actions taken on clinical
//! resources (document references viewed or signed during a shift handover,
//! for example) and answers filtered, most-recent-first queries over them.
//!
//! # Components
//!
//! - [`AuditWriter`]: validates an [`AuditSubmission`], fills in defaults and
//!   persists it as exactly one [`Event`], or nothing at all
//! - [`QueryService`]: applies optional equality filters and a bounded limit,
//!   returning events newest first
//! - [`EventStore`]: the persistence seam; [`PgEventStore`] is the PostgreSQL
//!   implementation over the `event_log` table
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use audit_engine::{AuditSubmission, AuditWriter, EventQuery, PgEventStore, QueryLimits, QueryService};
//! use database_layer::{DatabasePool, PoolSettings};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let db = DatabasePool::connect(&PoolSettings::new("postgresql://localhost/nurseos")).await?;
//! let store = Arc::new(PgEventStore::new(db));
//!
//! let writer = AuditWriter::new(store.clone());
//! let event = writer
//!     .record(AuditSubmission::new("view_document").with_resource_id("doc-42"))
//!     .await?;
//!
//! let queries = QueryService::new(store, QueryLimits::default());
//! let recent = queries
//!     .list(EventQuery { resource_type: Some("DocumentReference".into()), limit: Some(1), ..Default::default() })
//!     .await?;
//! assert_eq!(recent[0].id, event.id);
//! # Ok(())
//! # }
//! ```

pub mod entry;
pub mod error;
pub mod search;
pub mod storage;
pub mod validation;
pub mod writer;

#[cfg(any(test, feature = "test-util"))]
pub mod testing;

pub use entry::*;
pub use error::*;
pub use search::*;
pub use storage::*;
pub use writer::*;
