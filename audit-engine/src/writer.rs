// Write side of the audit trail
use std::sync::Arc;

use tracing::{info, warn};

use crate::entry::{AuditSubmission, Event, NewEvent};
use crate::error::{AuditError, Result};
use crate::storage::EventStore;

/// Validates audit submissions and persists each one as a single event
#[derive(Clone)]
pub struct AuditWriter {
    store: Arc<dyn EventStore>,
}

impl AuditWriter {
    pub fn new(store: Arc<dyn EventStore>) -> Self {
        Self { store }
    }

    /// Record one submission
    ///
    /// # Errors
    ///
    /// [`AuditError::Validation`] when the submission is malformed (nothing is
    /// written), [`AuditError::InsertFailed`] when the store rejects or cannot
    /// take the write (the transaction is rolled back).
    pub async fn record(&self, submission: AuditSubmission) -> Result<Event> {
        let new_event = NewEvent::try_from(submission)?;
        let action = new_event.action.clone();

        match self.store.insert_event(new_event).await {
            Ok(event) => {
                info!(
                    event_id = event.id,
                    action = %event.action,
                    category = %event.category,
                    "Audit event recorded"
                );
                Ok(event)
            }
            Err(err) => {
                warn!(action = %action, error = %err, "Audit event not recorded");
                Err(match err {
                    AuditError::Store(db) => AuditError::InsertFailed(db.to_string()),
                    other => other,
                })
            }
        }
    }
}
