//! In-memory [`EventStore`] for tests
//!
//! Follows the PostgreSQL store's contract: ids and timestamps are assigned on
//! insert, reads are `ts` then `id` descending, and an injected failure leaves
//! the stored events untouched.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use chrono::Utc;
use database_layer::DatabaseError;

use crate::entry::{AuditSubmission, Event, NewEvent};
use crate::error::{AuditError, Result};
use crate::search::EventFilter;
use crate::storage::EventStore;

#[derive(Debug, Default)]
pub struct MemoryEventStore {
    events: Mutex<Vec<Event>>,
    fail_inserts: AtomicBool,
    fail_reads: AtomicBool,
}

impl MemoryEventStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every following insert fail as a rejected statement would
    pub fn fail_inserts(&self, fail: bool) {
        self.fail_inserts.store(fail, Ordering::SeqCst);
    }

    /// Make every following read fail as an unreachable store would
    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    /// Insert a submission directly, bypassing failure injection
    ///
    /// # Panics
    ///
    /// Panics if the submission does not validate.
    #[allow(clippy::panic)]
    pub fn seed(&self, submission: AuditSubmission) -> Event {
        let new_event = match NewEvent::try_from(submission) {
            Ok(event) => event,
            Err(err) => panic!("seed submission must be valid: {err}"),
        };
        self.push(new_event)
    }

    pub fn len(&self) -> usize {
        self.events().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn events(&self) -> MutexGuard<'_, Vec<Event>> {
        self.events.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn push(&self, event: NewEvent) -> Event {
        let mut events = self.events();
        let last_ts = events.last().map(|e| e.ts);
        let ts = match last_ts {
            Some(last) if last > Utc::now() => last,
            _ => Utc::now(),
        };
        let stored = Event {
            id: i64::try_from(events.len()).unwrap_or(i64::MAX - 1) + 1,
            ts,
            status: event.status,
            category: event.category,
            resource_type: event.resource_type,
            resource_id: event.resource_id,
            action: event.action,
            data: event.data,
        };
        events.push(stored.clone());
        stored
    }
}

#[async_trait]
impl EventStore for MemoryEventStore {
    async fn list_events(&self, filter: &EventFilter) -> Result<Vec<Event>> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(AuditError::Store(DatabaseError::ConnectionFailed(
                "connection refused".into(),
            )));
        }

        let mut matching: Vec<Event> = self
            .events()
            .iter()
            .filter(|event| filter.matches(event))
            .cloned()
            .collect();
        matching.sort_by(|a, b| b.ts.cmp(&a.ts).then(b.id.cmp(&a.id)));
        matching.truncate(usize::try_from(filter.limit).unwrap_or(0));
        Ok(matching)
    }

    async fn insert_event(&self, event: NewEvent) -> Result<Event> {
        if self.fail_inserts.load(Ordering::SeqCst) {
            return Err(AuditError::InsertFailed(
                "value too long for type character varying(128)".into(),
            ));
        }
        Ok(self.push(event))
    }
}
