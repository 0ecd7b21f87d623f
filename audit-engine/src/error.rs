use database_layer::DatabaseError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AuditError {
    #[error("{field}: {message}")]
    Validation {
        field: &'static str,
        message: String,
    },

    #[error("audit insert failed: {0}")]
    InsertFailed(String),

    #[error("event store error: {0}")]
    Store(#[from] DatabaseError),
}

impl AuditError {
    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        Self::Validation {
            field,
            message: message.into(),
        }
    }

    /// Whether the event store could not be reached
    pub fn is_store_unavailable(&self) -> bool {
        matches!(self, AuditError::Store(db) if db.is_unavailable())
    }
}

pub type Result<T> = std::result::Result<T, AuditError>;
