// Audit event types
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use sqlx::FromRow;
use utoipa::ToSchema;

pub const DEFAULT_STATUS: &str = "ok";
pub const DEFAULT_CATEGORY: &str = "handover";
pub const DEFAULT_RESOURCE_TYPE: &str = "DocumentReference";

/// Column widths of the `event_log` table
pub const MAX_ACTION_LEN: usize = 128;
pub const MAX_LABEL_LEN: usize = 64;
pub const MAX_RESOURCE_ID_LEN: usize = 256;

/// A stored audit event. Never updated or deleted once written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Event {
    /// Identifier generated by the store
    #[schema(example = 42)]
    pub id: i64,
    /// Insert time assigned by the store
    pub ts: DateTime<Utc>,
    #[schema(example = "ok")]
    pub status: String,
    #[schema(example = "handover")]
    pub category: String,
    #[schema(example = "DocumentReference")]
    pub resource_type: String,
    #[schema(example = "doc-42")]
    pub resource_id: Option<String>,
    #[schema(example = "view_document")]
    pub action: String,
    /// Opaque caller payload
    #[schema(value_type = Option<Object>)]
    pub data: Option<Value>,
}

/// Caller-supplied audit record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct AuditSubmission {
    #[schema(example = "view_document")]
    pub action: String,
    #[serde(default = "default_status")]
    #[schema(example = "ok")]
    pub status: String,
    #[serde(default = "default_category")]
    #[schema(example = "handover")]
    pub category: String,
    #[serde(default = "default_resource_type")]
    #[schema(example = "DocumentReference")]
    pub resource_type: String,
    #[serde(default)]
    #[schema(example = "doc-42")]
    pub resource_id: Option<String>,
    #[serde(default)]
    #[schema(value_type = Option<Object>)]
    pub data: Option<Map<String, Value>>,
}

fn default_status() -> String {
    DEFAULT_STATUS.to_string()
}

fn default_category() -> String {
    DEFAULT_CATEGORY.to_string()
}

fn default_resource_type() -> String {
    DEFAULT_RESOURCE_TYPE.to_string()
}

impl AuditSubmission {
    /// Submission with every optional field at its default
    pub fn new(action: impl Into<String>) -> Self {
        Self {
            action: action.into(),
            status: default_status(),
            category: default_category(),
            resource_type: default_resource_type(),
            resource_id: None,
            data: None,
        }
    }

    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = status.into();
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn with_resource_type(mut self, resource_type: impl Into<String>) -> Self {
        self.resource_type = resource_type.into();
        self
    }

    pub fn with_resource_id(mut self, resource_id: impl Into<String>) -> Self {
        self.resource_id = Some(resource_id.into());
        self
    }

    pub fn with_data(mut self, data: Map<String, Value>) -> Self {
        self.data = Some(data);
        self
    }
}

/// A validated submission ready to be inserted.
/// Obtained from an [`AuditSubmission`] through `TryFrom`, which runs validation.
#[derive(Debug, Clone, PartialEq)]
pub struct NewEvent {
    pub status: String,
    pub category: String,
    pub resource_type: String,
    pub resource_id: Option<String>,
    pub action: String,
    pub data: Option<Value>,
}
