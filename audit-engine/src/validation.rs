//! Structural validation of audit submissions
//!
//! Only shape is checked: required fields are present and non-blank and fit
//! their columns. Field meaning is never interpreted and the `data` payload
//! is never inspected.

use crate::entry::{AuditSubmission, NewEvent, MAX_ACTION_LEN, MAX_LABEL_LEN, MAX_RESOURCE_ID_LEN};
use crate::error::AuditError;
use serde_json::Value;

/// Trait for validating request payloads
pub trait RequestValidation {
    /// Returns `Ok(())` if validation passes, or `Err(AuditError::Validation)`
    /// naming the first offending field.
    fn validate(&self) -> Result<(), AuditError>;
}

macro_rules! validate_field {
    ($name:literal, $predicate:expr, $message:expr) => {
        if !$predicate {
            return Err(AuditError::validation($name, $message));
        }
    };
}

macro_rules! validate_required {
    ($name:literal, $field:expr) => {
        validate_field!($name, !$field.trim().is_empty(), "must not be blank");
    };
}

macro_rules! validate_max_len {
    ($name:literal, $field:expr, $max:expr) => {
        validate_field!(
            $name,
            $field.chars().count() <= $max,
            format!("must be at most {} characters", $max)
        );
    };
}

impl RequestValidation for AuditSubmission {
    fn validate(&self) -> Result<(), AuditError> {
        validate_required!("action", self.action);
        validate_max_len!("action", self.action, MAX_ACTION_LEN);
        validate_required!("status", self.status);
        validate_max_len!("status", self.status, MAX_LABEL_LEN);
        validate_required!("category", self.category);
        validate_max_len!("category", self.category, MAX_LABEL_LEN);
        validate_required!("resource_type", self.resource_type);
        validate_max_len!("resource_type", self.resource_type, MAX_LABEL_LEN);
        if let Some(resource_id) = &self.resource_id {
            validate_max_len!("resource_id", resource_id, MAX_RESOURCE_ID_LEN);
        }
        Ok(())
    }
}

impl TryFrom<AuditSubmission> for NewEvent {
    type Error = AuditError;

    fn try_from(submission: AuditSubmission) -> Result<Self, Self::Error> {
        submission.validate()?;
        Ok(NewEvent {
            status: submission.status,
            category: submission.category,
            resource_type: submission.resource_type,
            resource_id: submission.resource_id,
            action: submission.action,
            data: submission.data.map(Value::Object),
        })
    }
}
