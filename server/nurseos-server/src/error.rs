use audit_engine::AuditError;
use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use error_common::codes;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{error, warn};
use utoipa::ToSchema;
use uuid::Uuid;

/// Standard API error response structure
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiErrorResponse {
    /// Unique error ID for tracking
    pub error_id: String,
    /// Error type
    #[schema(example = "audit_insert_failed")]
    pub error_type: String,
    /// Stable error code
    #[schema(example = "AUDIT_2001")]
    pub code: String,
    /// Human-readable cause
    #[schema(example = "audit insert failed: value too long for type character varying(128)")]
    pub detail: String,
    /// Timestamp when error occurred
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Main API error enum
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{message}")]
    Validation { message: String, code: &'static str },

    #[error("{message}")]
    UnprocessableEntity { message: String },

    #[error("{0}")]
    AuditInsertFailed(String),

    #[error("Event store unavailable: {message}")]
    ServiceUnavailable { message: String },

    #[error("Resource not found: {path}")]
    NotFound { path: String },

    #[error("Internal server error: {message}")]
    Internal { message: String },
}

impl ApiError {
    /// Create a simple validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
            code: codes::validation::INVALID_INPUT,
        }
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation { .. } | ApiError::AuditInsertFailed(_) => StatusCode::BAD_REQUEST,
            ApiError::UnprocessableEntity { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::ServiceUnavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::NotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error type string
    pub fn error_type(&self) -> &'static str {
        match self {
            ApiError::Validation { .. } => "validation_error",
            ApiError::UnprocessableEntity { .. } => "unprocessable_entity",
            ApiError::AuditInsertFailed(_) => "audit_insert_failed",
            ApiError::ServiceUnavailable { .. } => "service_unavailable",
            ApiError::NotFound { .. } => "not_found",
            ApiError::Internal { .. } => "internal_error",
        }
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        match self {
            ApiError::Validation { code, .. } => *code,
            ApiError::UnprocessableEntity { .. } => codes::validation::INVALID_FORMAT,
            ApiError::AuditInsertFailed(_) => codes::audit::INSERT_FAILED,
            ApiError::ServiceUnavailable { .. } => codes::database::CONNECTION_FAILED,
            ApiError::NotFound { .. } => codes::server::NOT_FOUND,
            ApiError::Internal { .. } => codes::server::INTERNAL,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let error_id = Uuid::new_v4().to_string();
        let status_code = self.status_code();

        // Log the error with correlation ID
        if status_code.is_server_error() {
            error!(
                error_id = %error_id,
                error_type = %self.error_type(),
                status_code = %status_code.as_u16(),
                error = %self,
                "API error occurred"
            );
        } else {
            warn!(
                error_id = %error_id,
                error_type = %self.error_type(),
                status_code = %status_code.as_u16(),
                error = %self,
                "API request rejected"
            );
        }

        let error_response = ApiErrorResponse {
            error_id,
            error_type: self.error_type().to_string(),
            code: self.code().to_string(),
            detail: self.to_string(),
            timestamp: chrono::Utc::now(),
        };

        (status_code, Json(error_response)).into_response()
    }
}

impl From<AuditError> for ApiError {
    fn from(err: AuditError) -> Self {
        match err {
            AuditError::Validation { .. } => ApiError::Validation {
                message: err.to_string(),
                code: codes::validation::INVALID_INPUT,
            },
            AuditError::InsertFailed(_) => ApiError::AuditInsertFailed(err.to_string()),
            AuditError::Store(_) if err.is_store_unavailable() => ApiError::ServiceUnavailable {
                message: err.to_string(),
            },
            AuditError::Store(_) => ApiError::Internal {
                message: err.to_string(),
            },
        }
    }
}

/// Malformed bodies are validation errors; well-formed JSON of the wrong
/// shape (missing `action`, wrong types) is unprocessable.
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        match rejection {
            JsonRejection::JsonDataError(_) => ApiError::UnprocessableEntity {
                message: rejection.body_text(),
            },
            _ => ApiError::Validation {
                message: rejection.body_text(),
                code: codes::validation::INVALID_FORMAT,
            },
        }
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::validation(rejection.body_text())
    }
}

/// Type alias for API results
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use database_layer::DatabaseError;

    #[test]
    fn test_validation_maps_to_bad_request() {
        let err: ApiError = AuditError::validation("action", "must not be blank").into();
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.to_string(), "action: must not be blank");
        assert_eq!(err.code(), codes::validation::INVALID_INPUT);
    }

    #[test]
    fn test_insert_failure_is_client_error_with_cause() {
        let err: ApiError = AuditError::InsertFailed("duplicate key".into()).into();
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.error_type(), "audit_insert_failed");
        assert_eq!(err.to_string(), "audit insert failed: duplicate key");
    }

    #[test]
    fn test_unreachable_store_is_service_unavailable() {
        let err: ApiError =
            AuditError::Store(DatabaseError::ConnectionFailed("refused".into())).into();
        assert_eq!(err.status_code(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn test_other_store_failure_is_internal() {
        let err: ApiError =
            AuditError::Store(DatabaseError::TransactionFailed("boom".into())).into();
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_into_response_uses_status_code() {
        let response = ApiError::validation("limit: invalid digit").into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
