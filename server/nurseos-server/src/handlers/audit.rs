use audit_engine::AuditSubmission;
use axum::extract::State;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::{ApiErrorResponse, ApiResult};
use crate::extractors::Json;
use crate::server::NurseOsServer;

/// Confirmation for a recorded audit event
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AuditReceipt {
    #[schema(example = true)]
    pub ok: bool,
    /// Identifier of the new event
    #[schema(example = 42)]
    pub id: i64,
}

/// Record one audit event
#[utoipa::path(
    post,
    path = "/api/audit",
    tag = "audit",
    request_body = AuditSubmission,
    responses(
        (status = 200, description = "Event recorded", body = AuditReceipt),
        (status = 400, description = "Invalid submission or insert failed; nothing was written", body = ApiErrorResponse),
        (status = 422, description = "Body does not have the submission shape", body = ApiErrorResponse)
    )
)]
pub async fn create_audit(
    State(server): State<NurseOsServer>,
    Json(submission): Json<AuditSubmission>,
) -> ApiResult<axum::Json<AuditReceipt>> {
    let event = server.audit_writer.record(submission).await?;
    Ok(axum::Json(AuditReceipt {
        ok: true,
        id: event.id,
    }))
}
