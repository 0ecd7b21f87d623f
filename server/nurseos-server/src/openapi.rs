use audit_engine::{AuditSubmission, Event};
use utoipa::OpenApi;

use crate::error::ApiErrorResponse;
use crate::handlers::{audit, events, health};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "NurseOS API (Events/Handover)",
        description = "Audit trail for nurse shift handover"
    ),
    paths(
        health::healthz,
        events::list_events,
        audit::create_audit,
    ),
    components(schemas(
        Event,
        AuditSubmission,
        audit::AuditReceipt,
        health::HealthResponse,
        ApiErrorResponse,
    )),
    tags(
        (name = "health", description = "Liveness"),
        (name = "events", description = "Reading the audit trail"),
        (name = "audit", description = "Recording audit events")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_documents_every_route() {
        let doc = ApiDoc::openapi();
        for path in ["/api/healthz", "/api/events", "/api/audit"] {
            assert!(doc.paths.paths.contains_key(path), "{path} undocumented");
        }
    }
}
