use axum::{
    routing::{get, post},
    Json, Router,
};
use utoipa::OpenApi;

use crate::{
    handlers::{self, audit, events, health},
    openapi::ApiDoc,
    server::NurseOsServer,
};

pub mod paths {
    pub const HEALTHZ: &str = "/api/healthz";
    pub const EVENTS: &str = "/api/events";
    pub const AUDIT: &str = "/api/audit";
    pub const OPENAPI: &str = "/api/openapi.json";
}

/// Create health check routes
pub fn health_routes() -> Router<NurseOsServer> {
    Router::new().route(paths::HEALTHZ, get(health::healthz))
}

/// Create audit trail routes
pub fn event_routes() -> Router<NurseOsServer> {
    Router::new()
        .route(paths::EVENTS, get(events::list_events))
        .route(paths::AUDIT, post(audit::create_audit))
}

/// Create API documentation routes
pub fn docs_routes() -> Router<NurseOsServer> {
    Router::new().route(paths::OPENAPI, get(|| async { Json(ApiDoc::openapi()) }))
}

/// Create all routes
pub fn create_routes() -> Router<NurseOsServer> {
    Router::new()
        .merge(health_routes())
        .merge(event_routes())
        .merge(docs_routes())
        .fallback(handlers::not_found)
}
