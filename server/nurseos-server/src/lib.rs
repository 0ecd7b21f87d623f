//! NurseOS Server - audit trail API for nurse shift handover
//!
//! This library provides the HTTP surface of the events/handover service:
//! a liveness probe, a filtered read over recorded audit events, and the
//! audit submission endpoint.

pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod openapi;
pub mod routes;
pub mod server;

// Re-export commonly used types
pub use config::ServerConfig;
pub use error::*;
pub use server::NurseOsServer;

use axum::{middleware::from_fn, Router};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

/// Create the main application router with all routes and middleware
pub fn create_app(server: NurseOsServer) -> Router {
    let cors = middleware::create_cors_layer(&server.config.cors);

    routes::create_routes()
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors)
                .layer(from_fn(middleware::request_logging_middleware)),
        )
        .with_state(server)
}
