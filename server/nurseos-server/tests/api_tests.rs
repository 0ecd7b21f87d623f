//! End-to-end tests for the HTTP surface over an in-memory event store.

use std::sync::Arc;

use audit_engine::testing::MemoryEventStore;
use audit_engine::AuditSubmission;
use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use nurseos_server::{create_app, NurseOsServer, ServerConfig};
use serde_json::{json, Value};
use tower::ServiceExt;

struct TestApp {
    router: Router,
    store: Arc<MemoryEventStore>,
}

impl TestApp {
    fn new() -> Self {
        Self::with_config(ServerConfig::default())
    }

    fn with_config(config: ServerConfig) -> Self {
        let store = Arc::new(MemoryEventStore::new());
        let server = NurseOsServer::with_store(config, store.clone());
        Self {
            router: create_app(server),
            store,
        }
    }

    async fn get(&self, uri: &str) -> (StatusCode, Value) {
        let request = Request::builder()
            .uri(uri)
            .body(Body::empty())
            .unwrap();
        self.send(request).await
    }

    async fn post_json(&self, uri: &str, body: &str) -> (StatusCode, Value) {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        self.send(request).await
    }

    async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, body)
    }
}

#[tokio::test]
async fn test_healthz_reports_ok() {
    let app = TestApp::new();
    let (status, body) = app.get("/api/healthz").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "ok": true }));
}

#[tokio::test]
async fn test_healthz_does_not_touch_the_store() {
    let app = TestApp::new();
    app.store.fail_reads(true);
    app.store.fail_inserts(true);

    let (status, body) = app.get("/api/healthz").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "ok": true }));
}

#[tokio::test]
async fn test_audit_with_defaults_then_read_back() {
    let app = TestApp::new();

    let (status, body) = app
        .post_json(
            "/api/audit",
            r#"{"action":"view_document","resource_id":"doc-42"}"#,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["ok"], json!(true));
    let id = body["id"].as_i64().unwrap();
    assert!(id > 0);

    let (status, body) = app
        .get("/api/events?resource_type=DocumentReference&limit=1")
        .await;
    assert_eq!(status, StatusCode::OK);
    let events = body.as_array().unwrap();
    assert_eq!(events.len(), 1);
    let event = &events[0];
    assert_eq!(event["id"], json!(id));
    assert_eq!(event["status"], "ok");
    assert_eq!(event["category"], "handover");
    assert_eq!(event["resource_type"], "DocumentReference");
    assert_eq!(event["resource_id"], "doc-42");
    assert_eq!(event["action"], "view_document");
    assert_eq!(event["data"], Value::Null);
    assert!(event["ts"].is_string());
}

#[tokio::test]
async fn test_audit_keeps_explicit_fields_and_payload() {
    let app = TestApp::new();

    let (status, _) = app
        .post_json(
            "/api/audit",
            r#"{
                "action": "handover_acknowledged",
                "status": "error",
                "category": "shift",
                "resource_type": "Patient",
                "resource_id": "pat-7",
                "data": {"ward": "4B", "beds": [1, 2]}
            }"#,
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = app.get("/api/events").await;
    let event = &body.as_array().unwrap()[0];
    assert_eq!(event["status"], "error");
    assert_eq!(event["category"], "shift");
    assert_eq!(event["resource_type"], "Patient");
    assert_eq!(event["data"], json!({"ward": "4B", "beds": [1, 2]}));
}

#[tokio::test]
async fn test_missing_action_is_unprocessable_and_writes_nothing() {
    let app = TestApp::new();

    let (status, body) = app
        .post_json("/api/audit", r#"{"resource_id":"doc-42"}"#)
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error_type"], "unprocessable_entity");
    assert!(app.store.is_empty());
}

#[tokio::test]
async fn test_malformed_json_is_bad_request() {
    let app = TestApp::new();

    let (status, body) = app.post_json("/api/audit", r#"{"action":"#).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_1003");
    assert!(app.store.is_empty());
}

#[tokio::test]
async fn test_blank_action_is_rejected() {
    let app = TestApp::new();

    let (status, body) = app.post_json("/api/audit", r#"{"action":"   "}"#).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error_type"], "validation_error");
    assert!(body["detail"].as_str().unwrap().starts_with("action"));
    assert!(app.store.is_empty());
}

#[tokio::test]
async fn test_non_object_payload_is_unprocessable() {
    let app = TestApp::new();

    let (status, _) = app
        .post_json("/api/audit", r#"{"action":"x","data":[1,2,3]}"#)
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(app.store.is_empty());
}

#[tokio::test]
async fn test_insert_failure_returns_cause_and_keeps_trail_unchanged() {
    let app = TestApp::new();
    app.store.seed(AuditSubmission::new("handover_summary_created"));
    app.store.fail_inserts(true);

    let (status, body) = app
        .post_json("/api/audit", r#"{"action":"handover_acknowledged"}"#)
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error_type"], "audit_insert_failed");
    assert_eq!(body["code"], "AUDIT_2001");
    assert!(body["detail"]
        .as_str()
        .unwrap()
        .starts_with("audit insert failed: "));
    assert_eq!(app.store.len(), 1);

    app.store.fail_inserts(false);
    let (status, _) = app
        .post_json("/api/audit", r#"{"action":"handover_acknowledged"}"#)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(app.store.len(), 2);
}

#[tokio::test]
async fn test_events_are_newest_first() {
    let app = TestApp::new();
    for action in ["first", "second", "third"] {
        app.store.seed(AuditSubmission::new(action));
    }

    let (status, body) = app.get("/api/events").await;
    assert_eq!(status, StatusCode::OK);
    let actions: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|event| event["action"].as_str().unwrap())
        .collect();
    assert_eq!(actions, vec!["third", "second", "first"]);
}

#[tokio::test]
async fn test_filters_are_combined() {
    let app = TestApp::new();
    app.store.seed(AuditSubmission::new("a").with_status("ok").with_category("handover"));
    app.store.seed(AuditSubmission::new("b").with_status("error").with_category("handover"));
    app.store.seed(AuditSubmission::new("c").with_status("error").with_category("shift"));
    app.store.seed(
        AuditSubmission::new("d")
            .with_status("error")
            .with_category("handover")
            .with_resource_type("Patient"),
    );

    let (_, body) = app.get("/api/events?status=error&category=handover").await;
    let actions: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|event| event["action"].as_str().unwrap())
        .collect();
    assert_eq!(actions, vec!["d", "b"]);

    let (_, body) = app
        .get("/api/events?status=error&category=handover&resource_type=Patient")
        .await;
    assert_eq!(body.as_array().unwrap().len(), 1);

    let (_, body) = app.get("/api/events?status=missing").await;
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_empty_filter_values_are_ignored() {
    let app = TestApp::new();
    app.store.seed(AuditSubmission::new("a"));

    let (status, body) = app.get("/api/events?status=&category=").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_limit_bounds_the_result() {
    let app = TestApp::new();
    for i in 0..5 {
        app.store.seed(AuditSubmission::new(format!("action-{i}")));
    }

    let (_, body) = app.get("/api/events?limit=2").await;
    let events = body.as_array().unwrap();
    assert_eq!(events.len(), 2);
    assert_eq!(events[0]["action"], "action-4");

    let (_, body) = app.get("/api/events?limit=0").await;
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_default_limit_comes_from_config() {
    let mut config = ServerConfig::default();
    config.events.default_limit = 3;
    let app = TestApp::with_config(config);
    for i in 0..5 {
        app.store.seed(AuditSubmission::new(format!("action-{i}")));
    }

    let (_, body) = app.get("/api/events").await;
    assert_eq!(body.as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_non_integer_limit_is_rejected() {
    let app = TestApp::new();

    let (status, body) = app.get("/api/events?limit=ten").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error_type"], "validation_error");
}

#[tokio::test]
async fn test_unreachable_store_is_service_unavailable() {
    let app = TestApp::new();
    app.store.fail_reads(true);

    let (status, body) = app.get("/api/events").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["error_type"], "service_unavailable");
}

#[tokio::test]
async fn test_openapi_document_is_served() {
    let app = TestApp::new();

    let (status, body) = app.get("/api/openapi.json").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"]["/api/audit"]["post"].is_object());
    assert!(body["paths"]["/api/events"]["get"].is_object());
}

#[tokio::test]
async fn test_unknown_route_is_not_found() {
    let app = TestApp::new();

    let (status, body) = app.get("/api/nope").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error_type"], "not_found");
}

#[tokio::test]
async fn test_cors_allows_any_origin_by_default() {
    let app = TestApp::new();
    let request = Request::builder()
        .uri("/api/healthz")
        .header(header::ORIGIN, "https://ward.example.org")
        .body(Body::empty())
        .unwrap();

    let response = app.router.clone().oneshot(request).await.unwrap();
    assert_eq!(
        response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "*"
    );
}
