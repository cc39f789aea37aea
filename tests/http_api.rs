//! Integration tests for the HTTP API.
//!
//! The router is built exactly as the binary builds it, from tenant
//! documents on disk, and driven with `tower::ServiceExt::oneshot`.

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::ServiceExt;

use assistant_core::adapters::http::{api_router, CaptureHandlers, ResponseHandlers};
use assistant_core::adapters::{FileTenantLoader, InMemorySessionStore};
use assistant_core::application::{
    AssembleResponseHandler, CaptureTurnHandler, ClearSessionHandler, GetCaptureStateHandler,
    SessionLocks,
};
use assistant_core::config::AppConfig;
use assistant_core::domain::segmentation::SegmentationConfig;
use assistant_core::domain::tenant::ComponentRegistry;

// =============================================================================
// Test Infrastructure
// =============================================================================

const LOJA_JSON: &str = r#"{
    "display_name": "Loja de Roupas",
    "formatter": "whatsapp",
    "segmentation": {"min_chars": 40, "max_chars": 80},
    "capture": {
        "target_name": "lead",
        "fields": [
            {"name": "business_type", "type": "text", "required": true, "trigger_keywords": ["negócio"]},
            {"name": "volume", "type": "text", "required": true, "trigger_keywords": ["clientes"]}
        ],
        "completion_triggers": ["fechado"]
    }
}"#;

async fn app() -> (Router, TempDir) {
    let dir = TempDir::new().unwrap();
    let tenant_dir = dir.path().join("loja");
    tokio::fs::create_dir_all(&tenant_dir).await.unwrap();
    tokio::fs::write(tenant_dir.join("tenant.json"), LOJA_JSON).await.unwrap();

    let loader = FileTenantLoader::load_dir(dir.path(), SegmentationConfig::default())
        .await
        .unwrap();
    let tenants = Arc::new(loader);
    let store = Arc::new(InMemorySessionStore::new());
    let locks = Arc::new(SessionLocks::new());

    let capture = CaptureHandlers::new(
        Arc::new(CaptureTurnHandler::new(tenants.clone(), store.clone(), locks.clone())),
        Arc::new(GetCaptureStateHandler::new(tenants.clone(), store.clone())),
        Arc::new(ClearSessionHandler::new(tenants.clone(), store, locks)),
    );
    let responses = ResponseHandlers::new(Arc::new(AssembleResponseHandler::new(
        tenants,
        Arc::new(ComponentRegistry::default()),
    )));

    (api_router(capture, responses, &AppConfig::default()), dir)
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

// =============================================================================
// Health
// =============================================================================

#[tokio::test]
async fn health_reports_ok() {
    let (app, _dir) = app().await;
    let (status, body) = send(&app, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

// =============================================================================
// Capture endpoints
// =============================================================================

#[tokio::test]
async fn turn_returns_capture_snapshot() {
    let (app, _dir) = app().await;
    let (status, body) = send(
        &app,
        Method::POST,
        "/api/tenants/loja/sessions/5511999990000/turns",
        Some(json!({"utterance": "Tenho um negócio de roupas, atendo 80 clientes por mês"})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["tenant_id"], "loja");
    assert_eq!(body["session_id"], "5511999990000");
    assert!(body["extracted"]["business_type"].as_str().unwrap().contains("roupas"));
    assert_eq!(body["captured_fields"]["volume"], "80 clientes por mês");
    assert_eq!(body["is_complete"], true);
    assert!(body["completed_at"].is_string());
    assert_eq!(body["completion_percentage"], 100);
    assert_eq!(body["completion_signaled"], false);
    assert!(body["phase_directive"].is_string());
}

#[tokio::test]
async fn capture_read_after_turn() {
    let (app, _dir) = app().await;
    send(
        &app,
        Method::POST,
        "/api/tenants/loja/sessions/s1/turns",
        Some(json!({"utterance": "Meu negócio é uma padaria"})),
    )
    .await;

    let (status, body) = send(&app, Method::GET, "/api/tenants/loja/sessions/s1/capture", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["captured_fields"]["business_type"], "é uma padaria");
    assert_eq!(body["next_suggested_field"], "volume");
    assert_eq!(body["missing_required"], json!(["volume"]));
    assert_eq!(body["phase"], "understanding");
}

#[tokio::test]
async fn unknown_session_is_404() {
    let (app, _dir) = app().await;
    let (status, body) = send(&app, Method::GET, "/api/tenants/loja/sessions/nope/capture", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");
}

#[tokio::test]
async fn unknown_tenant_is_404() {
    let (app, _dir) = app().await;
    let (status, body) = send(
        &app,
        Method::POST,
        "/api/tenants/ninguem/sessions/s1/turns",
        Some(json!({"utterance": "oi"})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["message"].as_str().unwrap().contains("ninguem"));
}

#[tokio::test]
async fn delete_clears_session() {
    let (app, _dir) = app().await;
    send(
        &app,
        Method::POST,
        "/api/tenants/loja/sessions/s1/turns",
        Some(json!({"utterance": "Tenho um negócio de roupas"})),
    )
    .await;

    let (status, _) = send(&app, Method::DELETE, "/api/tenants/loja/sessions/s1", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(&app, Method::DELETE, "/api/tenants/loja/sessions/s1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, Method::GET, "/api/tenants/loja/sessions/s1/capture", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// =============================================================================
// Response endpoint
// =============================================================================

#[tokio::test]
async fn responses_use_tenant_formatter_and_bounds() {
    let (app, _dir) = app().await;
    let text = "Temos três opções:\n\
        1. **Básico**: para começar.\n\
        2. **Pro**: para crescer.\n\
        3. **Plus**: para equipes grandes.";
    let (status, body) = send(
        &app,
        Method::POST,
        "/api/tenants/loja/responses",
        Some(json!({"text": text})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["strategy"], "structured");
    assert_eq!(body["item_count"], 3);
    assert_eq!(body["total_parts"], 4);
    assert_eq!(body["messages"][1], "1. *Básico*: para começar.");
}

#[tokio::test]
async fn responses_for_unknown_tenant_are_404() {
    let (app, _dir) = app().await;
    let (status, _) = send(
        &app,
        Method::POST,
        "/api/tenants/ninguem/responses",
        Some(json!({"text": "oi"})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
