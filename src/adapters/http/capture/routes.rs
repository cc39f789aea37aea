//! HTTP routes for capture endpoints.

use axum::{
    routing::{delete, get, post},
    Router,
};

use super::handlers::{clear_session, get_capture, post_turn, CaptureHandlers};

/// Creates the capture router, meant to be nested under `/api/tenants`.
pub fn capture_routes(handlers: CaptureHandlers) -> Router {
    Router::new()
        .route("/:tenant_id/sessions/:session_id/turns", post(post_turn))
        .route("/:tenant_id/sessions/:session_id/capture", get(get_capture))
        .route("/:tenant_id/sessions/:session_id", delete(clear_session))
        .with_state(handlers)
}
