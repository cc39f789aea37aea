//! HTTP routes for response assembly.

use axum::{routing::post, Router};

use super::handlers::{assemble_response, ResponseHandlers};

/// Creates the response router, meant to be nested under `/api/tenants`.
pub fn response_routes(handlers: ResponseHandlers) -> Router {
    Router::new()
        .route("/:tenant_id/responses", post(assemble_response))
        .with_state(handlers)
}
