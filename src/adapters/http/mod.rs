//! HTTP adapters - REST API implementations.
//!
//! Each area has its own HTTP adapter; [`api_router`] merges them and adds
//! the cross-cutting tower layers.

pub mod capture;
mod error;
pub mod response;

use std::time::Duration;

use axum::{routing::get, Json, Router};
use http::HeaderValue;
use serde_json::{json, Value};
use tower_http::{
    compression::CompressionLayer,
    cors::{AllowOrigin, Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::warn;

use crate::config::{AppConfig, ServerConfig};

pub use capture::{capture_routes, CaptureHandlers};
pub use error::ErrorResponse;
pub use response::{response_routes, ResponseHandlers};

/// GET /health - Liveness check
pub async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// Full application router with request ids, CORS, compression, a request
/// timeout and (when enabled) request tracing.
pub fn api_router(
    capture: CaptureHandlers,
    responses: ResponseHandlers,
    config: &AppConfig,
) -> Router {
    let server = &config.server;
    let tenants = capture_routes(capture).merge(response_routes(responses));

    let mut router = Router::new()
        .route("/health", get(health))
        .nest("/api/tenants", tenants)
        .layer(TimeoutLayer::new(Duration::from_secs(server.request_timeout_secs)))
        .layer(CompressionLayer::new())
        .layer(cors_layer(server));

    if config.features.enable_tracing {
        router = router.layer(TraceLayer::new_for_http());
    }

    router
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
}

/// Permissive outside production; otherwise only the configured origins.
fn cors_layer(server: &ServerConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = server
        .cors_origins_list()
        .into_iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    if origins.is_empty() && !server.is_production() {
        return CorsLayer::permissive();
    }

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(Any)
        .allow_headers(Any)
}
