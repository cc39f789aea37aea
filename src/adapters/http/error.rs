//! Shared JSON error body and mapping of application errors to HTTP.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::application::CaptureError;

/// Error response body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            code: "BAD_REQUEST".to_string(),
            message: message.into(),
            details: None,
        }
    }

    pub fn not_found(resource_type: &str, id: &str) -> Self {
        Self {
            code: "NOT_FOUND".to_string(),
            message: format!("{} not found: {}", resource_type, id),
            details: None,
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            code: "INTERNAL_ERROR".to_string(),
            message: message.into(),
            details: None,
        }
    }
}

/// Maps handler errors to status codes. Store details are logged, not sent.
pub fn handle_capture_error(err: CaptureError) -> Response {
    match err {
        CaptureError::TenantNotFound(id) => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::not_found("Tenant", id.as_str())),
        )
            .into_response(),
        CaptureError::SessionNotFound(id) => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::not_found("Session", id.as_str())),
        )
            .into_response(),
        CaptureError::Store(e) => {
            error!(error = %e, "Session store failure");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::internal("Session store unavailable")),
            )
                .into_response()
        }
    }
}

pub fn bad_request(message: impl Into<String>) -> Response {
    (StatusCode::BAD_REQUEST, Json(ErrorResponse::bad_request(message))).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{SessionKey, TenantId};
    use crate::ports::SessionStoreError;

    #[test]
    fn not_found_names_resource_and_id() {
        let error = ErrorResponse::not_found("Tenant", "acme");
        assert_eq!(error.code, "NOT_FOUND");
        assert_eq!(error.message, "Tenant not found: acme");
    }

    #[test]
    fn details_are_omitted_when_absent() {
        let json = serde_json::to_value(ErrorResponse::bad_request("x")).unwrap();
        assert!(json.get("details").is_none());
    }

    #[test]
    fn capture_errors_map_to_status_codes() {
        let tenant = CaptureError::TenantNotFound(TenantId::new("a").unwrap());
        let session = CaptureError::SessionNotFound(SessionKey::new("s").unwrap());
        let store = CaptureError::Store(SessionStoreError::Unavailable("down".into()));

        assert_eq!(handle_capture_error(tenant).status(), StatusCode::NOT_FOUND);
        assert_eq!(handle_capture_error(session).status(), StatusCode::NOT_FOUND);
        assert_eq!(handle_capture_error(store).status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
