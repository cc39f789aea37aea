//! HTTP handlers for response assembly.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::error::{bad_request, handle_capture_error};
use crate::application::{AssembleResponseCommand, AssembleResponseHandler};
use crate::domain::foundation::TenantId;

use super::dto::{AssembleRequest, AssembledResponseDto};

#[derive(Clone)]
pub struct ResponseHandlers {
    assemble_handler: Arc<AssembleResponseHandler>,
}

impl ResponseHandlers {
    pub fn new(assemble_handler: Arc<AssembleResponseHandler>) -> Self {
        Self { assemble_handler }
    }
}

/// POST /api/tenants/:tenant_id/responses - Split text into chat messages
pub async fn assemble_response(
    State(handlers): State<ResponseHandlers>,
    Path(tenant_id): Path<String>,
    Json(req): Json<AssembleRequest>,
) -> Response {
    let tenant_id = match TenantId::new(tenant_id) {
        Ok(id) => id,
        Err(_) => return bad_request("Invalid tenant ID"),
    };

    let cmd = AssembleResponseCommand {
        tenant_id,
        text: req.text,
    };

    match handlers.assemble_handler.handle(cmd).await {
        Ok(assembled) => {
            let response: AssembledResponseDto = assembled.into();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_capture_error(e),
    }
}
