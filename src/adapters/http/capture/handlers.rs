//! HTTP handlers for capture endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::error::{bad_request, handle_capture_error};
use crate::application::{
    CaptureError, CaptureTurnCommand, CaptureTurnHandler, ClearSessionCommand,
    ClearSessionHandler, GetCaptureStateHandler, GetCaptureStateQuery,
};
use crate::domain::foundation::{SessionKey, TenantId};

use super::dto::{CaptureSnapshotResponse, TurnRequest};

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct CaptureHandlers {
    turn_handler: Arc<CaptureTurnHandler>,
    get_handler: Arc<GetCaptureStateHandler>,
    clear_handler: Arc<ClearSessionHandler>,
}

impl CaptureHandlers {
    pub fn new(
        turn_handler: Arc<CaptureTurnHandler>,
        get_handler: Arc<GetCaptureStateHandler>,
        clear_handler: Arc<ClearSessionHandler>,
    ) -> Self {
        Self {
            turn_handler,
            get_handler,
            clear_handler,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// POST /api/tenants/:tenant_id/sessions/:session_id/turns - Process one utterance
pub async fn post_turn(
    State(handlers): State<CaptureHandlers>,
    Path((tenant_id, session_id)): Path<(String, String)>,
    Json(req): Json<TurnRequest>,
) -> Response {
    let (tenant_id, session_id) = match parse_ids(tenant_id, session_id) {
        Ok(ids) => ids,
        Err(response) => return response,
    };

    let cmd = CaptureTurnCommand {
        tenant_id,
        session_id,
        utterance: req.utterance,
    };

    match handlers.turn_handler.handle(cmd).await {
        Ok(snapshot) => {
            let response: CaptureSnapshotResponse = snapshot.into();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_capture_error(e),
    }
}

/// GET /api/tenants/:tenant_id/sessions/:session_id/capture - Current capture state
pub async fn get_capture(
    State(handlers): State<CaptureHandlers>,
    Path((tenant_id, session_id)): Path<(String, String)>,
) -> Response {
    let (tenant_id, session_id) = match parse_ids(tenant_id, session_id) {
        Ok(ids) => ids,
        Err(response) => return response,
    };

    let query = GetCaptureStateQuery {
        tenant_id,
        session_id,
    };

    match handlers.get_handler.handle(query).await {
        Ok(snapshot) => {
            let response: CaptureSnapshotResponse = snapshot.into();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_capture_error(e),
    }
}

/// DELETE /api/tenants/:tenant_id/sessions/:session_id - Reset a session
pub async fn clear_session(
    State(handlers): State<CaptureHandlers>,
    Path((tenant_id, session_id)): Path<(String, String)>,
) -> Response {
    let (tenant_id, session_id) = match parse_ids(tenant_id, session_id) {
        Ok(ids) => ids,
        Err(response) => return response,
    };

    let cmd = ClearSessionCommand {
        tenant_id,
        session_id: session_id.clone(),
    };

    match handlers.clear_handler.handle(cmd).await {
        Ok(true) => StatusCode::NO_CONTENT.into_response(),
        Ok(false) => handle_capture_error(CaptureError::SessionNotFound(session_id)),
        Err(e) => handle_capture_error(e),
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Helpers
// ════════════════════════════════════════════════════════════════════════════

fn parse_ids(tenant_id: String, session_id: String) -> Result<(TenantId, SessionKey), Response> {
    let tenant_id = TenantId::new(tenant_id).map_err(|_| bad_request("Invalid tenant ID"))?;
    let session_id = SessionKey::new(session_id).map_err(|_| bad_request("Invalid session ID"))?;
    Ok((tenant_id, session_id))
}
