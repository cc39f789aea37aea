//! Request and response bodies for capture endpoints.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::application::CaptureSnapshot;
use crate::domain::capture::ConversationPhase;

/// Body of `POST .../turns`
#[derive(Debug, Clone, Deserialize)]
pub struct TurnRequest {
    pub utterance: String,
}

/// Capture progress of one session
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CaptureSnapshotResponse {
    pub tenant_id: String,
    pub session_id: String,
    pub extracted: BTreeMap<String, String>,
    pub captured_fields: BTreeMap<String, String>,
    pub is_complete: bool,
    /// RFC 3339
    pub completed_at: Option<String>,
    pub phase: ConversationPhase,
    pub phase_directive: String,
    pub next_suggested_field: Option<String>,
    pub missing_required: Vec<String>,
    pub completion_percentage: u8,
    pub completion_signaled: bool,
}

impl From<CaptureSnapshot> for CaptureSnapshotResponse {
    fn from(snapshot: CaptureSnapshot) -> Self {
        Self {
            tenant_id: snapshot.tenant_id.to_string(),
            session_id: snapshot.session_id.to_string(),
            extracted: snapshot.extracted,
            captured_fields: snapshot.captured_fields,
            is_complete: snapshot.is_complete,
            completed_at: snapshot.completed_at.map(|ts| ts.to_rfc3339()),
            phase: snapshot.phase,
            phase_directive: snapshot.phase_directive,
            next_suggested_field: snapshot.next_suggested_field,
            missing_required: snapshot.missing_required,
            completion_percentage: snapshot.completion_percentage.value(),
            completion_signaled: snapshot.completion_signaled,
        }
    }
}
