//! Read model of a session's capture progress.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::domain::capture::{CaptureState, ConversationPhase};
use crate::domain::foundation::{Percentage, SessionKey, TenantId, Timestamp};
use crate::domain::tenant::TenantProfile;

/// Everything a prompt builder or UI needs about one session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CaptureSnapshot {
    pub tenant_id: TenantId,
    pub session_id: SessionKey,
    /// Values extracted from the latest utterance (empty for plain reads).
    pub extracted: BTreeMap<String, String>,
    pub captured_fields: BTreeMap<String, String>,
    pub is_complete: bool,
    pub completed_at: Option<Timestamp>,
    pub phase: ConversationPhase,
    pub phase_directive: String,
    pub next_suggested_field: Option<String>,
    pub missing_required: Vec<String>,
    pub completion_percentage: Percentage,
    /// The utterance contained one of the tenant's completion triggers.
    pub completion_signaled: bool,
}

impl CaptureSnapshot {
    pub fn build(
        profile: &TenantProfile,
        state: &CaptureState,
        extracted: BTreeMap<String, String>,
        completion_signaled: bool,
    ) -> Self {
        let schema = profile.schema();
        let classifier = profile.phase_classifier();
        let phase = classifier.classify(state.captured_fields(), schema);

        Self {
            tenant_id: profile.tenant_id().clone(),
            session_id: state.session_id().clone(),
            extracted,
            captured_fields: state.captured_fields().clone(),
            is_complete: state.is_complete(),
            completed_at: state.completed_at(),
            phase,
            phase_directive: classifier.directive(phase).to_string(),
            next_suggested_field: state.next_suggested_field(schema).map(|f| f.name.clone()),
            missing_required: state
                .missing_required(schema)
                .into_iter()
                .map(|f| f.name.clone())
                .collect(),
            completion_percentage: state.completion_percentage(schema),
            completion_signaled,
        }
    }
}
