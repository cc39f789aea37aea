//! CaptureTurnHandler - Command handler for processing one user utterance.

use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::{debug, info};

use super::errors::CaptureError;
use super::snapshot::CaptureSnapshot;
use crate::application::SessionLocks;
use crate::domain::capture::{CaptureState, TargetExtractor};
use crate::domain::foundation::{SessionKey, TenantId};
use crate::domain::tenant::TenantProfile;
use crate::ports::{SessionStore, TenantProfileSource};

/// Command to harvest fields from one user utterance.
#[derive(Debug, Clone)]
pub struct CaptureTurnCommand {
    pub tenant_id: TenantId,
    pub session_id: SessionKey,
    pub utterance: String,
}

/// Handler for capture turns.
///
/// Load, update and save run under the session's lock, so concurrent turns
/// of the same session are applied one after the other.
pub struct CaptureTurnHandler {
    tenants: Arc<dyn TenantProfileSource>,
    store: Arc<dyn SessionStore>,
    locks: Arc<SessionLocks>,
    extractor: TargetExtractor,
}

impl CaptureTurnHandler {
    pub fn new(
        tenants: Arc<dyn TenantProfileSource>,
        store: Arc<dyn SessionStore>,
        locks: Arc<SessionLocks>,
    ) -> Self {
        Self {
            tenants,
            store,
            locks,
            extractor: TargetExtractor::new(),
        }
    }

    pub async fn handle(&self, cmd: CaptureTurnCommand) -> Result<CaptureSnapshot, CaptureError> {
        let profile = self
            .tenants
            .profile(&cmd.tenant_id)
            .ok_or_else(|| CaptureError::tenant_not_found(&cmd.tenant_id))?;

        let guard = self.locks.acquire(&cmd.tenant_id, &cmd.session_id).await;
        let result = self.apply_turn(&profile, &cmd).await;
        drop(guard);
        self.locks.prune(&cmd.tenant_id, &cmd.session_id);
        result
    }

    /// Load, extract, update and save. Runs under the session's lock.
    async fn apply_turn(
        &self,
        profile: &TenantProfile,
        cmd: &CaptureTurnCommand,
    ) -> Result<CaptureSnapshot, CaptureError> {
        let schema = profile.schema();

        let existing = self.store.load(&cmd.tenant_id, &cmd.session_id).await?;
        let is_new = existing.is_none();
        let mut state = existing.unwrap_or_else(|| CaptureState::new(cmd.session_id.clone()));

        let extracted = if schema.auto_capture() {
            self.extractor.extract(&cmd.utterance, schema)
        } else {
            debug!(tenant_id = %cmd.tenant_id, "Auto capture disabled, skipping extraction");
            BTreeMap::new()
        };

        let update = state.update(schema, &extracted);

        // State is created lazily, on the first turn that captures something.
        if !is_new || !update.is_empty() {
            self.store.save(&cmd.tenant_id, &state).await?;
        }

        if !update.newly_captured.is_empty() || !update.overwritten.is_empty() {
            debug!(
                tenant_id = %cmd.tenant_id,
                session_id = %cmd.session_id,
                new = ?update.newly_captured,
                overwritten = ?update.overwritten,
                "Captured fields updated"
            );
        }
        if update.completed_now {
            info!(
                tenant_id = %cmd.tenant_id,
                session_id = %cmd.session_id,
                target_name = schema.target_name(),
                "Capture complete"
            );
        }

        let completion_signaled = schema.mentions_completion_trigger(&cmd.utterance);
        Ok(CaptureSnapshot::build(profile, &state, extracted, completion_signaled))
    }
}
