//! GetCaptureStateHandler - Query handler for a session's capture progress.

use std::collections::BTreeMap;
use std::sync::Arc;

use super::errors::CaptureError;
use super::snapshot::CaptureSnapshot;
use crate::domain::foundation::{SessionKey, TenantId};
use crate::ports::{SessionStore, TenantProfileSource};

/// Query for the current capture snapshot of a session.
#[derive(Debug, Clone)]
pub struct GetCaptureStateQuery {
    pub tenant_id: TenantId,
    pub session_id: SessionKey,
}

/// Handler for reading capture state. Never mutates the store.
pub struct GetCaptureStateHandler {
    tenants: Arc<dyn TenantProfileSource>,
    store: Arc<dyn SessionStore>,
}

impl GetCaptureStateHandler {
    pub fn new(tenants: Arc<dyn TenantProfileSource>, store: Arc<dyn SessionStore>) -> Self {
        Self { tenants, store }
    }

    pub async fn handle(&self, query: GetCaptureStateQuery) -> Result<CaptureSnapshot, CaptureError> {
        let profile = self
            .tenants
            .profile(&query.tenant_id)
            .ok_or_else(|| CaptureError::tenant_not_found(&query.tenant_id))?;

        let state = self
            .store
            .load(&query.tenant_id, &query.session_id)
            .await?
            .ok_or_else(|| CaptureError::SessionNotFound(query.session_id.clone()))?;

        Ok(CaptureSnapshot::build(&profile, &state, BTreeMap::new(), false))
    }
}
