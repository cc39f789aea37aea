//! AssembleResponseHandler - Splits an assistant reply into chat messages.

use std::sync::Arc;

use tracing::debug;

use crate::application::handlers::capture::CaptureError;
use crate::domain::foundation::TenantId;
use crate::domain::response::AssembledResponse;
use crate::domain::tenant::ComponentRegistry;
use crate::ports::TenantProfileSource;

/// Command to format raw assistant text for delivery.
#[derive(Debug, Clone)]
pub struct AssembleResponseCommand {
    pub tenant_id: TenantId,
    pub text: String,
}

/// Handler that formats text with the tenant's formatter and bounds.
pub struct AssembleResponseHandler {
    tenants: Arc<dyn TenantProfileSource>,
    registry: Arc<ComponentRegistry>,
}

impl AssembleResponseHandler {
    pub fn new(tenants: Arc<dyn TenantProfileSource>, registry: Arc<ComponentRegistry>) -> Self {
        Self { tenants, registry }
    }

    pub async fn handle(&self, cmd: AssembleResponseCommand) -> Result<AssembledResponse, CaptureError> {
        let profile = self
            .tenants
            .profile(&cmd.tenant_id)
            .ok_or_else(|| CaptureError::tenant_not_found(&cmd.tenant_id))?;

        let formatter = self
            .registry
            .resolve_formatter(&cmd.tenant_id, profile.formatter());
        let assembled = formatter.format(&cmd.text, profile.segmentation());

        debug!(
            tenant_id = %cmd.tenant_id,
            formatter = formatter.name(),
            strategy = ?assembled.strategy,
            parts = assembled.total_parts(),
            "Response assembled"
        );
        Ok(assembled)
    }
}
