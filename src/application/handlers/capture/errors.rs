//! Errors returned by the capture and response handlers.

use thiserror::Error;

use crate::domain::foundation::{SessionKey, TenantId};
use crate::ports::SessionStoreError;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CaptureError {
    #[error("Tenant not found: {0}")]
    TenantNotFound(TenantId),

    #[error("Session not found: {0}")]
    SessionNotFound(SessionKey),

    #[error("Session store failure: {0}")]
    Store(#[from] SessionStoreError),
}

impl CaptureError {
    pub fn tenant_not_found(tenant: &TenantId) -> Self {
        Self::TenantNotFound(tenant.clone())
    }
}
