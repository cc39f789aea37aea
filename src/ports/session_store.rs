//! Session Store Port - Persistence of per-session capture state.
//!
//! Sessions are scoped by tenant, so the same session key used by two
//! tenants names two independent states.

use async_trait::async_trait;

use crate::domain::capture::CaptureState;
use crate::domain::foundation::{SessionKey, TenantId};

/// Errors that can occur during session store operations
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum SessionStoreError {
    #[error("Failed to serialize capture state: {0}")]
    Serialization(String),

    #[error("Session store unavailable: {0}")]
    Unavailable(String),
}

/// Port for loading and saving capture state
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Load the state of a session, `None` if the session has none yet.
    async fn load(
        &self,
        tenant: &TenantId,
        session: &SessionKey,
    ) -> Result<Option<CaptureState>, SessionStoreError>;

    /// Save (insert or replace) the state of a session.
    async fn save(&self, tenant: &TenantId, state: &CaptureState) -> Result<(), SessionStoreError>;

    /// Explicitly clear a session. Returns whether anything was removed.
    async fn clear(&self, tenant: &TenantId, session: &SessionKey) -> Result<bool, SessionStoreError>;

    /// Keys of every stored session of a tenant.
    async fn list_sessions(&self, tenant: &TenantId) -> Result<Vec<SessionKey>, SessionStoreError>;
}
