//! ClearSessionHandler - Command handler for explicitly resetting a session.

use std::sync::Arc;

use tracing::info;

use super::errors::CaptureError;
use crate::application::SessionLocks;
use crate::domain::foundation::{SessionKey, TenantId};
use crate::ports::{SessionStore, TenantProfileSource};

/// Command to drop all capture state of a session.
#[derive(Debug, Clone)]
pub struct ClearSessionCommand {
    pub tenant_id: TenantId,
    pub session_id: SessionKey,
}

/// Handler for clearing sessions.
pub struct ClearSessionHandler {
    tenants: Arc<dyn TenantProfileSource>,
    store: Arc<dyn SessionStore>,
    locks: Arc<SessionLocks>,
}

impl ClearSessionHandler {
    pub fn new(
        tenants: Arc<dyn TenantProfileSource>,
        store: Arc<dyn SessionStore>,
        locks: Arc<SessionLocks>,
    ) -> Self {
        Self {
            tenants,
            store,
            locks,
        }
    }

    /// Returns whether any state was removed.
    pub async fn handle(&self, cmd: ClearSessionCommand) -> Result<bool, CaptureError> {
        if self.tenants.profile(&cmd.tenant_id).is_none() {
            return Err(CaptureError::tenant_not_found(&cmd.tenant_id));
        }

        let guard = self.locks.acquire(&cmd.tenant_id, &cmd.session_id).await;
        let removed = self.store.clear(&cmd.tenant_id, &cmd.session_id).await;
        drop(guard);
        self.locks.prune(&cmd.tenant_id, &cmd.session_id);

        let removed = removed?;
        if removed {
            info!(tenant_id = %cmd.tenant_id, session_id = %cmd.session_id, "Session cleared");
        }
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemorySessionStore;
    use crate::adapters::tenant::FileTenantLoader;
    use crate::domain::capture::{CaptureState, SchemaTemplate};
    use crate::domain::tenant::TenantProfile;

    fn tenant() -> TenantId {
        TenantId::new("default").unwrap()
    }

    fn session() -> SessionKey {
        SessionKey::new("s-1").unwrap()
    }

    fn setup() -> (ClearSessionHandler, Arc<InMemorySessionStore>, Arc<SessionLocks>) {
        let tenants: FileTenantLoader =
            [TenantProfile::new(SchemaTemplate::Generic.build(tenant()).unwrap())]
                .into_iter()
                .collect();
        let store = Arc::new(InMemorySessionStore::new());
        let locks = Arc::new(SessionLocks::new());
        let handler = ClearSessionHandler::new(Arc::new(tenants), store.clone(), locks.clone());
        (handler, store, locks)
    }

    fn cmd() -> ClearSessionCommand {
        ClearSessionCommand {
            tenant_id: tenant(),
            session_id: session(),
        }
    }

    #[tokio::test]
    async fn removes_existing_state_and_lock() {
        let (handler, store, locks) = setup();
        store.save(&tenant(), &CaptureState::new(session())).await.unwrap();

        assert!(handler.handle(cmd()).await.unwrap());
        assert!(store.load(&tenant(), &session()).await.unwrap().is_none());
        assert!(locks.is_empty());
    }

    #[tokio::test]
    async fn clearing_unknown_session_reports_nothing_removed() {
        let (handler, _store, _locks) = setup();
        assert!(!handler.handle(cmd()).await.unwrap());
    }

    #[tokio::test]
    async fn unknown_tenant_is_rejected() {
        let (handler, _store, _locks) = setup();
        let result = handler
            .handle(ClearSessionCommand {
                tenant_id: TenantId::new("outra").unwrap(),
                session_id: session(),
            })
            .await;
        assert!(matches!(result, Err(CaptureError::TenantNotFound(_))));
    }
}
