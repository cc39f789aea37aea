//! In-Memory Session Store Adapter
//!
//! Keeps capture state in a process-local map. The default store; state is
//! lost on restart.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::capture::CaptureState;
use crate::domain::foundation::{SessionKey, TenantId};
use crate::ports::{SessionStore, SessionStoreError};

type Key = (TenantId, SessionKey);

/// In-memory storage for capture state
#[derive(Debug, Clone, Default)]
pub struct InMemorySessionStore {
    states: Arc<RwLock<HashMap<Key, CaptureState>>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored sessions across all tenants
    pub async fn len(&self) -> usize {
        self.states.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.states.read().await.is_empty()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn load(
        &self,
        tenant: &TenantId,
        session: &SessionKey,
    ) -> Result<Option<CaptureState>, SessionStoreError> {
        let states = self.states.read().await;
        Ok(states.get(&(tenant.clone(), session.clone())).cloned())
    }

    async fn save(&self, tenant: &TenantId, state: &CaptureState) -> Result<(), SessionStoreError> {
        let mut states = self.states.write().await;
        states.insert((tenant.clone(), state.session_id().clone()), state.clone());
        Ok(())
    }

    async fn clear(&self, tenant: &TenantId, session: &SessionKey) -> Result<bool, SessionStoreError> {
        let mut states = self.states.write().await;
        Ok(states.remove(&(tenant.clone(), session.clone())).is_some())
    }

    async fn list_sessions(&self, tenant: &TenantId) -> Result<Vec<SessionKey>, SessionStoreError> {
        let states = self.states.read().await;
        let mut sessions: Vec<SessionKey> = states
            .keys()
            .filter(|(t, _)| t == tenant)
            .map(|(_, s)| s.clone())
            .collect();
        sessions.sort();
        Ok(sessions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tenant(id: &str) -> TenantId {
        TenantId::new(id).unwrap()
    }

    fn session(id: &str) -> SessionKey {
        SessionKey::new(id).unwrap()
    }

    #[tokio::test]
    async fn load_of_unknown_session_is_none() {
        let store = InMemorySessionStore::new();
        assert!(store.load(&tenant("a"), &session("s1")).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn save_then_load_returns_state() {
        let store = InMemorySessionStore::new();
        let state = CaptureState::new(session("s1"));
        store.save(&tenant("a"), &state).await.unwrap();

        let loaded = store.load(&tenant("a"), &session("s1")).await.unwrap();
        assert_eq!(loaded, Some(state));
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn sessions_are_scoped_by_tenant() {
        let store = InMemorySessionStore::new();
        store.save(&tenant("a"), &CaptureState::new(session("s1"))).await.unwrap();

        assert!(store.load(&tenant("b"), &session("s1")).await.unwrap().is_none());
        assert!(store.list_sessions(&tenant("b")).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn clear_reports_whether_something_was_removed() {
        let store = InMemorySessionStore::new();
        store.save(&tenant("a"), &CaptureState::new(session("s1"))).await.unwrap();

        assert!(store.clear(&tenant("a"), &session("s1")).await.unwrap());
        assert!(!store.clear(&tenant("a"), &session("s1")).await.unwrap());
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn list_sessions_is_sorted() {
        let store = InMemorySessionStore::new();
        for id in ["s3", "s1", "s2"] {
            store.save(&tenant("a"), &CaptureState::new(session(id))).await.unwrap();
        }
        let listed = store.list_sessions(&tenant("a")).await.unwrap();
        assert_eq!(listed, vec![session("s1"), session("s2"), session("s3")]);
    }
}
