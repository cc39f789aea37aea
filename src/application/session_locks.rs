//! Per-session serialization of capture updates.
//!
//! Two turns of the same session must not interleave their
//! load-update-save cycles, or one update is lost. Turns of different
//! sessions never wait on each other.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

use crate::domain::foundation::{SessionKey, TenantId};

type Key = (TenantId, SessionKey);

/// Registry of one async mutex per `(tenant, session)`.
#[derive(Debug, Default)]
pub struct SessionLocks {
    locks: Mutex<HashMap<Key, Arc<AsyncMutex<()>>>>,
}

impl SessionLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Waits for exclusive access to a session. Access lasts as long as the
    /// returned guard.
    pub async fn acquire(&self, tenant: &TenantId, session: &SessionKey) -> OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
            Arc::clone(
                locks
                    .entry((tenant.clone(), session.clone()))
                    .or_insert_with(|| Arc::new(AsyncMutex::new(()))),
            )
        };
        lock.lock_owned().await
    }

    /// Drops the lock entry of a session nobody holds or waits for.
    pub fn prune(&self, tenant: &TenantId, session: &SessionKey) {
        let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
        let key = (tenant.clone(), session.clone());
        if locks
            .get(&key)
            .is_some_and(|lock| Arc::strong_count(lock) == 1)
        {
            locks.remove(&key);
        }
    }

    /// Number of tracked sessions.
    pub fn len(&self) -> usize {
        self.locks.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn key(tenant: &str, session: &str) -> (TenantId, SessionKey) {
        (TenantId::new(tenant).unwrap(), SessionKey::new(session).unwrap())
    }

    #[tokio::test]
    async fn same_session_is_exclusive() {
        let locks = Arc::new(SessionLocks::new());
        let (tenant, session) = key("a", "s1");

        let guard = locks.acquire(&tenant, &session).await;

        let contender = {
            let locks = Arc::clone(&locks);
            let (tenant, session) = (tenant.clone(), session.clone());
            tokio::spawn(async move {
                let _guard = locks.acquire(&tenant, &session).await;
            })
        };

        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(!contender.is_finished());

        drop(guard);
        tokio::time::timeout(Duration::from_secs(1), contender)
            .await
            .expect("contender acquires after release")
            .unwrap();
    }

    #[tokio::test]
    async fn different_sessions_do_not_block() {
        let locks = SessionLocks::new();
        let (tenant, s1) = key("a", "s1");
        let (_, s2) = key("a", "s2");

        let _first = locks.acquire(&tenant, &s1).await;
        let second = tokio::time::timeout(Duration::from_millis(100), locks.acquire(&tenant, &s2)).await;
        assert!(second.is_ok());
        assert_eq!(locks.len(), 2);
    }

    #[tokio::test]
    async fn prune_keeps_held_locks() {
        let locks = SessionLocks::new();
        let (tenant, session) = key("a", "s1");

        let guard = locks.acquire(&tenant, &session).await;
        locks.prune(&tenant, &session);
        assert_eq!(locks.len(), 1);

        drop(guard);
        locks.prune(&tenant, &session);
        assert!(locks.is_empty());
    }
}
