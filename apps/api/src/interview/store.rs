//! In-memory session store. Process-lifetime only; nothing is ever evicted.
//!
//! Each session lives in its own `SessionSlot`:
//! - `turn` serializes state transitions (answer, end) for that one session, and is
//!   held across the provider calls so two submissions can never race for a slot;
//! - `session` guards the data itself and is only held for short, non-awaiting
//!   sections, so readers never wait on LLM latency.
//!
//! Sessions progress independently: the map lock is only taken to insert or look up.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{Mutex, RwLock};

use crate::interview::models::Session;

pub struct SessionSlot {
    turn: Mutex<()>,
    session: RwLock<Session>,
}

impl SessionSlot {
    fn new(session: Session) -> Self {
        Self {
            turn: Mutex::new(()),
            session: RwLock::new(session),
        }
    }

    /// Waits for exclusive right to transition this session.
    pub async fn begin_turn(&self) -> tokio::sync::MutexGuard<'_, ()> {
        self.turn.lock().await
    }

    /// Runs `f` against a read-only view of the session.
    pub async fn read<T>(&self, f: impl FnOnce(&Session) -> T) -> T {
        let session = self.session.read().await;
        f(&session)
    }

    /// Runs `f` with exclusive access to the session.
    pub async fn write<T>(&self, f: impl FnOnce(&mut Session) -> T) -> T {
        let mut session = self.session.write().await;
        f(&mut session)
    }
}

#[derive(Default)]
pub struct SessionStore {
    sessions: RwLock<HashMap<String, Arc<SessionSlot>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert(&self, session: Session) -> Arc<SessionSlot> {
        let id = session.id().to_string();
        let slot = Arc::new(SessionSlot::new(session));
        self.sessions.write().await.insert(id, Arc::clone(&slot));
        slot
    }

    pub async fn get(&self, id: &str) -> Option<Arc<SessionSlot>> {
        self.sessions.read().await.get(id).cloned()
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    /// Clones every session's current state. Order is unspecified.
    pub async fn snapshot(&self) -> Vec<Session> {
        let slots: Vec<Arc<SessionSlot>> = self.sessions.read().await.values().cloned().collect();

        let mut sessions = Vec::with_capacity(slots.len());
        for slot in slots {
            sessions.push(slot.read(Session::clone).await);
        }
        sessions
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(role: &str) -> Session {
        Session::new(role.to_string(), vec!["Q1?".to_string(), "Q2?".to_string()]).unwrap()
    }

    #[tokio::test]
    async fn test_insert_then_get() {
        let store = SessionStore::new();
        let s = session("Backend Developer");
        let id = s.id().to_string();
        store.insert(s).await;

        let slot = store.get(&id).await.expect("session should be stored");
        let role = slot.read(|s| s.role().to_string()).await;
        assert_eq!(role, "Backend Developer");
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_get_unknown_is_none() {
        let store = SessionStore::new();
        assert!(store.get("missing").await.is_none());
    }

    #[tokio::test]
    async fn test_writes_are_visible_to_later_reads() {
        let store = SessionStore::new();
        let slot = store.insert(session("Product Manager")).await;

        let now = chrono::Utc::now();
        slot.write(|s| s.close(now)).await;

        assert_eq!(slot.read(|s| s.ended_at()).await, Some(now));
    }

    #[tokio::test]
    async fn test_snapshot_returns_every_session() {
        let store = SessionStore::new();
        store.insert(session("A")).await;
        store.insert(session("B")).await;
        store.insert(session("C")).await;

        let mut roles: Vec<String> = store
            .snapshot()
            .await
            .iter()
            .map(|s| s.role().to_string())
            .collect();
        roles.sort();
        assert_eq!(roles, vec!["A", "B", "C"]);
    }
}
