use super::session::Session;
use super::stats::SessionStats;
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::{Mutex, RwLock};

/// A session shared between its connection task and any in-flight finalize
pub type SharedSession = Arc<Mutex<Session>>;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("session id already in use: {session_id}")]
    Collision { session_id: String },
}

/// Live sessions keyed by session id
///
/// Insert and remove each take the write lock once, so a connect racing a
/// disconnect for the same id either sees the old entry or none. Sessions
/// are otherwise independent; the map is the only state shared between
/// connections.
#[derive(Clone, Default)]
pub struct SessionRegistry {
    sessions: Arc<RwLock<HashMap<String, SharedSession>>>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new `Active` session under `id`
    pub async fn create(&self, id: &str) -> Result<SharedSession, RegistryError> {
        let mut sessions = self.sessions.write().await;
        if sessions.contains_key(id) {
            return Err(RegistryError::Collision {
                session_id: id.to_string(),
            });
        }

        let session = Arc::new(Mutex::new(Session::new(id.to_string())));
        sessions.insert(id.to_string(), Arc::clone(&session));
        Ok(session)
    }

    pub async fn get(&self, id: &str) -> Option<SharedSession> {
        let sessions = self.sessions.read().await;
        sessions.get(id).cloned()
    }

    /// Remove a session regardless of its status
    pub async fn remove(&self, id: &str) -> Option<SharedSession> {
        let mut sessions = self.sessions.write().await;
        sessions.remove(id)
    }

    /// Remove `id` only while it still maps to `session`
    pub async fn release(&self, id: &str, session: &SharedSession) -> bool {
        let mut sessions = self.sessions.write().await;
        match sessions.get(id) {
            Some(current) if Arc::ptr_eq(current, session) => {
                sessions.remove(id);
                true
            }
            _ => false,
        }
    }

    pub async fn contains(&self, id: &str) -> bool {
        let sessions = self.sessions.read().await;
        sessions.contains_key(id)
    }

    /// Number of live sessions
    pub async fn len(&self) -> usize {
        let sessions = self.sessions.read().await;
        sessions.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Snapshot of one session, if it is still registered
    pub async fn stats(&self, id: &str) -> Option<SessionStats> {
        let session = self.get(id).await?;
        let session = session.lock().await;
        Some(session.stats())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_create_get_remove() {
        let registry = SessionRegistry::new();

        registry.create("a").await.unwrap();
        assert!(registry.contains("a").await);
        assert_eq!(registry.len().await, 1);

        let session = registry.get("a").await.unwrap();
        assert_eq!(session.lock().await.id(), "a");

        assert!(registry.remove("a").await.is_some());
        assert!(registry.remove("a").await.is_none());
        assert!(registry.is_empty().await);
    }

    #[tokio::test]
    async fn test_duplicate_id_is_collision() {
        let registry = SessionRegistry::new();

        registry.create("dup").await.unwrap();
        let err = registry.create("dup").await.unwrap_err();

        assert_eq!(
            err,
            RegistryError::Collision {
                session_id: "dup".to_string()
            }
        );
        assert_eq!(registry.len().await, 1);
    }

    #[tokio::test]
    async fn test_release_ignores_replaced_entry() {
        let registry = SessionRegistry::new();

        let old = registry.create("s").await.unwrap();
        registry.remove("s").await;
        let current = registry.create("s").await.unwrap();

        assert!(!registry.release("s", &old).await);
        assert!(registry.contains("s").await);
        assert!(registry.release("s", &current).await);
        assert!(registry.is_empty().await);
    }

    #[tokio::test]
    async fn test_stats_for_unknown_session() {
        let registry = SessionRegistry::new();
        assert!(registry.stats("missing").await.is_none());
    }
}
