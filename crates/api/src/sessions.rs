use std::collections::HashMap;

use chrono::{DateTime, Utc};
use promo_core::eligibility::{InMemorySessionStore, SessionStore};
use tokio::sync::RwLock;
use uuid::Uuid;

/// One visitor's browsing session.
pub struct VisitorSession {
    /// Popup sets this visitor already dismissed.
    pub store: InMemorySessionStore,
    pub created_at: DateTime<Utc>,
    /// Refreshed on every eligibility check or seen write; drives pruning.
    pub last_seen_at: DateTime<Utc>,
}

impl VisitorSession {
    fn new() -> Self {
        let now = Utc::now();
        Self {
            store: InMemorySessionStore::new(),
            created_at: now,
            last_seen_at: now,
        }
    }
}

/// Result of recording a seen key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeenWrite {
    Recorded,
    /// The key was already recorded; nothing changed.
    AlreadyRecorded,
    /// The session holds its maximum number of keys; the key was not recorded.
    LimitReached,
}

/// Holds the seen-records of every live visitor session.
///
/// Thread-safe via interior `RwLock`; designed to be wrapped in `Arc` and
/// shared across the application.
pub struct SessionRegistry {
    sessions: RwLock<HashMap<Uuid, VisitorSession>>,
    max_sessions: usize,
    max_seen_keys: usize,
}

impl SessionRegistry {
    pub fn new(max_sessions: usize, max_seen_keys: usize) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            max_sessions,
            max_seen_keys,
        }
    }

    /// Open a new session. Returns `None` when the registry is full.
    pub async fn create(&self) -> Option<(Uuid, DateTime<Utc>)> {
        let mut sessions = self.sessions.write().await;
        if sessions.len() >= self.max_sessions {
            return None;
        }
        let id = Uuid::new_v4();
        let session = VisitorSession::new();
        let created_at = session.created_at;
        sessions.insert(id, session);
        Some((id, created_at))
    }

    /// Whether session `id` already dismissed the set behind `key`.
    /// `None` when the session is unknown.
    pub async fn has_seen(&self, id: Uuid, key: &str) -> Option<bool> {
        let mut sessions = self.sessions.write().await;
        let session = sessions.get_mut(&id)?;
        session.last_seen_at = Utc::now();
        Some(session.store.has_seen(key))
    }

    /// Record `key` for session `id`, at most `max_seen_keys` per session.
    /// `None` when the session is unknown.
    pub async fn mark_seen(&self, id: Uuid, key: &str) -> Option<SeenWrite> {
        let mut sessions = self.sessions.write().await;
        let session = sessions.get_mut(&id)?;
        session.last_seen_at = Utc::now();
        if session.store.has_seen(key) {
            return Some(SeenWrite::AlreadyRecorded);
        }
        if session.store.len() >= self.max_seen_keys {
            return Some(SeenWrite::LimitReached);
        }
        session.store.mark_seen(key);
        Some(SeenWrite::Recorded)
    }

    /// Number of keys recorded for session `id`.
    pub async fn seen_count(&self, id: Uuid) -> Option<usize> {
        self.sessions.read().await.get(&id).map(|s| s.store.len())
    }

    /// Drop sessions idle since before `cutoff`. Returns how many were removed.
    pub async fn prune_idle_since(&self, cutoff: DateTime<Utc>) -> usize {
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, s| s.last_seen_at >= cutoff);
        before - sessions.len()
    }

    /// Return the current number of tracked sessions.
    pub async fn session_count(&self) -> usize {
        self.sessions.read().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn create_respects_capacity() {
        let registry = SessionRegistry::new(2, 8);
        assert!(registry.create().await.is_some());
        assert!(registry.create().await.is_some());
        assert!(registry.create().await.is_none());
        assert_eq!(registry.session_count().await, 2);
    }

    #[tokio::test]
    async fn seen_is_written_once_per_session() {
        let registry = SessionRegistry::new(10, 8);
        let (a, _) = registry.create().await.unwrap();
        let (b, _) = registry.create().await.unwrap();

        assert_eq!(registry.has_seen(a, "k").await, Some(false));
        assert_eq!(registry.mark_seen(a, "k").await, Some(SeenWrite::Recorded));
        assert_eq!(registry.mark_seen(a, "k").await, Some(SeenWrite::AlreadyRecorded));
        assert_eq!(registry.has_seen(a, "k").await, Some(true));
        assert_eq!(registry.seen_count(a).await, Some(1));

        // Sessions do not share records.
        assert_eq!(registry.has_seen(b, "k").await, Some(false));
    }

    #[tokio::test]
    async fn seen_keys_are_capped_per_session() {
        let registry = SessionRegistry::new(10, 2);
        let (a, _) = registry.create().await.unwrap();
        let (b, _) = registry.create().await.unwrap();

        assert_eq!(registry.mark_seen(a, "k1").await, Some(SeenWrite::Recorded));
        assert_eq!(registry.mark_seen(a, "k2").await, Some(SeenWrite::Recorded));
        assert_eq!(registry.mark_seen(a, "k3").await, Some(SeenWrite::LimitReached));
        assert_eq!(registry.has_seen(a, "k3").await, Some(false));
        assert_eq!(registry.seen_count(a).await, Some(2));

        // Keys already held still report as recorded at the limit.
        assert_eq!(registry.mark_seen(a, "k1").await, Some(SeenWrite::AlreadyRecorded));
        // The cap is per session.
        assert_eq!(registry.mark_seen(b, "k3").await, Some(SeenWrite::Recorded));
    }

    #[tokio::test]
    async fn unknown_session_is_none() {
        let registry = SessionRegistry::new(10, 8);
        let id = Uuid::new_v4();
        assert_eq!(registry.has_seen(id, "k").await, None);
        assert_eq!(registry.mark_seen(id, "k").await, None);
        assert_eq!(registry.seen_count(id).await, None);
    }

    #[tokio::test]
    async fn prune_drops_idle_sessions() {
        let registry = SessionRegistry::new(10, 8);
        registry.create().await.unwrap();
        registry.create().await.unwrap();

        assert_eq!(
            registry
                .prune_idle_since(Utc::now() - chrono::Duration::hours(1))
                .await,
            0
        );
        assert_eq!(
            registry
                .prune_idle_since(Utc::now() + chrono::Duration::seconds(1))
                .await,
            2
        );
        assert_eq!(registry.session_count().await, 0);
    }
}
