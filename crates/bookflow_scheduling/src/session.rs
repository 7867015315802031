// --- File: crates/bookflow_scheduling/src/session.rs ---

use crate::wizard::BookingWizard;
use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::debug;
use uuid::Uuid;

pub type SharedWizard = Arc<Mutex<BookingWizard>>;

struct SessionEntry {
    wizard: SharedWizard,
    last_seen: DateTime<Utc>,
}

/// Hosted wizard sessions keyed by id.
///
/// Each wizard has its own lock, so one session waiting on a slow sink does
/// not hold up the others.
pub struct SessionStore {
    sessions: Mutex<HashMap<Uuid, SessionEntry>>,
    ttl: Duration,
}

impl SessionStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            sessions: Mutex::new(HashMap::new()),
            ttl,
        }
    }

    pub async fn insert(&self, wizard: BookingWizard) -> (Uuid, SharedWizard) {
        let id = Uuid::new_v4();
        let wizard = Arc::new(Mutex::new(wizard));
        self.sessions.lock().await.insert(
            id,
            SessionEntry {
                wizard: Arc::clone(&wizard),
                last_seen: Utc::now(),
            },
        );
        debug!("Session {} created", id);
        (id, wizard)
    }

    /// Looks a session up and marks it as recently used.
    pub async fn get(&self, id: Uuid) -> Option<SharedWizard> {
        let mut sessions = self.sessions.lock().await;
        let entry = sessions.get_mut(&id)?;
        entry.last_seen = Utc::now();
        Some(Arc::clone(&entry.wizard))
    }

    pub async fn remove(&self, id: Uuid) -> bool {
        let removed = self.sessions.lock().await.remove(&id).is_some();
        if removed {
            debug!("Session {} discarded", id);
        }
        removed
    }

    /// Drops sessions idle for longer than the TTL; returns how many.
    pub async fn prune(&self, now: DateTime<Utc>) -> usize {
        let mut sessions = self.sessions.lock().await;
        let before = sessions.len();
        sessions.retain(|_, entry| now - entry.last_seen <= self.ttl);
        let pruned = before - sessions.len();
        if pruned > 0 {
            debug!("Pruned {} idle sessions", pruned);
        }
        pruned
    }

    pub async fn len(&self) -> usize {
        self.sessions.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}
