use std::{
    collections::HashMap,
    sync::Arc,
    time::{Duration, Instant},
};

use tokio::sync::{Mutex, RwLock, broadcast, watch};
use tracing::{debug, warn};
use uuid::Uuid;

use super::{AccessLevel, SiteSession};
use crate::store::{Change, StoreEvent};

pub type SessionHandle = Arc<Mutex<SiteSession>>;

/// Live site sessions keyed by their cookie token.
#[derive(Clone)]
pub struct SessionRegistry {
    sessions: Arc<RwLock<HashMap<Uuid, SessionHandle>>>,
    unlock_window: Duration,
    unlock_activations: u32,
}

impl SessionRegistry {
    pub fn new(unlock_window: Duration, unlock_activations: u32) -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            unlock_window,
            unlock_activations,
        }
    }

    pub async fn get(&self, token: Uuid) -> Option<SessionHandle> {
        let guard = self.sessions.read().await;
        guard.get(&token).cloned()
    }

    pub async fn create(&self) -> (Uuid, SessionHandle) {
        let session = SiteSession::new(self.unlock_window, self.unlock_activations);
        let events = session.store().subscribe();
        let level = session.flag().subscribe();
        let session = Arc::new(Mutex::new(session));

        let mut guard = self.sessions.write().await;
        let token = loop {
            let candidate = Uuid::new_v4();
            if !guard.contains_key(&candidate) {
                break candidate;
            }
        };
        guard.insert(token, session.clone());
        tokio::spawn(observe_session(token, events, level));
        (token, session)
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    /// Drops sessions idle for longer than `max_idle`. Sessions currently in
    /// use by a request are kept.
    pub async fn sweep_idle(&self, now: Instant, max_idle: Duration) -> usize {
        let mut guard = self.sessions.write().await;
        let before = guard.len();
        guard.retain(|_, session| match session.try_lock() {
            Ok(session) => session.idle_for(now) <= max_idle,
            Err(_) => true,
        });
        before - guard.len()
    }
}

/// Logs store mutations and access-level changes for one session. Ends once
/// the session is dropped.
async fn observe_session(
    token: Uuid,
    mut events: broadcast::Receiver<StoreEvent>,
    mut level: watch::Receiver<AccessLevel>,
) {
    loop {
        tokio::select! {
            event = events.recv() => match event {
                Ok(StoreEvent { collection, change: Change::Added(id) }) => {
                    debug!(session = %token, collection = collection.as_str(), %id, "record added");
                }
                Ok(StoreEvent { collection, change: Change::Removed(id) }) => {
                    debug!(session = %token, collection = collection.as_str(), %id, "record removed");
                }
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    warn!(session = %token, skipped, "session observer lagged");
                }
                Err(broadcast::error::RecvError::Closed) => break,
            },
            changed = level.changed() => {
                if changed.is_err() {
                    break;
                }
                let current = *level.borrow_and_update();
                debug!(session = %token, level = ?current, "access level changed");
            }
        }
    }
    debug!(session = %token, "session observer stopped");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::ContactFields;

    #[tokio::test]
    async fn sessions_are_isolated_and_retrievable() {
        let registry = SessionRegistry::new(Duration::from_secs(2), 3);
        let (first, first_session) = registry.create().await;
        let (second, _) = registry.create().await;
        assert_ne!(first, second);

        first_session.lock().await.flag().set_elevated(true);

        let again = registry.get(first).await.expect("present");
        assert!(again.lock().await.is_elevated());
        let other = registry.get(second).await.expect("present");
        assert!(!other.lock().await.is_elevated());
        assert!(registry.get(Uuid::new_v4()).await.is_none());
    }

    #[tokio::test]
    async fn sweep_removes_only_idle_sessions() {
        let registry = SessionRegistry::new(Duration::from_secs(2), 3);
        let (stale, stale_session) = registry.create().await;
        let (fresh, fresh_session) = registry.create().await;

        let now = Instant::now() + Duration::from_secs(600);
        fresh_session.lock().await.touch(now);
        drop(stale_session);

        let removed = registry.sweep_idle(now, Duration::from_secs(300)).await;
        assert_eq!(removed, 1);
        assert!(registry.get(stale).await.is_none());
        assert!(registry.get(fresh).await.is_some());
        assert_eq!(registry.len().await, 1);
    }

    #[tokio::test]
    async fn observer_drains_events_and_stops_with_session() {
        let session = SiteSession::new(Duration::from_secs(2), 3);
        let observer = tokio::spawn(observe_session(
            Uuid::new_v4(),
            session.store().subscribe(),
            session.flag().subscribe(),
        ));

        let mut session = session;
        session.flag().set_elevated(true);
        session.store_mut().add_contact(ContactFields {
            name: "Meera".into(),
            email: "meera@example.com".into(),
            message: "Bus routes?".into(),
            ..Default::default()
        });
        drop(session);

        tokio::time::timeout(Duration::from_secs(1), observer)
            .await
            .expect("observer stops once the session is gone")
            .expect("observer task completes");
    }
}
