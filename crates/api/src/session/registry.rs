use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use clienthub_backend::Backend;
use tokio::sync::RwLock;

use super::store::SessionStore;
use crate::auth::jwt::token_fingerprint;

/// Live sessions keyed by the SHA-256 fingerprint of their access token.
///
/// Safe to share across tasks via `Arc<SessionRegistry>`.
pub struct SessionRegistry {
    backend: Arc<dyn Backend>,
    sessions: RwLock<HashMap<String, Arc<SessionStore>>>,
    stale_after: Duration,
}

impl SessionRegistry {
    /// `stale_after` is handed to every session's query cache.
    pub fn new(backend: Arc<dyn Backend>, stale_after: Duration) -> Self {
        Self {
            backend,
            sessions: RwLock::new(HashMap::new()),
            stale_after,
        }
    }

    /// Look up the session for `access_token`, restoring it when unknown.
    ///
    /// Concurrent misses for the same token share one restoring store.
    pub async fn get_or_restore(&self, access_token: &str, expires_at: i64) -> Arc<SessionStore> {
        let key = token_fingerprint(access_token);
        if let Some(store) = self.sessions.read().await.get(&key) {
            return Arc::clone(store);
        }

        let mut sessions = self.sessions.write().await;
        let store = sessions.entry(key).or_insert_with(|| {
            tracing::debug!("Restoring session for unseen token");
            SessionStore::restore(
                Arc::clone(&self.backend),
                access_token.to_string(),
                expires_at,
                self.stale_after,
            )
        });
        Arc::clone(store)
    }

    /// Register a session established by a login.
    pub async fn insert(&self, access_token: &str, store: Arc<SessionStore>) {
        self.sessions
            .write()
            .await
            .insert(token_fingerprint(access_token), store);
    }

    /// The store to log out for `access_token`.
    ///
    /// The entry stays registered (as logged out) until the token expires,
    /// so re-presenting the token does not restore the session.
    pub async fn end(&self, access_token: &str, expires_at: i64) -> Arc<SessionStore> {
        let mut sessions = self.sessions.write().await;
        let store = sessions
            .entry(token_fingerprint(access_token))
            .or_insert_with(|| {
                SessionStore::ended(
                    Arc::clone(&self.backend),
                    access_token.to_string(),
                    expires_at,
                    self.stale_after,
                )
            });
        Arc::clone(store)
    }

    pub async fn remove(&self, access_token: &str) -> Option<Arc<SessionStore>> {
        self.sessions
            .write()
            .await
            .remove(&token_fingerprint(access_token))
    }

    /// Drop sessions whose token expired at or before `now`. Returns the
    /// number removed.
    pub async fn purge_expired(&self, now: i64) -> usize {
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, store| !store.is_expired(now));
        before - sessions.len()
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }

    pub fn stale_after(&self) -> Duration {
        self.stale_after
    }
}
