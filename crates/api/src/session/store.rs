//! Per-identity session state.
//!
//! A [`SessionStore`] is created either resolved (right after a login) or
//! loading (restoring a token presented by a client the service has not
//! seen yet). The phase lives in a [`watch`] channel and leaves
//! [`SessionPhase::Loading`] exactly once.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use clienthub_backend::models::profile::Profile;
use clienthub_backend::repositories::ProfileRepo;
use clienthub_backend::Backend;
use clienthub_core::types::EntityId;
use tokio::sync::watch;

use crate::query::{DataAccess, Queries};

/// Lifecycle of the identity behind one access token.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionPhase {
    /// The initial session check has not completed.
    Loading,
    /// The check completed. `None` means no valid session.
    Resolved(Option<Profile>),
}

/// Session state for one access token.
pub struct SessionStore {
    backend: Arc<dyn Backend>,
    access_token: String,
    /// Token expiry (UTC Unix timestamp).
    expires_at: i64,
    phase: watch::Sender<SessionPhase>,
    queries: Queries,
    logged_out: AtomicBool,
}

impl SessionStore {
    fn new(
        backend: Arc<dyn Backend>,
        access_token: String,
        expires_at: i64,
        phase: SessionPhase,
        stale_after: Duration,
    ) -> Self {
        let (phase, _) = watch::channel(phase);
        Self {
            backend,
            access_token,
            expires_at,
            phase,
            queries: Queries::new(stale_after),
            logged_out: AtomicBool::new(false),
        }
    }

    /// A store for a session that was just established by a login.
    pub fn resolved(
        backend: Arc<dyn Backend>,
        access_token: String,
        expires_at: i64,
        profile: Profile,
        stale_after: Duration,
    ) -> Arc<Self> {
        Arc::new(Self::new(
            backend,
            access_token,
            expires_at,
            SessionPhase::Resolved(Some(profile)),
            stale_after,
        ))
    }

    /// A store for a token that is being logged out without ever having
    /// been seen. Starts resolved with no profile; nothing is restored.
    pub fn ended(
        backend: Arc<dyn Backend>,
        access_token: String,
        expires_at: i64,
        stale_after: Duration,
    ) -> Arc<Self> {
        Arc::new(Self::new(
            backend,
            access_token,
            expires_at,
            SessionPhase::Resolved(None),
            stale_after,
        ))
    }

    /// A store that restores an existing session in the background.
    ///
    /// Returns immediately in [`SessionPhase::Loading`]. The spawned check
    /// asks the backend who owns the token, then loads that identity's
    /// profile. Any failure resolves to "no session".
    pub fn restore(
        backend: Arc<dyn Backend>,
        access_token: String,
        expires_at: i64,
        stale_after: Duration,
    ) -> Arc<Self> {
        let store = Arc::new(Self::new(
            backend,
            access_token,
            expires_at,
            SessionPhase::Loading,
            stale_after,
        ));

        let task_store = Arc::clone(&store);
        tokio::spawn(async move {
            let profile = task_store.check_session().await;
            task_store.resolve(profile);
        });

        store
    }

    async fn check_session(&self) -> Option<Profile> {
        let user = match self.backend.get_user(&self.access_token).await {
            Ok(user) => user,
            Err(err) => {
                tracing::info!(error = %err, "Session restore rejected by backend");
                return None;
            }
        };

        match ProfileRepo::find_by_id(self.backend.as_ref(), &self.access_token, user.id).await {
            Ok(Some(profile)) => {
                tracing::debug!(user_id = %user.id, "Session restored");
                Some(profile)
            }
            Ok(None) => {
                tracing::warn!(user_id = %user.id, "Identity has no profile row");
                None
            }
            Err(err) => {
                tracing::warn!(user_id = %user.id, error = %err, "Profile load failed during restore");
                None
            }
        }
    }

    /// Leave `Loading`. No-op once resolved.
    fn resolve(&self, profile: Option<Profile>) {
        self.phase.send_if_modified(|phase| {
            if matches!(phase, SessionPhase::Loading) {
                *phase = SessionPhase::Resolved(profile);
                true
            } else {
                false
            }
        });
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase.borrow().clone()
    }

    /// Wait for the initial session check, then return the profile.
    pub async fn wait_resolved(&self) -> Option<Profile> {
        let mut rx = self.phase.subscribe();
        let phase = rx
            .wait_for(|phase| !matches!(phase, SessionPhase::Loading))
            .await;
        match phase.as_deref() {
            Ok(SessionPhase::Resolved(profile)) => profile.clone(),
            _ => None,
        }
    }

    pub fn profile(&self) -> Option<Profile> {
        match &*self.phase.borrow() {
            SessionPhase::Resolved(profile) => profile.clone(),
            SessionPhase::Loading => None,
        }
    }

    /// Present iff a profile is present.
    pub fn is_authenticated(&self) -> bool {
        matches!(&*self.phase.borrow(), SessionPhase::Resolved(Some(_)))
    }

    pub fn is_loading(&self) -> bool {
        matches!(&*self.phase.borrow(), SessionPhase::Loading)
    }

    /// Identity whose data this session may read.
    pub fn owner_id(&self) -> Option<EntityId> {
        self.profile().map(|profile| profile.id)
    }

    /// Set once [`SessionStore::logout`] has run. The token stays rejected
    /// locally until it expires.
    pub fn is_logged_out(&self) -> bool {
        self.logged_out.load(Ordering::SeqCst)
    }

    pub fn is_expired(&self, now: i64) -> bool {
        self.expires_at <= now
    }

    /// Reads scoped to this session.
    pub fn data(&self) -> DataAccess<'_> {
        DataAccess::new(self.backend.as_ref(), &self.access_token, &self.queries)
    }

    /// End the session.
    ///
    /// The backend sign-out is best-effort: the profile and every cached or
    /// in-flight query are dropped whatever the backend says.
    pub async fn logout(&self) {
        if let Err(err) = self.backend.sign_out(&self.access_token).await {
            tracing::warn!(error = %err, "Backend sign-out failed, clearing session anyway");
        }
        self.logged_out.store(true, Ordering::SeqCst);
        self.phase.send_replace(SessionPhase::Resolved(None));
        self.queries.clear().await;
    }
}
