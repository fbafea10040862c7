//! The backend seam: authentication and parameterized row queries.

use async_trait::async_trait;
use clienthub_core::types::EntityId;
use serde::{Deserialize, Serialize};

use crate::error::BackendError;
use crate::query::RowQuery;

/// An identity as the backend's auth API reports it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackendUser {
    pub id: EntityId,
    #[serde(default)]
    pub email: Option<String>,
}

/// Tokens issued by a successful password sign-in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendSession {
    pub access_token: String,
    pub refresh_token: String,
    /// Access token lifetime in seconds.
    pub expires_in: i64,
    pub user: BackendUser,
}

/// Parameters for creating a new identity.
///
/// Company and contact names travel as user metadata; the backend creates
/// the matching profile row itself.
#[derive(Debug, Clone)]
pub struct SignUpParams {
    pub email: String,
    pub password: String,
    pub company_name: String,
    pub contact_name: String,
}

/// Operations the portal consumes from the backend-as-a-service.
///
/// Implementations must not retry; callers surface every failure.
#[async_trait]
pub trait Backend: Send + Sync {
    /// Exchange an email/password pair for a session.
    async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<BackendSession, BackendError>;

    /// Create a new identity. Never returns a usable session.
    async fn sign_up(&self, params: &SignUpParams) -> Result<BackendUser, BackendError>;

    /// Invalidate the session behind `access_token`.
    async fn sign_out(&self, access_token: &str) -> Result<(), BackendError>;

    /// Resolve the identity behind `access_token` (session restore).
    async fn get_user(&self, access_token: &str) -> Result<BackendUser, BackendError>;

    /// Run a row query on behalf of the identity behind `access_token`.
    ///
    /// Rows come back in the order the query requests.
    async fn select(
        &self,
        access_token: &str,
        query: &RowQuery,
    ) -> Result<Vec<serde_json::Value>, BackendError>;

    /// Reachability check.
    async fn health_check(&self) -> Result<(), BackendError>;
}
