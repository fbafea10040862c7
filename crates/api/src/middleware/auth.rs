//! Session extractors for Axum handlers.

use std::convert::Infallible;
use std::sync::Arc;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use clienthub_backend::models::profile::Profile;
use clienthub_core::error::CoreError;

use crate::auth::cookie::token_from_headers;
use crate::auth::jwt::validate_token;
use crate::error::AppError;
use crate::session::SessionStore;
use crate::state::AppState;

/// An authenticated client session.
///
/// Credentials come from `Authorization: Bearer <token>` or the session
/// cookie. The token is verified locally, then mapped to its
/// [`SessionStore`]; an unseen token is restored from the backend and the
/// extractor waits for that check to finish.
///
/// ```ignore
/// async fn my_handler(session: ClientSession) -> AppResult<Json<()>> {
///     tracing::info!(owner = %session.profile.id, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Clone)]
pub struct ClientSession {
    pub token: String,
    pub store: Arc<SessionStore>,
    pub profile: Profile,
}

impl FromRequestParts<AppState> for ClientSession {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = token_from_headers(&parts.headers).ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized("Missing session credentials".into()))
        })?;

        let claims = validate_token(&token, &state.config.jwt).map_err(|_| {
            AppError::Core(CoreError::Unauthorized("Invalid or expired token".into()))
        })?;

        let store = state.sessions.get_or_restore(&token, claims.exp).await;
        match store.wait_resolved().await {
            Some(profile) if profile.id == claims.sub => Ok(ClientSession {
                token,
                store,
                profile,
            }),
            _ => {
                // Forget a failed restore so a later request retries it.
                if !store.is_logged_out() {
                    state.sessions.remove(&token).await;
                }
                Err(AppError::Core(CoreError::Unauthorized(
                    "Session is not valid".into(),
                )))
            }
        }
    }
}

/// Like [`ClientSession`] but never rejects: `None` when unauthenticated.
///
/// Page routes use this to redirect instead of answering 401.
pub struct MaybeClientSession(pub Option<ClientSession>);

impl FromRequestParts<AppState> for MaybeClientSession {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        Ok(Self(
            ClientSession::from_request_parts(parts, state).await.ok(),
        ))
    }
}
