//! Handlers for the `/auth` resource (login, sign-up, logout, session).

use axum::extract::State;
use axum::http::header::{LOCATION, SET_COOKIE};
use axum::http::{HeaderMap, HeaderName, StatusCode};
use axum::Json;
use chrono::Utc;
use clienthub_backend::models::profile::Profile;
use clienthub_core::error::CoreError;
use clienthub_core::signup::SignUpRequest;
use clienthub_core::types::EntityId;
use serde::{Deserialize, Serialize};

use crate::auth::cookie::{clear_session_cookie, session_cookie, token_from_headers};
use crate::auth::jwt::validate_token;
use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::session::{AuthService, LoginOutcome, SessionStore, SignupFailureKind, SignupOutcome};
use crate::state::AppState;

/// Message returned after a successful sign-up. The caller is not logged in.
pub const SIGNUP_CREATED_MESSAGE: &str = "Account created. You can now log in.";

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Successful login response.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub refresh_token: String,
    /// Access token lifetime in seconds.
    pub expires_in: i64,
    pub profile: Profile,
}

/// Successful sign-up response.
#[derive(Debug, Serialize)]
pub struct SignupResponse {
    pub user_id: EntityId,
    pub message: &'static str,
}

/// Snapshot of the caller's session.
#[derive(Debug, Serialize)]
pub struct SessionSnapshot {
    /// The initial session check is still running.
    pub loading: bool,
    pub authenticated: bool,
    pub profile: Option<Profile>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/auth/login
///
/// Authenticate with email + password. Returns the backend tokens and the
/// client profile, and sets the session cookie for page navigation.
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<([(HeaderName, String); 1], Json<AuthResponse>)> {
    let (session, profile) =
        match AuthService::login(state.backend.as_ref(), &input.email, &input.password).await {
            LoginOutcome::Success { session, profile } => (session, profile),
            LoginOutcome::Failure { reason } => {
                return Err(AppError::Core(CoreError::Unauthorized(reason)));
            }
        };

    let expires_at = Utc::now().timestamp() + session.expires_in;
    let store = SessionStore::resolved(
        state.backend.clone(),
        session.access_token.clone(),
        expires_at,
        profile.clone(),
        state.sessions.stale_after(),
    );
    state.sessions.insert(&session.access_token, store).await;

    let cookie = session_cookie(
        &session.access_token,
        session.expires_in,
        state.config.cookie_secure,
    );

    Ok((
        [(SET_COOKIE, cookie)],
        Json(AuthResponse {
            access_token: session.access_token,
            refresh_token: session.refresh_token,
            expires_in: session.expires_in,
            profile,
        }),
    ))
}

/// POST /api/v1/auth/signup
///
/// Create a client account. Does not log the caller in.
pub async fn signup(
    State(state): State<AppState>,
    Json(input): Json<SignUpRequest>,
) -> AppResult<(StatusCode, Json<SignupResponse>)> {
    match AuthService::signup(state.backend.as_ref(), &input).await {
        SignupOutcome::Created { user_id } => Ok((
            StatusCode::CREATED,
            Json(SignupResponse {
                user_id,
                message: SIGNUP_CREATED_MESSAGE,
            }),
        )),
        SignupOutcome::Failure { kind, reason } => Err(match kind {
            SignupFailureKind::Invalid => AppError::Core(CoreError::Validation(reason)),
            SignupFailureKind::Duplicate => AppError::Core(CoreError::Conflict(reason)),
            SignupFailureKind::Unavailable => AppError::Unavailable(reason),
        }),
    }
}

/// POST /api/v1/auth/logout
///
/// Always succeeds: the local session and cookie are cleared even when the
/// backend sign-out fails or the token is already invalid. `Location` points
/// the client back at the landing page.
pub async fn logout(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> (StatusCode, [(HeaderName, String); 2]) {
    if let Some(token) = token_from_headers(&headers) {
        match validate_token(&token, &state.config.jwt) {
            Ok(claims) => {
                let store = state.sessions.end(&token, claims.exp).await;
                store.logout().await;
                tracing::info!(user_id = %claims.sub, "User logged out");
            }
            // Expired or foreign token: nothing to keep locally.
            Err(_) => {
                if let Err(err) = state.backend.sign_out(&token).await {
                    tracing::debug!(error = %err, "Sign-out of invalid token failed");
                }
            }
        }
    }

    (
        StatusCode::NO_CONTENT,
        [
            (SET_COOKIE, clear_session_cookie(state.config.cookie_secure)),
            (LOCATION, "/".to_string()),
        ],
    )
}

/// GET /api/v1/auth/session
///
/// Current session state without waiting for a pending restore.
pub async fn session(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Json<DataResponse<SessionSnapshot>> {
    let claims = token_from_headers(&headers)
        .and_then(|token| validate_token(&token, &state.config.jwt).ok().map(|c| (token, c)));

    let snapshot = match claims {
        Some((token, claims)) => {
            let store = state.sessions.get_or_restore(&token, claims.exp).await;
            SessionSnapshot {
                loading: store.is_loading(),
                authenticated: store.is_authenticated(),
                profile: store.profile(),
            }
        }
        None => SessionSnapshot {
            loading: false,
            authenticated: false,
            profile: None,
        },
    };

    Json(DataResponse { data: snapshot })
}
