//! Login and sign-up against the backend's auth API.
//!
//! Expected failures (bad credentials, duplicate email, invalid form input)
//! are outcomes carrying a user-displayable reason, never errors.

use clienthub_backend::models::profile::Profile;
use clienthub_backend::repositories::ProfileRepo;
use clienthub_backend::{Backend, BackendError, BackendSession, SignUpParams};
use clienthub_core::signup::{validate_signup, SignUpRequest};
use clienthub_core::types::EntityId;

/// Reason shown for unknown emails and wrong passwords alike.
pub const INVALID_CREDENTIALS: &str = "Invalid email or password";

/// Reason shown when signing up with an email that is already registered.
pub const DUPLICATE_ACCOUNT: &str = "An account with this email already exists";

/// Reason shown when an identity signs in but has no client profile.
pub const MISSING_PROFILE: &str = "No client profile is associated with this account";

/// Reason shown when the backend could not be reached.
pub const BACKEND_UNAVAILABLE: &str = "Unable to reach the server. Please try again.";

#[derive(Debug)]
pub enum LoginOutcome {
    Success {
        session: BackendSession,
        profile: Profile,
    },
    Failure {
        reason: String,
    },
}

/// Why a sign-up was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignupFailureKind {
    /// The form input was rejected (locally or by the backend).
    Invalid,
    /// The email is already registered.
    Duplicate,
    /// The backend could not be reached or answered unexpectedly.
    Unavailable,
}

#[derive(Debug)]
pub enum SignupOutcome {
    /// The identity exists. The caller is NOT logged in.
    Created { user_id: EntityId },
    Failure {
        kind: SignupFailureKind,
        reason: String,
    },
}

/// Stateless auth operations over a [`Backend`].
pub struct AuthService;

impl AuthService {
    /// Exchange credentials for a session and load the identity's profile.
    pub async fn login(backend: &dyn Backend, email: &str, password: &str) -> LoginOutcome {
        let session = match backend.sign_in_with_password(email.trim(), password).await {
            Ok(session) => session,
            Err(err) => {
                let reason = login_failure_reason(&err);
                tracing::info!(error = %err, "Login rejected");
                return LoginOutcome::Failure { reason };
            }
        };

        let user_id = session.user.id;
        match ProfileRepo::find_by_id(backend, &session.access_token, user_id).await {
            Ok(Some(profile)) => {
                tracing::info!(user_id = %user_id, "User logged in");
                LoginOutcome::Success { session, profile }
            }
            Ok(None) => {
                tracing::warn!(user_id = %user_id, "Login succeeded but no profile row exists");
                Self::discard_session(backend, &session).await;
                LoginOutcome::Failure {
                    reason: MISSING_PROFILE.to_string(),
                }
            }
            Err(err) => {
                tracing::warn!(user_id = %user_id, error = %err, "Profile load failed after login");
                Self::discard_session(backend, &session).await;
                LoginOutcome::Failure {
                    reason: BACKEND_UNAVAILABLE.to_string(),
                }
            }
        }
    }

    /// Create an identity. Never authenticates the caller.
    pub async fn signup(backend: &dyn Backend, request: &SignUpRequest) -> SignupOutcome {
        let request = request.trimmed();
        if let Err(reason) = validate_signup(&request) {
            return SignupOutcome::Failure {
                kind: SignupFailureKind::Invalid,
                reason,
            };
        }

        let params = SignUpParams {
            email: request.email,
            password: request.password,
            company_name: request.company_name,
            contact_name: request.contact_name,
        };

        match backend.sign_up(&params).await {
            Ok(user) => {
                tracing::info!(user_id = %user.id, "Client account created");
                SignupOutcome::Created { user_id: user.id }
            }
            Err(err) if err.is_duplicate_user() => SignupOutcome::Failure {
                kind: SignupFailureKind::Duplicate,
                reason: DUPLICATE_ACCOUNT.to_string(),
            },
            Err(BackendError::Api {
                status, message, ..
            }) if (400..500).contains(&status) => SignupOutcome::Failure {
                kind: SignupFailureKind::Invalid,
                reason: message,
            },
            Err(err) => {
                tracing::warn!(error = %err, "Sign-up failed");
                SignupOutcome::Failure {
                    kind: SignupFailureKind::Unavailable,
                    reason: BACKEND_UNAVAILABLE.to_string(),
                }
            }
        }
    }

    async fn discard_session(backend: &dyn Backend, session: &BackendSession) {
        if let Err(err) = backend.sign_out(&session.access_token).await {
            tracing::debug!(error = %err, "Sign-out of unusable session failed");
        }
    }
}

fn login_failure_reason(err: &BackendError) -> String {
    if err.is_invalid_credentials() {
        return INVALID_CREDENTIALS.to_string();
    }
    match err {
        BackendError::Api { status, message, .. } if (400..500).contains(status) && !message.is_empty() => {
            message.clone()
        }
        _ => BACKEND_UNAVAILABLE.to_string(),
    }
}
