//! Errors surfaced by the backend adapter.

/// Error codes the auth API uses for rejected credentials.
const INVALID_CREDENTIAL_CODES: &[&str] = &["invalid_grant", "invalid_credentials"];

/// Error codes the auth API uses when an email is already registered.
const DUPLICATE_USER_CODES: &[&str] = &["user_already_exists", "email_exists"];

#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout).
    #[error("Backend request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The backend answered with a non-2xx status.
    #[error("Backend error ({status}): {message}")]
    Api {
        status: u16,
        /// Machine-readable error code, when the backend sends one.
        code: Option<String>,
        /// Human-readable message from the backend.
        message: String,
    },

    /// A response body did not match the expected shape.
    #[error("Failed to decode backend response: {0}")]
    Decode(String),
}

impl BackendError {
    /// The backend rejected an email/password pair.
    pub fn is_invalid_credentials(&self) -> bool {
        match self {
            Self::Api {
                status,
                code,
                message,
            } => {
                code.as_deref()
                    .is_some_and(|c| INVALID_CREDENTIAL_CODES.contains(&c))
                    || (*status == 400 && message.contains("Invalid login credentials"))
            }
            _ => false,
        }
    }

    /// Sign-up failed because the email already has an account.
    pub fn is_duplicate_user(&self) -> bool {
        match self {
            Self::Api { code, message, .. } => {
                code.as_deref()
                    .is_some_and(|c| DUPLICATE_USER_CODES.contains(&c))
                    || message.contains("already registered")
                    || message.contains("already exists")
            }
            _ => false,
        }
    }

    /// The access token was rejected (expired, revoked, or forged).
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Api { status: 401 | 403, .. })
    }
}
