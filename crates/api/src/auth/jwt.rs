//! Access-token validation and fingerprinting.
//!
//! Access tokens are issued by the backend's auth API as HS256-signed JWTs.
//! The portal verifies them locally with the shared project secret before
//! any session lookup, so forged or expired tokens never reach the backend.
//! Tokens are keyed in memory by their SHA-256 fingerprint, never verbatim.

use clienthub_core::types::EntityId;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Claims carried by a backend access token.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject -- the identity id.
    pub sub: EntityId,
    /// Expiration time (UTC Unix timestamp).
    pub exp: i64,
    /// Issued-at time (UTC Unix timestamp).
    #[serde(default)]
    pub iat: i64,
    #[serde(default)]
    pub email: Option<String>,
}

/// Configuration for access-token validation.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// HMAC-SHA256 secret shared with the backend's auth API.
    pub secret: String,
    /// Expected `aud` claim (default: `authenticated`).
    pub audience: String,
}

/// Default audience the backend stamps on user access tokens.
const DEFAULT_AUDIENCE: &str = "authenticated";

impl JwtConfig {
    /// Load JWT configuration from environment variables.
    ///
    /// | Env Var              | Required | Default         |
    /// |----------------------|----------|-----------------|
    /// | `BACKEND_JWT_SECRET` | **yes**  | --              |
    /// | `BACKEND_JWT_AUD`    | no       | `authenticated` |
    ///
    /// # Panics
    ///
    /// Panics if `BACKEND_JWT_SECRET` is not set or is empty.
    pub fn from_env() -> Self {
        let secret = std::env::var("BACKEND_JWT_SECRET")
            .expect("BACKEND_JWT_SECRET must be set in the environment");
        assert!(!secret.is_empty(), "BACKEND_JWT_SECRET must not be empty");

        let audience =
            std::env::var("BACKEND_JWT_AUD").unwrap_or_else(|_| DEFAULT_AUDIENCE.to_string());

        Self { secret, audience }
    }
}

/// Validate and decode an access token, returning the embedded [`Claims`].
///
/// Checks the signature, expiration, and audience.
pub fn validate_token(
    token: &str,
    config: &JwtConfig,
) -> Result<Claims, jsonwebtoken::errors::Error> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_audience(&[config.audience.as_str()]);

    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &validation,
    )?;
    Ok(token_data.claims)
}

/// Compute the SHA-256 hex digest of an access token.
///
/// Used as the session registry key.
pub fn token_fingerprint(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    format!("{:x}", hasher.finalize())
}
