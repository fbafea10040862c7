//! HTTP client for the live backend.
//!
//! Wraps the backend's auth API (`/auth/v1`) and row API (`/rest/v1`) using
//! [`reqwest`]. Every request carries the project `apikey`; user-scoped
//! requests add the caller's access token as a Bearer credential so the
//! backend's row-level policies apply.

use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::backend::{Backend, BackendSession, BackendUser, SignUpParams};
use crate::error::BackendError;
use crate::query::RowQuery;

/// Live [`Backend`] implementation over HTTP.
pub struct RestBackend {
    client: reqwest::Client,
    base_url: String,
    anon_key: String,
}

/// The sign-up endpoint returns a bare user when email confirmation is on
/// and a full session when it is off.
#[derive(Deserialize)]
#[serde(untagged)]
enum SignUpResponse {
    Session(BackendSession),
    User(BackendUser),
}

impl RestBackend {
    /// Create a client for the backend at `base_url`.
    ///
    /// * `timeout` - per-request transport timeout.
    pub fn new(
        base_url: impl Into<String>,
        anon_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, BackendError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(client, base_url, anon_key))
    }

    /// Create a client reusing an existing [`reqwest::Client`].
    pub fn with_client(
        client: reqwest::Client,
        base_url: impl Into<String>,
        anon_key: impl Into<String>,
    ) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            anon_key: anon_key.into(),
        }
    }

    fn auth_url(&self, path: &str) -> String {
        format!("{}/auth/v1/{path}", self.base_url)
    }

    fn rest_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{table}", self.base_url)
    }

    // ---- private helpers ----

    /// Ensure the response has a success status code, turning failures into
    /// [`BackendError::Api`] with whatever message the backend supplied.
    async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, BackendError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "<unreadable body>".to_string());
        let (code, message) = parse_error_body(&body);
        Err(BackendError::Api {
            status: status.as_u16(),
            code,
            message,
        })
    }

    async fn parse_response<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, BackendError> {
        let response = Self::ensure_success(response).await?;
        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|e| BackendError::Decode(e.to_string()))
    }
}

/// Pull an error code and message out of an auth or row API error body.
///
/// The auth API has used several shapes over time (`error` /
/// `error_description`, `code` / `msg`, `error_code`); the row API uses
/// `code` / `message`. Numeric `code` values are ignored.
fn parse_error_body(body: &str) -> (Option<String>, String) {
    let Ok(value) = serde_json::from_str::<serde_json::Value>(body) else {
        return (None, body.to_string());
    };

    let text = |key: &str| value.get(key).and_then(|v| v.as_str()).map(String::from);

    let code = text("error_code").or_else(|| text("code")).or_else(|| text("error"));
    let message = text("error_description")
        .or_else(|| text("msg"))
        .or_else(|| text("message"))
        .or_else(|| text("error"))
        .unwrap_or_else(|| body.to_string());

    (code, message)
}

#[async_trait]
impl Backend for RestBackend {
    async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<BackendSession, BackendError> {
        let response = self
            .client
            .post(self.auth_url("token"))
            .query(&[("grant_type", "password")])
            .header("apikey", &self.anon_key)
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()
            .await?;

        Self::parse_response(response).await
    }

    async fn sign_up(&self, params: &SignUpParams) -> Result<BackendUser, BackendError> {
        let body = serde_json::json!({
            "email": params.email,
            "password": params.password,
            "data": {
                "company_name": params.company_name,
                "contact_name": params.contact_name,
            },
        });

        let response = self
            .client
            .post(self.auth_url("signup"))
            .header("apikey", &self.anon_key)
            .json(&body)
            .send()
            .await?;

        // Any session in the response is dropped: sign-up never logs in.
        match Self::parse_response::<SignUpResponse>(response).await? {
            SignUpResponse::Session(session) => Ok(session.user),
            SignUpResponse::User(user) => Ok(user),
        }
    }

    async fn sign_out(&self, access_token: &str) -> Result<(), BackendError> {
        let response = self
            .client
            .post(self.auth_url("logout"))
            .header("apikey", &self.anon_key)
            .bearer_auth(access_token)
            .send()
            .await?;

        Self::ensure_success(response).await?;
        Ok(())
    }

    async fn get_user(&self, access_token: &str) -> Result<BackendUser, BackendError> {
        let response = self
            .client
            .get(self.auth_url("user"))
            .header("apikey", &self.anon_key)
            .bearer_auth(access_token)
            .send()
            .await?;

        Self::parse_response(response).await
    }

    async fn select(
        &self,
        access_token: &str,
        query: &RowQuery,
    ) -> Result<Vec<serde_json::Value>, BackendError> {
        tracing::debug!(table = query.table, filters = ?query.filters, "Backend row query");

        let response = self
            .client
            .get(self.rest_url(query.table))
            .query(&query.to_params())
            .header("apikey", &self.anon_key)
            .bearer_auth(access_token)
            .send()
            .await?;

        Self::parse_response(response).await
    }

    async fn health_check(&self) -> Result<(), BackendError> {
        let response = self
            .client
            .get(self.auth_url("health"))
            .header("apikey", &self.anon_key)
            .send()
            .await?;

        Self::ensure_success(response).await?;
        Ok(())
    }
}
