use crate::auth::jwt::JwtConfig;

/// Server configuration loaded from environment variables.
///
/// All fields except the backend connection have defaults suitable for
/// local development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Mark the session cookie `Secure` (default: `false`).
    pub cookie_secure: bool,
    /// How long a fetched query result is served from cache (default: `30`).
    pub query_stale_secs: u64,
    /// Backend-as-a-service connection settings.
    pub backend: BackendSettings,
    /// Access-token validation settings.
    pub jwt: JwtConfig,
}

/// Where the backend lives and how to reach it.
#[derive(Debug, Clone)]
pub struct BackendSettings {
    /// Project base URL, e.g. `https://xyz.supabase.co`.
    pub url: String,
    /// Public anon key sent as the `apikey` header.
    pub anon_key: String,
    /// Per-request transport timeout in seconds.
    pub timeout_secs: u64,
    /// Storage bucket holding deliverable files.
    pub storage_bucket: String,
}

impl BackendSettings {
    /// Public object URL prefix for the deliverables bucket.
    pub fn storage_base(&self) -> String {
        format!(
            "{}/storage/v1/object/public/{}",
            self.url.trim_end_matches('/'),
            self.storage_bucket
        )
    }
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `3000`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
    /// | `COOKIE_SECURE`        | `false`                    |
    /// | `QUERY_STALE_SECS`     | `30`                       |
    /// | `BACKEND_URL`          | required                   |
    /// | `BACKEND_ANON_KEY`     | required                   |
    /// | `BACKEND_TIMEOUT_SECS` | `15`                       |
    /// | `STORAGE_BUCKET`       | `deliverables`             |
    ///
    /// JWT settings are read by [`JwtConfig::from_env`].
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let cookie_secure = std::env::var("COOKIE_SECURE")
            .map(|v| matches!(v.trim(), "1" | "true" | "yes"))
            .unwrap_or(false);

        let query_stale_secs: u64 = std::env::var("QUERY_STALE_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("QUERY_STALE_SECS must be a valid u64");

        let backend = BackendSettings {
            url: std::env::var("BACKEND_URL").expect("BACKEND_URL must be set"),
            anon_key: std::env::var("BACKEND_ANON_KEY").expect("BACKEND_ANON_KEY must be set"),
            timeout_secs: std::env::var("BACKEND_TIMEOUT_SECS")
                .unwrap_or_else(|_| "15".into())
                .parse()
                .expect("BACKEND_TIMEOUT_SECS must be a valid u64"),
            storage_bucket: std::env::var("STORAGE_BUCKET")
                .unwrap_or_else(|_| "deliverables".into()),
        };

        let jwt = JwtConfig::from_env();

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            cookie_secure,
            query_stale_secs,
            backend,
            jwt,
        }
    }
}
