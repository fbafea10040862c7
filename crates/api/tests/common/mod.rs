#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE, COOKIE};
use axum::http::{Method, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::sync::Notify;
use tower::ServiceExt;
use uuid::Uuid;

use clienthub_api::auth::jwt::JwtConfig;
use clienthub_api::config::{BackendSettings, ServerConfig};
use clienthub_api::router::build_app_router;
use clienthub_api::session::SessionRegistry;
use clienthub_api::state::AppState;
use clienthub_backend::{Backend, BackendError, BackendSession, BackendUser, RowQuery, SignUpParams};

pub const TEST_JWT_SECRET: &str = "test-secret-that-is-long-enough-for-hmac";
pub const STORAGE_BASE: &str = "http://backend.test/storage/v1/object/public/deliverables";

pub const JOHN_ID: &str = "7f1c2b9e-3d6a-4f1e-9a51-1c0e7e8a2b44";
pub const JOHN_EMAIL: &str = "john@acmecorp.com";
pub const JOHN_PASSWORD: &str = "password123";

pub const SARAH_ID: &str = "2b6f0d1c-8e44-4a7b-b0f3-5d9e6c1a7f20";
pub const SARAH_EMAIL: &str = "sarah@techstart.io";
pub const SARAH_PASSWORD: &str = "password456";

/// Website Redesign: 100% progress while still in Development.
pub const WEBSITE_ID: &str = "00000000-0000-4000-8000-000000000101";
/// Brand Identity Package, also John's.
pub const BRAND_ID: &str = "00000000-0000-4000-8000-000000000102";
/// Mobile App Development, Sarah's.
pub const MOBILE_ID: &str = "00000000-0000-4000-8000-000000000103";

/// Deliverable with an attached storage object.
pub const PROOF_ID: &str = "00000000-0000-4000-8000-000000000201";
/// Deliverable with an absolute file URL.
pub const REPORT_ID: &str = "00000000-0000-4000-8000-000000000202";
/// Deliverable with no file.
pub const INVOICE_ID: &str = "00000000-0000-4000-8000-000000000203";

// ---------------------------------------------------------------------------
// In-memory backend
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize, Deserialize)]
struct TokenClaims {
    sub: Uuid,
    aud: String,
    exp: i64,
    iat: i64,
    email: String,
    role: String,
    session_id: Uuid,
}

struct FakeUser {
    id: Uuid,
    email: String,
    password: String,
}

/// In-memory stand-in for the backend-as-a-service.
///
/// Issues real HS256 access tokens signed with [`TEST_JWT_SECRET`], applies
/// row queries to in-memory tables (equality filters, string ordering,
/// limit) and counts calls so tests can assert what reached the backend.
/// It does not enforce row-level policies.
///
/// `select_delay_ms` slows every row query; `hold_get_user` parks identity
/// checks until `get_user_gate` is notified.
#[derive(Default)]
pub struct FakeBackend {
    users: Mutex<Vec<FakeUser>>,
    tables: Mutex<HashMap<&'static str, Vec<Value>>>,
    revoked: Mutex<HashSet<String>>,
    queries: Mutex<Vec<RowQuery>>,
    pub fail_queries: AtomicBool,
    pub fail_sign_out: AtomicBool,
    pub selects: AtomicUsize,
    pub sign_outs: AtomicUsize,
    pub get_user_calls: AtomicUsize,
    pub select_delay_ms: AtomicU64,
    pub hold_get_user: AtomicBool,
    pub get_user_gate: Notify,
}

impl FakeBackend {
    /// Two clients (John at Acme Corp, Sarah at TechStart Inc) with their
    /// projects and deliverables.
    pub fn seeded() -> Self {
        let backend = Self::default();
        backend.add_user(JOHN_ID, JOHN_EMAIL, JOHN_PASSWORD, Some(("Acme Corp", "John Smith")));
        backend.add_user(
            SARAH_ID,
            SARAH_EMAIL,
            SARAH_PASSWORD,
            Some(("TechStart Inc", "Sarah Johnson")),
        );

        backend.insert_rows(
            "projects",
            vec![
                project_row(WEBSITE_ID, JOHN_ID, "Website Redesign", "Development", "In Progress", 100, "2024-11-03T09:00:00Z"),
                project_row(BRAND_ID, JOHN_ID, "Brand Identity Package", "Completed", "Completed", 100, "2024-10-01T09:00:00Z"),
                project_row(MOBILE_ID, SARAH_ID, "Mobile App Development", "Design", "Behind Schedule", 35, "2024-11-05T09:00:00Z"),
            ],
        );

        backend.insert_rows(
            "deliverables",
            vec![
                deliverable_row(PROOF_ID, WEBSITE_ID, "Homepage_Design_v2.pdf", "Design Proof", "Approved", Some("acme/homepage_v2.pdf"), "2024-11-10T12:00:00Z"),
                deliverable_row(REPORT_ID, WEBSITE_ID, "Progress_Report_Nov.pdf", "Report", "Pending", Some("https://files.test/report-nov.pdf"), "2024-11-12T12:00:00Z"),
                deliverable_row(INVOICE_ID, WEBSITE_ID, "Invoice_001.pdf", "Invoice", "Needs Revision", None, "2024-11-05T12:00:00Z"),
            ],
        );

        backend
    }

    /// Register an identity. `profile` is `(company, contact)`; `None`
    /// leaves the identity without a profile row.
    pub fn add_user(&self, id: &str, email: &str, password: &str, profile: Option<(&str, &str)>) {
        self.users.lock().unwrap().push(FakeUser {
            id: Uuid::parse_str(id).unwrap(),
            email: email.to_string(),
            password: password.to_string(),
        });
        if let Some((company, contact)) = profile {
            self.insert_rows(
                "profiles",
                vec![json!({
                    "id": id,
                    "company_name": company,
                    "contact_name": contact,
                    "created_at": "2024-10-01T00:00:00Z",
                })],
            );
        }
    }

    pub fn insert_rows(&self, table: &'static str, rows: Vec<Value>) {
        self.tables
            .lock()
            .unwrap()
            .entry(table)
            .or_default()
            .extend(rows);
    }

    pub fn select_count(&self) -> usize {
        self.selects.load(Ordering::SeqCst)
    }

    pub fn sign_out_count(&self) -> usize {
        self.sign_outs.load(Ordering::SeqCst)
    }

    /// Row queries received so far, oldest first.
    pub fn received_queries(&self) -> Vec<RowQuery> {
        self.queries.lock().unwrap().clone()
    }

    pub fn user_count(&self) -> usize {
        self.users.lock().unwrap().len()
    }

    fn issue_token(&self, user: &FakeUser) -> String {
        let now = chrono::Utc::now().timestamp();
        let claims = TokenClaims {
            sub: user.id,
            aud: "authenticated".to_string(),
            exp: now + 3600,
            iat: now,
            email: user.email.clone(),
            role: "authenticated".to_string(),
            session_id: Uuid::new_v4(),
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(TEST_JWT_SECRET.as_bytes()),
        )
        .unwrap()
    }

    fn subject(&self, token: &str) -> Result<Uuid, BackendError> {
        let unauthorized = || BackendError::Api {
            status: 401,
            code: Some("bad_jwt".into()),
            message: "invalid JWT".into(),
        };
        if self.revoked.lock().unwrap().contains(token) {
            return Err(unauthorized());
        }
        let mut validation = Validation::default();
        validation.set_audience(&["authenticated"]);
        decode::<TokenClaims>(
            token,
            &DecodingKey::from_secret(TEST_JWT_SECRET.as_bytes()),
            &validation,
        )
        .map(|data| data.claims.sub)
        .map_err(|_| unauthorized())
    }
}

fn project_row(
    id: &str,
    owner: &str,
    name: &str,
    phase: &str,
    status: &str,
    progress: i32,
    created_at: &str,
) -> Value {
    json!({
        "id": id,
        "client_id": owner,
        "name": name,
        "description": format!("{name} for the client"),
        "start_date": "2024-11-01",
        "due_date": "2024-12-20",
        "current_phase": phase,
        "status": status,
        "progress": progress,
        "created_at": created_at,
    })
}

fn deliverable_row(
    id: &str,
    project: &str,
    file_name: &str,
    file_type: &str,
    approval: &str,
    file_url: Option<&str>,
    created_at: &str,
) -> Value {
    json!({
        "id": id,
        "project_id": project,
        "file_name": file_name,
        "file_type": file_type,
        "approval_status": approval,
        "file_size": "2.4 MB",
        "file_url": file_url,
        "created_at": created_at,
    })
}

fn column_text(row: &Value, column: &str) -> String {
    match &row[column] {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

#[async_trait]
impl Backend for FakeBackend {
    async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<BackendSession, BackendError> {
        let users = self.users.lock().unwrap();
        let user = users
            .iter()
            .find(|u| u.email == email && u.password == password)
            .ok_or_else(|| BackendError::Api {
                status: 400,
                code: Some("invalid_credentials".into()),
                message: "Invalid login credentials".into(),
            })?;

        Ok(BackendSession {
            access_token: self.issue_token(user),
            refresh_token: Uuid::new_v4().to_string(),
            expires_in: 3600,
            user: BackendUser {
                id: user.id,
                email: Some(user.email.clone()),
            },
        })
    }

    async fn sign_up(&self, params: &SignUpParams) -> Result<BackendUser, BackendError> {
        if self.users.lock().unwrap().iter().any(|u| u.email == params.email) {
            return Err(BackendError::Api {
                status: 422,
                code: Some("user_already_exists".into()),
                message: "User already registered".into(),
            });
        }

        let id = Uuid::new_v4();
        self.add_user(
            &id.to_string(),
            &params.email,
            &params.password,
            Some((params.company_name.as_str(), params.contact_name.as_str())),
        );
        Ok(BackendUser {
            id,
            email: Some(params.email.clone()),
        })
    }

    async fn sign_out(&self, access_token: &str) -> Result<(), BackendError> {
        self.sign_outs.fetch_add(1, Ordering::SeqCst);
        if self.fail_sign_out.load(Ordering::SeqCst) {
            return Err(BackendError::Api {
                status: 503,
                code: None,
                message: "Service unavailable".into(),
            });
        }
        self.revoked.lock().unwrap().insert(access_token.to_string());
        Ok(())
    }

    async fn get_user(&self, access_token: &str) -> Result<BackendUser, BackendError> {
        self.get_user_calls.fetch_add(1, Ordering::SeqCst);
        if self.hold_get_user.load(Ordering::SeqCst) {
            self.get_user_gate.notified().await;
        }
        let id = self.subject(access_token)?;
        let users = self.users.lock().unwrap();
        let user = users.iter().find(|u| u.id == id).ok_or(BackendError::Api {
            status: 404,
            code: Some("user_not_found".into()),
            message: "User not found".into(),
        })?;
        Ok(BackendUser {
            id: user.id,
            email: Some(user.email.clone()),
        })
    }

    async fn select(
        &self,
        access_token: &str,
        query: &RowQuery,
    ) -> Result<Vec<Value>, BackendError> {
        self.selects.fetch_add(1, Ordering::SeqCst);
        self.queries.lock().unwrap().push(query.clone());
        let delay = self.select_delay_ms.load(Ordering::SeqCst);
        if delay > 0 {
            tokio::time::sleep(std::time::Duration::from_millis(delay)).await;
        }
        self.subject(access_token)?;

        if self.fail_queries.load(Ordering::SeqCst) {
            return Err(BackendError::Api {
                status: 500,
                code: None,
                message: "connection reset".into(),
            });
        }

        let tables = self.tables.lock().unwrap();
        let mut rows: Vec<Value> = tables
            .get(query.table)
            .into_iter()
            .flatten()
            .filter(|row| {
                query
                    .filters
                    .iter()
                    .all(|(column, value)| column_text(row, column) == *value)
            })
            .cloned()
            .collect();

        if let Some((column, direction)) = &query.order {
            rows.sort_by_key(|row| column_text(row, column));
            if *direction == clienthub_backend::query::Direction::Descending {
                rows.reverse();
            }
        }
        if let Some(limit) = query.limit {
            rows.truncate(limit as usize);
        }
        Ok(rows)
    }

    async fn health_check(&self) -> Result<(), BackendError> {
        if self.fail_queries.load(Ordering::SeqCst) {
            return Err(BackendError::Api {
                status: 503,
                code: None,
                message: "down".into(),
            });
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// App construction
// ---------------------------------------------------------------------------

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        cookie_secure: false,
        query_stale_secs: 30,
        backend: BackendSettings {
            url: "http://backend.test".to_string(),
            anon_key: "anon-key".to_string(),
            timeout_secs: 5,
            storage_bucket: "deliverables".to_string(),
        },
        jwt: JwtConfig {
            secret: TEST_JWT_SECRET.to_string(),
            audience: "authenticated".to_string(),
        },
    }
}

/// Build the full application router over `backend`, with the same
/// middleware stack production uses.
pub fn build_test_app(backend: Arc<FakeBackend>) -> Router {
    build_test_app_with_state(backend).0
}

/// Like [`build_test_app`], also returning the state for inspection.
pub fn build_test_app_with_state(backend: Arc<FakeBackend>) -> (Router, AppState) {
    let config = test_config();
    let backend: Arc<dyn Backend> = backend;
    let state = AppState {
        backend: Arc::clone(&backend),
        config: Arc::new(config.clone()),
        sessions: Arc::new(SessionRegistry::new(
            backend,
            std::time::Duration::from_secs(config.query_stale_secs),
        )),
    };
    (build_app_router(state.clone(), &config), state)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

/// Send a GET request.
pub async fn get(app: Router, uri: &str) -> Response {
    app.oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

/// Send a GET request with a Bearer token.
pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response {
    let request = Request::builder()
        .uri(uri)
        .header(AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Send a GET request carrying the session cookie.
pub async fn get_with_cookie(app: Router, uri: &str, token: &str) -> Response {
    let request = Request::builder()
        .uri(uri)
        .header(COOKIE, format!("clienthub_session={token}"))
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Send a POST request with a JSON body.
pub async fn post_json(app: Router, uri: &str, body: Value) -> Response {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Send an empty POST request with a Bearer token.
pub async fn post_auth(app: Router, uri: &str, token: &str) -> Response {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Collect a response body as JSON.
pub async fn body_json(response: Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Log in through the API and return the access token.
pub async fn login(app: Router, email: &str, password: &str) -> String {
    let response = post_json(
        app,
        "/api/v1/auth/login",
        json!({ "email": email, "password": password }),
    )
    .await;
    assert_eq!(response.status(), 200, "login for {email} should succeed");
    body_json(response).await["access_token"]
        .as_str()
        .unwrap()
        .to_string()
}

/// Sign a token for `sub` directly, bypassing login.
pub fn sign_token(sub: &str, exp_offset: i64) -> String {
    let now = chrono::Utc::now().timestamp();
    let claims = TokenClaims {
        sub: Uuid::parse_str(sub).unwrap(),
        aud: "authenticated".to_string(),
        exp: now + exp_offset,
        iat: now,
        email: String::new(),
        role: "authenticated".to_string(),
        session_id: Uuid::new_v4(),
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(TEST_JWT_SECRET.as_bytes()),
    )
    .unwrap()
}
