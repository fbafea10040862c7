pub mod auth;
pub mod dashboard;
pub mod health;
pub mod pages;
pub mod project;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/login                                          login (public)
/// /auth/signup                                         sign-up (public)
/// /auth/logout                                         logout (always 204)
/// /auth/session                                        session snapshot
///
/// /dashboard                                           greeting, stats, projects
///
/// /projects                                            list
/// /projects/{id}                                       get
/// /projects/{id}/timeline                              phase timeline
/// /projects/{id}/deliverables                          list deliverables
/// /projects/{id}/deliverables/{deliverable_id}/download  download or notice
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Authentication routes (login, sign-up, logout, session).
        .nest("/auth", auth::router())
        // Dashboard summary.
        .nest("/dashboard", dashboard::router())
        // Project routes (also nests deliverables).
        .nest("/projects", project::router())
}
