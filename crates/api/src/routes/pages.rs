//! Page routes, mounted at the root (not under `/api/v1`).

use axum::routing::get;
use axum::Router;

use crate::handlers::pages;
use crate::state::AppState;

/// ```text
/// GET /              -> landing
/// GET /dashboard     -> dashboard (303 to / when unauthenticated)
/// GET /project/{id}  -> project (303 to / or /dashboard)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(pages::landing))
        .route("/dashboard", get(pages::dashboard))
        .route("/project/{id}", get(pages::project))
}
