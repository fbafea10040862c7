//! Route definitions for the `/projects` resource.
//!
//! Also nests deliverable routes under `/projects/{id}/deliverables`.

use axum::routing::get;
use axum::Router;

use crate::handlers::{deliverable, project};
use crate::state::AppState;

/// Routes mounted at `/projects`.
///
/// ```text
/// GET /                                         -> list
/// GET /{id}                                     -> get_by_id
/// GET /{id}/timeline                            -> timeline
/// GET /{id}/deliverables                        -> deliverables
/// GET /{id}/deliverables/{deliverable_id}/download -> download
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(project::list))
        .route("/{id}", get(project::get_by_id))
        .route("/{id}/timeline", get(project::timeline))
        .route("/{id}/deliverables", get(project::deliverables))
        .route(
            "/{id}/deliverables/{deliverable_id}/download",
            get(deliverable::download),
        )
}
