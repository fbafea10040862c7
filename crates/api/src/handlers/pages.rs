//! Page routes: `/`, `/dashboard`, `/project/{id}`.
//!
//! Route guards answer with redirects, never with error statuses: an
//! unauthenticated visitor goes back to `/`, an unknown project id goes to
//! `/dashboard`.

use axum::extract::Path;
use axum::response::{IntoResponse, Redirect, Response};
use axum::Json;
use clienthub_core::types::EntityId;

use crate::error::AppResult;
use crate::handlers::dashboard::dashboard_view;
use crate::handlers::project::find_owned_project;
use crate::middleware::auth::MaybeClientSession;
use crate::response::DataResponse;
use crate::views::{LandingView, ProjectDetailView};

/// GET /
pub async fn landing(MaybeClientSession(session): MaybeClientSession) -> Json<DataResponse<LandingView>> {
    Json(DataResponse {
        data: LandingView::new(session.is_some()),
    })
}

/// GET /dashboard
pub async fn dashboard(MaybeClientSession(session): MaybeClientSession) -> Response {
    let Some(session) = session else {
        return Redirect::to("/").into_response();
    };
    Json(DataResponse {
        data: dashboard_view(&session).await,
    })
    .into_response()
}

/// GET /project/{id}
pub async fn project(
    MaybeClientSession(session): MaybeClientSession,
    Path(id): Path<String>,
) -> AppResult<Response> {
    let Some(session) = session else {
        return Ok(Redirect::to("/").into_response());
    };
    let Ok(id) = id.parse::<EntityId>() else {
        return Ok(Redirect::to("/dashboard").into_response());
    };

    let Some(project) = find_owned_project(&session, id).await? else {
        tracing::debug!(project_id = %id, "Unknown project, redirecting to dashboard");
        return Ok(Redirect::to("/dashboard").into_response());
    };
    let deliverables = session.store.data().fetch_deliverables(project.id).await;

    Ok(Json(DataResponse {
        data: ProjectDetailView::build(project, deliverables),
    })
    .into_response())
}
