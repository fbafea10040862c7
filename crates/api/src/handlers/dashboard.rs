//! Handler for the dashboard summary.

use axum::extract::Query;
use axum::Json;

use crate::handlers::project::RefreshParams;
use crate::middleware::auth::ClientSession;
use crate::response::DataResponse;
use crate::views::DashboardView;

/// Build the dashboard for an authenticated session.
///
/// A failed project query is reported inside the view, not as an error
/// status, so the greeting still renders.
pub(crate) async fn dashboard_view(session: &ClientSession) -> DashboardView {
    let projects = session
        .store
        .data()
        .fetch_projects_for(Some(session.profile.id))
        .await;
    tracing::debug!(owner = %session.profile.id, ok = projects.is_ok(), "Dashboard projects loaded");
    DashboardView::build(&session.profile, projects)
}

/// GET /api/v1/dashboard
pub async fn get(
    session: ClientSession,
    Query(params): Query<RefreshParams>,
) -> Json<DataResponse<DashboardView>> {
    if params.refresh {
        session.store.data().refresh_projects(session.profile.id).await;
    }
    Json(DataResponse {
        data: dashboard_view(&session).await,
    })
}
