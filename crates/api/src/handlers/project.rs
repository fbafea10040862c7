//! Handlers for the `/projects` resource.

use axum::extract::{Path, Query};
use axum::Json;
use clienthub_backend::models::project::Project;
use clienthub_core::error::CoreError;
use clienthub_core::types::EntityId;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::ClientSession;
use crate::query::{ProjectLookup, QueryError};
use crate::response::DataResponse;
use crate::views::{DeliverableItem, TimelineView};

/// `?refresh=true` bypasses cached results for the request.
#[derive(Debug, Default, Deserialize)]
pub struct RefreshParams {
    #[serde(default)]
    pub refresh: bool,
}

/// Look up a project owned by the session's identity.
///
/// A project owned by someone else is reported as absent, and nothing about
/// an absent project stays in the session's cache.
pub(crate) async fn find_owned_project(
    session: &ClientSession,
    id: EntityId,
) -> Result<Option<Project>, QueryError> {
    let data = session.store.data();
    match data.fetch_project(id).await? {
        ProjectLookup::Found(project) if project.client_id == session.profile.id => {
            Ok(Some(project))
        }
        ProjectLookup::Found(_) => {
            tracing::warn!(
                project_id = %id,
                owner = %session.profile.id,
                "Project belongs to another client"
            );
            data.forget_project(id).await;
            Ok(None)
        }
        ProjectLookup::NotFound => {
            data.forget_project(id).await;
            Ok(None)
        }
    }
}

/// Load a project owned by the session's identity, or 404.
pub(crate) async fn require_project(session: &ClientSession, id: EntityId) -> AppResult<Project> {
    find_owned_project(session, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id,
        }))
}

/// GET /api/v1/projects
pub async fn list(
    session: ClientSession,
    Query(params): Query<RefreshParams>,
) -> AppResult<Json<DataResponse<Vec<Project>>>> {
    let data = session.store.data();
    if params.refresh {
        data.refresh_projects(session.profile.id).await;
    }
    let projects = data.fetch_projects_for(Some(session.profile.id)).await?;
    Ok(Json(DataResponse { data: projects }))
}

/// GET /api/v1/projects/{id}
pub async fn get_by_id(
    session: ClientSession,
    Path(id): Path<EntityId>,
    Query(params): Query<RefreshParams>,
) -> AppResult<Json<DataResponse<Project>>> {
    if params.refresh {
        session.store.data().refresh_project(id).await;
    }
    let project = require_project(&session, id).await?;
    Ok(Json(DataResponse { data: project }))
}

/// GET /api/v1/projects/{id}/timeline
pub async fn timeline(
    session: ClientSession,
    Path(id): Path<EntityId>,
) -> AppResult<Json<DataResponse<TimelineView>>> {
    let project = require_project(&session, id).await?;
    Ok(Json(DataResponse {
        data: TimelineView::for_project(&project),
    }))
}

/// GET /api/v1/projects/{id}/deliverables
pub async fn deliverables(
    session: ClientSession,
    Path(id): Path<EntityId>,
    Query(params): Query<RefreshParams>,
) -> AppResult<Json<DataResponse<Vec<DeliverableItem>>>> {
    if params.refresh {
        session.store.data().refresh_project(id).await;
    }
    let project = require_project(&session, id).await?;
    let items = session
        .store
        .data()
        .fetch_deliverables(project.id)
        .await?
        .into_iter()
        .map(DeliverableItem::from)
        .collect();
    Ok(Json(DataResponse { data: items }))
}
