//! Handler for deliverable downloads.

use axum::extract::{Path, State};
use axum::response::{IntoResponse, Redirect, Response};
use axum::Json;
use clienthub_core::download::{resolve_download, DownloadOutcome};
use clienthub_core::error::CoreError;
use clienthub_core::types::EntityId;

use crate::error::{AppError, AppResult};
use crate::handlers::project::require_project;
use crate::middleware::auth::ClientSession;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/projects/{id}/deliverables/{deliverable_id}/download
///
/// Redirects (307) to the stored file. A deliverable without a file yields
/// a 200 "no file available" notice and no redirect.
pub async fn download(
    State(state): State<AppState>,
    session: ClientSession,
    Path((project_id, deliverable_id)): Path<(EntityId, EntityId)>,
) -> AppResult<Response> {
    let project = require_project(&session, project_id).await?;
    let deliverable = session
        .store
        .data()
        .fetch_deliverables(project.id)
        .await?
        .into_iter()
        .find(|d| d.id == deliverable_id)
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Deliverable",
            id: deliverable_id,
        }))?;

    let outcome = resolve_download(
        &deliverable.file_name,
        deliverable.file_url.as_deref(),
        &state.config.backend.storage_base(),
    );

    match outcome {
        DownloadOutcome::Open { url, .. } => {
            tracing::info!(%project_id, %deliverable_id, "Deliverable download");
            Ok(Redirect::temporary(&url).into_response())
        }
        notice @ DownloadOutcome::NoFileAvailable { .. } => {
            Ok(Json(DataResponse { data: notice }).into_response())
        }
    }
}
