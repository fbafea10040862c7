//! Repository for the `deliverables` table.

use clienthub_core::types::EntityId;

use crate::backend::Backend;
use crate::error::BackendError;
use crate::models::deliverable::Deliverable;
use crate::query::{Direction, RowQuery};

/// Reads deliverables attached to projects.
pub struct DeliverableRepo;

impl DeliverableRepo {
    /// List deliverables of `project_id`, newest first.
    pub async fn list_for_project(
        backend: &dyn Backend,
        access_token: &str,
        project_id: EntityId,
    ) -> Result<Vec<Deliverable>, BackendError> {
        let query = RowQuery::from("deliverables")
            .eq("project_id", project_id)
            .order_by("created_at", Direction::Descending);
        super::fetch_rows(backend, access_token, &query).await
    }
}
