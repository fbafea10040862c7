//! Repository for the `projects` table.

use clienthub_core::types::EntityId;

use crate::backend::Backend;
use crate::error::BackendError;
use crate::models::project::Project;
use crate::query::{Direction, RowQuery};

/// Reads client projects.
pub struct ProjectRepo;

impl ProjectRepo {
    /// List projects owned by `owner_id`, most recently created first.
    pub async fn list_for_owner(
        backend: &dyn Backend,
        access_token: &str,
        owner_id: EntityId,
    ) -> Result<Vec<Project>, BackendError> {
        let query = RowQuery::from("projects")
            .eq("client_id", owner_id)
            .order_by("created_at", Direction::Descending);
        super::fetch_rows(backend, access_token, &query).await
    }

    /// Find a project by id. `None` means the id does not resolve (or the
    /// backend's access policy hides it), which is not an error.
    pub async fn find_by_id(
        backend: &dyn Backend,
        access_token: &str,
        id: EntityId,
    ) -> Result<Option<Project>, BackendError> {
        super::fetch_optional(backend, access_token, RowQuery::from("projects").eq("id", id)).await
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use uuid::Uuid;

    use super::*;
    use crate::repositories::test_support::TableBackend;
    use crate::repositories::DeliverableRepo;

    fn owner_a() -> Uuid {
        Uuid::parse_str("00000000-0000-4000-8000-0000000000a1").unwrap()
    }

    fn owner_b() -> Uuid {
        Uuid::parse_str("00000000-0000-4000-8000-0000000000b2").unwrap()
    }

    fn project_row(id: u8, owner: Uuid, created_at: &str) -> serde_json::Value {
        json!({
            "id": format!("00000000-0000-4000-8000-0000000001{id:02}"),
            "client_id": owner.to_string(),
            "name": format!("Project {id}"),
            "description": null,
            "start_date": "2024-11-01",
            "due_date": "2024-12-20",
            "current_phase": "Development",
            "status": "In Progress",
            "progress": 65,
            "created_at": created_at,
        })
    }

    fn backend() -> TableBackend {
        TableBackend::default().with_rows(
            "projects",
            vec![
                project_row(1, owner_a(), "2024-11-01T09:00:00Z"),
                project_row(2, owner_b(), "2024-11-02T09:00:00Z"),
                project_row(3, owner_a(), "2024-11-03T09:00:00Z"),
            ],
        )
    }

    #[tokio::test]
    async fn list_for_owner_returns_only_owned_projects_newest_first() {
        let backend = backend();
        let projects = ProjectRepo::list_for_owner(&backend, "token", owner_a())
            .await
            .unwrap();

        assert_eq!(projects.len(), 2);
        assert!(projects.iter().all(|p| p.client_id == owner_a()));
        assert_eq!(projects[0].name, "Project 3");
        assert_eq!(projects[1].name, "Project 1");
    }

    #[tokio::test]
    async fn find_by_id_distinguishes_missing_rows() {
        let backend = backend();
        let id = Uuid::parse_str("00000000-0000-4000-8000-000000000102").unwrap();
        let found = ProjectRepo::find_by_id(&backend, "token", id).await.unwrap();
        assert_eq!(found.map(|p| p.client_id), Some(owner_b()));

        let missing = ProjectRepo::find_by_id(&backend, "token", Uuid::nil())
            .await
            .unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn malformed_row_fails_the_query() {
        let mut row = project_row(9, owner_a(), "2024-11-05T09:00:00Z");
        row["current_phase"] = json!("Shipping");
        let backend = TableBackend::default().with_rows("projects", vec![row]);

        let err = ProjectRepo::list_for_owner(&backend, "token", owner_a())
            .await
            .unwrap_err();
        assert!(matches!(err, BackendError::Decode(_)));
    }

    #[tokio::test]
    async fn deliverables_are_scoped_to_their_project() {
        let project = "00000000-0000-4000-8000-000000000101";
        let other = "00000000-0000-4000-8000-000000000102";
        let deliverable = |id: u8, project_id: &str, created_at: &str| {
            json!({
                "id": format!("00000000-0000-4000-8000-0000000002{id:02}"),
                "project_id": project_id,
                "file_name": format!("file-{id}.pdf"),
                "file_type": "Report",
                "approval_status": "Pending",
                "file_size": "1.2 MB",
                "file_url": null,
                "created_at": created_at,
            })
        };
        let backend = TableBackend::default().with_rows(
            "deliverables",
            vec![
                deliverable(1, project, "2024-11-01T00:00:00Z"),
                deliverable(2, other, "2024-11-02T00:00:00Z"),
                deliverable(3, project, "2024-11-03T00:00:00Z"),
            ],
        );

        let items =
            DeliverableRepo::list_for_project(&backend, "token", Uuid::parse_str(project).unwrap())
                .await
                .unwrap();
        let names: Vec<_> = items.iter().map(|d| d.file_name.as_str()).collect();
        assert_eq!(names, vec!["file-3.pdf", "file-1.pdf"]);
        assert_eq!(backend.select_count(), 1);
    }
}
