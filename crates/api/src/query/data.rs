//! Typed data access bound to one session.

use std::time::Duration;

use clienthub_backend::models::deliverable::Deliverable;
use clienthub_backend::models::project::Project;
use clienthub_backend::repositories::{DeliverableRepo, ProjectRepo};
use clienthub_backend::Backend;
use clienthub_core::types::EntityId;

use super::client::{QueryClient, QueryError};
use super::key::QueryKey;

/// Result of looking up a single project.
#[derive(Debug, Clone, PartialEq)]
pub enum ProjectLookup {
    Found(Project),
    /// The id does not resolve for this identity. Not an error.
    NotFound,
}

/// Per-session query caches, one per result type.
pub struct Queries {
    projects: QueryClient<Vec<Project>>,
    project: QueryClient<Option<Project>>,
    deliverables: QueryClient<Vec<Deliverable>>,
}

impl Queries {
    pub fn new(stale_after: Duration) -> Self {
        Self {
            projects: QueryClient::new(stale_after),
            project: QueryClient::new(stale_after),
            deliverables: QueryClient::new(stale_after),
        }
    }

    /// Cancel in-flight queries and drop all cached results.
    pub async fn clear(&self) {
        self.projects.clear().await;
        self.project.clear().await;
        self.deliverables.clear().await;
    }
}

/// Reads on behalf of one authenticated identity.
///
/// Every read goes through the session's [`Queries`] cache and carries the
/// session's access token, so the backend's row policies apply.
pub struct DataAccess<'a> {
    backend: &'a dyn Backend,
    access_token: &'a str,
    queries: &'a Queries,
}

impl<'a> DataAccess<'a> {
    pub fn new(backend: &'a dyn Backend, access_token: &'a str, queries: &'a Queries) -> Self {
        Self {
            backend,
            access_token,
            queries,
        }
    }

    /// Projects owned by `owner`, newest first.
    ///
    /// An absent or nil owner yields an empty list without a backend call.
    pub async fn fetch_projects_for(
        &self,
        owner: Option<EntityId>,
    ) -> Result<Vec<Project>, QueryError> {
        let Some(owner) = owner.filter(|id| !id.is_nil()) else {
            return Ok(Vec::new());
        };

        self.queries
            .projects
            .fetch(
                QueryKey::Projects { owner },
                ProjectRepo::list_for_owner(self.backend, self.access_token, owner),
            )
            .await
    }

    pub async fn fetch_project(&self, id: EntityId) -> Result<ProjectLookup, QueryError> {
        let project = self
            .queries
            .project
            .fetch(
                QueryKey::Project { id },
                ProjectRepo::find_by_id(self.backend, self.access_token, id),
            )
            .await?;

        Ok(match project {
            Some(project) => ProjectLookup::Found(project),
            None => ProjectLookup::NotFound,
        })
    }

    /// Drop the cached project list for `owner` so the next read refetches.
    pub async fn refresh_projects(&self, owner: EntityId) {
        self.queries
            .projects
            .invalidate(&QueryKey::Projects { owner })
            .await;
    }

    /// Drop the cached project and its deliverables so the next reads
    /// refetch.
    pub async fn refresh_project(&self, id: EntityId) {
        self.queries.project.invalidate(&QueryKey::Project { id }).await;
        self.queries
            .deliverables
            .invalidate(&QueryKey::Deliverables { project: id })
            .await;
    }

    /// Discard everything cached or in flight for a project this identity
    /// may not see.
    pub async fn forget_project(&self, id: EntityId) {
        self.queries.project.cancel(&QueryKey::Project { id }).await;
        self.queries
            .deliverables
            .cancel(&QueryKey::Deliverables { project: id })
            .await;
    }

    /// Deliverables attached to `project_id`, newest first.
    pub async fn fetch_deliverables(
        &self,
        project_id: EntityId,
    ) -> Result<Vec<Deliverable>, QueryError> {
        self.queries
            .deliverables
            .fetch(
                QueryKey::Deliverables {
                    project: project_id,
                },
                DeliverableRepo::list_for_project(self.backend, self.access_token, project_id),
            )
            .await
    }
}
