//! View models for the portal pages.
//!
//! Every value a page displays is computed here so clients render without
//! re-deriving anything. Project fields (progress, phase, status) are passed
//! through exactly as stored; nothing reconciles them.

use clienthub_backend::models::deliverable::Deliverable;
use clienthub_backend::models::profile::Profile;
use clienthub_backend::models::project::Project;
use clienthub_core::stats::{compute_project_stats, ProjectStats};
use clienthub_core::timeline::{build_phase_timeline, TimelineStep};
use serde::Serialize;

use crate::query::QueryError;

/// Loading / error / data triad for one query on a page.
///
/// A failed query is distinct from loading and from an empty list.
#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum QueryView<T> {
    /// A newer request for the same data is still in flight.
    Loading,
    Error { message: String },
    Ready { data: T },
}

impl<T> QueryView<T> {
    pub fn from_result(result: Result<T, QueryError>, what: &str) -> Self {
        match result {
            Ok(data) => Self::Ready { data },
            Err(QueryError::Superseded) => Self::Loading,
            Err(QueryError::Cancelled) => Self::Error {
                message: format!("Loading {what} was cancelled"),
            },
            Err(QueryError::Backend(_)) => Self::Error {
                message: format!("Failed to load {what}. Please try again."),
            },
        }
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            Self::Ready { data } => Some(data),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Dashboard
// ---------------------------------------------------------------------------

/// A project as shown on a dashboard card.
#[derive(Debug, Serialize)]
pub struct ProjectCard {
    #[serde(flatten)]
    pub project: Project,
    pub href: String,
}

impl From<Project> for ProjectCard {
    fn from(project: Project) -> Self {
        let href = format!("/project/{}", project.id);
        Self { project, href }
    }
}

#[derive(Debug, Serialize)]
pub struct DashboardView {
    /// `"Welcome back, <first name>"`.
    pub greeting: String,
    pub company: String,
    /// Absent unless the project list loaded.
    pub stats: Option<ProjectStats>,
    /// `"<n> projects"`, absent unless the project list loaded.
    pub project_count_label: Option<String>,
    pub projects: QueryView<Vec<ProjectCard>>,
}

impl DashboardView {
    pub fn build(profile: &Profile, projects: Result<Vec<Project>, QueryError>) -> Self {
        let stats = projects
            .as_ref()
            .ok()
            .map(|list| compute_project_stats(list.iter().map(|p| (p.status, p.progress))));
        let project_count_label = projects
            .as_ref()
            .ok()
            .map(|list| format!("{} projects", list.len()));
        let projects = QueryView::from_result(
            projects.map(|list| list.into_iter().map(ProjectCard::from).collect()),
            "projects",
        );

        Self {
            greeting: format!("Welcome back, {}", profile.greeting_name()),
            company: profile.company_label(),
            stats,
            project_count_label,
            projects,
        }
    }
}

// ---------------------------------------------------------------------------
// Project detail
// ---------------------------------------------------------------------------

/// A deliverable row on the project page.
#[derive(Debug, Serialize)]
pub struct DeliverableItem {
    #[serde(flatten)]
    pub deliverable: Deliverable,
    pub has_file: bool,
    /// Download action; resolves to the file or to a "no file" notice.
    pub download_href: String,
}

impl From<Deliverable> for DeliverableItem {
    fn from(deliverable: Deliverable) -> Self {
        let has_file = deliverable
            .file_url
            .as_deref()
            .is_some_and(|url| !url.trim().is_empty());
        let download_href = format!(
            "/api/v1/projects/{}/deliverables/{}/download",
            deliverable.project_id, deliverable.id
        );
        Self {
            deliverable,
            has_file,
            download_href,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct TimelineView {
    /// Stored progress, unmodified.
    pub progress: i32,
    pub steps: Vec<TimelineStep>,
}

impl TimelineView {
    pub fn for_project(project: &Project) -> Self {
        Self {
            progress: project.progress,
            steps: build_phase_timeline(project.current_phase),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ProjectDetailView {
    pub project: Project,
    pub timeline: TimelineView,
    /// `"<n> files"`, absent unless the deliverables loaded.
    pub file_count_label: Option<String>,
    pub deliverables: QueryView<Vec<DeliverableItem>>,
    pub back_href: &'static str,
}

impl ProjectDetailView {
    pub fn build(project: Project, deliverables: Result<Vec<Deliverable>, QueryError>) -> Self {
        let file_count_label = deliverables
            .as_ref()
            .ok()
            .map(|list| format!("{} files", list.len()));
        Self {
            timeline: TimelineView::for_project(&project),
            project,
            file_count_label,
            deliverables: QueryView::from_result(
                deliverables.map(|list| list.into_iter().map(DeliverableItem::from).collect()),
                "deliverables",
            ),
            back_href: "/dashboard",
        }
    }
}

// ---------------------------------------------------------------------------
// Landing
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct Feature {
    pub title: &'static str,
    pub description: &'static str,
}

pub static FEATURES: [Feature; 4] = [
    Feature {
        title: "Track Your Projects",
        description: "See real-time progress updates, milestones, and current phase for all your projects.",
    },
    Feature {
        title: "Download Deliverables",
        description: "Access and download all your project files, designs, and documents in one place.",
    },
    Feature {
        title: "Stay Updated",
        description: "Get notified about important updates, feedback requests, and project changes.",
    },
    Feature {
        title: "Secure Access",
        description: "Your project data is protected with enterprise-grade security and privacy.",
    },
];

#[derive(Debug, Serialize)]
pub struct LandingView {
    pub authenticated: bool,
    pub features: &'static [Feature],
    pub login_href: &'static str,
    pub signup_href: &'static str,
    /// Where "Access Your Portal" leads once logged in.
    pub dashboard_href: &'static str,
}

impl LandingView {
    pub fn new(authenticated: bool) -> Self {
        Self {
            authenticated,
            features: &FEATURES,
            login_href: "/api/v1/auth/login",
            signup_href: "/api/v1/auth/signup",
            dashboard_href: "/dashboard",
        }
    }
}
