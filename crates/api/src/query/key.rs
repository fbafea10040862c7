use std::fmt;

use clienthub_core::types::EntityId;

/// Parameters identifying one cacheable read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryKey {
    /// Projects owned by an identity.
    Projects { owner: EntityId },
    /// A single project.
    Project { id: EntityId },
    /// Deliverables attached to a project.
    Deliverables { project: EntityId },
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Projects { owner } => write!(f, "projects:{owner}"),
            Self::Project { id } => write!(f, "project:{id}"),
            Self::Deliverables { project } => write!(f, "deliverables:{project}"),
        }
    }
}
