//! Project row.

use chrono::NaiveDate;
use clienthub_core::project::{ProjectPhase, ProjectStatus};
use clienthub_core::types::{EntityId, Timestamp};
use serde::{Deserialize, Serialize};

/// A row from the `projects` table.
///
/// `progress` and `current_phase` are set independently by the backend and
/// are passed through exactly as stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: EntityId,
    /// Owning identity (`profiles.id`).
    pub client_id: EntityId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub start_date: NaiveDate,
    pub due_date: NaiveDate,
    pub current_phase: ProjectPhase,
    pub status: ProjectStatus,
    /// Completion percentage, 0-100.
    pub progress: i32,
    pub created_at: Timestamp,
}
