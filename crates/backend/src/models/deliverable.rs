//! Deliverable row.

use clienthub_core::deliverable::{ApprovalStatus, FileType};
use clienthub_core::types::{EntityId, Timestamp};
use serde::{Deserialize, Serialize};

/// A row from the `deliverables` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Deliverable {
    pub id: EntityId,
    pub project_id: EntityId,
    pub file_name: String,
    pub file_type: FileType,
    pub approval_status: ApprovalStatus,
    /// Human-readable size, e.g. `"2.4 MB"`.
    #[serde(default)]
    pub file_size: Option<String>,
    /// Absolute URL or storage object path; absent until a file is attached.
    #[serde(default)]
    pub file_url: Option<String>,
    pub created_at: Timestamp,
}
