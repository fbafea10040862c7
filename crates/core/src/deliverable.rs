//! Deliverable classification enums.

use serde::{Deserialize, Serialize};

/// Kind of file attached to a project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FileType {
    Invoice,
    #[serde(rename = "Design Proof")]
    DesignProof,
    Report,
    Contract,
    Other,
}

/// Client approval state of a deliverable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ApprovalStatus {
    Pending,
    Approved,
    #[serde(rename = "Needs Revision")]
    NeedsRevision,
}
