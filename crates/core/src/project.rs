//! Project lifecycle enums.
//!
//! The backend stores phase and status as display strings (`"In Progress"`,
//! `"Design"`, ...). Both are set independently by the backend: a project
//! may report 100% progress while still in `Development`, and nothing here
//! reconciles the two.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// ProjectPhase
// ---------------------------------------------------------------------------

/// Ordered lifecycle stage of a project.
///
/// The derived `Ord` follows declaration order, which is the lifecycle order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ProjectPhase {
    Planning,
    Design,
    Development,
    Review,
    Completed,
}

impl ProjectPhase {
    /// The fixed phase list in lifecycle order.
    pub const ALL: [ProjectPhase; 5] = [
        ProjectPhase::Planning,
        ProjectPhase::Design,
        ProjectPhase::Development,
        ProjectPhase::Review,
        ProjectPhase::Completed,
    ];

    /// Zero-based position of this phase in [`ProjectPhase::ALL`].
    pub fn index(self) -> usize {
        match self {
            Self::Planning => 0,
            Self::Design => 1,
            Self::Development => 2,
            Self::Review => 3,
            Self::Completed => 4,
        }
    }
}

// ---------------------------------------------------------------------------
// ProjectStatus
// ---------------------------------------------------------------------------

/// Schedule status of a project, independent of its phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProjectStatus {
    #[serde(rename = "Not Started")]
    NotStarted,
    #[serde(rename = "In Progress")]
    InProgress,
    #[serde(rename = "Behind Schedule")]
    BehindSchedule,
    Completed,
}
