//! Phase timeline shown on the project detail page.
//!
//! Pure lookup against [`ProjectPhase::ALL`]. Phase changes only happen in
//! the backend, so there is no transition logic here.

use serde::Serialize;

use crate::project::ProjectPhase;

/// Display state of one phase relative to the project's current phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StepState {
    Completed,
    Active,
    Upcoming,
}

/// One marker on the phase timeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimelineStep {
    /// 1-based marker number.
    pub position: usize,
    pub phase: ProjectPhase,
    pub state: StepState,
    /// Label emphasis: set for completed and active phases.
    pub highlighted: bool,
}

/// Classify the phase at `index` against the current phase index.
pub fn classify_phase(index: usize, current_index: usize) -> StepState {
    if index < current_index {
        StepState::Completed
    } else if index == current_index {
        StepState::Active
    } else {
        StepState::Upcoming
    }
}

/// Build the full five-step timeline for a project in phase `current`.
pub fn build_phase_timeline(current: ProjectPhase) -> Vec<TimelineStep> {
    let current_index = current.index();
    ProjectPhase::ALL
        .iter()
        .enumerate()
        .map(|(index, &phase)| TimelineStep {
            position: index + 1,
            phase,
            state: classify_phase(index, current_index),
            highlighted: index <= current_index,
        })
        .collect()
}
