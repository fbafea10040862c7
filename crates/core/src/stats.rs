//! Dashboard summary statistics over a client's projects.
//!
//! Counts are keyed on [`ProjectStatus`], never on phase. The caller maps
//! its project rows into `(status, progress)` pairs; nothing here knows
//! about the backend row shape.

use serde::Serialize;

use crate::project::ProjectStatus;

/// Summary shown at the top of the client dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ProjectStats {
    pub total: usize,
    pub in_progress_count: usize,
    pub completed_count: usize,
    /// Rounded mean progress percentage, `0` when there are no projects.
    pub average_progress: i32,
}

/// Compute dashboard statistics from `(status, progress)` pairs.
///
/// The result does not depend on input order.
pub fn compute_project_stats<I>(projects: I) -> ProjectStats
where
    I: IntoIterator<Item = (ProjectStatus, i32)>,
{
    let mut total = 0usize;
    let mut in_progress_count = 0usize;
    let mut completed_count = 0usize;
    let mut progress_sum = 0i64;

    for (status, progress) in projects {
        total += 1;
        progress_sum += i64::from(progress);
        match status {
            ProjectStatus::InProgress => in_progress_count += 1,
            ProjectStatus::Completed => completed_count += 1,
            ProjectStatus::NotStarted | ProjectStatus::BehindSchedule => {}
        }
    }

    ProjectStats {
        total,
        in_progress_count,
        completed_count,
        average_progress: average_progress(progress_sum, total),
    }
}

/// Round the mean of `sum / count` to the nearest integer (halves round up
/// for non-negative means). Returns 0 if `count` is 0.
pub fn average_progress(sum: i64, count: usize) -> i32 {
    if count == 0 {
        return 0;
    }
    (sum as f64 / count as f64).round() as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    use ProjectStatus::*;

    #[test]
    fn empty_collection_yields_zeroes() {
        let stats = compute_project_stats(Vec::new());
        assert_eq!(
            stats,
            ProjectStats {
                total: 0,
                in_progress_count: 0,
                completed_count: 0,
                average_progress: 0,
            }
        );
    }

    #[test]
    fn counts_follow_status() {
        let stats = compute_project_stats(vec![
            (InProgress, 65),
            (Completed, 100),
            (BehindSchedule, 40),
            (NotStarted, 0),
            (InProgress, 20),
        ]);
        assert_eq!(stats.total, 5);
        assert_eq!(stats.in_progress_count, 2);
        assert_eq!(stats.completed_count, 1);
        // (65 + 100 + 40 + 0 + 20) / 5 = 45
        assert_eq!(stats.average_progress, 45);
    }

    #[test]
    fn average_rounds_half_up() {
        // 50.5 rounds to 51.
        assert_eq!(compute_project_stats(vec![(InProgress, 50), (InProgress, 51)]).average_progress, 51);
        // 33.33 rounds to 33.
        assert_eq!(
            compute_project_stats(vec![(InProgress, 0), (InProgress, 0), (InProgress, 100)])
                .average_progress,
            33
        );
        // 66.67 rounds to 67.
        assert_eq!(
            compute_project_stats(vec![(InProgress, 0), (InProgress, 100), (InProgress, 100)])
                .average_progress,
            67
        );
    }

    #[test]
    fn average_matches_reference_and_stays_in_range() {
        // Deterministic pseudo-random collections of every size up to 40.
        let mut seed: u64 = 0x9e37_79b9_7f4a_7c15;
        for len in 0..40usize {
            let mut items = Vec::with_capacity(len);
            for _ in 0..len {
                seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
                let progress = ((seed >> 33) % 101) as i32;
                let status = match (seed >> 20) % 4 {
                    0 => NotStarted,
                    1 => InProgress,
                    2 => BehindSchedule,
                    _ => Completed,
                };
                items.push((status, progress));
            }

            let stats = compute_project_stats(items.clone());
            let sum: i32 = items.iter().map(|(_, p)| p).sum();
            let expected = if len == 0 {
                0
            } else {
                (f64::from(sum) / len as f64).round() as i32
            };

            assert_eq!(stats.average_progress, expected, "len={len}");
            assert!((0..=100).contains(&stats.average_progress));
            assert_eq!(stats.total, len);

            // Order independence.
            let mut reversed = items.clone();
            reversed.reverse();
            assert_eq!(compute_project_stats(reversed), stats);
        }
    }
}
