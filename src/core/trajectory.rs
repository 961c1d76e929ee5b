//! Trajectory metrics: identity switches and day-to-day variability
//!
//! Both operate on the time-ordered sequence; order matters here, unlike
//! the descriptive summary.

use crate::core::stats::mean;
use crate::types::{Dominance, ReflectionRecord, SwitchReport, VariabilityReport};

/// Walk time-ordered dominance labels and count identity switches.
///
/// A switch is a change between the two most recent strict labels; Balanced
/// records neither trigger a switch nor reset the last strict label, so a
/// leader -> balanced -> follower run still counts one switch.
pub fn detect_switches(labels: &[Dominance]) -> SwitchReport {
    let mut cumulative = Vec::with_capacity(labels.len());
    let mut total = 0usize;
    let mut last_strict: Option<Dominance> = None;

    for label in labels {
        if label.is_strict() {
            if let Some(prev) = last_strict {
                if prev != *label {
                    total += 1;
                }
            }
            last_strict = Some(*label);
        }
        cumulative.push(total);
    }

    SwitchReport { total, cumulative }
}

/// Absolute day-to-day deltas for both score fields.
///
/// Delta sequences have n-1 entries (one per consecutive pair); their means
/// are the "variability" figure shown in the UI. Means are None when no
/// pairs exist, which is distinct from a genuine zero variability.
pub fn day_to_day_delta(sorted: &[ReflectionRecord]) -> VariabilityReport {
    let leader_deltas: Vec<f64> = sorted
        .windows(2)
        .map(|pair| (pair[1].leader_score - pair[0].leader_score).abs())
        .collect();
    let follower_deltas: Vec<f64> = sorted
        .windows(2)
        .map(|pair| (pair[1].follower_score - pair[0].follower_score).abs())
        .collect();

    let (leader_mean, follower_mean) = if leader_deltas.is_empty() {
        (None, None)
    } else {
        (Some(mean(&leader_deltas)), Some(mean(&follower_deltas)))
    };

    VariabilityReport {
        leader_deltas,
        follower_deltas,
        leader_mean,
        follower_mean,
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use Dominance::{Balanced, Follower, Leader};

    fn rec(leader: f64, follower: f64) -> ReflectionRecord {
        ReflectionRecord::new("u", "2024-01-01 08:00:00", leader, follower)
    }

    #[test]
    fn test_switches_scenario_a() {
        // (75,25),(65,35),(45,55),(30,70),(55,45) ->
        // leader, leader, follower, follower, leader -> 2 switches
        let labels = [Leader, Leader, Follower, Follower, Leader];
        let report = detect_switches(&labels);
        assert_eq!(report.total, 2);
        assert_eq!(report.cumulative, vec![0, 0, 1, 1, 2]);
    }

    #[test]
    fn test_switches_skip_balanced() {
        // Balanced does not reset the last strict label
        let labels = [Leader, Balanced, Follower];
        let report = detect_switches(&labels);
        assert_eq!(report.total, 1);
        assert_eq!(report.cumulative, vec![0, 0, 1]);
    }

    #[test]
    fn test_switches_balanced_never_triggers() {
        let labels = [Balanced, Balanced, Leader, Balanced, Leader];
        let report = detect_switches(&labels);
        assert_eq!(report.total, 0);
    }

    #[test]
    fn test_switches_empty_and_single() {
        assert_eq!(detect_switches(&[]).total, 0);
        let single = detect_switches(&[Balanced]);
        assert_eq!(single.total, 0);
        assert_eq!(single.cumulative, vec![0]);
    }

    #[test]
    fn test_switches_order_dependent() {
        let labels = [Leader, Follower, Leader, Leader, Leader];
        let mut reversed = labels;
        reversed.reverse();
        assert_eq!(detect_switches(&labels).total, 2);
        assert_eq!(detect_switches(&reversed).total, 2);
        // Cumulative trajectories differ even when totals agree
        assert_ne!(
            detect_switches(&labels).cumulative,
            detect_switches(&reversed).cumulative
        );
    }

    #[test]
    fn test_day_to_day_delta() {
        let records = vec![rec(75.0, 25.0), rec(65.0, 35.0), rec(45.0, 55.0)];
        let report = day_to_day_delta(&records);
        assert_eq!(report.leader_deltas, vec![10.0, 20.0]);
        assert_eq!(report.follower_deltas, vec![10.0, 20.0]);
        assert!((report.leader_mean.unwrap() - 15.0).abs() < 1e-9);
    }

    #[test]
    fn test_day_to_day_delta_no_pairs() {
        let report = day_to_day_delta(&[rec(50.0, 50.0)]);
        assert!(report.leader_deltas.is_empty());
        assert_eq!(report.leader_mean, None);
        assert_eq!(report.follower_mean, None);
    }
}
