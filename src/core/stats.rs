//! Descriptive statistics over a user's score series
//!
//! Population standard deviation (divide by N) and linear-interpolation
//! quantiles; both choices are load-bearing for parity with historical
//! reports, do not swap in sample stddev or nearest-rank quantiles.

use crate::types::{FieldSummary, ReflectionRecord, SummaryReport};

/// Arithmetic mean; 0.0 for an empty slice
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Population standard deviation; 0.0 for an empty slice
pub fn std_dev(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let m = mean(values);
    let variance = values.iter().map(|v| (v - m) * (v - m)).sum::<f64>() / values.len() as f64;
    variance.sqrt()
}

/// Linear-interpolation quantile over an already-sorted slice.
///
/// position p = q*(n-1); result interpolates between the neighbouring
/// values, clamped at the last index. None for an empty slice.
pub fn quantile(sorted: &[f64], q: f64) -> Option<f64> {
    if sorted.is_empty() {
        return None;
    }
    let n = sorted.len();
    let p = q.clamp(0.0, 1.0) * (n - 1) as f64;
    let lo = p.floor() as usize;
    let hi = (lo + 1).min(n - 1);
    let frac = p - lo as f64;
    Some(sorted[lo] + frac * (sorted[hi] - sorted[lo]))
}

/// Summarize one extracted score series
pub fn summarize_field(values: &[f64]) -> FieldSummary {
    if values.is_empty() {
        return FieldSummary::empty();
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    FieldSummary {
        mean: mean(&sorted),
        std_dev: std_dev(&sorted),
        min: sorted.first().copied(),
        max: sorted.last().copied(),
        q1: quantile(&sorted, 0.25),
        median: quantile(&sorted, 0.5),
        q3: quantile(&sorted, 0.75),
    }
}

/// Descriptive summary for both score fields.
///
/// Order-invariant: only the multiset of values matters.
pub fn summarize(records: &[ReflectionRecord]) -> SummaryReport {
    let leader: Vec<f64> = records.iter().map(|r| r.leader_score).collect();
    let follower: Vec<f64> = records.iter().map(|r| r.follower_score).collect();

    SummaryReport {
        leader: summarize_field(&leader),
        follower: summarize_field(&follower),
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn test_mean_empty() {
        assert_eq!(mean(&[]), 0.0);
    }

    #[test]
    fn test_mean_basic() {
        assert!((mean(&[10.0, 20.0, 30.0]) - 20.0).abs() < EPS);
    }

    #[test]
    fn test_std_dev_population() {
        // Population stddev of [2,4,4,4,5,5,7,9] is exactly 2
        let values = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert!((std_dev(&values) - 2.0).abs() < EPS);
    }

    #[test]
    fn test_std_dev_single_value() {
        assert_eq!(std_dev(&[42.0]), 0.0);
    }

    #[test]
    fn test_quantile_empty() {
        assert_eq!(quantile(&[], 0.5), None);
    }

    #[test]
    fn test_quantile_interpolation() {
        // n=4: median position = 0.5*3 = 1.5 -> halfway between 20 and 30
        let sorted = [10.0, 20.0, 30.0, 40.0];
        assert!((quantile(&sorted, 0.5).unwrap() - 25.0).abs() < EPS);
        // q1 position = 0.25*3 = 0.75 -> 10 + 0.75*10 = 17.5
        assert!((quantile(&sorted, 0.25).unwrap() - 17.5).abs() < EPS);
    }

    #[test]
    fn test_quantile_boundary_clamp() {
        let sorted = [5.0, 15.0];
        assert_eq!(quantile(&sorted, 1.0).unwrap(), 15.0);
        assert_eq!(quantile(&sorted, 0.0).unwrap(), 5.0);
    }

    #[test]
    fn test_summarize_field_empty() {
        let summary = summarize_field(&[]);
        assert_eq!(summary, FieldSummary::empty());
    }

    #[test]
    fn test_summarize_order_invariant() {
        let a = vec![
            ReflectionRecord::new("u", "2024-01-01 08:00:00", 75.0, 25.0),
            ReflectionRecord::new("u", "2024-01-02 08:00:00", 65.0, 35.0),
            ReflectionRecord::new("u", "2024-01-03 08:00:00", 45.0, 55.0),
        ];
        let mut b = a.clone();
        b.reverse();
        assert_eq!(summarize(&a), summarize(&b));
    }

    #[test]
    fn test_summarize_mean_matches_arithmetic() {
        let records = vec![
            ReflectionRecord::new("u", "2024-01-01 08:00:00", 75.0, 25.0),
            ReflectionRecord::new("u", "2024-01-02 08:00:00", 65.0, 35.0),
        ];
        let summary = summarize(&records);
        assert!((summary.leader.mean - 70.0).abs() < EPS);
        assert!((summary.follower.mean - 30.0).abs() < EPS);
    }
}
