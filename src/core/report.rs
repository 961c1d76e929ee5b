//! Report assembly: validate, sort, run every metric, emit one payload
//!
//! The single entry point the route layer and CLI call. Pure and
//! deterministic; the input slice is never mutated.

use crate::core::classify::{classify_dominance, liminality_score};
use crate::core::events::event_strength_summary;
use crate::core::stats::summarize;
use crate::core::trajectory::{day_to_day_delta, detect_switches};
use crate::types::{sort_by_submit_time, EngineConfig, EngineError, IdentityReport, ReflectionRecord};
use crate::{SCORE_MAX, SCORE_MIN};

/// Validate a record set before any math touches it.
///
/// Indices refer to the records as given (submit order), since that is what
/// the caller can correlate back to the store.
pub fn validate_records(records: &[ReflectionRecord], config: &EngineConfig) -> Result<(), EngineError> {
    for (index, record) in records.iter().enumerate() {
        check_score(index, "leaderScore", record.leader_score)?;
        check_score(index, "followerScore", record.follower_score)?;
        check_rating(index, "novelty", record.novelty, config)?;
        check_rating(index, "disruption", record.disruption, config)?;
        check_rating(index, "ordinariness", record.ordinariness, config)?;
    }
    Ok(())
}

fn check_score(index: usize, field: &'static str, value: f64) -> Result<(), EngineError> {
    if !value.is_finite() {
        return Err(EngineError::MissingScore { index, field });
    }
    if !(SCORE_MIN..=SCORE_MAX).contains(&value) {
        return Err(EngineError::ScoreOutOfRange {
            index,
            field,
            value,
            min: SCORE_MIN,
            max: SCORE_MAX,
        });
    }
    Ok(())
}

fn check_rating(
    index: usize,
    field: &'static str,
    value: Option<u8>,
    config: &EngineConfig,
) -> Result<(), EngineError> {
    if let Some(v) = value {
        if v < config.rating_min || v > config.rating_max {
            return Err(EngineError::RatingOutOfRange {
                index,
                field,
                value: v,
                min: config.rating_min,
                max: config.rating_max,
            });
        }
    }
    Ok(())
}

/// Build the full identity report for one user's records.
///
/// Empty input is valid: every section comes back zeroed or None, never a
/// panic and never a NaN in the output.
pub fn build_report(
    user_id: &str,
    records: &[ReflectionRecord],
    config: &EngineConfig,
) -> Result<IdentityReport, EngineError> {
    validate_records(records, config)?;

    let sorted = sort_by_submit_time(records);

    let dominance = classify_dominance(&sorted);
    let switches = detect_switches(&dominance.labels);
    let liminality = liminality_score(&sorted, config.liminality_threshold);

    Ok(IdentityReport {
        user_id: user_id.to_string(),
        record_count: sorted.len(),
        timeline: sorted.iter().map(|r| r.submit_time.clone()).collect(),
        summary: summarize(&sorted),
        dominance,
        liminality,
        switches,
        variability: day_to_day_delta(&sorted),
        event_strength: event_strength_summary(&sorted),
    })
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Dominance;
    use pretty_assertions::assert_eq;

    fn rec(day: u8, leader: f64, follower: f64) -> ReflectionRecord {
        ReflectionRecord::new(
            "u1",
            format!("2024-03-{:02} 08:00:00", day),
            leader,
            follower,
        )
    }

    #[test]
    fn test_build_report_scenario_a() {
        let records = vec![
            rec(1, 75.0, 25.0),
            rec(2, 65.0, 35.0),
            rec(3, 45.0, 55.0),
            rec(4, 30.0, 70.0),
            rec(5, 55.0, 45.0),
        ];
        let report = build_report("u1", &records, &EngineConfig::default()).unwrap();

        assert_eq!(
            report.dominance.labels,
            vec![
                Dominance::Leader,
                Dominance::Leader,
                Dominance::Follower,
                Dominance::Follower,
                Dominance::Leader
            ]
        );
        assert_eq!(report.switches.total, 2);
        assert_eq!(report.switches.cumulative, vec![0, 0, 1, 1, 2]);
        assert_eq!(report.liminality.score, Some(0.0));
    }

    #[test]
    fn test_build_report_sorts_before_pairwise_metrics() {
        // Shuffled input must produce the same report as sorted input
        let sorted_in = vec![rec(1, 75.0, 25.0), rec(2, 45.0, 55.0), rec(3, 60.0, 40.0)];
        let shuffled = vec![sorted_in[2].clone(), sorted_in[0].clone(), sorted_in[1].clone()];

        let a = build_report("u1", &sorted_in, &EngineConfig::default()).unwrap();
        let b = build_report("u1", &shuffled, &EngineConfig::default()).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.switches.total, 2);
    }

    #[test]
    fn test_build_report_single_record() {
        // Scenario C: one balanced record
        let report =
            build_report("u1", &[rec(1, 50.0, 50.0)], &EngineConfig::default()).unwrap();
        assert_eq!(report.dominance.balanced_count, 1);
        assert_eq!(report.switches.total, 0);
        assert_eq!(report.liminality.score, None);
        assert_eq!(report.variability.leader_mean, None);
    }

    #[test]
    fn test_build_report_empty() {
        // Scenario D: no records, no exception, zeroed means
        let report = build_report("u1", &[], &EngineConfig::default()).unwrap();
        assert_eq!(report.record_count, 0);
        assert_eq!(report.summary.leader.mean, 0.0);
        assert_eq!(report.summary.follower.mean, 0.0);
        assert_eq!(report.summary.leader.min, None);
    }

    #[test]
    fn test_build_report_is_idempotent() {
        let records = vec![rec(1, 75.0, 25.0), rec(2, 45.0, 55.0)];
        let a = build_report("u1", &records, &EngineConfig::default()).unwrap();
        let b = build_report("u1", &records, &EngineConfig::default()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_validate_rejects_missing_score() {
        let json = r#"{"userId":"u1","submitTime":"2024-03-01 08:00:00","followerScore":40}"#;
        let broken: ReflectionRecord = serde_json::from_str(json).unwrap();
        let records = vec![rec(1, 75.0, 25.0), broken];

        let err = build_report("u1", &records, &EngineConfig::default()).unwrap_err();
        assert_eq!(
            err,
            EngineError::MissingScore {
                index: 1,
                field: "leaderScore"
            }
        );
    }

    #[test]
    fn test_validate_rejects_out_of_range_score() {
        let err = build_report("u1", &[rec(1, 130.0, 25.0)], &EngineConfig::default())
            .unwrap_err();
        assert!(matches!(err, EngineError::ScoreOutOfRange { field: "leaderScore", .. }));
    }

    #[test]
    fn test_validate_rejects_out_of_range_rating() {
        let mut record = rec(1, 60.0, 40.0);
        record.novelty = Some(9);
        let err = build_report("u1", &[record], &EngineConfig::default()).unwrap_err();
        assert!(matches!(err, EngineError::RatingOutOfRange { field: "novelty", value: 9, .. }));
    }

    #[test]
    fn test_report_serializes_to_plain_json() {
        let report = build_report("u1", &[rec(1, 75.0, 25.0)], &EngineConfig::default()).unwrap();
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["userId"], "u1");
        assert_eq!(json["recordCount"], 1);
        // Undefined pairwise metrics are omitted, not NaN
        assert!(json["liminality"].get("score").is_none());
    }
}
