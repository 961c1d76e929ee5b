//! Event-strength aggregation
//!
//! Per-record strength is the mean of novelty/disruption/ordinariness, and
//! only records carrying all three ratings participate. Records with a
//! missing rating are excluded outright; defaulting them to 0 would drag
//! every aggregate down.

use crate::types::{EventStrengthReport, ReflectionRecord};

/// Event strength for one record; None unless fully rated
pub fn event_strength(record: &ReflectionRecord) -> Option<f64> {
    match (record.novelty, record.disruption, record.ordinariness) {
        (Some(n), Some(d), Some(o)) => Some((n as f64 + d as f64 + o as f64) / 3.0),
        _ => None,
    }
}

/// Aggregate event strength across a record set
pub fn event_strength_summary(records: &[ReflectionRecord]) -> EventStrengthReport {
    let per_record: Vec<Option<f64>> = records.iter().map(event_strength).collect();

    let rated: Vec<f64> = per_record.iter().filter_map(|s| *s).collect();
    let overall_mean = if rated.is_empty() {
        None
    } else {
        Some(rated.iter().sum::<f64>() / rated.len() as f64)
    };

    EventStrengthReport {
        per_record,
        rated_count: rated.len(),
        overall_mean,
    }
}

// =============================================================================
// TESTS
// =============================================================================
