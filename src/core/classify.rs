//! Dominance classification and liminality scoring

use crate::types::{Dominance, DominanceReport, LiminalityReport, ReflectionRecord};

/// Label a single record
pub fn dominance_label(record: &ReflectionRecord) -> Dominance {
    if record.leader_score > record.follower_score {
        Dominance::Leader
    } else if record.follower_score > record.leader_score {
        Dominance::Follower
    } else {
        Dominance::Balanced
    }
}

/// Classify every record; counts sum to n.
///
/// Order-independent: labels line up with the input order, whatever it is.
/// Switch detection wants these labels in time order, so classify the sorted
/// copy when feeding it.
pub fn classify_dominance(records: &[ReflectionRecord]) -> DominanceReport {
    let labels: Vec<Dominance> = records.iter().map(dominance_label).collect();

    let leader_count = labels.iter().filter(|l| **l == Dominance::Leader).count();
    let follower_count = labels.iter().filter(|l| **l == Dominance::Follower).count();
    let balanced_count = labels.len() - leader_count - follower_count;

    DominanceReport {
        labels,
        leader_count,
        follower_count,
        balanced_count,
    }
}

/// True when the record sits within the liminal band
pub fn is_liminal(record: &ReflectionRecord, threshold: f64) -> bool {
    (record.leader_score - record.follower_score).abs() <= threshold
}

/// Liminality over the time-ordered sequence.
///
/// A consecutive pair counts as a liminal period only when both records are
/// liminal; the score is periods / (n-1) * 100. Distinct from the raw
/// per-record flag count. Score is None when n < 2 (no pairs exist).
pub fn liminality_score(sorted: &[ReflectionRecord], threshold: f64) -> LiminalityReport {
    let liminal_flags: Vec<bool> = sorted.iter().map(|r| is_liminal(r, threshold)).collect();

    let liminal_periods = liminal_flags
        .windows(2)
        .filter(|pair| pair[0] && pair[1])
        .count();

    let score = if sorted.len() >= 2 {
        Some(liminal_periods as f64 / (sorted.len() - 1) as f64 * 100.0)
    } else {
        None
    };

    LiminalityReport {
        threshold,
        liminal_flags,
        liminal_periods,
        score,
    }
}

// =============================================================================
// TESTS
// =============================================================================
