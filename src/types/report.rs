//! Report output structures
//!
//! Everything here is plain serializable data. The report assembler (charts,
//! PDF, terminal) consumes these; no rendering objects ever cross this
//! boundary.

use serde::{Deserialize, Serialize};

use crate::types::Dominance;

/// Descriptive statistics for one score field
///
/// mean and std_dev are 0 for an empty record set; the order statistics are
/// None rather than NaN so "no data" survives JSON serialization intact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldSummary {
    pub mean: f64,
    /// Population standard deviation (divide by N, not N-1)
    pub std_dev: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub q1: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub median: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub q3: Option<f64>,
}

impl FieldSummary {
    /// The "no data" summary
    pub fn empty() -> Self {
        Self {
            mean: 0.0,
            std_dev: 0.0,
            min: None,
            max: None,
            q1: None,
            median: None,
            q3: None,
        }
    }
}

/// Descriptive summary for both score fields
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryReport {
    pub leader: FieldSummary,
    pub follower: FieldSummary,
}

/// Per-record dominance labels plus class counts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DominanceReport {
    /// One label per record, in the order the records were given
    pub labels: Vec<Dominance>,
    pub leader_count: usize,
    pub follower_count: usize,
    pub balanced_count: usize,
}

/// Liminality over the time-ordered sequence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LiminalityReport {
    /// Threshold the flags were computed against
    pub threshold: f64,
    /// Per-record liminal flag, time order
    pub liminal_flags: Vec<bool>,
    /// Consecutive pairs where both records are liminal
    pub liminal_periods: usize,
    /// liminal_periods / (n-1) * 100; None when n < 2
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
}

/// Identity switches over the time-ordered sequence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwitchReport {
    pub total: usize,
    /// Cumulative switch count aligned to each record; first record is 0
    pub cumulative: Vec<usize>,
}

/// Day-to-day absolute deltas and their means
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariabilityReport {
    /// |leader_i - leader_{i-1}| per consecutive pair (length n-1)
    pub leader_deltas: Vec<f64>,
    pub follower_deltas: Vec<f64>,
    /// Mean absolute delta; None when there are no pairs
    #[serde(skip_serializing_if = "Option::is_none")]
    pub leader_mean: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub follower_mean: Option<f64>,
}

/// Event-strength aggregate over fully rated records
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventStrengthReport {
    /// Per-record mean of novelty/disruption/ordinariness, time order;
    /// None where any rating is absent (excluded, not defaulted to 0)
    pub per_record: Vec<Option<f64>>,
    /// How many records carried all three ratings
    pub rated_count: usize,
    /// Mean across rated records; None when rated_count is 0
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overall_mean: Option<f64>,
}

/// The assembled report for one user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentityReport {
    pub user_id: String,
    pub record_count: usize,
    /// submitTime per record, ascending; the chart x-axis
    pub timeline: Vec<String>,
    pub summary: SummaryReport,
    pub dominance: DominanceReport,
    pub liminality: LiminalityReport,
    pub switches: SwitchReport,
    pub variability: VariabilityReport,
    pub event_strength: EventStrengthReport,
}
