//! Reflection record model
//!
//! One record = one submitted daily reflection. Records for a user form an
//! ordered sequence keyed by submitTime ascending; the store is not required
//! to return them sorted, so every engine entry point sorts a defensive copy.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::{
    DEFAULT_LIMINALITY_THRESHOLD, DEFAULT_RATING_MAX, DEFAULT_RATING_MIN, SUBMIT_TIME_FORMAT,
};

/// One user submission
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReflectionRecord {
    /// User identifier (one user has many records)
    pub user_id: String,
    /// When the reflection session began
    #[serde(default)]
    pub start_time: String,
    /// When the record was persisted; ordering key for all time-series logic
    pub submit_time: String,
    /// Leader identity score, percentage in [0,100]
    ///
    /// Defaults to NaN when the field is absent so validation can reject the
    /// record instead of silently treating a missing score as 0.
    #[serde(default = "missing_score")]
    pub leader_score: f64,
    /// Follower identity score, percentage in [0,100]
    #[serde(default = "missing_score")]
    pub follower_score: f64,
    /// Event novelty rating on the configured scale
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub novelty: Option<u8>,
    /// Event disruption rating
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disruption: Option<u8>,
    /// Event ordinariness rating
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ordinariness: Option<u8>,
    /// Free-text event description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_description: Option<String>,
}

impl ReflectionRecord {
    /// Create a record with scores only (ratings absent)
    pub fn new(
        user_id: impl Into<String>,
        submit_time: impl Into<String>,
        leader_score: f64,
        follower_score: f64,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            start_time: String::new(),
            submit_time: submit_time.into(),
            leader_score,
            follower_score,
            novelty: None,
            disruption: None,
            ordinariness: None,
            event_description: None,
        }
    }

    /// Parse submitTime; accepts the native `YYYY-MM-DD HH:MM:SS` format
    /// and RFC 3339. Returns None for anything else.
    pub fn submit_time_key(&self) -> Option<NaiveDateTime> {
        NaiveDateTime::parse_from_str(&self.submit_time, SUBMIT_TIME_FORMAT)
            .ok()
            .or_else(|| {
                chrono::DateTime::parse_from_rfc3339(&self.submit_time)
                    .ok()
                    .map(|dt| dt.naive_utc())
            })
    }

    /// True when all three event ratings are present
    pub fn fully_rated(&self) -> bool {
        self.novelty.is_some() && self.disruption.is_some() && self.ordinariness.is_some()
    }
}

fn missing_score() -> f64 {
    f64::NAN
}

/// Sort a defensive copy by submitTime ascending.
///
/// Records whose submitTime does not parse sort before parseable ones, by
/// raw string; ties keep input order (stable sort).
pub fn sort_by_submit_time(records: &[ReflectionRecord]) -> Vec<ReflectionRecord> {
    let mut sorted: Vec<ReflectionRecord> = records.to_vec();
    sorted.sort_by(|a, b| {
        let ka = a.submit_time_key();
        let kb = b.submit_time_key();
        match (ka, kb) {
            (Some(ta), Some(tb)) => ta.cmp(&tb),
            (None, None) => a.submit_time.cmp(&b.submit_time),
            (None, Some(_)) => std::cmp::Ordering::Less,
            (Some(_), None) => std::cmp::Ordering::Greater,
        }
    });
    sorted
}

/// Tunable engine parameters
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EngineConfig {
    /// Max |leader - follower| gap for a record to count as liminal
    pub liminality_threshold: f64,
    /// Lower bound of the event rating scale
    pub rating_min: u8,
    /// Upper bound of the event rating scale
    pub rating_max: u8,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            liminality_threshold: DEFAULT_LIMINALITY_THRESHOLD,
            rating_min: DEFAULT_RATING_MIN,
            rating_max: DEFAULT_RATING_MAX,
        }
    }
}

impl EngineConfig {
    /// Default config with a custom liminality threshold
    pub fn with_threshold(threshold: f64) -> Self {
        Self {
            liminality_threshold: threshold,
            ..Self::default()
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
