//! LFIT: Leader-Follower Identity Tracker
//!
//! Users submit daily reflections (a leader/follower percentage pair plus
//! three rated event attributes); the analytics engine turns one user's
//! time-ordered records into the summary statistics shown in the dashboard
//! and exported report.

pub mod core;
pub mod types;

// =============================================================================
// ENGINE DEFAULTS
// =============================================================================

/// Liminality threshold: a record is liminal when
/// |leaderScore - followerScore| <= threshold
pub const DEFAULT_LIMINALITY_THRESHOLD: f64 = 10.0;

/// Event rating scale bounds (novelty / disruption / ordinariness)
/// Historical forms used 1-5 or 1-7; 1-7 is the default, both via config.
pub const DEFAULT_RATING_MIN: u8 = 1;
pub const DEFAULT_RATING_MAX: u8 = 7;

/// Identity score bounds (percentages)
pub const SCORE_MIN: f64 = 0.0;
pub const SCORE_MAX: f64 = 100.0;

/// Timestamp format used when stamping submitTime
pub const SUBMIT_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

// =============================================================================
// VERSION
// =============================================================================

pub const VERSION: &str = "1.0.0";
