//! Dominance label definitions

use serde::{Deserialize, Serialize};

/// Which identity dominates a single record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dominance {
    /// leaderScore strictly greater than followerScore
    Leader,
    /// followerScore strictly greater than leaderScore
    Follower,
    /// Exact equality
    Balanced,
}

impl Dominance {
    /// True for Leader or Follower, false for Balanced
    pub fn is_strict(&self) -> bool {
        !matches!(self, Dominance::Balanced)
    }
}

impl std::fmt::Display for Dominance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Dominance::Leader => "leader",
            Dominance::Follower => "follower",
            Dominance::Balanced => "balanced",
        };
        write!(f, "{}", name)
    }
}
