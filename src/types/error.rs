//! Engine validation errors
//!
//! A record with a missing or non-numeric score poisons every downstream
//! statistic, so the engine rejects the whole computation and names the
//! offending record rather than coercing to 0.

use thiserror::Error;

/// Validation failure for one user's record set
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    #[error("record {index}: required field '{field}' is missing or not a number")]
    MissingScore { index: usize, field: &'static str },

    #[error("record {index}: {field} = {value} is outside [{min}, {max}]")]
    ScoreOutOfRange {
        index: usize,
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("record {index}: {field} = {value} is outside the rating scale {min}..={max}")]
    RatingOutOfRange {
        index: usize,
        field: &'static str,
        value: u8,
        min: u8,
        max: u8,
    },
}
