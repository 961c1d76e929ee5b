//! Core types for LFIT

mod dominance;
mod error;
mod preference;
mod record;
mod report;

pub use dominance::Dominance;
pub use error::EngineError;
pub use preference::EmailPreference;
pub use record::{sort_by_submit_time, EngineConfig, ReflectionRecord};
pub use report::{
    DominanceReport, EventStrengthReport, FieldSummary, IdentityReport, LiminalityReport,
    SummaryReport, SwitchReport, VariabilityReport,
};
