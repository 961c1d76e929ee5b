//! Core modules for LFIT

pub mod api;
pub mod classify;
pub mod events;
pub mod report;
pub mod stats;
pub mod store;
pub mod trajectory;

pub use api::{create_router, run_server, SharedStore};
pub use classify::{classify_dominance, dominance_label, is_liminal, liminality_score};
pub use events::{event_strength, event_strength_summary};
pub use report::{build_report, validate_records};
pub use stats::{mean, quantile, std_dev, summarize, summarize_field};
pub use store::{JsonlStore, MemoryStore, RecordId, RecordStore, StoreError};
pub use trajectory::{day_to_day_delta, detect_switches};
