//! Email reminder preferences
//!
//! One per user, upserted by the route layer. The analytics engine never
//! reads these; actual email delivery is out of scope.

use serde::{Deserialize, Serialize};

/// Reminder settings for one user
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailPreference {
    pub user_id: String,
    pub wants_reminders: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_email: Option<String>,
    /// Preferred reminder time of day, e.g. "09:00"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reminder_time: Option<String>,
}
