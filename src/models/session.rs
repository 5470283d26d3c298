use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Persisted block anchor. Keys stay camelCase so files written by older
/// installs keep their anchor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionRecord {
    pub current_block_start: DateTime<Utc>,
    #[serde(default)]
    pub last_activity: Option<DateTime<Utc>>,
    #[serde(default)]
    pub current_scheduled_block: i64,
}

impl SessionRecord {
    /// A fresh record anchored at `now`, block 0.
    pub fn starting_at(now: DateTime<Utc>) -> Self {
        Self {
            current_block_start: now,
            last_activity: Some(now),
            current_scheduled_block: 0,
        }
    }
}
