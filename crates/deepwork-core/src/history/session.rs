use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::timer::format_hms;

/// One completed (or restarted) work interval. Never mutated once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkSession {
    pub id: Uuid,
    pub title: String,
    /// Elapsed whole seconds.
    pub duration: u64,
    pub date: DateTime<Utc>,
}

impl WorkSession {
    /// Create a session with a fresh identifier.
    pub fn new(title: impl Into<String>, duration: u64, date: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            duration,
            date,
        }
    }

    pub fn formatted_duration(&self) -> String {
        format_hms(self.duration)
    }
}
