use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::storage::Settings;
use crate::timer::TimerState;

/// Every state change in the system produces an Event.
/// Front ends render from events; observers subscribe to them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    TimerStarted {
        current_time: u64,
        at: DateTime<Utc>,
    },
    /// `auto` is set when the engine paused itself at the max duration.
    TimerPaused {
        current_time: u64,
        auto: bool,
        at: DateTime<Utc>,
    },
    TimerResumed {
        current_time: u64,
        at: DateTime<Utc>,
    },
    TimerRestarted {
        /// Elapsed seconds discarded by the restart.
        previous_time: u64,
        at: DateTime<Utc>,
    },
    Tick {
        current_time: u64,
        progress: f64,
    },
    MaxReached {
        current_time: u64,
        max_duration: u64,
        at: DateTime<Utc>,
    },
    SettingsUpdated {
        settings: Settings,
        at: DateTime<Utc>,
    },
    SessionSaved {
        id: Uuid,
        title: String,
        duration: u64,
        at: DateTime<Utc>,
    },
    SessionDeleted {
        id: Uuid,
        at: DateTime<Utc>,
    },
    StateSnapshot {
        state: TimerState,
        current_time: u64,
        formatted_time: String,
        progress: f64,
        max_reached: bool,
        max_duration: u64,
        title: String,
        at: DateTime<Utc>,
    },
}

/// Receives every event the app controller publishes.
pub trait Observer {
    fn notify(&mut self, event: &Event);
}

impl<F: FnMut(&Event)> Observer for F {
    fn notify(&mut self, event: &Event) {
        self(event)
    }
}
