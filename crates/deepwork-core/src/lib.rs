//! # Deep Work Core Library
//!
//! Business logic for the Deep Work session tracker: a count-up timer that
//! plays a looping ambient cue while it runs, a locally persisted session
//! history with period statistics, and user settings. The CLI binary is a
//! thin front end over this crate.
//!
//! ## Architecture
//!
//! - **Timer Engine**: a three-state count-up machine; the caller's event
//!   loop invokes `tick()` once per second while it reports `is_ticking()`
//! - **Storage**: an opaque key-value store (SQLite-backed) holding the
//!   settings record and the session collection as JSON
//! - **Audio**: a looping WAV cue that degrades to a no-op when unavailable
//! - **App controller**: applies user intents and publishes [`Event`]s
//!
//! ## Key Components
//!
//! - [`TimerEngine`]: Core timer state machine
//! - [`DeepWork`]: Controller wiring engine, stores and observers
//! - [`SettingsStore`] / [`HistoryStore`]: Persisted records
//! - [`AudioCueService`]: Ambient cue playback

pub mod app;
pub mod audio;
pub mod error;
pub mod events;
pub mod history;
pub mod storage;
pub mod timer;

pub use app::DeepWork;
pub use audio::{AudioCue, AudioCueService, SilentCue};
pub use error::{AudioError, CoreError, DatabaseError};
pub use events::{Event, Observer};
pub use history::{HistoryStore, Period, PeriodStats, WorkSession};
pub use storage::{Database, KvStore, MemoryStore, Settings, SettingsStore, Theme};
pub use timer::{format_hms, TimerEngine, TimerState};
