//! Session history persistence and derived views.
//!
//! The whole collection is one JSON array under [`SESSIONS_KEY`]. It is
//! sorted newest-first on load; `add` appends without re-sorting.

use chrono::{DateTime, TimeZone, Weekday};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Period, WorkSession};
use crate::storage::{KvStore, SESSIONS_KEY};

/// Count, total and average duration of a set of sessions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PeriodStats {
    pub count: usize,
    /// Seconds.
    pub total_duration: u64,
    /// Seconds; 0 when there are no sessions.
    pub average_duration: f64,
}

impl PeriodStats {
    pub fn from_sessions<'a>(sessions: impl IntoIterator<Item = &'a WorkSession>) -> Self {
        let (count, total_duration) = sessions
            .into_iter()
            .fold((0usize, 0u64), |(n, total), s| {
                (n + 1, total.saturating_add(s.duration))
            });
        let average_duration = if count == 0 {
            0.0
        } else {
            total_duration as f64 / count as f64
        };
        Self {
            count,
            total_duration,
            average_duration,
        }
    }
}

/// Sum of durations in seconds.
pub fn total_duration<'a>(sessions: impl IntoIterator<Item = &'a WorkSession>) -> u64 {
    PeriodStats::from_sessions(sessions).total_duration
}

/// Mean duration in seconds, 0 for an empty set.
pub fn average_duration<'a>(sessions: impl IntoIterator<Item = &'a WorkSession>) -> f64 {
    PeriodStats::from_sessions(sessions).average_duration
}

/// Ordered collection of past sessions, written through to a [`KvStore`].
pub struct HistoryStore<S: KvStore> {
    kv: S,
    sessions: Vec<WorkSession>,
    week_start: Weekday,
}

impl<S: KvStore> HistoryStore<S> {
    /// Load the collection from `kv`. Missing or unreadable data yields an
    /// empty history.
    pub fn load(kv: S) -> Self {
        let mut sessions = Self::read(&kv);
        sessions.sort_by(|a, b| b.date.cmp(&a.date));
        Self {
            kv,
            sessions,
            week_start: Weekday::Mon,
        }
    }

    fn read(kv: &S) -> Vec<WorkSession> {
        let bytes = match kv.get(SESSIONS_KEY) {
            Ok(Some(bytes)) => bytes,
            Ok(None) => return Vec::new(),
            Err(e) => {
                tracing::warn!(error = %e, "failed to read session history");
                return Vec::new();
            }
        };
        serde_json::from_slice(&bytes).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "stored session history is unreadable, starting empty");
            Vec::new()
        })
    }

    /// First day of the calendar week used by [`Period::Week`].
    pub fn with_week_start(mut self, week_start: Weekday) -> Self {
        self.week_start = week_start;
        self
    }

    pub fn week_start(&self) -> Weekday {
        self.week_start
    }

    /// All sessions in stored order.
    pub fn sessions(&self) -> &[WorkSession] {
        &self.sessions
    }

    pub fn get(&self, id: Uuid) -> Option<&WorkSession> {
        self.sessions.iter().find(|s| s.id == id)
    }

    /// Append `session` and persist the collection.
    pub fn add(&mut self, session: WorkSession) {
        self.sessions.push(session);
        self.save();
    }

    /// Remove the session with `id` and persist. Returns whether one was
    /// removed.
    pub fn delete(&mut self, id: Uuid) -> bool {
        let before = self.sessions.len();
        self.sessions.retain(|s| s.id != id);
        let removed = self.sessions.len() != before;
        if removed {
            self.save();
        }
        removed
    }

    /// Sessions dated inside `period` relative to `now`, in stored order.
    pub fn sessions_in<Tz: TimeZone>(&self, period: Period, now: &DateTime<Tz>) -> Vec<&WorkSession> {
        match period.range(now, self.week_start) {
            Some((start, end)) => self
                .sessions
                .iter()
                .filter(|s| start <= s.date && s.date < end)
                .collect(),
            None => self.sessions.iter().collect(),
        }
    }

    pub fn stats<Tz: TimeZone>(&self, period: Period, now: &DateTime<Tz>) -> PeriodStats {
        PeriodStats::from_sessions(self.sessions_in(period, now))
    }

    fn save(&self) {
        let bytes = match serde_json::to_vec(&self.sessions) {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::warn!(error = %e, "failed to encode session history");
                return;
            }
        };
        if let Err(e) = self.kv.set(SESSIONS_KEY, &bytes) {
            tracing::warn!(error = %e, "failed to persist session history");
        } else {
            tracing::debug!(count = self.sessions.len(), "session history saved");
        }
    }
}
