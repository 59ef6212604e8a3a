//! Timer engine implementation.
//!
//! The engine is a count-up state machine. It does not own a thread or a
//! clock: `start()` marks the recurring tick as scheduled and the caller's
//! event loop invokes `tick()` once per second while `is_ticking()` holds.
//!
//! ## State Transitions
//!
//! ```text
//! Stopped -> Running <-> Paused
//!    ^          |          |
//!    +---- restart() ------+
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! let mut engine = TimerEngine::new(settings.max_duration, Box::new(cue));
//! engine.start();
//! // Once per second:
//! for event in engine.tick() { render(&event) }
//! ```

use chrono::{DateTime, Utc};

use super::{format_hms, TimerState};
use crate::audio::AudioCue;
use crate::events::Event;
use crate::history::WorkSession;

/// Core timer engine.
///
/// Owns the elapsed-time counter and drives the ambient cue: the cue plays
/// exactly while the state is `Running`.
pub struct TimerEngine {
    state: TimerState,
    /// Elapsed whole seconds. Reset only by `restart()`.
    current_time: u64,
    max_duration: u64,
    /// Live session title; empty means "use the default".
    title: String,
    ticking: bool,
    cue: Box<dyn AudioCue>,
}

impl std::fmt::Debug for TimerEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TimerEngine")
            .field("state", &self.state)
            .field("current_time", &self.current_time)
            .field("max_duration", &self.max_duration)
            .field("title", &self.title)
            .field("ticking", &self.ticking)
            .finish_non_exhaustive()
    }
}

impl TimerEngine {
    /// Create a stopped engine at zero.
    pub fn new(max_duration: u64, cue: Box<dyn AudioCue>) -> Self {
        Self {
            state: TimerState::Stopped,
            current_time: 0,
            max_duration,
            title: String::new(),
            ticking: false,
            cue,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> TimerState {
        self.state
    }

    pub fn current_time(&self) -> u64 {
        self.current_time
    }

    pub fn max_duration(&self) -> u64 {
        self.max_duration
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Whether the recurring one-second tick is scheduled.
    pub fn is_ticking(&self) -> bool {
        self.ticking
    }

    pub fn formatted_time(&self) -> String {
        format_hms(self.current_time)
    }

    /// 0.0 ..= 1.0 of the max duration; 0 when the max is zero.
    pub fn progress(&self) -> f64 {
        if self.max_duration == 0 {
            return 0.0;
        }
        (self.current_time as f64 / self.max_duration as f64).min(1.0)
    }

    pub fn is_max_reached(&self) -> bool {
        self.current_time >= self.max_duration
    }

    pub fn cue(&self) -> &dyn AudioCue {
        self.cue.as_ref()
    }

    /// Build a full state snapshot event.
    pub fn snapshot(&self) -> Event {
        Event::StateSnapshot {
            state: self.state,
            current_time: self.current_time,
            formatted_time: self.formatted_time(),
            progress: self.progress(),
            max_reached: self.is_max_reached(),
            max_duration: self.max_duration,
            title: self.title.clone(),
            at: Utc::now(),
        }
    }

    /// Snapshot the elapsed time into a session record.
    ///
    /// Uses the live title, or `default_title` when it is empty. Does not
    /// touch engine state.
    pub fn materialize_session(&self, default_title: &str, date: DateTime<Utc>) -> WorkSession {
        let title = if self.title.is_empty() {
            default_title
        } else {
            &self.title
        };
        WorkSession::new(title, self.current_time, date)
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Start counting. No-op while already running.
    pub fn start(&mut self) -> Option<Event> {
        if self.state == TimerState::Running {
            return None;
        }
        self.run();
        Some(Event::TimerStarted {
            current_time: self.current_time,
            at: Utc::now(),
        })
    }

    /// Stop counting and silence the cue. Only a running timer changes
    /// state; repeated calls do nothing.
    pub fn pause(&mut self) -> Option<Event> {
        self.halt();
        if self.state != TimerState::Running {
            return None;
        }
        self.state = TimerState::Paused;
        tracing::debug!(current_time = self.current_time, "timer paused");
        Some(Event::TimerPaused {
            current_time: self.current_time,
            auto: false,
            at: Utc::now(),
        })
    }

    /// Continue a paused timer. No-op from any other state.
    pub fn resume(&mut self) -> Option<Event> {
        if self.state != TimerState::Paused {
            return None;
        }
        self.run();
        Some(Event::TimerResumed {
            current_time: self.current_time,
            at: Utc::now(),
        })
    }

    /// Zero the counter and stop. Legal from every state.
    pub fn restart(&mut self) -> Option<Event> {
        self.halt();
        let previous_time = self.current_time;
        self.current_time = 0;
        self.state = TimerState::Stopped;
        tracing::debug!(previous_time, "timer restarted");
        Some(Event::TimerRestarted {
            previous_time,
            at: Utc::now(),
        })
    }

    /// Advance one second. Call once per second while `is_ticking()`.
    ///
    /// Pauses the timer when the max duration is reached, in which case the
    /// returned events are `Tick`, `MaxReached`, `TimerPaused { auto: true }`.
    pub fn tick(&mut self) -> Vec<Event> {
        if self.state != TimerState::Running || !self.ticking {
            return Vec::new();
        }

        self.current_time = self.current_time.saturating_add(1);
        let mut events = vec![Event::Tick {
            current_time: self.current_time,
            progress: self.progress(),
        }];

        if self.is_max_reached() {
            let at = Utc::now();
            self.halt();
            self.state = TimerState::Paused;
            tracing::debug!(
                current_time = self.current_time,
                max_duration = self.max_duration,
                "max duration reached"
            );
            events.push(Event::MaxReached {
                current_time: self.current_time,
                max_duration: self.max_duration,
                at,
            });
            events.push(Event::TimerPaused {
                current_time: self.current_time,
                auto: true,
                at,
            });
        }
        events
    }

    pub fn set_max_duration(&mut self, max_duration: u64) {
        self.max_duration = max_duration;
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn set_volume(&mut self, volume: f64) {
        self.cue.set_volume(volume);
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn run(&mut self) {
        self.state = TimerState::Running;
        self.ticking = true;
        self.cue.start();
        tracing::debug!(current_time = self.current_time, "timer running");
    }

    /// Cancel the tick and stop/rewind the cue.
    fn halt(&mut self) {
        self.ticking = false;
        self.cue.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Records every call the engine makes on its cue.
    #[derive(Clone, Default)]
    struct RecordingCue {
        calls: Rc<RefCell<Vec<String>>>,
        playing: Rc<RefCell<bool>>,
    }

    impl AudioCue for RecordingCue {
        fn start(&mut self) {
            self.calls.borrow_mut().push("start".into());
            *self.playing.borrow_mut() = true;
        }
        fn stop(&mut self) {
            self.calls.borrow_mut().push("stop".into());
            *self.playing.borrow_mut() = false;
        }
        fn set_volume(&mut self, volume: f64) {
            self.calls.borrow_mut().push(format!("volume {volume}"));
        }
    }

    fn engine(max: u64) -> (TimerEngine, RecordingCue) {
        let cue = RecordingCue::default();
        (TimerEngine::new(max, Box::new(cue.clone())), cue)
    }

    #[test]
    fn start_pause_resume() {
        let (mut engine, _) = engine(60);
        assert_eq!(engine.state(), TimerState::Stopped);

        assert!(engine.start().is_some());
        assert_eq!(engine.state(), TimerState::Running);
        assert!(engine.is_ticking());

        assert!(engine.pause().is_some());
        assert_eq!(engine.state(), TimerState::Paused);
        assert!(!engine.is_ticking());

        assert!(engine.resume().is_some());
        assert_eq!(engine.state(), TimerState::Running);
    }

    #[test]
    fn start_is_noop_while_running() {
        let (mut engine, cue) = engine(60);
        engine.start();
        assert!(engine.start().is_none());
        assert_eq!(cue.calls.borrow().as_slice(), ["start"]);
    }

    #[test]
    fn resume_only_from_paused() {
        let (mut engine, _) = engine(60);
        assert!(engine.resume().is_none());
        assert_eq!(engine.state(), TimerState::Stopped);
        engine.start();
        assert!(engine.resume().is_none());
    }

    #[test]
    fn pause_is_idempotent() {
        let (mut engine, _) = engine(60);
        engine.start();
        engine.tick();
        assert!(engine.pause().is_some());
        assert!(engine.pause().is_none());
        assert_eq!(engine.state(), TimerState::Paused);
        assert_eq!(engine.current_time(), 1);
    }

    #[test]
    fn pause_from_stopped_keeps_stopped() {
        let (mut engine, _) = engine(60);
        assert!(engine.pause().is_none());
        assert_eq!(engine.state(), TimerState::Stopped);
    }

    #[test]
    fn tick_counts_only_while_running() {
        let (mut engine, _) = engine(60);
        assert!(engine.tick().is_empty());
        engine.start();
        engine.tick();
        engine.tick();
        engine.pause();
        assert!(engine.tick().is_empty());
        assert_eq!(engine.current_time(), 2);
    }

    #[test]
    fn cue_plays_only_while_running() {
        let (mut engine, cue) = engine(60);
        engine.start();
        assert!(*cue.playing.borrow());
        engine.pause();
        assert!(!*cue.playing.borrow());
        engine.resume();
        assert!(*cue.playing.borrow());
        engine.restart();
        assert!(!*cue.playing.borrow());
    }

    #[test]
    fn auto_pauses_at_max_duration() {
        let (mut engine, cue) = engine(5);
        engine.start();
        for _ in 0..4 {
            let events = engine.tick();
            assert_eq!(events.len(), 1);
        }
        let events = engine.tick();
        assert_eq!(engine.state(), TimerState::Paused);
        assert_eq!(engine.current_time(), 5);
        assert!(engine.is_max_reached());
        assert!(!engine.is_ticking());
        assert!(!*cue.playing.borrow());
        assert!(matches!(events[1], Event::MaxReached { current_time: 5, .. }));
        assert!(matches!(events[2], Event::TimerPaused { auto: true, .. }));
    }

    #[test]
    fn resuming_past_max_pauses_again_after_one_tick() {
        let (mut engine, _) = engine(2);
        engine.start();
        engine.tick();
        engine.tick();
        assert_eq!(engine.state(), TimerState::Paused);

        engine.resume();
        let events = engine.tick();
        assert_eq!(engine.current_time(), 3);
        assert_eq!(engine.state(), TimerState::Paused);
        assert_eq!(events.len(), 3);
    }

    #[test]
    fn raising_max_lets_the_timer_run_on() {
        let (mut engine, _) = engine(2);
        engine.start();
        engine.tick();
        engine.tick();
        engine.set_max_duration(10);
        engine.resume();
        engine.tick();
        assert_eq!(engine.state(), TimerState::Running);
        assert!(!engine.is_max_reached());
    }

    #[test]
    fn restart_zeroes_from_any_state() {
        let (mut engine, _) = engine(60);
        engine.start();
        engine.tick();
        engine.tick();
        let event = engine.restart().unwrap();
        assert!(matches!(event, Event::TimerRestarted { previous_time: 2, .. }));
        assert_eq!(engine.current_time(), 0);
        assert_eq!(engine.state(), TimerState::Stopped);
        assert!(!engine.is_ticking());

        assert!(engine.restart().is_some());
        assert_eq!(engine.state(), TimerState::Stopped);
    }

    #[test]
    fn progress_is_clamped_and_safe_at_zero_max() {
        let (mut engine, _) = engine(4);
        assert_eq!(engine.progress(), 0.0);
        engine.start();
        engine.tick();
        assert_eq!(engine.progress(), 0.25);
        engine.set_max_duration(0);
        assert_eq!(engine.progress(), 0.0);
        assert!(engine.is_max_reached());
        engine.set_max_duration(1);
        assert_eq!(engine.progress(), 1.0);
    }

    #[test]
    fn materialize_session_uses_default_for_empty_title() {
        let (mut engine, _) = engine(60);
        engine.start();
        engine.tick();
        let now = Utc::now();
        let session = engine.materialize_session("Deep Work Session", now);
        assert_eq!(session.title, "Deep Work Session");
        assert_eq!(session.duration, 1);
        assert_eq!(session.date, now);
        assert_eq!(engine.current_time(), 1);
        assert_eq!(engine.state(), TimerState::Running);

        engine.set_title("Refactor parser");
        let session = engine.materialize_session("Deep Work Session", now);
        assert_eq!(session.title, "Refactor parser");
    }

    #[test]
    fn snapshot_reports_formatted_time() {
        let (mut engine, _) = engine(7200);
        engine.start();
        for _ in 0..61 {
            engine.tick();
        }
        match engine.snapshot() {
            Event::StateSnapshot {
                state,
                formatted_time,
                max_reached,
                ..
            } => {
                assert_eq!(state, TimerState::Running);
                assert_eq!(formatted_time, "00:01:01");
                assert!(!max_reached);
            }
            _ => panic!("Expected StateSnapshot"),
        }
    }

    #[test]
    fn volume_is_forwarded_to_cue() {
        let (mut engine, cue) = engine(60);
        engine.set_volume(0.25);
        assert_eq!(cue.calls.borrow().as_slice(), ["volume 0.25"]);
    }
}
