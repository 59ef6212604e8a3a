//! Application controller.
//!
//! [`DeepWork`] owns the timer engine and both stores, applies user intents
//! to them and publishes the resulting [`Event`]s to subscribed observers.
//! Front ends render from those events instead of polling state.

use chrono::Utc;
use uuid::Uuid;

use crate::audio::AudioCue;
use crate::events::{Event, Observer};
use crate::history::{HistoryStore, WorkSession};
use crate::storage::{KvStore, Settings, SettingsStore};
use crate::timer::TimerEngine;

pub struct DeepWork<S: KvStore + Clone> {
    engine: TimerEngine,
    settings: SettingsStore<S>,
    history: HistoryStore<S>,
    observers: Vec<Box<dyn Observer>>,
}

impl<S: KvStore + Clone> DeepWork<S> {
    /// Load settings and history from `kv` and build a stopped engine that
    /// plays `cue` while running.
    pub fn new(kv: S, cue: Box<dyn AudioCue>) -> Self {
        let settings = SettingsStore::load(kv.clone());
        let history = HistoryStore::load(kv);
        let mut engine = TimerEngine::new(settings.current().max_duration, cue);
        engine.set_volume(settings.current().volume);
        Self {
            engine,
            settings,
            history,
            observers: Vec::new(),
        }
    }

    pub fn subscribe(&mut self, observer: impl Observer + 'static) {
        self.observers.push(Box::new(observer));
    }

    pub fn engine(&self) -> &TimerEngine {
        &self.engine
    }

    pub fn settings(&self) -> &Settings {
        self.settings.current()
    }

    pub fn history(&self) -> &HistoryStore<S> {
        &self.history
    }

    pub fn snapshot(&self) -> Event {
        self.engine.snapshot()
    }

    // ── Intents ──────────────────────────────────────────────────────

    pub fn start(&mut self) -> Option<Event> {
        let event = self.engine.start();
        self.publish_opt(&event);
        event
    }

    pub fn pause(&mut self) -> Option<Event> {
        let event = self.engine.pause();
        self.publish_opt(&event);
        event
    }

    pub fn resume(&mut self) -> Option<Event> {
        let event = self.engine.resume();
        self.publish_opt(&event);
        event
    }

    /// One-second tick from the event loop.
    pub fn tick(&mut self) -> Vec<Event> {
        let events = self.engine.tick();
        for event in &events {
            self.publish(event);
        }
        events
    }

    /// Record the elapsed time as a session (if any) and reset the timer.
    pub fn restart(&mut self) -> Option<WorkSession> {
        let saved = self.save_current_session();
        let event = self.engine.restart();
        self.publish_opt(&event);
        saved
    }

    /// Append the elapsed time to the history without touching the timer.
    /// Nothing is recorded while the elapsed time is zero.
    pub fn save_current_session(&mut self) -> Option<WorkSession> {
        if self.engine.current_time() == 0 {
            return None;
        }
        let session = self
            .engine
            .materialize_session(&self.settings.current().default_title, Utc::now());
        self.history.add(session.clone());
        tracing::debug!(id = %session.id, duration = session.duration, "session saved");
        self.publish(&Event::SessionSaved {
            id: session.id,
            title: session.title.clone(),
            duration: session.duration,
            at: session.date,
        });
        Some(session)
    }

    /// Replace the settings wholesale, persist them and push the max
    /// duration and volume into the running engine.
    pub fn update_settings(&mut self, settings: Settings) {
        let settings = settings.normalized();
        self.engine.set_max_duration(settings.max_duration);
        self.engine.set_volume(settings.volume);
        self.settings.update(settings.clone());
        self.publish(&Event::SettingsUpdated {
            settings,
            at: Utc::now(),
        });
    }

    pub fn delete_session(&mut self, id: Uuid) -> bool {
        let removed = self.history.delete(id);
        if removed {
            self.publish(&Event::SessionDeleted { id, at: Utc::now() });
        }
        removed
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.engine.set_title(title);
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn publish(&mut self, event: &Event) {
        for observer in &mut self.observers {
            observer.notify(event);
        }
    }

    fn publish_opt(&mut self, event: &Option<Event>) {
        if let Some(event) = event {
            self.publish(event);
        }
    }
}
