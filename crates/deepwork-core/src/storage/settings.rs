//! User settings and their persistence.
//!
//! The record is stored as JSON under [`SETTINGS_KEY`]. Every field carries
//! its own default, so older or partial records still load.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::{KvStore, SETTINGS_KEY};

/// Background theme of the timer window.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum Theme {
    #[default]
    Blue,
    Green,
    Purple,
    Orange,
}

impl Theme {
    pub const ALL: [Theme; 4] = [Theme::Blue, Theme::Green, Theme::Purple, Theme::Orange];

    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Blue => "blue",
            Theme::Green => "green",
            Theme::Purple => "purple",
            Theme::Orange => "orange",
        }
    }

    /// Accent colour for front ends, as a hex string.
    pub fn accent_hex(&self) -> &'static str {
        match self {
            Theme::Blue => "#3b82f6",
            Theme::Green => "#22c55e",
            Theme::Purple => "#a855f7",
            Theme::Orange => "#f97316",
        }
    }

    /// Lenient parse: anything unrecognized is blue.
    pub fn parse_lenient(s: &str) -> Self {
        s.parse().unwrap_or_default()
    }
}

impl From<String> for Theme {
    fn from(s: String) -> Self {
        Theme::parse_lenient(&s)
    }
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "blue" => Ok(Theme::Blue),
            "green" => Ok(Theme::Green),
            "purple" => Ok(Theme::Purple),
            "orange" => Ok(Theme::Orange),
            other => Err(format!("unknown theme: {other}")),
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Application settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Maximum session length in seconds. The timer pauses itself here.
    #[serde(default = "default_max_duration")]
    pub max_duration: u64,
    #[serde(default)]
    pub background_theme: Theme,
    /// Cue volume in `[0, 1]`.
    #[serde(default = "default_volume")]
    pub volume: f64,
    #[serde(default = "default_title")]
    pub default_title: String,
}

fn default_max_duration() -> u64 {
    7200
}
fn default_volume() -> f64 {
    0.5
}
fn default_title() -> String {
    "Deep Work Session".into()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            max_duration: default_max_duration(),
            background_theme: Theme::default(),
            volume: default_volume(),
            default_title: default_title(),
        }
    }
}

impl Settings {
    /// Build a max duration from the hour/minute fields of a settings editor.
    ///
    /// Negative parts count as zero.
    pub fn max_duration_from_parts(hours: i64, minutes: i64) -> u64 {
        let hours = hours.max(0) as u64;
        let minutes = minutes.max(0) as u64;
        hours.saturating_mul(3600).saturating_add(minutes.saturating_mul(60))
    }

    /// Split the max duration back into whole hours and leftover minutes.
    pub fn max_duration_parts(&self) -> (u64, u64) {
        (self.max_duration / 3600, self.max_duration % 3600 / 60)
    }

    /// Set the volume, clamped into `[0, 1]`. NaN becomes 0.
    pub fn set_volume(&mut self, volume: f64) {
        self.volume = clamp_volume(volume);
    }

    /// Clamp the volume and restore a blank default title.
    pub fn normalized(mut self) -> Self {
        self.volume = clamp_volume(self.volume);
        if self.default_title.trim().is_empty() {
            self.default_title = default_title();
        }
        self
    }
}

pub(crate) fn clamp_volume(volume: f64) -> f64 {
    if volume.is_nan() {
        0.0
    } else {
        volume.clamp(0.0, 1.0)
    }
}

/// Holds the live [`Settings`] and writes them through to a [`KvStore`].
pub struct SettingsStore<S: KvStore> {
    kv: S,
    current: Settings,
}

impl<S: KvStore> SettingsStore<S> {
    /// Load settings from `kv`, falling back to defaults.
    pub fn load(kv: S) -> Self {
        let current = Self::read(&kv);
        Self { kv, current }
    }

    fn read(kv: &S) -> Settings {
        let bytes = match kv.get(SETTINGS_KEY) {
            Ok(Some(bytes)) => bytes,
            Ok(None) => return Settings::default(),
            Err(e) => {
                tracing::warn!(error = %e, "failed to read settings, using defaults");
                return Settings::default();
            }
        };
        match serde_json::from_slice::<Settings>(&bytes) {
            Ok(settings) => settings.normalized(),
            Err(e) => {
                tracing::warn!(error = %e, "stored settings are unreadable, using defaults");
                Settings::default()
            }
        }
    }

    pub fn current(&self) -> &Settings {
        &self.current
    }

    /// Replace the settings wholesale and persist them.
    pub fn update(&mut self, settings: Settings) {
        self.current = settings.normalized();
        self.save();
    }

    /// Persist the current settings. Failures are logged and dropped.
    pub fn save(&self) {
        let bytes = match serde_json::to_vec(&self.current) {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::warn!(error = %e, "failed to encode settings");
                return;
            }
        };
        if let Err(e) = self.kv.set(SETTINGS_KEY, &bytes) {
            tracing::warn!(error = %e, "failed to persist settings");
        }
    }

    pub fn kv(&self) -> &S {
        &self.kv
    }
}
