//! Looping ambient cue played while the timer runs.
//!
//! The cue is a WAV asset decoded once at startup. Failures never reach the
//! caller: a cue that cannot be found, decoded or opened on an output device
//! turns into a permanent no-op.

mod clip;
#[cfg(feature = "audio-output")]
mod output;
mod playback;

pub use clip::CueClip;
pub use playback::PlaybackState;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::error::AudioError;
use crate::storage::clamp_volume;

/// Logical file name of the bundled cue.
pub const CUE_FILE_NAME: &str = "slow-cinematic-clock-ticking.wav";

/// Something that can play the ambient cue.
pub trait AudioCue {
    /// Play from the current position, looping indefinitely.
    fn start(&mut self);
    /// Stop and rewind to the beginning.
    fn stop(&mut self);
    /// Set the playback volume; values outside `[0, 1]` are clamped.
    fn set_volume(&mut self, volume: f64);
    fn is_available(&self) -> bool {
        true
    }
}

/// A cue that never makes a sound.
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentCue;

impl AudioCue for SilentCue {
    fn start(&mut self) {}
    fn stop(&mut self) {}
    fn set_volume(&mut self, _volume: f64) {}
    fn is_available(&self) -> bool {
        false
    }
}

struct Loaded {
    state: Arc<PlaybackState>,
    #[cfg(feature = "audio-output")]
    _output: output::OutputStream,
}

/// The ambient cue backed by a decoded asset.
pub struct AudioCueService {
    loaded: Option<Loaded>,
    volume: f64,
}

impl AudioCueService {
    /// Resolve the cue path: `DEEPWORK_CUE` if set, otherwise
    /// `<sounds_dir>/slow-cinematic-clock-ticking.wav`.
    pub fn default_path() -> Option<PathBuf> {
        if let Ok(path) = std::env::var("DEEPWORK_CUE") {
            return Some(PathBuf::from(path));
        }
        crate::storage::sounds_dir()
            .ok()
            .map(|dir| dir.join(CUE_FILE_NAME))
    }

    /// Load the cue from its default location.
    pub fn load(volume: f64) -> Self {
        match Self::default_path() {
            Some(path) => Self::from_path(&path, volume),
            None => {
                tracing::warn!("could not resolve the cue location, audio disabled");
                Self::unavailable(volume)
            }
        }
    }

    /// Load the cue from `path`. Never fails; see [`AudioCueService::is_available`].
    pub fn from_path(path: &Path, volume: f64) -> Self {
        let volume = clamp_volume(volume);
        match Self::try_open(path, volume) {
            Ok(loaded) => {
                tracing::debug!(path = %path.display(), "cue loaded");
                Self {
                    loaded: Some(loaded),
                    volume,
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "audio cue unavailable");
                Self::unavailable(volume)
            }
        }
    }

    fn unavailable(volume: f64) -> Self {
        Self {
            loaded: None,
            volume: clamp_volume(volume),
        }
    }

    fn try_open(path: &Path, volume: f64) -> Result<Loaded, AudioError> {
        let clip = Arc::new(CueClip::decode(path)?);
        let state = Arc::new(PlaybackState::new(volume as f32));
        #[cfg(feature = "audio-output")]
        {
            let output = output::open(Arc::clone(&clip), Arc::clone(&state))?;
            Ok(Loaded {
                state,
                _output: output,
            })
        }
        #[cfg(not(feature = "audio-output"))]
        {
            tracing::debug!(
                frames = clip.frames(),
                "built without audio-output, cue is tracked but not heard"
            );
            Ok(Loaded { state })
        }
    }

    pub fn volume(&self) -> f64 {
        self.volume
    }

    pub fn is_playing(&self) -> bool {
        self.loaded
            .as_ref()
            .map(|l| l.state.is_playing())
            .unwrap_or(false)
    }

    /// Frames rendered since the last rewind, 0 when unavailable.
    pub fn position(&self) -> u64 {
        self.loaded.as_ref().map(|l| l.state.position()).unwrap_or(0)
    }
}

impl AudioCue for AudioCueService {
    fn start(&mut self) {
        if let Some(loaded) = &self.loaded {
            loaded.state.play();
        }
    }

    fn stop(&mut self) {
        if let Some(loaded) = &self.loaded {
            loaded.state.stop();
        }
    }

    fn set_volume(&mut self, volume: f64) {
        self.volume = clamp_volume(volume);
        if let Some(loaded) = &self.loaded {
            loaded.state.set_volume(self.volume as f32);
        }
    }

    fn is_available(&self) -> bool {
        self.loaded.is_some()
    }
}
