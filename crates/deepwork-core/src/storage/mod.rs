mod database;
mod memory;
mod settings;

pub use database::Database;
pub use memory::MemoryStore;
pub use settings::{Settings, SettingsStore, Theme};
pub(crate) use settings::clamp_volume;

use std::path::PathBuf;

use crate::error::{CoreError, Result};

/// Key holding the serialized [`Settings`] record.
pub const SETTINGS_KEY: &str = "AppSettings";
/// Key holding the serialized session collection.
pub const SESSIONS_KEY: &str = "WorkSessions";

/// Blocking key-value persistence.
///
/// Values are opaque bytes; the stores above this layer decide the encoding.
pub trait KvStore {
    /// Read the value stored under `key`, `None` if absent.
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Insert or replace the value stored under `key`.
    fn set(&self, key: &str, value: &[u8]) -> Result<()>;
}

impl<T: KvStore + ?Sized> KvStore for &T {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &[u8]) -> Result<()> {
        (**self).set(key, value)
    }
}

impl<T: KvStore + ?Sized> KvStore for std::rc::Rc<T> {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &[u8]) -> Result<()> {
        (**self).set(key, value)
    }
}

/// Returns `~/.config/deepwork[-dev]/` based on DEEPWORK_ENV.
///
/// Set DEEPWORK_ENV=dev to use development data directory.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("DEEPWORK_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("deepwork-dev")
    } else {
        base_dir.join("deepwork")
    };

    std::fs::create_dir_all(&dir)
        .map_err(|e| CoreError::DataDir(format!("{}: {e}", dir.display())))?;
    Ok(dir)
}

/// Directory the audio cue asset is looked up in (`<data_dir>/sounds`).
pub fn sounds_dir() -> Result<PathBuf> {
    Ok(data_dir()?.join("sounds"))
}
