#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Persistent settings for Nova Strike.
//!
//! A [`SettingsStore`] maps short keys to TOML documents. The typed services
//! built on top of it ([`HighScores`], [`AudioSettings`] and
//! [`ControlSettings`]) are constructed explicitly by the binary, loaded once
//! at startup and saved when they change. A missing or corrupt entry never
//! prevents startup: the service logs a warning and falls back to its
//! compiled-in defaults.

mod audio;
mod controls;
mod high_scores;
mod store;

use serde::{de::DeserializeOwned, Serialize};
use tracing::warn;

pub use audio::{volume_bar, AudioSettings, VOLUME_STEP};
pub use controls::ControlSettings;
pub use high_scores::{HighScoreEntry, HighScores, DEFAULT_NAME, MAX_ENTRIES, MAX_NAME_LENGTH};
pub use store::{FileStore, MemoryStore, SettingsStore, StoreError};

/// Decodes the document stored under `key`, if any.
pub fn load<T: DeserializeOwned>(
    store: &dyn SettingsStore,
    key: &str,
) -> Result<Option<T>, StoreError> {
    match store.get(key)? {
        Some(raw) => Ok(Some(toml::from_str(&raw)?)),
        None => Ok(None),
    }
}

/// Encodes `value` and stores it under `key`.
pub fn save<T: Serialize>(
    store: &mut dyn SettingsStore,
    key: &str,
    value: &T,
) -> Result<(), StoreError> {
    let encoded = toml::to_string(value)?;
    store.set(key, &encoded)
}

/// Loads `key`, falling back to `T::default()` when it is missing or
/// unreadable.
fn load_or_default<T: DeserializeOwned + Default>(store: &dyn SettingsStore, key: &str) -> T {
    match load(store, key) {
        Ok(Some(value)) => value,
        Ok(None) => T::default(),
        Err(error) => {
            warn!(key, %error, "discarding unreadable settings");
            T::default()
        }
    }
}
