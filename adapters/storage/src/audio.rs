use serde::{Deserialize, Serialize};

use crate::{load_or_default, save, SettingsStore, StoreError};

/// Amount a single menu press changes a volume by.
pub const VOLUME_STEP: f32 = 0.25;

const KEY: &str = "audio";
const BAR_CELLS: usize = 4;

/// Music and sound-effect volumes in `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioSettings {
    music: f32,
    sfx: f32,
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            music: 0.5,
            sfx: 1.0,
        }
    }
}

impl AudioSettings {
    /// Loads the volumes, falling back to the defaults.
    #[must_use]
    pub fn load(store: &dyn SettingsStore) -> Self {
        let stored: Self = load_or_default(store, KEY);
        let mut settings = Self::default();
        settings.set_music(stored.music);
        settings.set_sfx(stored.sfx);
        settings
    }

    /// Persists the volumes.
    pub fn save(&self, store: &mut dyn SettingsStore) -> Result<(), StoreError> {
        save(store, KEY, self)
    }

    /// Music volume.
    #[must_use]
    pub const fn music(&self) -> f32 {
        self.music
    }

    /// Sound-effect volume.
    #[must_use]
    pub const fn sfx(&self) -> f32 {
        self.sfx
    }

    /// Sets the music volume, clamped to `[0, 1]`.
    pub fn set_music(&mut self, volume: f32) {
        self.music = clamp_volume(volume);
    }

    /// Sets the sound-effect volume, clamped to `[0, 1]`.
    pub fn set_sfx(&mut self, volume: f32) {
        self.sfx = clamp_volume(volume);
    }

    /// Moves the music volume one step up or down.
    pub fn step_music(&mut self, up: bool) {
        self.set_music(self.music + signed_step(up));
    }

    /// Moves the sound-effect volume one step up or down.
    pub fn step_sfx(&mut self, up: bool) {
        self.set_sfx(self.sfx + signed_step(up));
    }
}

fn signed_step(up: bool) -> f32 {
    if up {
        VOLUME_STEP
    } else {
        -VOLUME_STEP
    }
}

fn clamp_volume(volume: f32) -> f32 {
    if volume.is_nan() {
        return 0.0;
    }
    volume.clamp(0.0, 1.0)
}

/// Four-cell bar such as `[■■□□]` showing a volume.
#[must_use]
pub fn volume_bar(volume: f32) -> String {
    let filled = ((clamp_volume(volume) * BAR_CELLS as f32).round() as usize).min(BAR_CELLS);
    format!(
        "[{}{}]",
        "\u{25A0}".repeat(filled),
        "\u{25A1}".repeat(BAR_CELLS - filled)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn steps_stay_within_range() {
        let mut settings = AudioSettings::default();
        settings.step_sfx(true);
        assert_eq!(settings.sfx(), 1.0);
        for _ in 0..3 {
            settings.step_music(false);
        }
        assert_eq!(settings.music(), 0.0);
        settings.step_music(true);
        assert_eq!(settings.music(), 0.25);
    }

    #[test]
    fn bar_rounds_to_nearest_cell() {
        assert_eq!(volume_bar(0.5), "[\u{25A0}\u{25A0}\u{25A1}\u{25A1}]");
        assert_eq!(volume_bar(1.0), "[\u{25A0}\u{25A0}\u{25A0}\u{25A0}]");
        assert_eq!(volume_bar(0.1), "[\u{25A1}\u{25A1}\u{25A1}\u{25A1}]");
        assert_eq!(volume_bar(3.0), volume_bar(1.0));
    }
}
