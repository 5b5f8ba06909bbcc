use nova_strike_system_controls::ControlBindings;

use crate::{load_or_default, save, SettingsStore, StoreError};

const KEY: &str = "controls";

/// Persisted keyboard bindings for both players.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ControlSettings {
    bindings: ControlBindings,
}

impl ControlSettings {
    /// Loads the bindings, falling back to the default layout.
    #[must_use]
    pub fn load(store: &dyn SettingsStore) -> Self {
        Self {
            bindings: load_or_default(store, KEY),
        }
    }

    /// Persists the bindings.
    pub fn save(&self, store: &mut dyn SettingsStore) -> Result<(), StoreError> {
        save(store, KEY, &self.bindings)
    }

    /// Bindings currently in effect.
    #[must_use]
    pub const fn bindings(&self) -> &ControlBindings {
        &self.bindings
    }

    /// Mutable access for the bindings menu.
    pub fn bindings_mut(&mut self) -> &mut ControlBindings {
        &mut self.bindings
    }
}
