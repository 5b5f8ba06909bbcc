#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Input normalisation for player ships.
//!
//! Held keys are read through the active [`ControlBindings`] into
//! [`DeviceSnapshot`] values holding which actions are currently held. The
//! [`IntentTracker`] turns successive snapshots into [`PlayerIntent`] values,
//! edge-triggering mine launches and pause toggles.

mod bindings;

use std::collections::BTreeSet;

use nova_strike_core::{Key, PlayerIntent, PlayerSlot};

pub use bindings::{Action, ControlBindings, PlayerBindings};

/// Keys that toggle the pause menu regardless of bindings.
pub const PAUSE_KEYS: [Key; 2] = [Key::Escape, Key::P];

/// Actions held on a device during the current frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct DeviceSnapshot {
    /// Steer up is held.
    pub up: bool,
    /// Steer down is held.
    pub down: bool,
    /// Steer left is held.
    pub left: bool,
    /// Steer right is held.
    pub right: bool,
    /// Fire is held.
    pub fire: bool,
    /// Mine is held.
    pub mine: bool,
    /// Pause is held.
    pub pause: bool,
}

impl DeviceSnapshot {
    /// Reads the actions bound in `bindings` from the set of held keys.
    #[must_use]
    pub fn from_keys(bindings: &PlayerBindings, held: &BTreeSet<Key>) -> Self {
        let pressed = |action: Action| bindings.get(action).is_some_and(|key| held.contains(&key));
        Self {
            up: pressed(Action::Up),
            down: pressed(Action::Down),
            left: pressed(Action::Left),
            right: pressed(Action::Right),
            fire: pressed(Action::Fire),
            mine: pressed(Action::Mine),
            pause: false,
        }
    }
}

/// Non-blocking source of per-slot device state.
pub trait InputSource {
    /// Latest state of the devices driving `slot`. Slots without a device
    /// report the default, all-released snapshot.
    fn snapshot(&mut self, slot: PlayerSlot) -> DeviceSnapshot;
}

/// Input source with no devices attached.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoInput;

impl InputSource for NoInput {
    fn snapshot(&mut self, _slot: PlayerSlot) -> DeviceSnapshot {
        DeviceSnapshot::default()
    }
}

/// Keyboard state gathered by an adapter for one frame.
#[derive(Clone, Debug, Default)]
pub struct DeviceHub {
    bindings: ControlBindings,
    held_keys: BTreeSet<Key>,
}

impl DeviceHub {
    /// Creates a hub that reads the keyboard through `bindings`.
    #[must_use]
    pub fn new(bindings: ControlBindings) -> Self {
        Self {
            bindings,
            ..Self::default()
        }
    }

    /// Bindings currently in effect.
    #[must_use]
    pub const fn bindings(&self) -> &ControlBindings {
        &self.bindings
    }

    /// Replaces the bindings in effect.
    pub fn set_bindings(&mut self, bindings: ControlBindings) {
        self.bindings = bindings;
    }

    /// Records the keys held during the current frame.
    pub fn set_held_keys<I>(&mut self, keys: I)
    where
        I: IntoIterator<Item = Key>,
    {
        self.held_keys.clear();
        self.held_keys.extend(keys);
    }
}

impl InputSource for DeviceHub {
    fn snapshot(&mut self, slot: PlayerSlot) -> DeviceSnapshot {
        let mut snapshot = DeviceSnapshot::from_keys(self.bindings.player(slot), &self.held_keys);
        if slot == PlayerSlot::FIRST {
            snapshot.pause = PAUSE_KEYS.iter().any(|key| self.held_keys.contains(key));
        }
        snapshot
    }
}

/// Converts held-state snapshots into per-tick intents.
#[derive(Clone, Debug, Default)]
pub struct IntentTracker {
    previous: [DeviceSnapshot; 2],
}

impl IntentTracker {
    /// Creates a tracker that treats every action as released.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Produces the intent for `slot` given its latest snapshot. Mine and
    /// pause are only reported on the tick they transition to pressed.
    pub fn update(&mut self, slot: PlayerSlot, snapshot: DeviceSnapshot) -> PlayerIntent {
        let index = usize::from(slot.get()).min(self.previous.len() - 1);
        let previous = std::mem::replace(&mut self.previous[index], snapshot);
        PlayerIntent {
            up: snapshot.up,
            down: snapshot.down,
            left: snapshot.left,
            right: snapshot.right,
            fire: snapshot.fire,
            deploy_mine: snapshot.mine && !previous.mine,
            pause: snapshot.pause && !previous.pause,
        }
    }

    /// Forgets every held action.
    pub fn reset(&mut self) {
        self.previous = [DeviceSnapshot::default(); 2];
    }
}
