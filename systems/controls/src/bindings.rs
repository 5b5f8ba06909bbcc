use nova_strike_core::{Key, PlayerSlot};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Bindable ship action.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    /// Steer toward the top of the screen.
    Up,
    /// Steer toward the bottom of the screen.
    Down,
    /// Steer toward the left edge.
    Left,
    /// Steer toward the right edge.
    Right,
    /// Fire the current weapon.
    Fire,
    /// Launch a mine.
    Mine,
}

impl Action {
    /// Every bindable action in menu order.
    pub const ALL: [Self; 6] = [
        Self::Up,
        Self::Down,
        Self::Left,
        Self::Right,
        Self::Fire,
        Self::Mine,
    ];

    /// Label shown next to the binding.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Up => "UP",
            Self::Down => "DOWN",
            Self::Left => "LEFT",
            Self::Right => "RIGHT",
            Self::Fire => "FIRE",
            Self::Mine => "MINE",
        }
    }
}

/// Keys bound to one player's actions. Any action may be left unbound.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerBindings {
    /// Key steering up.
    pub up: Option<Key>,
    /// Key steering down.
    pub down: Option<Key>,
    /// Key steering left.
    pub left: Option<Key>,
    /// Key steering right.
    pub right: Option<Key>,
    /// Key firing the weapon.
    pub fire: Option<Key>,
    /// Key launching a mine.
    pub mine: Option<Key>,
}

impl PlayerBindings {
    /// Bindings with every action unbound.
    pub const UNBOUND: Self = Self {
        up: None,
        down: None,
        left: None,
        right: None,
        fire: None,
        mine: None,
    };

    /// Default bindings for a player slot.
    #[must_use]
    pub const fn defaults(slot: PlayerSlot) -> Self {
        if slot.get() == 0 {
            Self {
                up: Some(Key::W),
                down: Some(Key::S),
                left: Some(Key::A),
                right: Some(Key::D),
                fire: Some(Key::Digit2),
                mine: Some(Key::Digit1),
            }
        } else {
            Self {
                up: Some(Key::Up),
                down: Some(Key::Down),
                left: Some(Key::Left),
                right: Some(Key::Right),
                fire: Some(Key::Comma),
                mine: Some(Key::M),
            }
        }
    }

    /// Key bound to `action`, if any.
    #[must_use]
    pub const fn get(&self, action: Action) -> Option<Key> {
        match action {
            Action::Up => self.up,
            Action::Down => self.down,
            Action::Left => self.left,
            Action::Right => self.right,
            Action::Fire => self.fire,
            Action::Mine => self.mine,
        }
    }

    fn slot_mut(&mut self, action: Action) -> &mut Option<Key> {
        match action {
            Action::Up => &mut self.up,
            Action::Down => &mut self.down,
            Action::Left => &mut self.left,
            Action::Right => &mut self.right,
            Action::Fire => &mut self.fire,
            Action::Mine => &mut self.mine,
        }
    }
}

impl Default for PlayerBindings {
    fn default() -> Self {
        Self::UNBOUND
    }
}

/// Key bindings for both player slots.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControlBindings {
    /// Bindings of the first player.
    pub player_one: PlayerBindings,
    /// Bindings of the second player.
    pub player_two: PlayerBindings,
}

impl Default for ControlBindings {
    fn default() -> Self {
        Self {
            player_one: PlayerBindings::defaults(PlayerSlot::FIRST),
            player_two: PlayerBindings::defaults(PlayerSlot::SECOND),
        }
    }
}

impl ControlBindings {
    /// Bindings of the provided slot.
    #[must_use]
    pub const fn player(&self, slot: PlayerSlot) -> &PlayerBindings {
        if slot.get() == 0 {
            &self.player_one
        } else {
            &self.player_two
        }
    }

    fn player_mut(&mut self, slot: PlayerSlot) -> &mut PlayerBindings {
        if slot.get() == 0 {
            &mut self.player_one
        } else {
            &mut self.player_two
        }
    }

    /// Binds `key` to `action` for `slot`. Any other action of either player
    /// that used the key becomes unbound.
    pub fn set(&mut self, slot: PlayerSlot, action: Action, key: Key) {
        for other_slot in PlayerSlot::ALL {
            for other_action in Action::ALL {
                if other_slot == slot && other_action == action {
                    continue;
                }
                let bound = self.player_mut(other_slot).slot_mut(other_action);
                if *bound == Some(key) {
                    debug!(
                        slot = other_slot.get(),
                        action = other_action.label(),
                        key = key.label(),
                        "unbinding conflicting key"
                    );
                    *bound = None;
                }
            }
        }
        *self.player_mut(slot).slot_mut(action) = Some(key);
    }

    /// Removes the key bound to `action` for `slot`.
    pub fn clear(&mut self, slot: PlayerSlot, action: Action) {
        *self.player_mut(slot).slot_mut(action) = None;
    }

    /// Restores the default bindings.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Player and action a key is bound to, if any.
    #[must_use]
    pub fn lookup(&self, key: Key) -> Option<(PlayerSlot, Action)> {
        PlayerSlot::ALL.into_iter().find_map(|slot| {
            Action::ALL
                .into_iter()
                .find(|action| self.player(slot).get(*action) == Some(key))
                .map(|action| (slot, action))
        })
    }
}
