use std::time::Duration;

use glam::Vec2;
use nova_strike_core::{
    tuning::{POWER_UP_SPEED, SCREEN_HEIGHT},
    PowerUpId, PowerUpKind,
};

const CULL_MARGIN: f32 = 50.0;

#[derive(Clone, Debug)]
pub(crate) struct PowerUp {
    pub(crate) id: PowerUpId,
    pub(crate) kind: PowerUpKind,
    pub(crate) position: Vec2,
}

impl PowerUp {
    pub(crate) fn new(id: PowerUpId, kind: PowerUpKind, position: Vec2) -> Self {
        Self { id, kind, position }
    }

    pub(crate) fn advance(&mut self, dt: Duration) {
        self.position.y += POWER_UP_SPEED * dt.as_secs_f32();
    }

    pub(crate) fn is_off_screen(&self) -> bool {
        self.position.y > SCREEN_HEIGHT + CULL_MARGIN
    }
}
