use std::time::Duration;

use glam::Vec2;
use nova_strike_core::{
    tuning::{MINE_BLAST_RADIUS, MINE_DAMAGE, MINE_DRAG, MINE_LIFETIME, SCREEN_HEIGHT, SCREEN_WIDTH},
    Hitbox, MineId, PlayerSlot, ProjectileId, ProjectileOwner,
};

const CULL_MARGIN: f32 = 50.0;

/// Damage a mine blast deals at `distance` from its centre.
///
/// Falls off linearly from half the mine's direct damage at the centre to
/// zero at the blast radius.
#[must_use]
pub fn blast_damage(distance: f32) -> f32 {
    let distance = distance.max(0.0);
    if distance >= MINE_BLAST_RADIUS {
        return 0.0;
    }
    MINE_DAMAGE * (1.0 - distance / MINE_BLAST_RADIUS) * 0.5
}

/// Velocity that carries a projectile from `from` toward `to` at `speed`.
/// Coincident points fall back to a straight downward shot.
pub(crate) fn aim(from: Vec2, to: Vec2, speed: f32) -> Vec2 {
    let delta = to - from;
    let length = delta.length();
    if length > 0.0 {
        delta / length * speed
    } else {
        Vec2::new(0.0, speed)
    }
}

fn beyond_margin(position: Vec2) -> bool {
    position.y > SCREEN_HEIGHT + CULL_MARGIN
        || position.y < -CULL_MARGIN
        || position.x > SCREEN_WIDTH + CULL_MARGIN
        || position.x < -CULL_MARGIN
}

#[derive(Clone, Debug)]
pub(crate) struct Projectile {
    pub(crate) id: ProjectileId,
    pub(crate) owner: ProjectileOwner,
    pub(crate) position: Vec2,
    pub(crate) velocity: Vec2,
    pub(crate) damage: f32,
    pub(crate) hitbox: Hitbox,
    /// Remaining beam time for lasers; `None` for moving bolts.
    pub(crate) beam: Option<Duration>,
}

impl Projectile {
    pub(crate) fn is_laser(&self) -> bool {
        self.beam.is_some()
    }

    /// Moves bolts and burns down beams. Returns `false` once the projectile
    /// should be removed.
    pub(crate) fn advance(&mut self, dt: Duration) -> bool {
        match self.beam.as_mut() {
            Some(remaining) => {
                *remaining = remaining.saturating_sub(dt);
                !remaining.is_zero()
            }
            None => {
                self.position += self.velocity * dt.as_secs_f32();
                !beyond_margin(self.position)
            }
        }
    }
}

/// Why a mine went off on its own.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Fuse {
    Armed,
    Expired,
    LeftScreen,
}

#[derive(Clone, Debug)]
pub(crate) struct Mine {
    pub(crate) id: MineId,
    pub(crate) owner: PlayerSlot,
    pub(crate) position: Vec2,
    pub(crate) velocity: Vec2,
    pub(crate) elapsed: Duration,
}

impl Mine {
    pub(crate) fn new(id: MineId, owner: PlayerSlot, position: Vec2, velocity: Vec2) -> Self {
        Self {
            id,
            owner,
            position,
            velocity,
            elapsed: Duration::ZERO,
        }
    }

    pub(crate) fn advance(&mut self, dt: Duration) -> Fuse {
        self.elapsed = self.elapsed.saturating_add(dt);
        self.position += self.velocity * dt.as_secs_f32();
        self.velocity *= MINE_DRAG;

        if self.elapsed >= MINE_LIFETIME {
            Fuse::Expired
        } else if beyond_margin(self.position) {
            Fuse::LeftScreen
        } else {
            Fuse::Armed
        }
    }

    pub(crate) fn remaining(&self) -> Duration {
        MINE_LIFETIME.saturating_sub(self.elapsed)
    }
}
