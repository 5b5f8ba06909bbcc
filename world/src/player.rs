use std::time::Duration;

use glam::Vec2;
use nova_strike_core::{
    tuning::{
        DOUBLE_SHOT_OFFSET, HULL_MAX_HITS, INVINCIBILITY_DURATION, MINE_AMMO_PICKUP,
        MINE_LAUNCH_SPEED, MINE_LAUNCH_THRESHOLD, MINE_MAX_AMMO, PLAYER_BOLT_SPEED,
        PLAYER_HALF_EXTENT, PLAYER_LIVES, PLAYER_MAX_LIVES, PLAYER_MAX_SHIELD, PLAYER_SPEED,
        POWER_UP_DURATION, SCREEN_HEIGHT, SCREEN_WIDTH, SHIELD_REGEN_DELAY, SHIELD_REGEN_RATE,
        TRIPLE_SHOT_ANGLE_DEGREES, TRIPLE_SHOT_OFFSET,
    },
    PlayerIntent, PlayerSlot, PowerUpKind, WeaponKind,
};

/// Result of routing damage through a ship's shield, hull and lives.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum DamageOutcome {
    /// The ship was invincible and nothing changed.
    Ignored,
    /// The shield soaked the hit.
    Shielded,
    /// The hull lost one hit.
    HullHit,
    /// The hull gave out and a life was consumed.
    LifeLost,
    /// The final life was consumed.
    Destroyed,
}

/// Projectile produced by a trigger pull.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) enum Shot {
    Bolt { origin: Vec2, velocity: Vec2 },
    Laser { x: f32, nose_y: f32 },
}

/// Outcome of advancing a ship by one tick.
#[derive(Debug, Default)]
pub(crate) struct ShipTick {
    pub(crate) shots: Vec<Shot>,
    pub(crate) weapon_expired: bool,
}

#[derive(Clone, Debug)]
pub(crate) struct PlayerShip {
    pub(crate) slot: PlayerSlot,
    pub(crate) position: Vec2,
    pub(crate) velocity: Vec2,
    pub(crate) lives: u8,
    pub(crate) shield: f32,
    pub(crate) hull_hits: u8,
    pub(crate) weapon: WeaponKind,
    pub(crate) weapon_timer: Duration,
    pub(crate) mine_ammo: u8,
    pub(crate) invincibility: Duration,
    pub(crate) intent: PlayerIntent,
    clock: Duration,
    last_damage: Option<Duration>,
    last_fire: Option<Duration>,
}

impl PlayerShip {
    pub(crate) fn launch(slot: PlayerSlot, position: Vec2) -> Self {
        Self {
            slot,
            position,
            velocity: Vec2::ZERO,
            lives: PLAYER_LIVES,
            shield: PLAYER_MAX_SHIELD,
            hull_hits: HULL_MAX_HITS,
            weapon: WeaponKind::Single,
            weapon_timer: Duration::ZERO,
            mine_ammo: 0,
            invincibility: Duration::ZERO,
            intent: PlayerIntent::default(),
            clock: Duration::ZERO,
            last_damage: None,
            last_fire: None,
        }
    }

    /// Launch position for a slot given the number of ships in the session.
    pub(crate) fn launch_position(slot: PlayerSlot, players: u8) -> Vec2 {
        let y = SCREEN_HEIGHT - nova_strike_core::tuning::PLAYER_SPAWN_MARGIN;
        let x = match (players, slot.get()) {
            (0 | 1, _) => SCREEN_WIDTH / 2.0,
            (_, 0) => SCREEN_WIDTH / 3.0,
            _ => SCREEN_WIDTH * 2.0 / 3.0,
        };
        Vec2::new(x, y)
    }

    pub(crate) fn is_invincible(&self) -> bool {
        !self.invincibility.is_zero()
    }

    pub(crate) fn grant_invincibility(&mut self) {
        self.invincibility = INVINCIBILITY_DURATION;
    }

    /// Applies damage. A positive shield absorbs the whole hit and floors at
    /// zero; any excess is discarded rather than forwarded to the hull.
    pub(crate) fn take_damage(&mut self, amount: f32) -> DamageOutcome {
        if self.is_invincible() {
            return DamageOutcome::Ignored;
        }

        self.last_damage = Some(self.clock);

        if self.shield > 0.0 {
            self.shield = (self.shield - amount.max(0.0)).max(0.0);
            return DamageOutcome::Shielded;
        }

        self.hull_hits = self.hull_hits.saturating_sub(1);
        if self.hull_hits > 0 {
            return DamageOutcome::HullHit;
        }

        self.lives = self.lives.saturating_sub(1);
        if self.lives == 0 {
            return DamageOutcome::Destroyed;
        }

        self.shield = PLAYER_MAX_SHIELD;
        self.hull_hits = HULL_MAX_HITS;
        self.grant_invincibility();
        DamageOutcome::LifeLost
    }

    pub(crate) fn advance(&mut self, dt: Duration) -> ShipTick {
        let seconds = dt.as_secs_f32();
        self.clock = self.clock.saturating_add(dt);

        self.velocity = self.intent.steering() * PLAYER_SPEED;
        let moved = self.position + self.velocity * seconds;
        self.position = Vec2::new(
            moved
                .x
                .clamp(PLAYER_HALF_EXTENT, SCREEN_WIDTH - PLAYER_HALF_EXTENT),
            moved
                .y
                .clamp(PLAYER_HALF_EXTENT, SCREEN_HEIGHT - PLAYER_HALF_EXTENT),
        );

        if self.shield < PLAYER_MAX_SHIELD && self.regeneration_ready() {
            self.shield = (self.shield + SHIELD_REGEN_RATE * seconds).min(PLAYER_MAX_SHIELD);
        }

        self.invincibility = self.invincibility.saturating_sub(dt);

        let mut tick = ShipTick::default();
        if !self.weapon_timer.is_zero() {
            self.weapon_timer = self.weapon_timer.saturating_sub(dt);
            if self.weapon_timer.is_zero() {
                self.weapon = WeaponKind::Single;
                tick.weapon_expired = true;
            }
        }

        if self.intent.fire {
            tick.shots = self.pull_trigger();
        }
        tick
    }

    fn regeneration_ready(&self) -> bool {
        match self.last_damage {
            Some(at) => self.clock.saturating_sub(at) > SHIELD_REGEN_DELAY,
            None => true,
        }
    }

    fn pull_trigger(&mut self) -> Vec<Shot> {
        if let Some(last) = self.last_fire {
            if self.clock.saturating_sub(last) < self.weapon.fire_interval() {
                return Vec::new();
            }
        }
        self.last_fire = Some(self.clock);

        let nose_y = self.position.y - PLAYER_HALF_EXTENT;
        let x = self.position.x;
        let straight = Vec2::new(0.0, -PLAYER_BOLT_SPEED);
        let bolt = |offset: f32, velocity: Vec2| Shot::Bolt {
            origin: Vec2::new(x + offset, nose_y),
            velocity,
        };

        match self.weapon {
            WeaponKind::Single => vec![bolt(0.0, straight)],
            WeaponKind::Double => vec![
                bolt(-DOUBLE_SHOT_OFFSET, straight),
                bolt(DOUBLE_SHOT_OFFSET, straight),
            ],
            WeaponKind::Triple => {
                let angle = TRIPLE_SHOT_ANGLE_DEGREES.to_radians();
                let lateral = angle.sin() * PLAYER_BOLT_SPEED;
                let climb = -angle.cos() * PLAYER_BOLT_SPEED;
                vec![
                    bolt(0.0, straight),
                    bolt(-TRIPLE_SHOT_OFFSET, Vec2::new(-lateral, climb)),
                    bolt(TRIPLE_SHOT_OFFSET, Vec2::new(lateral, climb)),
                ]
            }
            WeaponKind::Laser => vec![Shot::Laser { x, nose_y }],
        }
    }

    /// Consumes one mine and returns its launch position and velocity.
    pub(crate) fn launch_mine(&mut self) -> Option<(Vec2, Vec2)> {
        if self.mine_ammo == 0 {
            return None;
        }
        self.mine_ammo -= 1;

        let speed = self.velocity.length();
        let velocity = if speed > MINE_LAUNCH_THRESHOLD {
            self.velocity * (MINE_LAUNCH_SPEED / speed)
        } else {
            Vec2::ZERO
        };
        let position = Vec2::new(self.position.x, self.position.y + PLAYER_HALF_EXTENT);
        Some((position, velocity))
    }

    pub(crate) fn apply_power_up(&mut self, kind: PowerUpKind) {
        if let Some(weapon) = kind.weapon() {
            self.weapon = weapon;
            self.weapon_timer = POWER_UP_DURATION;
            return;
        }
        match kind {
            PowerUpKind::MineAmmo => {
                self.mine_ammo = self
                    .mine_ammo
                    .saturating_add(MINE_AMMO_PICKUP)
                    .min(MINE_MAX_AMMO);
            }
            PowerUpKind::ShieldRestore => self.shield = PLAYER_MAX_SHIELD,
            PowerUpKind::ExtraLife => {
                self.lives = self.lives.saturating_add(1).min(PLAYER_MAX_LIVES);
            }
            PowerUpKind::Invincibility => self.grant_invincibility(),
            PowerUpKind::DoubleShot | PowerUpKind::TripleShot | PowerUpKind::Laser => {}
        }
    }
}
