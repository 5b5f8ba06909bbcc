#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Nova Strike engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. The simulation driver submits
//! [`Command`] values describing desired mutations, the world executes those
//! commands via its `apply` entry point, and then broadcasts [`Event`] values
//! describing what happened. Systems consume event streams and immutable
//! snapshots and respond exclusively with new command batches.

mod collision;
mod input;
mod stage;
pub mod tuning;

use std::time::Duration;

use glam::Vec2;
use serde::{Deserialize, Serialize};

pub use collision::{Body, BodyRef, CollisionGroup, Contact, Hitbox, CONTACT_PAIRS};
pub use input::Key;
pub use stage::{
    BackgroundSet, SpawnRequest, StageDefinition, StageEvent, StageTable, StageTableError,
    WaveDefinition,
};

/// Canonical banner emitted when the experience boots.
pub const WELCOME_BANNER: &str = "Welcome to Nova Strike.";

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Clears every entity collection and launches ships for a new session.
    StartSession {
        /// Number of player ships to launch, either one or two.
        players: u8,
    },
    /// Records that the provided stage became active.
    EnterStage {
        /// One-based stage number that became active.
        stage: u32,
        /// Background layer set associated with the stage.
        background: BackgroundSet,
    },
    /// Replaces the normalised control intent for a player slot.
    SetPlayerIntent {
        /// Slot whose intent is being updated.
        slot: PlayerSlot,
        /// Intent flags sampled for the current tick.
        intent: PlayerIntent,
    },
    /// Advances the simulation clock by the provided delta time.
    Tick {
        /// Duration of simulated time that elapsed since the previous tick.
        dt: Duration,
    },
    /// Applies the outcome of every overlapping pair reported this tick.
    ResolveContacts {
        /// Overlapping pairs ordered by the contact-pair table.
        contacts: Vec<Contact>,
    },
    /// Requests that an enemy ship enter from the top of the screen.
    SpawnEnemy {
        /// Definition row describing the enemy.
        kind: EnemyKind,
        /// Multiplier applied to hit points, speed, fire cadence and score.
        difficulty: f32,
    },
    /// Requests that an asteroid drift in from the top of the screen.
    SpawnAsteroid,
    /// Requests that the boss of the provided stage begin its entrance.
    SpawnBoss {
        /// Stage number that scales the boss hit points.
        stage: u32,
    },
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    /// Indicates that the simulation clock advanced.
    TimeAdvanced {
        /// Duration of simulated time that elapsed in the tick.
        dt: Duration,
    },
    /// Announces that a new session started with fresh entity collections.
    SessionStarted {
        /// Number of player ships launched.
        players: u8,
    },
    /// Announces that a stage became active.
    StageEntered {
        /// One-based stage number.
        stage: u32,
        /// Background layer set associated with the stage.
        background: BackgroundSet,
    },
    /// Confirms that a player ship was launched.
    PlayerSpawned {
        /// Slot that owns the ship.
        slot: PlayerSlot,
    },
    /// Reports that a player ship fired its weapon.
    ShotFired {
        /// Slot that owns the firing ship.
        slot: PlayerSlot,
        /// Weapon that produced the shot.
        weapon: WeaponKind,
    },
    /// Reports that a player ship absorbed damage without losing a life.
    PlayerDamaged {
        /// Slot that owns the damaged ship.
        slot: PlayerSlot,
        /// Shield strength remaining after the hit.
        shield: f32,
        /// Hull hits remaining after the hit.
        hull_hits: u8,
    },
    /// Reports that a player ship exhausted its hull and consumed a life.
    LifeLost {
        /// Slot that owns the ship.
        slot: PlayerSlot,
        /// Lives remaining after the loss.
        lives_remaining: u8,
    },
    /// Reports that a player ship lost its final life.
    PlayerDestroyed {
        /// Slot that owned the destroyed ship.
        slot: PlayerSlot,
    },
    /// Reports that no player ship remains alive.
    AllPlayersDestroyed,
    /// Confirms that an enemy entered the field.
    EnemySpawned {
        /// Identifier assigned to the enemy.
        enemy: EnemyId,
        /// Definition row describing the enemy.
        kind: EnemyKind,
    },
    /// Reports that an enemy was destroyed by player action.
    EnemyDestroyed {
        /// Identifier of the destroyed enemy.
        enemy: EnemyId,
        /// Definition row describing the enemy.
        kind: EnemyKind,
    },
    /// Reports that an enemy left the screen without being destroyed.
    EnemyEscaped {
        /// Identifier of the enemy that left the field.
        enemy: EnemyId,
    },
    /// Confirms that an asteroid entered the field.
    AsteroidSpawned {
        /// Identifier assigned to the asteroid.
        asteroid: AsteroidId,
        /// Size class of the asteroid.
        size: AsteroidSize,
    },
    /// Reports that an asteroid was destroyed.
    AsteroidDestroyed {
        /// Identifier of the destroyed asteroid.
        asteroid: AsteroidId,
        /// Size class of the asteroid.
        size: AsteroidSize,
    },
    /// Confirms that the boss began its entrance.
    BossSpawned {
        /// Stage the boss belongs to.
        stage: u32,
        /// Hit points the boss starts with.
        max_hp: f32,
    },
    /// Reports that the boss advanced to its next attack phase.
    BossPhaseChanged {
        /// Phase that became active.
        phase: BossPhase,
    },
    /// Reports that the boss ran out of hit points and began exploding.
    BossDestroyed {
        /// Stage the boss belonged to.
        stage: u32,
    },
    /// Reports that the boss explosion sequence finished and rewards were granted.
    BossDefeated {
        /// Stage the boss belonged to.
        stage: u32,
    },
    /// Confirms that a power-up capsule entered the field.
    PowerUpDropped {
        /// Identifier assigned to the capsule.
        power_up: PowerUpId,
        /// Effect carried by the capsule.
        kind: PowerUpKind,
    },
    /// Reports that a player collected a power-up capsule.
    PowerUpCollected {
        /// Slot that collected the capsule.
        slot: PlayerSlot,
        /// Effect that was applied.
        kind: PowerUpKind,
    },
    /// Reports that a temporary weapon ran out and the default weapon returned.
    WeaponExpired {
        /// Slot whose weapon reverted.
        slot: PlayerSlot,
    },
    /// Confirms that a player launched a mine.
    MineDeployed {
        /// Slot that launched the mine.
        slot: PlayerSlot,
        /// Identifier assigned to the mine.
        mine: MineId,
    },
    /// Reports that a mine detonated.
    MineDetonated {
        /// Identifier of the mine.
        mine: MineId,
        /// Blast centre.
        center: Vec2,
    },
    /// Reports that score was added to the session total.
    ScoreAwarded {
        /// Points before the combo multiplier was applied.
        points: u64,
        /// Multiplier active when the award was made.
        multiplier: u32,
        /// Session total after the award.
        total: u64,
    },
}

/// Identifies one of the two player seats.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerSlot(u8);

impl PlayerSlot {
    /// Slot occupied by the first player.
    pub const FIRST: Self = Self(0);
    /// Slot occupied by the second player.
    pub const SECOND: Self = Self(1);
    /// Every slot in seating order.
    pub const ALL: [Self; 2] = [Self::FIRST, Self::SECOND];

    /// Creates a new slot from its zero-based index.
    #[must_use]
    pub const fn new(index: u8) -> Self {
        Self(index)
    }

    /// Retrieves the zero-based index of the slot.
    #[must_use]
    pub const fn get(&self) -> u8 {
        self.0
    }
}

/// Unique identifier assigned to an enemy ship.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EnemyId(u32);

impl EnemyId {
    /// Creates a new identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Unique identifier assigned to an asteroid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AsteroidId(u32);

impl AsteroidId {
    /// Creates a new identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Unique identifier assigned to a projectile or laser beam.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProjectileId(u32);

impl ProjectileId {
    /// Creates a new identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Unique identifier assigned to a space mine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MineId(u32);

impl MineId {
    /// Creates a new identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Unique identifier assigned to a power-up capsule.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PowerUpId(u32);

impl PowerUpId {
    /// Creates a new identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Normalised control flags for a single player during one tick.
///
/// `deploy_mine` and `pause` are edge-triggered: they are only `true` on the
/// tick where the underlying button transitioned from released to pressed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct PlayerIntent {
    /// Move toward the top of the screen.
    pub up: bool,
    /// Move toward the bottom of the screen.
    pub down: bool,
    /// Move toward the left edge.
    pub left: bool,
    /// Move toward the right edge.
    pub right: bool,
    /// Hold to fire the current weapon.
    pub fire: bool,
    /// Launch a mine this tick.
    pub deploy_mine: bool,
    /// Toggle the pause menu this tick.
    pub pause: bool,
}

impl PlayerIntent {
    /// Unit-less steering vector with diagonal input scaled so that diagonal
    /// speed matches axis speed.
    #[must_use]
    pub fn steering(&self) -> Vec2 {
        let mut direction = Vec2::ZERO;
        if self.up {
            direction.y -= 1.0;
        }
        if self.down {
            direction.y += 1.0;
        }
        if self.left {
            direction.x -= 1.0;
        }
        if self.right {
            direction.x += 1.0;
        }
        if direction.x != 0.0 && direction.y != 0.0 {
            direction *= tuning::DIAGONAL_FACTOR;
        }
        direction
    }
}

/// Weapons a player ship can carry.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WeaponKind {
    /// One straight bolt per shot.
    #[default]
    Single,
    /// Two parallel bolts per shot.
    Double,
    /// One straight bolt plus two angled bolts per shot.
    Triple,
    /// Stationary beam spanning to the top of the screen.
    Laser,
}

impl WeaponKind {
    /// Minimum time between consecutive shots.
    #[must_use]
    pub const fn fire_interval(self) -> Duration {
        match self {
            Self::Single => Duration::from_millis(250),
            Self::Double => Duration::from_millis(220),
            Self::Triple => Duration::from_millis(280),
            Self::Laser => Duration::from_millis(250),
        }
    }

    /// Short label shown on the heads-up display.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Single => "SINGLE",
            Self::Double => "DOUBLE",
            Self::Triple => "TRIPLE",
            Self::Laser => "LASER",
        }
    }
}

/// Party responsible for a projectile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ProjectileOwner {
    /// Fired by a player ship.
    Player(PlayerSlot),
    /// Fired by a regular enemy ship.
    Enemy,
    /// Fired by the boss.
    Boss,
}

impl ProjectileOwner {
    /// Reports whether the projectile harms hostile entities.
    #[must_use]
    pub const fn is_player(self) -> bool {
        matches!(self, Self::Player(_))
    }
}

/// Size class of an asteroid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AsteroidSize {
    /// Three hit points; splits into two small asteroids.
    Large,
    /// One hit point; never splits.
    Small,
}

impl AsteroidSize {
    /// Hit points an asteroid of this size starts with.
    #[must_use]
    pub const fn hit_points(self) -> u8 {
        match self {
            Self::Large => 3,
            Self::Small => 1,
        }
    }

    /// Score awarded when an asteroid of this size is destroyed.
    #[must_use]
    pub const fn score(self) -> u64 {
        match self {
            Self::Large => 50,
            Self::Small => 20,
        }
    }

    /// Collision radius in world units.
    #[must_use]
    pub const fn radius(self) -> f32 {
        match self {
            Self::Large => tuning::ASTEROID_LARGE_RADIUS,
            Self::Small => tuning::ASTEROID_SMALL_RADIUS,
        }
    }
}

/// Attack behaviour the boss is currently cycling through.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum BossPhase {
    /// Five-bolt fan aimed at the tracked player.
    #[default]
    BoltVolley,
    /// Rapid single bolts sweeping across the bottom of the screen.
    RaySweep,
    /// Minion launches with occasional aimed bolts.
    MinionSpawn,
}

impl BossPhase {
    /// Phase that follows this one in the cycle.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::BoltVolley => Self::RaySweep,
            Self::RaySweep => Self::MinionSpawn,
            Self::MinionSpawn => Self::BoltVolley,
        }
    }
}

/// Closed set of power-up effects.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PowerUpKind {
    /// Temporary double-shot weapon.
    DoubleShot,
    /// Temporary triple-shot weapon.
    TripleShot,
    /// Temporary laser weapon.
    Laser,
    /// Additional mines.
    MineAmmo,
    /// Full shield.
    ShieldRestore,
    /// One additional life.
    ExtraLife,
    /// Temporary immunity to damage.
    Invincibility,
}

impl PowerUpKind {
    /// Every power-up kind.
    pub const ALL: [Self; 7] = [
        Self::DoubleShot,
        Self::TripleShot,
        Self::Laser,
        Self::MineAmmo,
        Self::ShieldRestore,
        Self::ExtraLife,
        Self::Invincibility,
    ];

    /// Power-ups that grant a temporary weapon.
    pub const WEAPONS: [Self; 3] = [Self::DoubleShot, Self::TripleShot, Self::Laser];

    /// Label printed on the capsule.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::DoubleShot => "2x",
            Self::TripleShot => "3x",
            Self::Laser => "L",
            Self::MineAmmo => "M",
            Self::ShieldRestore => "S",
            Self::ExtraLife => "1UP",
            Self::Invincibility => "I",
        }
    }

    /// Weapon granted by the power-up, if any.
    #[must_use]
    pub const fn weapon(self) -> Option<WeaponKind> {
        match self {
            Self::DoubleShot => Some(WeaponKind::Double),
            Self::TripleShot => Some(WeaponKind::Triple),
            Self::Laser => Some(WeaponKind::Laser),
            Self::MineAmmo | Self::ShieldRestore | Self::ExtraLife | Self::Invincibility => None,
        }
    }
}

/// Closed set of enemy movement behaviours.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MovementPattern {
    /// Constant descent.
    Straight,
    /// Descent with a wide, slow horizontal swing.
    Zigzag,
    /// Descent with a narrow, quick horizontal swing.
    SineWave,
    /// Descent that accelerates with elapsed lifetime.
    DiveBomb,
    /// Slow descent with a very wide horizontal swing.
    Strafe,
}

impl MovementPattern {
    /// Position after advancing `dt` seconds, given the lifetime `elapsed`
    /// already including `dt` and the horizontal anchor `start_x`.
    #[must_use]
    pub fn advance(self, position: Vec2, start_x: f32, speed: f32, elapsed: f32, dt: f32) -> Vec2 {
        let mut next = position;
        match self {
            Self::Straight => next.y += speed * dt,
            Self::Zigzag => {
                next.y += speed * dt;
                next.x = start_x + (elapsed * 2.0).sin() * 100.0;
            }
            Self::SineWave => {
                next.y += speed * dt;
                next.x = start_x + (elapsed * 3.0).sin() * 60.0;
            }
            Self::DiveBomb => next.y += speed * dt * (1.0 + elapsed * 0.5),
            Self::Strafe => {
                next.y += speed * dt * 0.3;
                next.x = start_x + (elapsed * 1.5).sin() * 150.0;
            }
        }
        next
    }
}

/// Row of the enemy definition table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EnemyKind(u8);

impl EnemyKind {
    /// Creates a new kind referencing the provided table row.
    #[must_use]
    pub const fn new(index: u8) -> Self {
        Self(index)
    }

    /// Retrieves the table row referenced by the kind.
    #[must_use]
    pub const fn get(&self) -> u8 {
        self.0
    }

    /// Base statistics for this kind. Rows beyond the table wrap around.
    #[must_use]
    pub const fn definition(self) -> EnemyDefinition {
        ENEMY_DEFINITIONS[self.0 as usize % ENEMY_DEFINITIONS.len()]
    }
}

/// Base statistics describing an enemy before difficulty scaling.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EnemyDefinition {
    /// Hit points at difficulty 1.0.
    pub hit_points: f32,
    /// Descent speed in world units per second at difficulty 1.0.
    pub speed: f32,
    /// Seconds between shots at difficulty 1.0.
    pub fire_interval: f32,
    /// Movement behaviour.
    pub pattern: MovementPattern,
    /// Score awarded at difficulty 1.0.
    pub score: u64,
    /// Bolt speed, or zero for the default enemy bolt speed.
    pub projectile_speed: f32,
}

impl EnemyDefinition {
    /// Statistics after applying a difficulty multiplier.
    #[must_use]
    pub fn scaled(&self, difficulty: f32) -> ScaledEnemy {
        let difficulty = if difficulty > 0.0 { difficulty } else { 1.0 };
        let projectile_speed = if self.projectile_speed > 0.0 {
            self.projectile_speed
        } else {
            tuning::ENEMY_PROJECTILE_SPEED
        };
        ScaledEnemy {
            hit_points: self.hit_points * difficulty,
            speed: self.speed * difficulty,
            fire_interval: Duration::try_from_secs_f32(self.fire_interval / difficulty)
                .unwrap_or(Duration::MAX),
            pattern: self.pattern,
            score: (self.score as f32 * difficulty).round() as u64,
            projectile_speed,
        }
    }
}

/// Enemy statistics after difficulty scaling.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaledEnemy {
    /// Starting hit points.
    pub hit_points: f32,
    /// Descent speed in world units per second.
    pub speed: f32,
    /// Minimum time between shots.
    pub fire_interval: Duration,
    /// Movement behaviour.
    pub pattern: MovementPattern,
    /// Score awarded on destruction.
    pub score: u64,
    /// Bolt speed in world units per second.
    pub projectile_speed: f32,
}

const ENEMY_DEFINITIONS: [EnemyDefinition; 8] = [
    enemy(30.0, 100.0, 2.0, MovementPattern::Straight, 100, 0.0),
    enemy(40.0, 80.0, 1.5, MovementPattern::Zigzag, 150, 0.0),
    enemy(50.0, 90.0, 1.8, MovementPattern::SineWave, 200, 0.0),
    enemy(25.0, 120.0, 3.25, MovementPattern::Straight, 80, 200.0),
    enemy(35.0, 90.0, 2.35, MovementPattern::DiveBomb, 120, 200.0),
    enemy(45.0, 70.0, 1.95, MovementPattern::Strafe, 180, 200.0),
    enemy(55.0, 110.0, 1.55, MovementPattern::Zigzag, 200, 200.0),
    enemy(60.0, 100.0, 1.3, MovementPattern::SineWave, 250, 200.0),
];

const fn enemy(
    hit_points: f32,
    speed: f32,
    fire_interval: f32,
    pattern: MovementPattern,
    score: u64,
    projectile_speed: f32,
) -> EnemyDefinition {
    EnemyDefinition {
        hit_points,
        speed,
        fire_interval,
        pattern,
        score,
        projectile_speed,
    }
}

/// Number of rows in the enemy definition table.
pub const ENEMY_KIND_COUNT: u8 = ENEMY_DEFINITIONS.len() as u8;

/// High-level state of a play session as seen by presentation layers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum SessionState {
    /// Waves are running.
    #[default]
    Playing,
    /// A boss encounter is active.
    BossFight,
    /// The boss fell and the next stage is about to begin.
    StageTransition,
    /// Simulation is frozen behind the pause menu.
    Paused,
    /// Every player ship was destroyed.
    GameOver,
}

impl SessionState {
    /// Reports whether the tick loop advances entities in this state.
    #[must_use]
    pub const fn is_simulating(self) -> bool {
        matches!(
            self,
            Self::Playing | Self::BossFight | Self::StageTransition
        )
    }
}
