use glam::Vec2;

use crate::{AsteroidId, EnemyId, MineId, PlayerSlot, PowerUpId, ProjectileId};

/// Collision shape centred on an entity position.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Hitbox {
    /// Circle with the provided radius.
    Circle {
        /// Radius in world units.
        radius: f32,
    },
    /// Axis-aligned rectangle with the provided half extents.
    Rect {
        /// Half of the rectangle width and height.
        half_extents: Vec2,
    },
}

impl Hitbox {
    /// Creates a rectangle from its full width and height.
    #[must_use]
    pub fn rect(width: f32, height: f32) -> Self {
        Self::Rect {
            half_extents: Vec2::new(width * 0.5, height * 0.5),
        }
    }

    /// Creates a circle from its radius.
    #[must_use]
    pub const fn circle(radius: f32) -> Self {
        Self::Circle { radius }
    }
}

/// Category used to select which bodies are tested against each other.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CollisionGroup {
    /// Living player ships.
    Player,
    /// Regular enemy ships.
    Enemy,
    /// The active boss.
    Boss,
    /// Asteroids of either size.
    Asteroid,
    /// Bolts and beams fired by players.
    PlayerProjectile,
    /// Bolts fired by enemies or the boss.
    EnemyProjectile,
    /// Player mines.
    Mine,
    /// Falling power-up capsules.
    PowerUp,
}

/// Stable reference to a simulated entity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BodyRef {
    /// Player ship occupying a slot.
    Player(PlayerSlot),
    /// Enemy ship.
    Enemy(EnemyId),
    /// The single active boss.
    Boss,
    /// Asteroid.
    Asteroid(AsteroidId),
    /// Projectile or beam.
    Projectile(ProjectileId),
    /// Mine.
    Mine(MineId),
    /// Power-up capsule.
    PowerUp(PowerUpId),
}

/// Snapshot of an entity's collision footprint.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Body {
    /// Entity the footprint belongs to.
    pub entity: BodyRef,
    /// Group the entity belongs to.
    pub group: CollisionGroup,
    /// Centre of the footprint.
    pub position: Vec2,
    /// Footprint shape.
    pub hitbox: Hitbox,
}

/// Overlapping pair reported by a detector.
///
/// `first` always belongs to the left-hand group of the matching entry in
/// [`CONTACT_PAIRS`] and `second` to the right-hand group.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Contact {
    /// Entity from the left-hand group.
    pub first: BodyRef,
    /// Entity from the right-hand group.
    pub second: BodyRef,
}

/// Group pairs tested every tick, in resolution order.
pub const CONTACT_PAIRS: [(CollisionGroup, CollisionGroup); 11] = [
    (CollisionGroup::PlayerProjectile, CollisionGroup::Enemy),
    (CollisionGroup::PlayerProjectile, CollisionGroup::Boss),
    (CollisionGroup::PlayerProjectile, CollisionGroup::Asteroid),
    (CollisionGroup::EnemyProjectile, CollisionGroup::Player),
    (CollisionGroup::Enemy, CollisionGroup::Player),
    (CollisionGroup::Boss, CollisionGroup::Player),
    (CollisionGroup::Asteroid, CollisionGroup::Player),
    (CollisionGroup::PowerUp, CollisionGroup::Player),
    (CollisionGroup::Mine, CollisionGroup::Enemy),
    (CollisionGroup::Mine, CollisionGroup::Boss),
    (CollisionGroup::Mine, CollisionGroup::Asteroid),
];
