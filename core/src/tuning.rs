//! Compiled-in gameplay constants.
//!
//! Distances are world units (one unit per screen pixel at the reference
//! resolution), speeds are units per second and durations are expressed as
//! [`Duration`] values so that timers stay exact when summed tick by tick.

use std::time::Duration;

/// Width of the playfield.
pub const SCREEN_WIDTH: f32 = 1024.0;
/// Height of the playfield.
pub const SCREEN_HEIGHT: f32 = 768.0;

/// Largest delta time a single tick may advance.
pub const MAX_TICK: Duration = Duration::from_nanos(33_333_333);

/// Scale applied to each axis when steering diagonally.
pub const DIAGONAL_FACTOR: f32 = 0.707;

/// Player movement speed.
pub const PLAYER_SPEED: f32 = 300.0;
/// Half of the player's rendered extent; ships are clamped this far from every edge.
pub const PLAYER_HALF_EXTENT: f32 = 72.0;
/// Collision box of the player ship.
pub const PLAYER_HITBOX: (f32, f32) = (90.0, 120.0);
/// Distance from the bottom edge at which ships launch.
pub const PLAYER_SPAWN_MARGIN: f32 = 120.0;
/// Lives a ship starts with.
pub const PLAYER_LIVES: u8 = 3;
/// Most lives a ship can hold.
pub const PLAYER_MAX_LIVES: u8 = 5;
/// Full shield strength.
pub const PLAYER_MAX_SHIELD: f32 = 100.0;
/// Shield regained per second once regeneration starts.
pub const SHIELD_REGEN_RATE: f32 = 20.0;
/// Quiet period after damage before shields regenerate.
pub const SHIELD_REGEN_DELAY: Duration = Duration::from_secs(2);
/// Hits the hull absorbs after the shield is gone.
pub const HULL_MAX_HITS: u8 = 3;
/// Immunity granted after losing a life.
pub const INVINCIBILITY_DURATION: Duration = Duration::from_secs(2);

/// Player bolt speed.
pub const PLAYER_BOLT_SPEED: f32 = 500.0;
/// Player bolt damage.
pub const PLAYER_BOLT_DAMAGE: f32 = 25.0;
/// Player bolt collision radius.
pub const PLAYER_BOLT_RADIUS: f32 = 12.5;
/// Horizontal offset of each double-shot bolt.
pub const DOUBLE_SHOT_OFFSET: f32 = 12.0;
/// Horizontal offset of the angled triple-shot bolts.
pub const TRIPLE_SHOT_OFFSET: f32 = 10.0;
/// Angle of the outer triple-shot bolts in degrees.
pub const TRIPLE_SHOT_ANGLE_DEGREES: f32 = 12.0;
/// Laser damage per target per tick.
pub const LASER_DAMAGE: f32 = 50.0;
/// Width of the laser beam.
pub const LASER_WIDTH: f32 = 8.0;
/// Lifetime of a laser beam.
pub const LASER_DURATION: Duration = Duration::from_millis(150);
/// Time a temporary weapon lasts.
pub const POWER_UP_DURATION: Duration = Duration::from_secs(10);

/// Mines a ship can carry.
pub const MINE_MAX_AMMO: u8 = 5;
/// Mines granted by a single pickup.
pub const MINE_AMMO_PICKUP: u8 = 3;
/// Direct damage of a mine.
pub const MINE_DAMAGE: f32 = 80.0;
/// Mine collision radius.
pub const MINE_RADIUS: f32 = 25.0;
/// Reach of the blast.
pub const MINE_BLAST_RADIUS: f32 = 100.0;
/// Time before an untouched mine detonates.
pub const MINE_LIFETIME: Duration = Duration::from_secs(8);
/// Velocity multiplier applied to mines every tick.
pub const MINE_DRAG: f32 = 0.995;
/// Launch speed of a mine dropped while moving.
pub const MINE_LAUNCH_SPEED: f32 = 80.0;
/// Ship speed below which mines are dropped at rest.
pub const MINE_LAUNCH_THRESHOLD: f32 = 10.0;

/// Default enemy bolt speed.
pub const ENEMY_PROJECTILE_SPEED: f32 = 250.0;
/// Enemy bolt damage.
pub const ENEMY_BOLT_DAMAGE: f32 = 15.0;
/// Enemy bolt collision box.
pub const ENEMY_BOLT_HITBOX: (f32, f32) = (24.0, 24.0);
/// Largest horizontal aim error of an enemy bolt.
pub const ENEMY_AIM_JITTER: i32 = 30;
/// Enemy collision box.
pub const ENEMY_HITBOX: (f32, f32) = (56.0, 56.0);
/// Horizontal inset of enemy spawn positions.
pub const ENEMY_SPAWN_INSET: i32 = 80;
/// Height at which enemies and asteroids enter.
pub const ENTRY_HEIGHT: f32 = -40.0;
/// Distance beyond any edge at which enemies are culled.
pub const ENEMY_CULL_MARGIN: f32 = 100.0;

/// Boss drift speed.
pub const BOSS_SPEED: f32 = 60.0;
/// Boss hit points on stage one.
pub const BOSS_BASE_HP: f32 = 350.0;
/// Boss bolt speed.
pub const BOSS_BOLT_SPEED: f32 = 300.0;
/// Boss bolt damage.
pub const BOSS_BOLT_DAMAGE: f32 = 25.0;
/// Boss bolt collision box.
pub const BOSS_BOLT_HITBOX: (f32, f32) = (48.0, 24.0);
/// Rendered half extent of the boss.
pub const BOSS_HALF_EXTENT: (f32, f32) = (240.0, 180.0);
/// Boss collision box.
pub const BOSS_HITBOX: (f32, f32) = (384.0, 216.0);
/// Height at which the boss appears.
pub const BOSS_ENTRY_START: f32 = -100.0;
/// Height at which the boss settles.
pub const BOSS_ENTRY_END: f32 = 130.0;
/// Length of the boss entrance glide.
pub const BOSS_ENTRY_DURATION: Duration = Duration::from_secs(2);
/// Length of each boss attack phase.
pub const BOSS_PHASE_DURATION: Duration = Duration::from_secs(5);
/// Interval between bolt fans.
pub const BOSS_VOLLEY_INTERVAL: Duration = Duration::from_millis(650);
/// Horizontal aim offsets of a bolt fan.
pub const BOSS_VOLLEY_OFFSETS: [f32; 5] = [-60.0, -30.0, 0.0, 30.0, 60.0];
/// Interval between sweep bolts.
pub const BOSS_SWEEP_INTERVAL: Duration = Duration::from_millis(250);
/// Interval between minion launches.
pub const BOSS_MINION_INTERVAL: Duration = Duration::from_millis(1500);
/// Interval between aimed bolts during the minion phase.
pub const BOSS_MINION_PHASE_FIRE_INTERVAL: Duration = Duration::from_millis(1200);
/// Minions launched per minion phase.
pub const BOSS_MINIONS_PER_PHASE: u8 = 3;
/// Difficulty of boss minions.
pub const BOSS_MINION_DIFFICULTY: f32 = 0.7;
/// Number of explosion bursts when the boss falls.
pub const BOSS_EXPLOSION_STEPS: u8 = 5;
/// Delay between explosion bursts.
pub const BOSS_EXPLOSION_STEP: Duration = Duration::from_millis(300);
/// Delay between the boss falling and its rewards.
pub const BOSS_FINALE_DELAY: Duration = Duration::from_millis(1500);
/// Score per stage for destroying the boss.
pub const BOSS_KILL_SCORE: u64 = 1000;
/// Score per stage for clearing the stage.
pub const STAGE_CLEAR_BONUS: u64 = 500;

/// Asteroid descent speed.
pub const ASTEROID_SPEED: f32 = 80.0;
/// Fastest asteroid spin in radians per second.
pub const ASTEROID_SPIN: f32 = 1.5;
/// Collision radius of a large asteroid.
pub const ASTEROID_LARGE_RADIUS: f32 = 32.0;
/// Collision radius of a small asteroid.
pub const ASTEROID_SMALL_RADIUS: f32 = 19.2;
/// Horizontal inset of asteroid spawn positions.
pub const ASTEROID_SPAWN_INSET: i32 = 60;
/// Horizontal offset of each fragment from its parent.
pub const ASTEROID_FRAGMENT_OFFSET: f32 = 20.0;

/// Power-up descent speed.
pub const POWER_UP_SPEED: f32 = 60.0;
/// Power-up collision radius.
pub const POWER_UP_RADIUS: f32 = 20.0;
/// Probability that a destroyed enemy drops a power-up.
pub const POWER_UP_DROP_CHANCE: f64 = 0.2;

/// Contact damage dealt by an enemy ship.
pub const ENEMY_CONTACT_DAMAGE: f32 = 30.0;
/// Contact damage dealt by the boss.
pub const BOSS_CONTACT_DAMAGE: f32 = 40.0;
/// Contact damage dealt by an asteroid.
pub const ASTEROID_CONTACT_DAMAGE: f32 = 20.0;

/// Lowest difficulty multiplier a stage may use.
pub const MIN_STAGE_DIFFICULTY: f32 = 0.1;
/// Highest difficulty multiplier a stage may use.
pub const MAX_STAGE_DIFFICULTY: f32 = 10.0;

/// Longest gap between kills that still extends a combo.
pub const COMBO_WINDOW: Duration = Duration::from_millis(1500);
/// Largest combo multiplier.
pub const MAX_COMBO_MULTIPLIER: u32 = 8;

/// Scroll speed of the far background layer.
pub const BACKGROUND_SCROLL_SPEED: f32 = 30.0;
/// Scroll speed of the star layer.
pub const STARS_SCROLL_SPEED: f32 = 60.0;
