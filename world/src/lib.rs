#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state management for Nova Strike.
//!
//! The world owns every live entity collection. It advances them when asked
//! to tick, applies the outcome of overlapping pairs reported by a collision
//! detector, and answers read-only queries through the [`query`] module.

mod asteroid;
mod boss;
mod contacts;
mod effects;
mod enemy;
mod ordnance;
mod pickup;
mod player;
mod scoring;

use std::{collections::HashSet, time::Duration};

use glam::Vec2;
use nova_strike_core::{
    tuning::{
        ASTEROID_SPAWN_INSET, BOSS_BOLT_DAMAGE, BOSS_BOLT_HITBOX, BOSS_BOLT_SPEED,
        BOSS_KILL_SCORE, ENEMY_AIM_JITTER, ENEMY_BOLT_DAMAGE, ENEMY_BOLT_HITBOX,
        ENEMY_SPAWN_INSET, ENTRY_HEIGHT, LASER_DAMAGE, LASER_DURATION, LASER_WIDTH,
        PLAYER_BOLT_DAMAGE, PLAYER_BOLT_RADIUS, PLAYER_SPAWN_MARGIN, SCREEN_HEIGHT,
        SCREEN_WIDTH, STAGE_CLEAR_BONUS,
    },
    AsteroidId, AsteroidSize, BackgroundSet, BodyRef, Command, EnemyId, EnemyKind, Event, Hitbox,
    MineId, PlayerIntent, PlayerSlot, PowerUpId, PowerUpKind, ProjectileId, ProjectileOwner,
    WELCOME_BANNER,
};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info, warn};

use self::{
    asteroid::Asteroid,
    boss::{Boss, BossWreck},
    effects::EffectQueue,
    enemy::EnemyShip,
    ordnance::{aim, Fuse, Mine, Projectile},
    pickup::PowerUp,
    player::{PlayerShip, Shot},
    scoring::ScoreBoard,
};

pub use effects::{Effect, EffectKind};
pub use ordnance::blast_damage;

const DEFAULT_SEED: u64 = 0x6e6f_7661_5f73_7472;

#[derive(Debug, Default)]
struct IdAllocator {
    next: u32,
}

impl IdAllocator {
    fn next(&mut self) -> u32 {
        let value = self.next;
        self.next = self.next.wrapping_add(1);
        value
    }
}

/// Represents the authoritative Nova Strike world state.
#[derive(Debug)]
pub struct World {
    banner: &'static str,
    rng: ChaCha8Rng,
    clock: Duration,
    stage: u32,
    background: BackgroundSet,
    players: Vec<PlayerShip>,
    enemies: Vec<EnemyShip>,
    boss: Option<Boss>,
    wreck: Option<BossWreck>,
    asteroids: Vec<Asteroid>,
    projectiles: Vec<Projectile>,
    mines: Vec<Mine>,
    power_ups: Vec<PowerUp>,
    score: ScoreBoard,
    effects: EffectQueue,
    laser_hits: HashSet<(ProjectileId, BodyRef)>,
    ids: IdAllocator,
}

impl World {
    /// Creates a new world seeded with the default random seed.
    #[must_use]
    pub fn new() -> Self {
        Self::with_seed(DEFAULT_SEED)
    }

    /// Creates a new world whose random choices derive from `seed`.
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self {
            banner: WELCOME_BANNER,
            rng: ChaCha8Rng::seed_from_u64(seed),
            clock: Duration::ZERO,
            stage: 1,
            background: BackgroundSet::BlueSpace,
            players: Vec::new(),
            enemies: Vec::new(),
            boss: None,
            wreck: None,
            asteroids: Vec::new(),
            projectiles: Vec::new(),
            mines: Vec::new(),
            power_ups: Vec::new(),
            score: ScoreBoard::default(),
            effects: EffectQueue::default(),
            laser_hits: HashSet::new(),
            ids: IdAllocator::default(),
        }
    }

    fn start_session(&mut self, players: u8, out_events: &mut Vec<Event>) {
        let players = players.clamp(1, PlayerSlot::ALL.len() as u8);
        self.players.clear();
        self.enemies.clear();
        self.boss = None;
        self.wreck = None;
        self.asteroids.clear();
        self.projectiles.clear();
        self.mines.clear();
        self.power_ups.clear();
        self.effects.clear();
        self.laser_hits.clear();
        self.score = ScoreBoard::default();
        self.stage = 1;

        info!(players, "session started");
        out_events.push(Event::SessionStarted { players });
        for slot in PlayerSlot::ALL.into_iter().take(usize::from(players)) {
            let position = PlayerShip::launch_position(slot, players);
            self.players.push(PlayerShip::launch(slot, position));
            out_events.push(Event::PlayerSpawned { slot });
        }
    }

    fn set_intent(&mut self, slot: PlayerSlot, intent: PlayerIntent, out_events: &mut Vec<Event>) {
        let Some(ship) = self.players.iter_mut().find(|ship| ship.slot == slot) else {
            return;
        };
        ship.intent = intent;
        if !intent.deploy_mine {
            return;
        }
        if let Some((position, velocity)) = ship.launch_mine() {
            let mine = MineId::new(self.ids.next());
            self.mines.push(Mine::new(mine, slot, position, velocity));
            debug!(slot = slot.get(), mine = mine.get(), "mine deployed");
            out_events.push(Event::MineDeployed { slot, mine });
        }
    }

    fn tick(&mut self, dt: Duration, out_events: &mut Vec<Event>) {
        self.clock = self.clock.saturating_add(dt);
        out_events.push(Event::TimeAdvanced { dt });

        self.advance_players(dt, out_events);
        self.projectiles.retain_mut(|projectile| projectile.advance(dt));
        self.advance_enemies(dt, out_events);

        for asteroid in &mut self.asteroids {
            asteroid.advance(dt);
        }
        self.asteroids.retain(|asteroid| !asteroid.is_off_screen());

        for power_up in &mut self.power_ups {
            power_up.advance(dt);
        }
        self.power_ups.retain(|power_up| !power_up.is_off_screen());

        self.advance_mines(dt, out_events);
        self.advance_boss(dt, out_events);
        self.advance_wreck(dt, out_events);

        let mut effects = std::mem::take(&mut self.effects);
        effects.advance(dt, |body| self.contains(body));
        self.effects = effects;
    }

    fn advance_players(&mut self, dt: Duration, out_events: &mut Vec<Event>) {
        for ship in &mut self.players {
            let tick = ship.advance(dt);
            if tick.weapon_expired {
                debug!(slot = ship.slot.get(), "temporary weapon expired");
                out_events.push(Event::WeaponExpired { slot: ship.slot });
            }
            if tick.shots.is_empty() {
                continue;
            }

            out_events.push(Event::ShotFired {
                slot: ship.slot,
                weapon: ship.weapon,
            });
            let owner = ProjectileOwner::Player(ship.slot);
            for shot in tick.shots {
                let id = ProjectileId::new(self.ids.next());
                let projectile = match shot {
                    Shot::Bolt { origin, velocity } => Projectile {
                        id,
                        owner,
                        position: origin,
                        velocity,
                        damage: PLAYER_BOLT_DAMAGE,
                        hitbox: Hitbox::circle(PLAYER_BOLT_RADIUS),
                        beam: None,
                    },
                    Shot::Laser { x, nose_y } => {
                        let length = nose_y.max(1.0);
                        Projectile {
                            id,
                            owner,
                            position: Vec2::new(x, nose_y / 2.0),
                            velocity: Vec2::ZERO,
                            damage: LASER_DAMAGE,
                            hitbox: Hitbox::rect(LASER_WIDTH, length),
                            beam: Some(LASER_DURATION),
                        }
                    }
                };
                self.projectiles.push(projectile);
            }
        }
    }

    fn advance_enemies(&mut self, dt: Duration, out_events: &mut Vec<Event>) {
        let mut escaped = Vec::new();
        for enemy in &mut self.enemies {
            enemy.advance(dt);

            if enemy.ready_to_fire(self.clock) {
                let target = nearest_target(&self.players, enemy.position);
                let jitter = self.rng.gen_range(-ENEMY_AIM_JITTER..=ENEMY_AIM_JITTER) as f32;
                let aim_point = Vec2::new(target.x + jitter, target.y);
                self.projectiles.push(Projectile {
                    id: ProjectileId::new(self.ids.next()),
                    owner: ProjectileOwner::Enemy,
                    position: enemy.position,
                    velocity: aim(enemy.position, aim_point, enemy.projectile_speed),
                    damage: ENEMY_BOLT_DAMAGE,
                    hitbox: Hitbox::rect(ENEMY_BOLT_HITBOX.0, ENEMY_BOLT_HITBOX.1),
                    beam: None,
                });
            }

            if enemy.is_off_screen() {
                escaped.push(enemy.id);
            }
        }

        if escaped.is_empty() {
            return;
        }
        self.enemies.retain(|enemy| !escaped.contains(&enemy.id));
        for enemy in escaped {
            debug!(enemy = enemy.get(), "enemy left the playfield");
            out_events.push(Event::EnemyEscaped { enemy });
        }
    }

    fn advance_mines(&mut self, dt: Duration, out_events: &mut Vec<Event>) {
        let mut fused = Vec::new();
        for mine in &mut self.mines {
            match mine.advance(dt) {
                Fuse::Armed => {}
                fuse => fused.push((mine.id, fuse)),
            }
        }
        for (mine, fuse) in fused {
            debug!(mine = mine.get(), ?fuse, "mine self-detonated");
            self.detonate_mine(mine, false, out_events);
        }
    }

    fn advance_boss(&mut self, dt: Duration, out_events: &mut Vec<Event>) {
        let Some(boss) = self.boss.as_mut() else {
            return;
        };
        let target = nearest_target(&self.players, boss.position);
        let output = boss.advance(dt, target, &mut self.rng);

        if let Some(phase) = output.phase_changed {
            info!(?phase, "boss phase changed");
            out_events.push(Event::BossPhaseChanged { phase });
        }
        for (origin, aim_point) in output.bolts {
            self.projectiles.push(Projectile {
                id: ProjectileId::new(self.ids.next()),
                owner: ProjectileOwner::Boss,
                position: origin,
                velocity: aim(origin, aim_point, BOSS_BOLT_SPEED),
                damage: BOSS_BOLT_DAMAGE,
                hitbox: Hitbox::rect(BOSS_BOLT_HITBOX.0, BOSS_BOLT_HITBOX.1),
                beam: None,
            });
        }
        for minion in output.minions {
            self.spawn_enemy(minion.kind, minion.difficulty, minion.position, out_events);
        }
    }

    fn advance_wreck(&mut self, dt: Duration, out_events: &mut Vec<Event>) {
        let Some(wreck) = self.wreck.as_mut() else {
            return;
        };
        let progress = wreck.advance(dt);
        let (boss_stage, position) = (wreck.stage, wreck.position);
        self.explosion_bursts(position, progress.bursts);

        if progress.finished {
            self.wreck = None;
            self.grant_boss_rewards(boss_stage, position, out_events);
        }
    }

    fn explosion_bursts(&mut self, position: Vec2, bursts: u8) {
        for _ in 0..bursts {
            let offset = Vec2::new(
                self.rng.gen_range(-80..=80) as f32,
                self.rng.gen_range(-60..=60) as f32,
            );
            self.effects
                .spawn(EffectKind::Explosion { large: true }, position + offset);
            self.effects
                .spawn(EffectKind::ScreenShake { intensity: 8.0 }, position);
        }
    }

    fn grant_boss_rewards(&mut self, boss_stage: u32, position: Vec2, out_events: &mut Vec<Event>) {
        let weapon = PowerUpKind::WEAPONS[self.rng.gen_range(0..PowerUpKind::WEAPONS.len())];
        self.drop_power_up(weapon, position, out_events);

        let stage = u64::from(self.stage);
        self.award(BOSS_KILL_SCORE.saturating_mul(stage), out_events);
        self.award(STAGE_CLEAR_BONUS.saturating_mul(stage), out_events);

        info!(stage = self.stage, boss_stage, "boss defeated");
        out_events.push(Event::BossDefeated { stage: self.stage });
    }

    fn spawn_enemy(
        &mut self,
        kind: EnemyKind,
        difficulty: f32,
        position: Vec2,
        out_events: &mut Vec<Event>,
    ) {
        let enemy = EnemyId::new(self.ids.next());
        self.enemies
            .push(EnemyShip::new(enemy, kind, difficulty, position));
        debug!(enemy = enemy.get(), kind = kind.get(), difficulty, "enemy spawned");
        out_events.push(Event::EnemySpawned { enemy, kind });
    }

    fn spawn_asteroid(
        &mut self,
        size: AsteroidSize,
        position: Vec2,
        velocity: Option<Vec2>,
        out_events: &mut Vec<Event>,
    ) {
        let asteroid = AsteroidId::new(self.ids.next());
        let mut body = Asteroid::new(asteroid, size, position, &mut self.rng);
        if let Some(velocity) = velocity {
            body.velocity = velocity;
        }
        self.asteroids.push(body);
        out_events.push(Event::AsteroidSpawned { asteroid, size });
    }

    fn spawn_boss(&mut self, stage: u32, out_events: &mut Vec<Event>) {
        if self.boss.is_some() || self.wreck.is_some() {
            warn!(stage, "boss already present, ignoring spawn request");
            return;
        }
        let boss = Boss::new(stage);
        let max_hp = boss.max_hp;
        self.boss = Some(boss);
        info!(stage, max_hp, "boss spawned");
        out_events.push(Event::BossSpawned { stage, max_hp });
    }

    fn drop_power_up(&mut self, kind: PowerUpKind, position: Vec2, out_events: &mut Vec<Event>) {
        let power_up = PowerUpId::new(self.ids.next());
        self.power_ups.push(PowerUp::new(power_up, kind, position));
        out_events.push(Event::PowerUpDropped { power_up, kind });
    }

    fn award(&mut self, points: u64, out_events: &mut Vec<Event>) {
        let award = self.score.award(points);
        out_events.push(Event::ScoreAwarded {
            points: award.points,
            multiplier: award.multiplier,
            total: award.total,
        });
    }

    fn contains(&self, body: BodyRef) -> bool {
        match body {
            BodyRef::Player(slot) => self.players.iter().any(|ship| ship.slot == slot),
            BodyRef::Enemy(id) => self.enemies.iter().any(|enemy| enemy.id == id),
            BodyRef::Boss => self.boss.is_some(),
            BodyRef::Asteroid(id) => self.asteroids.iter().any(|asteroid| asteroid.id == id),
            BodyRef::Projectile(id) => self
                .projectiles
                .iter()
                .any(|projectile| projectile.id == id),
            BodyRef::Mine(id) => self.mines.iter().any(|mine| mine.id == id),
            BodyRef::PowerUp(id) => self.power_ups.iter().any(|power_up| power_up.id == id),
        }
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

/// Position of the living player closest to `from`, or the default launch
/// point when every ship is gone.
fn nearest_target(players: &[PlayerShip], from: Vec2) -> Vec2 {
    players
        .iter()
        .map(|ship| ship.position)
        .min_by(|a, b| a.distance_squared(from).total_cmp(&b.distance_squared(from)))
        .unwrap_or(Vec2::new(
            SCREEN_WIDTH / 2.0,
            SCREEN_HEIGHT - PLAYER_SPAWN_MARGIN,
        ))
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::StartSession { players } => world.start_session(players, out_events),
        Command::EnterStage { stage, background } => {
            world.stage = stage;
            world.background = background;
            info!(stage, ?background, "stage entered");
            out_events.push(Event::StageEntered { stage, background });
        }
        Command::SetPlayerIntent { slot, intent } => world.set_intent(slot, intent, out_events),
        Command::Tick { dt } => world.tick(dt, out_events),
        Command::ResolveContacts { contacts } => {
            for contact in contacts {
                world.resolve_contact(contact, out_events);
            }
            world.laser_hits.clear();
        }
        Command::SpawnEnemy { kind, difficulty } => {
            let right = SCREEN_WIDTH as i32 - ENEMY_SPAWN_INSET;
            let x = world.rng.gen_range(ENEMY_SPAWN_INSET..=right) as f32;
            world.spawn_enemy(kind, difficulty, Vec2::new(x, ENTRY_HEIGHT), out_events);
        }
        Command::SpawnAsteroid => {
            let right = SCREEN_WIDTH as i32 - ASTEROID_SPAWN_INSET;
            let x = world.rng.gen_range(ASTEROID_SPAWN_INSET..=right) as f32;
            let size = if world.rng.gen_bool(0.5) {
                AsteroidSize::Large
            } else {
                AsteroidSize::Small
            };
            world.spawn_asteroid(size, Vec2::new(x, ENTRY_HEIGHT), None, out_events);
        }
        Command::SpawnBoss { stage } => world.spawn_boss(stage, out_events),
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use std::time::Duration;

    use glam::Vec2;
    use nova_strike_core::{
        tuning::{
            BOSS_HITBOX, ENEMY_HITBOX, MINE_RADIUS, PLAYER_HITBOX, POWER_UP_RADIUS,
        },
        AsteroidId, AsteroidSize, BackgroundSet, Body, BodyRef, BossPhase, CollisionGroup,
        EnemyId, EnemyKind, Hitbox, MineId, PlayerSlot, PowerUpId, PowerUpKind, ProjectileId,
        ProjectileOwner, WeaponKind,
    };

    use super::{Effect, World};

    /// Snapshot of a living player ship.
    #[derive(Clone, Copy, Debug, PartialEq)]
    pub struct PlayerView {
        /// Slot that owns the ship.
        pub slot: PlayerSlot,
        /// Centre of the ship.
        pub position: Vec2,
        /// Velocity applied during the last tick.
        pub velocity: Vec2,
        /// Lives remaining, including the current one.
        pub lives: u8,
        /// Shield strength between zero and full.
        pub shield: f32,
        /// Hull hits remaining before a life is lost.
        pub hull_hits: u8,
        /// Weapon currently fitted.
        pub weapon: WeaponKind,
        /// Time left on a temporary weapon.
        pub weapon_remaining: Duration,
        /// Mines carried.
        pub mine_ammo: u8,
        /// Whether the ship currently ignores damage.
        pub invincible: bool,
    }

    /// Snapshot of an enemy ship.
    #[derive(Clone, Copy, Debug, PartialEq)]
    pub struct EnemyView {
        /// Identifier of the enemy.
        pub id: EnemyId,
        /// Definition row of the enemy.
        pub kind: EnemyKind,
        /// Centre of the enemy.
        pub position: Vec2,
        /// Hit points remaining.
        pub hp: f32,
        /// Hit points at spawn.
        pub max_hp: f32,
    }

    /// Snapshot of the active boss.
    #[derive(Clone, Copy, Debug, PartialEq)]
    pub struct BossView {
        /// Stage the boss belongs to.
        pub stage: u32,
        /// Centre of the boss.
        pub position: Vec2,
        /// Hit points remaining.
        pub hp: f32,
        /// Hit points at spawn.
        pub max_hp: f32,
        /// Current attack phase.
        pub phase: BossPhase,
        /// Whether the entrance glide is still running.
        pub entering: bool,
    }

    /// Snapshot of an asteroid.
    #[derive(Clone, Copy, Debug, PartialEq)]
    pub struct AsteroidView {
        /// Identifier of the asteroid.
        pub id: AsteroidId,
        /// Size class.
        pub size: AsteroidSize,
        /// Centre of the asteroid.
        pub position: Vec2,
        /// Current rotation in radians.
        pub rotation: f32,
    }

    /// Snapshot of a projectile or beam.
    #[derive(Clone, Copy, Debug, PartialEq)]
    pub struct ProjectileView {
        /// Identifier of the projectile.
        pub id: ProjectileId,
        /// Party that fired the projectile.
        pub owner: ProjectileOwner,
        /// Centre of the projectile.
        pub position: Vec2,
        /// Velocity in world units per second.
        pub velocity: Vec2,
        /// Collision footprint.
        pub hitbox: Hitbox,
        /// Whether this is a stationary laser beam.
        pub laser: bool,
    }

    /// Snapshot of a mine.
    #[derive(Clone, Copy, Debug, PartialEq)]
    pub struct MineView {
        /// Identifier of the mine.
        pub id: MineId,
        /// Slot that deployed the mine.
        pub owner: PlayerSlot,
        /// Centre of the mine.
        pub position: Vec2,
        /// Time until the mine detonates on its own.
        pub remaining: Duration,
    }

    /// Snapshot of a power-up capsule.
    #[derive(Clone, Copy, Debug, PartialEq)]
    pub struct PowerUpView {
        /// Identifier of the capsule.
        pub id: PowerUpId,
        /// Effect carried by the capsule.
        pub kind: PowerUpKind,
        /// Centre of the capsule.
        pub position: Vec2,
    }

    /// Retrieves the welcome banner that adapters may display.
    #[must_use]
    pub fn welcome_banner(world: &World) -> &'static str {
        world.banner
    }

    /// Total simulated time.
    #[must_use]
    pub fn clock(world: &World) -> Duration {
        world.clock
    }

    /// Stage most recently entered.
    #[must_use]
    pub fn stage(world: &World) -> u32 {
        world.stage
    }

    /// Background of the stage most recently entered.
    #[must_use]
    pub fn background(world: &World) -> BackgroundSet {
        world.background
    }

    /// Session score.
    #[must_use]
    pub fn score(world: &World) -> u64 {
        world.score.total()
    }

    /// Multiplier applied to the next score award.
    #[must_use]
    pub fn combo_multiplier(world: &World) -> u32 {
        world.score.multiplier()
    }

    /// Number of enemy ships currently alive, derived from the live collection.
    #[must_use]
    pub fn enemies_alive(world: &World) -> usize {
        world
            .enemies
            .iter()
            .filter(|enemy| enemy.is_alive())
            .count()
    }

    /// Number of player ships still flying.
    #[must_use]
    pub fn players_alive(world: &World) -> usize {
        world.players.len()
    }

    /// Snapshots of every living player ship.
    #[must_use]
    pub fn players(world: &World) -> Vec<PlayerView> {
        world
            .players
            .iter()
            .map(|ship| PlayerView {
                slot: ship.slot,
                position: ship.position,
                velocity: ship.velocity,
                lives: ship.lives,
                shield: ship.shield,
                hull_hits: ship.hull_hits,
                weapon: ship.weapon,
                weapon_remaining: ship.weapon_timer,
                mine_ammo: ship.mine_ammo,
                invincible: ship.is_invincible(),
            })
            .collect()
    }

    /// Snapshot of the ship in `slot`, if it is still flying.
    #[must_use]
    pub fn player(world: &World, slot: PlayerSlot) -> Option<PlayerView> {
        players(world).into_iter().find(|view| view.slot == slot)
    }

    /// Snapshots of every enemy ship.
    #[must_use]
    pub fn enemies(world: &World) -> Vec<EnemyView> {
        world
            .enemies
            .iter()
            .map(|enemy| EnemyView {
                id: enemy.id,
                kind: enemy.kind,
                position: enemy.position,
                hp: enemy.hp,
                max_hp: enemy.max_hp,
            })
            .collect()
    }

    /// Snapshot of the boss while it is fighting.
    #[must_use]
    pub fn boss(world: &World) -> Option<BossView> {
        world.boss.as_ref().map(|boss| BossView {
            stage: boss.stage,
            position: boss.position,
            hp: boss.hp,
            max_hp: boss.max_hp,
            phase: boss.phase,
            entering: boss.is_entering(),
        })
    }

    /// Position of a fallen boss that is still exploding.
    #[must_use]
    pub fn boss_wreck(world: &World) -> Option<Vec2> {
        world.wreck.as_ref().map(|wreck| wreck.position)
    }

    /// Reports whether a boss is fighting or exploding.
    #[must_use]
    pub fn boss_encounter_active(world: &World) -> bool {
        world.boss.is_some() || world.wreck.is_some()
    }

    /// Snapshots of every asteroid.
    #[must_use]
    pub fn asteroids(world: &World) -> Vec<AsteroidView> {
        world
            .asteroids
            .iter()
            .filter(|asteroid| asteroid.is_intact())
            .map(|asteroid| AsteroidView {
                id: asteroid.id,
                size: asteroid.size,
                position: asteroid.position,
                rotation: asteroid.rotation,
            })
            .collect()
    }

    /// Snapshots of every projectile and beam.
    #[must_use]
    pub fn projectiles(world: &World) -> Vec<ProjectileView> {
        world
            .projectiles
            .iter()
            .map(|projectile| ProjectileView {
                id: projectile.id,
                owner: projectile.owner,
                position: projectile.position,
                velocity: projectile.velocity,
                hitbox: projectile.hitbox,
                laser: projectile.is_laser(),
            })
            .collect()
    }

    /// Snapshots of every mine.
    #[must_use]
    pub fn mines(world: &World) -> Vec<MineView> {
        world
            .mines
            .iter()
            .map(|mine| MineView {
                id: mine.id,
                owner: mine.owner,
                position: mine.position,
                remaining: mine.remaining(),
            })
            .collect()
    }

    /// Snapshots of every power-up capsule.
    #[must_use]
    pub fn power_ups(world: &World) -> Vec<PowerUpView> {
        world
            .power_ups
            .iter()
            .map(|power_up| PowerUpView {
                id: power_up.id,
                kind: power_up.kind,
                position: power_up.position,
            })
            .collect()
    }

    /// Active cosmetic effects.
    pub fn effects(world: &World) -> impl Iterator<Item = &Effect> {
        world.effects.iter()
    }

    /// Collision footprints of every live entity.
    #[must_use]
    pub fn bodies(world: &World) -> Vec<Body> {
        let mut bodies = Vec::new();
        for ship in &world.players {
            bodies.push(Body {
                entity: BodyRef::Player(ship.slot),
                group: CollisionGroup::Player,
                position: ship.position,
                hitbox: Hitbox::rect(PLAYER_HITBOX.0, PLAYER_HITBOX.1),
            });
        }
        for enemy in &world.enemies {
            bodies.push(Body {
                entity: BodyRef::Enemy(enemy.id),
                group: CollisionGroup::Enemy,
                position: enemy.position,
                hitbox: Hitbox::rect(ENEMY_HITBOX.0, ENEMY_HITBOX.1),
            });
        }
        if let Some(boss) = &world.boss {
            bodies.push(Body {
                entity: BodyRef::Boss,
                group: CollisionGroup::Boss,
                position: boss.position,
                hitbox: Hitbox::rect(BOSS_HITBOX.0, BOSS_HITBOX.1),
            });
        }
        for asteroid in &world.asteroids {
            bodies.push(Body {
                entity: BodyRef::Asteroid(asteroid.id),
                group: CollisionGroup::Asteroid,
                position: asteroid.position,
                hitbox: Hitbox::circle(asteroid.size.radius()),
            });
        }
        for projectile in &world.projectiles {
            let group = if projectile.owner.is_player() {
                CollisionGroup::PlayerProjectile
            } else {
                CollisionGroup::EnemyProjectile
            };
            bodies.push(Body {
                entity: BodyRef::Projectile(projectile.id),
                group,
                position: projectile.position,
                hitbox: projectile.hitbox,
            });
        }
        for mine in &world.mines {
            bodies.push(Body {
                entity: BodyRef::Mine(mine.id),
                group: CollisionGroup::Mine,
                position: mine.position,
                hitbox: Hitbox::circle(MINE_RADIUS),
            });
        }
        for power_up in &world.power_ups {
            bodies.push(Body {
                entity: BodyRef::PowerUp(power_up.id),
                group: CollisionGroup::PowerUp,
                position: power_up.position,
                hitbox: Hitbox::circle(POWER_UP_RADIUS),
            });
        }
        bodies
    }
}

#[cfg(test)]
mod tests;
