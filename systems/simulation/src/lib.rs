#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Per-tick driver that advances a Nova Strike session.
//!
//! Each [`Simulation::step`] polls input, advances the world, detects and
//! resolves collisions, and then drives the stage director, translating its
//! spawn requests and phase changes into world commands. The driver also
//! owns the session state machine, including the pause mode that freezes
//! every gameplay timer while presentation stays responsive.

use std::time::Duration;

use nova_strike_core::{
    tuning::{BACKGROUND_SCROLL_SPEED, MAX_TICK, SCREEN_HEIGHT, STARS_SCROLL_SPEED},
    Body, Command, Contact, Event, PlayerIntent, PlayerSlot, SessionState, SpawnRequest,
    StageEvent, StageTable,
};
use nova_strike_system_collision::{CollisionDetector, OverlapDetector};
use nova_strike_system_controls::{InputSource, IntentTracker};
use nova_strike_system_stage_director::{DirectorPhase, StageDirector};
use nova_strike_world::{self as world, query, World};
use tracing::{debug, info};

/// Configuration parameters required to construct a simulation.
#[derive(Clone, Debug)]
pub struct Config {
    players: u8,
    seed: u64,
    table: StageTable,
}

impl Config {
    /// Creates a configuration for `players` ships, clamped to one or two.
    #[must_use]
    pub fn new(players: u8, seed: u64, table: StageTable) -> Self {
        Self {
            players: players.clamp(1, 2),
            seed,
            table,
        }
    }

    /// Number of player ships launched per session.
    #[must_use]
    pub const fn players(&self) -> u8 {
        self.players
    }

    /// Seed shared by the world and the director.
    #[must_use]
    pub const fn seed(&self) -> u64 {
        self.seed
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(1, 0, StageTable::standard())
    }
}

/// Final result of a session, reported when it ends.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SessionSummary {
    /// Score accumulated during the session.
    pub score: u64,
    /// Stage that was active when the session ended.
    pub stage: u32,
}

/// Owns the world, the director and the per-tick pipeline between them.
#[derive(Debug)]
pub struct Simulation {
    world: World,
    director: StageDirector,
    detector: OverlapDetector,
    tracker: IntentTracker,
    state: SessionState,
    resume_state: SessionState,
    players: u8,
    background_offset: f32,
    stars_offset: f32,
    bodies: Vec<Body>,
    contacts: Vec<Contact>,
}

impl Simulation {
    /// Creates a simulation that has not started a session yet.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            world: World::with_seed(config.seed),
            director: StageDirector::new(config.table, config.seed),
            detector: OverlapDetector::new(),
            tracker: IntentTracker::new(),
            state: SessionState::Playing,
            resume_state: SessionState::Playing,
            players: config.players,
            background_offset: 0.0,
            stars_offset: 0.0,
            bodies: Vec::new(),
            contacts: Vec::new(),
        }
    }

    /// Launches a fresh session at stage one.
    pub fn start(&mut self, out_events: &mut Vec<Event>) {
        self.director.reset();
        self.tracker.reset();
        self.state = SessionState::Playing;
        self.resume_state = SessionState::Playing;
        self.background_offset = 0.0;
        self.stars_offset = 0.0;
        world::apply(
            &mut self.world,
            Command::StartSession {
                players: self.players,
            },
            out_events,
        );
        world::apply(
            &mut self.world,
            Command::EnterStage {
                stage: self.director.stage(),
                background: self.director.background(),
            },
            out_events,
        );
        info!(players = self.players, "session started");
    }

    /// Advances the session by `dt`, clamped to [`MAX_TICK`].
    pub fn step(&mut self, dt: Duration, input: &mut dyn InputSource, out_events: &mut Vec<Event>) {
        let dt = dt.min(MAX_TICK);

        let mut intents = [PlayerIntent::default(); 2];
        let mut pause_pressed = false;
        for (slot, intent) in slots(self.players).zip(intents.iter_mut()) {
            *intent = self.tracker.update(slot, input.snapshot(slot));
            pause_pressed |= intent.pause;
        }
        if pause_pressed {
            self.toggle_pause();
        }
        if !self.state.is_simulating() {
            return;
        }

        self.scroll(dt);

        for (slot, intent) in slots(self.players).zip(intents) {
            world::apply(
                &mut self.world,
                Command::SetPlayerIntent { slot, intent },
                out_events,
            );
        }

        let first_event = out_events.len();
        world::apply(&mut self.world, Command::Tick { dt }, out_events);

        self.bodies = query::bodies(&self.world);
        self.detector.detect(&self.bodies, &mut self.contacts);
        if !self.contacts.is_empty() {
            world::apply(
                &mut self.world,
                Command::ResolveContacts {
                    contacts: std::mem::take(&mut self.contacts),
                },
                out_events,
            );
        }

        self.react(&out_events[first_event..]);
        if self.state == SessionState::GameOver {
            return;
        }

        let alive = query::enemies_alive(&self.world);
        if let Some(event) = self.director.update(dt, alive) {
            self.dispatch(event, out_events);
        }
    }

    /// Enters or leaves the pause menu. Ignored once the game is over.
    pub fn toggle_pause(&mut self) {
        match self.state {
            SessionState::Paused => {
                self.state = self.resume_state;
                info!(state = ?self.state, "session resumed");
            }
            SessionState::GameOver => {}
            state => {
                self.resume_state = state;
                self.state = SessionState::Paused;
                info!("session paused");
            }
        }
    }

    /// Current session state.
    #[must_use]
    pub const fn state(&self) -> SessionState {
        self.state
    }

    /// Read-only access to the world for presentation.
    #[must_use]
    pub const fn world(&self) -> &World {
        &self.world
    }

    /// Number of player ships launched per session.
    #[must_use]
    pub const fn players(&self) -> u8 {
        self.players
    }

    /// One-based wave number within the current stage.
    #[must_use]
    pub fn wave(&self) -> u32 {
        self.director.wave()
    }

    /// Phase the director is in.
    #[must_use]
    pub const fn director_phase(&self) -> DirectorPhase {
        self.director.phase()
    }

    /// Score and stage reached so far.
    #[must_use]
    pub fn summary(&self) -> SessionSummary {
        SessionSummary {
            score: query::score(&self.world),
            stage: query::stage(&self.world),
        }
    }

    /// Scroll offsets of the far and near background layers, in pixels.
    #[must_use]
    pub const fn scroll_offsets(&self) -> (f32, f32) {
        (self.background_offset, self.stars_offset)
    }

    fn scroll(&mut self, dt: Duration) {
        let seconds = dt.as_secs_f32();
        self.background_offset =
            (self.background_offset + BACKGROUND_SCROLL_SPEED * seconds) % SCREEN_HEIGHT;
        self.stars_offset = (self.stars_offset + STARS_SCROLL_SPEED * seconds) % SCREEN_HEIGHT;
    }

    fn react(&mut self, events: &[Event]) {
        for event in events {
            match event {
                Event::BossDefeated { stage } => {
                    info!(stage, "boss defeated");
                    self.director.boss_defeated();
                    self.state = SessionState::StageTransition;
                }
                Event::AllPlayersDestroyed => {
                    let summary = self.summary();
                    info!(score = summary.score, stage = summary.stage, "game over");
                    self.state = SessionState::GameOver;
                }
                _ => {}
            }
        }
    }

    fn dispatch(&mut self, event: StageEvent, out_events: &mut Vec<Event>) {
        match event {
            StageEvent::StageStart { stage } => {
                world::apply(
                    &mut self.world,
                    Command::EnterStage {
                        stage,
                        background: self.director.background(),
                    },
                    out_events,
                );
                self.state = SessionState::Playing;
            }
            StageEvent::WaveStart { wave } => {
                debug!(stage = self.director.stage(), wave, "wave announced");
            }
            StageEvent::Spawn { requests } => {
                for request in requests {
                    let command = match request {
                        SpawnRequest::Enemy { kind, difficulty } => {
                            Command::SpawnEnemy { kind, difficulty }
                        }
                        SpawnRequest::Asteroid => Command::SpawnAsteroid,
                    };
                    world::apply(&mut self.world, command, out_events);
                }
            }
            StageEvent::BossStart { boss_stage } => {
                world::apply(
                    &mut self.world,
                    Command::SpawnBoss { stage: boss_stage },
                    out_events,
                );
                self.state = SessionState::BossFight;
            }
        }
    }
}

fn slots(players: u8) -> impl Iterator<Item = PlayerSlot> {
    PlayerSlot::ALL.into_iter().take(usize::from(players))
}

#[cfg(test)]
mod tests {
    use super::*;
    use nova_strike_core::BackgroundSet;
    use nova_strike_system_controls::NoInput;

    fn started() -> Simulation {
        let mut simulation = Simulation::new(Config::default());
        let mut events = Vec::new();
        simulation.start(&mut events);
        simulation
    }

    #[test]
    fn start_enters_stage_one() {
        let mut simulation = Simulation::new(Config::new(2, 9, StageTable::standard()));
        let mut events = Vec::new();
        simulation.start(&mut events);

        assert!(events.contains(&Event::SessionStarted { players: 2 }));
        assert!(events.contains(&Event::StageEntered {
            stage: 1,
            background: BackgroundSet::BlueSpace,
        }));
        assert_eq!(query::players_alive(simulation.world()), 2);
        assert_eq!(simulation.state(), SessionState::Playing);
    }

    #[test]
    fn losing_every_ship_ends_the_session() {
        let mut simulation = started();
        simulation.react(&[Event::AllPlayersDestroyed]);
        assert_eq!(simulation.state(), SessionState::GameOver);

        simulation.toggle_pause();
        assert_eq!(simulation.state(), SessionState::GameOver);

        let clock = query::clock(simulation.world());
        let mut events = Vec::new();
        simulation.step(Duration::from_millis(16), &mut NoInput, &mut events);
        assert!(events.is_empty());
        assert_eq!(query::clock(simulation.world()), clock);
    }

    #[test]
    fn pause_restores_the_interrupted_state() {
        let mut simulation = started();
        simulation.state = SessionState::BossFight;
        simulation.toggle_pause();
        assert_eq!(simulation.state(), SessionState::Paused);
        simulation.toggle_pause();
        assert_eq!(simulation.state(), SessionState::BossFight);
    }

    #[test]
    fn scroll_wraps_at_screen_height() {
        let mut simulation = started();
        for _ in 0..600 {
            simulation.scroll(Duration::from_millis(100));
        }
        let (background, stars) = simulation.scroll_offsets();
        assert!((0.0..SCREEN_HEIGHT).contains(&background));
        assert!((0.0..SCREEN_HEIGHT).contains(&stars));
    }
}
