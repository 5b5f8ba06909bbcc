#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Stage and wave director that decides when enemies, asteroids and bosses
//! appear.
//!
//! The director is a pure state machine. The simulation feeds it elapsed
//! time together with the number of enemies still alive, and it answers with
//! at most one [`StageEvent`] per update.

use std::time::Duration;

use nova_strike_core::{
    BackgroundSet, SpawnRequest, StageDefinition, StageEvent, StageTable, WaveDefinition,
};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info, warn};

/// Pause between the end of one wave and the start of the next.
pub const WAVE_DELAY: Duration = Duration::from_secs(2);

/// Pause between a boss falling and the next stage starting.
pub const STAGE_TRANSITION_DELAY: Duration = Duration::from_secs(4);

/// Every this many enemy spawns, waves that seed asteroids add one.
const ASTEROID_CADENCE: u32 = 3;

/// Mutually exclusive phases of the director.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum DirectorPhase {
    /// Waiting for the next wave to begin.
    #[default]
    WaveDelay,
    /// Spawning the current wave and waiting for it to be cleared.
    WaveActive,
    /// A boss is fighting; the director stays silent.
    BossPhase,
    /// The boss fell and the next stage is counting down.
    StageTransition,
}

/// Timer-driven state machine that yields spawn requests and phase changes.
#[derive(Debug)]
pub struct StageDirector {
    table: StageTable,
    stage: u32,
    wave_index: usize,
    phase: DirectorPhase,
    phase_timer: Duration,
    spawn_timer: Duration,
    spawned_in_wave: u32,
    asteroids_in_wave: u32,
    rng: ChaCha8Rng,
    seed: u64,
}

impl StageDirector {
    /// Creates a director positioned at the start of stage one.
    #[must_use]
    pub fn new(table: StageTable, seed: u64) -> Self {
        Self {
            table,
            stage: 1,
            wave_index: 0,
            phase: DirectorPhase::WaveDelay,
            phase_timer: Duration::ZERO,
            spawn_timer: Duration::ZERO,
            spawned_in_wave: 0,
            asteroids_in_wave: 0,
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// One-based stage number currently being played.
    #[must_use]
    pub const fn stage(&self) -> u32 {
        self.stage
    }

    /// One-based number of the wave that is active or about to start.
    #[must_use]
    pub fn wave(&self) -> u32 {
        u32::try_from(self.wave_index + 1).unwrap_or(u32::MAX)
    }

    /// Current phase of the director.
    #[must_use]
    pub const fn phase(&self) -> DirectorPhase {
        self.phase
    }

    /// Number of enemies spawned so far in the current wave.
    #[must_use]
    pub const fn spawned_in_wave(&self) -> u32 {
        self.spawned_in_wave
    }

    /// Definition of the stage currently being played.
    #[must_use]
    pub fn stage_definition(&self) -> Option<&StageDefinition> {
        self.table.stage(self.stage)
    }

    /// Difficulty multiplier of the current stage.
    #[must_use]
    pub fn difficulty(&self) -> f32 {
        self.stage_definition()
            .map_or(1.0, |definition| definition.difficulty)
    }

    /// Background of the current stage.
    #[must_use]
    pub fn background(&self) -> BackgroundSet {
        self.stage_definition()
            .map_or(BackgroundSet::BlueSpace, |definition| definition.background)
    }

    /// Returns the director to the start of stage one with its original seed.
    pub fn reset(&mut self) {
        let table = std::mem::take(&mut self.table);
        *self = Self::new(table, self.seed);
    }

    /// Starts the stage transition countdown. Calls outside the boss phase
    /// are ignored so a boss can never be reported defeated twice.
    pub fn boss_defeated(&mut self) {
        if self.phase != DirectorPhase::BossPhase {
            warn!(phase = ?self.phase, "boss defeat reported outside boss phase");
            return;
        }
        info!(stage = self.stage, "stage cleared");
        self.phase = DirectorPhase::StageTransition;
        self.phase_timer = Duration::ZERO;
    }

    /// Advances the director by `dt`.
    ///
    /// `enemies_alive` is the number of enemy ships currently in play; a wave
    /// only completes once every enemy was spawned and none remain.
    pub fn update(&mut self, dt: Duration, enemies_alive: usize) -> Option<StageEvent> {
        match self.phase {
            DirectorPhase::StageTransition => self.update_transition(dt),
            DirectorPhase::BossPhase => None,
            DirectorPhase::WaveDelay => self.update_delay(dt),
            DirectorPhase::WaveActive => self.update_wave(dt, enemies_alive),
        }
    }

    fn update_transition(&mut self, dt: Duration) -> Option<StageEvent> {
        self.phase_timer = self.phase_timer.saturating_add(dt);
        if self.phase_timer < STAGE_TRANSITION_DELAY {
            return None;
        }

        self.stage = self.stage.saturating_add(1);
        self.wave_index = 0;
        self.phase = DirectorPhase::WaveDelay;
        self.phase_timer = Duration::ZERO;
        self.reset_wave_counters();
        info!(stage = self.stage, "stage started");
        Some(StageEvent::StageStart { stage: self.stage })
    }

    fn update_delay(&mut self, dt: Duration) -> Option<StageEvent> {
        if self.current_wave().is_none() {
            return self.start_boss();
        }

        self.phase_timer = self.phase_timer.saturating_add(dt);
        if self.phase_timer < WAVE_DELAY {
            return None;
        }

        self.phase = DirectorPhase::WaveActive;
        self.phase_timer = Duration::ZERO;
        self.reset_wave_counters();
        let wave = self.wave();
        info!(stage = self.stage, wave, "wave started");
        Some(StageEvent::WaveStart { wave })
    }

    fn update_wave(&mut self, dt: Duration, enemies_alive: usize) -> Option<StageEvent> {
        let (wave, difficulty) = match self.stage_definition() {
            Some(definition) => match definition.waves.get(self.wave_index) {
                Some(wave) => (wave.clone(), definition.difficulty),
                None => return self.start_boss(),
            },
            None => return None,
        };

        self.spawn_timer = self.spawn_timer.saturating_add(dt);
        if self.spawn_timer >= wave.spawn_interval && self.spawned_in_wave < wave.enemy_count {
            self.spawn_timer = Duration::ZERO;
            self.spawned_in_wave += 1;
            return Some(StageEvent::Spawn {
                requests: self.spawn_requests(&wave, difficulty),
            });
        }

        if self.spawned_in_wave < wave.enemy_count || enemies_alive > 0 {
            return None;
        }

        debug!(stage = self.stage, wave = self.wave(), "wave cleared");
        self.wave_index += 1;
        self.phase_timer = Duration::ZERO;
        if self.current_wave().is_none() {
            return self.start_boss();
        }
        self.phase = DirectorPhase::WaveDelay;
        None
    }

    fn spawn_requests(&mut self, wave: &WaveDefinition, difficulty: f32) -> Vec<SpawnRequest> {
        let mut requests = Vec::with_capacity(2);
        if !wave.enemy_kinds.is_empty() {
            let kind = wave.enemy_kinds[self.rng.gen_range(0..wave.enemy_kinds.len())];
            requests.push(SpawnRequest::Enemy { kind, difficulty });
        }

        let seeding = wave.include_asteroids
            && self.spawned_in_wave % ASTEROID_CADENCE == 0
            && (wave.asteroid_count == 0 || self.asteroids_in_wave < wave.asteroid_count);
        if seeding {
            self.asteroids_in_wave += 1;
            requests.push(SpawnRequest::Asteroid);
        }
        requests
    }

    fn start_boss(&mut self) -> Option<StageEvent> {
        let boss_stage = self
            .stage_definition()
            .map_or(self.stage, |definition| definition.boss_stage);
        self.phase = DirectorPhase::BossPhase;
        info!(stage = self.stage, boss_stage, "boss phase started");
        Some(StageEvent::BossStart { boss_stage })
    }

    fn current_wave(&self) -> Option<&WaveDefinition> {
        self.stage_definition()
            .and_then(|definition| definition.waves.get(self.wave_index))
    }

    fn reset_wave_counters(&mut self) {
        self.spawn_timer = Duration::ZERO;
        self.spawned_in_wave = 0;
        self.asteroids_in_wave = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boss_defeat_outside_boss_phase_is_ignored() {
        let mut director = StageDirector::new(StageTable::standard(), 1);
        director.boss_defeated();
        assert_eq!(director.phase(), DirectorPhase::WaveDelay);
    }

    #[test]
    fn wave_delay_elapses_before_first_wave() {
        let mut director = StageDirector::new(StageTable::standard(), 1);
        assert_eq!(director.update(Duration::from_millis(1999), 0), None);
        assert_eq!(
            director.update(Duration::from_millis(1), 0),
            Some(StageEvent::WaveStart { wave: 1 })
        );
        assert_eq!(director.phase(), DirectorPhase::WaveActive);
    }

    #[test]
    fn reset_returns_to_stage_one() {
        let mut director = StageDirector::new(StageTable::standard(), 1);
        assert_eq!(
            director.update(WAVE_DELAY, 0),
            Some(StageEvent::WaveStart { wave: 1 })
        );
        assert_eq!(director.phase(), DirectorPhase::WaveActive);
        director.reset();
        assert_eq!(director.stage(), 1);
        assert_eq!(director.wave(), 1);
        assert_eq!(director.phase(), DirectorPhase::WaveDelay);
    }
}
