use std::time::Duration;

use glam::Vec2;
use nova_strike_core::{
    tuning::{
        BOSS_BASE_HP, BOSS_ENTRY_DURATION, BOSS_ENTRY_END, BOSS_ENTRY_START, BOSS_EXPLOSION_STEP,
        BOSS_EXPLOSION_STEPS, BOSS_FINALE_DELAY, BOSS_HALF_EXTENT, BOSS_MINIONS_PER_PHASE,
        BOSS_MINION_DIFFICULTY, BOSS_MINION_INTERVAL, BOSS_MINION_PHASE_FIRE_INTERVAL,
        BOSS_PHASE_DURATION, BOSS_SPEED, BOSS_SWEEP_INTERVAL, BOSS_VOLLEY_INTERVAL,
        BOSS_VOLLEY_OFFSETS, SCREEN_HEIGHT, SCREEN_WIDTH,
    },
    BossPhase, EnemyKind,
};
use rand::Rng;

/// Hit points of the boss encountered on `stage`.
pub(crate) fn boss_hit_points(stage: u32) -> f32 {
    BOSS_BASE_HP * (1.0 + stage.saturating_sub(1) as f32 * 0.5)
}

/// Enemy launched by the boss during its minion phase.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Minion {
    pub(crate) kind: EnemyKind,
    pub(crate) position: Vec2,
    pub(crate) difficulty: f32,
}

/// Projectiles and minions produced by one boss tick.
#[derive(Debug, Default)]
pub(crate) struct BossOutput {
    /// Bolts as `(origin, aim point)` pairs.
    pub(crate) bolts: Vec<(Vec2, Vec2)>,
    pub(crate) minions: Vec<Minion>,
    pub(crate) phase_changed: Option<BossPhase>,
}

#[derive(Clone, Debug)]
pub(crate) struct Boss {
    pub(crate) stage: u32,
    pub(crate) position: Vec2,
    pub(crate) hp: f32,
    pub(crate) max_hp: f32,
    pub(crate) phase: BossPhase,
    phase_timer: Duration,
    elapsed: Duration,
    last_fire: Duration,
    last_minion: Duration,
    minions_this_phase: u8,
    defeated: bool,
}

impl Boss {
    pub(crate) fn new(stage: u32) -> Self {
        let hp = boss_hit_points(stage);
        Self {
            stage,
            position: Vec2::new(SCREEN_WIDTH / 2.0, BOSS_ENTRY_START),
            hp,
            max_hp: hp,
            phase: BossPhase::BoltVolley,
            phase_timer: Duration::ZERO,
            elapsed: Duration::ZERO,
            last_fire: Duration::ZERO,
            last_minion: Duration::ZERO,
            minions_this_phase: 0,
            defeated: false,
        }
    }

    pub(crate) fn is_entering(&self) -> bool {
        self.elapsed < BOSS_ENTRY_DURATION
    }

    /// Subtracts hit points. Returns `true` exactly once: on the hit that
    /// takes the boss to zero. Later hits are ignored.
    pub(crate) fn take_damage(&mut self, amount: f32) -> bool {
        if self.defeated {
            return false;
        }
        self.hp -= amount;
        if self.hp <= 0.0 {
            self.defeated = true;
            return true;
        }
        false
    }

    pub(crate) fn advance<R: Rng>(&mut self, dt: Duration, target: Vec2, rng: &mut R) -> BossOutput {
        self.elapsed = self.elapsed.saturating_add(dt);
        self.phase_timer = self.phase_timer.saturating_add(dt);
        self.glide();

        let elapsed = self.elapsed.as_secs_f32();
        let drift = (elapsed * 0.5).sin() * BOSS_SPEED * dt.as_secs_f32() * 2.0;
        self.position.x = (self.position.x + drift)
            .clamp(BOSS_HALF_EXTENT.0, SCREEN_WIDTH - BOSS_HALF_EXTENT.0);

        let mut output = BossOutput::default();
        if self.phase_timer >= BOSS_PHASE_DURATION {
            self.phase_timer = Duration::ZERO;
            self.minions_this_phase = 0;
            self.phase = self.phase.next();
            output.phase_changed = Some(self.phase);
        }

        let muzzle = Vec2::new(self.position.x, self.position.y + BOSS_HALF_EXTENT.1);
        match self.phase {
            BossPhase::BoltVolley => {
                if self.fire_ready(BOSS_VOLLEY_INTERVAL) {
                    for offset in BOSS_VOLLEY_OFFSETS {
                        output
                            .bolts
                            .push((muzzle, Vec2::new(target.x + offset, target.y)));
                    }
                }
            }
            BossPhase::RaySweep => {
                if self.fire_ready(BOSS_SWEEP_INTERVAL) {
                    let sweep = (self.phase_timer.as_secs_f32() * 4.0).sin() * 200.0;
                    output
                        .bolts
                        .push((muzzle, Vec2::new(self.position.x + sweep, SCREEN_HEIGHT)));
                }
            }
            BossPhase::MinionSpawn => {
                if self.elapsed.saturating_sub(self.last_minion) >= BOSS_MINION_INTERVAL
                    && self.minions_this_phase < BOSS_MINIONS_PER_PHASE
                {
                    self.last_minion = self.elapsed;
                    self.minions_this_phase += 1;
                    let offset = rng.gen_range(-100..=100) as f32;
                    output.minions.push(Minion {
                        kind: EnemyKind::new(rng.gen_range(0..=2)),
                        position: Vec2::new(self.position.x + offset, self.position.y + 50.0),
                        difficulty: BOSS_MINION_DIFFICULTY,
                    });
                }
                if self.fire_ready(BOSS_MINION_PHASE_FIRE_INTERVAL) {
                    output.bolts.push((muzzle, target));
                }
            }
        }
        output
    }

    fn glide(&mut self) {
        let progress = (self.elapsed.as_secs_f32() / BOSS_ENTRY_DURATION.as_secs_f32()).min(1.0);
        let eased = 1.0 - (1.0 - progress).powi(3);
        self.position.y = BOSS_ENTRY_START + (BOSS_ENTRY_END - BOSS_ENTRY_START) * eased;
    }

    fn fire_ready(&mut self, interval: Duration) -> bool {
        if self.elapsed.saturating_sub(self.last_fire) >= interval {
            self.last_fire = self.elapsed;
            return true;
        }
        false
    }
}

/// Progress of a fallen boss's explosion sequence.
#[derive(Debug, Default, PartialEq, Eq)]
pub(crate) struct WreckProgress {
    pub(crate) bursts: u8,
    pub(crate) finished: bool,
}

/// Remains of a destroyed boss counting down to its rewards.
#[derive(Clone, Debug)]
pub(crate) struct BossWreck {
    pub(crate) stage: u32,
    pub(crate) position: Vec2,
    elapsed: Duration,
    bursts_fired: u8,
}

impl BossWreck {
    pub(crate) fn new(stage: u32, position: Vec2) -> Self {
        Self {
            stage,
            position,
            elapsed: Duration::ZERO,
            bursts_fired: 0,
        }
    }

    pub(crate) fn advance(&mut self, dt: Duration) -> WreckProgress {
        self.elapsed = self.elapsed.saturating_add(dt);
        let mut progress = WreckProgress::default();
        while self.bursts_fired < BOSS_EXPLOSION_STEPS
            && self.elapsed >= BOSS_EXPLOSION_STEP * u32::from(self.bursts_fired)
        {
            self.bursts_fired += 1;
            progress.bursts += 1;
        }
        progress.finished = self.elapsed >= BOSS_FINALE_DELAY;
        progress
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn hit_points_scale_with_stage() {
        assert_eq!(boss_hit_points(1), 350.0);
        assert_eq!(boss_hit_points(2), 525.0);
        assert_eq!(boss_hit_points(3), 700.0);
    }

    #[test]
    fn lethal_damage_reported_exactly_once() {
        let mut boss = Boss::new(1);
        assert!(!boss.take_damage(300.0));
        assert!(boss.take_damage(50.0));
        assert!(!boss.take_damage(50.0));
        assert!(!boss.take_damage(1000.0));
    }

    #[test]
    fn entrance_glides_to_resting_height() {
        let mut boss = Boss::new(1);
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let target = Vec2::new(512.0, 648.0);
        let _ = boss.advance(Duration::from_secs(1), target, &mut rng);
        assert!(boss.is_entering());
        assert!(boss.position.y > BOSS_ENTRY_START && boss.position.y < BOSS_ENTRY_END);
        let _ = boss.advance(Duration::from_secs(1), target, &mut rng);
        assert!(!boss.is_entering());
        assert!((boss.position.y - BOSS_ENTRY_END).abs() < 1e-3);
    }

    #[test]
    fn phases_cycle_every_five_seconds() {
        let mut boss = Boss::new(1);
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let target = Vec2::new(512.0, 648.0);
        let mut changes = Vec::new();
        for _ in 0..160 {
            let output = boss.advance(Duration::from_millis(100), target, &mut rng);
            changes.extend(output.phase_changed);
        }
        assert_eq!(
            changes,
            vec![
                BossPhase::RaySweep,
                BossPhase::MinionSpawn,
                BossPhase::BoltVolley
            ]
        );
    }

    #[test]
    fn volley_fires_five_bolt_fans() {
        let mut boss = Boss::new(1);
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let target = Vec2::new(512.0, 648.0);
        let mut bolts = 0;
        for _ in 0..10 {
            bolts += boss
                .advance(Duration::from_millis(100), target, &mut rng)
                .bolts
                .len();
        }
        assert_eq!(bolts, 5, "one fan in the first second");
    }

    #[test]
    fn minion_phase_caps_launches() {
        let mut boss = Boss::new(1);
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let target = Vec2::new(512.0, 648.0);
        let mut minions = Vec::new();
        for _ in 0..150 {
            let output = boss.advance(Duration::from_millis(100), target, &mut rng);
            if boss.phase == BossPhase::MinionSpawn {
                minions.extend(output.minions);
            }
        }
        assert_eq!(minions.len(), usize::from(BOSS_MINIONS_PER_PHASE));
        for minion in minions {
            assert!(minion.kind.get() <= 2);
            assert_eq!(minion.difficulty, BOSS_MINION_DIFFICULTY);
        }
    }

    #[test]
    fn wreck_bursts_then_finishes() {
        let mut wreck = BossWreck::new(1, Vec2::new(512.0, 130.0));
        assert_eq!(wreck.advance(Duration::ZERO).bursts, 1);
        let mut bursts = 1;
        let mut finished_at = None;
        for step in 1..=20 {
            let progress = wreck.advance(Duration::from_millis(100));
            bursts += progress.bursts;
            if progress.finished && finished_at.is_none() {
                finished_at = Some(step);
            }
        }
        assert_eq!(bursts, BOSS_EXPLOSION_STEPS);
        assert_eq!(finished_at, Some(15));
    }
}
