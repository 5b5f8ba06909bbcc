use std::time::Duration;

use glam::Vec2;
use nova_strike_core::{
    tuning::{ENEMY_CULL_MARGIN, SCREEN_HEIGHT, SCREEN_WIDTH},
    EnemyId, EnemyKind, MovementPattern,
};

#[derive(Clone, Debug)]
pub(crate) struct EnemyShip {
    pub(crate) id: EnemyId,
    pub(crate) kind: EnemyKind,
    pub(crate) position: Vec2,
    pub(crate) hp: f32,
    pub(crate) max_hp: f32,
    pub(crate) score: u64,
    pub(crate) projectile_speed: f32,
    start_x: f32,
    speed: f32,
    pattern: MovementPattern,
    fire_interval: Duration,
    elapsed: Duration,
    last_fire: Option<Duration>,
}

impl EnemyShip {
    pub(crate) fn new(id: EnemyId, kind: EnemyKind, difficulty: f32, position: Vec2) -> Self {
        let stats = kind.definition().scaled(difficulty);
        Self {
            id,
            kind,
            position,
            hp: stats.hit_points,
            max_hp: stats.hit_points,
            score: stats.score,
            projectile_speed: stats.projectile_speed,
            start_x: position.x,
            speed: stats.speed,
            pattern: stats.pattern,
            fire_interval: stats.fire_interval,
            elapsed: Duration::ZERO,
            last_fire: None,
        }
    }

    pub(crate) fn advance(&mut self, dt: Duration) {
        self.elapsed = self.elapsed.saturating_add(dt);
        self.position = self.pattern.advance(
            self.position,
            self.start_x,
            self.speed,
            self.elapsed.as_secs_f32(),
            dt.as_secs_f32(),
        );
    }

    /// Reports whether the enemy's weapon has cooled down at simulation time
    /// `now`, restarting the cooldown when it has.
    pub(crate) fn ready_to_fire(&mut self, now: Duration) -> bool {
        if let Some(last) = self.last_fire {
            if now.saturating_sub(last) < self.fire_interval {
                return false;
            }
        }
        self.last_fire = Some(now);
        true
    }

    /// Subtracts hit points and reports whether the enemy has been destroyed.
    pub(crate) fn take_damage(&mut self, amount: f32) -> bool {
        self.hp -= amount;
        self.hp <= 0.0
    }

    pub(crate) fn is_alive(&self) -> bool {
        self.hp > 0.0
    }

    pub(crate) fn is_off_screen(&self) -> bool {
        self.position.y > SCREEN_HEIGHT + ENEMY_CULL_MARGIN
            || self.position.y < -ENEMY_CULL_MARGIN
            || self.position.x < -ENEMY_CULL_MARGIN
            || self.position.x > SCREEN_WIDTH + ENEMY_CULL_MARGIN
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn straight_enemies_descend_at_scaled_speed() {
        let mut enemy = EnemyShip::new(EnemyId::new(1), EnemyKind::new(0), 1.5, Vec2::new(200.0, -40.0));
        enemy.advance(Duration::from_secs(1));
        assert!((enemy.position.y - 110.0).abs() < 1e-3);
        assert_eq!(enemy.position.x, 200.0);
    }

    #[test]
    fn zigzag_enemies_swing_around_their_anchor() {
        let mut enemy = EnemyShip::new(EnemyId::new(1), EnemyKind::new(1), 1.0, Vec2::new(300.0, 0.0));
        for _ in 0..40 {
            enemy.advance(Duration::from_millis(25));
            assert!((enemy.position.x - 300.0).abs() <= 100.0 + 1e-3);
        }
        assert!(enemy.position.x != 300.0);
    }

    #[test]
    fn weapons_start_ready_and_respect_cadence() {
        let mut enemy = EnemyShip::new(EnemyId::new(1), EnemyKind::new(0), 1.0, Vec2::ZERO);
        let now = Duration::from_secs(10);
        assert!(enemy.ready_to_fire(now));
        assert!(!enemy.ready_to_fire(now + Duration::from_millis(1999)));
        assert!(enemy.ready_to_fire(now + Duration::from_secs(2)));
    }

    #[test]
    fn destruction_reported_at_zero_hit_points() {
        let mut enemy = EnemyShip::new(EnemyId::new(1), EnemyKind::new(0), 1.0, Vec2::ZERO);
        assert!(!enemy.take_damage(25.0));
        assert!(enemy.take_damage(5.0));
        assert!(!enemy.is_alive());
    }

    #[test]
    fn culled_beyond_margin() {
        let mut enemy = EnemyShip::new(EnemyId::new(1), EnemyKind::new(0), 1.0, Vec2::new(10.0, SCREEN_HEIGHT + 99.0));
        assert!(!enemy.is_off_screen());
        enemy.position.y = SCREEN_HEIGHT + 101.0;
        assert!(enemy.is_off_screen());
    }
}
