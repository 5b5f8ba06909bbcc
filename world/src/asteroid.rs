use std::time::Duration;

use glam::Vec2;
use nova_strike_core::{
    tuning::{ASTEROID_FRAGMENT_OFFSET, ASTEROID_SPEED, ASTEROID_SPIN, SCREEN_HEIGHT},
    AsteroidId, AsteroidSize,
};
use rand::Rng;

const CULL_MARGIN: f32 = 100.0;

#[derive(Clone, Debug)]
pub(crate) struct Asteroid {
    pub(crate) id: AsteroidId,
    pub(crate) size: AsteroidSize,
    pub(crate) position: Vec2,
    pub(crate) velocity: Vec2,
    pub(crate) rotation: f32,
    spin: f32,
    hits_remaining: u8,
}

impl Asteroid {
    pub(crate) fn new<R: Rng>(id: AsteroidId, size: AsteroidSize, position: Vec2, rng: &mut R) -> Self {
        Self {
            id,
            size,
            position,
            velocity: Vec2::new(rng.gen_range(-30.0..=30.0), ASTEROID_SPEED),
            rotation: 0.0,
            spin: rng.gen_range(-ASTEROID_SPIN..=ASTEROID_SPIN),
            hits_remaining: size.hit_points(),
        }
    }

    pub(crate) fn advance(&mut self, dt: Duration) {
        let seconds = dt.as_secs_f32();
        self.position += self.velocity * seconds;
        self.rotation += self.spin * seconds;
    }

    /// Removes one hit point regardless of the damage dealt and reports
    /// whether the asteroid broke apart.
    pub(crate) fn take_hit(&mut self) -> bool {
        self.hits_remaining = self.hits_remaining.saturating_sub(1);
        self.hits_remaining == 0
    }

    pub(crate) fn is_intact(&self) -> bool {
        self.hits_remaining > 0
    }

    /// Positions and velocities of the pieces left behind. Only large
    /// asteroids split, and always into exactly two small pieces.
    pub(crate) fn fragments<R: Rng>(&self, rng: &mut R) -> Vec<(Vec2, Vec2)> {
        match self.size {
            AsteroidSize::Small => Vec::new(),
            AsteroidSize::Large => [-ASTEROID_FRAGMENT_OFFSET, ASTEROID_FRAGMENT_OFFSET]
                .into_iter()
                .map(|offset| {
                    let velocity = Vec2::new(
                        rng.gen_range(-60.0..=60.0),
                        ASTEROID_SPEED * rng.gen_range(0.8..=1.2),
                    );
                    (self.position + Vec2::new(offset, 0.0), velocity)
                })
                .collect(),
        }
    }

    pub(crate) fn is_off_screen(&self) -> bool {
        self.position.y > SCREEN_HEIGHT + CULL_MARGIN
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn large_asteroids_split_in_two() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        for seed in 0..16 {
            let asteroid = Asteroid::new(AsteroidId::new(seed), AsteroidSize::Large, Vec2::new(300.0, 200.0), &mut rng);
            let pieces = asteroid.fragments(&mut rng);
            assert_eq!(pieces.len(), 2);
            assert_eq!(pieces[0].0.x, 280.0);
            assert_eq!(pieces[1].0.x, 320.0);
        }
    }

    #[test]
    fn small_asteroids_leave_nothing() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let asteroid = Asteroid::new(AsteroidId::new(0), AsteroidSize::Small, Vec2::ZERO, &mut rng);
        assert!(asteroid.fragments(&mut rng).is_empty());
    }

    #[test]
    fn large_asteroids_take_three_hits() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let mut asteroid = Asteroid::new(AsteroidId::new(0), AsteroidSize::Large, Vec2::ZERO, &mut rng);
        assert!(!asteroid.take_hit());
        assert!(!asteroid.take_hit());
        assert!(asteroid.take_hit());
        assert!(!asteroid.is_intact());
    }
}
