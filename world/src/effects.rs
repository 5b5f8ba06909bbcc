use std::time::Duration;

use glam::Vec2;
use nova_strike_core::{BodyRef, PowerUpKind};

/// Cosmetic feedback the presentation layer may render.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum EffectKind {
    /// Brief tint on the anchored entity after it took damage.
    HitFlash,
    /// Spark where a projectile struck.
    HitSpark,
    /// Fireball; large explosions accompany mines, bosses and ship losses.
    Explosion {
        /// Whether the big explosion animation should be used.
        large: bool,
    },
    /// Camera shake of the provided intensity.
    ScreenShake {
        /// Shake strength in pixels.
        intensity: f32,
    },
    /// Red full-screen flash after a player was hit.
    DamageOverlay,
    /// Expanding flash where a capsule was collected.
    PickupFlash {
        /// Capsule that was collected.
        kind: PowerUpKind,
    },
    /// Combo banner announcing the multiplier.
    ComboBanner {
        /// Multiplier reached.
        multiplier: u32,
    },
}

impl EffectKind {
    fn lifetime(self) -> Duration {
        match self {
            Self::HitFlash => Duration::from_millis(60),
            Self::HitSpark => Duration::from_millis(120),
            Self::Explosion { large: false } => Duration::from_millis(400),
            Self::Explosion { large: true } => Duration::from_millis(600),
            Self::ScreenShake { .. } => Duration::from_millis(80),
            Self::DamageOverlay => Duration::from_millis(150),
            Self::PickupFlash { .. } => Duration::from_millis(200),
            Self::ComboBanner { .. } => Duration::from_millis(800),
        }
    }
}

/// Declarative effect record that expires after a fixed lifetime.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Effect {
    kind: EffectKind,
    position: Vec2,
    remaining: Duration,
    anchor: Option<BodyRef>,
}

impl Effect {
    /// Kind of feedback to render.
    #[must_use]
    pub const fn kind(&self) -> EffectKind {
        self.kind
    }

    /// World position the effect is centred on.
    #[must_use]
    pub const fn position(&self) -> Vec2 {
        self.position
    }

    /// Time until the effect expires.
    #[must_use]
    pub const fn remaining(&self) -> Duration {
        self.remaining
    }

    /// Entity the effect follows, if any.
    #[must_use]
    pub const fn anchor(&self) -> Option<BodyRef> {
        self.anchor
    }
}

#[derive(Clone, Debug, Default)]
pub(crate) struct EffectQueue {
    effects: Vec<Effect>,
}

impl EffectQueue {
    pub(crate) fn spawn(&mut self, kind: EffectKind, position: Vec2) {
        self.effects.push(Effect {
            kind,
            position,
            remaining: kind.lifetime(),
            anchor: None,
        });
    }

    /// Adds an effect that is dropped as soon as `anchor` stops existing.
    pub(crate) fn attach(&mut self, kind: EffectKind, anchor: BodyRef, position: Vec2) {
        self.effects.push(Effect {
            kind,
            position,
            remaining: kind.lifetime(),
            anchor: Some(anchor),
        });
    }

    /// Burns down lifetimes and drops expired effects and those whose anchor
    /// no longer exists.
    pub(crate) fn advance<F>(&mut self, dt: Duration, is_alive: F)
    where
        F: Fn(BodyRef) -> bool,
    {
        self.effects.retain_mut(|effect| {
            effect.remaining = effect.remaining.saturating_sub(dt);
            !effect.remaining.is_zero() && effect.anchor.map_or(true, &is_alive)
        });
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = &Effect> {
        self.effects.iter()
    }

    pub(crate) fn clear(&mut self) {
        self.effects.clear();
    }
}
