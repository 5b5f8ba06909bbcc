//! Converts simulation snapshots into rendering scenes.

use std::collections::HashSet;

use glam::Vec2;
use nova_strike_core::{
    tuning::{
        BOSS_HITBOX, ENEMY_HITBOX, MINE_RADIUS, PLAYER_HITBOX, PLAYER_MAX_SHIELD, POWER_UP_RADIUS,
    },
    BodyRef, Hitbox, PlayerSlot,
};
use nova_strike_rendering::{
    power_up_color, projectile_color, Banner, Color, HudPlayer, Scene, Shape,
    SpritePresentation,
};
use nova_strike_system_simulation::Simulation;
use nova_strike_world::{query, EffectKind};

const PLAYER_COLORS: [Color; 2] = [
    Color::from_rgb_u8(90, 200, 255),
    Color::from_rgb_u8(130, 255, 120),
];

const ENEMY_COLORS: [Color; 4] = [
    Color::from_rgb_u8(230, 80, 70),
    Color::from_rgb_u8(240, 150, 60),
    Color::from_rgb_u8(200, 70, 200),
    Color::from_rgb_u8(240, 220, 80),
];

const BOSS_COLOR: Color = Color::from_rgb_u8(170, 40, 60);
const ASTEROID_COLOR: Color = Color::from_rgb_u8(140, 120, 100);
const MINE_COLOR: Color = Color::from_rgb_u8(255, 150, 30);
const SPARK_COLOR: Color = Color::from_rgb_u8(255, 240, 150);
const EXPLOSION_COLOR: Color = Color::from_rgb_u8(255, 120, 40);
const DAMAGE_TINT: Color = Color::new(1.0, 0.0, 0.0, 0.3);
const BANNER_COLOR: Color = Color::from_rgb_u8(255, 230, 90);

/// Mines blink during their final seconds.
const MINE_WARNING_SECS: f32 = 2.0;

/// Rebuilds every per-frame part of `scene` from the simulation.
pub(crate) fn populate(scene: &mut Scene, simulation: &Simulation) {
    let world = simulation.world();
    scene.clear();
    scene.background = query::background(world);
    scene.scroll = simulation.scroll_offsets();
    scene.state = simulation.state();

    let flashing: HashSet<BodyRef> = query::effects(world)
        .filter(|effect| effect.kind() == EffectKind::HitFlash)
        .filter_map(|effect| effect.anchor())
        .collect();
    let tint = |body: BodyRef, color: Color| {
        if flashing.contains(&body) {
            color.lighten(0.7)
        } else {
            color
        }
    };

    for asteroid in query::asteroids(world) {
        let sprite = SpritePresentation::new(
            asteroid.position,
            Shape::Circle {
                radius: asteroid.size.radius(),
            },
            tint(BodyRef::Asteroid(asteroid.id), ASTEROID_COLOR),
        );
        scene.sprites.push(sprite.rotated(asteroid.rotation));
    }

    for power_up in query::power_ups(world) {
        scene.sprites.push(SpritePresentation::new(
            power_up.position,
            Shape::from(Hitbox::circle(POWER_UP_RADIUS)),
            power_up_color(power_up.kind),
        ));
        scene.banners.push(Banner {
            text: power_up.kind.label().to_owned(),
            position: power_up.position,
            color: Color::from_rgb_u8(10, 10, 10),
        });
    }

    for mine in query::mines(world) {
        let remaining = mine.remaining.as_secs_f32();
        let blink = remaining < MINE_WARNING_SECS && (remaining * 8.0) as u32 % 2 == 0;
        let color = if blink {
            MINE_COLOR.lighten(0.6)
        } else {
            MINE_COLOR
        };
        scene.sprites.push(SpritePresentation::new(
            mine.position,
            Shape::from(Hitbox::circle(MINE_RADIUS)),
            color,
        ));
    }

    for enemy in query::enemies(world) {
        let color = ENEMY_COLORS[usize::from(enemy.kind.get()) % ENEMY_COLORS.len()];
        scene.sprites.push(SpritePresentation::new(
            enemy.position,
            Shape::from(Hitbox::rect(ENEMY_HITBOX.0, ENEMY_HITBOX.1)),
            tint(BodyRef::Enemy(enemy.id), color),
        ));
    }

    if let Some(boss) = query::boss(world) {
        scene.sprites.push(SpritePresentation::new(
            boss.position,
            Shape::from(Hitbox::rect(BOSS_HITBOX.0, BOSS_HITBOX.1)),
            tint(BodyRef::Boss, BOSS_COLOR),
        ));
        if boss.max_hp > 0.0 {
            scene.hud.boss_health = Some(boss.hp / boss.max_hp);
        }
    }
    if let Some(position) = query::boss_wreck(world) {
        scene.sprites.push(SpritePresentation::new(
            position,
            Shape::from(Hitbox::rect(BOSS_HITBOX.0, BOSS_HITBOX.1)),
            BOSS_COLOR.with_alpha(0.5),
        ));
    }

    for player in query::players(world) {
        let color = tint(BodyRef::Player(player.slot), player_color(player.slot));
        let color = if player.invincible {
            color.with_alpha(0.5)
        } else {
            color
        };
        scene.sprites.push(SpritePresentation::new(
            player.position,
            Shape::from(Hitbox::rect(PLAYER_HITBOX.0, PLAYER_HITBOX.1)),
            color,
        ));
        scene.hud.players.push(HudPlayer {
            slot: player.slot,
            lives: player.lives,
            shield: player.shield / PLAYER_MAX_SHIELD,
            hull_hits: player.hull_hits,
            weapon: player.weapon,
            weapon_remaining: player.weapon_remaining,
            mine_ammo: player.mine_ammo,
        });
    }

    for projectile in query::projectiles(world) {
        let color = projectile_color(projectile.owner);
        let color = if projectile.laser {
            color.lighten(0.5)
        } else {
            color
        };
        scene.sprites.push(SpritePresentation::new(
            projectile.position,
            Shape::from(projectile.hitbox),
            color,
        ));
    }

    for effect in query::effects(world) {
        let seconds = effect.remaining().as_secs_f32();
        match effect.kind() {
            EffectKind::HitFlash => {}
            EffectKind::HitSpark => scene.sprites.push(SpritePresentation::new(
                effect.position(),
                Shape::Circle { radius: 6.0 },
                SPARK_COLOR,
            )),
            EffectKind::Explosion { large } => {
                let radius = if large { 70.0 } else { 35.0 };
                scene.sprites.push(SpritePresentation::new(
                    effect.position(),
                    Shape::Circle {
                        radius: radius * (1.0 - seconds).clamp(0.3, 1.0),
                    },
                    EXPLOSION_COLOR.with_alpha((seconds * 2.0).clamp(0.2, 0.9)),
                ));
            }
            EffectKind::ScreenShake { intensity } => {
                scene.shake += shake_offset(seconds, intensity);
            }
            EffectKind::DamageOverlay => scene.tint = Some(DAMAGE_TINT),
            EffectKind::PickupFlash { kind } => scene.sprites.push(SpritePresentation::new(
                effect.position(),
                Shape::Circle {
                    radius: POWER_UP_RADIUS * 2.0,
                },
                power_up_color(kind).with_alpha(0.4),
            )),
            EffectKind::ComboBanner { multiplier } => scene.banners.push(Banner {
                text: format!("COMBO x{multiplier}"),
                position: effect.position(),
                color: BANNER_COLOR,
            }),
        }
    }

    scene.hud.score = query::score(world);
    scene.hud.multiplier = query::combo_multiplier(world);
    scene.hud.stage = query::stage(world);
    scene.hud.wave = simulation.wave();
}

fn player_color(slot: PlayerSlot) -> Color {
    PLAYER_COLORS[usize::from(slot.get()) % PLAYER_COLORS.len()]
}

/// Jitter applied to the play field while a shake is running.
fn shake_offset(seconds: f32, intensity: f32) -> Vec2 {
    Vec2::new((seconds * 97.0).sin(), (seconds * 61.0).cos()) * intensity
}
