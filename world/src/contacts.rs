//! Resolution of overlapping pairs reported by a collision detector.
//!
//! Every handler rechecks that both parties still exist, because an earlier
//! contact in the same batch may already have removed one of them.

use std::time::Duration;

use glam::Vec2;
use nova_strike_core::{
    tuning::{
        ASTEROID_CONTACT_DAMAGE, BOSS_CONTACT_DAMAGE, ENEMY_CONTACT_DAMAGE, MINE_DAMAGE,
        POWER_UP_DROP_CHANCE, SCREEN_HEIGHT, SCREEN_WIDTH,
    },
    AsteroidId, AsteroidSize, BodyRef, Contact, EnemyId, Event, MineId, PlayerSlot, PowerUpId, PowerUpKind,
    ProjectileId,
};
use rand::Rng;
use tracing::{debug, info};

use crate::{blast_damage, boss::BossWreck, player::DamageOutcome, EffectKind, World};

impl World {
    pub(crate) fn resolve_contact(&mut self, contact: Contact, out_events: &mut Vec<Event>) {
        match (contact.first, contact.second) {
            (
                BodyRef::Projectile(projectile),
                target @ (BodyRef::Enemy(_) | BodyRef::Boss | BodyRef::Asteroid(_)),
            ) => self.projectile_strikes(projectile, target, out_events),
            (BodyRef::Projectile(projectile), BodyRef::Player(slot)) => {
                self.bolt_strikes_player(projectile, slot, out_events);
            }
            (BodyRef::Enemy(_) | BodyRef::Boss | BodyRef::Asteroid(_), BodyRef::Player(slot)) => {
                self.ram_player(contact.first, slot, out_events);
            }
            (BodyRef::PowerUp(power_up), BodyRef::Player(slot)) => {
                self.collect_power_up(power_up, slot, out_events);
            }
            (BodyRef::Mine(mine), target) => self.mine_strikes(mine, target, out_events),
            (first, second) => {
                debug!(?first, ?second, "contact has no resolution rule");
            }
        }
    }

    fn projectile_strikes(
        &mut self,
        projectile: ProjectileId,
        target: BodyRef,
        out_events: &mut Vec<Event>,
    ) {
        let Some(index) = self
            .projectiles
            .iter()
            .position(|candidate| candidate.id == projectile)
        else {
            return;
        };
        if !self.projectiles[index].owner.is_player() || !self.contains(target) {
            return;
        }

        let (damage, position, laser) = {
            let strike = &self.projectiles[index];
            (strike.damage, strike.position, strike.is_laser())
        };
        if laser {
            if !self.laser_hits.insert((projectile, target)) {
                return;
            }
        } else {
            let _ = self.projectiles.remove(index);
        }
        self.effects.spawn(EffectKind::HitSpark, position);

        match target {
            BodyRef::Enemy(enemy) => self.damage_enemy(enemy, damage, out_events),
            BodyRef::Boss => self.damage_boss(damage, out_events),
            BodyRef::Asteroid(asteroid) => self.hit_asteroid(asteroid, out_events),
            _ => {}
        }
    }

    fn bolt_strikes_player(
        &mut self,
        projectile: ProjectileId,
        slot: PlayerSlot,
        out_events: &mut Vec<Event>,
    ) {
        let Some(index) = self
            .projectiles
            .iter()
            .position(|candidate| candidate.id == projectile)
        else {
            return;
        };
        if self.projectiles[index].owner.is_player() || !self.contains(BodyRef::Player(slot)) {
            return;
        }
        let bolt = self.projectiles.remove(index);
        self.damage_player(slot, bolt.damage, out_events);
    }

    fn ram_player(&mut self, rammer: BodyRef, slot: PlayerSlot, out_events: &mut Vec<Event>) {
        if !self.contains(rammer) {
            return;
        }
        let damage = match rammer {
            BodyRef::Boss => BOSS_CONTACT_DAMAGE,
            BodyRef::Asteroid(_) => ASTEROID_CONTACT_DAMAGE,
            _ => ENEMY_CONTACT_DAMAGE,
        };
        self.damage_player(slot, damage, out_events);
    }

    fn collect_power_up(&mut self, power_up: PowerUpId, slot: PlayerSlot, out_events: &mut Vec<Event>) {
        let Some(index) = self
            .power_ups
            .iter()
            .position(|candidate| candidate.id == power_up)
        else {
            return;
        };
        let Some(ship) = self.players.iter_mut().find(|ship| ship.slot == slot) else {
            return;
        };
        let capsule = self.power_ups.remove(index);
        ship.apply_power_up(capsule.kind);

        self.effects
            .spawn(EffectKind::PickupFlash { kind: capsule.kind }, capsule.position);
        debug!(slot = slot.get(), kind = capsule.kind.label(), "power-up collected");
        out_events.push(Event::PowerUpCollected {
            slot,
            kind: capsule.kind,
        });
    }

    fn mine_strikes(&mut self, mine: MineId, target: BodyRef, out_events: &mut Vec<Event>) {
        if !self.contains(BodyRef::Mine(mine)) || !self.contains(target) {
            return;
        }
        self.detonate_mine(mine, true, out_events);

        match target {
            BodyRef::Enemy(enemy) => self.damage_enemy(enemy, MINE_DAMAGE, out_events),
            BodyRef::Boss => self.damage_boss(MINE_DAMAGE, out_events),
            BodyRef::Asteroid(asteroid) => self.hit_asteroid(asteroid, out_events),
            other => debug!(?other, "mine touched a body it cannot damage"),
        }
    }

    /// Removes a mine and applies blast damage to every enemy in range.
    /// Kills are scored only when the mine was set off by a contact.
    pub(crate) fn detonate_mine(&mut self, mine: MineId, award: bool, out_events: &mut Vec<Event>) {
        let Some(index) = self.mines.iter().position(|candidate| candidate.id == mine) else {
            return;
        };
        let center = self.mines.remove(index).position;
        self.effects
            .spawn(EffectKind::Explosion { large: true }, center);
        self.effects
            .spawn(EffectKind::ScreenShake { intensity: 6.0 }, center);
        out_events.push(Event::MineDetonated { mine, center });

        let casualties: Vec<EnemyId> = self
            .enemies
            .iter_mut()
            .filter_map(|enemy| {
                let damage = blast_damage(enemy.position.distance(center));
                if damage <= 0.0 {
                    return None;
                }
                enemy.take_damage(damage).then_some(enemy.id)
            })
            .collect();
        for enemy in casualties {
            self.destroy_enemy(enemy, award, out_events);
        }
    }

    fn damage_enemy(&mut self, enemy: EnemyId, amount: f32, out_events: &mut Vec<Event>) {
        let Some(ship) = self.enemies.iter_mut().find(|ship| ship.id == enemy) else {
            return;
        };
        let position = ship.position;
        if ship.take_damage(amount) {
            self.destroy_enemy(enemy, true, out_events);
        } else {
            self.effects
                .attach(EffectKind::HitFlash, BodyRef::Enemy(enemy), position);
        }
    }

    fn destroy_enemy(&mut self, enemy: EnemyId, award: bool, out_events: &mut Vec<Event>) {
        let Some(index) = self.enemies.iter().position(|ship| ship.id == enemy) else {
            return;
        };
        let ship = self.enemies.remove(index);
        self.effects
            .spawn(EffectKind::Explosion { large: false }, ship.position);
        debug!(enemy = enemy.get(), kind = ship.kind.get(), award, "enemy destroyed");
        out_events.push(Event::EnemyDestroyed {
            enemy,
            kind: ship.kind,
        });

        if award {
            self.award(ship.score, out_events);
            let multiplier = self.score.register_kill(self.clock);
            if multiplier > 1 {
                self.effects.spawn(
                    EffectKind::ComboBanner { multiplier },
                    Vec2::new(SCREEN_WIDTH / 2.0, SCREEN_HEIGHT / 3.0),
                );
            }
        }

        if self.rng.gen_bool(POWER_UP_DROP_CHANCE) {
            let kind = PowerUpKind::ALL[self.rng.gen_range(0..PowerUpKind::ALL.len())];
            self.drop_power_up(kind, ship.position, out_events);
        }
    }

    fn damage_boss(&mut self, amount: f32, out_events: &mut Vec<Event>) {
        let Some(boss) = self.boss.as_mut() else {
            return;
        };
        let position = boss.position;
        if boss.take_damage(amount) {
            self.destroy_boss(out_events);
        } else {
            self.effects
                .attach(EffectKind::HitFlash, BodyRef::Boss, position);
        }
    }

    fn destroy_boss(&mut self, out_events: &mut Vec<Event>) {
        let Some(boss) = self.boss.take() else {
            return;
        };
        info!(stage = boss.stage, "boss destroyed");
        out_events.push(Event::BossDestroyed { stage: boss.stage });

        let mut wreck = BossWreck::new(boss.stage, boss.position);
        let progress = wreck.advance(Duration::ZERO);
        self.wreck = Some(wreck);
        self.explosion_bursts(boss.position, progress.bursts);
    }

    fn hit_asteroid(&mut self, asteroid: AsteroidId, out_events: &mut Vec<Event>) {
        let Some(rock) = self
            .asteroids
            .iter_mut()
            .find(|rock| rock.id == asteroid)
        else {
            return;
        };
        let position = rock.position;
        if rock.take_hit() {
            self.destroy_asteroid(asteroid, out_events);
        } else {
            self.effects
                .attach(EffectKind::HitFlash, BodyRef::Asteroid(asteroid), position);
        }
    }

    fn destroy_asteroid(&mut self, asteroid: AsteroidId, out_events: &mut Vec<Event>) {
        let Some(index) = self.asteroids.iter().position(|rock| rock.id == asteroid) else {
            return;
        };
        let rock = self.asteroids.remove(index);
        self.effects.spawn(
            EffectKind::Explosion {
                large: rock.size == AsteroidSize::Large,
            },
            rock.position,
        );
        out_events.push(Event::AsteroidDestroyed {
            asteroid,
            size: rock.size,
        });

        for (position, velocity) in rock.fragments(&mut self.rng) {
            self.spawn_asteroid(
                AsteroidSize::Small,
                position,
                Some(velocity),
                out_events,
            );
        }
        self.award(rock.size.score(), out_events);
    }

    /// Routes damage through a ship's shield, hull and lives and reports the
    /// outcome. Destroyed ships leave the world immediately.
    pub(crate) fn damage_player(&mut self, slot: PlayerSlot, amount: f32, out_events: &mut Vec<Event>) {
        let Some(index) = self.players.iter().position(|ship| ship.slot == slot) else {
            return;
        };
        let ship = &mut self.players[index];
        let outcome = ship.take_damage(amount);
        let position = ship.position;
        match outcome {
            DamageOutcome::Ignored => return,
            DamageOutcome::Shielded | DamageOutcome::HullHit => {
                out_events.push(Event::PlayerDamaged {
                    slot,
                    shield: ship.shield,
                    hull_hits: ship.hull_hits,
                });
            }
            DamageOutcome::LifeLost => {
                info!(slot = slot.get(), lives = ship.lives, "life lost");
                out_events.push(Event::LifeLost {
                    slot,
                    lives_remaining: ship.lives,
                });
            }
            DamageOutcome::Destroyed => {}
        }

        self.effects
            .spawn(EffectKind::ScreenShake { intensity: 5.0 }, position);
        self.effects.spawn(
            EffectKind::DamageOverlay,
            Vec2::new(SCREEN_WIDTH / 2.0, SCREEN_HEIGHT / 2.0),
        );

        if outcome != DamageOutcome::Destroyed {
            self.effects
                .attach(EffectKind::HitFlash, BodyRef::Player(slot), position);
            return;
        }

        let _ = self.players.remove(index);
        self.effects
            .spawn(EffectKind::Explosion { large: true }, position);
        info!(slot = slot.get(), "player destroyed");
        out_events.push(Event::PlayerDestroyed { slot });
        if self.players.is_empty() {
            info!("all players destroyed");
            out_events.push(Event::AllPlayersDestroyed);
        }
    }
}
