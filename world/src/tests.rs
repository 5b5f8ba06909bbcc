use super::*;
use nova_strike_core::{
    tuning::{
        BOSS_FINALE_DELAY, MINE_AMMO_PICKUP, MINE_DAMAGE, MINE_LIFETIME, PLAYER_MAX_SHIELD,
        POWER_UP_DURATION,
    },
    Contact, WeaponKind,
};

fn session(players: u8) -> (World, Vec<Event>) {
    let mut world = World::with_seed(0x5eed);
    let mut events = Vec::new();
    apply(&mut world, Command::StartSession { players }, &mut events);
    (world, events)
}

fn place_enemy(world: &mut World, difficulty: f32, position: Vec2) -> EnemyId {
    let mut events = Vec::new();
    world.spawn_enemy(EnemyKind::new(0), difficulty, position, &mut events);
    match events.as_slice() {
        [Event::EnemySpawned { enemy, .. }] => *enemy,
        other => panic!("unexpected spawn events: {other:?}"),
    }
}

fn place_bolt(world: &mut World, owner: ProjectileOwner, damage: f32) -> ProjectileId {
    let id = ProjectileId::new(world.ids.next());
    world.projectiles.push(Projectile {
        id,
        owner,
        position: Vec2::new(400.0, 400.0),
        velocity: Vec2::ZERO,
        damage,
        hitbox: Hitbox::circle(PLAYER_BOLT_RADIUS),
        beam: None,
    });
    id
}

fn resolve(world: &mut World, contacts: Vec<Contact>) -> Vec<Event> {
    let mut events = Vec::new();
    apply(world, Command::ResolveContacts { contacts }, &mut events);
    events
}

fn contact(first: BodyRef, second: BodyRef) -> Contact {
    Contact { first, second }
}

fn collect(world: &mut World, kind: PowerUpKind) -> Vec<Event> {
    let mut events = Vec::new();
    world.drop_power_up(kind, Vec2::new(512.0, 600.0), &mut events);
    let capsule = query::power_ups(world)[0];
    resolve(
        world,
        vec![contact(
            BodyRef::PowerUp(capsule.id),
            BodyRef::Player(PlayerSlot::FIRST),
        )],
    )
}

fn deploy_mine(world: &mut World) {
    let mut events = Vec::new();
    apply(
        world,
        Command::SetPlayerIntent {
            slot: PlayerSlot::FIRST,
            intent: PlayerIntent {
                deploy_mine: true,
                ..PlayerIntent::default()
            },
        },
        &mut events,
    );
}

#[test]
fn start_session_launches_requested_ships() {
    let (world, events) = session(2);
    assert_eq!(
        events,
        vec![
            Event::SessionStarted { players: 2 },
            Event::PlayerSpawned {
                slot: PlayerSlot::FIRST
            },
            Event::PlayerSpawned {
                slot: PlayerSlot::SECOND
            },
        ]
    );
    let xs: Vec<f32> = query::players(&world)
        .iter()
        .map(|view| view.position.x)
        .collect();
    assert_eq!(xs, vec![SCREEN_WIDTH / 3.0, SCREEN_WIDTH * 2.0 / 3.0]);
}

#[test]
fn laser_damages_each_target_once_per_batch() {
    let (mut world, _) = session(1);
    world.players[0].apply_power_up(PowerUpKind::Laser);
    world.players[0].intent.fire = true;
    let enemy = place_enemy(&mut world, 3.0, Vec2::new(512.0, 200.0));

    let mut events = Vec::new();
    apply(
        &mut world,
        Command::Tick {
            dt: Duration::from_millis(16),
        },
        &mut events,
    );
    assert!(events.contains(&Event::ShotFired {
        slot: PlayerSlot::FIRST,
        weapon: WeaponKind::Laser,
    }));
    let beam = query::projectiles(&world)
        .into_iter()
        .find(|view| view.laser)
        .expect("laser beam present");

    let pair = contact(BodyRef::Projectile(beam.id), BodyRef::Enemy(enemy));
    let _ = resolve(&mut world, vec![pair, pair, pair]);
    let hp = query::enemies(&world)[0].hp;
    assert_eq!(hp, 90.0 - LASER_DAMAGE);
    let beams = query::projectiles(&world)
        .into_iter()
        .filter(|view| view.laser)
        .count();
    assert_eq!(beams, 1, "beams are not consumed");

    let events = resolve(&mut world, vec![pair]);
    assert!(events.contains(&Event::EnemyDestroyed {
        enemy,
        kind: EnemyKind::new(0),
    }));
    assert_eq!(query::enemies_alive(&world), 0);
}

#[test]
fn bolts_are_consumed_and_kills_chain_combos() {
    let (mut world, _) = session(1);
    let owner = ProjectileOwner::Player(PlayerSlot::FIRST);

    for expected_total in [100, 200, 400] {
        let enemy = place_enemy(&mut world, 1.0, Vec2::new(300.0, 300.0));
        let bolt = place_bolt(&mut world, owner, 100.0);
        let events = resolve(
            &mut world,
            vec![contact(BodyRef::Projectile(bolt), BodyRef::Enemy(enemy))],
        );
        assert!(events.iter().any(|event| matches!(
            event,
            Event::ScoreAwarded { total, .. } if *total == expected_total
        )));
        assert!(query::projectiles(&world).is_empty());
    }
    assert_eq!(query::combo_multiplier(&world), 3);
    assert!(query::effects(&world)
        .any(|effect| effect.kind() == EffectKind::ComboBanner { multiplier: 3 }));
}

#[test]
fn stale_contacts_are_ignored() {
    let (mut world, _) = session(1);
    let enemy = place_enemy(&mut world, 1.0, Vec2::new(300.0, 300.0));
    let owner = ProjectileOwner::Player(PlayerSlot::FIRST);
    let first = place_bolt(&mut world, owner, 100.0);
    let second = place_bolt(&mut world, owner, 100.0);

    let events = resolve(
        &mut world,
        vec![
            contact(BodyRef::Projectile(first), BodyRef::Enemy(enemy)),
            contact(BodyRef::Projectile(second), BodyRef::Enemy(enemy)),
            contact(BodyRef::Enemy(enemy), BodyRef::Player(PlayerSlot::FIRST)),
        ],
    );
    let destroyed = events
        .iter()
        .filter(|event| matches!(event, Event::EnemyDestroyed { .. }))
        .count();
    assert_eq!(destroyed, 1);
    assert_eq!(query::projectiles(&world).len(), 1, "second bolt survives");
    assert_eq!(
        query::player(&world, PlayerSlot::FIRST).map(|view| view.shield),
        Some(PLAYER_MAX_SHIELD)
    );
}

#[test]
fn enemy_bolts_cannot_hit_enemies() {
    let (mut world, _) = session(1);
    let enemy = place_enemy(&mut world, 1.0, Vec2::new(300.0, 300.0));
    let bolt = place_bolt(&mut world, ProjectileOwner::Enemy, 100.0);
    let events = resolve(
        &mut world,
        vec![contact(BodyRef::Projectile(bolt), BodyRef::Enemy(enemy))],
    );
    assert!(events.is_empty());
    assert_eq!(query::enemies_alive(&world), 1);
}

#[test]
fn enemy_bolts_drain_shield_and_disappear() {
    let (mut world, _) = session(1);
    let bolt = place_bolt(&mut world, ProjectileOwner::Enemy, ENEMY_BOLT_DAMAGE);
    let events = resolve(
        &mut world,
        vec![contact(
            BodyRef::Projectile(bolt),
            BodyRef::Player(PlayerSlot::FIRST),
        )],
    );
    assert_eq!(
        events,
        vec![Event::PlayerDamaged {
            slot: PlayerSlot::FIRST,
            shield: PLAYER_MAX_SHIELD - ENEMY_BOLT_DAMAGE,
            hull_hits: 3,
        }]
    );
    assert!(query::projectiles(&world).is_empty());
    assert!(query::effects(&world).any(|effect| effect.kind() == EffectKind::DamageOverlay));
}

#[test]
fn invincible_ships_produce_no_feedback() {
    let (mut world, _) = session(1);
    world.players[0].grant_invincibility();
    let enemy = place_enemy(&mut world, 1.0, Vec2::new(300.0, 300.0));
    let events = resolve(
        &mut world,
        vec![contact(BodyRef::Enemy(enemy), BodyRef::Player(PlayerSlot::FIRST))],
    );
    assert!(events.is_empty());
    assert_eq!(query::effects(&world).count(), 0);
}

#[test]
fn losing_every_ship_ends_the_session() {
    let (mut world, _) = session(1);
    world.players[0].lives = 1;
    world.players[0].shield = 0.0;
    world.players[0].hull_hits = 1;
    let enemy = place_enemy(&mut world, 1.0, Vec2::new(300.0, 300.0));

    let events = resolve(
        &mut world,
        vec![contact(BodyRef::Enemy(enemy), BodyRef::Player(PlayerSlot::FIRST))],
    );
    assert_eq!(
        events,
        vec![
            Event::PlayerDestroyed {
                slot: PlayerSlot::FIRST
            },
            Event::AllPlayersDestroyed,
        ]
    );
    assert_eq!(query::players_alive(&world), 0);
}

#[test]
fn ships_launch_without_mines_until_ammo_is_collected() {
    let (mut world, _) = session(1);
    let ammo = |world: &World| query::player(world, PlayerSlot::FIRST).map(|view| view.mine_ammo);
    assert_eq!(ammo(&world), Some(0));

    deploy_mine(&mut world);
    assert!(query::mines(&world).is_empty());

    let events = collect(&mut world, PowerUpKind::MineAmmo);
    assert_eq!(
        events,
        vec![Event::PowerUpCollected {
            slot: PlayerSlot::FIRST,
            kind: PowerUpKind::MineAmmo,
        }]
    );
    assert_eq!(ammo(&world), Some(MINE_AMMO_PICKUP));

    deploy_mine(&mut world);
    assert_eq!(query::mines(&world).len(), 1);
    assert_eq!(ammo(&world), Some(MINE_AMMO_PICKUP - 1));
}

#[test]
fn mine_contact_scores_blast_and_direct_hit() {
    let (mut world, _) = session(1);
    let _ = collect(&mut world, PowerUpKind::MineAmmo);
    deploy_mine(&mut world);
    let mine = query::mines(&world)[0];
    let target = place_enemy(&mut world, 5.0, mine.position);
    let bystander = place_enemy(&mut world, 1.0, mine.position + Vec2::new(10.0, 0.0));

    let events = resolve(
        &mut world,
        vec![contact(BodyRef::Mine(mine.id), BodyRef::Enemy(target))],
    );
    assert!(events.contains(&Event::MineDetonated {
        mine: mine.id,
        center: mine.position,
    }));
    assert!(events.contains(&Event::EnemyDestroyed {
        enemy: bystander,
        kind: EnemyKind::new(0),
    }));
    assert!(query::mines(&world).is_empty());

    let survivor = query::enemies(&world);
    assert_eq!(survivor.len(), 1);
    let expected = 150.0 - blast_damage(0.0) - MINE_DAMAGE;
    assert!((survivor[0].hp - expected).abs() < 1e-3, "hp {}", survivor[0].hp);
    assert!(query::score(&world) > 0);
}

#[test]
fn expired_mines_damage_without_scoring() {
    let (mut world, _) = session(1);
    let _ = collect(&mut world, PowerUpKind::MineAmmo);
    deploy_mine(&mut world);
    let mine = query::mines(&world)[0];
    let enemy = place_enemy(&mut world, 0.5, mine.position);
    world.enemies[0].hp = 1.0;
    world.mines[0].elapsed = MINE_LIFETIME;

    let mut events = Vec::new();
    world.advance_mines(Duration::from_millis(1), &mut events);
    assert!(events.contains(&Event::EnemyDestroyed {
        enemy,
        kind: EnemyKind::new(0),
    }));
    assert!(!events
        .iter()
        .any(|event| matches!(event, Event::ScoreAwarded { .. })));
    assert_eq!(query::score(&world), 0);
}

#[test]
fn collecting_power_ups_applies_their_effect() {
    let (mut world, _) = session(1);
    let events = collect(&mut world, PowerUpKind::TripleShot);
    assert_eq!(
        events,
        vec![Event::PowerUpCollected {
            slot: PlayerSlot::FIRST,
            kind: PowerUpKind::TripleShot,
        }]
    );
    let view = query::player(&world, PlayerSlot::FIRST).expect("ship alive");
    assert_eq!(view.weapon, WeaponKind::Triple);
    assert_eq!(view.weapon_remaining, POWER_UP_DURATION);
    assert!(query::power_ups(&world).is_empty());
}

#[test]
fn boss_spawns_once_and_pays_out_after_finale() {
    let (mut world, _) = session(1);
    let mut events = Vec::new();
    apply(
        &mut world,
        Command::EnterStage {
            stage: 2,
            background: BackgroundSet::Nebula,
        },
        &mut events,
    );
    apply(&mut world, Command::SpawnBoss { stage: 2 }, &mut events);
    apply(&mut world, Command::SpawnBoss { stage: 2 }, &mut events);
    let spawned = events
        .iter()
        .filter(|event| matches!(event, Event::BossSpawned { .. }))
        .count();
    assert_eq!(spawned, 1);
    assert_eq!(query::boss(&world).map(|boss| boss.max_hp), Some(525.0));

    let bolt = place_bolt(&mut world, ProjectileOwner::Player(PlayerSlot::FIRST), 1000.0);
    let events = resolve(
        &mut world,
        vec![contact(BodyRef::Projectile(bolt), BodyRef::Boss)],
    );
    assert_eq!(events, vec![Event::BossDestroyed { stage: 2 }]);
    assert!(query::boss(&world).is_none());
    assert!(query::boss_wreck(&world).is_some());
    assert!(query::boss_encounter_active(&world));

    world.players[0].grant_invincibility();
    let mut events = Vec::new();
    let mut elapsed = Duration::ZERO;
    while !events.contains(&Event::BossDefeated { stage: 2 }) {
        apply(
            &mut world,
            Command::Tick {
                dt: Duration::from_millis(100),
            },
            &mut events,
        );
        elapsed += Duration::from_millis(100);
        assert!(elapsed <= BOSS_FINALE_DELAY, "finale overdue");
    }
    assert_eq!(elapsed, BOSS_FINALE_DELAY);
    assert_eq!(query::score(&world), (BOSS_KILL_SCORE + STAGE_CLEAR_BONUS) * 2);
    assert!(!query::boss_encounter_active(&world));
    assert!(events
        .iter()
        .any(|event| matches!(event, Event::PowerUpDropped { kind, .. } if kind.weapon().is_some())));
}

#[test]
fn escaped_enemies_leave_the_world() {
    let (mut world, _) = session(1);
    let enemy = place_enemy(&mut world, 1.0, Vec2::new(300.0, SCREEN_HEIGHT + 99.0));
    let mut events = Vec::new();
    apply(
        &mut world,
        Command::Tick {
            dt: Duration::from_millis(100),
        },
        &mut events,
    );
    assert!(events.contains(&Event::EnemyEscaped { enemy }));
    assert_eq!(query::enemies_alive(&world), 0);
}

#[test]
fn hit_flash_follows_its_target() {
    let (mut world, _) = session(1);
    let enemy = place_enemy(&mut world, 3.0, Vec2::new(300.0, 300.0));
    let bolt = place_bolt(&mut world, ProjectileOwner::Player(PlayerSlot::FIRST), 10.0);
    let _ = resolve(
        &mut world,
        vec![contact(BodyRef::Projectile(bolt), BodyRef::Enemy(enemy))],
    );
    assert!(query::effects(&world).any(|effect| effect.anchor() == Some(BodyRef::Enemy(enemy))));

    let finisher = place_bolt(&mut world, ProjectileOwner::Player(PlayerSlot::FIRST), 500.0);
    let _ = resolve(
        &mut world,
        vec![contact(BodyRef::Projectile(finisher), BodyRef::Enemy(enemy))],
    );
    let mut events = Vec::new();
    apply(
        &mut world,
        Command::Tick {
            dt: Duration::from_millis(1),
        },
        &mut events,
    );
    assert!(!query::effects(&world).any(|effect| effect.anchor() == Some(BodyRef::Enemy(enemy))));
}

fn place_asteroid(world: &mut World, size: AsteroidSize) -> AsteroidId {
    let mut events = Vec::new();
    world.spawn_asteroid(size, Vec2::new(400.0, 300.0), None, &mut events);
    match events.as_slice() {
        [Event::AsteroidSpawned { asteroid, .. }] => *asteroid,
        other => panic!("unexpected spawn events: {other:?}"),
    }
}

fn shoot_asteroid(world: &mut World, asteroid: AsteroidId) -> Vec<Event> {
    let bolt = place_bolt(
        world,
        ProjectileOwner::Player(PlayerSlot::FIRST),
        PLAYER_BOLT_DAMAGE,
    );
    resolve(
        world,
        vec![contact(BodyRef::Projectile(bolt), BodyRef::Asteroid(asteroid))],
    )
}

#[test]
fn large_asteroids_split_into_two_small_pieces() {
    let (mut world, _) = session(1);
    let rock = place_asteroid(&mut world, AsteroidSize::Large);

    for _ in 1..AsteroidSize::Large.hit_points() {
        assert!(shoot_asteroid(&mut world, rock).is_empty());
    }
    let events = shoot_asteroid(&mut world, rock);

    assert!(events.contains(&Event::AsteroidDestroyed {
        asteroid: rock,
        size: AsteroidSize::Large,
    }));
    let fragments: Vec<AsteroidSize> = events
        .iter()
        .filter_map(|event| match event {
            Event::AsteroidSpawned { size, .. } => Some(*size),
            _ => None,
        })
        .collect();
    assert_eq!(fragments, vec![AsteroidSize::Small, AsteroidSize::Small]);
    assert!(events.contains(&Event::ScoreAwarded {
        points: AsteroidSize::Large.score(),
        multiplier: 1,
        total: AsteroidSize::Large.score(),
    }));

    let remaining = query::asteroids(&world);
    assert_eq!(remaining.len(), 2);
    assert!(remaining
        .iter()
        .all(|view| view.size == AsteroidSize::Small && view.id != rock));
}

#[test]
fn small_asteroids_break_without_fragments() {
    let (mut world, _) = session(1);
    let rock = place_asteroid(&mut world, AsteroidSize::Small);

    let events = shoot_asteroid(&mut world, rock);
    assert_eq!(
        events,
        vec![
            Event::AsteroidDestroyed {
                asteroid: rock,
                size: AsteroidSize::Small,
            },
            Event::ScoreAwarded {
                points: AsteroidSize::Small.score(),
                multiplier: 1,
                total: AsteroidSize::Small.score(),
            },
        ]
    );
    assert!(query::asteroids(&world).is_empty());
    assert_eq!(query::projectiles(&world).len(), 0);
}
