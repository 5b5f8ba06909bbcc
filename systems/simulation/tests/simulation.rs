use std::time::Duration;

use nova_strike_core::{
    tuning::MAX_TICK, BackgroundSet, Event, PlayerSlot, SessionState, StageDefinition,
    StageTable, WaveDefinition,
};
use nova_strike_system_controls::{DeviceSnapshot, InputSource, NoInput};
use nova_strike_system_simulation::{Config, Simulation};
use nova_strike_world::query;

const STEP: Duration = Duration::from_millis(25);

struct PauseScript {
    presses: Vec<bool>,
    cursor: usize,
}

impl InputSource for PauseScript {
    fn snapshot(&mut self, slot: PlayerSlot) -> DeviceSnapshot {
        let pause = slot == PlayerSlot::FIRST && self.presses.get(self.cursor) == Some(&true);
        if slot == PlayerSlot::FIRST {
            self.cursor += 1;
        }
        DeviceSnapshot {
            pause,
            ..DeviceSnapshot::default()
        }
    }
}

fn single_wave(enemy_count: u32, spawn_interval: Duration) -> StageTable {
    StageTable::new(vec![StageDefinition {
        waves: vec![WaveDefinition::new(&[0], enemy_count, spawn_interval, None)],
        difficulty: 1.0,
        boss_stage: 1,
        background: BackgroundSet::BlueSpace,
    }])
    .expect("valid stage table")
}

fn started(table: StageTable) -> (Simulation, Vec<Event>) {
    let mut simulation = Simulation::new(Config::new(1, 42, table));
    let mut events = Vec::new();
    simulation.start(&mut events);
    (simulation, events)
}

#[test]
fn long_frames_are_clamped() {
    let (mut simulation, mut events) = started(StageTable::standard());
    simulation.step(Duration::from_secs(1), &mut NoInput, &mut events);
    assert_eq!(query::clock(simulation.world()), MAX_TICK);
    assert!(events.contains(&Event::TimeAdvanced { dt: MAX_TICK }));
}

#[test]
fn pause_freezes_the_clock_until_pressed_again() {
    let (mut simulation, mut events) = started(StageTable::standard());
    let mut input = PauseScript {
        presses: vec![true, true, true, false, true, false],
        cursor: 0,
    };

    for _ in 0..4 {
        simulation.step(STEP, &mut input, &mut events);
        assert_eq!(simulation.state(), SessionState::Paused);
        assert_eq!(query::clock(simulation.world()), Duration::ZERO);
    }

    simulation.step(STEP, &mut input, &mut events);
    assert_eq!(simulation.state(), SessionState::Playing);
    assert_eq!(query::clock(simulation.world()), STEP);

    simulation.step(STEP, &mut input, &mut events);
    assert_eq!(query::clock(simulation.world()), STEP * 2);
}

#[test]
fn wave_spawns_on_its_interval() {
    let (mut simulation, _) = started(single_wave(4, Duration::from_millis(1200)));
    let mut events = Vec::new();
    for _ in 0..280 {
        simulation.step(STEP, &mut NoInput, &mut events);
    }

    let spawned = events
        .iter()
        .filter(|event| matches!(event, Event::EnemySpawned { .. }))
        .count();
    assert_eq!(spawned, 4);
    assert!(!events
        .iter()
        .any(|event| matches!(event, Event::AsteroidSpawned { .. })));
}

#[test]
fn clearing_every_wave_summons_the_boss() {
    let (mut simulation, _) = started(single_wave(1, Duration::from_millis(500)));
    let mut events = Vec::new();
    let mut ticks = 0;
    while simulation.state() != SessionState::BossFight {
        simulation.step(STEP, &mut NoInput, &mut events);
        ticks += 1;
        assert!(ticks < 1000, "boss never appeared");
    }

    assert!(events
        .iter()
        .any(|event| matches!(event, Event::EnemyEscaped { .. })));
    assert!(events
        .iter()
        .any(|event| matches!(event, Event::BossSpawned { stage: 1, .. })));
    assert!(query::boss_encounter_active(simulation.world()));

    events.clear();
    for _ in 0..40 {
        simulation.step(STEP, &mut NoInput, &mut events);
    }
    assert_eq!(simulation.state(), SessionState::BossFight);
    assert!(!events
        .iter()
        .any(|event| matches!(event, Event::EnemySpawned { .. })));
}
