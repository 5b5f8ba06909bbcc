use std::fs;

use nova_strike_core::{Key, PlayerSlot};
use nova_strike_storage::{
    AudioSettings, ControlSettings, FileStore, HighScores, SettingsStore, StoreError,
};
use nova_strike_system_controls::{Action, ControlBindings};
use tempfile::TempDir;

fn test_store() -> (FileStore, TempDir) {
    let dir = TempDir::new().unwrap();
    let store = FileStore::open(dir.path().join("settings")).unwrap();
    (store, dir)
}

#[test]
fn missing_entries_read_as_none() {
    let (store, _dir) = test_store();
    assert!(store.get("high_scores").unwrap().is_none());
}

#[test]
fn services_survive_a_restart() {
    let (mut store, dir) = test_store();

    let mut scores = HighScores::load(&store);
    let _ = scores.record("nova", 1200);
    let _ = scores.record("", 300);
    scores.save(&mut store).unwrap();

    let mut audio = AudioSettings::load(&store);
    audio.step_music(true);
    audio.save(&mut store).unwrap();

    let mut controls = ControlSettings::load(&store);
    controls
        .bindings_mut()
        .set(PlayerSlot::FIRST, Action::Fire, Key::Space);
    controls.save(&mut store).unwrap();

    let reopened = FileStore::open(dir.path().join("settings")).unwrap();
    let scores = HighScores::load(&reopened);
    let names: Vec<&str> = scores
        .entries()
        .iter()
        .map(|entry| entry.name.as_str())
        .collect();
    assert_eq!(names, vec!["NOVA", "AAA"]);
    assert_eq!(AudioSettings::load(&reopened).music(), 0.75);
    assert_eq!(
        ControlSettings::load(&reopened)
            .bindings()
            .player(PlayerSlot::FIRST)
            .fire,
        Some(Key::Space)
    );
}

#[test]
fn corrupt_entries_fall_back_to_defaults() {
    let (store, _dir) = test_store();
    fs::write(store.root().join("audio.toml"), "music = \"loud\"").unwrap();
    fs::write(store.root().join("controls.toml"), "[[[").unwrap();
    fs::write(store.root().join("high_scores.toml"), "entries = 7").unwrap();

    assert_eq!(AudioSettings::load(&store), AudioSettings::default());
    assert_eq!(
        *ControlSettings::load(&store).bindings(),
        ControlBindings::default()
    );
    assert!(HighScores::load(&store).entries().is_empty());
}

#[test]
fn out_of_range_volumes_are_clamped_on_load() {
    let (store, _dir) = test_store();
    fs::write(store.root().join("audio.toml"), "music = 4.0\nsfx = -1.0\n").unwrap();
    let audio = AudioSettings::load(&store);
    assert_eq!(audio.music(), 1.0);
    assert_eq!(audio.sfx(), 0.0);
}

#[test]
fn invalid_keys_are_rejected() {
    let (mut store, _dir) = test_store();
    assert!(matches!(
        store.set("Nested/Key", "x"),
        Err(StoreError::InvalidKey(_))
    ));
}
