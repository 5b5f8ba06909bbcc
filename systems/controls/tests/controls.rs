use nova_strike_core::{Key, PlayerIntent, PlayerSlot};
use nova_strike_system_controls::{
    Action, ControlBindings, DeviceHub, DeviceSnapshot, InputSource, IntentTracker, NoInput,
};

#[test]
fn mine_and_pause_fire_once_per_press() {
    let mut tracker = IntentTracker::new();
    let held = DeviceSnapshot {
        fire: true,
        mine: true,
        pause: true,
        ..DeviceSnapshot::default()
    };

    let first = tracker.update(PlayerSlot::FIRST, held);
    assert!(first.fire && first.deploy_mine && first.pause);

    let second = tracker.update(PlayerSlot::FIRST, held);
    assert!(second.fire);
    assert!(!second.deploy_mine && !second.pause);

    let _ = tracker.update(PlayerSlot::FIRST, DeviceSnapshot::default());
    assert!(tracker.update(PlayerSlot::FIRST, held).deploy_mine);
}

#[test]
fn slots_track_edges_independently() {
    let mut tracker = IntentTracker::new();
    let mine = DeviceSnapshot {
        mine: true,
        ..DeviceSnapshot::default()
    };
    assert!(tracker.update(PlayerSlot::FIRST, mine).deploy_mine);
    assert!(tracker.update(PlayerSlot::SECOND, mine).deploy_mine);
    assert!(!tracker.update(PlayerSlot::FIRST, mine).deploy_mine);
}

#[test]
fn missing_devices_produce_idle_intent() {
    let mut tracker = IntentTracker::new();
    let mut source = NoInput;
    for slot in PlayerSlot::ALL {
        let intent = tracker.update(slot, source.snapshot(slot));
        assert_eq!(intent, PlayerIntent::default());
    }
}

#[test]
fn held_keys_map_to_each_slot() {
    let mut hub = DeviceHub::new(ControlBindings::default());
    hub.set_held_keys([Key::W, Key::Digit2, Key::Left, Key::Escape]);

    let one = hub.snapshot(PlayerSlot::FIRST);
    assert!(one.up && one.fire && one.pause);
    assert!(!one.left && !one.right);

    let two = hub.snapshot(PlayerSlot::SECOND);
    assert!(two.left);
    assert!(!two.pause && !two.fire);

    hub.set_held_keys([]);
    assert_eq!(hub.snapshot(PlayerSlot::FIRST), DeviceSnapshot::default());
}

#[test]
fn replaced_bindings_apply_to_the_next_snapshot() {
    let mut hub = DeviceHub::new(ControlBindings::default());
    hub.set_held_keys([Key::Space]);
    assert!(!hub.snapshot(PlayerSlot::FIRST).fire);

    let mut bindings = *hub.bindings();
    bindings.set(PlayerSlot::FIRST, Action::Fire, Key::Space);
    hub.set_bindings(bindings);
    assert!(hub.snapshot(PlayerSlot::FIRST).fire);
    assert_eq!(hub.bindings().player(PlayerSlot::FIRST).fire, Some(Key::Space));
}

#[test]
fn rebinding_changes_keyboard_mapping() {
    let mut bindings = ControlBindings::default();
    bindings.set(PlayerSlot::FIRST, Action::Fire, Key::Space);
    let mut hub = DeviceHub::new(bindings);
    hub.set_held_keys([Key::Digit2]);
    assert!(!hub.snapshot(PlayerSlot::FIRST).fire);
    hub.set_held_keys([Key::Space]);
    assert!(hub.snapshot(PlayerSlot::FIRST).fire);
}

#[test]
fn bindings_round_trip_through_toml() {
    let mut bindings = ControlBindings::default();
    bindings.clear(PlayerSlot::SECOND, Action::Mine);
    let encoded = toml::to_string(&bindings).expect("encode bindings");
    let decoded: ControlBindings = toml::from_str(&encoded).expect("decode bindings");
    assert_eq!(decoded, bindings);
}
