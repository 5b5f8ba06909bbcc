//! Frame driver tying the simulation, input devices and saved settings together.

use std::time::Duration;

use nova_strike_core::{Event, Key, PlayerSlot, SessionState};
use nova_strike_rendering::{FrameInput, Overlay, Scene};
use nova_strike_storage::{
    volume_bar, AudioSettings, ControlSettings, HighScores, SettingsStore, StoreError,
};
use nova_strike_system_controls::{Action, DeviceHub, PAUSE_KEYS};
use nova_strike_system_simulation::{SessionSummary, Simulation};
use tracing::{info, warn};

use crate::scene;

/// Running game plus the services it persists to.
pub(crate) struct App<S> {
    simulation: Simulation,
    hub: DeviceHub,
    store: S,
    scores: HighScores,
    audio: AudioSettings,
    controls: ControlSettings,
    /// Player action waiting for a key in the pause menu.
    rebinding: Option<(PlayerSlot, Action)>,
    recorded: bool,
    player_name: String,
    events: Vec<Event>,
}

impl<S: SettingsStore> App<S> {
    /// Loads saved settings from `store` and starts a fresh session.
    pub(crate) fn new(mut simulation: Simulation, store: S, player_name: String) -> Self {
        let scores = HighScores::load(&store);
        let audio = AudioSettings::load(&store);
        let controls = ControlSettings::load(&store);
        let mut events = Vec::new();
        simulation.start(&mut events);
        Self {
            simulation,
            hub: DeviceHub::new(*controls.bindings()),
            store,
            scores,
            audio,
            controls,
            rebinding: None,
            recorded: false,
            player_name,
            events,
        }
    }

    /// Advances one frame and describes it in `scene`.
    ///
    /// Returns `false` once the player asked to quit.
    pub(crate) fn frame(&mut self, dt: Duration, input: &FrameInput, scene: &mut Scene) -> bool {
        self.hub.set_held_keys(input.held_keys.iter().copied());
        if self.simulation.state() != SessionState::Paused {
            self.rebinding = None;
        }

        match self.simulation.state() {
            SessionState::GameOver => {
                let summary = self.simulation.summary();
                self.record_result(summary);
                if input.pressed(Key::Q) {
                    return false;
                }
                if input.pressed(Key::Enter) {
                    self.restart();
                }
            }
            SessionState::Paused if self.rebinding.is_some() => self.capture_binding(input),
            SessionState::Paused => {
                if input.pressed(Key::Q) {
                    return false;
                }
                if input.pressed(Key::B) {
                    self.rebinding = Some((PlayerSlot::FIRST, Action::ALL[0]));
                } else if input.pressed(Key::R) {
                    info!("restoring default key bindings");
                    self.controls.bindings_mut().reset();
                    self.apply_bindings();
                }
                if self.adjust_audio(input) {
                    if let Err(error) = self.audio.save(&mut self.store) {
                        warn!(%error, "failed to save audio settings");
                    }
                }
            }
            _ => {}
        }

        self.events.clear();
        self.simulation.step(dt, &mut self.hub, &mut self.events);

        scene::populate(scene, &self.simulation);
        scene.overlay = self.overlay();
        true
    }

    fn restart(&mut self) {
        info!("starting a new session");
        self.recorded = false;
        self.events.clear();
        self.simulation.start(&mut self.events);
    }

    /// Enters the final score into the table once per session.
    fn record_result(&mut self, summary: SessionSummary) {
        if self.recorded {
            return;
        }
        self.recorded = true;
        info!(score = summary.score, stage = summary.stage, "session over");
        if let Some(rank) = self.scores.record(&self.player_name, summary.score) {
            info!(rank = rank + 1, "new high score");
            if let Err(error) = self.save_scores() {
                warn!(%error, "failed to save high scores");
            }
        }
    }

    fn save_scores(&mut self) -> Result<(), StoreError> {
        self.scores.save(&mut self.store)
    }

    /// Applies the pause-menu volume keys, reporting whether anything changed.
    fn adjust_audio(&mut self, input: &FrameInput) -> bool {
        let mut changed = false;
        for key in &input.pressed_keys {
            match key {
                Key::Digit1 => self.audio.step_music(false),
                Key::Digit2 => self.audio.step_music(true),
                Key::Digit3 => self.audio.step_sfx(false),
                Key::Digit4 => self.audio.step_sfx(true),
                _ => continue,
            }
            changed = true;
        }
        changed
    }

    /// Binds the first newly pressed key to the action awaiting one, then
    /// moves on to the next action. Pause keys cannot be bound.
    fn capture_binding(&mut self, input: &FrameInput) {
        let Some((slot, action)) = self.rebinding else {
            return;
        };
        let Some(key) = input
            .pressed_keys
            .iter()
            .copied()
            .find(|key| !PAUSE_KEYS.contains(key))
        else {
            return;
        };
        info!(
            slot = slot.get(),
            action = action.label(),
            key = key.label(),
            "key bound"
        );
        self.controls.bindings_mut().set(slot, action, key);
        self.rebinding = next_binding(slot, action);
        self.apply_bindings();
    }

    /// Hands the edited bindings to the hub and persists them.
    fn apply_bindings(&mut self) {
        self.hub.set_bindings(*self.controls.bindings());
        if let Err(error) = self.controls.save(&mut self.store) {
            warn!(%error, "failed to save key bindings");
        }
    }

    fn overlay(&self) -> Option<Overlay> {
        match self.simulation.state() {
            SessionState::Paused => Some(Overlay::Paused {
                music: volume_bar(self.audio.music()),
                sfx: volume_bar(self.audio.sfx()),
                rebinding: self
                    .rebinding
                    .map(|(slot, action)| format!("P{} {}", slot.get() + 1, action.label())),
            }),
            SessionState::GameOver => {
                let summary = self.simulation.summary();
                Some(Overlay::GameOver {
                    score: summary.score,
                    stage: summary.stage,
                    high_scores: self
                        .scores
                        .entries()
                        .iter()
                        .map(|entry| (entry.name.clone(), entry.score))
                        .collect(),
                })
            }
            SessionState::StageTransition => Some(Overlay::StageClear {
                stage: self.simulation.summary().stage,
            }),
            SessionState::Playing | SessionState::BossFight => None,
        }
    }
}

/// Action after `action` in menu order, continuing with the next player.
fn next_binding(slot: PlayerSlot, action: Action) -> Option<(PlayerSlot, Action)> {
    let index = Action::ALL.iter().position(|candidate| *candidate == action)?;
    match Action::ALL.get(index + 1) {
        Some(next) => Some((slot, *next)),
        None => PlayerSlot::ALL
            .into_iter()
            .find(|other| *other > slot)
            .map(|other| (other, Action::ALL[0])),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nova_strike_core::{BackgroundSet, StageTable};
    use nova_strike_storage::MemoryStore;
    use nova_strike_system_controls::ControlBindings;
    use nova_strike_system_simulation::Config;

    const FRAME: Duration = Duration::from_millis(16);

    fn app() -> App<MemoryStore> {
        let simulation = Simulation::new(Config::new(1, 11, StageTable::standard()));
        App::new(simulation, MemoryStore::new(), "ace".to_owned())
    }

    fn held(keys: &[Key]) -> FrameInput {
        FrameInput {
            held_keys: keys.to_vec(),
            pressed_keys: keys.to_vec(),
        }
    }

    fn pressed(keys: &[Key]) -> FrameInput {
        FrameInput {
            held_keys: Vec::new(),
            pressed_keys: keys.to_vec(),
        }
    }

    #[test]
    fn escape_opens_the_pause_overlay() {
        let mut app = app();
        let mut scene = Scene::new(BackgroundSet::BlueSpace);
        assert!(app.frame(FRAME, &held(&[Key::Escape]), &mut scene));
        assert_eq!(app.simulation.state(), SessionState::Paused);
        assert!(matches!(scene.overlay, Some(Overlay::Paused { .. })));
    }

    #[test]
    fn pause_menu_volume_keys_are_saved() {
        let mut app = app();
        let mut scene = Scene::new(BackgroundSet::BlueSpace);
        let _ = app.frame(FRAME, &held(&[Key::Escape]), &mut scene);
        let _ = app.frame(FRAME, &pressed(&[Key::Digit2, Key::Digit3]), &mut scene);

        let saved = AudioSettings::load(&app.store);
        assert_eq!(saved.music(), 0.75);
        assert_eq!(saved.sfx(), 0.75);
        assert_eq!(
            scene.overlay,
            Some(Overlay::Paused {
                music: volume_bar(0.75),
                sfx: volume_bar(0.75),
                rebinding: None,
            })
        );
    }

    #[test]
    fn pause_menu_captures_new_keys_in_menu_order() {
        let mut app = app();
        let mut scene = Scene::new(BackgroundSet::BlueSpace);
        let _ = app.frame(FRAME, &held(&[Key::Escape]), &mut scene);
        let _ = app.frame(FRAME, &pressed(&[Key::B]), &mut scene);
        assert_eq!(app.rebinding, Some((PlayerSlot::FIRST, Action::Up)));

        let _ = app.frame(FRAME, &pressed(&[Key::P, Key::Space]), &mut scene);
        assert_eq!(app.rebinding, Some((PlayerSlot::FIRST, Action::Down)));
        assert_eq!(
            scene.overlay,
            Some(Overlay::Paused {
                music: volume_bar(0.5),
                sfx: volume_bar(1.0),
                rebinding: Some("P1 DOWN".to_owned()),
            })
        );

        let saved = ControlSettings::load(&app.store);
        assert_eq!(saved.bindings().player(PlayerSlot::FIRST).up, Some(Key::Space));
        assert_eq!(app.hub.bindings(), saved.bindings());
        assert_eq!(app.simulation.state(), SessionState::Paused);
    }

    #[test]
    fn capture_ends_after_the_last_action_of_the_second_player() {
        assert_eq!(
            next_binding(PlayerSlot::FIRST, Action::Mine),
            Some((PlayerSlot::SECOND, Action::Up))
        );
        assert_eq!(next_binding(PlayerSlot::SECOND, Action::Mine), None);
    }

    #[test]
    fn saved_bindings_drive_the_hub_until_reset() {
        let mut store = MemoryStore::new();
        let mut controls = ControlSettings::load(&store);
        controls
            .bindings_mut()
            .set(PlayerSlot::FIRST, Action::Fire, Key::Space);
        controls.save(&mut store).expect("save bindings");

        let simulation = Simulation::new(Config::new(1, 11, StageTable::standard()));
        let mut app = App::new(simulation, store, "ace".to_owned());
        assert_eq!(app.hub.bindings(), controls.bindings());

        let mut scene = Scene::new(BackgroundSet::BlueSpace);
        let _ = app.frame(FRAME, &held(&[Key::Escape]), &mut scene);
        let _ = app.frame(FRAME, &pressed(&[Key::R]), &mut scene);

        let defaults = ControlBindings::default();
        assert_eq!(*app.hub.bindings(), defaults);
        assert_eq!(*ControlSettings::load(&app.store).bindings(), defaults);
    }

    #[test]
    fn q_quits_from_the_pause_menu() {
        let mut app = app();
        let mut scene = Scene::new(BackgroundSet::BlueSpace);
        let _ = app.frame(FRAME, &held(&[Key::Escape]), &mut scene);
        assert!(!app.frame(FRAME, &pressed(&[Key::Q]), &mut scene));
    }

    #[test]
    fn q_is_ignored_while_playing() {
        let mut app = app();
        let mut scene = Scene::new(BackgroundSet::BlueSpace);
        assert!(app.frame(FRAME, &pressed(&[Key::Q]), &mut scene));
        assert_eq!(app.simulation.state(), SessionState::Playing);
    }

    #[test]
    fn results_are_recorded_once_per_session() {
        let mut app = app();
        let summary = SessionSummary {
            score: 900,
            stage: 2,
        };
        app.record_result(summary);
        app.record_result(summary);

        let saved = HighScores::load(&app.store);
        assert_eq!(saved.entries().len(), 1);
        assert_eq!(saved.entries()[0].name, "ACE");
        assert_eq!(saved.entries()[0].score, 900);

        app.restart();
        app.record_result(summary);
        assert_eq!(HighScores::load(&app.store).entries().len(), 2);
    }
}
