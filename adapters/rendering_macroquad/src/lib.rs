#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Macroquad-backed rendering adapter for Nova Strike.
//!
//! Macroquad's optional audio stack depends on native ALSA development
//! libraries, which are unavailable in the containerised CI environment.
//! To keep `cargo test` usable everywhere we depend on macroquad without its
//! default `audio` feature.
//!
//! Every entity is drawn as a primitive shape; the play field is scaled to
//! fit the window while keeping its aspect ratio.

use anyhow::Result;
use glam::Vec2;
use macroquad::{
    input::{is_key_down, is_key_pressed, KeyCode},
    shapes::{draw_circle, draw_line, draw_poly, draw_rectangle, draw_rectangle_lines},
    text::{draw_text, measure_text},
};
use nova_strike_core::{Key, SessionState};
use nova_strike_rendering::{
    background_palette, Banner, Color, FrameInput, Hud, Overlay, Presentation,
    RenderingBackend, Scene, Shape, SpritePresentation,
};
use std::{collections::VecDeque, time::Duration};

const HUD_FONT_SIZE: f32 = 22.0;
const BANNER_FONT_SIZE: f32 = 32.0;
const OVERLAY_FONT_SIZE: f32 = 36.0;
const STARS_PER_LAYER: u32 = 90;

/// Keys the adapter reports, paired with their macroquad key codes.
const KEY_MAP: [(KeyCode, Key); 51] = [
    (KeyCode::A, Key::A),
    (KeyCode::B, Key::B),
    (KeyCode::C, Key::C),
    (KeyCode::D, Key::D),
    (KeyCode::E, Key::E),
    (KeyCode::F, Key::F),
    (KeyCode::G, Key::G),
    (KeyCode::H, Key::H),
    (KeyCode::I, Key::I),
    (KeyCode::J, Key::J),
    (KeyCode::K, Key::K),
    (KeyCode::L, Key::L),
    (KeyCode::M, Key::M),
    (KeyCode::N, Key::N),
    (KeyCode::O, Key::O),
    (KeyCode::P, Key::P),
    (KeyCode::Q, Key::Q),
    (KeyCode::R, Key::R),
    (KeyCode::S, Key::S),
    (KeyCode::T, Key::T),
    (KeyCode::U, Key::U),
    (KeyCode::V, Key::V),
    (KeyCode::W, Key::W),
    (KeyCode::X, Key::X),
    (KeyCode::Y, Key::Y),
    (KeyCode::Z, Key::Z),
    (KeyCode::Key0, Key::Digit0),
    (KeyCode::Key1, Key::Digit1),
    (KeyCode::Key2, Key::Digit2),
    (KeyCode::Key3, Key::Digit3),
    (KeyCode::Key4, Key::Digit4),
    (KeyCode::Key5, Key::Digit5),
    (KeyCode::Key6, Key::Digit6),
    (KeyCode::Key7, Key::Digit7),
    (KeyCode::Key8, Key::Digit8),
    (KeyCode::Key9, Key::Digit9),
    (KeyCode::Up, Key::Up),
    (KeyCode::Down, Key::Down),
    (KeyCode::Left, Key::Left),
    (KeyCode::Right, Key::Right),
    (KeyCode::Space, Key::Space),
    (KeyCode::Enter, Key::Enter),
    (KeyCode::Escape, Key::Escape),
    (KeyCode::Tab, Key::Tab),
    (KeyCode::Comma, Key::Comma),
    (KeyCode::Period, Key::Period),
    (KeyCode::Slash, Key::Slash),
    (KeyCode::LeftShift, Key::LeftShift),
    (KeyCode::RightShift, Key::RightShift),
    (KeyCode::LeftControl, Key::LeftControl),
    (KeyCode::RightControl, Key::RightControl),
];

/// Rendering backend implemented on top of macroquad.
#[derive(Debug, Default)]
pub struct MacroquadBackend {
    swap_interval: Option<i32>,
    show_fps: bool,
}

impl MacroquadBackend {
    /// Returns a backend that requests the platform's default swap interval.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures the backend to request a specific swap interval from the platform.
    #[must_use]
    pub fn with_swap_interval(mut self, swap_interval: Option<i32>) -> Self {
        self.swap_interval = swap_interval;
        self
    }

    /// Configures the backend to either synchronise presentation with the display refresh rate
    /// or render as fast as possible.
    #[must_use]
    pub fn with_vsync(self, enabled: bool) -> Self {
        let swap_interval = if enabled { Some(1) } else { Some(0) };
        self.with_swap_interval(swap_interval)
    }

    /// Configures whether the heads-up display shows a frame counter.
    #[must_use]
    pub fn with_show_fps(mut self, show: bool) -> Self {
        self.show_fps = show;
        self
    }
}

/// Tracks the average frames-per-second produced by the render loop.
#[derive(Debug, Default)]
struct FpsCounter {
    elapsed: Duration,
    frames: u32,
    frame_times: VecDeque<Duration>,
    window_duration: Duration,
}

#[derive(Clone, Copy, Debug)]
struct FpsMetrics {
    per_second: f32,
    trailing_ten_seconds: f32,
}

impl FpsCounter {
    /// Records a rendered frame and returns the per-second and trailing ten-second averages once
    /// one second has elapsed.
    fn record_frame(&mut self, frame: Duration) -> Option<FpsMetrics> {
        self.elapsed += frame;
        self.frames = self.frames.saturating_add(1);

        self.frame_times.push_back(frame);
        self.window_duration += frame;

        let trailing_window = Duration::from_secs(10);
        while self.window_duration > trailing_window {
            if let Some(removed) = self.frame_times.pop_front() {
                self.window_duration = self.window_duration.saturating_sub(removed);
            } else {
                break;
            }
        }

        if self.elapsed < Duration::from_secs(1) {
            return None;
        }

        let seconds = self.elapsed.as_secs_f32();
        let per_second = self.frames as f32 / seconds;
        let window_seconds = self.window_duration.as_secs_f32();
        let trailing_ten_seconds = if window_seconds <= f32::EPSILON {
            per_second
        } else {
            self.frame_times.len() as f32 / window_seconds
        };
        self.elapsed = Duration::ZERO;
        self.frames = 0;
        Some(FpsMetrics {
            per_second,
            trailing_ten_seconds,
        })
    }
}

impl RenderingBackend for MacroquadBackend {
    fn run<F>(self, presentation: Presentation, mut update_scene: F) -> Result<()>
    where
        F: FnMut(Duration, FrameInput, &mut Scene) -> bool + 'static,
    {
        let Self {
            swap_interval,
            show_fps,
        } = self;

        let Presentation {
            window_title,
            width,
            height,
            scene,
        } = presentation;

        let mut config = macroquad::window::Conf {
            window_title,
            window_width: width as i32,
            window_height: height as i32,
            ..macroquad::window::Conf::default()
        };
        if let Some(swap_interval) = swap_interval {
            config.platform.swap_interval = Some(swap_interval);
        }

        macroquad::Window::from_config(config, async move {
            let mut scene = scene;
            let mut fps_counter = FpsCounter::default();
            let mut fps = None;

            loop {
                let dt_seconds = macroquad::time::get_frame_time();
                let frame_dt = Duration::from_secs_f32(dt_seconds.max(0.0));
                let frame_input = gather_frame_input(is_key_down, is_key_pressed);

                if !update_scene(frame_dt, frame_input, &mut scene) {
                    break;
                }

                if let Some(metrics) = fps_counter.record_frame(frame_dt) {
                    fps = Some(metrics.trailing_ten_seconds.min(metrics.per_second).round() as u32);
                }
                scene.hud.fps = if show_fps { fps } else { None };

                let viewport = Viewport::fit(
                    macroquad::window::screen_width(),
                    macroquad::window::screen_height(),
                    width,
                    height,
                );
                draw_scene(&scene, &viewport);

                macroquad::window::next_frame().await;
            }
        });

        Ok(())
    }
}

fn gather_frame_input<H, P>(held: H, pressed: P) -> FrameInput
where
    H: Fn(KeyCode) -> bool,
    P: Fn(KeyCode) -> bool,
{
    let mut input = FrameInput::default();
    for (code, key) in KEY_MAP {
        if held(code) {
            input.held_keys.push(key);
        }
        if pressed(code) {
            input.pressed_keys.push(key);
        }
    }
    input
}

/// Mapping from play-field pixels to window pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
struct Viewport {
    scale: f32,
    origin: Vec2,
    size: Vec2,
}

impl Viewport {
    fn fit(screen_width: f32, screen_height: f32, width: f32, height: f32) -> Self {
        let scale = (screen_width / width).min(screen_height / height).max(f32::EPSILON);
        let size = Vec2::new(width, height) * scale;
        let origin = (Vec2::new(screen_width, screen_height) - size) * 0.5;
        Self {
            scale,
            origin,
            size,
        }
    }

    fn to_screen(&self, position: Vec2) -> Vec2 {
        self.origin + position * self.scale
    }
}

/// Deterministic star position for one background layer.
fn star_position(index: u32, layer: u32, scroll: f32, width: f32, height: f32) -> Vec2 {
    let mut hash = index
        .wrapping_mul(0x9E37_79B9)
        .wrapping_add(layer.wrapping_mul(0x85EB_CA6B));
    hash ^= hash >> 15;
    hash = hash.wrapping_mul(0x2C1B_3C6D);
    hash ^= hash >> 12;
    let x = (hash & 0xFFFF) as f32 / 65_535.0 * width;
    let y = ((hash >> 16) as f32 / 65_535.0 * height + scroll).rem_euclid(height);
    Vec2::new(x, y)
}

fn draw_scene(scene: &Scene, viewport: &Viewport) {
    let palette = background_palette(scene.background);
    macroquad::window::clear_background(to_macroquad_color(Color::from_rgb_u8(0, 0, 0)));
    draw_rectangle(
        viewport.origin.x,
        viewport.origin.y,
        viewport.size.x,
        viewport.size.y,
        to_macroquad_color(palette.clear),
    );

    let field = viewport.size / viewport.scale;
    let layers = [
        (scene.scroll.0, palette.far, 1.0),
        (scene.scroll.1, palette.near, 2.0),
    ];
    for (layer, (scroll, color, radius)) in layers.into_iter().enumerate() {
        for index in 0..STARS_PER_LAYER {
            let star = star_position(index, layer as u32, scroll, field.x, field.y);
            let screen = viewport.to_screen(star);
            draw_circle(
                screen.x,
                screen.y,
                radius * viewport.scale,
                to_macroquad_color(color),
            );
        }
    }

    let shaken = Viewport {
        origin: viewport.origin + scene.shake * viewport.scale,
        ..*viewport
    };
    for sprite in &scene.sprites {
        draw_sprite(sprite, &shaken);
    }
    for banner in &scene.banners {
        draw_banner(banner, &shaken);
    }

    if let Some(tint) = scene.tint {
        draw_rectangle(
            viewport.origin.x,
            viewport.origin.y,
            viewport.size.x,
            viewport.size.y,
            to_macroquad_color(tint),
        );
    }

    draw_hud(&scene.hud, viewport);
    if let Some(overlay) = &scene.overlay {
        draw_overlay(overlay, scene.state, viewport);
    }
}

fn draw_sprite(sprite: &SpritePresentation, viewport: &Viewport) {
    let centre = viewport.to_screen(sprite.position);
    let color = to_macroquad_color(sprite.color);
    match sprite.shape {
        Shape::Circle { radius } => {
            let radius = radius * viewport.scale;
            if sprite.rotation == 0.0 {
                draw_circle(centre.x, centre.y, radius, color);
            } else {
                draw_poly(
                    centre.x,
                    centre.y,
                    7,
                    radius,
                    sprite.rotation.to_degrees(),
                    color,
                );
                let edge = centre + Vec2::from_angle(sprite.rotation) * radius;
                draw_line(
                    centre.x,
                    centre.y,
                    edge.x,
                    edge.y,
                    1.5,
                    to_macroquad_color(sprite.color.lighten(0.5)),
                );
            }
        }
        Shape::Rect { half_extents } => {
            let half = half_extents * viewport.scale;
            draw_rectangle(
                centre.x - half.x,
                centre.y - half.y,
                half.x * 2.0,
                half.y * 2.0,
                color,
            );
        }
    }
}

fn draw_banner(banner: &Banner, viewport: &Viewport) {
    let font_size = (BANNER_FONT_SIZE * viewport.scale).max(1.0);
    let centre = viewport.to_screen(banner.position);
    let dimensions = measure_text(&banner.text, None, font_size as u16, 1.0);
    draw_text(
        &banner.text,
        centre.x - dimensions.width * 0.5,
        centre.y + dimensions.height * 0.5,
        font_size,
        to_macroquad_color(banner.color),
    );
}

fn hud_lines(hud: &Hud) -> Vec<String> {
    let mut lines = Vec::with_capacity(hud.players.len() + 2);
    let mut header = format!("SCORE {}", hud.score);
    if hud.multiplier > 1 {
        header.push_str(&format!("  x{}", hud.multiplier));
    }
    lines.push(header);
    lines.push(format!("STAGE {}  WAVE {}", hud.stage, hud.wave));
    for player in &hud.players {
        let mut line = format!(
            "P{}  LIVES {}  SHIELD {:>3}%  HULL {}  MINES {}  {}",
            u32::from(player.slot.get()) + 1,
            player.lives,
            (player.shield.clamp(0.0, 1.0) * 100.0).round() as u32,
            player.hull_hits,
            player.mine_ammo,
            player.weapon.label(),
        );
        if !player.weapon_remaining.is_zero() {
            line.push_str(&format!(" {}s", player.weapon_remaining.as_secs_f32().ceil() as u32));
        }
        lines.push(line);
    }
    if let Some(fps) = hud.fps {
        lines.push(format!("FPS {fps}"));
    }
    lines
}

fn draw_hud(hud: &Hud, viewport: &Viewport) {
    let font_size = (HUD_FONT_SIZE * viewport.scale).max(1.0);
    let white = to_macroquad_color(Color::from_rgb_u8(240, 240, 240));
    let mut cursor = viewport.origin + Vec2::new(12.0, 12.0 + font_size);
    for line in hud_lines(hud) {
        draw_text(&line, cursor.x, cursor.y, font_size, white);
        cursor.y += font_size * 1.1;
    }

    if let Some(health) = hud.boss_health {
        let bar_width = viewport.size.x * 0.5;
        let x = viewport.origin.x + (viewport.size.x - bar_width) * 0.5;
        let y = viewport.origin.y + 12.0 * viewport.scale;
        let bar_height = 10.0 * viewport.scale;
        draw_rectangle(
            x,
            y,
            bar_width * health.clamp(0.0, 1.0),
            bar_height,
            to_macroquad_color(Color::from_rgb_u8(220, 40, 60)),
        );
        draw_rectangle_lines(x, y, bar_width, bar_height, 2.0, white);
    }
}

fn overlay_lines(overlay: &Overlay) -> Vec<String> {
    match overlay {
        Overlay::Paused {
            music,
            sfx,
            rebinding,
        } => {
            let mut lines = vec![
                "PAUSED".to_owned(),
                format!("MUSIC {music}  (1/2)"),
                format!("SFX {sfx}  (3/4)"),
            ];
            match rebinding {
                Some(target) => lines.push(format!("PRESS A KEY FOR {target}")),
                None => lines.push("B REBIND KEYS  R RESET KEYS".to_owned()),
            }
            lines.push("ESC RESUME  Q QUIT".to_owned());
            lines
        }
        Overlay::GameOver {
            score,
            stage,
            high_scores,
        } => {
            let mut lines = vec![
                "GAME OVER".to_owned(),
                format!("SCORE {score}  STAGE {stage}"),
            ];
            for (rank, (name, score)) in high_scores.iter().enumerate() {
                lines.push(format!("{}. {name:<8} {score:>8}", rank + 1));
            }
            lines.push("ENTER RESTART  Q QUIT".to_owned());
            lines
        }
        Overlay::StageClear { stage } => vec![format!("STAGE {stage} CLEAR")],
    }
}

fn draw_overlay(overlay: &Overlay, state: SessionState, viewport: &Viewport) {
    if state != SessionState::StageTransition {
        draw_rectangle(
            viewport.origin.x,
            viewport.origin.y,
            viewport.size.x,
            viewport.size.y,
            to_macroquad_color(Color::new(0.0, 0.0, 0.0, 0.6)),
        );
    }

    let font_size = (OVERLAY_FONT_SIZE * viewport.scale).max(1.0);
    let lines = overlay_lines(overlay);
    let block_height = font_size * 1.2 * lines.len() as f32;
    let mut y = viewport.origin.y + (viewport.size.y - block_height) * 0.5 + font_size;
    let white = to_macroquad_color(Color::from_rgb_u8(255, 255, 255));
    for line in &lines {
        let dimensions = measure_text(line, None, font_size as u16, 1.0);
        let x = viewport.origin.x + (viewport.size.x - dimensions.width) * 0.5;
        draw_text(line, x, y, font_size, white);
        y += font_size * 1.2;
    }
}

fn to_macroquad_color(color: Color) -> macroquad::color::Color {
    macroquad::color::Color::new(color.red, color.green, color.blue, color.alpha)
}

#[cfg(test)]
mod tests {
    use super::*;
    use nova_strike_core::{PlayerSlot, WeaponKind};
    use nova_strike_rendering::HudPlayer;
    use std::collections::HashSet;

    #[test]
    fn key_map_is_one_to_one() {
        let keys: HashSet<Key> = KEY_MAP.iter().map(|(_, key)| *key).collect();
        assert_eq!(keys.len(), KEY_MAP.len());
    }

    #[test]
    fn frame_input_separates_held_and_pressed_keys() {
        let input = gather_frame_input(
            |code| matches!(code, KeyCode::W | KeyCode::Key2),
            |code| code == KeyCode::Key2,
        );
        assert_eq!(input.held_keys, vec![Key::W, Key::Digit2]);
        assert_eq!(input.pressed_keys, vec![Key::Digit2]);
    }

    #[test]
    fn viewport_letterboxes_wide_windows() {
        let viewport = Viewport::fit(2048.0, 768.0, 1024.0, 768.0);
        assert_eq!(viewport.scale, 1.0);
        assert_eq!(viewport.origin, Vec2::new(512.0, 0.0));
        assert_eq!(viewport.to_screen(Vec2::new(10.0, 20.0)), Vec2::new(522.0, 20.0));
    }

    #[test]
    fn stars_stay_inside_the_field() {
        for index in 0..STARS_PER_LAYER {
            let star = star_position(index, 1, 5_000.0, 1024.0, 768.0);
            assert!((0.0..=1024.0).contains(&star.x));
            assert!((0.0..768.0).contains(&star.y));
        }
    }

    #[test]
    fn hud_lists_each_player() {
        let hud = Hud {
            score: 1500,
            multiplier: 3,
            stage: 2,
            wave: 4,
            players: vec![HudPlayer {
                slot: PlayerSlot::SECOND,
                lives: 2,
                shield: 0.5,
                hull_hits: 3,
                weapon: WeaponKind::Laser,
                weapon_remaining: Duration::from_millis(7_200),
                mine_ammo: 1,
            }],
            boss_health: None,
            fps: None,
        };
        let lines = hud_lines(&hud);
        assert_eq!(lines[0], "SCORE 1500  x3");
        assert_eq!(lines[1], "STAGE 2  WAVE 4");
        assert!(lines[2].starts_with("P2  LIVES 2  SHIELD  50%"));
        assert!(lines[2].ends_with(" 8s"));
    }

    #[test]
    fn game_over_lists_ranked_scores() {
        let lines = overlay_lines(&Overlay::GameOver {
            score: 900,
            stage: 3,
            high_scores: vec![("ACE".to_owned(), 900)],
        });
        assert_eq!(lines[0], "GAME OVER");
        assert!(lines[2].starts_with("1. ACE"));
    }

    #[test]
    fn pause_menu_prompts_for_the_key_being_rebound() {
        let idle = overlay_lines(&Overlay::Paused {
            music: "[##]".to_owned(),
            sfx: "[#-]".to_owned(),
            rebinding: None,
        });
        assert_eq!(idle[3], "B REBIND KEYS  R RESET KEYS");

        let capturing = overlay_lines(&Overlay::Paused {
            music: "[##]".to_owned(),
            sfx: "[#-]".to_owned(),
            rebinding: Some("P2 MINE".to_owned()),
        });
        assert_eq!(capturing[3], "PRESS A KEY FOR P2 MINE");
        assert_eq!(capturing.len(), 5);
    }

    #[test]
    fn fps_counter_reports_average_frames_per_second() {
        let mut counter = FpsCounter::default();
        let frame = Duration::from_millis(250);
        assert!(counter.record_frame(frame).is_none());
        assert!(counter.record_frame(frame).is_none());
        assert!(counter.record_frame(frame).is_none());

        let metrics = counter
            .record_frame(frame)
            .expect("should report FPS after one second of samples");
        assert!((metrics.per_second - 4.0).abs() <= 1e-3);
        assert!((metrics.trailing_ten_seconds - 4.0).abs() <= 1e-3);
        assert!(counter.record_frame(frame).is_none());
    }
}
