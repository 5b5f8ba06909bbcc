#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared rendering contracts for Nova Strike adapters.

use anyhow::Result as AnyResult;
use glam::Vec2;
use nova_strike_core::{
    BackgroundSet, Hitbox, Key, PlayerSlot, PowerUpKind, ProjectileOwner, SessionState,
    WeaponKind,
};
use std::{error::Error, fmt, time::Duration};

/// RGBA color used when presenting frames.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    /// Red channel intensity in the range 0.0..=1.0.
    pub red: f32,
    /// Green channel intensity in the range 0.0..=1.0.
    pub green: f32,
    /// Blue channel intensity in the range 0.0..=1.0.
    pub blue: f32,
    /// Alpha channel intensity in the range 0.0..=1.0.
    pub alpha: f32,
}

impl Color {
    /// Creates a new color from floating point channels.
    #[must_use]
    pub const fn new(red: f32, green: f32, blue: f32, alpha: f32) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// Creates an opaque color from byte RGB values.
    #[must_use]
    pub const fn from_rgb_u8(red: u8, green: u8, blue: u8) -> Self {
        Self {
            red: red as f32 / 255.0,
            green: green as f32 / 255.0,
            blue: blue as f32 / 255.0,
            alpha: 1.0,
        }
    }

    /// Returns a new color lightened towards white by the provided amount.
    #[must_use]
    pub fn lighten(self, amount: f32) -> Self {
        let amount = amount.clamp(0.0, 1.0);

        Self {
            red: lighten_channel(self.red, amount),
            green: lighten_channel(self.green, amount),
            blue: lighten_channel(self.blue, amount),
            alpha: self.alpha,
        }
    }

    /// Returns the same color with the provided alpha.
    #[must_use]
    pub fn with_alpha(self, alpha: f32) -> Self {
        Self {
            alpha: alpha.clamp(0.0, 1.0),
            ..self
        }
    }
}

fn lighten_channel(channel: f32, amount: f32) -> f32 {
    channel + (1.0 - channel) * amount
}

/// Input snapshot gathered by adapters before updating the scene.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct FrameInput {
    /// Keys held down during this frame.
    pub held_keys: Vec<Key>,
    /// Keys that went down during this frame.
    pub pressed_keys: Vec<Key>,
}

impl FrameInput {
    /// Reports whether `key` went down during this frame.
    #[must_use]
    pub fn pressed(&self, key: Key) -> bool {
        self.pressed_keys.contains(&key)
    }
}

/// Outline drawn for an entity, in screen pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Shape {
    /// Filled circle.
    Circle {
        /// Radius in pixels.
        radius: f32,
    },
    /// Filled rectangle centred on the sprite position.
    Rect {
        /// Half of the width and height in pixels.
        half_extents: Vec2,
    },
}

impl From<Hitbox> for Shape {
    fn from(hitbox: Hitbox) -> Self {
        match hitbox {
            Hitbox::Circle { radius } => Self::Circle { radius },
            Hitbox::Rect { half_extents } => Self::Rect { half_extents },
        }
    }
}

/// One entity drawn as a coloured primitive.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpritePresentation {
    /// Centre of the sprite in screen pixels.
    pub position: Vec2,
    /// Outline of the sprite.
    pub shape: Shape,
    /// Rotation in radians around the centre.
    pub rotation: f32,
    /// Fill color.
    pub color: Color,
}

impl SpritePresentation {
    /// Creates an unrotated sprite.
    #[must_use]
    pub const fn new(position: Vec2, shape: Shape, color: Color) -> Self {
        Self {
            position,
            shape,
            rotation: 0.0,
            color,
        }
    }

    /// Returns the sprite rotated by `rotation` radians.
    #[must_use]
    pub const fn rotated(self, rotation: f32) -> Self {
        Self { rotation, ..self }
    }
}

/// Short text drawn in the play field, such as a combo banner.
#[derive(Clone, Debug, PartialEq)]
pub struct Banner {
    /// Text to draw.
    pub text: String,
    /// Centre of the text in screen pixels.
    pub position: Vec2,
    /// Text color.
    pub color: Color,
}

/// Status of one player shown in the heads-up display.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HudPlayer {
    /// Slot the status belongs to.
    pub slot: PlayerSlot,
    /// Lives remaining.
    pub lives: u8,
    /// Shield strength as a fraction of full.
    pub shield: f32,
    /// Hull hits remaining.
    pub hull_hits: u8,
    /// Weapon fitted.
    pub weapon: WeaponKind,
    /// Time left on a temporary weapon.
    pub weapon_remaining: Duration,
    /// Mines carried.
    pub mine_ammo: u8,
}

/// Heads-up display content.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Hud {
    /// Session score.
    pub score: u64,
    /// Multiplier applied to the next award.
    pub multiplier: u32,
    /// Stage number.
    pub stage: u32,
    /// Wave number within the stage.
    pub wave: u32,
    /// Status of every ship still flying.
    pub players: Vec<HudPlayer>,
    /// Boss health as a fraction of its maximum, while a boss is fighting.
    pub boss_health: Option<f32>,
    /// Frames per second, when the counter is enabled.
    pub fps: Option<u32>,
}

/// Full-screen panel drawn above the play field.
#[derive(Clone, Debug, PartialEq)]
pub enum Overlay {
    /// Pause menu.
    Paused {
        /// Volume bar label for the music.
        music: String,
        /// Volume bar label for sound effects.
        sfx: String,
        /// Player and action waiting for a new key, such as `P1 FIRE`.
        rebinding: Option<String>,
    },
    /// Final results of a session.
    GameOver {
        /// Final score.
        score: u64,
        /// Stage reached.
        stage: u32,
        /// Best scores as `(name, score)` rows.
        high_scores: Vec<(String, u64)>,
    },
    /// Pause between a boss falling and the next stage.
    StageClear {
        /// Stage that was cleared.
        stage: u32,
    },
}

/// Scene description consumed by rendering backends every frame.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    /// Parallax layer set drawn behind the play field.
    pub background: BackgroundSet,
    /// Scroll offsets of the far and near layers in pixels.
    pub scroll: (f32, f32),
    /// Session state the scene was captured in.
    pub state: SessionState,
    /// Entities drawn back to front.
    pub sprites: Vec<SpritePresentation>,
    /// Text drawn inside the play field.
    pub banners: Vec<Banner>,
    /// Offset applied to the whole play field by screen shake.
    pub shake: Vec2,
    /// Full-screen tint, used by the damage overlay.
    pub tint: Option<Color>,
    /// Heads-up display content.
    pub hud: Hud,
    /// Panel drawn above everything else.
    pub overlay: Option<Overlay>,
}

impl Scene {
    /// Creates an empty scene over the provided background.
    #[must_use]
    pub fn new(background: BackgroundSet) -> Self {
        Self {
            background,
            scroll: (0.0, 0.0),
            state: SessionState::Playing,
            sprites: Vec::new(),
            banners: Vec::new(),
            shake: Vec2::ZERO,
            tint: None,
            hud: Hud::default(),
            overlay: None,
        }
    }

    /// Removes every per-frame item while keeping allocations.
    pub fn clear(&mut self) {
        self.sprites.clear();
        self.banners.clear();
        self.shake = Vec2::ZERO;
        self.tint = None;
        self.hud.players.clear();
        self.hud.boss_health = None;
        self.overlay = None;
    }
}

/// Colours used to draw one background set.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BackgroundPalette {
    /// Color the frame is cleared with.
    pub clear: Color,
    /// Color of the slow, distant layer.
    pub far: Color,
    /// Color of the fast, near layer.
    pub near: Color,
}

/// Palette of a background set.
#[must_use]
pub const fn background_palette(background: BackgroundSet) -> BackgroundPalette {
    match background {
        BackgroundSet::BlueSpace => BackgroundPalette {
            clear: Color::from_rgb_u8(6, 10, 34),
            far: Color::from_rgb_u8(70, 90, 160),
            near: Color::from_rgb_u8(220, 230, 255),
        },
        BackgroundSet::Nebula => BackgroundPalette {
            clear: Color::from_rgb_u8(24, 6, 34),
            far: Color::from_rgb_u8(150, 60, 150),
            near: Color::from_rgb_u8(255, 210, 240),
        },
        BackgroundSet::SpaceShooter => BackgroundPalette {
            clear: Color::from_rgb_u8(4, 4, 8),
            far: Color::from_rgb_u8(90, 90, 90),
            near: Color::from_rgb_u8(255, 255, 255),
        },
    }
}

/// Fill color of a power-up capsule.
#[must_use]
pub const fn power_up_color(kind: PowerUpKind) -> Color {
    match kind {
        PowerUpKind::DoubleShot => Color::from_rgb_u8(80, 200, 255),
        PowerUpKind::TripleShot => Color::from_rgb_u8(60, 120, 255),
        PowerUpKind::Laser => Color::from_rgb_u8(255, 60, 200),
        PowerUpKind::MineAmmo => Color::from_rgb_u8(255, 160, 40),
        PowerUpKind::ShieldRestore => Color::from_rgb_u8(80, 255, 140),
        PowerUpKind::ExtraLife => Color::from_rgb_u8(255, 80, 80),
        PowerUpKind::Invincibility => Color::from_rgb_u8(255, 230, 60),
    }
}

/// Fill color of a projectile fired by `owner`.
#[must_use]
pub const fn projectile_color(owner: ProjectileOwner) -> Color {
    match owner {
        ProjectileOwner::Player(_) => Color::from_rgb_u8(120, 240, 255),
        ProjectileOwner::Enemy => Color::from_rgb_u8(255, 110, 60),
        ProjectileOwner::Boss => Color::from_rgb_u8(255, 40, 90),
    }
}

/// Presentation descriptor consumed by rendering backends.
#[derive(Clone, Debug, PartialEq)]
pub struct Presentation {
    /// Title used by the created window.
    pub window_title: String,
    /// Logical width of the play field in pixels.
    pub width: f32,
    /// Logical height of the play field in pixels.
    pub height: f32,
    /// Scene content that should be displayed first.
    pub scene: Scene,
}

impl Presentation {
    /// Constructs a new presentation descriptor.
    pub fn new<T>(window_title: T, width: f32, height: f32, scene: Scene) -> Result<Self, RenderingError>
    where
        T: Into<String>,
    {
        if !(width > 0.0 && height > 0.0) {
            return Err(RenderingError::InvalidDimensions { width, height });
        }
        Ok(Self {
            window_title: window_title.into(),
            width,
            height,
            scene,
        })
    }
}

/// Rendering backend capable of presenting Nova Strike scenes.
pub trait RenderingBackend {
    /// Runs the rendering backend until it is requested to exit.
    ///
    /// The provided `update_scene` closure receives the frame delta, per-frame
    /// input captured by the adapter, and mutates the scene before it is
    /// rendered. Returning `false` asks the backend to close.
    fn run<F>(self, presentation: Presentation, update_scene: F) -> AnyResult<()>
    where
        F: FnMut(Duration, FrameInput, &mut Scene) -> bool + 'static;
}

/// Errors that can occur when constructing rendering descriptors.
#[derive(Debug, PartialEq)]
pub enum RenderingError {
    /// The play field must have a positive size.
    InvalidDimensions {
        /// Provided width.
        width: f32,
        /// Provided height.
        height: f32,
    },
}

impl fmt::Display for RenderingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidDimensions { width, height } => {
                write!(
                    f,
                    "play field must have a positive size (received {width}x{height})"
                )
            }
        }
    }
}

impl Error for RenderingError {}
