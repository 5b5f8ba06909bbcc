#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that boots Nova Strike.

mod config;
mod scene;
mod session;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use nova_strike_core::{
    tuning::{SCREEN_HEIGHT, SCREEN_WIDTH},
    BackgroundSet, WELCOME_BANNER,
};
use nova_strike_rendering::{Presentation, RenderingBackend, Scene};
use nova_strike_rendering_macroquad::MacroquadBackend;
use nova_strike_storage::FileStore;
use nova_strike_system_simulation::{Config, Simulation};
use tracing::info;

use crate::{config::GameConfig, session::App};

#[derive(Debug, Parser)]
#[command(name = "nova-strike")]
#[command(about = "Vertical-scrolling arcade space shooter")]
struct Args {
    /// Number of ships to fly, one or two.
    #[arg(short, long)]
    players: Option<u8>,

    /// Seed for spawn positions, enemy aim and power-up drops.
    #[arg(short, long)]
    seed: Option<u64>,

    /// Optional TOML file overriding players, seed, name and stages.
    #[arg(short, long, default_value = "nova-strike.toml")]
    config: PathBuf,

    /// Directory holding high scores and saved settings.
    #[arg(long, default_value = ".nova-strike")]
    settings_dir: PathBuf,

    /// Synchronise presentation with the display refresh rate.
    #[arg(long, action = ArgAction::Set, default_value_t = true)]
    vsync: bool,

    /// Draw a frames-per-second counter.
    #[arg(long)]
    show_fps: bool,
}

impl Args {
    /// Player count and seed, preferring flags over the config file.
    fn session(&self, game: &GameConfig) -> (u8, Option<u64>) {
        (self.players.unwrap_or(game.players), self.seed.or(game.seed))
    }
}

/// Entry point for the Nova Strike command-line interface.
fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::filter::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let game = GameConfig::load(&args.config);
    let (players, seed) = args.session(&game);
    let seed = seed.unwrap_or_else(rand::random::<u64>);
    info!(players, seed, "{WELCOME_BANNER}");

    let store = FileStore::open(&args.settings_dir).with_context(|| {
        format!(
            "failed to open settings directory {}",
            args.settings_dir.display()
        )
    })?;

    let simulation = Simulation::new(Config::new(players, seed, game.stage_table()));
    let mut app = App::new(simulation, store, game.player_name);

    let presentation = Presentation::new(
        "Nova Strike",
        SCREEN_WIDTH,
        SCREEN_HEIGHT,
        Scene::new(BackgroundSet::BlueSpace),
    )?;

    MacroquadBackend::new()
        .with_vsync(args.vsync)
        .with_show_fps(args.show_fps)
        .run(presentation, move |dt, input, scene| {
            app.frame(dt, &input, scene)
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use nova_strike_core::StageTable;

    #[test]
    fn flags_default_to_config_file_and_vsync() {
        let args = Args::try_parse_from(["nova-strike"]).expect("parse defaults");
        assert_eq!(args.players, None);
        assert_eq!(args.seed, None);
        assert_eq!(args.config, PathBuf::from("nova-strike.toml"));
        assert_eq!(args.settings_dir, PathBuf::from(".nova-strike"));
        assert!(args.vsync);
        assert!(!args.show_fps);

        let game = GameConfig::default();
        assert_eq!(args.session(&game), (1, None));
        assert_eq!(game.stage_table(), StageTable::standard());
    }

    #[test]
    fn players_and_seed_flags_override_the_config_file() {
        let args = Args::try_parse_from([
            "nova-strike",
            "--players",
            "2",
            "--seed",
            "9",
            "--vsync",
            "false",
        ])
        .expect("parse flags");
        assert!(!args.vsync);

        let game = GameConfig {
            players: 1,
            seed: Some(4),
            ..GameConfig::default()
        };
        assert_eq!(args.session(&game), (2, Some(9)));
    }

    #[test]
    fn config_file_fills_in_missing_flags() {
        let args = Args::try_parse_from(["nova-strike", "-s", "7"]).expect("parse short seed");
        let game = GameConfig {
            players: 2,
            seed: Some(4),
            ..GameConfig::default()
        };
        assert_eq!(args.session(&game), (2, Some(7)));
    }

    #[test]
    fn malformed_player_count_is_rejected() {
        assert!(Args::try_parse_from(["nova-strike", "--players", "two"]).is_err());
    }
}
