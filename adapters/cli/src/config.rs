//! Run-time configuration loaded from an optional TOML file.
//!
//! Every key is optional: anything missing falls back to the compiled-in
//! defaults, and a file that fails to parse is reported and ignored so a bad
//! edit never prevents the game from starting.

use std::{fs, io, path::Path};

use nova_strike_core::{StageDefinition, StageTable};
use serde::Deserialize;
use tracing::{info, warn};

/// Knobs that shape a session.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub(crate) struct GameConfig {
    /// Number of ships, one or two.
    pub(crate) players: u8,
    /// Seed for every random choice; drawn at startup when absent.
    pub(crate) seed: Option<u64>,
    /// Name recorded in the high-score table.
    pub(crate) player_name: String,
    /// Custom stages replacing the built-in table when non-empty.
    pub(crate) stages: Vec<StageDefinition>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            players: 1,
            seed: None,
            player_name: String::new(),
            stages: Vec::new(),
        }
    }
}

impl GameConfig {
    /// Reads `path`, falling back to the defaults when it is missing or invalid.
    pub(crate) fn load(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(contents) => Self::parse(&contents).unwrap_or_else(|error| {
                warn!(path = %path.display(), %error, "ignoring invalid config");
                Self::default()
            }),
            Err(error) if error.kind() == io::ErrorKind::NotFound => {
                info!(path = %path.display(), "no config file found; using defaults");
                Self::default()
            }
            Err(error) => {
                warn!(path = %path.display(), %error, "failed to read config");
                Self::default()
            }
        }
    }

    fn parse(contents: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }

    /// Stage table to play, validating custom stages.
    pub(crate) fn stage_table(&self) -> StageTable {
        if self.stages.is_empty() {
            return StageTable::standard();
        }
        StageTable::new(self.stages.clone()).unwrap_or_else(|error| {
            warn!(%error, "custom stages rejected; using the built-in table");
            StageTable::standard()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_keys_use_defaults() {
        let config = GameConfig::parse("players = 2\n").expect("valid config");
        assert_eq!(config.players, 2);
        assert_eq!(config.seed, None);
        assert_eq!(config.stage_table(), StageTable::standard());
    }

    #[test]
    fn custom_stages_replace_the_table() {
        let config = GameConfig::parse(
            r#"
            seed = 7

            [[stages]]
            difficulty = 2.0
            boss_stage = 1
            background = "Nebula"

            [[stages.waves]]
            enemy_kinds = [3, 4]
            enemy_count = 6
            spawn_interval_ms = 900
            include_asteroids = true
            "#,
        )
        .expect("valid config");
        assert_eq!(config.seed, Some(7));
        let table = config.stage_table();
        assert_eq!(table.len(), 1);
        let stage = table.stage(1).expect("stage one");
        assert_eq!(stage.waves[0].enemy_count, 6);
    }

    #[test]
    fn invalid_stages_fall_back_to_builtin_table() {
        let config = GameConfig::parse(
            r#"
            [[stages]]
            difficulty = 1.0
            boss_stage = 1
            background = "BlueSpace"
            waves = []
            "#,
        )
        .expect("valid toml");
        assert_eq!(config.stage_table(), StageTable::standard());
    }

    #[test]
    fn missing_file_yields_defaults() {
        let config = GameConfig::load(Path::new("/nonexistent/nova-strike.toml"));
        assert_eq!(config, GameConfig::default());
    }
}
