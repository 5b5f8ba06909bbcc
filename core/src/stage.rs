use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    tuning::{MAX_STAGE_DIFFICULTY, MIN_STAGE_DIFFICULTY},
    EnemyKind,
};

/// Parallax layer set drawn behind a stage.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BackgroundSet {
    /// Deep blue starfield.
    BlueSpace,
    /// Coloured gas clouds.
    Nebula,
    /// Dense starfield with drifting props.
    SpaceShooter,
}

/// One timed batch of enemy spawns.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WaveDefinition {
    /// Enemy kinds the wave picks from uniformly at random.
    pub enemy_kinds: Vec<EnemyKind>,
    /// Number of enemies the wave spawns.
    pub enemy_count: u32,
    /// Accumulated time required between consecutive spawns.
    #[serde(rename = "spawn_interval_ms", with = "millis")]
    pub spawn_interval: Duration,
    /// Whether every third spawn also brings an asteroid.
    pub include_asteroids: bool,
    /// Upper bound on asteroids seeded during the wave; zero leaves it
    /// unbounded.
    #[serde(default)]
    pub asteroid_count: u32,
}

impl WaveDefinition {
    /// Creates a wave definition.
    #[must_use]
    pub fn new(
        enemy_kinds: &[u8],
        enemy_count: u32,
        spawn_interval: Duration,
        asteroid_count: Option<u32>,
    ) -> Self {
        Self {
            enemy_kinds: enemy_kinds.iter().copied().map(EnemyKind::new).collect(),
            enemy_count,
            spawn_interval,
            include_asteroids: asteroid_count.is_some(),
            asteroid_count: asteroid_count.unwrap_or(0),
        }
    }
}

/// Ordered waves followed by a boss encounter.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StageDefinition {
    /// Waves played in order before the boss appears.
    pub waves: Vec<WaveDefinition>,
    /// Multiplier applied to every enemy spawned during the stage.
    pub difficulty: f32,
    /// Stage identifier reported when the boss is triggered.
    pub boss_stage: u32,
    /// Background drawn during the stage.
    pub background: BackgroundSet,
}

/// Static list of stages played in sequence.
///
/// Stage numbers are one-based and wrap around the table, so play continues
/// indefinitely after the final entry.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StageTable {
    stages: Vec<StageDefinition>,
}

impl StageTable {
    /// Builds a table from custom stages after validating them.
    pub fn new(stages: Vec<StageDefinition>) -> Result<Self, StageTableError> {
        let table = Self { stages };
        table.validate()?;
        Ok(table)
    }

    /// Stage table shipped with the game.
    #[must_use]
    pub fn standard() -> Self {
        let ms = Duration::from_millis;
        let all: &[u8] = &[0, 1, 2, 3, 4, 5, 6, 7];
        Self {
            stages: vec![
                StageDefinition {
                    waves: vec![
                        WaveDefinition::new(&[0], 4, ms(1200), Some(2)),
                        WaveDefinition::new(&[0, 1], 6, ms(1000), Some(3)),
                        WaveDefinition::new(&[0, 1, 2], 8, ms(900), None),
                        WaveDefinition::new(&[1, 2], 6, ms(800), Some(4)),
                    ],
                    difficulty: 1.0,
                    boss_stage: 1,
                    background: BackgroundSet::BlueSpace,
                },
                StageDefinition {
                    waves: vec![
                        WaveDefinition::new(&[0, 3, 4], 6, ms(1000), Some(3)),
                        WaveDefinition::new(&[1, 2, 5], 8, ms(900), None),
                        WaveDefinition::new(&[3, 4, 5, 6], 10, ms(800), Some(4)),
                        WaveDefinition::new(&[2, 5, 6, 7], 8, ms(700), Some(5)),
                        WaveDefinition::new(&[0, 1, 2, 3], 12, ms(700), None),
                    ],
                    difficulty: 1.3,
                    boss_stage: 2,
                    background: BackgroundSet::Nebula,
                },
                StageDefinition {
                    waves: vec![
                        WaveDefinition::new(all, 8, ms(900), Some(4)),
                        WaveDefinition::new(&[5, 6, 7], 10, ms(700), Some(5)),
                        WaveDefinition::new(&[2, 4, 6, 7], 12, ms(600), None),
                        WaveDefinition::new(all, 14, ms(600), Some(6)),
                        WaveDefinition::new(&[5, 6, 7], 10, ms(500), Some(4)),
                        WaveDefinition::new(&[3, 4, 5, 6, 7], 16, ms(500), None),
                    ],
                    difficulty: 1.6,
                    boss_stage: 3,
                    background: BackgroundSet::SpaceShooter,
                },
            ],
        }
    }

    /// Checks that every stage can be played to completion.
    pub fn validate(&self) -> Result<(), StageTableError> {
        if self.stages.is_empty() {
            return Err(StageTableError::Empty);
        }
        for (index, stage) in self.stages.iter().enumerate() {
            let stage_number = index + 1;
            if stage.waves.is_empty() {
                return Err(StageTableError::NoWaves {
                    stage: stage_number,
                });
            }
            if !(MIN_STAGE_DIFFICULTY..=MAX_STAGE_DIFFICULTY).contains(&stage.difficulty) {
                return Err(StageTableError::InvalidDifficulty {
                    stage: stage_number,
                });
            }
            for (wave_index, wave) in stage.waves.iter().enumerate() {
                let wave_number = wave_index + 1;
                if wave.enemy_kinds.is_empty() {
                    return Err(StageTableError::EmptyEnemyPool {
                        stage: stage_number,
                        wave: wave_number,
                    });
                }
                if wave.enemy_count == 0 {
                    return Err(StageTableError::NoEnemies {
                        stage: stage_number,
                        wave: wave_number,
                    });
                }
                if wave.spawn_interval.is_zero() {
                    return Err(StageTableError::ZeroSpawnInterval {
                        stage: stage_number,
                        wave: wave_number,
                    });
                }
            }
        }
        Ok(())
    }

    /// Definition for a one-based stage number, wrapping past the end.
    #[must_use]
    pub fn stage(&self, stage: u32) -> Option<&StageDefinition> {
        if self.stages.is_empty() {
            return None;
        }
        let index = stage.saturating_sub(1) as usize % self.stages.len();
        self.stages.get(index)
    }

    /// Number of distinct stages before the table wraps.
    #[must_use]
    pub fn len(&self) -> usize {
        self.stages.len()
    }

    /// Reports whether the table holds no stages.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }
}

impl Default for StageTable {
    fn default() -> Self {
        Self::standard()
    }
}

/// Reasons a custom stage table is rejected.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StageTableError {
    /// The table holds no stages.
    #[error("stage table must contain at least one stage")]
    Empty,
    /// A stage holds no waves.
    #[error("stage {stage} must contain at least one wave")]
    NoWaves {
        /// One-based stage number.
        stage: usize,
    },
    /// A stage difficulty multiplier lies outside the playable range.
    #[error("stage {stage} must use a difficulty multiplier between 0.1 and 10")]
    InvalidDifficulty {
        /// One-based stage number.
        stage: usize,
    },
    /// A wave has no enemy kinds to pick from.
    #[error("stage {stage} wave {wave} must list at least one enemy kind")]
    EmptyEnemyPool {
        /// One-based stage number.
        stage: usize,
        /// One-based wave number.
        wave: usize,
    },
    /// A wave spawns no enemies and could never be cleared by play.
    #[error("stage {stage} wave {wave} must spawn at least one enemy")]
    NoEnemies {
        /// One-based stage number.
        stage: usize,
        /// One-based wave number.
        wave: usize,
    },
    /// A wave uses a zero spawn interval.
    #[error("stage {stage} wave {wave} must use a positive spawn interval")]
    ZeroSpawnInterval {
        /// One-based stage number.
        stage: usize,
        /// One-based wave number.
        wave: usize,
    },
}

/// Entity the director asks the simulation to create.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SpawnRequest {
    /// A regular enemy ship.
    Enemy {
        /// Definition row describing the enemy.
        kind: EnemyKind,
        /// Multiplier applied to the enemy's statistics.
        difficulty: f32,
    },
    /// An asteroid of random size.
    Asteroid,
}

/// Phase changes and spawn requests produced by the stage director.
#[derive(Clone, Debug, PartialEq)]
pub enum StageEvent {
    /// A new stage begins after the transition delay.
    StageStart {
        /// One-based stage number.
        stage: u32,
    },
    /// A wave begins spawning.
    WaveStart {
        /// One-based wave number within the stage.
        wave: u32,
    },
    /// Entities to create this tick.
    Spawn {
        /// Requests in creation order.
        requests: Vec<SpawnRequest>,
    },
    /// Every wave was cleared and the boss should appear.
    BossStart {
        /// Boss identifier of the stage.
        boss_stage: u32,
    },
}

mod millis {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub(super) fn serialize<S>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u64(u64::try_from(value.as_millis()).unwrap_or(u64::MAX))
    }

    pub(super) fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}
