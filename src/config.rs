//! Puzzle configuration, optionally read from TOML.

use serde::Deserialize;

use crate::error::{ClockError, Result};

pub const MAX_MOVES: u32 = 64;

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct PuzzleConfig {
    /// Scramble length, which is also the number of hints to follow.
    pub num_moves: u32,
    /// Apply serial-driven modifications to each manual instruction.
    pub modifications: bool,
    /// Fixed RNG seed. Absent means fresh OS entropy per puzzle.
    pub seed: Option<u64>,
    pub animation: AnimationConfig,
}

impl Default for PuzzleConfig {
    fn default() -> Self {
        PuzzleConfig {
            num_moves: 5,
            modifications: true,
            seed: None,
            animation: AnimationConfig::default(),
        }
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct AnimationConfig {
    /// Per hour of gear turn.
    pub gear_step_ms: u64,
    pub pin_ms: u64,
    pub flip_ms: u64,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        AnimationConfig {
            gear_step_ms: 120,
            pin_ms: 150,
            flip_ms: 600,
        }
    }
}

impl PuzzleConfig {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: PuzzleConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.num_moves == 0 || self.num_moves > MAX_MOVES {
            return Err(ClockError::InvalidConfig(format!(
                "num_moves must be between 1 and {MAX_MOVES}, got {}",
                self.num_moves
            )));
        }
        Ok(())
    }
}
