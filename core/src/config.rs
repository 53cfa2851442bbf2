//! Simulation tuning shared by the world and its adapters.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::WorldPoint;

const DEFAULT_ACTIONS_PER_TURN: u32 = 10;
const DEFAULT_HARVEST_MILESTONE: u32 = 30;
const DEFAULT_TILE_LENGTH: u32 = 16;
const DEFAULT_PLAYER_START: WorldPoint = WorldPoint::new(100, 100);
const DEFAULT_SEED: u64 = 0x5eed_f4a2_0b1c_d3e7;

/// Inclusive range the per-turn sunlight and water values are drawn from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EnvironmentRange {
    /// Smallest value a tile may receive.
    pub min: u32,
    /// Largest value a tile may receive.
    pub max: u32,
}

impl Default for EnvironmentRange {
    fn default() -> Self {
        Self { min: 20, max: 50 }
    }
}

/// Tunable parameters of a simulation session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimulationConfig {
    /// Number of actions that make up one turn.
    pub actions_per_turn: u32,
    /// Harvest count that triggers the milestone announcement.
    pub harvest_milestone: u32,
    /// Edge length of a tile in world units; one move covers one tile.
    pub tile_length: u32,
    /// World position the player starts at.
    pub player_start: WorldPoint,
    /// Range of the per-turn sunlight and water values.
    pub environment: EnvironmentRange,
    /// Seed for the default species and weather generators.
    pub seed: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            actions_per_turn: DEFAULT_ACTIONS_PER_TURN,
            harvest_milestone: DEFAULT_HARVEST_MILESTONE,
            tile_length: DEFAULT_TILE_LENGTH,
            player_start: DEFAULT_PLAYER_START,
            environment: EnvironmentRange::default(),
            seed: DEFAULT_SEED,
        }
    }
}

impl SimulationConfig {
    /// Parses and validates a configuration from TOML.
    ///
    /// Missing keys fall back to their defaults.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks the invariants the world relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.actions_per_turn == 0 {
            return Err(ConfigError::ZeroActionsPerTurn);
        }
        if self.harvest_milestone == 0 {
            return Err(ConfigError::ZeroHarvestMilestone);
        }
        if self.tile_length == 0 {
            return Err(ConfigError::ZeroTileLength);
        }
        if self.environment.min > self.environment.max {
            return Err(ConfigError::InvertedEnvironment {
                min: self.environment.min,
                max: self.environment.max,
            });
        }
        Ok(())
    }
}

/// Errors raised while loading or validating a [`SimulationConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A turn must allow at least one action.
    #[error("actions_per_turn must be at least 1")]
    ZeroActionsPerTurn,
    /// The milestone must be reachable.
    #[error("harvest_milestone must be at least 1")]
    ZeroHarvestMilestone,
    /// Tiles must have a positive edge length.
    #[error("tile_length must be at least 1")]
    ZeroTileLength,
    /// The environment range is empty.
    #[error("environment range is inverted: min {min} exceeds max {max}")]
    InvertedEnvironment {
        /// Configured lower bound.
        min: u32,
        /// Configured upper bound.
        max: u32,
    },
    /// The TOML document could not be parsed.
    #[error("failed to parse simulation config: {0}")]
    Parse(#[from] toml::de::Error),
}
