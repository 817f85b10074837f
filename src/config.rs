//! Game Configuration
//!
//! Everything about a game that is fixed when it starts. Difficulty is not
//! here: it comes from a [`DifficultySource`](crate::session::DifficultySource)
//! and is re-read on every setup.

use thiserror::Error;

use crate::game::element::Element;
use crate::{DEFAULT_GRID_SIZE, DEFAULT_START_TILES};

/// Configuration for a game session.
#[derive(Debug, Clone, PartialEq)]
pub struct GameConfig {
    /// Side length of the square grid
    pub size: usize,
    /// Tiles placed on a fresh board
    pub start_tiles: usize,
    /// Producing this element wins the game
    pub win_value: Element,
    /// Common spawn value
    pub base_value: Element,
    /// Rare spawn value
    pub rare_value: Element,
    /// Probability that a spawn is `rare_value` instead of `base_value`
    pub rare_spawn_chance: f64,
    /// RNG seed for the session
    pub seed: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            size: DEFAULT_GRID_SIZE,
            start_tiles: DEFAULT_START_TILES,
            win_value: Element::Iron56,
            base_value: Element::Proton,
            rare_value: Element::Deuterium,
            rare_spawn_chance: 0.01,
            seed: 0,
        }
    }
}

/// Invalid configuration.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// Grid too small to play on.
    #[error("grid size must be at least 2, got {0}")]
    GridTooSmall(usize),

    /// Grid too large for signed cell coordinates.
    #[error("grid size {0} is too large")]
    GridTooLarge(usize),

    /// More start tiles than cells.
    #[error("{start_tiles} start tiles do not fit on a {size}x{size} grid")]
    TooManyStartTiles {
        /// Requested start tiles
        start_tiles: usize,
        /// Grid side length
        size: usize,
    },

    /// Probability outside [0, 1].
    #[error("rare spawn chance must be within [0, 1], got {0}")]
    InvalidSpawnChance(f64),
}

/// Largest grid accepted.
pub const MAX_GRID_SIZE: usize = 64;

impl GameConfig {
    /// Default configuration with a specific seed.
    pub fn with_seed(seed: u64) -> Self {
        Self { seed, ..Self::default() }
    }

    /// Check the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.size < 2 {
            return Err(ConfigError::GridTooSmall(self.size));
        }
        if self.size > MAX_GRID_SIZE {
            return Err(ConfigError::GridTooLarge(self.size));
        }
        if self.start_tiles > self.size * self.size {
            return Err(ConfigError::TooManyStartTiles {
                start_tiles: self.start_tiles,
                size: self.size,
            });
        }
        if !(0.0..=1.0).contains(&self.rare_spawn_chance) {
            return Err(ConfigError::InvalidSpawnChance(self.rare_spawn_chance));
        }
        Ok(())
    }
}
