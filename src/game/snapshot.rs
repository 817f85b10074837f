//! Persisted Game Snapshot
//!
//! The shape a game is saved in between sessions:
//!
//! ```json
//! { "grid": { "size": 4, "cells": [[{"x":0,"y":0,"value":"p"}, null, ...], ...] },
//!   "score": 12, "over": false, "won": false, "keepPlaying": false }
//! ```
//!
//! `cells` is indexed `[x][y]`. Tile IDs and move lineage are not saved;
//! restoring assigns fresh IDs.

use serde::{Serialize, Deserialize};
use thiserror::Error;

use crate::config::MAX_GRID_SIZE;
use crate::core::position::Position;
use crate::game::element::Element;
use crate::game::state::GameState;

/// A saved tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileSnapshot {
    /// Column
    pub x: i32,
    /// Row
    pub y: i32,
    /// Element label
    pub value: Element,
}

/// A saved grid.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridSnapshot {
    /// Side length
    pub size: usize,
    /// Cells indexed `[x][y]`
    pub cells: Vec<Vec<Option<TileSnapshot>>>,
}

/// A saved game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSnapshot {
    /// Board
    pub grid: GridSnapshot,
    /// Score
    pub score: u64,
    /// Game lost
    pub over: bool,
    /// Game won
    pub won: bool,
    /// Continuing past a win
    pub keep_playing: bool,
}

/// Snapshot that cannot be restored.
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// Not valid JSON, or not the expected shape.
    #[error("snapshot decode failed: {0}")]
    Json(#[from] serde_json::Error),

    /// Grid size outside the playable range.
    #[error("snapshot grid size {0} is not playable")]
    BadSize(usize),

    /// Cell array dimensions disagree with the declared size.
    #[error("snapshot cells do not form a {0}x{0} grid")]
    ShapeMismatch(usize),

    /// A tile's own coordinates disagree with the cell holding it.
    #[error("tile at cell ({x}, {y}) claims position ({tile_x}, {tile_y})")]
    PositionMismatch {
        /// Cell column
        x: usize,
        /// Cell row
        y: usize,
        /// Tile's recorded column
        tile_x: i32,
        /// Tile's recorded row
        tile_y: i32,
    },
}

impl GameSnapshot {
    /// Capture a game.
    pub fn capture(state: &GameState) -> Self {
        let size = state.grid.size();
        let cells = (0..size)
            .map(|x| {
                (0..size)
                    .map(|y| {
                        state
                            .grid
                            .cell_content(Position::new(x as i32, y as i32))
                            .map(|tile| TileSnapshot {
                                x: tile.position.x,
                                y: tile.position.y,
                                value: tile.value,
                            })
                    })
                    .collect()
            })
            .collect();

        Self {
            grid: GridSnapshot { size, cells },
            score: state.score,
            over: state.over,
            won: state.won,
            keep_playing: state.keep_playing,
        }
    }

    /// Check that the snapshot describes a consistent board.
    pub fn validate(&self) -> Result<(), SnapshotError> {
        let size = self.grid.size;
        if !(2..=MAX_GRID_SIZE).contains(&size) {
            return Err(SnapshotError::BadSize(size));
        }
        if self.grid.cells.len() != size || self.grid.cells.iter().any(|col| col.len() != size) {
            return Err(SnapshotError::ShapeMismatch(size));
        }
        for (x, column) in self.grid.cells.iter().enumerate() {
            for (y, cell) in column.iter().enumerate() {
                if let Some(tile) = cell {
                    if tile.x != x as i32 || tile.y != y as i32 {
                        return Err(SnapshotError::PositionMismatch {
                            x,
                            y,
                            tile_x: tile.x,
                            tile_y: tile.y,
                        });
                    }
                }
            }
        }
        Ok(())
    }

    /// Rebuild a game from this snapshot.
    pub fn restore(&self, difficulty: f64) -> Result<GameState, SnapshotError> {
        self.validate()?;

        let mut state = GameState::new(self.grid.size, difficulty);
        for tile in self.grid.cells.iter().flatten().flatten() {
            state.spawn_tile(Position::new(tile.x, tile.y), tile.value);
        }
        state.score = self.score;
        state.over = self.over;
        state.won = self.won;
        state.keep_playing = self.keep_playing;
        Ok(state)
    }

    /// Serialize to JSON string.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Deserialize from JSON string.
    pub fn from_json(s: &str) -> Result<Self, SnapshotError> {
        Ok(serde_json::from_str(s)?)
    }
}
