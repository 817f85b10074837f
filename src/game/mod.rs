//! Game Logic Module
//!
//! The rules of the fusion board. Deterministic given a random source.
//!
//! ## Module Structure
//!
//! - `element`: Tile values, from protons to iron
//! - `reaction`: Which pairs fuse, into what, for how many points
//! - `tile`: Tiles with per-move lineage
//! - `grid`: The square board
//! - `input`: Directions and player commands
//! - `state`: Score, flags, spawning and mobility checks
//! - `resolve`: One move, resolved to completion
//! - `events`: What happened during a move
//! - `snapshot`: Persisted game shape

pub mod element;
pub mod reaction;
pub mod tile;
pub mod grid;
pub mod input;
pub mod state;
pub mod resolve;
pub mod events;
pub mod snapshot;

// Re-export key types
pub use element::Element;
pub use reaction::{ElementPair, Reaction, ReactionTable, ReactionTableError};
pub use tile::{Tile, TileId, TileRecord};
pub use grid::Grid;
pub use input::{Command, Direction};
pub use state::{GameState, clamp_difficulty};
pub use resolve::{MoveResult, resolve_move, replay_moves};
pub use events::{GameEvent, GameEventData, GameOverReason};
pub use snapshot::{GameSnapshot, SnapshotError};
