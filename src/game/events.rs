//! Game Events
//!
//! What happened during a move, in the order it happened. The renderer can
//! drive animations and sounds from these; tests use them to audit a move.

use serde::{Serialize, Deserialize};
use crate::core::position::Position;
use crate::game::element::Element;
use crate::game::tile::TileId;

/// Why a game was lost. Each check that can end a game has its own reason,
/// so the exact step that triggered the loss is visible.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameOverReason {
    /// A fusion ejected a byproduct but the board had no free cell for it
    SecondaryOverflow,
    /// A suppressed proton fusion left the board with no legal move
    SuppressedWithoutMoves,
    /// The end-of-move spawn found no free cell
    SpawnOverflow,
    /// No empty cell and no reacting neighbours remain
    NoMovesLeft,
}

/// Game event data.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum GameEventData {
    /// Two tiles fused
    TilesMerged {
        /// Cell holding the product
        position: Position,
        /// Moving tile first, then the tile it hit
        reactants: [Element; 2],
        /// Resulting element
        product: Element,
        /// Id of the new tile
        tile_id: TileId,
        /// Points awarded for this fusion
        points: u32,
        /// Score after the award
        new_score: u64,
    },

    /// A proton pair met but the difficulty gate blocked the fusion
    MergeSuppressed {
        /// Cell the moving tile stopped in
        position: Position,
        /// Gate draw that blocked the fusion
        roll: f64,
    },

    /// A byproduct was ejected onto the board
    SecondarySpawned {
        /// Cell it landed in
        position: Position,
        /// Byproduct element
        value: Element,
        /// Id of the new tile
        tile_id: TileId,
    },

    /// The regular end-of-move (or start-of-game) tile appeared
    TileSpawned {
        /// Cell it landed in
        position: Position,
        /// Spawned element
        value: Element,
        /// Id of the new tile
        tile_id: TileId,
    },

    /// The winning element was produced
    GameWon {
        /// Element that triggered the win
        value: Element,
    },

    /// The game was lost
    GameOver {
        /// Check that ended the game
        reason: GameOverReason,
    },
}

/// A game event with the move it belongs to.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameEvent {
    /// Move number (0 for events raised during setup)
    pub turn: u32,

    /// Event data
    pub data: GameEventData,
}

impl GameEvent {
    /// Create a new event.
    pub fn new(turn: u32, data: GameEventData) -> Self {
        Self { turn, data }
    }

    /// Create tiles merged event.
    pub fn tiles_merged(
        turn: u32,
        position: Position,
        reactants: [Element; 2],
        product: Element,
        tile_id: TileId,
        points: u32,
        new_score: u64,
    ) -> Self {
        Self::new(
            turn,
            GameEventData::TilesMerged {
                position,
                reactants,
                product,
                tile_id,
                points,
                new_score,
            },
        )
    }

    /// Create merge suppressed event.
    pub fn merge_suppressed(turn: u32, position: Position, roll: f64) -> Self {
        Self::new(turn, GameEventData::MergeSuppressed { position, roll })
    }

    /// Create secondary spawned event.
    pub fn secondary_spawned(turn: u32, position: Position, value: Element, tile_id: TileId) -> Self {
        Self::new(turn, GameEventData::SecondarySpawned { position, value, tile_id })
    }

    /// Create tile spawned event.
    pub fn tile_spawned(turn: u32, position: Position, value: Element, tile_id: TileId) -> Self {
        Self::new(turn, GameEventData::TileSpawned { position, value, tile_id })
    }

    /// Create game won event.
    pub fn game_won(turn: u32, value: Element) -> Self {
        Self::new(turn, GameEventData::GameWon { value })
    }

    /// Create game over event.
    pub fn game_over(turn: u32, reason: GameOverReason) -> Self {
        Self::new(turn, GameEventData::GameOver { reason })
    }

    /// Points scored by this event, if it is a merge.
    pub fn points(&self) -> Option<u32> {
        match self.data {
            GameEventData::TilesMerged { points, .. } => Some(points),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_points_only_for_merges() {
        let merged = GameEvent::tiles_merged(
            3,
            Position::new(0, 0),
            [Element::Proton, Element::Proton],
            Element::Deuterium,
            TileId(9),
            2,
            10,
        );
        assert_eq!(merged.points(), Some(2));

        let spawned = GameEvent::tile_spawned(3, Position::new(1, 1), Element::Proton, TileId(10));
        assert_eq!(spawned.points(), None);
    }

    #[test]
    fn test_event_serializes() {
        let event = GameEvent::game_over(12, GameOverReason::SpawnOverflow);
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("SpawnOverflow"));
        let back: GameEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(back, event);
    }
}
