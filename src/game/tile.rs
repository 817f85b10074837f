//! Tiles
//!
//! A tile carries one immutable [`Element`] plus the per-move bookkeeping
//! the renderer needs to animate it: where it was before the move, and which
//! two tiles it was fused from.

use serde::{Serialize, Deserialize};

use crate::core::position::Position;
use crate::game::element::Element;

/// Session-unique tile identifier (monotonic counter).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct TileId(pub u32);

/// Value copy of a tile consumed by a merge.
///
/// Kept for animation and auditing only; the tile it describes is gone from
/// the grid once the merge completes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileRecord {
    /// ID of the consumed tile
    pub id: TileId,
    /// Its value
    pub value: Element,
    /// Where it started the move
    pub previous_position: Option<Position>,
    /// Where it ended (the merge cell)
    pub position: Position,
}

/// A game piece on the grid.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Tile {
    /// Unique ID
    pub id: TileId,
    /// Element label
    pub value: Element,
    /// Current cell; always equals the cell that holds this tile
    pub position: Position,
    /// Cell at the start of the current move (None for tiles born this move)
    pub previous_position: Option<Position>,
    /// The pair fused into this tile during the current move
    pub merged_from: Option<[TileRecord; 2]>,
}

impl Tile {
    /// Create a fresh tile.
    pub fn new(id: TileId, position: Position, value: Element) -> Self {
        Self {
            id,
            value,
            position,
            previous_position: None,
            merged_from: None,
        }
    }

    /// Remember the current position as the move's starting point.
    #[inline]
    pub fn save_position(&mut self) {
        self.previous_position = Some(self.position);
    }

    /// Move the tile's own coordinate. The grid cell is updated separately.
    #[inline]
    pub fn update_position(&mut self, position: Position) {
        self.position = position;
    }

    /// Whether this tile was produced by a merge in the current move.
    #[inline]
    pub fn is_merged(&self) -> bool {
        self.merged_from.is_some()
    }

    /// Snapshot this tile for a merge lineage.
    pub fn record(&self) -> TileRecord {
        TileRecord {
            id: self.id,
            value: self.value,
            previous_position: self.previous_position,
            position: self.position,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_and_update_position() {
        let mut tile = Tile::new(TileId(1), Position::new(0, 0), Element::Proton);
        assert_eq!(tile.previous_position, None);

        tile.save_position();
        tile.update_position(Position::new(3, 0));

        assert_eq!(tile.previous_position, Some(Position::new(0, 0)));
        assert_eq!(tile.position, Position::new(3, 0));
    }

    #[test]
    fn test_record_copies_fields() {
        let mut tile = Tile::new(TileId(7), Position::new(1, 2), Element::Helium4);
        tile.save_position();
        let record = tile.record();

        assert_eq!(record.id, TileId(7));
        assert_eq!(record.value, Element::Helium4);
        assert_eq!(record.previous_position, Some(Position::new(1, 2)));
        assert!(!tile.is_merged());
    }
}
