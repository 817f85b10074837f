//! Game Grid
//!
//! Fixed-size square board of optional tiles.
//!
//! Cells are stored column-major (`x` outer, `y` inner). Every query that
//! yields cells in sequence uses this same order, which keeps random picks
//! reproducible for a given seed.

use std::fmt;

use crate::core::position::Position;
use crate::core::rng::RandomSource;
use crate::game::tile::Tile;

/// The board.
///
/// Invariant: a tile stored at a cell has `position` equal to that cell.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    size: usize,
    cells: Vec<Option<Tile>>,
}

impl Grid {
    /// Create an empty `size` x `size` grid.
    pub fn new(size: usize) -> Self {
        Self {
            size,
            cells: vec![None; size * size],
        }
    }

    /// Side length.
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    #[inline]
    fn index(&self, position: Position) -> Option<usize> {
        if self.within_bounds(position) {
            Some(position.x as usize * self.size + position.y as usize)
        } else {
            None
        }
    }

    #[inline]
    fn position_of(&self, index: usize) -> Position {
        Position::new((index / self.size) as i32, (index % self.size) as i32)
    }

    /// Whether `position` lies on the board.
    #[inline]
    pub fn within_bounds(&self, position: Position) -> bool {
        let n = self.size as i32;
        position.x >= 0 && position.x < n && position.y >= 0 && position.y < n
    }

    /// Whether any cell is empty.
    pub fn cells_available(&self) -> bool {
        self.cells.iter().any(Option::is_none)
    }

    /// All empty cells, in grid order.
    pub fn available_cells(&self) -> Vec<Position> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| cell.is_none())
            .map(|(i, _)| self.position_of(i))
            .collect()
    }

    /// Pick an empty cell uniformly. `None` when the board is full.
    pub fn random_available_cell<R: RandomSource + ?Sized>(&self, rng: &mut R) -> Option<Position> {
        let cells = self.available_cells();
        if cells.is_empty() {
            return None;
        }
        cells.get(rng.next_index(cells.len())).copied()
    }

    /// Whether `position` is on the board and empty.
    #[inline]
    pub fn cell_available(&self, position: Position) -> bool {
        self.index(position).is_some_and(|i| self.cells[i].is_none())
    }

    /// Tile at `position`. `None` for empty or off-board cells.
    #[inline]
    pub fn cell_content(&self, position: Position) -> Option<&Tile> {
        self.index(position).and_then(|i| self.cells[i].as_ref())
    }

    /// Mutable tile at `position`.
    #[inline]
    pub fn cell_content_mut(&mut self, position: Position) -> Option<&mut Tile> {
        let index = self.index(position)?;
        self.cells[index].as_mut()
    }

    /// Place `tile` at its own position, replacing whatever was there.
    pub fn insert_tile(&mut self, tile: Tile) {
        debug_assert!(self.within_bounds(tile.position), "tile at {:?} is off the board", tile.position);
        if let Some(index) = self.index(tile.position) {
            self.cells[index] = Some(tile);
        }
    }

    /// Clear the cell at `position`, returning its tile.
    pub fn remove_tile(&mut self, position: Position) -> Option<Tile> {
        let index = self.index(position)?;
        self.cells[index].take()
    }

    /// Move the tile at `from` to the empty cell `to`, keeping its own
    /// coordinate in step. No-op when `from == to`.
    pub fn move_tile(&mut self, from: Position, to: Position) {
        if from == to {
            return;
        }
        if let Some(mut tile) = self.remove_tile(from) {
            tile.update_position(to);
            self.insert_tile(tile);
        }
    }

    /// Every cell exactly once, in grid order.
    pub fn each_cell(&self) -> impl Iterator<Item = (Position, Option<&Tile>)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(|(i, cell)| (self.position_of(i), cell.as_ref()))
    }

    /// All tiles, in grid order.
    pub fn tiles(&self) -> impl Iterator<Item = &Tile> + '_ {
        self.cells.iter().flatten()
    }

    /// All tiles, mutably, in grid order.
    pub fn tiles_mut(&mut self) -> impl Iterator<Item = &mut Tile> + '_ {
        self.cells.iter_mut().flatten()
    }

    /// Number of occupied cells.
    pub fn tile_count(&self) -> usize {
        self.tiles().count()
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let n = self.size as i32;
        let rule = "-".repeat((self.size * 6).saturating_sub(1));
        for y in 0..n {
            if y > 0 {
                writeln!(f, "{rule}")?;
            }
            let row: Vec<String> = (0..n)
                .map(|x| match self.cell_content(Position::new(x, y)) {
                    Some(tile) => format!("{:^5}", tile.value.label()),
                    None => format!("{:^5}", "."),
                })
                .collect();
            writeln!(f, "{}", row.join("|"))?;
        }
        Ok(())
    }
}
