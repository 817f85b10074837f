//! Game State Definitions
//!
//! Grid, score and status flags for one game, plus the helpers the move
//! resolver and the session share: spawning, mobility checks, hashing.

use crate::config::GameConfig;
use crate::core::hash::{Fingerprint, StateHash};
use crate::core::position::{Position, Vector};
use crate::core::rng::RandomSource;
use crate::game::element::Element;
use crate::game::events::GameEvent;
use crate::game::grid::Grid;
use crate::game::reaction::ReactionTable;
use crate::game::tile::{Tile, TileId};

/// Clamp a difficulty into [0, 1]. NaN counts as 0.
pub fn clamp_difficulty(difficulty: f64) -> f64 {
    if difficulty.is_nan() {
        0.0
    } else {
        difficulty.clamp(0.0, 1.0)
    }
}

/// Complete state of a game.
#[derive(Clone, Debug)]
pub struct GameState {
    /// The board
    pub grid: Grid,

    /// Accumulated score
    pub score: u64,

    /// Game lost
    pub over: bool,

    /// Winning element produced at least once
    pub won: bool,

    /// Player chose to continue after winning
    pub keep_playing: bool,

    /// Chance in [0, 1] that a proton pair fails to fuse
    pub difficulty: f64,

    /// Moves resolved so far (not persisted)
    pub turn: u32,

    /// Next tile ID (monotonic counter)
    next_tile_id: u32,

    /// Events generated this move (cleared each move)
    pending_events: Vec<GameEvent>,
}

impl GameState {
    /// Create an empty game on a `size` x `size` grid.
    pub fn new(size: usize, difficulty: f64) -> Self {
        Self {
            grid: Grid::new(size),
            score: 0,
            over: false,
            won: false,
            keep_playing: false,
            difficulty: clamp_difficulty(difficulty),
            turn: 0,
            next_tile_id: 0,
            pending_events: Vec::new(),
        }
    }

    /// Create a fresh game with its start tiles already placed.
    pub fn fresh<R: RandomSource + ?Sized>(config: &GameConfig, difficulty: f64, rng: &mut R) -> Self {
        let mut state = Self::new(config.size, difficulty);
        state.add_start_tiles(config, rng);
        state
    }

    /// Lost, or won without electing to keep playing.
    #[inline]
    pub fn is_terminated(&self) -> bool {
        self.over || (self.won && !self.keep_playing)
    }

    /// Allocate a tile ID.
    fn next_tile_id(&mut self) -> TileId {
        let id = TileId(self.next_tile_id);
        self.next_tile_id += 1;
        id
    }

    /// Place a new tile at `position`.
    pub fn spawn_tile(&mut self, position: Position, value: Element) -> TileId {
        let id = self.next_tile_id();
        self.grid.insert_tile(Tile::new(id, position, value));
        id
    }

    /// Spawn the regular random tile: rare value with
    /// `config.rare_spawn_chance`, base value otherwise, at a uniformly chosen
    /// empty cell. The value is drawn before the cell.
    ///
    /// Returns `None` without drawing a cell when the board is full.
    pub fn add_random_tile<R: RandomSource + ?Sized>(
        &mut self,
        config: &GameConfig,
        rng: &mut R,
    ) -> Option<(Position, Element, TileId)> {
        if !self.grid.cells_available() {
            return None;
        }
        let value = if rng.next_unit() < 1.0 - config.rare_spawn_chance {
            config.base_value
        } else {
            config.rare_value
        };
        let position = self.grid.random_available_cell(rng)?;
        let id = self.spawn_tile(position, value);
        self.push_event(GameEvent::tile_spawned(self.turn, position, value, id));
        Some((position, value, id))
    }

    /// Seed a fresh board.
    pub fn add_start_tiles<R: RandomSource + ?Sized>(&mut self, config: &GameConfig, rng: &mut R) {
        for _ in 0..config.start_tiles {
            self.add_random_tile(config, rng);
        }
    }

    /// Start-of-move bookkeeping: forget last move's merges and remember
    /// where every tile starts.
    pub fn prepare_tiles(&mut self) {
        for tile in self.grid.tiles_mut() {
            tile.merged_from = None;
            tile.save_position();
        }
    }

    /// Whether any move can still change the board.
    pub fn moves_available(&self, reactions: &ReactionTable) -> bool {
        self.grid.cells_available() || self.tile_matches_available(reactions)
    }

    /// Whether any two orthogonal neighbours can fuse.
    pub fn tile_matches_available(&self, reactions: &ReactionTable) -> bool {
        self.grid.tiles().any(|tile| {
            Vector::ALL.iter().any(|&v| {
                self.grid
                    .cell_content(tile.position.step(v))
                    .is_some_and(|other| reactions.can_react(tile.value, other.value))
            })
        })
    }

    /// Compute hash of current state for verification.
    pub fn compute_hash(&self) -> StateHash {
        let mut fingerprint = Fingerprint::new();
        fingerprint
            .word(self.grid.size() as u64)
            .word(self.score)
            .flag(self.over)
            .flag(self.won)
            .flag(self.keep_playing)
            .word(self.difficulty.to_bits());

        // Cells in grid order; 0 marks an empty cell
        for (_, tile) in self.grid.each_cell() {
            match tile {
                Some(tile) => fingerprint.byte(1).byte(tile.value as u8),
                None => fingerprint.byte(0),
            };
        }
        fingerprint.finish()
    }

    /// Take pending events (consumes them).
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.pending_events)
    }

    /// Push a game event.
    pub fn push_event(&mut self, event: GameEvent) {
        self.pending_events.push(event);
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::rng::{DeterministicRng, FixedRng};

    fn fill(state: &mut GameState, rows: &[&[Element]]) {
        for (y, row) in rows.iter().enumerate() {
            for (x, &value) in row.iter().enumerate() {
                state.spawn_tile(Position::new(x as i32, y as i32), value);
            }
        }
    }

    #[test]
    fn test_clamp_difficulty() {
        assert_eq!(clamp_difficulty(0.5), 0.5);
        assert_eq!(clamp_difficulty(-1.0), 0.0);
        assert_eq!(clamp_difficulty(3.0), 1.0);
        assert_eq!(clamp_difficulty(f64::NAN), 0.0);
    }

    #[test]
    fn test_fresh_game_has_start_tiles() {
        let config = GameConfig::default();
        let mut rng = DeterministicRng::new(12345);
        let state = GameState::fresh(&config, 0.0, &mut rng);

        assert_eq!(state.grid.tile_count(), 2);
        assert_eq!(state.score, 0);
        assert!(!state.is_terminated());
    }

    #[test]
    fn test_spawn_value_draw() {
        let config = GameConfig::default();

        let mut state = GameState::new(4, 0.0);
        let mut low = FixedRng::new(0.0);
        let (_, value, _) = state.add_random_tile(&config, &mut low).unwrap();
        assert_eq!(value, Element::Proton);

        let mut high = FixedRng::new(0.995);
        let (_, value, _) = state.add_random_tile(&config, &mut high).unwrap();
        assert_eq!(value, Element::Deuterium);
    }

    #[test]
    fn test_spawn_on_full_board_returns_none() {
        let config = GameConfig { size: 2, ..GameConfig::default() };
        let mut state = GameState::new(2, 0.0);
        fill(&mut state, &[&[Element::Proton, Element::Helium3], &[Element::Helium4, Element::Proton]]);

        let mut rng = FixedRng::new(0.0);
        assert!(state.add_random_tile(&config, &mut rng).is_none());
    }

    #[test]
    fn test_tile_ids_are_unique() {
        let mut state = GameState::new(4, 0.0);
        let a = state.spawn_tile(Position::new(0, 0), Element::Proton);
        let b = state.spawn_tile(Position::new(1, 0), Element::Proton);
        assert_ne!(a, b);
    }

    #[test]
    fn test_is_terminated() {
        let mut state = GameState::new(4, 0.0);
        assert!(!state.is_terminated());

        state.won = true;
        assert!(state.is_terminated());

        state.keep_playing = true;
        assert!(!state.is_terminated());

        state.over = true;
        assert!(state.is_terminated());
    }

    #[test]
    fn test_moves_available_full_board_without_reactions() {
        use Element::*;
        let reactions = ReactionTable::builtin();
        let mut state = GameState::new(2, 0.0);
        fill(&mut state, &[&[Proton, Helium3], &[Helium4, Deuterium]]);

        assert!(!state.grid.cells_available());
        assert!(!state.moves_available(reactions));
    }

    #[test]
    fn test_moves_available_full_board_with_reacting_neighbours() {
        use Element::*;
        let reactions = ReactionTable::builtin();
        let mut state = GameState::new(2, 0.0);
        // p next to D fuses to 3He
        fill(&mut state, &[&[Proton, Deuterium], &[Helium4, Helium3]]);

        assert!(state.moves_available(reactions));
    }

    #[test]
    fn test_prepare_tiles_resets_lineage() {
        let mut state = GameState::new(4, 0.0);
        state.spawn_tile(Position::new(2, 2), Element::Proton);
        if let Some(tile) = state.grid.cell_content_mut(Position::new(2, 2)) {
            let record = tile.record();
            tile.merged_from = Some([record, record]);
        }

        state.prepare_tiles();

        let tile = state.grid.cell_content(Position::new(2, 2)).unwrap();
        assert!(tile.merged_from.is_none());
        assert_eq!(tile.previous_position, Some(Position::new(2, 2)));
    }

    #[test]
    fn test_hash_tracks_board() {
        let mut a = GameState::new(4, 0.0);
        let mut b = GameState::new(4, 0.0);
        assert_eq!(a.compute_hash(), b.compute_hash());

        a.spawn_tile(Position::new(0, 0), Element::Proton);
        assert_ne!(a.compute_hash(), b.compute_hash());

        b.spawn_tile(Position::new(0, 0), Element::Proton);
        assert_eq!(a.compute_hash(), b.compute_hash());

        b.score = 2;
        assert_ne!(a.compute_hash(), b.compute_hash());
    }

    #[test]
    fn test_hash_tracks_tile_cell() {
        let mut a = GameState::new(4, 0.0);
        a.spawn_tile(Position::new(0, 0), Element::Helium4);
        let before = a.compute_hash();

        a.grid.move_tile(Position::new(0, 0), Position::new(0, 3));
        assert_ne!(a.compute_hash(), before);

        a.grid.move_tile(Position::new(0, 3), Position::new(0, 0));
        assert_eq!(a.compute_hash(), before);
    }

    #[test]
    fn test_hash_includes_difficulty() {
        let easy = GameState::new(4, 0.0);
        let hard = GameState::new(4, 0.5);
        assert_ne!(easy.compute_hash(), hard.compute_hash());
    }

    #[test]
    fn test_hash_ignores_tile_ids() {
        let mut a = GameState::new(4, 0.0);
        a.spawn_tile(Position::new(0, 0), Element::Proton);
        a.spawn_tile(Position::new(1, 0), Element::Deuterium);

        let mut b = GameState::new(4, 0.0);
        b.spawn_tile(Position::new(1, 0), Element::Deuterium);
        b.spawn_tile(Position::new(0, 0), Element::Proton);

        assert_eq!(a.compute_hash(), b.compute_hash());
    }
}
