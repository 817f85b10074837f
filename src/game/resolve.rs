//! Move Resolution
//!
//! One swipe, resolved to completion. Everything that can change the board
//! happens here: sliding, fusion, the proton-pair gate, byproduct ejection,
//! the end-of-move spawn and the loss checks.
//!
//! Random draws happen in a fixed order (gate roll, byproduct cells, spawn
//! value, spawn cell) so a seeded [`RandomSource`] replays a game exactly.

use tracing::{debug, info};
#[cfg(feature = "debug-tracing")]
use tracing::trace;

use crate::config::GameConfig;
use crate::core::position::{Position, Vector};
use crate::core::rng::{DeterministicRng, RandomSource};
use crate::game::element::Element;
use crate::game::events::{GameEvent, GameOverReason};
use crate::game::grid::Grid;
use crate::game::input::Direction;
use crate::game::reaction::{Reaction, ReactionTable};
use crate::game::state::GameState;

/// Result of a move.
#[derive(Debug, Default)]
pub struct MoveResult {
    /// Whether any tile changed cell (and so a new tile was spawned)
    pub moved: bool,
    /// Fusions performed
    pub merges: u32,
    /// Score gained
    pub points: u64,
    /// Events generated this move, in order
    pub events: Vec<GameEvent>,
    /// Game lost after this move
    pub over: bool,
    /// Game won after this move
    pub won: bool,
}

/// Cell visiting order for a move. Each axis runs from the far edge in the
/// direction of travel, so no tile slides past one that has not moved yet.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Traversals {
    x: Vec<i32>,
    y: Vec<i32>,
}

fn build_traversals(size: usize, vector: Vector) -> Traversals {
    let mut x: Vec<i32> = (0..size as i32).collect();
    let mut y: Vec<i32> = (0..size as i32).collect();
    if vector.dx == 1 {
        x.reverse();
    }
    if vector.dy == 1 {
        y.reverse();
    }
    Traversals { x, y }
}

/// Slide from `cell` along `vector` over empty cells. Returns the last empty
/// cell reached and the first blocked (occupied or off-board) cell after it.
fn find_farthest_position(grid: &Grid, cell: Position, vector: Vector) -> (Position, Position) {
    let mut farthest = cell;
    let mut next = cell.step(vector);
    while grid.cell_available(next) {
        farthest = next;
        next = next.step(vector);
    }
    (farthest, next)
}

/// Set the loss flag, recording the first reason only.
fn mark_over(state: &mut GameState, reason: GameOverReason) {
    if !state.over {
        info!(turn = state.turn, score = state.score, ?reason, "Game over");
        let event = GameEvent::game_over(state.turn, reason);
        state.over = true;
        state.push_event(event);
    }
}

/// Resolve one move.
///
/// # Arguments
///
/// * `state` - The game (will be mutated)
/// * `direction` - Swipe direction
/// * `config` - Spawn values and win condition
/// * `reactions` - Fusion rules
/// * `rng` - Source for the gate roll and every spawn
/// * `on_update` - Called with the board after each intermediate step
///   (byproduct ejected, suppressed fusion) and once more at the end
///
/// A terminated game is left untouched and `on_update` is not called.
pub fn resolve_move<R, F>(
    state: &mut GameState,
    direction: Direction,
    config: &GameConfig,
    reactions: &ReactionTable,
    rng: &mut R,
    mut on_update: F,
) -> MoveResult
where
    R: RandomSource + ?Sized,
    F: FnMut(&GameState),
{
    let mut result = MoveResult::default();

    if state.is_terminated() {
        result.over = state.over;
        result.won = state.won;
        return result;
    }

    state.turn += 1;
    let vector = direction.vector();
    let traversals = build_traversals(state.grid.size(), vector);
    let start_score = state.score;
    let mut moved = false;

    state.prepare_tiles();

    for &x in &traversals.x {
        for &y in &traversals.y {
            let cell = Position::new(x, y);
            let Some(value) = state.grid.cell_content(cell).map(|tile| tile.value) else {
                continue;
            };

            let (farthest, next) = find_farthest_position(&state.grid, cell, vector);
            let partner = state
                .grid
                .cell_content(next)
                .filter(|occupant| !occupant.is_merged() && reactions.can_react(value, occupant.value))
                .map(|occupant| occupant.value);

            match partner.and_then(|other| reactions.reaction(value, other).map(|r| (other, r))) {
                Some((other, reaction)) => {
                    if value == config.base_value && other == config.base_value {
                        let roll = rng.next_unit();
                        if roll >= 1.0 - state.difficulty {
                            suppress_merge(state, cell, farthest, next, roll, reactions, &mut moved);
                            on_update(state);
                            continue;
                        }
                    }

                    fuse(state, cell, next, [value, other], reaction, config, rng, &mut on_update);
                    result.merges += 1;
                    moved = true;
                }
                None => {
                    state.grid.move_tile(cell, farthest);
                    if farthest != cell {
                        #[cfg(feature = "debug-tracing")]
                        trace!(from = ?cell, to = ?farthest, %value, "slide");
                        moved = true;
                    }
                }
            }
        }
    }

    if moved && state.add_random_tile(config, rng).is_none() {
        mark_over(state, GameOverReason::SpawnOverflow);
    }

    // Runs even when nothing moved so a frozen board is declared lost
    if !state.moves_available(reactions) {
        mark_over(state, GameOverReason::NoMovesLeft);
    }

    on_update(state);

    result.moved = moved;
    result.points = state.score - start_score;
    result.events = state.take_events();
    result.over = state.over;
    result.won = state.won;

    debug!(
        turn = state.turn,
        %direction,
        moved,
        merges = result.merges,
        score = state.score,
        "Move resolved"
    );

    result
}

/// Fuse the tile at `cell` into its partner at `next`, then eject any
/// byproducts.
#[allow(clippy::too_many_arguments)]
fn fuse<R, F>(
    state: &mut GameState,
    cell: Position,
    next: Position,
    reactants: [Element; 2],
    reaction: &Reaction,
    config: &GameConfig,
    rng: &mut R,
    on_update: &mut F,
) where
    R: RandomSource + ?Sized,
    F: FnMut(&GameState),
{
    let moving = state.grid.remove_tile(cell).map(|mut tile| {
        tile.update_position(next);
        tile.record()
    });
    let target = state.grid.remove_tile(next).map(|tile| tile.record());

    let tile_id = state.spawn_tile(next, reaction.product);
    if let (Some(moving), Some(target), Some(merged)) =
        (moving, target, state.grid.cell_content_mut(next))
    {
        merged.merged_from = Some([moving, target]);
    }

    state.score += u64::from(reaction.points);
    state.push_event(GameEvent::tiles_merged(
        state.turn,
        next,
        reactants,
        reaction.product,
        tile_id,
        reaction.points,
        state.score,
    ));

    for &secondary in &reaction.secondaries {
        match state.grid.random_available_cell(rng) {
            Some(position) => {
                let id = state.spawn_tile(position, secondary);
                state.push_event(GameEvent::secondary_spawned(state.turn, position, secondary, id));
                on_update(state);
            }
            None => mark_over(state, GameOverReason::SecondaryOverflow),
        }
    }

    if reaction.product == config.win_value && !state.won {
        info!(turn = state.turn, score = state.score, "Winning element produced");
        state.won = true;
        state.push_event(GameEvent::game_won(state.turn, reaction.product));
    }
}

/// The gate blocked a proton pair. The tile slides up to its partner
/// unless the board has no legal move left, which ends the game.
fn suppress_merge(
    state: &mut GameState,
    cell: Position,
    farthest: Position,
    next: Position,
    roll: f64,
    reactions: &ReactionTable,
    moved: &mut bool,
) {
    debug!(turn = state.turn, at = ?next, roll, difficulty = state.difficulty, "Fusion suppressed");
    state.push_event(GameEvent::merge_suppressed(state.turn, next, roll));

    if state.moves_available(reactions) {
        state.grid.move_tile(cell, farthest);
        *moved = true;
    } else {
        mark_over(state, GameOverReason::SuppressedWithoutMoves);
    }
}

/// Replay a sequence of moves from a fresh game seeded by `config.seed`.
///
/// Returns the final state and every event raised along the way (setup
/// spawns included). Stops early once the game is terminated.
pub fn replay_moves(
    config: &GameConfig,
    difficulty: f64,
    directions: &[Direction],
) -> (GameState, Vec<GameEvent>) {
    let reactions = ReactionTable::builtin();
    let mut rng = DeterministicRng::new(config.seed);
    let mut state = GameState::fresh(config, difficulty, &mut rng);
    let mut all_events = state.take_events();

    for &direction in directions {
        let result = resolve_move(&mut state, direction, config, reactions, &mut rng, |_| {});
        all_events.extend(result.events);

        if state.is_terminated() {
            break;
        }
    }

    (state, all_events)
}

// =============================================================================
// TESTS
// =============================================================================
