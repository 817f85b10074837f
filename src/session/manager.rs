//! Game Session Management
//!
//! Owns one game and wires it to its collaborators: restores or starts a
//! game on setup, routes player commands to the resolver, and after every
//! visible change saves the game, tracks the best score and renders.

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::config::{ConfigError, GameConfig};
use crate::core::rng::{DeterministicRng, RandomSource};
use crate::game::input::{Command, Direction};
use crate::game::reaction::ReactionTable;
use crate::game::resolve::{MoveResult, resolve_move};
use crate::game::snapshot::GameSnapshot;
use crate::game::state::{GameState, clamp_difficulty};
use crate::session::actuator::{ActuateMeta, Actuator};
use crate::session::difficulty::DifficultySource;
use crate::session::storage::Storage;

/// Session construction failure.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Configuration rejected.
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
}

/// A game plus its storage, renderer, difficulty knob and random source.
pub struct GameSession<S, A, D, R = DeterministicRng> {
    config: GameConfig,
    reactions: &'static ReactionTable,
    storage: S,
    actuator: A,
    difficulty: D,
    rng: R,
    state: GameState,
}

impl<S, A, D> GameSession<S, A, D>
where
    S: Storage,
    A: Actuator,
    D: DifficultySource,
{
    /// Create a session seeded from `config.seed` and run setup.
    pub fn new(config: GameConfig, storage: S, actuator: A, difficulty: D) -> Result<Self, SessionError> {
        let rng = DeterministicRng::new(config.seed);
        Self::with_rng(config, storage, actuator, difficulty, rng)
    }
}

impl<S, A, D, R> GameSession<S, A, D, R>
where
    S: Storage,
    A: Actuator,
    D: DifficultySource,
    R: RandomSource,
{
    /// Create a session with an explicit random source and run setup.
    pub fn with_rng(
        config: GameConfig,
        storage: S,
        actuator: A,
        difficulty: D,
        rng: R,
    ) -> Result<Self, SessionError> {
        config.validate()?;

        let state = GameState::new(config.size, 0.0);
        let mut session = Self {
            config,
            reactions: ReactionTable::builtin(),
            storage,
            actuator,
            difficulty,
            rng,
            state,
        };
        session.setup();
        Ok(session)
    }

    /// Resume the saved game if there is a usable one, otherwise start
    /// fresh. Reads the difficulty and renders once.
    pub fn setup(&mut self) {
        let difficulty = clamp_difficulty(self.difficulty.difficulty());

        let restored = match self.storage.get_game_state() {
            Ok(Some(snapshot)) => match snapshot.restore(difficulty) {
                Ok(state) => Some(state),
                Err(e) => {
                    warn!("Discarding unusable saved game: {}", e);
                    None
                }
            },
            Ok(None) => None,
            Err(e) => {
                warn!("Could not load saved game: {}", e);
                None
            }
        };

        self.state = match restored {
            Some(state) => {
                info!(score = state.score, difficulty, "Resumed saved game");
                state
            }
            None => {
                let mut state = GameState::fresh(&self.config, difficulty, &mut self.rng);
                let spawned = state.take_events();
                info!(size = self.config.size, difficulty, tiles = spawned.len(), "Started new game");
                state
            }
        };

        actuate(&self.state, &mut self.storage, &mut self.actuator);
    }

    /// Throw the current game away and start over.
    pub fn restart(&mut self) {
        info!(score = self.state.score, "Restarting");
        if let Err(e) = self.storage.clear_game_state() {
            warn!("Could not clear saved game: {}", e);
        }
        self.actuator.continue_game();
        self.setup();
    }

    /// Keep playing after a win.
    pub fn keep_playing(&mut self) {
        debug!("Keep playing");
        self.state.keep_playing = true;
        self.actuator.continue_game();
    }

    /// Swipe the board. Does nothing once the game is terminated.
    pub fn move_tiles(&mut self, direction: Direction) -> MoveResult {
        let Self { config, reactions, storage, actuator, rng, state, .. } = self;
        resolve_move(state, direction, config, reactions, rng, |current| {
            actuate(current, storage, actuator)
        })
    }

    /// Dispatch a player command. Returns the move result for swipes.
    pub fn handle(&mut self, command: Command) -> Option<MoveResult> {
        match command {
            Command::Move(direction) => return Some(self.move_tiles(direction)),
            Command::Restart => self.restart(),
            Command::KeepPlaying => self.keep_playing(),
        }
        None
    }

    /// Lost, or won without electing to keep playing.
    pub fn is_terminated(&self) -> bool {
        self.state.is_terminated()
    }

    /// The persisted shape of the current game.
    pub fn serialize(&self) -> GameSnapshot {
        GameSnapshot::capture(&self.state)
    }

    /// Current game.
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Session configuration.
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Storage backend.
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Render sink.
    pub fn actuator(&self) -> &A {
        &self.actuator
    }
}

/// Persist, update the best score, then render. Storage failures are
/// logged and play continues.
fn actuate<S: Storage, A: Actuator>(state: &GameState, storage: &mut S, actuator: &mut A) {
    let mut best_score = storage.get_best_score().unwrap_or_else(|e| {
        warn!("Could not read best score: {}", e);
        0
    });
    if best_score < state.score {
        best_score = state.score;
        if let Err(e) = storage.set_best_score(best_score) {
            warn!("Could not save best score: {}", e);
        }
    }

    let persisted = if state.over {
        storage.clear_game_state()
    } else {
        storage.set_game_state(&GameSnapshot::capture(state))
    };
    if let Err(e) = persisted {
        warn!("Could not save game: {}", e);
    }

    actuator.actuate(
        &state.grid,
        &ActuateMeta {
            score: state.score,
            over: state.over,
            won: state.won,
            best_score,
            terminated: state.is_terminated(),
        },
    );
}

// =============================================================================
// TESTS
// =============================================================================
