//! # Fusion 2048
//!
//! Rules engine for a 2048 variant where tiles are nuclei: protons fuse into
//! deuterium, helium climbs the alpha ladder, and producing iron-56 wins.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                       FUSION 2048                            │
//! ├─────────────────────────────────────────────────────────────┤
//! │  core/           - Deterministic primitives                  │
//! │  ├── position.rs - Cell coordinates and unit steps           │
//! │  ├── rng.rs      - Seedable Xorshift128+ random source       │
//! │  └── hash.rs     - State fingerprints                        │
//! │                                                              │
//! │  game/           - Game rules (deterministic)                │
//! │  ├── element.rs  - Tile values                               │
//! │  ├── reaction.rs - Fusion table and scoring                  │
//! │  ├── grid.rs     - The board                                 │
//! │  ├── state.rs    - Score, flags, spawning                    │
//! │  ├── resolve.rs  - Move resolution                           │
//! │  └── snapshot.rs - Persisted game shape                      │
//! │                                                              │
//! │  session/        - Collaborators (storage, rendering)        │
//! │  ├── storage.rs  - Saved game and best score                 │
//! │  ├── actuator.rs - Render sinks                              │
//! │  └── manager.rs  - Game session                              │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Determinism
//!
//! The `core/` and `game/` modules never touch the clock or the OS. The
//! only randomness is the proton-pair gate and tile spawning, both drawn
//! from a [`RandomSource`](core::rng::RandomSource). Given the same seed,
//! difficulty and moves, a game replays to the same state hash.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod core;
pub mod game;
pub mod session;
pub mod config;

// Re-export commonly used types
pub use config::{ConfigError, GameConfig};
pub use core::rng::{DeterministicRng, RandomSource};
pub use game::{Direction, Command, Element, GameState, MoveResult, ReactionTable};
pub use session::{GameSession, Storage, Actuator, DifficultySource};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default board side length
pub const DEFAULT_GRID_SIZE: usize = 4;

/// Tiles placed on a fresh board
pub const DEFAULT_START_TILES: usize = 2;
