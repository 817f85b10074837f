//! Core deterministic primitives.
//!
//! Nothing in this module knows the game rules. The randomness seam, state
//! fingerprints and coordinates live here so `game/` stays pure logic.

pub mod position;
pub mod rng;
pub mod hash;

// Re-export core types
pub use position::{Position, Vector};
pub use rng::{DeterministicRng, RandomSource, derive_seed};
pub use hash::{Fingerprint, StateHash};
