//! Difficulty Sources
//!
//! Difficulty is the chance that a proton pair fails to fuse. The session
//! reads it once per setup, so a change takes effect on the next restart.

use std::cell::Cell;
use std::rc::Rc;

/// Supplies the difficulty for the next game.
pub trait DifficultySource {
    /// Raw difficulty. The session clamps it to [0, 1] and treats NaN as 0.
    fn difficulty(&self) -> f64;
}

impl DifficultySource for f64 {
    fn difficulty(&self) -> f64 {
        *self
    }
}

/// A difficulty knob that can be turned from outside the session.
#[derive(Clone, Debug, Default)]
pub struct SharedDifficulty(Rc<Cell<f64>>);

impl SharedDifficulty {
    /// Knob starting at `difficulty`.
    pub fn new(difficulty: f64) -> Self {
        Self(Rc::new(Cell::new(difficulty)))
    }

    /// Turn the knob. Every clone sees the new value.
    pub fn set(&self, difficulty: f64) {
        self.0.set(difficulty);
    }

    /// Current value.
    pub fn get(&self) -> f64 {
        self.0.get()
    }
}

impl DifficultySource for SharedDifficulty {
    fn difficulty(&self) -> f64 {
        self.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_difficulty() {
        assert_eq!(0.25f64.difficulty(), 0.25);
    }

    #[test]
    fn test_shared_difficulty_clones_see_updates() {
        let knob = SharedDifficulty::new(0.1);
        let handle = knob.clone();
        handle.set(0.7);
        assert_eq!(knob.difficulty(), 0.7);
    }
}
