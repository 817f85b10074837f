//! Session layer.
//!
//! Everything around the rules: persistence, rendering, the difficulty knob
//! and the session that ties them to one game.
//!
//! ## Module Structure
//!
//! - `storage`: Saved game and best score
//! - `actuator`: Render sinks
//! - `difficulty`: Difficulty sources
//! - `manager`: The game session

pub mod storage;
pub mod actuator;
pub mod difficulty;
pub mod manager;

pub use storage::{FileStorage, MemoryStorage, Storage, StorageError};
pub use actuator::{ActuateMeta, Actuator, Frame, RecordingActuator, TerminalActuator};
pub use difficulty::{DifficultySource, SharedDifficulty};
pub use manager::{GameSession, SessionError};
