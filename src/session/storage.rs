//! Game Persistence
//!
//! Where a game goes between sessions. The session saves after every render
//! and clears the save when a game is lost, so a stored snapshot is always a
//! game that can be resumed.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::game::snapshot::{GameSnapshot, SnapshotError};

/// File holding the saved game inside a [`FileStorage`] directory.
pub const GAME_STATE_FILE: &str = "game_state.json";

/// File holding the best score inside a [`FileStorage`] directory.
pub const BEST_SCORE_FILE: &str = "best_score";

/// Storage failures.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Filesystem failure.
    #[error("storage io: {0}")]
    Io(#[from] io::Error),

    /// Stored snapshot could not be decoded.
    #[error(transparent)]
    Snapshot(#[from] SnapshotError),

    /// Snapshot could not be encoded.
    #[error("snapshot encode failed: {0}")]
    Encode(#[from] serde_json::Error),

    /// Stored best score is not a number.
    #[error("stored best score {0:?} is not a number")]
    BadBestScore(String),
}

/// Persistence collaborator.
pub trait Storage {
    /// The saved game, if any.
    fn get_game_state(&self) -> Result<Option<GameSnapshot>, StorageError>;

    /// Save a game, replacing any previous save.
    fn set_game_state(&mut self, snapshot: &GameSnapshot) -> Result<(), StorageError>;

    /// Forget the saved game.
    fn clear_game_state(&mut self) -> Result<(), StorageError>;

    /// Best score ever reached (0 when none is stored).
    fn get_best_score(&self) -> Result<u64, StorageError>;

    /// Record a new best score.
    fn set_best_score(&mut self, score: u64) -> Result<(), StorageError>;
}

/// In-process storage. Holds the save as JSON text so it behaves like a
/// real store, corrupt data included.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    game_state: Option<String>,
    best_score: u64,
}

impl MemoryStorage {
    /// Empty storage.
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage whose saved game is the given raw text.
    pub fn with_raw_game_state(raw: impl Into<String>) -> Self {
        Self {
            game_state: Some(raw.into()),
            best_score: 0,
        }
    }
}

impl Storage for MemoryStorage {
    fn get_game_state(&self) -> Result<Option<GameSnapshot>, StorageError> {
        self.game_state
            .as_deref()
            .map(GameSnapshot::from_json)
            .transpose()
            .map_err(StorageError::from)
    }

    fn set_game_state(&mut self, snapshot: &GameSnapshot) -> Result<(), StorageError> {
        self.game_state = Some(snapshot.to_json()?);
        Ok(())
    }

    fn clear_game_state(&mut self) -> Result<(), StorageError> {
        self.game_state = None;
        Ok(())
    }

    fn get_best_score(&self) -> Result<u64, StorageError> {
        Ok(self.best_score)
    }

    fn set_best_score(&mut self, score: u64) -> Result<(), StorageError> {
        self.best_score = score;
        Ok(())
    }
}

/// Storage in a directory: one JSON file for the game, one text file for
/// the best score.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Use `dir`, creating it if needed.
    pub fn new(dir: impl AsRef<Path>) -> Result<Self, StorageError> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    /// The storage directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn game_state_path(&self) -> PathBuf {
        self.dir.join(GAME_STATE_FILE)
    }

    fn best_score_path(&self) -> PathBuf {
        self.dir.join(BEST_SCORE_FILE)
    }
}

/// Read a file, mapping "not found" to `None`.
fn read_optional(path: &Path) -> Result<Option<String>, StorageError> {
    match fs::read_to_string(path) {
        Ok(text) => Ok(Some(text)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}

impl Storage for FileStorage {
    fn get_game_state(&self) -> Result<Option<GameSnapshot>, StorageError> {
        match read_optional(&self.game_state_path())? {
            Some(text) => Ok(Some(GameSnapshot::from_json(&text)?)),
            None => Ok(None),
        }
    }

    fn set_game_state(&mut self, snapshot: &GameSnapshot) -> Result<(), StorageError> {
        fs::write(self.game_state_path(), snapshot.to_json()?)?;
        Ok(())
    }

    fn clear_game_state(&mut self) -> Result<(), StorageError> {
        match fs::remove_file(self.game_state_path()) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    fn get_best_score(&self) -> Result<u64, StorageError> {
        match read_optional(&self.best_score_path())? {
            Some(text) => text
                .trim()
                .parse()
                .map_err(|_| StorageError::BadBestScore(text.trim().to_string())),
            None => Ok(0),
        }
    }

    fn set_best_score(&mut self, score: u64) -> Result<(), StorageError> {
        fs::write(self.best_score_path(), score.to_string())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::position::Position;
    use crate::game::element::Element;
    use crate::game::state::GameState;

    fn snapshot() -> GameSnapshot {
        let mut state = GameState::new(4, 0.0);
        state.spawn_tile(Position::new(1, 2), Element::Deuterium);
        state.score = 2;
        GameSnapshot::capture(&state)
    }

    #[test]
    fn test_memory_storage_round_trip() {
        let mut storage = MemoryStorage::new();
        assert!(storage.get_game_state().unwrap().is_none());
        assert_eq!(storage.get_best_score().unwrap(), 0);

        storage.set_game_state(&snapshot()).unwrap();
        storage.set_best_score(10).unwrap();
        assert_eq!(storage.get_game_state().unwrap(), Some(snapshot()));
        assert_eq!(storage.get_best_score().unwrap(), 10);

        storage.clear_game_state().unwrap();
        assert!(storage.get_game_state().unwrap().is_none());
        assert_eq!(storage.get_best_score().unwrap(), 10);
    }

    #[test]
    fn test_memory_storage_reports_corruption() {
        let storage = MemoryStorage::with_raw_game_state("{not json");
        assert!(matches!(storage.get_game_state(), Err(StorageError::Snapshot(_))));
    }

    #[test]
    fn test_file_storage_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let mut storage = FileStorage::new(dir.path().join("saves")).unwrap();

        assert!(storage.get_game_state().unwrap().is_none());
        assert_eq!(storage.get_best_score().unwrap(), 0);

        storage.set_game_state(&snapshot()).unwrap();
        storage.set_best_score(42).unwrap();

        // A second handle on the same directory sees the same data
        let reopened = FileStorage::new(storage.dir()).unwrap();
        assert_eq!(reopened.get_game_state().unwrap(), Some(snapshot()));
        assert_eq!(reopened.get_best_score().unwrap(), 42);

        storage.clear_game_state().unwrap();
        storage.clear_game_state().unwrap();
        assert!(reopened.get_game_state().unwrap().is_none());
    }

    #[test]
    fn test_file_storage_bad_best_score() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(BEST_SCORE_FILE), "lots").unwrap();

        let storage = FileStorage::new(dir.path()).unwrap();
        assert!(matches!(storage.get_best_score(), Err(StorageError::BadBestScore(_))));
    }
}
