//! Input Commands
//!
//! The three things a player can ask for, and the swipe directions with
//! their wire indices (0 = up, 1 = right, 2 = down, 3 = left).

use std::fmt;
use std::str::FromStr;
use serde::{Serialize, Deserialize};
use thiserror::Error;

use crate::core::position::Vector;

/// A swipe direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Direction {
    /// Toward row 0
    Up = 0,
    /// Toward the last column
    Right = 1,
    /// Toward the last row
    Down = 2,
    /// Toward column 0
    Left = 3,
}

impl Direction {
    /// All directions in index order.
    pub const ALL: [Direction; 4] = [Direction::Up, Direction::Right, Direction::Down, Direction::Left];

    /// Direction from its wire index.
    pub fn from_index(index: u8) -> Option<Direction> {
        Direction::ALL.get(index as usize).copied()
    }

    /// Unit step for this direction.
    #[inline]
    pub fn vector(self) -> Vector {
        match self {
            Direction::Up => Vector::UP,
            Direction::Right => Vector::RIGHT,
            Direction::Down => Vector::DOWN,
            Direction::Left => Vector::LEFT,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Direction::Up => "up",
            Direction::Right => "right",
            Direction::Down => "down",
            Direction::Left => "left",
        };
        f.write_str(name)
    }
}

/// A player action.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum Command {
    /// Swipe the board
    Move(Direction),
    /// Abandon the current game and start fresh
    Restart,
    /// Continue past a win
    KeepPlaying,
}

/// Input that maps to no command.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unrecognized input: {0:?}")]
pub struct UnknownCommand(pub String);

impl FromStr for Command {
    type Err = UnknownCommand;

    /// Accepts `w/a/s/d`, direction names, wire indices `0..3`,
    /// `r`/`restart` and `k`/`keep`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let command = match s.trim().to_ascii_lowercase().as_str() {
            "w" | "up" | "0" => Command::Move(Direction::Up),
            "d" | "right" | "1" => Command::Move(Direction::Right),
            "s" | "down" | "2" => Command::Move(Direction::Down),
            "a" | "left" | "3" => Command::Move(Direction::Left),
            "r" | "restart" => Command::Restart,
            "k" | "keep" | "keep-playing" => Command::KeepPlaying,
            _ => return Err(UnknownCommand(s.to_string())),
        };
        Ok(command)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_indices() {
        assert_eq!(Direction::from_index(0), Some(Direction::Up));
        assert_eq!(Direction::from_index(1), Some(Direction::Right));
        assert_eq!(Direction::from_index(2), Some(Direction::Down));
        assert_eq!(Direction::from_index(3), Some(Direction::Left));
        assert_eq!(Direction::from_index(4), None);
    }

    #[test]
    fn test_direction_vectors() {
        assert_eq!(Direction::Up.vector(), Vector { dx: 0, dy: -1 });
        assert_eq!(Direction::Right.vector(), Vector { dx: 1, dy: 0 });
        assert_eq!(Direction::Down.vector(), Vector { dx: 0, dy: 1 });
        assert_eq!(Direction::Left.vector(), Vector { dx: -1, dy: 0 });
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!("w".parse(), Ok(Command::Move(Direction::Up)));
        assert_eq!(" Left ".parse(), Ok(Command::Move(Direction::Left)));
        assert_eq!("2".parse(), Ok(Command::Move(Direction::Down)));
        assert_eq!("r".parse(), Ok(Command::Restart));
        assert_eq!("keep".parse(), Ok(Command::KeepPlaying));
        assert!("jump".parse::<Command>().is_err());
    }
}
