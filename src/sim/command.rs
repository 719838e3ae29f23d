//! Directional commands
//!
//! The only thing the engine ever consumes. Raw input is translated into
//! these in `crate::input`.

use serde::{Deserialize, Serialize};

use crate::Point;

/// A single-cell move intent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Command {
    Up,
    Right,
    Down,
    Left,
}

impl Command {
    pub const ALL: [Command; 4] = [Command::Up, Command::Right, Command::Down, Command::Left];

    /// Unit delta in grid space (y grows downward)
    pub const fn delta(self) -> Point {
        match self {
            Command::Up => Point::new(0, -1),
            Command::Right => Point::new(1, 0),
            Command::Down => Point::new(0, 1),
            Command::Left => Point::new(-1, 0),
        }
    }

    /// Map a key identifier to a command (w/a/s/d only)
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "w" => Some(Command::Up),
            "d" => Some(Command::Right),
            "s" => Some(Command::Down),
            "a" => Some(Command::Left),
            _ => None,
        }
    }
}
