use std::fmt;

use serde::{Serialize, Deserialize};

/// A cell address on the grid, zero-based.
///
/// Coordinates are signed so a position one step past the border is still
/// representable before it is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GridPosition {
    pub row: i32,
    pub col: i32,
}

impl GridPosition {
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// The neighbouring cell one step in `command`'s direction.
    pub fn offset(self, command: Command) -> Self {
        match command {
            Command::Up => Self { row: self.row - 1, ..self },
            Command::Down => Self { row: self.row + 1, ..self },
            Command::Left => Self { col: self.col - 1, ..self },
            Command::Right => Self { col: self.col + 1, ..self },
        }
    }
}

impl fmt::Display for GridPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Command {
    Up,
    Down,
    Left,
    Right,
}

/// Why a run ended without reaching the goal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunError {
    Crashed,
    OutOfMoves,
}

impl RunError {
    pub fn message(self) -> &'static str {
        match self {
            RunError::Crashed => "Crashed!",
            RunError::OutOfMoves => "Out of moves!",
        }
    }
}

impl fmt::Display for RunError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameOutcome {
    Win,
    Crashed,
    OutOfMoves,
}

/// Side notifications fired by the engine while a run is in progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EngineEvent {
    CoinCollected(GridPosition),
}

impl EngineEvent {
    /// Short event name understood by presentation layers ("coin").
    pub fn name(&self) -> &'static str {
        match self {
            EngineEvent::CoinCollected(_) => "coin",
        }
    }
}

/// Tools available in the level builder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellType {
    Empty,
    Wall,
    Coin,
    Start,
    End,
}
