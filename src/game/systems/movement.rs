//! Movement system.
//!
//! This module computes where a command would take the player and whether
//! that cell can be entered.

use crate::game::level::LevelDefinition;
use crate::game::types::{Command, GridPosition};

/// Cell reached from `from` by one step in the command's direction.
pub fn next_position(from: GridPosition, command: Command) -> GridPosition {
    from.offset(command)
}

/// A move is valid when the target is inside the grid and not a wall.
pub fn is_valid_move(level: &LevelDefinition, target: GridPosition) -> bool {
    level.contains(target) && !level.is_wall(target)
}
