use std::collections::BTreeSet;

use serde::{Serialize, Deserialize};

use crate::game::level::LevelDefinition;
use crate::game::types::{GameOutcome, GridPosition, RunError};

/// Snapshot of a run, published after every processed command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    pub current_pos: GridPosition,
    pub collected_coins: BTreeSet<GridPosition>,
    pub is_game_over: bool,
    pub is_win: bool,
    pub error: Option<RunError>,
    /// Commands processed so far in this run.
    pub steps: usize,
}

impl GameState {
    // Fresh state at the level's start cell
    pub fn initial(level: &LevelDefinition) -> Self {
        GameState {
            current_pos: level.start_pos(),
            collected_coins: BTreeSet::new(),
            is_game_over: false,
            is_win: false,
            error: None,
            steps: 0,
        }
    }

    pub fn win(&mut self) {
        self.is_game_over = true;
        self.is_win = true;
        self.error = None;
    }

    pub fn lose(&mut self, error: RunError) {
        self.is_game_over = true;
        self.is_win = false;
        self.error = Some(error);
    }

    /// Outcome of a terminal state, `None` while the run is still going.
    pub fn outcome(&self) -> Option<GameOutcome> {
        if !self.is_game_over {
            return None;
        }
        Some(match self.error {
            None => GameOutcome::Win,
            Some(RunError::Crashed) => GameOutcome::Crashed,
            Some(RunError::OutOfMoves) => GameOutcome::OutOfMoves,
        })
    }
}
