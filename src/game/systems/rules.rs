//! Step rules.
//!
//! Applies one command to a running game state: coin pickup, goal check and
//! crash detection.

use log::debug;

use crate::game::level::LevelDefinition;
use crate::game::state::GameState;
use crate::game::systems::{is_valid_move, next_position};
use crate::game::types::{Command, EngineEvent, RunError};

/// Apply `command` to a non-terminal `state`.
pub fn apply_step<F>(level: &LevelDefinition, state: &mut GameState, command: Command, on_event: &mut F)
where
    F: FnMut(EngineEvent),
{
    let next = next_position(state.current_pos, command);
    state.steps += 1;

    if !is_valid_move(level, next) {
        debug!("[Engine] {:?} from {} crashes into {}", command, state.current_pos, next);
        state.lose(RunError::Crashed);
        return;
    }

    // Each coin counts once per run
    if level.is_coin(next) && state.collected_coins.insert(next) {
        on_event(EngineEvent::CoinCollected(next));
    }
    state.current_pos = next;

    if next == level.end_pos() {
        state.win();
    }
}

/// Close a run whose queue ran out before a terminal condition.
pub fn apply_end_of_queue(level: &LevelDefinition, state: &mut GameState) {
    if !state.is_game_over && state.current_pos != level.end_pos() {
        state.lose(RunError::OutOfMoves);
    }
}
