use crate::game::level::LevelDefinition;
use crate::game::state::GameState;
use crate::game::types::GridPosition;

/// Text picture of the board, one line per row.
///
/// `P` player, `E` goal, `#` wall, `$` uncollected coin, `S` start, `.` floor.
pub fn render_grid(level: &LevelDefinition, state: &GameState) -> String {
    let mut out = String::new();
    for row in 0..level.rows() {
        for col in 0..level.cols() {
            let pos = GridPosition::new(row, col);
            // Player first, then static cells
            let symbol = if pos == state.current_pos {
                'P'
            } else if pos == level.end_pos() {
                'E'
            } else if level.is_wall(pos) {
                '#'
            } else if level.is_coin(pos) && !state.collected_coins.contains(&pos) {
                '$'
            } else if pos == level.start_pos() {
                'S'
            } else {
                '.'
            };
            out.push(symbol);
        }
        out.push('\n');
    }
    out
}
