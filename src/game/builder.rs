//! Level builder.
//!
//! Draft editor behind the "create your own level" screen. The player picks a
//! tool and clicks cells; the draft is turned into a `CustomLevel` on save.

use std::collections::BTreeSet;

use serde::{Serialize, Deserialize};

use crate::config::game::{BUILDER_COLS, BUILDER_ROWS};
use crate::game::level::CustomLevel;
use crate::game::types::{CellType, GridPosition};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelBuilder {
    pub rows: i32,
    pub cols: i32,
    pub walls: BTreeSet<GridPosition>,
    pub coins: BTreeSet<GridPosition>,
    pub start_pos: GridPosition,
    pub end_pos: GridPosition,
    pub selected_tool: CellType,
}

impl Default for LevelBuilder {
    fn default() -> Self {
        Self {
            rows: BUILDER_ROWS,
            cols: BUILDER_COLS,
            walls: BTreeSet::new(),
            coins: BTreeSet::new(),
            start_pos: GridPosition::new(0, 0),
            end_pos: GridPosition::new(BUILDER_ROWS - 1, BUILDER_COLS - 1),
            selected_tool: CellType::Wall,
        }
    }
}

impl LevelBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restore a draft from a stored custom level. The tool resets to `Wall`.
    ///
    /// Malformed cell entries are skipped.
    pub fn load(level: &CustomLevel) -> Self {
        let cells = |list: &[Vec<i32>]| {
            list.iter()
                .filter_map(|cell| match cell.as_slice() {
                    [row, col] => Some(GridPosition::new(*row, *col)),
                    _ => None,
                })
                .collect()
        };
        Self {
            rows: level.rows,
            cols: level.cols,
            walls: cells(&level.walls),
            coins: cells(&level.coins),
            start_pos: GridPosition::new(level.start_row, level.start_col),
            end_pos: GridPosition::new(level.end_row, level.end_col),
            selected_tool: CellType::Wall,
        }
    }

    pub fn select_tool(&mut self, tool: CellType) {
        self.selected_tool = tool;
    }

    /// Apply the selected tool to `pos`. Clicks outside the grid are ignored.
    pub fn click(&mut self, pos: GridPosition) {
        if !(0..self.rows).contains(&pos.row) || !(0..self.cols).contains(&pos.col) {
            return;
        }
        match self.selected_tool {
            CellType::Wall => {
                toggle(&mut self.walls, pos);
                self.coins.remove(&pos);
            }
            CellType::Coin => {
                toggle(&mut self.coins, pos);
                self.walls.remove(&pos);
            }
            CellType::Start => self.start_pos = pos,
            CellType::End => self.end_pos = pos,
            CellType::Empty => {
                self.walls.remove(&pos);
                self.coins.remove(&pos);
            }
        }
    }

    pub fn build(&self, name: impl Into<String>) -> CustomLevel {
        let cells = |set: &BTreeSet<GridPosition>| {
            set.iter().map(|p| vec![p.row, p.col]).collect()
        };
        CustomLevel {
            name: name.into(),
            rows: self.rows,
            cols: self.cols,
            walls: cells(&self.walls),
            coins: cells(&self.coins),
            start_row: self.start_pos.row,
            start_col: self.start_pos.col,
            end_row: self.end_pos.row,
            end_col: self.end_pos.col,
        }
    }
}

fn toggle(set: &mut BTreeSet<GridPosition>, pos: GridPosition) {
    if !set.remove(&pos) {
        set.insert(pos);
    }
}
