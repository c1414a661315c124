//! Level definitions.
//!
//! A `LevelDefinition` is the static puzzle the engine plays against: grid size,
//! start and goal cells, walls and coins. It can only be built through
//! [`LevelDefinition::new`] or from a [`CustomLevel`], both of which validate the
//! layout, so the engine never has to.

use std::collections::BTreeSet;

use serde::{Serialize, Deserialize};
use thiserror::Error;

use crate::config::game::MAX_GRID_SIDE;
use crate::game::types::GridPosition;

/// Reasons a level layout is rejected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LevelError {
    #[error("grid must have at least one row and one column (got {rows}x{cols})")]
    EmptyGrid { rows: i32, cols: i32 },
    #[error("grid {rows}x{cols} exceeds the {max}x{max} limit")]
    TooLarge { rows: i32, cols: i32, max: i32 },
    #[error("{what} {pos} lies outside the grid")]
    OutOfBounds { what: &'static str, pos: GridPosition },
    #[error("{what} {pos} is on a wall")]
    BlockedByWall { what: &'static str, pos: GridPosition },
    #[error("start and end are the same cell {0}")]
    StartIsEnd(GridPosition),
    #[error("cell {0} is both a wall and a coin")]
    WallAndCoin(GridPosition),
    #[error("malformed cell {0:?}: expected [row, col]")]
    MalformedCell(Vec<i32>),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LevelDefinition {
    id: String,
    name: String,
    rows: i32,
    cols: i32,
    start_pos: GridPosition,
    end_pos: GridPosition,
    walls: BTreeSet<GridPosition>,
    coins: BTreeSet<GridPosition>,
}

/// Grid size, markers and cell sets of a level, before validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelLayout {
    pub rows: i32,
    pub cols: i32,
    pub start_pos: GridPosition,
    pub end_pos: GridPosition,
    pub walls: BTreeSet<GridPosition>,
    pub coins: BTreeSet<GridPosition>,
}

impl LevelLayout {
    pub fn new(rows: i32, cols: i32, start_pos: GridPosition, end_pos: GridPosition) -> Self {
        Self { rows, cols, start_pos, end_pos, walls: BTreeSet::new(), coins: BTreeSet::new() }
    }

    pub fn with_walls(mut self, walls: impl IntoIterator<Item = GridPosition>) -> Self {
        self.walls.extend(walls);
        self
    }

    pub fn with_coins(mut self, coins: impl IntoIterator<Item = GridPosition>) -> Self {
        self.coins.extend(coins);
        self
    }
}

impl LevelDefinition {
    pub fn new(id: impl Into<String>, name: impl Into<String>, layout: LevelLayout) -> Result<Self, LevelError> {
        let LevelLayout { rows, cols, start_pos, end_pos, walls, coins } = layout;
        let level = Self { id: id.into(), name: name.into(), rows, cols, start_pos, end_pos, walls, coins };
        level.validate()?;
        Ok(level)
    }

    fn validate(&self) -> Result<(), LevelError> {
        if self.rows <= 0 || self.cols <= 0 {
            return Err(LevelError::EmptyGrid { rows: self.rows, cols: self.cols });
        }
        if self.rows > MAX_GRID_SIDE || self.cols > MAX_GRID_SIDE {
            return Err(LevelError::TooLarge { rows: self.rows, cols: self.cols, max: MAX_GRID_SIDE });
        }

        let marked = [("start", self.start_pos), ("end", self.end_pos)];
        let cells = marked.into_iter()
            .chain(self.walls.iter().map(|p| ("wall", *p)))
            .chain(self.coins.iter().map(|p| ("coin", *p)));
        for (what, pos) in cells {
            if !self.contains(pos) {
                return Err(LevelError::OutOfBounds { what, pos });
            }
        }

        for (what, pos) in marked {
            if self.walls.contains(&pos) {
                return Err(LevelError::BlockedByWall { what, pos });
            }
        }
        if self.start_pos == self.end_pos {
            return Err(LevelError::StartIsEnd(self.start_pos));
        }
        if let Some(pos) = self.walls.intersection(&self.coins).next() {
            return Err(LevelError::WallAndCoin(*pos));
        }
        Ok(())
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn rows(&self) -> i32 {
        self.rows
    }

    pub fn cols(&self) -> i32 {
        self.cols
    }

    pub fn start_pos(&self) -> GridPosition {
        self.start_pos
    }

    pub fn end_pos(&self) -> GridPosition {
        self.end_pos
    }

    pub fn walls(&self) -> &BTreeSet<GridPosition> {
        &self.walls
    }

    pub fn coins(&self) -> &BTreeSet<GridPosition> {
        &self.coins
    }

    /// True when `pos` is inside `[0, rows) x [0, cols)`.
    pub fn contains(&self, pos: GridPosition) -> bool {
        (0..self.rows).contains(&pos.row) && (0..self.cols).contains(&pos.col)
    }

    pub fn is_wall(&self, pos: GridPosition) -> bool {
        self.walls.contains(&pos)
    }

    pub fn is_coin(&self, pos: GridPosition) -> bool {
        self.coins.contains(&pos)
    }
}

/// User-authored level in its wire form: walls and coins as `[[row, col], ...]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomLevel {
    pub name: String,
    pub rows: i32,
    pub cols: i32,
    #[serde(default)]
    pub walls: Vec<Vec<i32>>,
    #[serde(default)]
    pub coins: Vec<Vec<i32>>,
    pub start_row: i32,
    pub start_col: i32,
    pub end_row: i32,
    pub end_col: i32,
}

impl CustomLevel {
    /// Build a validated definition carrying the given id.
    pub fn into_level(self, id: impl Into<String>) -> Result<LevelDefinition, LevelError> {
        let walls = parse_cells(&self.walls)?;
        let coins = parse_cells(&self.coins)?;
        let layout = LevelLayout::new(
            self.rows,
            self.cols,
            GridPosition::new(self.start_row, self.start_col),
            GridPosition::new(self.end_row, self.end_col),
        )
        .with_walls(walls)
        .with_coins(coins);
        LevelDefinition::new(id, self.name, layout)
    }
}

impl From<&LevelDefinition> for CustomLevel {
    fn from(level: &LevelDefinition) -> Self {
        let cells = |set: &BTreeSet<GridPosition>| {
            set.iter().map(|p| vec![p.row, p.col]).collect()
        };
        CustomLevel {
            name: level.name.clone(),
            rows: level.rows,
            cols: level.cols,
            walls: cells(level.walls()),
            coins: cells(level.coins()),
            start_row: level.start_pos.row,
            start_col: level.start_pos.col,
            end_row: level.end_pos.row,
            end_col: level.end_pos.col,
        }
    }
}

fn parse_cells(cells: &[Vec<i32>]) -> Result<Vec<GridPosition>, LevelError> {
    cells.iter()
        .map(|cell| match cell.as_slice() {
            [row, col] => Ok(GridPosition::new(*row, *col)),
            _ => Err(LevelError::MalformedCell(cell.clone())),
        })
        .collect()
}
