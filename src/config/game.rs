/// Game configuration constants.
///
/// This module defines the run pacing, level builder defaults and the scores
/// recorded for finished runs.
pub const PRE_ROLL_DELAY_MS: u64 = 500; // Pause before the first command.

/// Pause after each processed command, in milliseconds.
pub const STEP_DELAY_MS: u64 = 500;

/// Number of rows of a fresh level builder draft.
pub const BUILDER_ROWS: i32 = 6;

/// Number of columns of a fresh level builder draft.
pub const BUILDER_COLS: i32 = 6;

/// Largest accepted number of rows or columns of a level.
pub const MAX_GRID_SIDE: i32 = 20;

/// Score recorded for a won run.
pub const WIN_SCORE: u32 = 100;

/// Score recorded for a lost run.
pub const LOSS_SCORE: u32 = 0;
