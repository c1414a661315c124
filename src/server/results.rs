//! Result log.
//!
//! Every finished run is appended as a `SessionRecord`. The summary groups the
//! records per level for the progress dashboard, listing unplayed levels too.

use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Serialize, Deserialize};
use uuid::Uuid;

use crate::config::game::{LOSS_SCORE, WIN_SCORE};
use crate::game::level::LevelDefinition;
use crate::game::types::GameOutcome;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionRecord {
    pub id: Uuid,
    pub session_id: Uuid,
    pub level_id: String,
    pub level_name: String,
    pub outcome: GameOutcome,
    pub score: u32,
    pub is_completed: bool,
    /// Seconds since the Unix epoch.
    pub timestamp: u64,
}

impl SessionRecord {
    pub fn new(session_id: Uuid, level: &LevelDefinition, outcome: GameOutcome) -> Self {
        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);
        Self {
            id: Uuid::new_v4(),
            session_id,
            level_id: level.id().to_string(),
            level_name: level.name().to_string(),
            outcome,
            score: score_for(outcome),
            is_completed: outcome == GameOutcome::Win,
            timestamp,
        }
    }
}

pub fn score_for(outcome: GameOutcome) -> u32 {
    match outcome {
        GameOutcome::Win => WIN_SCORE,
        GameOutcome::Crashed | GameOutcome::OutOfMoves => LOSS_SCORE,
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelSummary {
    pub level_id: String,
    pub level_name: String,
    pub attempts: usize,
    pub wins: usize,
    pub best_score: u32,
}

impl LevelSummary {
    fn unplayed(level_id: &str, level_name: &str) -> Self {
        Self {
            level_id: level_id.to_string(),
            level_name: level_name.to_string(),
            attempts: 0,
            wins: 0,
            best_score: 0,
        }
    }
}

#[derive(Debug, Default)]
pub struct ResultLog {
    records: Vec<SessionRecord>,
}

impl ResultLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, record: SessionRecord) {
        self.records.push(record);
    }

    pub fn records(&self) -> &[SessionRecord] {
        &self.records
    }

    /// Attempts, wins and best score per level.
    ///
    /// Every level in `levels` gets a row, in that order, even when it was
    /// never played. Recorded levels missing from `levels` follow.
    pub fn summary<'a, I>(&self, levels: I) -> Vec<LevelSummary>
    where
        I: IntoIterator<Item = &'a LevelDefinition>,
    {
        let mut rows: Vec<LevelSummary> = levels.into_iter()
            .map(|level| LevelSummary::unplayed(level.id(), level.name()))
            .collect();
        for record in &self.records {
            let index = match rows.iter().position(|row| row.level_id == record.level_id) {
                Some(index) => index,
                None => {
                    rows.push(LevelSummary::unplayed(&record.level_id, &record.level_name));
                    rows.len() - 1
                }
            };
            let row = &mut rows[index];
            row.attempts += 1;
            if record.is_completed {
                row.wins += 1;
            }
            row.best_score = row.best_score.max(record.score);
        }
        rows
    }
}
