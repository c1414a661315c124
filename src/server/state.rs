// src/server/state.rs

//! Application state for the backend server.
//!
//! Holds the built-in catalog, the custom level store, the result log and the
//! quizzes in progress.
//! Shared between HTTP/WebSocket handlers through `web::Data`.

use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex, RwLock};

use log::{info, warn};
use uuid::Uuid;

use crate::game::catalog::Catalog;
use crate::game::level::{CustomLevel, LevelDefinition, LevelError};
use crate::game::quiz::QuizSession;
use crate::server::results::{ResultLog, SessionRecord};

/// Prefix of ids handed out to user-authored levels.
pub const CUSTOM_PREFIX: &str = "custom_";

/// User-authored levels keyed by their numeric id.
#[derive(Debug, Default)]
pub struct CustomLevelStore {
    next_id: u32,
    levels: BTreeMap<u32, Arc<LevelDefinition>>,
}

impl CustomLevelStore {
    pub fn new() -> Self {
        Self { next_id: 1, levels: BTreeMap::new() }
    }

    /// Validate and store a new level, returning it with its assigned id.
    pub fn insert(&mut self, raw: CustomLevel) -> Result<Arc<LevelDefinition>, LevelError> {
        let number = self.next_id.max(1);
        let level = Arc::new(raw.into_level(format!("{CUSTOM_PREFIX}{number}"))?);
        self.next_id = number + 1;
        self.levels.insert(number, level.clone());
        Ok(level)
    }

    /// Replace a stored level. `Ok(None)` when `id` is unknown.
    pub fn update(&mut self, id: &str, raw: CustomLevel) -> Result<Option<Arc<LevelDefinition>>, LevelError> {
        let Some(number) = parse_custom_id(id).filter(|n| self.levels.contains_key(n)) else {
            return Ok(None);
        };
        let level = Arc::new(raw.into_level(id)?);
        self.levels.insert(number, level.clone());
        Ok(Some(level))
    }

    pub fn get(&self, id: &str) -> Option<Arc<LevelDefinition>> {
        parse_custom_id(id).and_then(|n| self.levels.get(&n).cloned())
    }

    pub fn levels(&self) -> impl Iterator<Item = &Arc<LevelDefinition>> {
        self.levels.values()
    }
}

fn parse_custom_id(id: &str) -> Option<u32> {
    id.strip_prefix(CUSTOM_PREFIX)?.parse().ok()
}

/// Shared application state, injected into HTTP/WebSocket handlers.
pub struct AppState {
    /// Built-in levels.
    pub catalog: Catalog,
    /// Levels created through the builder API.
    pub custom_levels: RwLock<CustomLevelStore>,
    /// Finished runs of every play session.
    pub results: Mutex<ResultLog>,
    /// Quizzes in progress, by quiz id.
    pub quizzes: Mutex<HashMap<Uuid, QuizSession>>,
}

impl AppState {
    pub fn new(catalog: Catalog) -> Self {
        AppState {
            catalog,
            custom_levels: RwLock::new(CustomLevelStore::new()),
            results: Mutex::new(ResultLog::new()),
            quizzes: Mutex::new(HashMap::new()),
        }
    }

    /// Resolve a built-in or custom level id.
    pub fn find_level(&self, id: &str) -> Option<Arc<LevelDefinition>> {
        if id.starts_with(CUSTOM_PREFIX) {
            return match self.custom_levels.read() {
                Ok(store) => store.get(id),
                Err(_) => {
                    warn!("[AppState] custom level store poisoned, lookup of {} failed", id);
                    None
                }
            };
        }
        self.catalog.find(id)
    }

    pub fn record_result(&self, record: SessionRecord) {
        info!(
            "[Results] level={} outcome={:?} score={}",
            record.level_name, record.outcome, record.score
        );
        match self.results.lock() {
            Ok(mut log) => log.record(record),
            Err(_) => warn!("[Results] result log poisoned, dropping record {}", record.id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(name: &str) -> CustomLevel {
        CustomLevel {
            name: name.to_string(),
            rows: 3,
            cols: 3,
            walls: vec![vec![1, 1]],
            coins: vec![vec![0, 2]],
            start_row: 0,
            start_col: 0,
            end_row: 2,
            end_col: 2,
        }
    }

    #[test]
    fn test_store_assigns_sequential_ids() {
        let mut store = CustomLevelStore::new();
        let first = store.insert(raw("A")).unwrap();
        let second = store.insert(raw("B")).unwrap();
        assert_eq!(first.id(), "custom_1");
        assert_eq!(second.id(), "custom_2");
        assert_eq!(store.get("custom_2").unwrap().name(), "B");
        assert!(store.get("custom_9").is_none());
        assert!(store.get("1-1").is_none());
    }

    #[test]
    fn test_store_rejects_invalid_level_without_consuming_id() {
        let mut store = CustomLevelStore::new();
        let mut bad = raw("Bad");
        bad.walls.push(vec![0, 0]);
        assert!(store.insert(bad).is_err());
        assert_eq!(store.insert(raw("Good")).unwrap().id(), "custom_1");
    }

    #[test]
    fn test_store_update() {
        let mut store = CustomLevelStore::new();
        store.insert(raw("A")).unwrap();

        let updated = store.update("custom_1", raw("A2")).unwrap().expect("exists");
        assert_eq!(updated.id(), "custom_1");
        assert_eq!(store.get("custom_1").unwrap().name(), "A2");
        assert_eq!(store.update("custom_7", raw("X")), Ok(None));
    }

    #[test]
    fn test_find_level_resolves_both_kinds() {
        let state = AppState::new(Catalog::builtin().unwrap());
        state.custom_levels.write().unwrap().insert(raw("Mine")).unwrap();

        assert_eq!(state.find_level("1-3").unwrap().name(), "Level 1 - Game 3");
        assert_eq!(state.find_level("custom_1").unwrap().name(), "Mine");
        assert!(state.find_level("custom_2").is_none());
        assert!(state.find_level("nope").is_none());
    }
}
