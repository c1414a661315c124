//! Built-in level catalog.

use std::sync::Arc;

use crate::game::level::{LevelDefinition, LevelError, LevelLayout};
use crate::game::types::GridPosition;

struct LevelSpec {
    id: &'static str,
    name: &'static str,
    size: i32,
    start: (i32, i32),
    end: (i32, i32),
    walls: &'static [(i32, i32)],
    coins: &'static [(i32, i32)],
}

const BUILTIN: &[LevelSpec] = &[
    // Level 1: simple paths
    LevelSpec {
        id: "1-1", name: "Level 1 - Game 1", size: 5,
        start: (0, 0), end: (0, 4),
        walls: &[],
        coins: &[(0, 2)],
    },
    LevelSpec {
        id: "1-2", name: "Level 1 - Game 2", size: 5,
        start: (2, 0), end: (2, 4),
        walls: &[(1, 2), (3, 2)],
        coins: &[(2, 2)],
    },
    LevelSpec {
        id: "1-3", name: "Level 1 - Game 3", size: 5,
        start: (4, 0), end: (0, 4),
        walls: &[(2, 2)],
        coins: &[(4, 2), (2, 4)],
    },
    // Level 2: more obstacles
    LevelSpec {
        id: "2-1", name: "Level 2 - Game 1", size: 6,
        start: (0, 0), end: (5, 5),
        walls: &[(0, 1), (1, 1), (2, 1)],
        coins: &[(3, 3)],
    },
    LevelSpec {
        id: "2-2", name: "Level 2 - Game 2", size: 6,
        start: (5, 0), end: (0, 5),
        walls: &[(2, 2), (2, 3), (3, 2), (3, 3)],
        coins: &[(0, 0), (5, 5)],
    },
    LevelSpec {
        id: "2-3", name: "Level 2 - Game 3", size: 7,
        start: (3, 3), end: (6, 6),
        walls: &[(4, 4), (5, 5)],
        coins: &[(3, 4), (4, 5)],
    },
];

fn cells(list: &[(i32, i32)]) -> impl Iterator<Item = GridPosition> + '_ {
    list.iter().map(|&(row, col)| GridPosition::new(row, col))
}

/// The fixed set of puzzles shipped with the game, in play order.
#[derive(Debug, Clone)]
pub struct Catalog {
    levels: Vec<Arc<LevelDefinition>>,
}

impl Catalog {
    pub fn builtin() -> Result<Self, LevelError> {
        let levels = BUILTIN.iter()
            .map(|spec| {
                let layout = LevelLayout::new(
                    spec.size,
                    spec.size,
                    GridPosition::new(spec.start.0, spec.start.1),
                    GridPosition::new(spec.end.0, spec.end.1),
                )
                .with_walls(cells(spec.walls))
                .with_coins(cells(spec.coins));
                LevelDefinition::new(spec.id, spec.name, layout).map(Arc::new)
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { levels })
    }

    pub fn levels(&self) -> &[Arc<LevelDefinition>] {
        &self.levels
    }

    pub fn find(&self, id: &str) -> Option<Arc<LevelDefinition>> {
        self.levels.iter().find(|l| l.id() == id).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_levels_are_valid() {
        let catalog = Catalog::builtin().expect("built-in levels validate");
        let ids: Vec<&str> = catalog.levels().iter().map(|l| l.id()).collect();
        assert_eq!(ids, vec!["1-1", "1-2", "1-3", "2-1", "2-2", "2-3"]);
    }

    #[test]
    fn test_find() {
        let catalog = Catalog::builtin().unwrap();
        let level = catalog.find("2-3").expect("exists");
        assert_eq!(level.rows(), 7);
        assert_eq!(level.start_pos(), GridPosition::new(3, 3));
        assert!(catalog.find("9-9").is_none());
    }
}
