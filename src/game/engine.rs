//! Command execution engine.
//!
//! Replays a command queue against a level one step at a time. The engine is
//! the single writer of the run's `GameState`; observers read it through a
//! `tokio::sync::watch` receiver obtained from [`GameEngine::subscribe`].

use std::sync::Arc;
use std::time::Duration;

use log::{debug, info};
use tokio::sync::watch;

use crate::config::game::{PRE_ROLL_DELAY_MS, STEP_DELAY_MS};
use crate::game::level::LevelDefinition;
use crate::game::state::GameState;
use crate::game::systems::{apply_end_of_queue, apply_step, render_grid};
use crate::game::types::{Command, EngineEvent};

/// Pacing between steps. Only affects presentation, never the outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepDelay {
    /// Run straight through without suspending.
    Immediate,
    Fixed { pre_roll: Duration, per_step: Duration },
}

impl Default for StepDelay {
    fn default() -> Self {
        StepDelay::Fixed {
            pre_roll: Duration::from_millis(PRE_ROLL_DELAY_MS),
            per_step: Duration::from_millis(STEP_DELAY_MS),
        }
    }
}

impl StepDelay {
    async fn pre_roll(&self) {
        if let StepDelay::Fixed { pre_roll, .. } = self {
            tokio::time::sleep(*pre_roll).await;
        }
    }

    async fn after_step(&self) {
        if let StepDelay::Fixed { per_step, .. } = self {
            tokio::time::sleep(*per_step).await;
        }
    }
}

pub struct GameEngine {
    level: Arc<LevelDefinition>,
    delay: StepDelay,
    state_tx: watch::Sender<GameState>,
}

impl GameEngine {
    pub fn new(level: Arc<LevelDefinition>) -> Self {
        Self::with_delay(level, StepDelay::default())
    }

    pub fn with_delay(level: Arc<LevelDefinition>, delay: StepDelay) -> Self {
        let (state_tx, _) = watch::channel(GameState::initial(&level));
        Self { level, delay, state_tx }
    }

    pub fn level(&self) -> &LevelDefinition {
        &self.level
    }

    /// Latest published state.
    pub fn state(&self) -> GameState {
        self.state_tx.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<GameState> {
        self.state_tx.subscribe()
    }

    /// Publish the initial state for the level.
    ///
    /// Must not be called while `execute` is in flight.
    pub fn reset(&self) {
        self.state_tx.send_replace(GameState::initial(&self.level));
    }

    /// Replay `commands` and return the terminal state.
    ///
    /// One state is published per processed command. Processing stops at the
    /// first terminal state; remaining commands are discarded. `on_event` fires
    /// when a coin is collected, before that step's state is published.
    /// At most one run may be active per engine.
    pub async fn execute<F>(&self, commands: &[Command], mut on_event: F) -> GameState
    where
        F: FnMut(EngineEvent),
    {
        self.reset();
        debug!("[Engine] level={} run start, {} command(s)", self.level.id(), commands.len());
        self.delay.pre_roll().await;

        let mut state = self.state();
        for &command in commands {
            if state.is_game_over {
                break;
            }
            apply_step(&self.level, &mut state, command, &mut on_event);
            debug!(
                "[Engine] level={} step={} {:?} -> {}\n{}",
                self.level.id(),
                state.steps,
                command,
                state.current_pos,
                render_grid(&self.level, &state)
            );
            self.state_tx.send_replace(state.clone());
            self.delay.after_step().await;
        }

        if !state.is_game_over {
            apply_end_of_queue(&self.level, &mut state);
            self.state_tx.send_replace(state.clone());
        }

        info!(
            "[Engine] level={} finished after {} step(s): {:?} coins={}",
            self.level.id(),
            state.steps,
            state.outcome(),
            state.collected_coins.len()
        );
        state
    }
}

/// Run `commands` on a throwaway engine without pacing.
pub async fn replay(level: Arc<LevelDefinition>, commands: &[Command]) -> GameState {
    GameEngine::with_delay(level, StepDelay::Immediate)
        .execute(commands, |_| {})
        .await
}
