//! Play session logic, independent of the socket.
//!
//! `SessionController` owns the queue and the engine and turns client actions
//! into reply frames. [`forward_run`] drives one run and hands every frame it
//! produces to a sink in publication order.

use std::future::Future;
use std::sync::Arc;

use serde_json::json;
use tokio::sync::mpsc;
use uuid::Uuid;

use crate::game::engine::{GameEngine, StepDelay};
use crate::game::level::LevelDefinition;
use crate::game::queue::CommandQueue;
use crate::game::state::GameState;
use crate::game::types::Command;
use crate::server::play_session::messages::{ClientAction, ServerMessage};
use crate::server::results::{score_for, SessionRecord};
use crate::server::ws_error::{ws_busy, ws_error};

/// What the session must do after an action.
#[derive(Debug)]
pub enum Reaction {
    /// Send these frames back.
    Reply(Vec<ServerMessage>),
    /// Start a run of these commands.
    Run(Vec<Command>),
}

pub struct SessionController {
    pub session_id: Uuid,
    engine: Arc<GameEngine>,
    queue: CommandQueue,
    executing: bool,
}

impl SessionController {
    pub fn new(level: Arc<LevelDefinition>, delay: StepDelay) -> Self {
        Self {
            session_id: Uuid::new_v4(),
            engine: Arc::new(GameEngine::with_delay(level, delay)),
            queue: CommandQueue::new(),
            executing: false,
        }
    }

    pub fn engine(&self) -> Arc<GameEngine> {
        self.engine.clone()
    }

    pub fn level(&self) -> &LevelDefinition {
        self.engine.level()
    }

    pub fn is_executing(&self) -> bool {
        self.executing
    }

    /// Frames sent when the socket opens.
    pub fn greeting(&self) -> Vec<ServerMessage> {
        vec![self.queue_frame(), ServerMessage::State { state: self.engine.state() }]
    }

    fn queue_frame(&self) -> ServerMessage {
        ServerMessage::Queue { commands: self.queue.as_slice().to_vec() }
    }

    pub fn handle(&mut self, action: ClientAction) -> Reaction {
        if self.executing {
            return Reaction::Reply(vec![ws_busy()]);
        }
        match action {
            ClientAction::AddCommand(command) => {
                self.queue.push(command);
                Reaction::Reply(vec![self.queue_frame()])
            }
            ClientAction::RemoveCommand { index } => match self.queue.remove(index) {
                Some(_) => Reaction::Reply(vec![self.queue_frame()]),
                None => Reaction::Reply(vec![ws_error(
                    "INVALID_INDEX",
                    "No command at this position.",
                    Some(json!({ "index": index, "len": self.queue.len() })),
                )]),
            },
            ClientAction::Reset => {
                self.engine.reset();
                self.queue.clear();
                Reaction::Reply(vec![self.queue_frame(), ServerMessage::State { state: self.engine.state() }])
            }
            ClientAction::Execute => {
                self.executing = true;
                Reaction::Run(self.queue.as_slice().to_vec())
            }
        }
    }

    /// Close the current run: the `Finished` frame and the record to store.
    ///
    /// `None` when the state is not terminal, which a finished run never is.
    pub fn finish(&mut self, final_state: &GameState) -> Option<(ServerMessage, SessionRecord)> {
        self.executing = false;
        let outcome = final_state.outcome()?;
        let frame = ServerMessage::Finished {
            outcome,
            message: final_state.error.map(|e| e.message().to_string()),
            score: score_for(outcome),
        };
        Some((frame, SessionRecord::new(self.session_id, self.engine.level(), outcome)))
    }
}

/// Run `commands` on `engine`, passing every published state and coin event to
/// `forward`, and return the terminal state.
///
/// A coin event always precedes the state of the step that collected it.
/// `forward` is awaited before the next frame is produced.
pub async fn forward_run<F, Fut>(engine: &GameEngine, commands: &[Command], mut forward: F) -> GameState
where
    F: FnMut(ServerMessage) -> Fut,
    Fut: Future<Output = ()>,
{
    let mut rx = engine.subscribe();
    let (event_tx, mut events) = mpsc::unbounded_channel();
    let execution = engine.execute(commands, move |event| {
        let _ = event_tx.send(event);
    });
    tokio::pin!(execution);

    let final_state = loop {
        tokio::select! {
            biased;
            Ok(()) = rx.changed() => {
                let state = rx.borrow_and_update().clone();
                while let Ok(event) = events.try_recv() {
                    forward(ServerMessage::from(event)).await;
                }
                forward(ServerMessage::State { state }).await;
            }
            final_state = &mut execution => break final_state,
        }
    };

    while let Ok(event) = events.try_recv() {
        forward(ServerMessage::from(event)).await;
    }
    if rx.has_changed().unwrap_or(false) {
        let state = rx.borrow_and_update().clone();
        forward(ServerMessage::State { state }).await;
    }
    final_state
}
