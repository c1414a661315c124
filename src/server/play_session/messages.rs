use actix::prelude::*;
use serde::{Serialize, Deserialize};
use serde_json::Value;

use crate::game::state::GameState;
use crate::game::types::{Command, EngineEvent, GameOutcome, GridPosition};

/// Frames sent by the client, e.g. `{"action":"AddCommand","data":"Up"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", content = "data")]
pub enum ClientAction {
    AddCommand(Command),
    RemoveCommand { index: usize },
    Reset,
    Execute,
}

/// Frames pushed to the client.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "action", content = "data")]
pub enum ServerMessage {
    Queue { commands: Vec<Command> },
    State { state: GameState },
    Event { name: String, pos: GridPosition },
    Finished { outcome: GameOutcome, message: Option<String>, score: u32 },
    Error { code: String, message: String, context: Value },
}

impl ServerMessage {
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }
}

impl From<EngineEvent> for ServerMessage {
    fn from(event: EngineEvent) -> Self {
        match event {
            EngineEvent::CoinCollected(pos) => ServerMessage::Event { name: event.name().to_string(), pos },
        }
    }
}

/// A frame produced while a run is in flight, delivered through the actor's
/// mailbox so it reaches the socket in order.
#[derive(Message, Clone, Debug)]
#[rtype(result = "()")]
pub struct Outgoing(pub ServerMessage);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_action_parsing() {
        let add: ClientAction = serde_json::from_str(r#"{"action":"AddCommand","data":"Left"}"#).unwrap();
        assert_eq!(add, ClientAction::AddCommand(Command::Left));

        let remove: ClientAction = serde_json::from_str(r#"{"action":"RemoveCommand","data":{"index":2}}"#).unwrap();
        assert_eq!(remove, ClientAction::RemoveCommand { index: 2 });

        let run: ClientAction = serde_json::from_str(r#"{"action":"Execute"}"#).unwrap();
        assert_eq!(run, ClientAction::Execute);

        assert!(serde_json::from_str::<ClientAction>(r#"{"action":"Jump"}"#).is_err());
    }

    #[test]
    fn test_coin_event_frame() {
        let frame = ServerMessage::from(EngineEvent::CoinCollected(GridPosition::new(0, 2))).to_json();
        let value: Value = serde_json::from_str(&frame).unwrap();
        assert_eq!(value["action"], "Event");
        assert_eq!(value["data"]["name"], "coin");
        assert_eq!(value["data"]["pos"]["col"], 2);
    }
}
