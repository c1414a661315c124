use serde::{Serialize, Deserialize};

use crate::game::types::Command;

/// The program the player assembles before pressing run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CommandQueue {
    commands: Vec<Command>,
}

impl CommandQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, command: Command) {
        self.commands.push(command);
    }

    /// Remove the command at `index`; out-of-range indices leave the queue untouched.
    pub fn remove(&mut self, index: usize) -> Option<Command> {
        (index < self.commands.len()).then(|| self.commands.remove(index))
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn as_slice(&self) -> &[Command] {
        &self.commands
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::types::Command::*;

    #[test]
    fn test_push_and_remove() {
        let mut queue = CommandQueue::new();
        queue.push(Up);
        queue.push(Right);
        queue.push(Down);

        assert_eq!(queue.remove(1), Some(Right));
        assert_eq!(queue.as_slice(), &[Up, Down]);
        assert_eq!(queue.remove(5), None);
        assert_eq!(queue.len(), 2);

        queue.clear();
        assert!(queue.is_empty());
    }

    #[test]
    fn test_serializes_as_plain_list() {
        let mut queue = CommandQueue::new();
        queue.push(Left);
        queue.push(Right);
        assert_eq!(serde_json::to_string(&queue).unwrap(), r#"["Left","Right"]"#);
    }
}
