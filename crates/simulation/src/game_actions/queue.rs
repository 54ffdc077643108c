use bevy::prelude::*;
use bitcode::{Decode, Encode};
use serde::{Deserialize, Serialize};

use super::GameAction;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Encode, Decode)]
pub enum ActionSource {
    Player,
    Script,
    Replay,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Encode, Decode)]
pub struct QueuedAction {
    pub tick: u64,
    pub source: ActionSource,
    pub action: GameAction,
}

/// Actions waiting for the next `PreSim` phase. Drained in push order.
#[derive(Resource, Debug, Clone, Default, PartialEq, Serialize, Deserialize, Encode, Decode)]
pub struct ActionQueue {
    pending: Vec<QueuedAction>,
}

impl ActionQueue {
    pub fn push(&mut self, tick: u64, source: ActionSource, action: GameAction) {
        self.pending.push(QueuedAction {
            tick,
            source,
            action,
        });
    }

    pub fn drain(&mut self) -> Vec<QueuedAction> {
        self.pending.drain(..).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_actions::Tool;

    #[test]
    fn test_drain_preserves_order_and_empties() {
        let mut queue = ActionQueue::default();
        for x in 0..3 {
            queue.push(
                0,
                ActionSource::Player,
                GameAction::ApplyTool {
                    tool: Tool::Road,
                    pos: (x, 0),
                },
            );
        }
        assert_eq!(queue.len(), 3);
        let drained = queue.drain();
        assert!(queue.is_empty());
        let xs: Vec<usize> = drained
            .iter()
            .map(|q| match &q.action {
                GameAction::ApplyTool { pos, .. } => pos.0,
                _ => usize::MAX,
            })
            .collect();
        assert_eq!(xs, vec![0, 1, 2]);
    }
}
