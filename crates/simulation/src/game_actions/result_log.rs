//! Ring-buffer log of recently executed game actions and their results.

use bevy::prelude::*;

use super::{ActionResult, GameAction};

/// Maximum number of entries retained in the ring buffer.
const MAX_ENTRIES: usize = 64;

#[derive(Resource, Debug, Clone, Default)]
pub struct ActionResultLog {
    entries: Vec<(GameAction, ActionResult)>,
}

impl ActionResultLog {
    /// Records a pair, evicting the oldest entry when full.
    pub fn push(&mut self, action: GameAction, result: ActionResult) {
        if self.entries.len() >= MAX_ENTRIES {
            self.entries.remove(0);
        }
        self.entries.push((action, result));
    }

    /// The last `n` entries, oldest first.
    pub fn last_n(&self, n: usize) -> &[(GameAction, ActionResult)] {
        let start = self.entries.len().saturating_sub(n);
        &self.entries[start..]
    }

    pub fn last(&self) -> Option<&(GameAction, ActionResult)> {
        self.entries.last()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_actions::{ActionError, Tool};

    fn road_at(x: usize) -> GameAction {
        GameAction::ApplyTool {
            tool: Tool::Road,
            pos: (x, 0),
        }
    }

    #[test]
    fn push_and_last_n() {
        let mut log = ActionResultLog::default();
        log.push(road_at(0), ActionResult::Success);
        log.push(road_at(1), ActionResult::Error(ActionError::OutOfBounds));

        let last = log.last_n(1);
        assert_eq!(last.len(), 1);
        assert_eq!(last[0].0, road_at(1));
        assert_eq!(log.last_n(10).len(), 2);
    }

    #[test]
    fn evicts_oldest_when_full() {
        let mut log = ActionResultLog::default();
        for x in 0..70 {
            log.push(road_at(x), ActionResult::Success);
        }
        assert_eq!(log.len(), MAX_ENTRIES);
        assert_eq!(log.last_n(MAX_ENTRIES)[0].0, road_at(6));
    }

    #[test]
    fn clear_empties_log() {
        let mut log = ActionResultLog::default();
        log.push(road_at(0), ActionResult::Success);
        assert!(!log.is_empty());
        log.clear();
        assert!(log.is_empty());
        assert!(log.last().is_none());
    }
}
