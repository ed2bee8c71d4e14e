// Linear undo/redo history over whole-surface states.
//
// `states[..=current_index]` is the undo side, `states[current_index + 1..]` the redo tail.
// Appending after an undo throws the redo tail away; there is no branching.

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct History<T> {
    states: Vec<T>,
    /// `None` while empty, otherwise always a valid index into `states`.
    current_index: Option<usize>,

    /// Oldest states are dropped once this many are held. `None` keeps everything.
    #[serde(default)]
    max_states: Option<usize>,
}

impl<T> Default for History<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> History<T> {
    pub fn new() -> Self {
        Self {
            states: Vec::new(),
            current_index: None,
            max_states: None,
        }
    }

    /// A history that keeps at most `max_states` entries (at least one).
    pub fn with_max_states(max_states: usize) -> Self {
        Self {
            max_states: Some(max_states.max(1)),
            ..Self::new()
        }
    }

    /// Record a new state and make it current. Everything after the cursor is discarded first.
    pub fn append(&mut self, state: T) {
        let keep = self.current_index.map_or(0, |i| i + 1);
        if keep < self.states.len() {
            debug!(
                dropped = self.states.len() - keep,
                "discarding redo tail before append"
            );
            self.states.truncate(keep);
        }

        self.states.push(state);

        if let Some(max) = self.max_states {
            if self.states.len() > max {
                let excess = self.states.len() - max;
                trace!(excess, max, "history over capacity, dropping oldest states");
                self.states.drain(..excess);
            }
        }

        self.current_index = Some(self.states.len() - 1);
        debug!(
            cursor = self.states.len() - 1,
            len = self.states.len(),
            "state appended"
        );
    }

    /// Step back one state and return it. `None` (and no change) at the oldest state.
    pub fn undo(&mut self) -> Option<&T> {
        match self.current_index {
            Some(i) if i > 0 => {
                self.current_index = Some(i - 1);
                debug!(cursor = i - 1, len = self.states.len(), "undo");
                self.states.get(i - 1)
            }
            _ => {
                debug!("undo ignored, already at oldest state");
                None
            }
        }
    }

    /// Step forward one state and return it. `None` (and no change) at the newest state.
    pub fn redo(&mut self) -> Option<&T> {
        match self.current_index {
            Some(i) if i + 1 < self.states.len() => {
                self.current_index = Some(i + 1);
                debug!(cursor = i + 1, len = self.states.len(), "redo");
                self.states.get(i + 1)
            }
            _ => {
                debug!("redo ignored, already at newest state");
                None
            }
        }
    }

    /// Forget every state. Callers append a fresh state right after.
    pub fn reset(&mut self) {
        debug!(len = self.states.len(), "history reset");
        self.states.clear();
        self.current_index = None;
    }

    pub fn current(&self) -> Option<&T> {
        self.current_index.and_then(|i| self.states.get(i))
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.states.get(index)
    }

    /// Index of the current state; `None` when empty.
    pub fn cursor(&self) -> Option<usize> {
        self.current_index
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn can_undo(&self) -> bool {
        matches!(self.current_index, Some(i) if i > 0)
    }

    pub fn can_redo(&self) -> bool {
        matches!(self.current_index, Some(i) if i + 1 < self.states.len())
    }

    pub fn max_states(&self) -> Option<usize> {
        self.max_states
    }

    pub fn states(&self) -> &[T] {
        &self.states
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn history_of(items: &[&'static str]) -> History<&'static str> {
        let mut history = History::new();
        for item in items {
            history.append(*item);
        }
        history
    }

    #[test]
    fn test_new_history_is_empty() {
        let history: History<u8> = History::new();
        assert!(history.is_empty());
        assert_eq!(history.cursor(), None);
        assert_eq!(history.current(), None);
        assert!(!history.can_undo());
        assert!(!history.can_redo());
    }

    #[test]
    fn test_undo_redo_on_empty_are_noops() {
        let mut history: History<u8> = History::new();
        assert_eq!(history.undo(), None);
        assert_eq!(history.redo(), None);
        assert_eq!(history.cursor(), None);
    }

    #[test]
    fn test_append_moves_cursor_to_tail() {
        let history = history_of(&["a", "b", "c"]);
        assert_eq!(history.len(), 3);
        assert_eq!(history.cursor(), Some(2));
        assert_eq!(history.current(), Some(&"c"));
    }

    #[test]
    fn test_undo_at_oldest_is_noop() {
        let mut history = history_of(&["a"]);
        assert_eq!(history.undo(), None);
        assert_eq!(history.cursor(), Some(0));
    }

    #[test]
    fn test_redo_at_newest_is_noop() {
        let mut history = history_of(&["a", "b"]);
        assert_eq!(history.redo(), None);
        assert_eq!(history.cursor(), Some(1));
    }

    #[test]
    fn test_append_after_undo_truncates() {
        let mut history = history_of(&["A", "B", "C"]);
        assert_eq!(history.undo(), Some(&"B"));
        assert_eq!(history.undo(), Some(&"A"));

        history.append("D");

        assert_eq!(history.states(), &["A", "D"]);
        assert_eq!(history.cursor(), Some(1));
        assert!(!history.can_redo());
    }

    #[test]
    fn test_reset_then_append() {
        let mut history = history_of(&["a", "b"]);
        history.reset();
        assert!(history.is_empty());
        assert_eq!(history.cursor(), None);

        history.append("blank");
        assert_eq!(history.len(), 1);
        assert_eq!(history.cursor(), Some(0));
        assert_eq!(history.undo(), None);
    }

    #[test]
    fn test_max_states_drops_oldest() {
        let mut history = History::with_max_states(3);
        for i in 0..5 {
            history.append(i);
        }
        assert_eq!(history.states(), &[2, 3, 4]);
        assert_eq!(history.cursor(), Some(2));

        assert_eq!(history.undo(), Some(&3));
        assert_eq!(history.undo(), Some(&2));
        assert_eq!(history.undo(), None);
    }

    #[test]
    fn test_zero_capacity_still_holds_current() {
        let mut history = History::with_max_states(0);
        history.append('x');
        history.append('y');
        assert_eq!(history.states(), &['y']);
        assert_eq!(history.cursor(), Some(0));
    }

    #[test]
    fn test_serde_default_max_states() {
        let json = r#"{"states":[1,2],"current_index":1}"#;
        let history: History<u32> = serde_json::from_str(json).unwrap();
        assert_eq!(history.max_states(), None);
        assert_eq!(history.current(), Some(&2));
    }
}
