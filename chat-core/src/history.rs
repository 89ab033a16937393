//! Bounded per-session conversation log.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

/// One exchanged pair of messages.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationTurn {
    pub user_message: String,
    pub assistant_message: String,
}

/// Strict-FIFO bounded log of conversation turns.
///
/// One instance per session; sessions never share state. Eviction is by
/// capacity only, oldest first, amortized O(1).
#[derive(Clone, Debug)]
pub struct ConversationHistory {
    turns: VecDeque<ConversationTurn>,
    capacity: usize,
}

impl ConversationHistory {
    pub fn new(capacity: usize) -> Self {
        Self {
            turns: VecDeque::with_capacity(capacity.min(64)),
            capacity,
        }
    }

    /// Appends a turn, evicting the oldest when over capacity.
    pub fn append(&mut self, turn: ConversationTurn) {
        if self.capacity == 0 {
            return;
        }
        if self.turns.len() == self.capacity {
            self.turns.pop_front();
        }
        self.turns.push_back(turn);
    }

    /// A copy of the turns in chronological order, not a live view.
    pub fn history(&self) -> Vec<ConversationTurn> {
        self.turns.iter().cloned().collect()
    }

    pub fn clear(&mut self) {
        self.turns.clear();
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Changes the capacity; shrinking immediately drops the oldest turns.
    pub fn set_capacity(&mut self, capacity: usize) {
        self.capacity = capacity;
        while self.turns.len() > capacity {
            self.turns.pop_front();
        }
    }

    /// Renders the log as plain text for the retrieval-free chat path.
    pub fn render(&self) -> String {
        if self.turns.is_empty() {
            return String::new();
        }
        let mut out = String::from("\n\n=== Conversation history ===\n");
        for t in &self.turns {
            out.push_str(&format!(
                "\nUser: {}\nAssistant: {}\n",
                t.user_message, t.assistant_message
            ));
        }
        out.push_str("=== End of history ===\n\n");
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn turn(n: usize) -> ConversationTurn {
        ConversationTurn {
            user_message: format!("q{n}"),
            assistant_message: format!("a{n}"),
        }
    }

    #[test]
    fn bounded_fifo_keeps_most_recent_in_order() {
        let mut h = ConversationHistory::new(3);
        for n in 0..7 {
            h.append(turn(n));
        }
        let got = h.history();
        assert_eq!(got.len(), 3);
        assert_eq!(got[0], turn(4));
        assert_eq!(got[2], turn(6));
    }

    #[test]
    fn shrinking_capacity_truncates_immediately() {
        let mut h = ConversationHistory::new(5);
        for n in 0..5 {
            h.append(turn(n));
        }
        h.set_capacity(2);
        let got = h.history();
        assert_eq!(got.len(), 2);
        assert_eq!(got[0], turn(3));
        assert_eq!(got[1], turn(4));
    }

    #[test]
    fn history_returns_a_copy() {
        let mut h = ConversationHistory::new(3);
        h.append(turn(0));
        let mut copy = h.history();
        copy.clear();
        assert_eq!(h.len(), 1);
    }

    #[test]
    fn render_labels_both_speakers() {
        let mut h = ConversationHistory::new(3);
        h.append(turn(1));
        let text = h.render();
        assert!(text.contains("User: q1"));
        assert!(text.contains("Assistant: a1"));
    }

    #[test]
    fn empty_history_renders_empty() {
        assert!(ConversationHistory::new(3).render().is_empty());
    }
}
