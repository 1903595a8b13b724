//! Bounded log of recent successful calculations, newest first

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// A single completed calculation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// The expression as it appeared in the display
    pub expression: String,
    /// The normalized result text
    pub result: String,
}

impl HistoryEntry {
    /// Creates a new history entry
    #[must_use]
    pub fn new(expression: impl Into<String>, result: impl Into<String>) -> Self {
        Self {
            expression: expression.into(),
            result: result.into(),
        }
    }

    /// Returns the `"<expression> = <result>"` display line
    #[must_use]
    pub fn display(&self) -> String {
        format!("{} = {}", self.expression, self.result)
    }
}

/// Calculation history
///
/// Front of the queue is the newest entry. Recording past capacity
/// evicts from the back.
#[derive(Debug, Clone)]
pub struct HistoryLog {
    entries: VecDeque<HistoryEntry>,
    capacity: usize,
}

impl Default for HistoryLog {
    fn default() -> Self {
        Self::new()
    }
}

impl HistoryLog {
    /// Default number of retained calculations
    pub const DEFAULT_CAPACITY: usize = 10;

    /// Creates a history with the default capacity
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(Self::DEFAULT_CAPACITY)
    }

    /// Creates a history keeping at most `capacity` entries (minimum 1)
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity + 1),
            capacity,
        }
    }

    /// Prepends a calculation, dropping the oldest one past capacity
    pub fn record(&mut self, expression: &str, result: &str) {
        self.entries.push_front(HistoryEntry::new(expression, result));
        if self.entries.len() > self.capacity {
            self.entries.pop_back();
        }
    }

    /// Returns the entries, newest first
    pub fn entries(&self) -> impl ExactSizeIterator<Item = &HistoryEntry> {
        self.entries.iter()
    }

    /// Returns the display lines, newest first
    #[must_use]
    pub fn rendered(&self) -> Vec<String> {
        self.entries.iter().map(HistoryEntry::display).collect()
    }

    /// Returns the most recent entry
    #[must_use]
    pub fn latest(&self) -> Option<&HistoryEntry> {
        self.entries.front()
    }

    /// Returns the number of entries
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing has been recorded
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the maximum number of entries
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Serializes the entries (newest first) for the browser side
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.entries)
    }
}
