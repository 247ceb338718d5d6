//! Per-user search history.

use serde::{Deserialize, Serialize};

/// Maximum number of remembered queries.
pub const HISTORY_LIMIT: usize = 10;

/// Recent queries, most recent first, without duplicates.
///
/// Stored as a bare JSON array of strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SearchHistory(Vec<String>);

impl SearchHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a history from stored entries, re-applying the ordering rules
    /// so a hand-edited file cannot break them.
    pub fn from_entries(entries: Vec<String>) -> Self {
        let mut history = Self::new();
        for entry in entries.into_iter().rev() {
            history.push(&entry);
        }
        history
    }

    /// Records a query.
    ///
    /// Whitespace-only queries are ignored. An existing equal entry moves to
    /// the front instead of being duplicated.
    ///
    /// Returns `true` if the history changed.
    pub fn push(&mut self, query: &str) -> bool {
        if query.trim().is_empty() {
            return false;
        }
        let before = self.0.clone();
        self.0.retain(|q| q != query);
        self.0.insert(0, query.to_string());
        self.0.truncate(HISTORY_LIMIT);
        self.0 != before
    }

    pub fn entries(&self) -> &[String] {
        &self.0
    }

    pub fn into_entries(self) -> Vec<String> {
        self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_push_moves_existing_to_front() {
        let mut history = SearchHistory::new();
        history.push("alien");
        history.push("heat");
        history.push("alien");
        assert_eq!(history.entries(), ["alien", "heat"]);
    }

    #[test]
    fn test_whitespace_is_ignored() {
        let mut history = SearchHistory::new();
        history.push("heat");
        assert!(!history.push("   "));
        assert!(!history.push(""));
        assert_eq!(history.entries(), ["heat"]);
    }

    #[test]
    fn test_capped_and_unique_for_any_sequence() {
        let mut history = SearchHistory::new();
        let queries = [
            "a", "b", "c", "a", "d", "e", "f", "g", "b", "h", "i", "j", "k", "l", "a", " ", "m",
        ];
        for q in queries {
            history.push(q);
            let unique: HashSet<_> = history.entries().iter().collect();
            assert_eq!(unique.len(), history.len());
            assert!(history.len() <= HISTORY_LIMIT);
            if !q.trim().is_empty() {
                assert_eq!(history.entries()[0], q);
            }
        }
        assert_eq!(history.entries()[0], "m");
        assert_eq!(history.entries()[1], "a");
    }

    #[test]
    fn test_from_entries_normalizes() {
        let history = SearchHistory::from_entries(vec![
            "x".to_string(),
            "y".to_string(),
            "x".to_string(),
        ]);
        assert_eq!(history.entries(), ["x", "y"]);
    }
}
