//! Run records and session history

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One stored result of a full pipeline execution
///
/// Created once per successful run; never mutated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunRecord {
    /// Unique record identifier
    pub id: String,
    /// The user's original query
    pub query: String,
    /// The final refined markdown output
    pub output: String,
    /// When the run completed
    pub timestamp: DateTime<Utc>,
}

impl RunRecord {
    pub fn new(query: impl Into<String>, output: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::now_v7().to_string(),
            query: query.into(),
            output: output.into(),
            timestamp: Utc::now(),
        }
    }
}

/// Session-scoped, most-recent-first run history
///
/// Append-only until an explicit clear. Owned and mutated exclusively by
/// the presentation layer; the manager and workers never touch it.
#[derive(Debug, Default)]
pub struct SessionHistory {
    runs: Vec<RunRecord>,
}

impl SessionHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a successful run; becomes the new most-recent record.
    pub fn record(&mut self, query: impl Into<String>, output: impl Into<String>) -> &RunRecord {
        self.runs.insert(0, RunRecord::new(query, output));
        &self.runs[0]
    }

    /// The most recent run, if any.
    pub fn latest(&self) -> Option<&RunRecord> {
        self.runs.first()
    }

    /// All runs, most recent first.
    pub fn runs(&self) -> &[RunRecord] {
        &self.runs
    }

    /// Explicit user-triggered reset.
    pub fn clear(&mut self) {
        self.runs.clear();
    }

    pub fn len(&self) -> usize {
        self.runs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_most_recent_first() {
        let mut history = SessionHistory::new();
        history.record("first query", "first output");
        history.record("second query", "second output");

        assert_eq!(history.len(), 2);
        assert_eq!(history.latest().unwrap().query, "second query");
        assert_eq!(history.runs()[1].query, "first query");
    }

    #[test]
    fn test_records_are_unique() {
        let mut history = SessionHistory::new();
        history.record("q", "o");
        history.record("q", "o");
        assert_ne!(history.runs()[0].id, history.runs()[1].id);
    }

    #[test]
    fn test_clear_resets_history() {
        let mut history = SessionHistory::new();
        for i in 0..5 {
            history.record(format!("query {i}"), "output");
        }
        assert_eq!(history.len(), 5);

        history.clear();
        assert!(history.is_empty());
        assert!(history.latest().is_none());
    }
}
