use chrono::Local;
use serde::{Deserialize, Serialize};

/// Number of entries shown when no limit is configured
pub const DEFAULT_DISPLAY_LIMIT: usize = 10;

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub number: String,
    pub timestamp: String,
}

impl HistoryEntry {
    pub fn new(number: impl Into<String>) -> Self {
        Self {
            number: number.into(),
            timestamp: Local::now().format(TIMESTAMP_FORMAT).to_string(),
        }
    }

    /// One-line form used by list widgets, e.g. "+1 650-253-0000 - 2024-05-01 10:00:00"
    pub fn display_line(&self) -> String {
        format!("{} - {}", self.number, self.timestamp)
    }
}

/// Successful lookups, oldest first as stored on disk
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SearchHistory {
    entries: Vec<HistoryEntry>,
}

impl SearchHistory {
    /// Appends a lookup stamped with the current local time
    pub fn record(&mut self, number: &str) -> &HistoryEntry {
        self.push(HistoryEntry::new(number.trim()));
        &self.entries[self.entries.len() - 1]
    }

    pub fn push(&mut self, entry: HistoryEntry) {
        self.entries.push(entry);
    }

    /// Most recent entries first, at most `limit` of them
    pub fn recent(&self, limit: usize) -> Vec<&HistoryEntry> {
        self.entries.iter().rev().take(limit).collect()
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

    fn entry(number: &str, timestamp: &str) -> HistoryEntry {
        HistoryEntry {
            number: number.to_string(),
            timestamp: timestamp.to_string(),
        }
    }

    #[test]
    fn test_should_show_at_most_ten_entries_newest_first() {
        let mut history = SearchHistory::default();
        for i in 0..15 {
            history.push(entry(&format!("+1 650-253-00{:02}", i), "2024-01-01 00:00:00"));
        }

        let recent = history.recent(DEFAULT_DISPLAY_LIMIT);
        assert_eq!(recent.len(), 10);
        assert_eq!(recent[0].number, "+1 650-253-0014");
        assert_eq!(recent[9].number, "+1 650-253-0005");
        assert_eq!(history.len(), 15);
    }

    #[test]
    fn test_should_show_everything_when_below_the_limit() {
        let mut history = SearchHistory::default();
        history.push(entry("+1", "a"));
        history.push(entry("+2", "b"));

        let numbers: Vec<_> = history
            .recent(DEFAULT_DISPLAY_LIMIT)
            .iter()
            .map(|e| e.number.as_str())
            .collect();
        assert_eq!(numbers, vec!["+2", "+1"]);
    }

    #[test]
    fn test_should_stamp_recorded_entries() {
        let mut history = SearchHistory::default();
        let recorded = history.record("  +44 20 7031 3000 ").clone();

        assert_eq!(recorded.number, "+44 20 7031 3000");
        assert_eq!(recorded.timestamp.len(), "2024-01-01 00:00:00".len());
        assert!(
            chrono::NaiveDateTime::parse_from_str(&recorded.timestamp, TIMESTAMP_FORMAT).is_ok()
        );
    }

    #[test]
    fn test_should_clear_all_entries() {
        let mut history = SearchHistory::default();
        history.record("+1 650-253-0000");
        history.clear();
        assert!(history.is_empty());
    }

    #[test]
    fn test_should_serialize_as_a_plain_array() {
        let mut history = SearchHistory::default();
        history.push(entry("+1 650-253-0000", "2024-05-01 10:00:00"));
        let json = serde_json::to_string(&history).expect("serialize");
        assert_eq!(
            json,
            r#"[{"number":"+1 650-253-0000","timestamp":"2024-05-01 10:00:00"}]"#
        );
        assert_eq!(
            history.recent(1)[0].display_line(),
            "+1 650-253-0000 - 2024-05-01 10:00:00"
        );
    }
}
