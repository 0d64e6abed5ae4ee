//! Query history.
//!
//! The rendering core never touches history; callers record rendered text
//! through a [`HistoryStore`] after a user action.

use crate::error::{GenError, GenResult};
use crate::model::Operation;
use chrono::{Local, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::path::Path;
use uuid::Uuid;

/// Default number of retained entries.
pub const DEFAULT_CAPACITY: usize = 100;

const PREVIEW_LEN: usize = 60;
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One recorded query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: Uuid,
    pub query: String,
    pub operation: Operation,
    pub bucket: String,
    pub timestamp: NaiveDateTime,
    #[serde(default)]
    pub favorite: bool,
}

impl HistoryEntry {
    pub fn new(query: impl Into<String>, operation: Operation, bucket: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            query: query.into(),
            operation,
            bucket: bucket.into(),
            timestamp: now(),
            favorite: false,
        }
    }

    /// Single-line preview, at most 60 characters.
    pub fn preview(&self) -> String {
        let single = self.query.replace('\n', " ").replace('\r', "");
        let single = single.trim();
        if single.chars().count() <= PREVIEW_LEN {
            return single.to_string();
        }
        let mut out: String = single.chars().take(PREVIEW_LEN - 3).collect();
        out.push_str("...");
        out
    }

    /// `YYYY-MM-DD HH:MM:SS`
    pub fn formatted_timestamp(&self) -> String {
        self.timestamp.format(TIMESTAMP_FORMAT).to_string()
    }
}

fn now() -> NaiveDateTime {
    Local::now().naive_local()
}

/// Repository of rendered queries, newest first.
pub trait HistoryStore {
    /// Record a rendered query. Blank text is ignored.
    fn record(&mut self, query: &str, operation: Operation, bucket: &str);

    /// All entries, newest first.
    fn entries(&self) -> &[HistoryEntry];

    fn favorites(&self) -> Vec<&HistoryEntry> {
        self.entries().iter().filter(|e| e.favorite).collect()
    }

    /// Entries whose query or bucket contains `term`, ignoring case. A blank
    /// term matches everything.
    fn search(&self, term: &str) -> Vec<&HistoryEntry> {
        let term = term.trim().to_lowercase();
        self.entries()
            .iter()
            .filter(|e| {
                term.is_empty()
                    || e.query.to_lowercase().contains(&term)
                    || e.bucket.to_lowercase().contains(&term)
            })
            .collect()
    }

    /// Flip the favorite flag; returns the new value.
    fn toggle_favorite(&mut self, id: Uuid) -> GenResult<bool>;

    fn remove(&mut self, id: Uuid) -> GenResult<HistoryEntry>;

    /// Drop every non-favorite entry.
    fn clear(&mut self);
}

/// Bounded in-memory history.
#[derive(Debug, Clone)]
pub struct InMemoryHistory {
    entries: Vec<HistoryEntry>,
    capacity: usize,
}

impl Default for InMemoryHistory {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryHistory {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::new(),
            capacity: capacity.max(1),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, id: Uuid) -> Option<&HistoryEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// Replace the contents with entries serialized by [`Self::save_json`].
    pub fn load_json(&mut self, json: &str) -> GenResult<()> {
        self.entries = serde_json::from_str(json)?;
        self.trim();
        Ok(())
    }

    pub fn save_json(&self) -> GenResult<String> {
        Ok(serde_json::to_string_pretty(&self.entries)?)
    }

    /// Load from `path`; a missing file leaves the history empty.
    pub fn load_file(&mut self, path: &Path) -> GenResult<()> {
        match std::fs::read_to_string(path) {
            Ok(json) => self.load_json(&json),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    /// Write to `path`, creating parent directories.
    pub fn save_file(&self, path: &Path) -> GenResult<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, self.save_json()?)?;
        Ok(())
    }

    // Favorites first, then the most recent non-favorites up to capacity.
    fn trim(&mut self) {
        if self.entries.len() <= self.capacity {
            return;
        }
        let (favorites, others): (Vec<_>, Vec<_>) =
            self.entries.drain(..).partition(|e| e.favorite);
        let room = self.capacity.saturating_sub(favorites.len());
        self.entries = favorites;
        self.entries.extend(others.into_iter().take(room));
    }

    fn position(&self, id: Uuid) -> GenResult<usize> {
        self.entries
            .iter()
            .position(|e| e.id == id)
            .ok_or_else(|| GenError::not_found(format!("history entry {id}")))
    }
}

impl HistoryStore for InMemoryHistory {
    fn record(&mut self, query: &str, operation: Operation, bucket: &str) {
        if query.trim().is_empty() {
            return;
        }
        if let Some(pos) = self.entries.iter().position(|e| e.query == query) {
            let mut existing = self.entries.remove(pos);
            existing.timestamp = now();
            self.entries.insert(0, existing);
            return;
        }
        self.entries.insert(0, HistoryEntry::new(query, operation, bucket));
        self.trim();
    }

    fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    fn toggle_favorite(&mut self, id: Uuid) -> GenResult<bool> {
        let pos = self.position(id)?;
        let entry = &mut self.entries[pos];
        entry.favorite = !entry.favorite;
        Ok(entry.favorite)
    }

    fn remove(&mut self, id: Uuid) -> GenResult<HistoryEntry> {
        let pos = self.position(id)?;
        Ok(self.entries.remove(pos))
    }

    fn clear(&mut self) {
        self.entries.retain(|e| e.favorite);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record_n(history: &mut InMemoryHistory, n: usize) {
        for i in 0..n {
            history.record(&format!("SELECT {i}"), Operation::Select, "b");
        }
    }

    #[test]
    fn newest_first_and_blank_ignored() {
        let mut history = InMemoryHistory::new();
        history.record("SELECT 1", Operation::Select, "a");
        history.record("  ", Operation::Select, "a");
        history.record("SELECT 2", Operation::Select, "a");

        let queries: Vec<&str> = history.entries().iter().map(|e| e.query.as_str()).collect();
        assert_eq!(queries, vec!["SELECT 2", "SELECT 1"]);
    }

    #[test]
    fn duplicate_moves_to_top() {
        let mut history = InMemoryHistory::new();
        history.record("SELECT 1", Operation::Select, "a");
        let id = history.entries()[0].id;
        history.record("SELECT 2", Operation::Select, "a");
        history.record("SELECT 1", Operation::Select, "a");

        assert_eq!(history.len(), 2);
        assert_eq!(history.entries()[0].id, id);
        assert_eq!(history.entries()[0].query, "SELECT 1");
    }

    #[test]
    fn trim_keeps_favorites() {
        let mut history = InMemoryHistory::with_capacity(3);
        history.record("old favorite", Operation::Select, "b");
        let fav = history.entries()[0].id;
        history.toggle_favorite(fav).unwrap();
        record_n(&mut history, 5);

        assert_eq!(history.len(), 3);
        let queries: Vec<&str> = history.entries().iter().map(|e| e.query.as_str()).collect();
        assert_eq!(queries, vec!["old favorite", "SELECT 4", "SELECT 3"]);
    }

    #[test]
    fn search_matches_query_or_bucket() {
        let mut history = InMemoryHistory::new();
        history.record("SELECT * FROM `users`", Operation::Select, "users");
        history.record("DELETE FROM `orders`", Operation::Delete, "orders");

        assert_eq!(history.search("delete").len(), 1);
        assert_eq!(history.search("USERS").len(), 1);
        assert_eq!(history.search(" ").len(), 2);
        assert!(history.search("nothing").is_empty());
    }

    #[test]
    fn toggle_remove_and_clear() {
        let mut history = InMemoryHistory::new();
        record_n(&mut history, 3);
        let keep = history.entries()[1].id;
        assert!(history.toggle_favorite(keep).unwrap());
        assert_eq!(history.favorites().len(), 1);

        let dropped = history.entries()[0].id;
        assert_eq!(history.remove(dropped).unwrap().query, "SELECT 2");
        assert!(history.remove(dropped).unwrap_err().is_not_found());

        history.clear();
        assert_eq!(history.len(), 1);
        assert_eq!(history.entries()[0].id, keep);
    }

    #[test]
    fn preview_is_single_line_and_bounded() {
        let short = HistoryEntry::new("SELECT *\r\nFROM `b`", Operation::Select, "b");
        assert_eq!(short.preview(), "SELECT * FROM `b`");

        let long = HistoryEntry::new("x".repeat(80), Operation::Select, "b");
        let preview = long.preview();
        assert_eq!(preview.chars().count(), 60);
        assert!(preview.ends_with("..."));
    }

    #[test]
    fn formatted_timestamp_shape() {
        let mut entry = HistoryEntry::new("SELECT 1", Operation::Select, "b");
        entry.timestamp = NaiveDateTime::parse_from_str("2024-03-05 07:08:09", TIMESTAMP_FORMAT).unwrap();
        assert_eq!(entry.formatted_timestamp(), "2024-03-05 07:08:09");
    }

    #[test]
    fn json_persistence() {
        let mut history = InMemoryHistory::new();
        record_n(&mut history, 2);
        let id = history.entries()[0].id;
        history.toggle_favorite(id).unwrap();

        let json = history.save_json().unwrap();
        let mut restored = InMemoryHistory::new();
        restored.load_json(&json).unwrap();
        assert_eq!(restored.entries(), history.entries());
        assert!(restored.get(id).unwrap().favorite);
    }
}
