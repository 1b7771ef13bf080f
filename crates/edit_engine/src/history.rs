//! Bounded snapshot history backing undo/redo

use chrono::{DateTime, Utc};
use std::sync::Arc;
use template_model::TemplateDocument;

/// Maximum number of history entries kept; the oldest entry is evicted first.
pub const MAX_HISTORY_ENTRIES: usize = 50;

/// A single history entry: a full document snapshot plus a human-readable
/// action label. Immutable once created.
///
/// Snapshots are `Arc`-shared with the session's current document, so
/// recording an entry never deep-copies the document.
#[derive(Debug, Clone)]
pub struct HistoryEntry {
    /// The document state after the labeled action
    pub snapshot: Arc<TemplateDocument>,
    /// Human-readable action label, e.g. "Add section"
    pub label: String,
    /// When the entry was recorded
    pub timestamp: DateTime<Utc>,
}

/// Bounded undo/redo history over document snapshots.
///
/// The history is a list of entries with a cursor. Recording while the
/// cursor is not at the tail discards the redo branch. Undo and redo move
/// the cursor and hand back the snapshot to restore; at a boundary they
/// return `None` instead of failing.
#[derive(Debug)]
pub struct History {
    entries: Vec<HistoryEntry>,
    index: usize,
    max_entries: usize,
}

impl History {
    /// Create a history seeded with the given document, so that undo
    /// immediately after load is a no-op.
    pub fn seeded(snapshot: Arc<TemplateDocument>, label: impl Into<String>) -> Self {
        let mut history = Self {
            entries: Vec::new(),
            index: 0,
            max_entries: MAX_HISTORY_ENTRIES,
        };
        history.reset(snapshot, label);
        history
    }

    /// Create a seeded history with a custom capacity
    pub fn with_max_entries(
        snapshot: Arc<TemplateDocument>,
        label: impl Into<String>,
        max_entries: usize,
    ) -> Self {
        let mut history = Self::seeded(snapshot, label);
        history.max_entries = max_entries.max(1);
        history
    }

    /// Drop all entries and reseed with a single entry at index 0.
    /// Used when a different template is loaded.
    pub fn reset(&mut self, snapshot: Arc<TemplateDocument>, label: impl Into<String>) {
        self.entries.clear();
        self.entries.push(HistoryEntry {
            snapshot,
            label: label.into(),
            timestamp: Utc::now(),
        });
        self.index = 0;
    }

    /// Record a new entry after a mutation.
    ///
    /// Truncates any redo branch, appends, evicts from the head when over
    /// capacity, and leaves the cursor at the new tail.
    pub fn record(&mut self, snapshot: Arc<TemplateDocument>, label: impl Into<String>) {
        self.entries.truncate(self.index + 1);
        self.entries.push(HistoryEntry {
            snapshot,
            label: label.into(),
            timestamp: Utc::now(),
        });
        while self.entries.len() > self.max_entries {
            self.entries.remove(0);
        }
        self.index = self.entries.len() - 1;
    }

    /// Step back one entry. Returns the snapshot to restore, or `None` when
    /// already at the oldest entry.
    pub fn undo(&mut self) -> Option<Arc<TemplateDocument>> {
        if self.index == 0 {
            return None;
        }
        self.index -= 1;
        Some(Arc::clone(&self.entries[self.index].snapshot))
    }

    /// Step forward one entry. Returns the snapshot to restore, or `None`
    /// when already at the newest entry.
    pub fn redo(&mut self) -> Option<Arc<TemplateDocument>> {
        if self.index + 1 >= self.entries.len() {
            return None;
        }
        self.index += 1;
        Some(Arc::clone(&self.entries[self.index].snapshot))
    }

    /// Whether undo is available
    pub fn can_undo(&self) -> bool {
        self.index > 0
    }

    /// Whether redo is available
    pub fn can_redo(&self) -> bool {
        self.index + 1 < self.entries.len()
    }

    /// Number of entries currently held
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the history holds no entries (never true after seeding)
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Cursor position within the entries
    pub fn index(&self) -> usize {
        self.index
    }

    /// The entry the cursor currently points at
    pub fn current(&self) -> &HistoryEntry {
        &self.entries[self.index]
    }

    /// Labels of all entries, oldest first (for a history panel)
    pub fn labels(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.label.as_str()).collect()
    }
}
