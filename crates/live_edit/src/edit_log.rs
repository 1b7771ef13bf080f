//! Per-page edit log - last-write-wins property overrides
//!
//! The edit log is a current-value store, not an operation history: for any
//! (page, element, property) key at most one entry exists, and a newer
//! write replaces the older one. Entries never expire; the explicit
//! per-page and bulk clears are the only way they are destroyed.

use crate::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

/// One recorded property override, keyed by (page, element, property)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElementEdit {
    /// Page the element belongs to
    pub page_id: String,
    /// Resolved element identity
    pub element_id: String,
    /// Property name: `textContent`, `innerHTML`, `src`, `alt`, `href`, or
    /// `style.{css-property}`
    pub property: String,
    /// The override value
    pub value: String,
    /// When this entry was last written
    pub updated_at: DateTime<Utc>,
}

/// All overrides recorded for one page
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PageEditLog {
    /// Page identifier
    pub page_id: String,
    /// element id -> property -> edit
    edits: BTreeMap<String, BTreeMap<String, ElementEdit>>,
    /// Last modification time of the log
    pub updated_at: DateTime<Utc>,
}

impl PageEditLog {
    /// Create an empty log for a page
    pub fn new(page_id: impl Into<String>) -> Self {
        Self {
            page_id: page_id.into(),
            edits: BTreeMap::new(),
            updated_at: Utc::now(),
        }
    }

    /// Record an override; any prior entry at the same (element, property)
    /// key is replaced
    pub fn record(
        &mut self,
        element_id: impl Into<String>,
        property: impl Into<String>,
        value: impl Into<String>,
    ) -> &ElementEdit {
        let element_id = element_id.into();
        let property = property.into();
        let edit = ElementEdit {
            page_id: self.page_id.clone(),
            element_id: element_id.clone(),
            property: property.clone(),
            value: value.into(),
            updated_at: Utc::now(),
        };
        self.updated_at = edit.updated_at;
        let by_property = self.edits.entry(element_id).or_default();
        by_property.insert(property.clone(), edit);
        &by_property[&property]
    }

    /// All edits recorded for one element
    pub fn edits_for(&self, element_id: &str) -> Vec<&ElementEdit> {
        self.edits
            .get(element_id)
            .map(|by_property| by_property.values().collect())
            .unwrap_or_default()
    }

    /// Iterate over every edit in the log
    pub fn all_edits(&self) -> impl Iterator<Item = &ElementEdit> {
        self.edits.values().flat_map(|by_property| by_property.values())
    }

    /// Number of recorded edits
    pub fn len(&self) -> usize {
        self.edits.values().map(BTreeMap::len).sum()
    }

    /// Whether the log holds no edits
    pub fn is_empty(&self) -> bool {
        self.edits.is_empty()
    }
}

/// Store of page edit logs with optional immediate file persistence.
///
/// When a directory is configured every record is flushed to
/// `{dir}/{page_id}.editlog.json` the moment it is written, and existing
/// logs are loaded back on construction.
pub struct EditLogStore {
    logs: HashMap<String, PageEditLog>,
    dir: Option<PathBuf>,
}

impl EditLogStore {
    /// Create a store with no persistence
    pub fn in_memory() -> Self {
        Self {
            logs: HashMap::new(),
            dir: None,
        }
    }

    /// Create a store persisting each page log under the given directory,
    /// loading any logs already present
    pub fn with_dir(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)?;

        let mut logs = HashMap::new();
        for entry in std::fs::read_dir(&dir)? {
            let path = entry?.path();
            if path
                .file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| n.ends_with(".editlog.json"))
            {
                match Self::load_log(&path) {
                    Ok(log) => {
                        logs.insert(log.page_id.clone(), log);
                    }
                    Err(e) => {
                        tracing::warn!("skipping unreadable edit log {}: {e}", path.display());
                    }
                }
            }
        }
        Ok(Self {
            logs,
            dir: Some(dir),
        })
    }

    fn load_log(path: &Path) -> Result<PageEditLog> {
        let json = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&json)?)
    }

    fn log_path(dir: &Path, page_id: &str) -> PathBuf {
        let safe = page_id.replace(['/', '\\'], "_");
        dir.join(format!("{safe}.editlog.json"))
    }

    fn persist(&self, page_id: &str) -> Result<()> {
        let Some(dir) = &self.dir else {
            return Ok(());
        };
        if let Some(log) = self.logs.get(page_id) {
            let json = serde_json::to_string_pretty(log)?;
            std::fs::write(Self::log_path(dir, page_id), json)?;
        }
        Ok(())
    }

    /// Record one override and persist the page log immediately
    pub fn record(
        &mut self,
        page_id: &str,
        element_id: &str,
        property: &str,
        value: &str,
    ) -> Result<()> {
        self.logs
            .entry(page_id.to_string())
            .or_insert_with(|| PageEditLog::new(page_id))
            .record(element_id, property, value);
        self.persist(page_id)
    }

    /// The log for a page, if any edits were recorded
    pub fn page_log(&self, page_id: &str) -> Option<&PageEditLog> {
        self.logs.get(page_id)
    }

    /// All edits recorded for one element of a page
    pub fn edits_for(&self, page_id: &str, element_id: &str) -> Vec<&ElementEdit> {
        self.logs
            .get(page_id)
            .map(|log| log.edits_for(element_id))
            .unwrap_or_default()
    }

    /// Page IDs that currently have edits
    pub fn page_ids(&self) -> Vec<&str> {
        self.logs.keys().map(String::as_str).collect()
    }

    /// Drop every edit for one page (and its persisted file). Returns
    /// whether a log existed.
    pub fn clear_page(&mut self, page_id: &str) -> Result<bool> {
        let existed = self.logs.remove(page_id).is_some();
        if let Some(dir) = &self.dir {
            let path = Self::log_path(dir, page_id);
            if path.exists() {
                std::fs::remove_file(path)?;
            }
        }
        Ok(existed)
    }

    /// Drop every edit for every page
    pub fn clear_all(&mut self) -> Result<()> {
        let pages: Vec<String> = self.logs.keys().cloned().collect();
        for page_id in pages {
            self.clear_page(&page_id)?;
        }
        Ok(())
    }
}
