//! Template document root and document-level queries

use crate::{SectionInstance, ThemeTokens};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

fn default_locale() -> String {
    "en".to_string()
}

fn default_timestamp() -> DateTime<Utc> {
    Utc::now()
}

/// The versioned, page-scoped template document.
///
/// One document exists per page; the editing session holding it is its only
/// writer. The `version` counter is advanced by the storage layer on every
/// persisted write, never by in-memory mutation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateDocument {
    /// Page / template identifier
    pub id: String,
    /// Ordered layout sections
    pub sections: Vec<SectionInstance>,
    /// Embedded, per-document copy of the theme tokens
    #[serde(default)]
    pub theme: ThemeTokens,
    /// Content locale, e.g. "en"
    #[serde(default = "default_locale")]
    pub locale: String,
    /// Persisted-write counter; strictly increasing
    #[serde(default)]
    pub version: u64,
    /// Timestamp of the last persisted write
    #[serde(default = "default_timestamp")]
    pub updated_at: DateTime<Utc>,
}

impl TemplateDocument {
    /// Create a new empty document for the given page
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            sections: Vec::new(),
            theme: ThemeTokens::default(),
            locale: default_locale(),
            version: 0,
            updated_at: Utc::now(),
        }
    }

    /// Create the default starter document used when no draft exists yet:
    /// a single hero section.
    pub fn starter(id: impl Into<String>) -> Self {
        let mut doc = Self::new(id);
        doc.sections.push(SectionInstance::new("hero"));
        doc
    }

    /// Find a section by ID
    pub fn section(&self, section_id: &str) -> Option<&SectionInstance> {
        self.sections.iter().find(|s| s.id == section_id)
    }

    /// Find a section by ID, mutably
    pub fn section_mut(&mut self, section_id: &str) -> Option<&mut SectionInstance> {
        self.sections.iter_mut().find(|s| s.id == section_id)
    }

    /// Position of a section within the document
    pub fn section_index(&self, section_id: &str) -> Option<usize> {
        self.sections.iter().position(|s| s.id == section_id)
    }

    /// Whether every section ID is unique in the document and every block ID
    /// is unique within its section
    pub fn ids_are_unique(&self) -> bool {
        let mut section_ids = std::collections::HashSet::new();
        for section in &self.sections {
            if !section_ids.insert(section.id.as_str()) {
                return false;
            }
            let mut block_ids = std::collections::HashSet::new();
            for block in &section.blocks {
                if !block_ids.insert(block.id.as_str()) {
                    return false;
                }
            }
        }
        true
    }
}
