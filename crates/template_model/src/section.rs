//! Section instances - ordered layout regions of a template

use crate::{BlockInstance, InstanceId, SettingsMap};
use serde::{Deserialize, Serialize};

/// A layout section of a page template (e.g. a hero banner, a feature grid).
///
/// Sections own an ordered list of blocks. Block IDs are unique within their
/// section; section IDs are unique within their document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionInstance {
    /// Unique within the owning document
    pub id: InstanceId,
    /// Section type tag, e.g. "hero" or "rich-text"
    #[serde(rename = "type")]
    pub section_type: String,
    /// Free-form section settings
    #[serde(default)]
    pub settings: SettingsMap,
    /// Ordered child blocks
    #[serde(default)]
    pub blocks: Vec<BlockInstance>,
}

impl SectionInstance {
    /// Create a new section of the given type with a generated ID
    pub fn new(section_type: impl Into<String>) -> Self {
        let section_type = section_type.into();
        Self {
            id: InstanceId::generate(&section_type),
            section_type,
            settings: SettingsMap::new(),
            blocks: Vec::new(),
        }
    }

    /// Find a block by ID
    pub fn block(&self, block_id: &str) -> Option<&BlockInstance> {
        self.blocks.iter().find(|b| b.id == block_id)
    }

    /// Find a block by ID, mutably
    pub fn block_mut(&mut self, block_id: &str) -> Option<&mut BlockInstance> {
        self.blocks.iter_mut().find(|b| b.id == block_id)
    }

    /// Position of a block within this section
    pub fn block_index(&self, block_id: &str) -> Option<usize> {
        self.blocks.iter().position(|b| b.id == block_id)
    }

    /// Deep-copy this section under a brand-new ID.
    ///
    /// Every nested block also gets a fresh ID; settings are copied verbatim.
    pub fn duplicate(&self) -> Self {
        Self {
            id: InstanceId::generate(&self.section_type),
            section_type: self.section_type.clone(),
            settings: self.settings.clone(),
            blocks: self.blocks.iter().map(BlockInstance::duplicate).collect(),
        }
    }
}
