//! Editor selection state
//!
//! Selection is editing-surface state, not document content: it is never
//! part of a history snapshot and is cleared whenever undo or redo replaces
//! the document.

use serde::{Deserialize, Serialize};
use template_model::InstanceId;

/// The section/block the editor surface currently has selected
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    /// Selected section, if any
    pub section_id: Option<InstanceId>,
    /// Selected block within the selected section, if any
    pub block_id: Option<InstanceId>,
}

impl Selection {
    /// Select a section (clearing any block selection)
    pub fn section(section_id: InstanceId) -> Self {
        Self {
            section_id: Some(section_id),
            block_id: None,
        }
    }

    /// Select a block within a section
    pub fn block(section_id: InstanceId, block_id: InstanceId) -> Self {
        Self {
            section_id: Some(section_id),
            block_id: Some(block_id),
        }
    }

    /// Clear the selection
    pub fn clear(&mut self) {
        self.section_id = None;
        self.block_id = None;
    }

    /// Whether anything is selected
    pub fn is_empty(&self) -> bool {
        self.section_id.is_none() && self.block_id.is_none()
    }
}
