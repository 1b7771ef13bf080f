//! Block instances - the leaf content units inside a section

use crate::{InstanceId, SettingsMap};
use serde::{Deserialize, Serialize};

/// A single content block inside a section (e.g. a button, an image,
/// a text column).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockInstance {
    /// Unique within the owning section
    pub id: InstanceId,
    /// Block type tag, e.g. "button" or "image"
    #[serde(rename = "type")]
    pub block_type: String,
    /// Free-form block settings
    #[serde(default)]
    pub settings: SettingsMap,
}

impl BlockInstance {
    /// Create a new block of the given type with a generated ID
    pub fn new(block_type: impl Into<String>) -> Self {
        let block_type = block_type.into();
        Self {
            id: InstanceId::generate(&block_type),
            block_type,
            settings: SettingsMap::new(),
        }
    }

    /// Deep-copy this block under a brand-new ID
    pub fn duplicate(&self) -> Self {
        Self {
            id: InstanceId::generate(&self.block_type),
            block_type: self.block_type.clone(),
            settings: self.settings.clone(),
        }
    }
}
