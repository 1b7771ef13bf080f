//! Editor session - current document, dirty flag, and mutation entry points
//!
//! The session is the single logical writer over a template document. Every
//! mutation produces a fully-formed new document value and replaces the
//! session's reference, so readers never observe a partially-mutated
//! document. After the replacement the mutation is recorded as a labeled
//! history snapshot and the dirty flag is set for the autosave layer.

use crate::{block_ops, section_ops, History, Selection};
use std::sync::Arc;
use template_model::{InstanceId, SettingsMap, TemplateDocument};

/// History label used for the seed entry on load
const LOAD_LABEL: &str = "Load template";

/// The editing session owning one template document
pub struct EditorSession {
    /// Current document; shared with the latest history snapshot
    document: Arc<TemplateDocument>,
    /// Bounded undo/redo history
    history: History,
    /// Whether the in-memory document differs from the last persisted draft
    dirty: bool,
    /// Editor-surface selection; not part of history snapshots
    selection: Selection,
}

impl EditorSession {
    /// Open a session on the given document.
    ///
    /// The history is seeded with a single "Load template" entry so undo at
    /// load time is a no-op.
    pub fn new(document: TemplateDocument) -> Self {
        let document = Arc::new(document);
        let history = History::seeded(Arc::clone(&document), LOAD_LABEL);
        Self {
            document,
            history,
            dirty: false,
            selection: Selection::default(),
        }
    }

    /// Replace the session's document wholesale (switching templates).
    /// Resets history, dirty flag, and selection.
    pub fn load(&mut self, document: TemplateDocument) {
        self.document = Arc::new(document);
        self.history.reset(Arc::clone(&self.document), LOAD_LABEL);
        self.dirty = false;
        self.selection.clear();
    }

    /// The current document
    pub fn document(&self) -> &TemplateDocument {
        &self.document
    }

    /// Shared handle to the current document (for autosave and rendering)
    pub fn document_arc(&self) -> Arc<TemplateDocument> {
        Arc::clone(&self.document)
    }

    /// Whether the document has changed since the last persisted save
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Clear the dirty flag after a successful save
    pub fn mark_saved(&mut self) {
        self.dirty = false;
    }

    /// The undo/redo history
    pub fn history(&self) -> &History {
        &self.history
    }

    /// Current selection
    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Set the selection
    pub fn select(&mut self, selection: Selection) {
        self.selection = selection;
    }

    /// Whether undo is available
    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    /// Whether redo is available
    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Step back one history entry. Returns `false` at the oldest entry.
    /// Clears the selection and marks the document dirty.
    pub fn undo(&mut self) -> bool {
        match self.history.undo() {
            Some(snapshot) => {
                self.document = snapshot;
                self.selection.clear();
                self.dirty = true;
                true
            }
            None => false,
        }
    }

    /// Step forward one history entry. Returns `false` at the newest entry.
    /// Clears the selection and marks the document dirty.
    pub fn redo(&mut self) -> bool {
        match self.history.redo() {
            Some(snapshot) => {
                self.document = snapshot;
                self.selection.clear();
                self.dirty = true;
                true
            }
            None => false,
        }
    }

    /// Replace the document with a mutated copy, record history, set dirty
    fn commit(&mut self, document: TemplateDocument, label: &str) {
        self.document = Arc::new(document);
        self.history.record(Arc::clone(&self.document), label);
        self.dirty = true;
    }

    // ------------------------------------------------------------------
    // Section mutations
    // ------------------------------------------------------------------

    /// Add a section after the given sibling (or at the end)
    pub fn add_section(&mut self, section_type: &str, after: Option<&str>) -> InstanceId {
        let mut doc = (*self.document).clone();
        let id = section_ops::add_section(&mut doc, section_type, after);
        self.commit(doc, "Add section");
        id
    }

    /// Remove a section
    pub fn remove_section(&mut self, section_id: &str) -> bool {
        let mut doc = (*self.document).clone();
        if section_ops::remove_section(&mut doc, section_id) {
            self.commit(doc, "Remove section");
            true
        } else {
            false
        }
    }

    /// Duplicate a section (deep copy, fresh IDs throughout)
    pub fn duplicate_section(&mut self, section_id: &str) -> Option<InstanceId> {
        let mut doc = (*self.document).clone();
        let id = section_ops::duplicate_section(&mut doc, section_id)?;
        self.commit(doc, "Duplicate section");
        Some(id)
    }

    /// Move a section one position up
    pub fn move_section_up(&mut self, section_id: &str) -> bool {
        let mut doc = (*self.document).clone();
        if section_ops::move_section_up(&mut doc, section_id) {
            self.commit(doc, "Move section up");
            true
        } else {
            false
        }
    }

    /// Move a section one position down
    pub fn move_section_down(&mut self, section_id: &str) -> bool {
        let mut doc = (*self.document).clone();
        if section_ops::move_section_down(&mut doc, section_id) {
            self.commit(doc, "Move section down");
            true
        } else {
            false
        }
    }

    /// Reorder sections to the given ID sequence
    pub fn reorder_sections(&mut self, ids: &[&str]) -> bool {
        let mut doc = (*self.document).clone();
        if section_ops::reorder_sections(&mut doc, ids) {
            self.commit(doc, "Reorder sections");
            true
        } else {
            false
        }
    }

    /// Merge partial settings into a section
    pub fn update_section_settings(&mut self, section_id: &str, partial: &SettingsMap) -> bool {
        let mut doc = (*self.document).clone();
        if section_ops::update_section_settings(&mut doc, section_id, partial) {
            self.commit(doc, "Update section settings");
            true
        } else {
            false
        }
    }

    // ------------------------------------------------------------------
    // Block mutations
    // ------------------------------------------------------------------

    /// Add a block to a section after the given sibling (or at the end)
    pub fn add_block(
        &mut self,
        section_id: &str,
        block_type: &str,
        after: Option<&str>,
    ) -> Option<InstanceId> {
        let mut doc = (*self.document).clone();
        let id = block_ops::add_block(&mut doc, section_id, block_type, after)?;
        self.commit(doc, "Add block");
        Some(id)
    }

    /// Remove a block from a section
    pub fn remove_block(&mut self, section_id: &str, block_id: &str) -> bool {
        let mut doc = (*self.document).clone();
        if block_ops::remove_block(&mut doc, section_id, block_id) {
            self.commit(doc, "Remove block");
            true
        } else {
            false
        }
    }

    /// Duplicate a block (deep copy, fresh ID)
    pub fn duplicate_block(&mut self, section_id: &str, block_id: &str) -> Option<InstanceId> {
        let mut doc = (*self.document).clone();
        let id = block_ops::duplicate_block(&mut doc, section_id, block_id)?;
        self.commit(doc, "Duplicate block");
        Some(id)
    }

    /// Move a block one position up within its section
    pub fn move_block_up(&mut self, section_id: &str, block_id: &str) -> bool {
        let mut doc = (*self.document).clone();
        if block_ops::move_block_up(&mut doc, section_id, block_id) {
            self.commit(doc, "Move block up");
            true
        } else {
            false
        }
    }

    /// Move a block one position down within its section
    pub fn move_block_down(&mut self, section_id: &str, block_id: &str) -> bool {
        let mut doc = (*self.document).clone();
        if block_ops::move_block_down(&mut doc, section_id, block_id) {
            self.commit(doc, "Move block down");
            true
        } else {
            false
        }
    }

    /// Reorder a section's blocks to the given ID sequence
    pub fn reorder_blocks(&mut self, section_id: &str, ids: &[&str]) -> bool {
        let mut doc = (*self.document).clone();
        if block_ops::reorder_blocks(&mut doc, section_id, ids) {
            self.commit(doc, "Reorder blocks");
            true
        } else {
            false
        }
    }

    /// Merge partial settings into a block
    pub fn update_block_settings(
        &mut self,
        section_id: &str,
        block_id: &str,
        partial: &SettingsMap,
    ) -> bool {
        let mut doc = (*self.document).clone();
        if block_ops::update_block_settings(&mut doc, section_id, block_id, partial) {
            self.commit(doc, "Update block settings");
            true
        } else {
            false
        }
    }
}
