//! Override engine - discovery, capture, and replay
//!
//! Discovery walks a rendered surface once per render pass, resolves an
//! identity for every eligible element, and replays the overrides recorded
//! for that identity. Capture records a committed property change into the
//! edit log. Replay is idempotent: reapplying the same edit leaves the
//! element unchanged.

use crate::{identity, EditLogStore, ElementEdit, RenderedElement, Result};

/// Outcome of one discovery pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DiscoveryReport {
    /// Eligible elements visited
    pub elements_seen: usize,
    /// Edits applied to elements
    pub edits_applied: usize,
    /// Edits skipped because the rediscovered element's kind no longer
    /// matches the recorded property
    pub edits_skipped: usize,
}

/// Assigns identities to rendered elements and replays recorded overrides
pub struct OverrideEngine {
    store: EditLogStore,
}

impl OverrideEngine {
    /// Create an engine over the given edit log store
    pub fn new(store: EditLogStore) -> Self {
        Self { store }
    }

    /// The underlying edit log store
    pub fn store(&self) -> &EditLogStore {
        &self.store
    }

    /// Capture a committed property change for an element.
    ///
    /// Replaces any prior entry at the same (page, element, property) key
    /// and persists the page log immediately.
    pub fn commit(
        &mut self,
        page_id: &str,
        element_id: &str,
        property: &str,
        value: &str,
    ) -> Result<()> {
        self.store.record(page_id, element_id, property, value)
    }

    /// Drop every override recorded for a page
    pub fn clear_page(&mut self, page_id: &str) -> Result<bool> {
        self.store.clear_page(page_id)
    }

    /// Drop every override for every page
    pub fn clear_all(&mut self) -> Result<()> {
        self.store.clear_all()
    }

    /// One discovery pass over a rendered surface: assign identities and
    /// replay every edit recorded for the page's elements.
    pub fn discover(&self, page_id: &str, root: &mut RenderedElement) -> DiscoveryReport {
        let mut report = DiscoveryReport::default();
        let mut scan_index = 0;
        self.visit(page_id, root, 1, &mut scan_index, &mut report);
        report
    }

    /// Apply all edits recorded for one already-resolved element identity
    pub fn apply_edits(
        &self,
        page_id: &str,
        element_id: &str,
        element: &mut RenderedElement,
    ) -> (usize, usize) {
        let mut applied = 0;
        let mut skipped = 0;
        for edit in self.store.edits_for(page_id, element_id) {
            if apply_edit(element, edit) {
                applied += 1;
            } else {
                skipped += 1;
            }
        }
        (applied, skipped)
    }

    fn visit(
        &self,
        page_id: &str,
        element: &mut RenderedElement,
        same_selector_position: usize,
        scan_index: &mut usize,
        report: &mut DiscoveryReport,
    ) {
        if !identity::eligible(element) {
            return;
        }

        let element_id =
            identity::resolve_identity(element, page_id, same_selector_position, *scan_index);
        *scan_index += 1;
        report.elements_seen += 1;

        let (applied, skipped) = self.apply_edits(page_id, &element_id, element);
        report.edits_applied += applied;
        report.edits_skipped += skipped;

        let positions = identity::sibling_positions(&element.children);
        for (child, position) in element.children.iter_mut().zip(positions) {
            self.visit(page_id, child, position, scan_index, report);
        }
    }
}

/// Apply one edit to an element. Returns `false` when the edit does not
/// apply to the element's current kind (skipped, never an error).
fn apply_edit(element: &mut RenderedElement, edit: &ElementEdit) -> bool {
    match edit.property.as_str() {
        "textContent" => {
            element.set_text_content(&edit.value);
            true
        }
        "innerHTML" => {
            element.set_inner_html(&edit.value);
            true
        }
        "src" | "alt" | "href" => {
            if element.kind().supports(&edit.property) {
                element
                    .attributes
                    .insert(edit.property.clone(), edit.value.clone());
                true
            } else {
                tracing::debug!(
                    "skipping {} override on <{}> ({})",
                    edit.property,
                    element.tag,
                    edit.element_id
                );
                false
            }
        }
        property => match property.strip_prefix("style.") {
            Some(style_property) => {
                element
                    .styles
                    .insert(style_property.to_string(), edit.value.clone());
                true
            }
            None => {
                tracing::debug!(
                    "skipping unknown property {property} ({})",
                    edit.element_id
                );
                false
            }
        },
    }
}
