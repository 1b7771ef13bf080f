//! Stable identity assignment for rendered elements
//!
//! Identity priority, per element:
//! 1. the author-supplied `id` attribute;
//! 2. the `data-edit-id` attribute stamped by a previous scan;
//! 3. a composite of tag name, first class name, and 1-based position among
//!    siblings matching the same tag + first class;
//! 4. `{page_id}-{tag}-{scan_index}`.
//!
//! Derived identities (3 and 4) are stamped onto the element as
//! `data-edit-id` so re-renders of an unchanged tree resolve the same
//! identity without re-deriving it from scan order. Derived identities are
//! stable only while structure and sibling order are preserved; authored
//! `id` attributes are the robust option.

use crate::RenderedElement;

/// Attribute carrying an identity stamped by a previous scan
pub const EDIT_ID_ATTR: &str = "data-edit-id";

/// Attribute marking the editor's own control chrome; the whole subtree is
/// excluded from scanning
pub const CHROME_ATTR: &str = "data-editor-chrome";

/// Tags that never carry visual overrides
const SKIPPED_TAGS: &[&str] = &["script", "style", "noscript", "template"];

/// Whether an element (and its subtree) takes part in discovery
pub fn eligible(element: &RenderedElement) -> bool {
    !SKIPPED_TAGS.contains(&element.tag.as_str()) && element.attr(CHROME_ATTR).is_none()
}

/// Resolve or assign the identity for one element.
///
/// `same_selector_position` is the 1-based position among siblings sharing
/// the element's tag + first class; `scan_index` is the overall scan
/// counter for the fallback identity.
pub fn resolve_identity(
    element: &mut RenderedElement,
    page_id: &str,
    same_selector_position: usize,
    scan_index: usize,
) -> String {
    if let Some(id) = element.id_attr() {
        return id.to_string();
    }
    if let Some(id) = element.attr(EDIT_ID_ATTR) {
        return id.to_string();
    }

    let id = match element.first_class() {
        Some(class) => format!("{}.{class}-{same_selector_position}", element.tag),
        None => format!("{page_id}-{}-{scan_index}", element.tag),
    };
    element
        .attributes
        .insert(EDIT_ID_ATTR.to_string(), id.clone());
    id
}

/// 1-based positions of each child among siblings sharing its tag + first
/// class, in child order
pub fn sibling_positions(children: &[RenderedElement]) -> Vec<usize> {
    let selectors: Vec<(&str, Option<&str>)> = children
        .iter()
        .map(|c| (c.tag.as_str(), c.first_class()))
        .collect();
    selectors
        .iter()
        .enumerate()
        .map(|(i, selector)| selectors[..i].iter().filter(|s| *s == selector).count() + 1)
        .collect()
}
