//! Section mutations over a template document
//!
//! Every operation is total: unknown IDs and boundary moves leave the
//! document untouched and report `false` so the caller can skip the history
//! entry and dirty flag.

use template_model::{merge_settings, InstanceId, SectionInstance, SettingsMap, TemplateDocument};

/// Add a new section of the given type.
///
/// The section is inserted directly after `after` when that ID exists,
/// otherwise appended at the end. Returns the new section's ID.
pub fn add_section(
    doc: &mut TemplateDocument,
    section_type: &str,
    after: Option<&str>,
) -> InstanceId {
    let section = SectionInstance::new(section_type);
    let id = section.id.clone();
    let index = after
        .and_then(|a| doc.section_index(a))
        .map(|i| i + 1)
        .unwrap_or(doc.sections.len());
    doc.sections.insert(index, section);
    id
}

/// Remove a section by ID. Unknown IDs are a no-op.
pub fn remove_section(doc: &mut TemplateDocument, section_id: &str) -> bool {
    match doc.section_index(section_id) {
        Some(index) => {
            doc.sections.remove(index);
            true
        }
        None => false,
    }
}

/// Deep-copy a section directly after the source.
///
/// The copy and every nested block get brand-new IDs; settings are copied
/// verbatim. Returns the new section's ID, or `None` for unknown sources.
pub fn duplicate_section(doc: &mut TemplateDocument, section_id: &str) -> Option<InstanceId> {
    let index = doc.section_index(section_id)?;
    let copy = doc.sections[index].duplicate();
    let id = copy.id.clone();
    doc.sections.insert(index + 1, copy);
    Some(id)
}

/// Move a section one position toward the front. A section already at the
/// front (or an unknown ID) is a no-op.
pub fn move_section_up(doc: &mut TemplateDocument, section_id: &str) -> bool {
    match doc.section_index(section_id) {
        Some(index) if index > 0 => {
            doc.sections.swap(index, index - 1);
            true
        }
        _ => false,
    }
}

/// Move a section one position toward the back. A section already at the
/// back (or an unknown ID) is a no-op.
pub fn move_section_down(doc: &mut TemplateDocument, section_id: &str) -> bool {
    match doc.section_index(section_id) {
        Some(index) if index + 1 < doc.sections.len() => {
            doc.sections.swap(index, index + 1);
            true
        }
        _ => false,
    }
}

/// Reorder sections to match the given ID sequence.
///
/// IDs not present in the document are ignored; sections missing from the
/// sequence keep their relative order after the listed ones.
pub fn reorder_sections(doc: &mut TemplateDocument, ids: &[&str]) -> bool {
    let mut ordered: Vec<SectionInstance> = Vec::with_capacity(doc.sections.len());
    for &id in ids {
        if let Some(index) = doc.sections.iter().position(|s| s.id == id) {
            if !ordered.iter().any(|s: &SectionInstance| s.id == id) {
                ordered.push(doc.sections[index].clone());
            }
        }
    }
    for section in &doc.sections {
        if !ordered.iter().any(|s| s.id == section.id) {
            ordered.push(section.clone());
        }
    }

    let changed = ordered
        .iter()
        .zip(doc.sections.iter())
        .any(|(a, b)| a.id != b.id);
    if changed {
        doc.sections = ordered;
    }
    changed
}

/// Merge a partial settings map into a section's settings.
pub fn update_section_settings(
    doc: &mut TemplateDocument,
    section_id: &str,
    partial: &SettingsMap,
) -> bool {
    match doc.section_mut(section_id) {
        Some(section) => merge_settings(&mut section.settings, partial),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc_with_sections(types: &[&str]) -> TemplateDocument {
        let mut doc = TemplateDocument::new("home");
        for t in types {
            add_section(&mut doc, t, None);
        }
        doc
    }

    fn order(doc: &TemplateDocument) -> Vec<&str> {
        doc.sections.iter().map(|s| s.section_type.as_str()).collect()
    }

    #[test]
    fn test_add_after() {
        let mut doc = doc_with_sections(&["hero", "footer"]);
        let hero_id = doc.sections[0].id.clone();

        add_section(&mut doc, "rich-text", Some(hero_id.as_str()));
        assert_eq!(order(&doc), vec!["hero", "rich-text", "footer"]);
    }

    #[test]
    fn test_add_after_unknown_appends() {
        let mut doc = doc_with_sections(&["hero"]);
        add_section(&mut doc, "rich-text", Some("missing"));
        assert_eq!(order(&doc), vec!["hero", "rich-text"]);
    }

    #[test]
    fn test_remove() {
        let mut doc = doc_with_sections(&["hero", "footer"]);
        let id = doc.sections[0].id.clone();

        assert!(remove_section(&mut doc, id.as_str()));
        assert_eq!(order(&doc), vec!["footer"]);
        assert!(!remove_section(&mut doc, id.as_str()));
    }

    #[test]
    fn test_move_boundaries_are_noops() {
        let mut doc = doc_with_sections(&["hero", "rich-text", "footer"]);
        let first = doc.sections[0].id.clone();
        let last = doc.sections[2].id.clone();

        assert!(!move_section_up(&mut doc, first.as_str()));
        assert!(!move_section_down(&mut doc, last.as_str()));
        assert_eq!(order(&doc), vec!["hero", "rich-text", "footer"]);
    }

    #[test]
    fn test_move_up_and_down() {
        let mut doc = doc_with_sections(&["hero", "rich-text", "footer"]);
        let middle = doc.sections[1].id.clone();

        assert!(move_section_up(&mut doc, middle.as_str()));
        assert_eq!(order(&doc), vec!["rich-text", "hero", "footer"]);
        assert!(move_section_down(&mut doc, middle.as_str()));
        assert_eq!(order(&doc), vec!["hero", "rich-text", "footer"]);
    }

    #[test]
    fn test_reorder() {
        let mut doc = doc_with_sections(&["hero", "rich-text", "footer"]);
        let ids: Vec<String> = doc
            .sections
            .iter()
            .map(|s| s.id.as_str().to_string())
            .collect();

        let sequence = vec![ids[2].as_str(), ids[0].as_str(), ids[1].as_str()];
        assert!(reorder_sections(&mut doc, &sequence));
        assert_eq!(order(&doc), vec!["footer", "hero", "rich-text"]);

        // Reordering to the current order is a no-op.
        assert!(!reorder_sections(&mut doc, &sequence));
    }

    #[test]
    fn test_reorder_ignores_unknown_and_keeps_missing() {
        let mut doc = doc_with_sections(&["hero", "rich-text", "footer"]);
        let last = doc.sections[2].id.clone();

        assert!(reorder_sections(&mut doc, &[last.as_str(), "missing"]));
        assert_eq!(order(&doc), vec!["footer", "hero", "rich-text"]);
    }

    #[test]
    fn test_duplicate_section_fresh_ids() {
        let mut doc = doc_with_sections(&["hero"]);
        {
            let section = &mut doc.sections[0];
            section.settings.insert("heading".to_string(), json!("Hi"));
            section
                .blocks
                .push(template_model::BlockInstance::new("button"));
        }
        let source_id = doc.sections[0].id.clone();
        let source_block_ids: Vec<InstanceId> =
            doc.sections[0].blocks.iter().map(|b| b.id.clone()).collect();

        let copy_id = duplicate_section(&mut doc, source_id.as_str()).unwrap();
        assert_ne!(copy_id, source_id);

        let copy = doc.section(copy_id.as_str()).unwrap();
        assert_eq!(copy.settings, doc.section(source_id.as_str()).unwrap().settings);
        for block in &copy.blocks {
            assert!(!source_block_ids.contains(&block.id));
        }
    }

    #[test]
    fn test_update_settings() {
        let mut doc = doc_with_sections(&["hero"]);
        let id = doc.sections[0].id.clone();
        let partial: SettingsMap =
            [("heading".to_string(), json!("Welcome"))].into_iter().collect();

        assert!(update_section_settings(&mut doc, id.as_str(), &partial));
        assert!(!update_section_settings(&mut doc, id.as_str(), &partial));
        assert!(!update_section_settings(&mut doc, "missing", &partial));
    }
}
