//! Block mutations over a template document
//!
//! Block-scoped counterparts of the section operations. The same totality
//! rule applies: unknown section or block IDs and boundary moves are no-ops.

use template_model::{merge_settings, BlockInstance, InstanceId, SettingsMap, TemplateDocument};

/// Add a new block of the given type to a section.
///
/// The block is inserted directly after `after` when that ID exists in the
/// section, otherwise appended. Returns the new block's ID, or `None` when
/// the section is unknown.
pub fn add_block(
    doc: &mut TemplateDocument,
    section_id: &str,
    block_type: &str,
    after: Option<&str>,
) -> Option<InstanceId> {
    let section = doc.section_mut(section_id)?;
    let block = BlockInstance::new(block_type);
    let id = block.id.clone();
    let index = after
        .and_then(|a| section.block_index(a))
        .map(|i| i + 1)
        .unwrap_or(section.blocks.len());
    section.blocks.insert(index, block);
    Some(id)
}

/// Remove a block from a section. Unknown IDs are a no-op.
pub fn remove_block(doc: &mut TemplateDocument, section_id: &str, block_id: &str) -> bool {
    let Some(section) = doc.section_mut(section_id) else {
        return false;
    };
    match section.block_index(block_id) {
        Some(index) => {
            section.blocks.remove(index);
            true
        }
        None => false,
    }
}

/// Deep-copy a block directly after the source, under a brand-new ID.
pub fn duplicate_block(
    doc: &mut TemplateDocument,
    section_id: &str,
    block_id: &str,
) -> Option<InstanceId> {
    let section = doc.section_mut(section_id)?;
    let index = section.block_index(block_id)?;
    let copy = section.blocks[index].duplicate();
    let id = copy.id.clone();
    section.blocks.insert(index + 1, copy);
    Some(id)
}

/// Move a block one position toward the front of its section.
pub fn move_block_up(doc: &mut TemplateDocument, section_id: &str, block_id: &str) -> bool {
    let Some(section) = doc.section_mut(section_id) else {
        return false;
    };
    match section.block_index(block_id) {
        Some(index) if index > 0 => {
            section.blocks.swap(index, index - 1);
            true
        }
        _ => false,
    }
}

/// Move a block one position toward the back of its section.
pub fn move_block_down(doc: &mut TemplateDocument, section_id: &str, block_id: &str) -> bool {
    let Some(section) = doc.section_mut(section_id) else {
        return false;
    };
    match section.block_index(block_id) {
        Some(index) if index + 1 < section.blocks.len() => {
            section.blocks.swap(index, index + 1);
            true
        }
        _ => false,
    }
}

/// Reorder a section's blocks to match the given ID sequence.
///
/// Unknown IDs are ignored; blocks missing from the sequence keep their
/// relative order after the listed ones.
pub fn reorder_blocks(doc: &mut TemplateDocument, section_id: &str, ids: &[&str]) -> bool {
    let Some(section) = doc.section_mut(section_id) else {
        return false;
    };

    let mut ordered: Vec<BlockInstance> = Vec::with_capacity(section.blocks.len());
    for &id in ids {
        if section.blocks.iter().any(|b| b.id == id)
            && !ordered.iter().any(|b: &BlockInstance| b.id == id)
        {
            let index = section.block_index(id).unwrap();
            ordered.push(section.blocks[index].clone());
        }
    }
    for block in &section.blocks {
        if !ordered.iter().any(|b| b.id == block.id) {
            ordered.push(block.clone());
        }
    }

    let changed = ordered
        .iter()
        .zip(section.blocks.iter())
        .any(|(a, b)| a.id != b.id);
    if changed {
        section.blocks = ordered;
    }
    changed
}

/// Merge a partial settings map into a block's settings.
pub fn update_block_settings(
    doc: &mut TemplateDocument,
    section_id: &str,
    block_id: &str,
    partial: &SettingsMap,
) -> bool {
    let Some(section) = doc.section_mut(section_id) else {
        return false;
    };
    match section.block_mut(block_id) {
        Some(block) => merge_settings(&mut block.settings, partial),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::section_ops::add_section;
    use serde_json::json;

    fn doc_with_blocks(types: &[&str]) -> (TemplateDocument, InstanceId) {
        let mut doc = TemplateDocument::new("home");
        let section_id = add_section(&mut doc, "hero", None);
        for t in types {
            add_block(&mut doc, section_id.as_str(), t, None);
        }
        (doc, section_id)
    }

    fn block_order<'a>(doc: &'a TemplateDocument, section_id: &str) -> Vec<&'a str> {
        doc.section(section_id)
            .unwrap()
            .blocks
            .iter()
            .map(|b| b.block_type.as_str())
            .collect()
    }

    #[test]
    fn test_add_and_remove() {
        let (mut doc, sid) = doc_with_blocks(&["button"]);
        let bid = add_block(&mut doc, sid.as_str(), "image", None).unwrap();
        assert_eq!(block_order(&doc, sid.as_str()), vec!["button", "image"]);

        assert!(remove_block(&mut doc, sid.as_str(), bid.as_str()));
        assert_eq!(block_order(&doc, sid.as_str()), vec!["button"]);
        assert!(!remove_block(&mut doc, sid.as_str(), bid.as_str()));
        assert!(!remove_block(&mut doc, "missing", "whatever"));
    }

    #[test]
    fn test_add_to_unknown_section() {
        let (mut doc, _) = doc_with_blocks(&[]);
        assert!(add_block(&mut doc, "missing", "button", None).is_none());
    }

    #[test]
    fn test_move_boundaries_are_noops() {
        let (mut doc, sid) = doc_with_blocks(&["button", "image", "text"]);
        let first = doc.section(sid.as_str()).unwrap().blocks[0].id.clone();
        let last = doc.section(sid.as_str()).unwrap().blocks[2].id.clone();

        assert!(!move_block_up(&mut doc, sid.as_str(), first.as_str()));
        assert!(!move_block_down(&mut doc, sid.as_str(), last.as_str()));
        assert_eq!(block_order(&doc, sid.as_str()), vec!["button", "image", "text"]);
    }

    #[test]
    fn test_move_within_section() {
        let (mut doc, sid) = doc_with_blocks(&["button", "image"]);
        let second = doc.section(sid.as_str()).unwrap().blocks[1].id.clone();

        assert!(move_block_up(&mut doc, sid.as_str(), second.as_str()));
        assert_eq!(block_order(&doc, sid.as_str()), vec!["image", "button"]);
    }

    #[test]
    fn test_reorder() {
        let (mut doc, sid) = doc_with_blocks(&["button", "image", "text"]);
        let ids: Vec<String> = doc
            .section(sid.as_str())
            .unwrap()
            .blocks
            .iter()
            .map(|b| b.id.as_str().to_string())
            .collect();

        let sequence = vec![ids[1].as_str(), ids[2].as_str(), ids[0].as_str()];
        assert!(reorder_blocks(&mut doc, sid.as_str(), &sequence));
        assert_eq!(block_order(&doc, sid.as_str()), vec!["image", "text", "button"]);
    }

    #[test]
    fn test_duplicate_block() {
        let (mut doc, sid) = doc_with_blocks(&["button"]);
        let source = doc.section(sid.as_str()).unwrap().blocks[0].id.clone();
        doc.section_mut(sid.as_str())
            .unwrap()
            .block_mut(source.as_str())
            .unwrap()
            .settings
            .insert("label".to_string(), json!("Buy"));

        let copy = duplicate_block(&mut doc, sid.as_str(), source.as_str()).unwrap();
        assert_ne!(copy, source);

        let section = doc.section(sid.as_str()).unwrap();
        assert_eq!(section.blocks.len(), 2);
        assert_eq!(section.blocks[0].settings, section.blocks[1].settings);
    }

    #[test]
    fn test_update_settings() {
        let (mut doc, sid) = doc_with_blocks(&["button"]);
        let bid = doc.section(sid.as_str()).unwrap().blocks[0].id.clone();
        let partial: SettingsMap =
            [("label".to_string(), json!("Buy now"))].into_iter().collect();

        assert!(update_block_settings(&mut doc, sid.as_str(), bid.as_str(), &partial));
        assert!(!update_block_settings(&mut doc, sid.as_str(), bid.as_str(), &partial));
        assert!(!update_block_settings(&mut doc, sid.as_str(), "missing", &partial));
    }
}
