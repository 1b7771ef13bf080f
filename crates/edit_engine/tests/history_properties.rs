//! Property-based tests for the undo/redo history.
//!
//! 1. For any sequence of n effective mutations from document D0 (n below
//!    the history cap), calling undo n times returns exactly D0.
//! 2. History length never exceeds the cap and the oldest entries are
//!    evicted first.

use edit_engine::{EditorSession, MAX_HISTORY_ENTRIES};
use proptest::prelude::*;
use serde_json::json;
use template_model::TemplateDocument;

/// A randomly chosen mutation applied through the session
#[derive(Debug, Clone)]
enum Op {
    AddSection(u8),
    RemoveSection(u8),
    DuplicateSection(u8),
    MoveUp(u8),
    MoveDown(u8),
    AddBlock(u8),
    UpdateSettings(u8, u8),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        any::<u8>().prop_map(Op::AddSection),
        any::<u8>().prop_map(Op::RemoveSection),
        any::<u8>().prop_map(Op::DuplicateSection),
        any::<u8>().prop_map(Op::MoveUp),
        any::<u8>().prop_map(Op::MoveDown),
        any::<u8>().prop_map(Op::AddBlock),
        (any::<u8>(), any::<u8>()).prop_map(|(a, b)| Op::UpdateSettings(a, b)),
    ]
}

fn section_id(session: &EditorSession, pick: u8) -> Option<String> {
    let sections = &session.document().sections;
    if sections.is_empty() {
        return None;
    }
    let index = pick as usize % sections.len();
    Some(sections[index].id.as_str().to_string())
}

/// Apply one op; returns true if the session committed a history entry
fn apply(session: &mut EditorSession, op: &Op) -> bool {
    match op {
        Op::AddSection(kind) => {
            let t = ["hero", "rich-text", "newsletter"][*kind as usize % 3];
            session.add_section(t, None);
            true
        }
        Op::RemoveSection(pick) => match section_id(session, *pick) {
            Some(id) => session.remove_section(&id),
            None => false,
        },
        Op::DuplicateSection(pick) => match section_id(session, *pick) {
            Some(id) => session.duplicate_section(&id).is_some(),
            None => false,
        },
        Op::MoveUp(pick) => match section_id(session, *pick) {
            Some(id) => session.move_section_up(&id),
            None => false,
        },
        Op::MoveDown(pick) => match section_id(session, *pick) {
            Some(id) => session.move_section_down(&id),
            None => false,
        },
        Op::AddBlock(pick) => match section_id(session, *pick) {
            Some(id) => session.add_block(&id, "button", None).is_some(),
            None => false,
        },
        Op::UpdateSettings(pick, value) => match section_id(session, *pick) {
            Some(id) => {
                let partial = [("heading".to_string(), json!(format!("v{value}")))]
                    .into_iter()
                    .collect();
                session.update_section_settings(&id, &partial)
            }
            None => false,
        },
    }
}

proptest! {
    #[test]
    fn undoing_every_mutation_restores_the_initial_document(
        ops in proptest::collection::vec(op_strategy(), 1..30)
    ) {
        let d0 = TemplateDocument::starter("home");
        let mut session = EditorSession::new(d0.clone());

        let mut committed = 0usize;
        for op in &ops {
            if apply(&mut session, op) {
                committed += 1;
            }
        }

        for _ in 0..committed {
            prop_assert!(session.undo());
        }

        prop_assert_eq!(&session.document().sections, &d0.sections);
        prop_assert_eq!(&session.document().theme, &d0.theme);
        prop_assert!(!session.undo());
    }

    #[test]
    fn history_length_is_bounded(extra in 0usize..40) {
        let mut session = EditorSession::new(TemplateDocument::new("home"));
        let total = MAX_HISTORY_ENTRIES + extra;
        for _ in 0..total {
            session.add_section("rich-text", None);
        }

        prop_assert_eq!(session.history().len(), MAX_HISTORY_ENTRIES);

        // Eviction removed the oldest entries: after exhausting undo, the
        // oldest reachable state already contains the evicted mutations.
        let mut undos = 0;
        while session.undo() {
            undos += 1;
        }
        prop_assert_eq!(undos, MAX_HISTORY_ENTRIES - 1);
        prop_assert_eq!(
            session.document().sections.len(),
            total - (MAX_HISTORY_ENTRIES - 1)
        );
    }
}
