//! End-to-end replay tests: overrides recorded in one editing session are
//! replayed deterministically by a later session over the same log
//! directory, as long as the rendered structure is preserved.

use live_edit::{EditLogStore, OverrideEngine, RenderedElement};
use tempfile::TempDir;

fn landing_page() -> RenderedElement {
    RenderedElement::new("main")
        .with_child(
            RenderedElement::new("h1")
                .with_class("headline")
                .with_text("Launch faster"),
        )
        .with_child(
            RenderedElement::new("img")
                .with_id("hero-shot")
                .with_attr("src", "/v1.png")
                .with_attr("alt", "product"),
        )
        .with_child(
            RenderedElement::new("p").with_text("Some body copy."),
        )
}

#[test]
fn overrides_survive_a_new_session() {
    let dir = TempDir::new().unwrap();

    {
        let mut engine = OverrideEngine::new(EditLogStore::with_dir(dir.path()).unwrap());
        engine
            .commit("landing", "h1.headline-1", "style.color", "#123456")
            .unwrap();
        engine
            .commit("landing", "hero-shot", "src", "/v2.png")
            .unwrap();
    }

    // A later render pass in a fresh process discovers the same identities
    // and replays both overrides.
    let engine = OverrideEngine::new(EditLogStore::with_dir(dir.path()).unwrap());
    let mut surface = landing_page();
    let report = engine.discover("landing", &mut surface);

    assert_eq!(report.edits_applied, 2);
    assert_eq!(
        surface.children[0].styles.get("color").map(String::as_str),
        Some("#123456")
    );
    assert_eq!(surface.children[1].attr("src"), Some("/v2.png"));
}

#[test]
fn newest_write_wins_across_sessions() {
    let dir = TempDir::new().unwrap();

    {
        let mut engine = OverrideEngine::new(EditLogStore::with_dir(dir.path()).unwrap());
        engine
            .commit("landing", "h1.headline-1", "textContent", "First")
            .unwrap();
    }
    {
        let mut engine = OverrideEngine::new(EditLogStore::with_dir(dir.path()).unwrap());
        engine
            .commit("landing", "h1.headline-1", "textContent", "Second")
            .unwrap();
    }

    let engine = OverrideEngine::new(EditLogStore::with_dir(dir.path()).unwrap());
    let mut surface = landing_page();
    engine.discover("landing", &mut surface);

    assert_eq!(surface.children[0].text.as_deref(), Some("Second"));
    // One entry per key: the first write was replaced, not appended.
    assert_eq!(engine.store().edits_for("landing", "h1.headline-1").len(), 1);
}

#[test]
fn reordered_structure_changes_derived_identities() {
    // Derived identities are positional: swapping two same-selector
    // siblings retargets the override. This is the documented limitation
    // of scan-derived identity; authored ids are immune.
    let mut engine = OverrideEngine::new(EditLogStore::in_memory());
    engine
        .commit("landing", "p.note-2", "textContent", "edited")
        .unwrap();

    let mut surface = RenderedElement::new("main")
        .with_child(RenderedElement::new("p").with_class("note").with_text("one"))
        .with_child(RenderedElement::new("p").with_class("note").with_text("two"));
    engine.discover("landing", &mut surface);
    assert_eq!(surface.children[1].text.as_deref(), Some("edited"));

    // Same content rendered in reverse order: the second slot is now the
    // other paragraph, and it receives the override instead.
    let mut swapped = RenderedElement::new("main")
        .with_child(RenderedElement::new("p").with_class("note").with_text("two"))
        .with_child(RenderedElement::new("p").with_class("note").with_text("one"));
    engine.discover("landing", &mut swapped);
    assert_eq!(swapped.children[1].text.as_deref(), Some("edited"));
}

#[test]
fn authored_ids_are_stable_under_reordering() {
    let mut engine = OverrideEngine::new(EditLogStore::in_memory());
    engine
        .commit("landing", "hero-shot", "alt", "new description")
        .unwrap();

    // The image moves to the front of the page; its authored id still
    // resolves, so the override follows it.
    let mut surface = RenderedElement::new("main")
        .with_child(
            RenderedElement::new("img")
                .with_id("hero-shot")
                .with_attr("alt", "product"),
        )
        .with_child(RenderedElement::new("h1").with_text("Launch faster"));
    engine.discover("landing", &mut surface);

    assert_eq!(surface.children[0].attr("alt"), Some("new description"));
}

#[test]
fn inner_html_override_replaces_children() {
    let mut engine = OverrideEngine::new(EditLogStore::in_memory());
    engine
        .commit("landing", "main-block", "innerHTML", "<em>custom</em>")
        .unwrap();

    let mut surface = RenderedElement::new("div")
        .with_id("main-block")
        .with_child(RenderedElement::new("p").with_text("old"));
    engine.discover("landing", &mut surface);

    assert!(surface.children.is_empty());
    assert_eq!(surface.raw_html.as_deref(), Some("<em>custom</em>"));
}
