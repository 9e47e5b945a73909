// tests/picker_flow.rs
use pick_csv::config::consts::{ENHANCED_ATTR, HOVER_CLASS, PANEL_CLASS, PICKER_STYLE_ID};
use pick_csv::core::html::parse_document;
use pick_csv::events::Owner;
use pick_csv::message::{Command, Outbound};
use pick_csv::page::Page;
use pick_csv::picker::{PickKind, PickState};

const PAGE: &str = r#"<html><head><title>t</title></head><body>
<table id="t"><tr><th>Name</th></tr><tr><td id="cell"><a href="/a">Alpha</a></td></tr></table>
<ul id="l"><li id="li"><a href="/x">X</a></li></ul>
</body></html>"#;

fn page() -> Page {
    Page::new(parse_document(PAGE))
}

fn start(page: &mut Page, kind: PickKind) {
    page.handle_command(Command::StartPicking { element_type: kind });
}

#[test]
fn hover_then_click_enhances_and_closes_popup() {
    let mut page = page();
    let t = page.doc().element_by_id("t").unwrap();
    let cell = page.doc().element_by_id("cell").unwrap();

    start(&mut page, PickKind::Table);
    assert!(page.picker().is_armed());
    assert!(page.doc().element_by_id(PICKER_STYLE_ID).is_some());

    page.pointer_over(cell, 0);
    assert!(page.doc().has_class(t, HOVER_CLASS));

    let outcome = page.click(cell, 1);
    assert!(outcome.default_prevented);
    assert!(outcome.propagation_stopped);

    assert_eq!(page.take_outbox(), vec![Outbound::ClosePopup]);
    assert_eq!(page.doc().attr(t, ENHANCED_ATTR), Some("true"));
    assert!(!page.doc().has_class(t, HOVER_CLASS));
    assert!(page.doc().element_by_id(PICKER_STYLE_ID).is_none());
    assert_eq!(page.listeners().count_for(Owner::Picker), 0);
    assert!(matches!(page.picker().state(), PickState::Resolved { kind: PickKind::Table, element } if *element == t));

    let panel = page.doc().next_element_sibling(t).unwrap();
    assert!(page.doc().has_class(panel, PANEL_CLASS));
}

#[test]
fn click_without_candidate_is_inert() {
    let mut page = page();
    let li = page.doc().element_by_id("li").unwrap();

    // hovering a list never yields a table candidate
    start(&mut page, PickKind::Table);
    page.pointer_over(li, 0);
    let outcome = page.click(li, 1);

    assert!(!outcome.default_prevented);
    assert!(page.picker().is_armed());
    assert!(page.take_outbox().is_empty());
    assert!(page.widgets().is_empty());
}

#[test]
fn mouse_out_clears_candidate() {
    let mut page = page();
    let cell = page.doc().element_by_id("cell").unwrap();
    let t = page.doc().element_by_id("t").unwrap();

    start(&mut page, PickKind::Table);
    page.pointer_over(cell, 0);
    page.pointer_out(cell, 1);
    assert!(!page.doc().has_class(t, HOVER_CLASS));

    page.click(cell, 2);
    assert!(page.picker().is_armed());
    assert!(page.widgets().is_empty());
}

#[test]
fn disable_picking_restores_the_page() {
    let mut page = page();
    let cell = page.doc().element_by_id("cell").unwrap();
    let t = page.doc().element_by_id("t").unwrap();

    assert!(page.handle_message(r#"{"action":"startPicking","elementType":"table"}"#));
    page.pointer_over(cell, 0);
    assert!(page.handle_message(r#"{"action":"disablePicking"}"#));

    assert!(matches!(page.picker().state(), PickState::Idle));
    assert!(!page.doc().has_class(t, HOVER_CLASS));
    assert!(page.doc().element_by_id(PICKER_STYLE_ID).is_none());
    assert!(page.listeners().is_empty());

    // clicks after disabling are ordinary clicks
    page.click(cell, 1);
    assert!(page.widgets().is_empty());
    assert!(page.take_outbox().is_empty());
}

#[test]
fn rearming_keeps_a_single_session() {
    let mut page = page();
    start(&mut page, PickKind::Table);
    start(&mut page, PickKind::List);

    let styles = page.doc().find_all(page.doc().root(), |el| el.attr("id") == Some(PICKER_STYLE_ID));
    assert_eq!(styles.len(), 1);
    assert_eq!(page.listeners().count_for(Owner::Picker), 3);
    assert_eq!(page.picker().session().map(|s| s.kind()), Some(PickKind::List));
}

#[test]
fn picking_an_enhanced_element_again_changes_nothing() {
    let mut page = page();
    let cell = page.doc().element_by_id("cell").unwrap();

    start(&mut page, PickKind::Table);
    page.pointer_over(cell, 0);
    page.click(cell, 1);
    let nodes = page.doc().len();

    start(&mut page, PickKind::Table);
    page.pointer_over(cell, 2);
    page.click(cell, 3);

    assert_eq!(page.widgets().len(), 1);
    // only the picker's style sheet (element + text) was created
    assert_eq!(page.doc().len(), nodes + 2);
    let panels = page.doc().find_all(page.doc().root(), |el| el.has_class(PANEL_CLASS));
    assert_eq!(panels.len(), 1);
    assert_eq!(page.take_outbox(), vec![Outbound::ClosePopup, Outbound::ClosePopup]);
    assert!(!page.picker().is_armed());
}

#[test]
fn list_pick_uses_nearest_list() {
    let mut page = page();
    let li = page.doc().element_by_id("li").unwrap();
    let l = page.doc().element_by_id("l").unwrap();

    start(&mut page, PickKind::List);
    page.pointer_over(li, 0);
    page.click(li, 1);

    let w = page.widget_for(l).unwrap();
    assert_eq!(w.kind(), PickKind::List);
    assert_eq!(w.checkboxes().len(), 1);
    assert!(w.select_all().is_none());
}
