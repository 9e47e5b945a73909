// src/gui/components/document_view.rs
//
// Renders the page's tables and lists straight from the document and turns
// pointer activity into page events. Tables and lists nested in a table
// cell are drawn inside that cell as their own framed regions. Checkbox
// state is never kept here: egui gets a scratch bool and the page applies
// the toggle.

use eframe::egui::{self, Color32, RichText, Stroke};
use egui_extras::{Column, TableBuilder};

use crate::{
    config::consts::{HOVER_CLASS, LIST_WRAPPER_CLASS, PANEL_CLASS},
    core::sanitize::normalize_ws,
    dom::{Document, Element, NodeId},
    enhance::{is_boilerplate, list, table},
    gui::app::App,
    picker::PickKind,
};

const HIGHLIGHT: Color32 = Color32::from_rgb(0x42, 0x85, 0xF4);
const LINE_H: f32 = 20.0;

/// What the pointer touched while drawing this frame.
#[derive(Default)]
struct Hits {
    /// Innermost drawn node under the pointer (cell, item or block).
    node: Option<NodeId>,
    /// Checkbox under the pointer.
    control: Option<NodeId>,
    /// Checkboxes and panel buttons clicked.
    clicks: Vec<NodeId>,
}

impl Hits {
    /// Pointer is inside `node`. Keeps a deeper node already recorded.
    fn enter(&mut self, doc: &Document, node: NodeId) {
        if self.node.is_none_or(|n| !doc.is_inclusive_ancestor(node, n)) {
            self.node = Some(node);
        }
    }
}

fn is_block(el: &Element) -> bool {
    PickKind::Table.matches(el) || PickKind::List.matches(el)
}

fn kind_of(doc: &Document, node: NodeId) -> PickKind {
    match doc.element(node) {
        Some(el) if PickKind::Table.matches(el) => PickKind::Table,
        _ => PickKind::List,
    }
}

/// Tables and lists under `within` whose nearest enclosing table or list is
/// `owner` (`None`: not nested in any), in document order.
pub fn blocks_in(doc: &Document, within: NodeId, owner: Option<NodeId>) -> Vec<(NodeId, PickKind)> {
    doc.find_all(within, is_block)
        .into_iter()
        .filter(|&n| doc.parent(n).and_then(|p| doc.closest(p, is_block)) == owner)
        .map(|n| (n, kind_of(doc, n)))
        .collect()
}

/// Top-level tables and lists.
pub fn blocks(doc: &Document) -> Vec<(NodeId, PickKind)> {
    blocks_in(doc, doc.root(), None)
}

/// Blocks the pointer has left when moving from `old` to `new`, innermost
/// first. Each gets its own `mouseleave`.
pub fn left_blocks(doc: &Document, old: NodeId, new: Option<NodeId>) -> Vec<NodeId> {
    doc.ancestors_inclusive(old)
        .into_iter()
        .filter(|&n| doc.element(n).is_some_and(is_block))
        .filter(|&b| new.is_none_or(|n| !doc.is_inclusive_ancestor(b, n)))
        .collect()
}

fn panel_of(doc: &Document, block: NodeId) -> Option<NodeId> {
    doc.next_element_sibling(block).filter(|&p| doc.has_class(p, PANEL_CLASS))
}

/* ---------------- Layout estimates ---------------- */

/// Lines a block takes when drawn, frame and control panel included.
fn block_lines(doc: &Document, block: NodeId, kind: PickKind) -> usize {
    let body = match kind {
        PickKind::Table => table::rows(doc, block).into_iter().map(|r| row_lines(doc, block, r)).sum(),
        PickKind::List => list::items(doc, block).len().max(1),
    };
    body + usize::from(panel_of(doc, block).is_some()) + 1
}

fn row_lines(doc: &Document, t: NodeId, row: NodeId) -> usize {
    table::cells(doc, row)
        .into_iter()
        .map(|c| cell_lines(doc, t, c))
        .max()
        .unwrap_or(1)
}

fn cell_lines(doc: &Document, t: NodeId, cell: NodeId) -> usize {
    1 + blocks_in(doc, cell, Some(t))
        .into_iter()
        .map(|(b, k)| block_lines(doc, b, k))
        .sum::<usize>()
}

/* ---------------- Drawing ---------------- */

pub fn draw(ui: &mut egui::Ui, app: &mut App) {
    let now = app.now_ms();
    let Some(page) = app.page.as_mut() else {
        ui.centered_and_justified(|ui| ui.label("No document loaded"));
        return;
    };

    let mut hits = Hits::default();
    {
        let doc = page.doc();
        let blocks = blocks(doc);
        if blocks.is_empty() {
            ui.label(RichText::new("This document has no tables or lists.").weak());
        }

        egui::ScrollArea::vertical()
            .id_salt("document_view")
            .auto_shrink([false, false])
            .show(ui, |ui| {
                for &(block, kind) in &blocks {
                    draw_block(ui, doc, block, kind, &mut hits);
                    ui.add_space(8.0);
                }
            });
    }

    // Pointer → page events, in browser order: out/leave/over, down, move, up, click.
    let (pressed, moving, released, clicked) = ui.input(|i| {
        (
            i.pointer.primary_pressed(),
            i.pointer.is_moving(),
            i.pointer.primary_released(),
            i.pointer.primary_clicked(),
        )
    });

    if hits.node != app.hovered {
        if let Some(old) = app.hovered {
            page.pointer_out(old, now);
            for block in left_blocks(page.doc(), old, hits.node) {
                page.pointer_leave(block, now);
            }
        }
        if let Some(new) = hits.node {
            page.pointer_over(new, now);
        }
        app.hovered = hits.node;
    }

    let root = page.doc().root();
    let target = hits.control.or(hits.node).unwrap_or(root);
    if pressed { page.pointer_down(target, now); }
    if moving { page.pointer_move(target, now); }
    if released { page.pointer_up(target, now); }

    for &node in &hits.clicks {
        page.click(node, now);
    }
    if clicked && hits.clicks.is_empty() {
        if let Some(node) = hits.node {
            page.click(node, now);
        }
    }
}

fn draw_block(ui: &mut egui::Ui, doc: &Document, block: NodeId, kind: PickKind, hits: &mut Hits) {
    let stroke = if doc.has_class(block, HOVER_CLASS) {
        Stroke::new(2.0, HIGHLIGHT)
    } else {
        ui.visuals().widgets.noninteractive.bg_stroke
    };

    let resp = egui::Frame::group(ui.style())
        .stroke(stroke)
        .show(ui, |ui| match kind {
            PickKind::Table => draw_table(ui, doc, block, hits),
            PickKind::List => draw_list(ui, doc, block, hits),
        })
        .response;
    if ui.rect_contains_pointer(resp.rect) {
        hits.enter(doc, block);
    }

    if let Some(panel) = panel_of(doc, block) {
        draw_panel(ui, doc, panel, hits);
    }
}

fn checkbox(ui: &mut egui::Ui, doc: &Document, cb: NodeId, hits: &mut Hits) {
    let mut scratch = doc.checked(cb);
    let resp = ui.add(egui::Checkbox::without_text(&mut scratch).indeterminate(doc.indeterminate(cb)));
    if resp.clicked() {
        hits.clicks.push(cb);
    }
    if resp.contains_pointer() {
        hits.control = Some(cb);
    }
}

fn draw_table(ui: &mut egui::Ui, doc: &Document, t: NodeId, hits: &mut Hits) {
    let rows = table::rows(doc, t);
    let cols = rows.iter().map(|&r| table::cells(doc, r).len()).max().unwrap_or(0);
    if cols == 0 {
        ui.label(RichText::new("(empty table)").weak());
        return;
    }

    TableBuilder::new(ui)
        .id_salt(("doc_table", t.index()))
        .striped(true)
        .vscroll(false)
        .columns(Column::auto().resizable(true).clip(true), cols)
        .body(|mut body| {
            for &row in &rows {
                let cells = table::cells(doc, row);
                let height = LINE_H * row_lines(doc, t, row) as f32;
                body.row(height, |mut r| {
                    for ci in 0..cols {
                        r.col(|ui| {
                            if let Some(&cell) = cells.get(ci) {
                                draw_cell(ui, doc, t, cell, hits);
                            }
                        });
                    }
                });
            }
        });
}

/// Cell text without nested blocks, their panels or boilerplate.
fn cell_own_text(doc: &Document, cell: NodeId) -> String {
    normalize_ws(&doc.text_content_where(cell, |el| {
        !is_block(el) && !is_boilerplate(el) && !el.has_class(PANEL_CLASS)
    }))
}

fn draw_cell(ui: &mut egui::Ui, doc: &Document, t: NodeId, cell: NodeId, hits: &mut Hits) {
    let text = cell_own_text(doc, cell);
    let header = doc.is_tag(cell, "th");
    let nested = blocks_in(doc, cell, Some(t));

    ui.vertical(|ui| {
        ui.horizontal(|ui| {
            if let Some(&cb) = doc.child_elements(cell, Element::is_checkbox).first() {
                checkbox(ui, doc, cb, hits);
            }
            if !text.is_empty() {
                let rt = RichText::new(text);
                ui.label(if header { rt.strong() } else { rt });
            }
        });
        for &(block, kind) in &nested {
            draw_block(ui, doc, block, kind, hits);
        }
    });

    if ui.rect_contains_pointer(ui.max_rect()) {
        hits.enter(doc, cell);
    }
}

/// Item text without nested lists, panels or the injected wrapper.
fn own_text(doc: &Document, li: NodeId) -> String {
    normalize_ws(&doc.text_content_where(li, |el| {
        !matches!(el.tag(), "ul" | "ol")
            && !is_boilerplate(el)
            && !el.has_class(LIST_WRAPPER_CLASS)
            && !el.has_class(PANEL_CLASS)
    }))
}

fn draw_list(ui: &mut egui::Ui, doc: &Document, l: NodeId, hits: &mut Hits) {
    let items = list::items(doc, l);
    if items.is_empty() {
        ui.label(RichText::new("(empty list)").weak());
        return;
    }

    for li in items {
        let depth = doc
            .ancestors_inclusive(li)
            .into_iter()
            .skip(1)
            .take_while(|&n| n != l)
            .filter(|&n| doc.is_tag(n, "li"))
            .count();

        let resp = ui
            .horizontal(|ui| {
                ui.add_space(depth as f32 * 16.0);
                match list::item_checkbox(doc, li) {
                    Some(cb) => checkbox(ui, doc, cb, hits),
                    None => { ui.label("•"); }
                }
                ui.label(own_text(doc, li));
            })
            .response;
        if ui.rect_contains_pointer(resp.rect) {
            hits.enter(doc, li);
        }
    }
}

fn draw_panel(ui: &mut egui::Ui, doc: &Document, panel: NodeId, hits: &mut Hits) {
    ui.horizontal(|ui| {
        for &button in doc.children(panel) {
            if !doc.is_tag(button, "button") { continue; }
            if ui.button(doc.text_content(button)).clicked() {
                hits.clicks.push(button);
            }
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::html::parse_document;
    use crate::message::Command;
    use crate::page::Page;

    const WIKI: &str = r#"<table id="t"><tr><td id="c">Cities<ul id="u"><li><a href="/o">Oslo</a></li></ul></td></tr></table>
        <ol id="o"><li>a<ul><li>b</li></ul></li></ol>"#;

    #[test]
    fn top_level_blocks_skip_nested_ones() {
        let doc = parse_document(WIKI);
        assert_eq!(blocks(&doc), vec![
            (doc.element_by_id("t").unwrap(), PickKind::Table),
            (doc.element_by_id("o").unwrap(), PickKind::List),
        ]);
    }

    #[test]
    fn list_in_a_cell_is_its_own_region() {
        let doc = parse_document(WIKI);
        let t = doc.element_by_id("t").unwrap();
        let c = doc.element_by_id("c").unwrap();
        let u = doc.element_by_id("u").unwrap();

        assert_eq!(blocks_in(&doc, c, Some(t)), vec![(u, PickKind::List)]);
        assert_eq!(cell_own_text(&doc, c), "Cities");
        assert_eq!(cell_lines(&doc, t, c), 1 + 2);
    }

    #[test]
    fn list_in_a_cell_can_be_picked() {
        let mut page = Page::new(parse_document(WIKI));
        let t = page.doc().element_by_id("t").unwrap();
        let c = page.doc().element_by_id("c").unwrap();
        let u = page.doc().element_by_id("u").unwrap();
        let item = list::items(page.doc(), u)[0];

        page.handle_command(Command::StartPicking { element_type: PickKind::List });
        page.pointer_over(item, 0);
        assert_eq!(page.picker().session().and_then(|s| s.candidate()), Some(u));
        assert!(!page.doc().has_class(t, HOVER_CLASS));

        // the cell around it only resolves for tables
        page.pointer_out(item, 1);
        page.pointer_over(c, 2);
        assert_eq!(page.picker().session().and_then(|s| s.candidate()), None);
    }

    #[test]
    fn leaving_an_inner_block_keeps_the_outer_one() {
        let doc = parse_document(WIKI);
        let t = doc.element_by_id("t").unwrap();
        let c = doc.element_by_id("c").unwrap();
        let u = doc.element_by_id("u").unwrap();
        let item = list::items(&doc, u)[0];

        assert_eq!(left_blocks(&doc, item, Some(c)), vec![u]);
        assert_eq!(left_blocks(&doc, item, None), vec![u, t]);
        assert!(left_blocks(&doc, c, Some(item)).is_empty());
    }

    #[test]
    fn own_text_skips_sublists() {
        let doc = parse_document(r#"<ul><li id="a">Top <b>item</b><ul><li>child</li></ul></li></ul>"#);
        assert_eq!(own_text(&doc, doc.element_by_id("a").unwrap()), "Top item");
    }
}
