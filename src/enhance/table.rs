// src/enhance/table.rs
//
// Table variant: one leading checkbox cell per row (select-all in row 0),
// and the table CSV export.

use crate::{
    config::consts::*,
    core::sanitize::table_field,
    csv::CsvDocument,
    dom::{tag_in, tag_is, Document, NodeId},
};

use super::{visible_links, visible_text};

const CELL_TAGS: &[&str] = &["th", "td"];

/// Rows owned by `table`: `tr` descendants whose nearest table is `table`
/// (rows of nested tables belong to those tables).
pub fn rows(doc: &Document, table: NodeId) -> Vec<NodeId> {
    doc.find_all(table, tag_is("tr"))
        .into_iter()
        .filter(|&tr| doc.closest(tr, tag_is("table")) == Some(table))
        .collect()
}

pub fn cells(doc: &Document, row: NodeId) -> Vec<NodeId> {
    doc.child_elements(row, tag_in(CELL_TAGS))
}

/// Prepend the checkbox column. Returns (select-all, row checkboxes), or
/// `None` when the table has no rows.
pub(super) fn add_checkboxes(doc: &mut Document, table: NodeId) -> Option<(NodeId, Vec<NodeId>)> {
    let rows = rows(doc, table);
    if rows.is_empty() {
        logd!("Enhance: Table node={} has no rows, skipping", table.index());
        return None;
    }

    let mut select_all = None;
    let mut boxes = Vec::with_capacity(rows.len().saturating_sub(1));

    for (i, &row) in rows.iter().enumerate() {
        let header_row = !doc.child_elements(row, tag_is("th")).is_empty();
        let cell = doc.create_element(if header_row { "th" } else { "td" });
        let class = if i == 0 { SELECT_ALL_CLASS } else { ROW_CHECKBOX_CLASS };
        let input = doc.create_element_with("input", &[("type", "checkbox"), ("class", class)]);
        doc.append_child(cell, input);
        doc.prepend_child(row, cell);

        if i == 0 { select_all = Some(input); } else { boxes.push(input); }
    }

    select_all.map(|sa| (sa, boxes))
}

/// The selection checkbox of `row`, if it has one (lives in the leading cell).
pub fn row_checkbox(doc: &Document, row: NodeId) -> Option<NodeId> {
    let first = *cells(doc, row).first()?;
    doc.find_first(first, |el| {
        el.is_checkbox() && (el.has_class(ROW_CHECKBOX_CLASS) || el.has_class(SELECT_ALL_CLASS))
    })
}

/// Field text for one cell: link texts when any link has text, else the
/// whole visible text. Commas → semicolons, whitespace collapsed.
pub fn cell_text(doc: &Document, cell: NodeId) -> String {
    let links: Vec<String> = visible_links(doc, cell)
        .into_iter()
        .map(|a| table_field(&visible_text(doc, a)))
        .filter(|t| !t.is_empty())
        .collect();

    if !links.is_empty() {
        return links.join(" ");
    }
    table_field(&visible_text(doc, cell))
}

/// One CSV row per structural row, in document order.
pub fn table_csv(doc: &Document, table: NodeId) -> CsvDocument {
    let mut out = CsvDocument::new();

    for row in rows(doc, table) {
        let checkbox = row_checkbox(doc, row);
        let mut fields = Vec::new();
        fields.push(match checkbox {
            Some(cb) if doc.checked(cb) => s!(CHECK_GLYPH),
            Some(_) => s!(),
            None => s!(NO_CONTROL_PLACEHOLDER),
        });

        let skip = usize::from(checkbox.is_some());
        for cell in cells(doc, row).into_iter().skip(skip) {
            fields.push(cell_text(doc, cell));
        }
        out.push(fields);
    }

    out
}
