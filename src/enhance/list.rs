// src/enhance/list.rs
//
// List variant: checkbox wrappers on eligible items, two-column CSV export.

use crate::{
    config::consts::*,
    core::sanitize::list_item_text,
    csv::CsvDocument,
    dom::{tag_is, Document, Element, NodeId},
};

/// Every `li` under the list, nested ones included, in document order.
pub fn items(doc: &Document, list: NodeId) -> Vec<NodeId> {
    doc.find_all(list, tag_is("li"))
}

/// Non-empty text and at least one hyperlink.
pub fn is_eligible(doc: &Document, item: NodeId) -> bool {
    !doc.text_content(item).trim().is_empty() && doc.find_first(item, tag_is("a")).is_some()
}

/// Hide markers and prepend checkbox wrappers. Returns the item checkboxes.
pub(super) fn add_checkboxes(doc: &mut Document, list: NodeId) -> Vec<NodeId> {
    doc.set_style_property(list, "list-style-type", "none");

    let eligible: Vec<NodeId> = items(doc, list)
        .into_iter()
        .filter(|&li| is_eligible(doc, li))
        .collect();

    let mut boxes = Vec::with_capacity(eligible.len());
    for li in eligible {
        doc.remove_attr(li, "value");
        doc.set_style_property(li, "list-style-type", "none");

        let wrapper = doc.create_element_with("span", &[("class", LIST_WRAPPER_CLASS)]);
        let input = doc.create_element_with("input", &[("type", "checkbox"), ("class", ROW_CHECKBOX_CLASS)]);
        doc.append_child(wrapper, input);
        doc.prepend_child(li, wrapper);
        boxes.push(input);
    }
    boxes
}

/// The checkbox injected into `item`, if any.
pub fn item_checkbox(doc: &Document, item: NodeId) -> Option<NodeId> {
    doc.child_elements(item, |el| el.has_class(LIST_WRAPPER_CLASS))
        .into_iter()
        .find_map(|w| doc.find_first(w, |el| el.has_class(ROW_CHECKBOX_CLASS)))
}

fn is_excluded(el: &Element) -> bool {
    el.has_class(LIST_WRAPPER_CLASS)
        || (el.tag() == REFERENCE_TAG && el.has_class(REFERENCE_CLASS))
        || BOILERPLATE_TAGS.contains(&el.tag())
}

/// Item text without the wrapper and citation markers, numbering stripped.
pub fn item_text(doc: &Document, item: NodeId) -> String {
    list_item_text(&doc.text_content_where(item, |el| !is_excluded(el)))
}

/// Header, then one row per checked item.
pub fn list_csv(doc: &Document, list: NodeId) -> CsvDocument {
    let mut out = CsvDocument::new();
    out.push(LIST_HEADERS.iter().map(|h| s!(*h)).collect());

    for li in items(doc, list) {
        let Some(cb) = item_checkbox(doc, li) else { continue };
        if !doc.checked(cb) { continue; }
        let text = item_text(doc, li);
        if text.is_empty() { continue; }

        out.push(vec![s!(CHECK_GLYPH), text]);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::html::parse_document;

    #[test]
    fn eligibility_needs_text_and_link() {
        let doc = parse_document(
            r#"<ul><li id="a"><a href="/x">X</a></li><li id="b">plain</li>
               <li id="c"><a href="/y"> </a></li></ul>"#,
        );
        assert!(is_eligible(&doc, doc.element_by_id("a").unwrap()));
        assert!(!is_eligible(&doc, doc.element_by_id("b").unwrap()));
        assert!(!is_eligible(&doc, doc.element_by_id("c").unwrap()));
    }

    #[test]
    fn item_text_drops_references_and_numbering() {
        let doc = parse_document(
            r#"<ol><li id="a">  3.  <a href="/m">Moon</a>   landing<sup class="reference">[4]</sup>
               "one small step"</li></ol>"#,
        );
        let li = doc.element_by_id("a").unwrap();
        assert_eq!(item_text(&doc, li), r#"Moon landing "one small step""#);
    }

    #[test]
    fn only_checked_items_are_exported() {
        let mut doc = parse_document(
            r#"<ul id="l"><li><a href="/a">A</a></li><li><a href="/b">B</a></li></ul>"#,
        );
        let l = doc.element_by_id("l").unwrap();
        let boxes = add_checkboxes(&mut doc, l);
        doc.set_checked(boxes[1], true);
        assert_eq!(list_csv(&doc, l).rows, vec![
            vec![s!("Selected"), s!("Text")],
            vec![s!("✓"), s!("B")],
        ]);
    }

    #[test]
    fn manual_numbering_and_markers_are_removed() {
        let mut doc = parse_document(
            r#"<ol id="l" style="color: blue"><li id="a" value="7"><a href="/">A</a></li></ol>"#,
        );
        let l = doc.element_by_id("l").unwrap();
        let boxes = add_checkboxes(&mut doc, l);
        let a = doc.element_by_id("a").unwrap();

        assert_eq!(boxes.len(), 1);
        assert_eq!(doc.attr(a, "value"), None);
        let list_el = doc.element(l).unwrap();
        assert_eq!(list_el.style_property("list-style-type").as_deref(), Some("none"));
        assert_eq!(list_el.style_property("color").as_deref(), Some("blue"));
        assert_eq!(item_checkbox(&doc, a), Some(boxes[0]));
    }
}
