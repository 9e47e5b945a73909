// src/dom/mod.rs
//
// Synthetic document model.
//
// An arena of nodes addressed by `NodeId`. Elements carry their tag, ordered
// attributes and the two live checkbox properties (`checked`, `indeterminate`)
// that HTML keeps outside the attribute list. Class list and inline style are
// views over the `class` and `style` attributes.
//
// Detached nodes stay in the arena; nothing is ever freed.

mod query;

pub use query::{tag_in, tag_is};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(self) -> usize { self.0 }
}

#[derive(Clone, Debug)]
pub enum NodeData {
    Document,
    Element(Element),
    Text(String),
    Comment(String),
}

#[derive(Clone, Debug)]
pub struct Element {
    tag: String,
    attrs: Vec<(String, String)>,
    pub checked: bool,
    pub indeterminate: bool,
}

impl Element {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            attrs: Vec::new(),
            checked: false,
            indeterminate: false,
        }
    }

    pub fn tag(&self) -> &str { &self.tag }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn attrs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attrs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn set_attr(&mut self, name: &str, value: &str) {
        match self.attrs.iter_mut().find(|(k, _)| k.eq_ignore_ascii_case(name)) {
            Some((_, v)) => *v = s!(value),
            None => self.attrs.push((name.to_ascii_lowercase(), s!(value))),
        }
    }

    pub fn remove_attr(&mut self, name: &str) -> bool {
        let before = self.attrs.len();
        self.attrs.retain(|(k, _)| !k.eq_ignore_ascii_case(name));
        self.attrs.len() != before
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.attr("class")
            .map(|c| c.split_whitespace().any(|x| x == class))
            .unwrap_or(false)
    }

    pub fn add_class(&mut self, class: &str) {
        if self.has_class(class) { return; }
        let mut classes: Vec<&str> = self.attr("class")
            .map(|c| c.split_whitespace().collect())
            .unwrap_or_default();
        classes.push(class);
        let joined = classes.join(" ");
        self.set_attr("class", &joined);
    }

    pub fn remove_class(&mut self, class: &str) {
        let Some(c) = self.attr("class") else { return };
        let kept: Vec<&str> = c.split_whitespace().filter(|x| *x != class).collect();
        let kept = kept.join(" ");
        self.set_attr("class", &kept);
    }

    /// Inline style property lookup (`style="a: b; c: d"`).
    pub fn style_property(&self, name: &str) -> Option<String> {
        let style = self.attr("style")?;
        style_pairs(style)
            .into_iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v)
    }

    pub fn set_style_property(&mut self, name: &str, value: &str) {
        let mut pairs = self.attr("style").map(style_pairs).unwrap_or_default();
        match pairs.iter_mut().find(|(k, _)| k.eq_ignore_ascii_case(name)) {
            Some((_, v)) => *v = s!(value),
            None => pairs.push((s!(name), s!(value))),
        }
        let style: Vec<String> = pairs.iter().map(|(k, v)| format!("{k}: {v}")).collect();
        self.set_attr("style", &style.join("; "));
    }

    pub fn is_checkbox(&self) -> bool {
        self.tag == "input"
            && self.attr("type").map(|t| t.eq_ignore_ascii_case("checkbox")).unwrap_or(false)
    }
}

fn style_pairs(style: &str) -> Vec<(String, String)> {
    style
        .split(';')
        .filter_map(|decl| {
            let (k, v) = decl.split_once(':')?;
            let (k, v) = (k.trim(), v.trim());
            if k.is_empty() { None } else { Some((s!(k), s!(v))) }
        })
        .collect()
}

#[derive(Clone, Debug)]
struct Node {
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    data: NodeData,
}

#[derive(Clone, Debug)]
pub struct Document {
    nodes: Vec<Node>,
}

impl Default for Document {
    fn default() -> Self { Self::new() }
}

impl Document {
    pub fn new() -> Self {
        Self {
            nodes: vec![Node { parent: None, children: Vec::new(), data: NodeData::Document }],
        }
    }

    #[inline]
    pub fn root(&self) -> NodeId { NodeId(0) }

    pub fn len(&self) -> usize { self.nodes.len() }
    pub fn is_empty(&self) -> bool { self.nodes.len() <= 1 }

    /* ---------------- Construction ---------------- */

    fn push(&mut self, data: NodeData) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node { parent: None, children: Vec::new(), data });
        id
    }

    /// Create a detached element.
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.push(NodeData::Element(Element::new(tag)))
    }

    /// Create a detached element with attributes, in order.
    pub fn create_element_with(&mut self, tag: &str, attrs: &[(&str, &str)]) -> NodeId {
        let mut el = Element::new(tag);
        for (k, v) in attrs {
            el.set_attr(k, v);
        }
        self.push(NodeData::Element(el))
    }

    pub fn create_text(&mut self, text: &str) -> NodeId {
        self.push(NodeData::Text(s!(text)))
    }

    pub fn create_comment(&mut self, text: &str) -> NodeId {
        self.push(NodeData::Comment(s!(text)))
    }

    /* ---------------- Tree mutation ---------------- */

    /// Unlink `node` from its parent. No-op for detached or foreign nodes.
    pub fn detach(&mut self, node: NodeId) {
        let Some(parent) = self.nodes.get_mut(node.0).and_then(|n| n.parent.take()) else { return };
        if let Some(p) = self.nodes.get_mut(parent.0) {
            p.children.retain(|&c| c != node);
        }
    }

    /// Insert `child` into `parent` before `before` (or at the end when `None`
    /// or when `before` is not a child of `parent`). Ignored when either node
    /// is not in this document or `child` contains `parent`.
    pub fn insert_before(&mut self, parent: NodeId, child: NodeId, before: Option<NodeId>) {
        if self.nodes.get(parent.0).is_none() || self.nodes.get(child.0).is_none() {
            return;
        }
        if self.is_inclusive_ancestor(child, parent) {
            return;
        }
        self.detach(child);
        if let Some(p) = self.nodes.get_mut(parent.0) {
            let at = before
                .and_then(|b| p.children.iter().position(|&c| c == b))
                .unwrap_or(p.children.len());
            p.children.insert(at, child);
        }
        if let Some(c) = self.nodes.get_mut(child.0) {
            c.parent = Some(parent);
        }
    }

    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        self.insert_before(parent, child, None);
    }

    pub fn prepend_child(&mut self, parent: NodeId, child: NodeId) {
        let first = self.first_child(parent);
        self.insert_before(parent, child, first);
    }

    /// Insert `new` as the next sibling of `node`. Returns false when `node`
    /// has no parent.
    pub fn insert_after(&mut self, node: NodeId, new: NodeId) -> bool {
        let Some(parent) = self.parent(node) else { return false };
        let next = self.next_sibling(node);
        self.insert_before(parent, new, next);
        true
    }

    /* ---------------- Navigation ---------------- */

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes.get(node.0).and_then(|n| n.parent)
    }

    pub fn children(&self, node: NodeId) -> &[NodeId] {
        self.nodes.get(node.0).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    pub fn first_child(&self, node: NodeId) -> Option<NodeId> {
        self.children(node).first().copied()
    }

    pub fn next_sibling(&self, node: NodeId) -> Option<NodeId> {
        let parent = self.parent(node)?;
        let kids = self.children(parent);
        let ix = kids.iter().position(|&c| c == node)?;
        kids.get(ix + 1).copied()
    }

    pub fn next_element_sibling(&self, node: NodeId) -> Option<NodeId> {
        let mut cur = self.next_sibling(node);
        while let Some(n) = cur {
            if self.element(n).is_some() { return Some(n); }
            cur = self.next_sibling(n);
        }
        None
    }

    /// `node`, then its parent, up to the root.
    pub fn ancestors_inclusive(&self, node: NodeId) -> Vec<NodeId> {
        let mut out = vec![node];
        let mut cur = self.parent(node);
        while let Some(p) = cur {
            out.push(p);
            cur = self.parent(p);
        }
        out
    }

    pub fn is_inclusive_ancestor(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut cur = Some(node);
        while let Some(n) = cur {
            if n == ancestor { return true; }
            cur = self.parent(n);
        }
        false
    }

    /// Pre-order descendants of `node`, excluding `node` itself.
    pub fn descendants(&self, node: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.children(node).iter().rev().copied().collect();
        while let Some(n) = stack.pop() {
            out.push(n);
            stack.extend(self.children(n).iter().rev().copied());
        }
        out
    }

    /* ---------------- Node data ---------------- */

    pub fn data(&self, node: NodeId) -> Option<&NodeData> {
        self.nodes.get(node.0).map(|n| &n.data)
    }

    pub fn element(&self, node: NodeId) -> Option<&Element> {
        match self.data(node)? {
            NodeData::Element(el) => Some(el),
            _ => None,
        }
    }

    pub fn element_mut(&mut self, node: NodeId) -> Option<&mut Element> {
        match &mut self.nodes.get_mut(node.0)?.data {
            NodeData::Element(el) => Some(el),
            _ => None,
        }
    }

    pub fn tag(&self, node: NodeId) -> Option<&str> {
        self.element(node).map(|el| el.tag())
    }

    pub fn is_tag(&self, node: NodeId, tag: &str) -> bool {
        self.tag(node) == Some(tag)
    }

    pub fn attr(&self, node: NodeId, name: &str) -> Option<&str> {
        self.element(node)?.attr(name)
    }

    pub fn set_attr(&mut self, node: NodeId, name: &str, value: &str) {
        if let Some(el) = self.element_mut(node) { el.set_attr(name, value); }
    }

    pub fn remove_attr(&mut self, node: NodeId, name: &str) {
        if let Some(el) = self.element_mut(node) { el.remove_attr(name); }
    }

    pub fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.element(node).map(|el| el.has_class(class)).unwrap_or(false)
    }

    pub fn add_class(&mut self, node: NodeId, class: &str) {
        if let Some(el) = self.element_mut(node) { el.add_class(class); }
    }

    pub fn remove_class(&mut self, node: NodeId, class: &str) {
        if let Some(el) = self.element_mut(node) { el.remove_class(class); }
    }

    pub fn set_style_property(&mut self, node: NodeId, name: &str, value: &str) {
        if let Some(el) = self.element_mut(node) { el.set_style_property(name, value); }
    }

    pub fn checked(&self, node: NodeId) -> bool {
        self.element(node).map(|el| el.checked).unwrap_or(false)
    }

    pub fn set_checked(&mut self, node: NodeId, checked: bool) {
        if let Some(el) = self.element_mut(node) { el.checked = checked; }
    }

    pub fn indeterminate(&self, node: NodeId) -> bool {
        self.element(node).map(|el| el.indeterminate).unwrap_or(false)
    }

    pub fn set_indeterminate(&mut self, node: NodeId, indeterminate: bool) {
        if let Some(el) = self.element_mut(node) { el.indeterminate = indeterminate; }
    }

    pub fn is_checkbox(&self, node: NodeId) -> bool {
        self.element(node).map(Element::is_checkbox).unwrap_or(false)
    }

    /* ---------------- Text ---------------- */

    /// Concatenated text of all descendant text nodes (`textContent`).
    pub fn text_content(&self, node: NodeId) -> String {
        self.text_content_where(node, |_| true)
    }

    /// Like `text_content`, but element subtrees for which `keep` returns
    /// false contribute nothing. `node` itself is always entered.
    pub fn text_content_where<F>(&self, node: NodeId, keep: F) -> String
    where
        F: Fn(&Element) -> bool,
    {
        let mut out = s!();
        if let Some(NodeData::Text(t)) = self.data(node) {
            out.push_str(t);
            return out;
        }
        let mut stack: Vec<NodeId> = self.children(node).iter().rev().copied().collect();
        while let Some(n) = stack.pop() {
            match self.data(n) {
                Some(NodeData::Text(t)) => out.push_str(t),
                Some(NodeData::Element(el)) if keep(el) => {
                    stack.extend(self.children(n).iter().rev().copied());
                }
                _ => {}
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> (Document, NodeId, NodeId, NodeId) {
        let mut doc = Document::new();
        let ul = doc.create_element("UL");
        let a = doc.create_element("li");
        let b = doc.create_element("li");
        doc.append_child(doc.root(), ul);
        doc.append_child(ul, a);
        doc.append_child(ul, b);
        let t = doc.create_text("first");
        doc.append_child(a, t);
        (doc, ul, a, b)
    }

    #[test]
    fn tags_are_lowercased_and_siblings_resolve() {
        let (doc, ul, a, b) = sample();
        assert_eq!(doc.tag(ul), Some("ul"));
        assert_eq!(doc.next_element_sibling(a), Some(b));
        assert_eq!(doc.next_element_sibling(b), None);
        assert_eq!(doc.descendants(ul).len(), 3);
    }

    #[test]
    fn prepend_and_insert_after_keep_order() {
        let (mut doc, ul, a, b) = sample();
        let first = doc.create_element("li");
        doc.prepend_child(ul, first);
        let panel = doc.create_element("div");
        assert!(doc.insert_after(ul, panel));
        assert_eq!(doc.children(ul), &[first, a, b]);
        assert_eq!(doc.next_sibling(ul), Some(panel));
    }

    #[test]
    fn insert_after_detached_is_refused() {
        let mut doc = Document::new();
        let lonely = doc.create_element("table");
        let panel = doc.create_element("div");
        assert!(!doc.insert_after(lonely, panel));
        assert_eq!(doc.parent(panel), None);
    }

    #[test]
    fn foreign_nodes_leave_the_tree_alone() {
        let (mut doc, ul, a, b) = sample();
        let stray = NodeId(doc.len() + 10);

        doc.detach(stray);
        doc.append_child(ul, stray);
        doc.append_child(stray, a);
        doc.insert_before(ul, a, Some(stray));

        assert_eq!(doc.children(ul), &[b, a]);
        assert_eq!(doc.parent(a), Some(ul));
        assert_eq!(doc.parent(stray), None);
    }

    #[test]
    fn class_list_round_trip() {
        let mut el = Element::new("table");
        el.set_attr("class", "wikitable  sortable");
        el.add_class("hover");
        el.add_class("hover");
        assert_eq!(el.attr("class"), Some("wikitable sortable hover"));
        el.remove_class("sortable");
        assert!(!el.has_class("sortable"));
        assert!(el.has_class("wikitable") && el.has_class("hover"));
    }

    #[test]
    fn style_property_replaces_existing_declaration() {
        let mut el = Element::new("ol");
        el.set_attr("style", "color: red; list-style-type: decimal");
        el.set_style_property("list-style-type", "none");
        assert_eq!(el.style_property("list-style-type").as_deref(), Some("none"));
        assert_eq!(el.style_property("color").as_deref(), Some("red"));
    }

    #[test]
    fn text_content_where_skips_rejected_subtrees() {
        let mut doc = Document::new();
        let td = doc.create_element("td");
        let style = doc.create_element("style");
        let css = doc.create_text(".x{}");
        let txt = doc.create_text("Paris");
        doc.append_child(td, style);
        doc.append_child(style, css);
        doc.append_child(td, txt);
        assert_eq!(doc.text_content(td), ".x{}Paris");
        assert_eq!(doc.text_content_where(td, |el| el.tag() != "style"), "Paris");
    }

    #[test]
    fn cannot_insert_ancestor_into_descendant() {
        let (mut doc, ul, a, _) = sample();
        doc.append_child(a, ul);
        assert_eq!(doc.parent(ul), Some(doc.root()));
    }
}
