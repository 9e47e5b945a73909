// src/dom/query.rs
//
// Element lookups over the document tree: `closest`, `find_first`, `find_all`,
// and small predicate builders so callers read like selectors.

use super::{Document, Element, NodeId};

/// Predicate: element tag equals `tag`.
pub fn tag_is(tag: &'static str) -> impl Fn(&Element) -> bool {
    move |el| el.tag() == tag
}

/// Predicate: element tag is one of `tags`.
pub fn tag_in(tags: &'static [&'static str]) -> impl Fn(&Element) -> bool {
    move |el| tags.contains(&el.tag())
}

impl Document {
    /// Nearest inclusive ancestor element satisfying `pred` (`Element.closest`).
    pub fn closest<F>(&self, node: NodeId, pred: F) -> Option<NodeId>
    where
        F: Fn(&Element) -> bool,
    {
        self.ancestors_inclusive(node)
            .into_iter()
            .find(|&n| self.element(n).map(&pred).unwrap_or(false))
    }

    /// First descendant element satisfying `pred`, in document order.
    pub fn find_first<F>(&self, node: NodeId, pred: F) -> Option<NodeId>
    where
        F: Fn(&Element) -> bool,
    {
        self.descendants(node)
            .into_iter()
            .find(|&n| self.element(n).map(&pred).unwrap_or(false))
    }

    /// All descendant elements satisfying `pred`, in document order.
    pub fn find_all<F>(&self, node: NodeId, pred: F) -> Vec<NodeId>
    where
        F: Fn(&Element) -> bool,
    {
        self.descendants(node)
            .into_iter()
            .filter(|&n| self.element(n).map(&pred).unwrap_or(false))
            .collect()
    }

    /// Direct element children satisfying `pred`.
    pub fn child_elements<F>(&self, node: NodeId, pred: F) -> Vec<NodeId>
    where
        F: Fn(&Element) -> bool,
    {
        self.children(node)
            .iter()
            .copied()
            .filter(|&n| self.element(n).map(&pred).unwrap_or(false))
            .collect()
    }

    pub fn element_by_id(&self, id: &str) -> Option<NodeId> {
        self.find_first(self.root(), |el| el.attr("id") == Some(id))
    }

    /// The `<head>` element, if the document has one.
    pub fn head(&self) -> Option<NodeId> {
        self.find_first(self.root(), tag_is("head"))
    }
}
